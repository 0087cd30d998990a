// ndgrad-core/src/config.rs

/// What an operation's `backward` does when its output node has no accumulated gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingGradientPolicy {
    /// Fail with `NdGradError::NotFound`. A missing upstream gradient means the
    /// scheduler ran backward out of order or on a node with no consumers.
    #[default]
    Fatal,
    /// Treat the missing gradient as zero: the backward contributes nothing and the
    /// inputs' accumulator entries are left untouched (still absent if they were).
    ImplicitZero,
}

/// Behaviour knobs shared by the activation store and the gradient accumulator.
///
/// ```
/// use ndgrad_core::config::{GradientConfig, MissingGradientPolicy};
///
/// let config = GradientConfig::default()
///     .missing_gradient(MissingGradientPolicy::ImplicitZero)
///     .warn_on_non_finite(true);
/// assert!(config.warns_on_non_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GradientConfig {
    missing_gradient: MissingGradientPolicy,
    warn_on_non_finite: bool,
}

impl GradientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_gradient(mut self, policy: MissingGradientPolicy) -> Self {
        self.missing_gradient = policy;
        self
    }

    /// Log a warning whenever an array holding NaN or ±Inf is inserted into a store.
    /// The values themselves are never altered.
    pub fn warn_on_non_finite(mut self, enabled: bool) -> Self {
        self.warn_on_non_finite = enabled;
        self
    }

    pub fn missing_gradient_policy(&self) -> MissingGradientPolicy {
        self.missing_gradient
    }

    pub fn warns_on_non_finite(&self) -> bool {
        self.warn_on_non_finite
    }
}
