// ndgrad-core/src/store/gradients.rs

use crate::array::NDArray;
use crate::backend::Backend;
use crate::config::{GradientConfig, MissingGradientPolicy};
use crate::error::{NdGradError, StoreKind};
use crate::node::Node;
use crate::store::warn_if_non_finite;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Running sum of backward-pass contributions keyed by node.
///
/// A node that consumes its input along several paths receives one contribution per
/// path; the accumulator sums them with the backend's elementwise `add`. The sum is
/// order independent up to floating-point rounding.
///
/// Absence of an entry means "no contribution yet" and is kept distinct from an
/// explicit zero array: [`GradientAccumulator::get`] fails on an absent entry.
pub struct GradientAccumulator {
    backend: Arc<dyn Backend>,
    sums: HashMap<Node, NDArray>,
    config: GradientConfig,
}

impl fmt::Debug for GradientAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientAccumulator")
            .field("backend", &self.backend)
            .field("nodes", &self.sums.len())
            .field("config", &self.config)
            .finish()
    }
}

impl GradientAccumulator {
    /// Creates an empty accumulator that sums with `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_config(backend, GradientConfig::default())
    }

    pub fn with_config(backend: Arc<dyn Backend>, config: GradientConfig) -> Self {
        GradientAccumulator {
            backend,
            sums: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GradientConfig {
        &self.config
    }

    /// Adds a contribution to the gradient of `node`, taking ownership of `array`.
    ///
    /// The first contribution becomes the entry as is. Later ones are summed with the
    /// existing entry into a new array; both operands are dropped afterwards.
    ///
    /// # Errors
    /// Returns `NdGradError::ShapeMismatch` if `array` does not match the shape of the
    /// existing entry. The existing entry is left unchanged in that case.
    pub fn add(&mut self, node: Node, array: NDArray) -> Result<(), NdGradError> {
        warn_if_non_finite(&self.config, StoreKind::Gradients, node, &array);
        let sum = match self.sums.get(&node) {
            None => {
                log::debug!("GradientAccumulator: first contribution for {:?}", node);
                array
            }
            Some(existing) => {
                log::debug!("GradientAccumulator: summing contribution into {:?}", node);
                self.backend.add(existing, &array)?
            }
        };
        self.sums.insert(node, sum);
        Ok(())
    }

    /// Adds several contributions as a single step: either all of them land or none do.
    ///
    /// Contributions are summed in iteration order, so the same node may appear more
    /// than once. Sums are staged off to the side and only committed once every one of
    /// them has succeeded.
    ///
    /// # Errors
    /// Returns `NdGradError::ShapeMismatch` if any contribution disagrees in shape with
    /// the entry it would be summed into. The accumulator is unchanged in that case.
    pub fn add_all<I>(&mut self, contributions: I) -> Result<(), NdGradError>
    where
        I: IntoIterator<Item = (Node, NDArray)>,
    {
        let mut staged: HashMap<Node, NDArray> = HashMap::new();
        for (node, array) in contributions {
            warn_if_non_finite(&self.config, StoreKind::Gradients, node, &array);
            let sum = match staged.get(&node).or_else(|| self.sums.get(&node)) {
                None => array,
                Some(existing) => self.backend.add(existing, &array)?,
            };
            staged.insert(node, sum);
        }
        log::debug!("GradientAccumulator: committing {} staged entries", staged.len());
        self.sums.extend(staged);
        Ok(())
    }

    /// Borrows the accumulated gradient of `node`.
    ///
    /// # Errors
    /// Returns `NdGradError::NotFound` if no contribution has been added for `node`.
    pub fn get(&self, node: Node) -> Result<&NDArray, NdGradError> {
        self.sums.get(&node).ok_or(NdGradError::NotFound {
            node,
            store: StoreKind::Gradients,
        })
    }

    /// Resolves the upstream gradient an operation reads in its backward pass.
    ///
    /// Returns `Ok(None)` only under [`MissingGradientPolicy::ImplicitZero`], meaning
    /// the backward pass has nothing to propagate.
    pub fn upstream(&self, node: Node) -> Result<Option<&NDArray>, NdGradError> {
        match (self.sums.get(&node), self.config.missing_gradient_policy()) {
            (Some(grad), _) => Ok(Some(grad)),
            (None, MissingGradientPolicy::ImplicitZero) => {
                log::debug!(
                    "GradientAccumulator: no gradient for {:?}, treating as zero",
                    node
                );
                Ok(None)
            }
            (None, MissingGradientPolicy::Fatal) => Err(NdGradError::NotFound {
                node,
                store: StoreKind::Gradients,
            }),
        }
    }

    pub fn has(&self, node: Node) -> bool {
        self.sums.contains_key(&node)
    }

    /// Drops the gradient of `node` and removes the mapping. No-op if absent.
    pub fn dispose_array(&mut self, node: Node) {
        if self.sums.remove(&node).is_some() {
            log::debug!("GradientAccumulator: disposed {:?}", node);
        }
    }

    /// Removes the gradient of `node` and hands ownership back to the caller.
    pub fn take(&mut self, node: Node) -> Result<NDArray, NdGradError> {
        self.sums.remove(&node).ok_or(NdGradError::NotFound {
            node,
            store: StoreKind::Gradients,
        })
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.sums.keys().copied()
    }

    /// Disposes every entry, e.g. before the next backward sweep.
    pub fn clear(&mut self) {
        log::debug!("GradientAccumulator: clearing {} entries", self.sums.len());
        self.sums.clear();
    }
}

#[cfg(test)]
#[path = "gradients_test.rs"]
mod tests;
