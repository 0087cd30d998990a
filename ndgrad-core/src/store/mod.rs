//! # Node-keyed Array Stores (`store`)
//!
//! Two maps route arrays along graph edges:
//!
//! - [`ActivationStore`]: forward-pass results. `set` overwrites.
//! - [`GradientAccumulator`]: backward-pass contributions. `add` sums.
//!
//! Both own the arrays they hold. Inserting moves the array in, `dispose_array`
//! drops it and removes the mapping, and `get` hands out a borrow rather than a copy.
//! An absent entry is meaningful: for activations it means "forward not run yet",
//! for gradients it means "no contribution received yet", which is not the same
//! thing as an explicit zero array.

use crate::array::NDArray;
use crate::config::GradientConfig;
use crate::error::StoreKind;
use crate::node::Node;

pub mod activations;
pub mod gradients;

pub use activations::ActivationStore;
pub use gradients::GradientAccumulator;

/// Logs a warning for non-finite values when the config asks for it.
pub(crate) fn warn_if_non_finite(
    config: &GradientConfig,
    store: StoreKind,
    node: Node,
    array: &NDArray,
) {
    if config.warns_on_non_finite() && array.has_non_finite() {
        log::warn!(
            "{:?}: non-finite value stored for {:?} (shape {:?})",
            store,
            node,
            array.shape()
        );
    }
}
