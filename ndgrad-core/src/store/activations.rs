// ndgrad-core/src/store/activations.rs

use crate::array::NDArray;
use crate::config::GradientConfig;
use crate::error::{NdGradError, StoreKind};
use crate::node::Node;
use crate::store::warn_if_non_finite;
use std::collections::HashMap;

/// Forward-pass results keyed by node.
///
/// An entry exists for a node iff that node's forward pass has run and the entry
/// has not been disposed since. Once written, an entry is only read until it is
/// overwritten or disposed.
///
/// The store shares [`GradientConfig`] with the accumulator so one config can be
/// handed to both, but it only reads `warn_on_non_finite`. The missing-gradient
/// policy has no effect here: a missing activation is always `NotFound`.
#[derive(Debug, Default)]
pub struct ActivationStore {
    arrays: HashMap<Node, NDArray>,
    config: GradientConfig,
}

impl ActivationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store. Only the non-finite warning setting of `config` applies.
    pub fn with_config(config: GradientConfig) -> Self {
        ActivationStore {
            arrays: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GradientConfig {
        &self.config
    }

    /// Stores `array` as the activation of `node`, taking ownership.
    /// A previous entry for `node` is dropped.
    pub fn set(&mut self, node: Node, array: NDArray) {
        warn_if_non_finite(&self.config, StoreKind::Activations, node, &array);
        log::debug!("ActivationStore: set {:?} (shape {:?})", node, array.shape());
        if self.arrays.insert(node, array).is_some() {
            log::trace!("ActivationStore: overwrote previous entry for {:?}", node);
        }
    }

    /// Borrows the activation of `node`.
    ///
    /// # Errors
    /// Returns `NdGradError::NotFound` if `node` has no entry.
    pub fn get(&self, node: Node) -> Result<&NDArray, NdGradError> {
        self.arrays.get(&node).ok_or(NdGradError::NotFound {
            node,
            store: StoreKind::Activations,
        })
    }

    pub fn has(&self, node: Node) -> bool {
        self.arrays.contains_key(&node)
    }

    /// Drops the activation of `node` and removes the mapping. No-op if absent.
    pub fn dispose_array(&mut self, node: Node) {
        if self.arrays.remove(&node).is_some() {
            log::debug!("ActivationStore: disposed {:?}", node);
        }
    }

    /// Removes the activation of `node` and hands ownership back to the caller.
    pub fn take(&mut self, node: Node) -> Result<NDArray, NdGradError> {
        self.arrays.remove(&node).ok_or(NdGradError::NotFound {
            node,
            store: StoreKind::Activations,
        })
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Nodes that currently hold an activation, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.arrays.keys().copied()
    }

    /// Disposes every entry. Used as an arena reset at the end of a sweep.
    pub fn clear(&mut self) {
        log::debug!("ActivationStore: clearing {} entries", self.arrays.len());
        self.arrays.clear();
    }
}

#[cfg(test)]
#[path = "activations_test.rs"]
mod tests;
