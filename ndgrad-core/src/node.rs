// ndgrad-core/src/node.rs

use crate::error::{NdGradError, StoreKind};
use std::fmt;

/// Opaque handle for a position in the computation graph.
///
/// A `Node` is an index into the [`NodeArena`] that issued it. Equality and hashing
/// are by index only: two nodes with the same shape are still distinct nodes.
/// Handles from different arenas must not be mixed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(usize);

impl Node {
    /// Position of this node inside its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node#{}", self.0)
    }
}

/// Flat arena of node metadata.
///
/// Nodes are created once, at graph-construction time, and live as long as the arena.
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    shapes: Vec<Vec<usize>>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new node with the given shape and returns its handle.
    ///
    /// # Errors
    /// Returns `NdGradError::InvalidShape` if any dimension is zero.
    pub fn node(&mut self, shape: &[usize]) -> Result<Node, NdGradError> {
        if shape.iter().any(|&d| d == 0) {
            return Err(NdGradError::InvalidShape {
                shape: shape.to_vec(),
            });
        }
        let node = Node(self.shapes.len());
        self.shapes.push(shape.to_vec());
        log::trace!("NodeArena: created {:?} with shape {:?}", node, shape);
        Ok(node)
    }

    /// Returns the shape recorded for `node`.
    pub fn shape(&self, node: Node) -> Result<&[usize], NdGradError> {
        self.shapes
            .get(node.0)
            .map(Vec::as_slice)
            .ok_or(NdGradError::NotFound {
                node,
                store: StoreKind::Arena,
            })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates over every node issued so far, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.shapes.len()).map(Node)
    }
}
