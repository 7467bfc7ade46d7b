//! Identifiers and a simple allocator for scene entities.

use serde::{Deserialize, Serialize};

/// Opaque scene-node handle (mesh, joint, deformer, or skin binding).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Index of one per-mesh weight-map slot on a deformer.
///
/// A deformer bound to several meshes holds one weight array per input slot;
/// this identifies the slot resolved for a specific mesh.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WeightMapId(pub u32);

/// Monotonic allocator for NodeId.
/// Dense indices improve cache locality; IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_node: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node = self.next_node.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_node(), NodeId(0));
        assert_eq!(alloc.alloc_node(), NodeId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_node(), NodeId(0));
    }
}
