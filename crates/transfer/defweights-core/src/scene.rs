//! Scene-graph capability trait.
//!
//! The transfer procedure consumes exactly this surface; implementations can
//! be a real host adapter or the in-memory scene in [`crate::memory`].

use serde::{Deserialize, Serialize};

use crate::deformer::DeformerTypeSet;
use crate::error::SceneError;
use crate::ids::{NodeId, WeightMapId};

/// Correspondence rule for the mesh-to-mesh weight transfer. Serialized
/// spelling matches the host argument values.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceAssociation {
    /// Closest point on the source surface.
    #[default]
    ClosestPoint,
    /// Ray cast along the target vertex normal, closest point on a miss.
    RayCast,
    /// Closest matching topological component (nearest source vertex).
    ClosestComponent,
}

/// How a deformer's per-mesh weight map is located.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightResolution {
    /// Trace each input slot's geometry connection back to its mesh and match
    /// on identity. Correct for deformers bound to several meshes.
    #[default]
    ConnectionTraced,
    /// Always pick slot 0. Kept for parity with early revisions of the tool;
    /// wrong for multi-mesh deformers.
    FirstIndex,
}

/// Capability interface over the host scene graph.
///
/// Everything here is synchronous and blocking; the procedure claims
/// exclusive, transient ownership of the nodes it creates through this
/// interface and releases them before returning.
pub trait SceneGraph {
    /// Currently selected nodes, in selection order.
    fn selection(&self) -> Vec<NodeId>;
    fn set_selection(&mut self, nodes: &[NodeId]);

    fn node_exists(&self, node: NodeId) -> bool;
    fn node_name(&self, node: NodeId) -> Result<String, SceneError>;

    /// Deformers upstream in the mesh's construction history, restricted to
    /// the recognized-type allow-list, in history order.
    fn deformers_of(&self, mesh: NodeId, recognized: &DeformerTypeSet) -> Vec<NodeId>;

    /// Duplicate a mesh's geometry. The duplicate inherits neither deformer
    /// history nor weight maps.
    fn duplicate(&mut self, mesh: NodeId) -> Result<NodeId, SceneError>;
    /// Delete a node. Deleting a mesh also deletes skin bindings bound to it.
    fn delete(&mut self, node: NodeId) -> Result<(), SceneError>;
    fn rename(&mut self, node: NodeId, name: &str) -> Result<(), SceneError>;
    fn set_visible(&mut self, mesh: NodeId, visible: bool) -> Result<(), SceneError>;

    fn point_count(&self, mesh: NodeId) -> Result<usize, SceneError>;

    fn create_joint(&mut self, name: &str, position: [f32; 3]) -> NodeId;

    /// Bind a mesh to the given influences with a fresh skin binding: every
    /// point fully on influence 0, normalization enabled.
    fn bind_skin(&mut self, influences: &[NodeId], mesh: NodeId) -> Result<NodeId, SceneError>;
    fn set_skin_normalization(&mut self, skin: NodeId, enabled: bool) -> Result<(), SceneError>;
    fn reset_skin_to_influence(&mut self, skin: NodeId, influence: usize) -> Result<(), SceneError>;
    fn set_skin_weight(
        &mut self,
        skin: NodeId,
        point: usize,
        influence: usize,
        weight: f32,
    ) -> Result<(), SceneError>;
    fn skin_influence_weights(&self, skin: NodeId, influence: usize) -> Result<Vec<f32>, SceneError>;

    /// Mesh-to-mesh skin-weight transfer under the given correspondence
    /// rule, producing normalized per-point rows on the target binding.
    fn copy_skin_weights(
        &mut self,
        source_skin: NodeId,
        target_skin: NodeId,
        association: SurfaceAssociation,
    ) -> Result<(), SceneError>;

    /// Locate the weight-map slot on a deformer that corresponds to a mesh.
    /// `Ok(None)` when the deformer holds no map for that mesh.
    fn resolve_weight_map(
        &self,
        deformer: NodeId,
        mesh: NodeId,
        resolution: WeightResolution,
    ) -> Result<Option<WeightMapId>, SceneError>;
    /// `Ok(None)` when the slot exists but is uninitialized.
    fn weight_map(&self, deformer: NodeId, map: WeightMapId) -> Result<Option<Vec<f32>>, SceneError>;
    fn write_weight_map(
        &mut self,
        deformer: NodeId,
        map: WeightMapId,
        weights: &[f32],
    ) -> Result<(), SceneError>;
}
