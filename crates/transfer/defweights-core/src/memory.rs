//! In-memory `SceneGraph` implementation.
//!
//! Carries real geometry and runs the real resampling solver, so the whole
//! transfer procedure is executable without a host application. Also the
//! reference model for how a host adapter is expected to behave: duplicates
//! carry geometry only, deleting a mesh deletes its skin bindings, and
//! weight-map resolution traces geometry connections back to a mesh.

use hashbrown::HashMap;
use log::debug;

use crate::deformer::{DeformerInput, DeformerKind, DeformerTypeSet};
use crate::error::SceneError;
use crate::ids::{IdAllocator, NodeId, WeightMapId};
use crate::mesh::MeshData;
use crate::resample::resample_weights;
use crate::scene::{SceneGraph, SurfaceAssociation, WeightResolution};
use crate::skin::SkinBinding;

#[derive(Clone, Debug)]
struct MeshNode {
    name: String,
    visible: bool,
    data: MeshData,
}

#[derive(Clone, Debug)]
struct JointNode {
    name: String,
    position: [f32; 3],
}

#[derive(Clone, Debug)]
struct DeformerNode {
    name: String,
    kind: DeformerKind,
    inputs: Vec<DeformerInput>,
}

#[derive(Clone, Debug)]
struct SkinNode {
    name: String,
    binding: SkinBinding,
}

#[derive(Clone, Debug)]
enum Node {
    Mesh(MeshNode),
    Joint(JointNode),
    Deformer(DeformerNode),
    Skin(SkinNode),
}

/// In-memory scene: node storage, selection state, and a scene-building API
/// for callers and tests.
#[derive(Default)]
pub struct MemoryScene {
    ids: IdAllocator,
    nodes: HashMap<NodeId, Node>,
    /// Creation order; keeps history enumeration deterministic.
    order: Vec<NodeId>,
    selection: Vec<NodeId>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, name: &str, data: MeshData) -> NodeId {
        self.insert(Node::Mesh(MeshNode {
            name: name.to_string(),
            visible: true,
            data,
        }))
    }

    /// Create a deformer and attach it to `meshes`, one input slot per mesh.
    /// Each slot connects to the end of that mesh's current deformation
    /// chain, so later resolution has a real connection trail to walk.
    pub fn add_deformer(
        &mut self,
        name: &str,
        kind: DeformerKind,
        meshes: &[NodeId],
    ) -> Result<NodeId, SceneError> {
        let mut inputs = Vec::with_capacity(meshes.len());
        for &mesh in meshes {
            self.mesh(mesh)?;
            let (upstream, upstream_slot) = self.chain_end(mesh);
            inputs.push(DeformerInput {
                upstream,
                upstream_slot,
                weights: None,
            });
        }
        Ok(self.insert(Node::Deformer(DeformerNode {
            name: name.to_string(),
            kind,
            inputs,
        })))
    }

    /// Total number of live nodes; leak checks compare this across calls.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Live nodes whose name contains `needle`, in creation order.
    pub fn nodes_named_with(&self, needle: &str) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|n| node_name_of(n).contains(needle))
            })
            .collect()
    }

    pub fn mesh_data(&self, mesh: NodeId) -> Result<&MeshData, SceneError> {
        Ok(&self.mesh(mesh)?.data)
    }

    pub fn is_visible(&self, mesh: NodeId) -> Result<bool, SceneError> {
        Ok(self.mesh(mesh)?.visible)
    }

    pub fn joint_position(&self, joint: NodeId) -> Option<[f32; 3]> {
        match self.nodes.get(&joint)? {
            Node::Joint(j) => Some(j.position),
            _ => None,
        }
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = self.ids.alloc_node();
        self.nodes.insert(id, node);
        self.order.push(id);
        id
    }

    fn get(&self, node: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(&node).ok_or(SceneError::UnknownNode(node))
    }

    fn mesh(&self, node: NodeId) -> Result<&MeshNode, SceneError> {
        match self.get(node)? {
            Node::Mesh(m) => Ok(m),
            _ => Err(SceneError::NotAMesh(node)),
        }
    }

    fn mesh_mut(&mut self, node: NodeId) -> Result<&mut MeshNode, SceneError> {
        match self.nodes.get_mut(&node).ok_or(SceneError::UnknownNode(node))? {
            Node::Mesh(m) => Ok(m),
            _ => Err(SceneError::NotAMesh(node)),
        }
    }

    fn deformer(&self, node: NodeId) -> Result<&DeformerNode, SceneError> {
        match self.get(node)? {
            Node::Deformer(d) => Ok(d),
            _ => Err(SceneError::NotADeformer(node)),
        }
    }

    fn deformer_mut(&mut self, node: NodeId) -> Result<&mut DeformerNode, SceneError> {
        match self.nodes.get_mut(&node).ok_or(SceneError::UnknownNode(node))? {
            Node::Deformer(d) => Ok(d),
            _ => Err(SceneError::NotADeformer(node)),
        }
    }

    fn skin(&self, node: NodeId) -> Result<&SkinNode, SceneError> {
        match self.get(node)? {
            Node::Skin(s) => Ok(s),
            _ => Err(SceneError::NotASkin(node)),
        }
    }

    fn skin_mut(&mut self, node: NodeId) -> Result<&mut SkinNode, SceneError> {
        match self.nodes.get_mut(&node).ok_or(SceneError::UnknownNode(node))? {
            Node::Skin(s) => Ok(s),
            _ => Err(SceneError::NotASkin(node)),
        }
    }

    /// Last node on a mesh's deformation chain: the most recently created
    /// deformer driving it, or the mesh itself. Returns the node and the
    /// input slot continuing the stream.
    fn chain_end(&self, mesh: NodeId) -> (NodeId, u32) {
        for id in self.order.iter().rev() {
            if let Some(Node::Deformer(d)) = self.nodes.get(id) {
                for (slot, _) in d.inputs.iter().enumerate() {
                    if self.trace_to_mesh(*id, slot) == Some(mesh) {
                        return (*id, slot as u32);
                    }
                }
            }
        }
        (mesh, 0)
    }

    /// Walk an input stream upstream through intermediate deformers until a
    /// mesh is reached.
    fn trace_to_mesh(&self, node: NodeId, slot: usize) -> Option<NodeId> {
        let mut node = node;
        let mut slot = slot;
        loop {
            match self.nodes.get(&node)? {
                Node::Mesh(_) => return Some(node),
                Node::Deformer(d) => {
                    let input = d.inputs.get(slot)?;
                    node = input.upstream;
                    slot = input.upstream_slot as usize;
                }
                _ => return None,
            }
        }
    }

    fn weight_slot(&self, deformer: NodeId, map: WeightMapId) -> Result<&DeformerInput, SceneError> {
        let d = self.deformer(deformer)?;
        d.inputs
            .get(map.0 as usize)
            .ok_or(SceneError::WeightMapOutOfRange {
                map: map.0,
                count: d.inputs.len(),
            })
    }
}

fn node_name_of(node: &Node) -> &str {
    match node {
        Node::Mesh(m) => &m.name,
        Node::Joint(j) => &j.name,
        Node::Deformer(d) => &d.name,
        Node::Skin(s) => &s.name,
    }
}

impl SceneGraph for MemoryScene {
    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn set_selection(&mut self, nodes: &[NodeId]) {
        self.selection = nodes.to_vec();
    }

    fn node_exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn node_name(&self, node: NodeId) -> Result<String, SceneError> {
        Ok(node_name_of(self.get(node)?).to_string())
    }

    fn deformers_of(&self, mesh: NodeId, recognized: &DeformerTypeSet) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                let Some(Node::Deformer(d)) = self.nodes.get(&id) else {
                    return false;
                };
                recognized.recognizes(d.kind)
                    && (0..d.inputs.len()).any(|slot| self.trace_to_mesh(id, slot) == Some(mesh))
            })
            .collect()
    }

    fn duplicate(&mut self, mesh: NodeId) -> Result<NodeId, SceneError> {
        let m = self.mesh(mesh)?;
        let copy = MeshNode {
            name: format!("{}_copy", m.name),
            visible: m.visible,
            data: m.data.clone(),
        };
        debug!("duplicated mesh {:?} ({})", mesh, copy.name);
        Ok(self.insert(Node::Mesh(copy)))
    }

    fn delete(&mut self, node: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&node) {
            return Err(SceneError::UnknownNode(node));
        }
        // Skin bindings are owned by their mesh.
        if matches!(self.nodes.get(&node), Some(Node::Mesh(_))) {
            let owned: Vec<NodeId> = self
                .nodes
                .iter()
                .filter(|(_, n)| matches!(n, Node::Skin(s) if s.binding.mesh == node))
                .map(|(id, _)| *id)
                .collect();
            for skin in owned {
                self.nodes.remove(&skin);
                self.order.retain(|id| *id != skin);
            }
        }
        self.nodes.remove(&node);
        self.order.retain(|id| *id != node);
        self.selection.retain(|id| *id != node);
        Ok(())
    }

    fn rename(&mut self, node: NodeId, name: &str) -> Result<(), SceneError> {
        match self.nodes.get_mut(&node).ok_or(SceneError::UnknownNode(node))? {
            Node::Mesh(m) => m.name = name.to_string(),
            Node::Joint(j) => j.name = name.to_string(),
            Node::Deformer(d) => d.name = name.to_string(),
            Node::Skin(s) => s.name = name.to_string(),
        }
        Ok(())
    }

    fn set_visible(&mut self, mesh: NodeId, visible: bool) -> Result<(), SceneError> {
        self.mesh_mut(mesh)?.visible = visible;
        Ok(())
    }

    fn point_count(&self, mesh: NodeId) -> Result<usize, SceneError> {
        Ok(self.mesh(mesh)?.data.point_count())
    }

    fn create_joint(&mut self, name: &str, position: [f32; 3]) -> NodeId {
        self.insert(Node::Joint(JointNode {
            name: name.to_string(),
            position,
        }))
    }

    fn bind_skin(&mut self, influences: &[NodeId], mesh: NodeId) -> Result<NodeId, SceneError> {
        for &influence in influences {
            if !self.nodes.contains_key(&influence) {
                return Err(SceneError::UnknownNode(influence));
            }
        }
        let mesh_name = self.mesh(mesh)?.name.clone();
        let point_count = self.mesh(mesh)?.data.point_count();
        let binding = SkinBinding::bind(mesh, influences, point_count)?;
        Ok(self.insert(Node::Skin(SkinNode {
            name: format!("skin_{mesh_name}"),
            binding,
        })))
    }

    fn set_skin_normalization(&mut self, skin: NodeId, enabled: bool) -> Result<(), SceneError> {
        self.skin_mut(skin)?.binding.normalize = enabled;
        Ok(())
    }

    fn reset_skin_to_influence(&mut self, skin: NodeId, influence: usize) -> Result<(), SceneError> {
        self.skin_mut(skin)?.binding.reset_to_influence(influence)
    }

    fn set_skin_weight(
        &mut self,
        skin: NodeId,
        point: usize,
        influence: usize,
        weight: f32,
    ) -> Result<(), SceneError> {
        self.skin_mut(skin)?.binding.set_weight(point, influence, weight)
    }

    fn skin_influence_weights(&self, skin: NodeId, influence: usize) -> Result<Vec<f32>, SceneError> {
        self.skin(skin)?.binding.influence_weights(influence)
    }

    fn copy_skin_weights(
        &mut self,
        source_skin: NodeId,
        target_skin: NodeId,
        association: SurfaceAssociation,
    ) -> Result<(), SceneError> {
        let source = &self.skin(source_skin)?.binding;
        let target = &self.skin(target_skin)?.binding;
        if source.influence_count() != target.influence_count() {
            return Err(SceneError::InfluenceMismatch {
                from: source.influence_count(),
                to: target.influence_count(),
            });
        }
        let source_mesh = self.mesh(source.mesh)?.data.clone();
        let target_mesh = self.mesh(target.mesh)?.data.clone();
        let rows = resample_weights(&source_mesh, &source.weights, &target_mesh, association)?;

        let target = &mut self.skin_mut(target_skin)?.binding;
        target.weights = rows;
        if target.normalize {
            target.normalize_all();
        }
        debug!(
            "copied skin weights {:?} -> {:?} ({:?})",
            source_skin, target_skin, association
        );
        Ok(())
    }

    fn resolve_weight_map(
        &self,
        deformer: NodeId,
        mesh: NodeId,
        resolution: WeightResolution,
    ) -> Result<Option<WeightMapId>, SceneError> {
        let d = self.deformer(deformer)?;
        self.mesh(mesh)?;
        let slot = match resolution {
            WeightResolution::ConnectionTraced => (0..d.inputs.len())
                .find(|slot| self.trace_to_mesh(deformer, *slot) == Some(mesh)),
            WeightResolution::FirstIndex => (!d.inputs.is_empty()).then_some(0),
        };
        Ok(slot.map(|s| WeightMapId(s as u32)))
    }

    fn weight_map(&self, deformer: NodeId, map: WeightMapId) -> Result<Option<Vec<f32>>, SceneError> {
        Ok(self.weight_slot(deformer, map)?.weights.clone())
    }

    fn write_weight_map(
        &mut self,
        deformer: NodeId,
        map: WeightMapId,
        weights: &[f32],
    ) -> Result<(), SceneError> {
        let count = self.deformer(deformer)?.inputs.len();
        let input = self
            .deformer_mut(deformer)?
            .inputs
            .get_mut(map.0 as usize)
            .ok_or(SceneError::WeightMapOutOfRange { map: map.0, count })?;
        input.weights = Some(weights.to_vec());
        Ok(())
    }
}
