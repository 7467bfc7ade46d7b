//! The weight transfer procedure.
//!
//! Route: resolve both weight maps, duplicate both meshes, bind the
//! duplicates to the same two placeholder joints, encode the source map as a
//! two-influence skin ratio, run the mesh-to-mesh skin-weight transfer,
//! read influence 0 back from the target binding, and write it into the
//! target deformer's map. Every temporary node is released on every exit
//! path and the caller's selection is restored.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::TransferConfig;
use crate::error::TransferError;
use crate::ids::{NodeId, WeightMapId};
use crate::progress::{ProgressObserver, TransferPhase};
use crate::scene::{SceneGraph, SurfaceAssociation};

/// Caller-supplied handles. `Option` mirrors a UI caller whose lists may be
/// empty; `target_mesh` defaults to `source_mesh`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransferRequest {
    pub source_mesh: Option<NodeId>,
    pub target_mesh: Option<NodeId>,
    pub source_deformer: Option<NodeId>,
    pub target_deformer: Option<NodeId>,
    #[serde(default)]
    pub association: SurfaceAssociation,
}

struct ResolvedRequest {
    source_mesh: NodeId,
    target_mesh: NodeId,
    source_deformer: NodeId,
    target_deformer: NodeId,
    association: SurfaceAssociation,
}

fn resolve_request(request: &TransferRequest) -> Result<ResolvedRequest, TransferError> {
    let source_mesh = request
        .source_mesh
        .ok_or(TransferError::InvalidArgument("source mesh"))?;
    let source_deformer = request
        .source_deformer
        .ok_or(TransferError::InvalidArgument("source deformer"))?;
    let target_deformer = request
        .target_deformer
        .ok_or(TransferError::InvalidArgument("target deformer"))?;
    Ok(ResolvedRequest {
        source_mesh,
        target_mesh: request.target_mesh.unwrap_or(source_mesh),
        source_deformer,
        target_deformer,
        association: request.association,
    })
}

/// Temporary-node ledger. Everything tracked here is deleted before the
/// procedure returns, success or not.
#[derive(Default)]
struct TempNodes {
    nodes: Vec<NodeId>,
}

impl TempNodes {
    fn track(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    fn release(&mut self, scene: &mut dyn SceneGraph) {
        // Meshes were tracked first; deleting them takes their skin bindings
        // along, then the joints go.
        for node in self.nodes.drain(..) {
            if !scene.node_exists(node) {
                continue;
            }
            if let Err(e) = scene.delete(node) {
                warn!("failed to delete temporary node {node:?}: {e}");
            }
        }
    }
}

fn resolve_map_or_warn(
    scene: &dyn SceneGraph,
    deformer: NodeId,
    mesh: NodeId,
    config: &TransferConfig,
) -> Result<WeightMapId, TransferError> {
    match scene.resolve_weight_map(deformer, mesh, config.resolution)? {
        Some(map) => Ok(map),
        None => {
            let err = TransferError::NoWeightMapForMesh {
                deformer: scene.node_name(deformer)?,
                mesh: scene.node_name(mesh)?,
            };
            warn!("{err}");
            Err(err)
        }
    }
}

/// Copy the weight map of `source_deformer` (for `source_mesh`) onto
/// `target_deformer` (for `target_mesh`), resampling across the geometric
/// correspondence selected by the request's surface association.
///
/// Guarantees:
/// - the only durable mutation is the target weight-map write (plus
///   initializing an uninitialized target map to all-ones, which the
///   reference behavior performs before transferring);
/// - no temporary duplicate, joint, or skin binding survives the call;
/// - the caller's selection is restored on success and on failure.
pub fn transfer_deformer_weights(
    scene: &mut dyn SceneGraph,
    request: &TransferRequest,
    config: &TransferConfig,
    progress: &mut dyn ProgressObserver,
) -> Result<(), TransferError> {
    progress.begin(TransferPhase::ALL.len());

    let req = match resolve_request(request) {
        Ok(r) => r,
        Err(e) => {
            progress.finish("finished with errors");
            return Err(e);
        }
    };
    progress.advance(TransferPhase::ArgumentResolution);

    let outcome = transfer_resolved(scene, &req, config, progress);
    match &outcome {
        Ok(()) => progress.finish("finished successfully"),
        Err(_) => progress.finish("finished with errors"),
    }
    outcome
}

fn transfer_resolved(
    scene: &mut dyn SceneGraph,
    req: &ResolvedRequest,
    config: &TransferConfig,
    progress: &mut dyn ProgressObserver,
) -> Result<(), TransferError> {
    // Locate both maps before mutating anything: either side missing is the
    // recoverable, no-mutation failure.
    let source_map = resolve_map_or_warn(&*scene, req.source_deformer, req.source_mesh, config)?;
    let target_map = resolve_map_or_warn(&*scene, req.target_deformer, req.target_mesh, config)?;
    progress.advance(TransferPhase::MapResolution);

    // Uninitialized maps read as full influence.
    let source_weights = match scene.weight_map(req.source_deformer, source_map)? {
        Some(w) => w,
        None => vec![1.0; scene.point_count(req.source_mesh)?],
    };
    if scene.weight_map(req.target_deformer, target_map)?.is_none() {
        let ones = vec![1.0; scene.point_count(req.target_mesh)?];
        scene.write_weight_map(req.target_deformer, target_map, &ones)?;
    }

    let previous_selection = scene.selection();
    let mut temps = TempNodes::default();
    let result = resample_through_skins(
        scene,
        req,
        config,
        &source_weights,
        target_map,
        progress,
        &mut temps,
    );
    temps.release(scene);
    scene.set_selection(&previous_selection);
    progress.advance(TransferPhase::Cleanup);
    result
}

#[allow(clippy::too_many_arguments)]
fn resample_through_skins(
    scene: &mut dyn SceneGraph,
    req: &ResolvedRequest,
    config: &TransferConfig,
    source_weights: &[f32],
    target_map: WeightMapId,
    progress: &mut dyn ProgressObserver,
    temps: &mut TempNodes,
) -> Result<(), TransferError> {
    let source_name = scene.node_name(req.source_mesh)?;
    let target_name = scene.node_name(req.target_mesh)?;

    let dup_source = scene.duplicate(req.source_mesh)?;
    temps.track(dup_source);
    scene.rename(dup_source, &format!("{source_name}{}", config.temp_suffix))?;
    scene.set_visible(dup_source, true)?;

    let dup_target = scene.duplicate(req.target_mesh)?;
    temps.track(dup_target);
    scene.rename(dup_target, &format!("{target_name}{}", config.temp_suffix))?;
    scene.set_visible(dup_target, true)?;
    progress.advance(TransferPhase::Duplication);

    // Two placeholder influences; any two distinct positions work.
    let joint_a = scene.create_joint(&format!("jnt{}_a", config.temp_suffix), [0.0, 0.0, 0.0]);
    temps.track(joint_a);
    let joint_b = scene.create_joint(&format!("jnt{}_b", config.temp_suffix), [0.0, 1.0, 0.0]);
    temps.track(joint_b);

    let influences = [joint_a, joint_b];
    let skin_source = scene.bind_skin(&influences, dup_source)?;
    let skin_target = scene.bind_skin(&influences, dup_target)?;
    progress.advance(TransferPhase::BindingCreation);

    // Re-encode the scalar map as a two-influence ratio: w on influence 0,
    // 1 - w on influence 1. Normalization is off only while the binding is
    // reset onto influence 0.
    scene.set_skin_normalization(skin_source, false)?;
    scene.reset_skin_to_influence(skin_source, 0)?;
    scene.set_skin_normalization(skin_source, true)?;

    let n_points = scene.point_count(req.source_mesh)?;
    for point in 0..n_points {
        // A map shorter than the point set reads as full influence past its end.
        let w = source_weights
            .get(point)
            .copied()
            .unwrap_or(1.0)
            .clamp(0.0, 1.0);
        scene.set_skin_weight(skin_source, point, 0, w)?;
        scene.set_skin_weight(skin_source, point, 1, 1.0 - w)?;
    }
    progress.advance(TransferPhase::WeightEncoding);

    scene.copy_skin_weights(skin_source, skin_target, req.association)?;
    progress.advance(TransferPhase::Transfer);

    let resampled: Vec<f32> = scene
        .skin_influence_weights(skin_target, 0)?
        .into_iter()
        .map(|w| w.clamp(0.0, 1.0))
        .collect();
    progress.advance(TransferPhase::Readback);

    scene.write_weight_map(req.target_deformer, target_map, &resampled)?;
    debug!(
        "transferred {} weights from {source_name} to {target_name} ({:?})",
        resampled.len(),
        req.association
    );
    Ok(())
}
