//! Error taxonomy for the scene layer and the transfer procedure.
//!
//! `SceneError` is everything a `SceneGraph` implementation can refuse;
//! `TransferError` is the procedure-level taxonomy surfaced to callers.
//! Domain errors are never silently swallowed and never retried.

use thiserror::Error;

use crate::ids::NodeId;

/// Failures from the scene-graph layer (the host boundary).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not a mesh")]
    NotAMesh(NodeId),
    #[error("node {0:?} is not a deformer")]
    NotADeformer(NodeId),
    #[error("node {0:?} is not a skin binding")]
    NotASkin(NodeId),
    #[error("mesh has no points")]
    EmptyMesh,
    #[error("point {point} out of range for {count}-point binding")]
    PointOutOfRange { point: usize, count: usize },
    #[error("expected {expected} weights, got {got}")]
    PointCountMismatch { expected: usize, got: usize },
    #[error("influence {influence} out of range for {count}-influence binding")]
    InfluenceOutOfRange { influence: usize, count: usize },
    #[error("weight map {map} out of range for {count}-input deformer")]
    WeightMapOutOfRange { map: u32, count: usize },
    #[error("skin binding needs at least one influence")]
    NoInfluences,
    // Field names avoid `source`, which thiserror reserves for error chaining.
    #[error("source binding has {from} influences, target has {to}")]
    InfluenceMismatch { from: usize, to: usize },
}

/// Failures from the transfer procedure itself.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Caller supplied insufficient handles; nothing was mutated.
    #[error("missing required argument: {0}")]
    InvalidArgument(&'static str),
    /// The deformer holds no weight map for the given mesh; recoverable,
    /// nothing was mutated and no temporaries were created.
    #[error("deformer {deformer} has no weight map for mesh {mesh}")]
    NoWeightMapForMesh { deformer: String, mesh: String },
    /// Any downstream host failure. Temporaries are cleaned up before this
    /// surfaces.
    #[error("host operation failed: {0}")]
    Host(#[from] SceneError),
}
