//! defweights-core (host-agnostic)
//!
//! Copies a per-vertex scalar weight map from one deformer (wire, cluster,
//! FFD, softMod, deltaMush) attached to a mesh onto a deformer attached to a
//! possibly different mesh with a different topology. Because the two meshes
//! need not share topology, the map is resampled across a geometric
//! correspondence: both meshes are duplicated, bound to the same pair of
//! placeholder influences, the scalar map is encoded as a two-influence skin
//! ratio, and a mesh-to-mesh skin-weight transfer carries it across.
//!
//! The host scene graph sits behind the [`SceneGraph`] trait; [`MemoryScene`]
//! is a complete in-memory implementation with a real resampling solver, so
//! the whole procedure runs without any host application.

pub mod config;
pub mod deformer;
pub mod error;
pub mod ids;
pub mod memory;
pub mod mesh;
pub mod progress;
pub mod resample;
pub mod scene;
pub mod skin;
pub mod stored_mesh;
pub mod transfer;

// Re-exports for consumers (host adapters, tools)
pub use config::TransferConfig;
pub use deformer::{DeformerInput, DeformerKind, DeformerTypeSet};
pub use error::{SceneError, TransferError};
pub use ids::{IdAllocator, NodeId, WeightMapId};
pub use memory::MemoryScene;
pub use mesh::MeshData;
pub use progress::{NullProgress, ProgressObserver, TransferPhase};
pub use resample::resample_weights;
pub use scene::{SceneGraph, SurfaceAssociation, WeightResolution};
pub use skin::SkinBinding;
pub use stored_mesh::parse_stored_mesh_json;
pub use transfer::{transfer_deformer_weights, TransferRequest};
