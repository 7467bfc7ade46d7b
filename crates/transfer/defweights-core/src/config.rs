//! Transfer configuration.

use serde::{Deserialize, Serialize};

use crate::deformer::DeformerTypeSet;
use crate::scene::WeightResolution;

/// Configuration for the transfer procedure.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Deformer kinds recognized during history enumeration.
    pub recognized: DeformerTypeSet,
    /// How per-mesh weight maps are located on a deformer.
    pub resolution: WeightResolution,
    /// Suffix appended to the names of the temporary duplicate meshes.
    pub temp_suffix: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            recognized: DeformerTypeSet::all(),
            resolution: WeightResolution::ConnectionTraced,
            temp_suffix: "_xfer_tmp".to_string(),
        }
    }
}
