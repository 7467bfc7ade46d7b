//! Optional progress observation for the transfer procedure.
//!
//! Purely cosmetic: observers must not affect control flow and are never
//! required for correctness. The phase list mirrors the reference tool's
//! eight progress-bar ticks.

use serde::{Deserialize, Serialize};

/// Discrete phases reported during one transfer invocation, in order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransferPhase {
    ArgumentResolution,
    MapResolution,
    Duplication,
    BindingCreation,
    WeightEncoding,
    Transfer,
    Readback,
    Cleanup,
}

impl TransferPhase {
    pub const ALL: [TransferPhase; 8] = [
        TransferPhase::ArgumentResolution,
        TransferPhase::MapResolution,
        TransferPhase::Duplication,
        TransferPhase::BindingCreation,
        TransferPhase::WeightEncoding,
        TransferPhase::Transfer,
        TransferPhase::Readback,
        TransferPhase::Cleanup,
    ];
}

/// Injected observer. All methods default to no-ops.
pub trait ProgressObserver {
    /// Called once before any work, with the total number of phases.
    fn begin(&mut self, _total_steps: usize) {}
    /// Called as each phase completes.
    fn advance(&mut self, _phase: TransferPhase) {}
    /// Called once after the invocation settles, success or not.
    fn finish(&mut self, _message: &str) {}
}

/// The default observer: ignores everything.
#[derive(Default, Debug)]
pub struct NullProgress;

impl ProgressObserver for NullProgress {}
