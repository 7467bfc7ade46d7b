//! Deformer data model: recognized node kinds and per-mesh weight-map slots.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// Deformer node kinds the tool recognizes when enumerating a mesh's
/// construction history. Serialized spelling matches the host type names
/// (`ffd`, `wire`, `cluster`, `softMod`, `deltaMush`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeformerKind {
    Ffd,
    Wire,
    Cluster,
    SoftMod,
    DeltaMush,
}

impl DeformerKind {
    pub const ALL: [DeformerKind; 5] = [
        DeformerKind::Ffd,
        DeformerKind::Wire,
        DeformerKind::Cluster,
        DeformerKind::SoftMod,
        DeformerKind::DeltaMush,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            DeformerKind::Ffd => "ffd",
            DeformerKind::Wire => "wire",
            DeformerKind::Cluster => "cluster",
            DeformerKind::SoftMod => "softMod",
            DeformerKind::DeltaMush => "deltaMush",
        }
    }
}

impl std::fmt::Display for DeformerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Configurable recognized-type allow-list. Successive revisions of the
/// original tool carried diverging lists; this collapses them into one set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeformerTypeSet {
    kinds: HashSet<DeformerKind>,
}

impl DeformerTypeSet {
    /// All five recognized kinds.
    pub fn all() -> Self {
        Self {
            kinds: DeformerKind::ALL.into_iter().collect(),
        }
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = DeformerKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    #[inline]
    pub fn recognizes(&self, kind: DeformerKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn insert(&mut self, kind: DeformerKind) {
        self.kinds.insert(kind);
    }

    pub fn remove(&mut self, kind: DeformerKind) {
        self.kinds.remove(&kind);
    }
}

impl Default for DeformerTypeSet {
    fn default() -> Self {
        Self::all()
    }
}

/// One per-mesh input slot on a deformer. The slot index doubles as the
/// weight-map index; `weights == None` means uninitialized, which reads as
/// all-ones (full influence).
#[derive(Clone, Debug)]
pub struct DeformerInput {
    /// Upstream geometry connection: either the mesh itself or the previous
    /// deformer on the same stream. Weight-map resolution traces this chain
    /// back to a mesh and matches on mesh identity.
    pub upstream: NodeId,
    /// Which input slot of the upstream deformer continues this stream.
    /// Unused when `upstream` is a mesh.
    pub upstream_slot: u32,
    pub weights: Option<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serde_matches_host_spelling() {
        let s = serde_json::to_string(&DeformerKind::SoftMod).unwrap();
        assert_eq!(s, "\"softMod\"");
        let k: DeformerKind = serde_json::from_str("\"deltaMush\"").unwrap();
        assert_eq!(k, DeformerKind::DeltaMush);
    }

    #[test]
    fn type_set_filters() {
        let mut set = DeformerTypeSet::from_kinds([DeformerKind::Cluster]);
        assert!(set.recognizes(DeformerKind::Cluster));
        assert!(!set.recognizes(DeformerKind::Wire));
        set.insert(DeformerKind::Wire);
        assert!(set.recognizes(DeformerKind::Wire));
    }
}
