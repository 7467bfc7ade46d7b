//! Parse StoredMesh-style JSON (see fixtures/meshes/*.json) into
//! [`MeshData`].
//!
//! Notes:
//! - Points are `[x, y, z]` triples in point index order; index order is the
//!   alignment key for every weight map.
//! - Triangles are optional; a point cloud still carries weight maps, it
//!   just cannot serve closest-point or ray-cast association.

use serde::Deserialize;

use crate::mesh::MeshData;

pub fn parse_stored_mesh_json(s: &str) -> Result<MeshData, String> {
    let sm: StoredMesh = serde_json::from_str(s).map_err(|e| format!("parse error: {e}"))?;
    let data = MeshData {
        points: sm.points,
        triangles: sm.triangles,
    };
    data.validate()?;
    Ok(data)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredMesh {
    #[serde(default)]
    #[allow(dead_code)]
    name: String,
    points: Vec<[f32; 3]>,
    #[serde(default)]
    triangles: Vec<[u32; 3]>,
}
