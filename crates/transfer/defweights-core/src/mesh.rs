//! Mesh geometry: an ordered, fixed-size set of point positions plus
//! triangles. Point index order is the alignment key for every weight map.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub points: Vec<[f32; 3]>,
    #[serde(default)]
    pub triangles: Vec<[u32; 3]>,
}

impl MeshData {
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec3 {
        Vec3::from_array(self.points[index])
    }

    /// Basic validation: non-empty point set, triangle indices in range.
    pub fn validate(&self) -> Result<(), String> {
        if self.points.is_empty() {
            return Err("mesh has no points".to_string());
        }
        let n = self.points.len() as u32;
        for (i, tri) in self.triangles.iter().enumerate() {
            if tri.iter().any(|&v| v >= n) {
                return Err(format!("triangle {i} references a point out of range"));
            }
        }
        Ok(())
    }

    /// Area-weighted vertex normals. Vertices touched by no triangle (or only
    /// degenerate ones) get +Y.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.points.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|v| v as usize);
            let n = (self.point(b) - self.point(a)).cross(self.point(c) - self.point(a));
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }
        normals
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
            .collect()
    }

    /// The same mesh displaced by a constant offset.
    pub fn translated(&self, offset: [f32; 3]) -> MeshData {
        let off = Vec3::from_array(offset);
        MeshData {
            points: self
                .points
                .iter()
                .map(|p| (Vec3::from_array(*p) + off).to_array())
                .collect(),
            triangles: self.triangles.clone(),
        }
    }

    /// Regular grid in the XZ plane: `nx * nz` points, `spacing` apart,
    /// triangulated with +Y-facing winding. Handy for tests and demos.
    pub fn grid(nx: usize, nz: usize, spacing: f32) -> MeshData {
        let mut points = Vec::with_capacity(nx * nz);
        for iz in 0..nz {
            for ix in 0..nx {
                points.push([ix as f32 * spacing, 0.0, iz as f32 * spacing]);
            }
        }
        let mut triangles = Vec::with_capacity(2 * nx.saturating_sub(1) * nz.saturating_sub(1));
        for iz in 0..nz.saturating_sub(1) {
            for ix in 0..nx.saturating_sub(1) {
                let i0 = (iz * nx + ix) as u32;
                let i1 = i0 + 1;
                let i2 = i0 + nx as u32;
                let i3 = i2 + 1;
                triangles.push([i0, i2, i1]);
                triangles.push([i1, i2, i3]);
            }
        }
        MeshData { points, triangles }
    }
}
