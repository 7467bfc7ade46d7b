//! Geometric resampling of per-point skin-weight rows between meshes.
//!
//! For each target point a correspondence on the source surface is found
//! under the requested association rule, the source rows at the enclosing
//! triangle's corners are blended barycentrically, and the blended row is
//! renormalized. Triangle scans are brute force; the meshes this tool sees
//! are edit-session scale.

use glam::Vec3;

use crate::error::SceneError;
use crate::mesh::MeshData;
use crate::scene::SurfaceAssociation;

/// Closest point on triangle `(a, b, c)` to `p` (Ericson's region test).
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Barycentric coordinates of `p` in triangle `(a, b, c)`, clamped to [0,1].
/// Degenerate triangles fall back to equal weights.
pub fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> [f32; 3] {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-12 {
        return [1.0 / 3.0; 3];
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;
    [u.clamp(0.0, 1.0), v.clamp(0.0, 1.0), w.clamp(0.0, 1.0)]
}

/// Möller–Trumbore, two-sided. Returns the signed distance along `dir` to
/// the intersection, or `None` on a miss or a degenerate triangle.
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let ab = b - a;
    let ac = c - a;
    let pvec = dir.cross(ac);
    let det = ab.dot(pvec);
    if det.abs() < 1e-10 {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(-1e-5..=1.0 + 1e-5).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(ab);
    let v = dir.dot(qvec) * inv_det;
    if v < -1e-5 || u + v > 1.0 + 1e-5 {
        return None;
    }
    Some(ac.dot(qvec) * inv_det)
}

fn nearest_vertex(mesh: &MeshData, p: Vec3) -> usize {
    let mut best = 0;
    let mut best_d = f32::MAX;
    for (i, q) in mesh.points.iter().enumerate() {
        let d = (Vec3::from_array(*q) - p).length_squared();
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// Closest surface point over all triangles: `(triangle index, point)`.
fn closest_surface_point(mesh: &MeshData, p: Vec3) -> Option<(usize, Vec3)> {
    let mut best: Option<(usize, Vec3)> = None;
    let mut best_d = f32::MAX;
    for (ti, tri) in mesh.triangles.iter().enumerate() {
        let [a, b, c] = tri.map(|v| mesh.point(v as usize));
        let q = closest_point_on_triangle(p, a, b, c);
        let d = (q - p).length_squared();
        if d < best_d {
            best_d = d;
            best = Some((ti, q));
        }
    }
    best
}

/// Nearest ray hit over all triangles, searched along `dir` and `-dir`.
fn raycast_surface_point(mesh: &MeshData, origin: Vec3, dir: Vec3) -> Option<(usize, Vec3)> {
    let mut best: Option<(usize, f32)> = None;
    for (ti, tri) in mesh.triangles.iter().enumerate() {
        let [a, b, c] = tri.map(|v| mesh.point(v as usize));
        if let Some(t) = ray_triangle(origin, dir, a, b, c) {
            if best.map_or(true, |(_, bt)| t.abs() < bt.abs()) {
                best = Some((ti, t));
            }
        }
    }
    best.map(|(ti, t)| (ti, origin + dir * t))
}

fn blend_row(mesh: &MeshData, rows: &[Vec<f32>], tri: usize, at: Vec3) -> Vec<f32> {
    let [i0, i1, i2] = mesh.triangles[tri].map(|v| v as usize);
    let bary = barycentric(at, mesh.point(i0), mesh.point(i1), mesh.point(i2));
    let width = rows[i0].len();
    let mut out = vec![0.0; width];
    for (corner, w) in [i0, i1, i2].into_iter().zip(bary) {
        for (o, s) in out.iter_mut().zip(&rows[corner]) {
            *o += s * w;
        }
    }
    out
}

fn normalize_row(row: &mut [f32]) {
    let sum: f32 = row.iter().sum();
    if sum > f32::EPSILON {
        for w in row.iter_mut() {
            *w /= sum;
        }
    }
}

/// Resample per-point rows from `source` onto `target`'s point order.
///
/// `source_rows` must hold one row per source point, all of equal width;
/// every output row is normalized.
pub fn resample_weights(
    source: &MeshData,
    source_rows: &[Vec<f32>],
    target: &MeshData,
    association: SurfaceAssociation,
) -> Result<Vec<Vec<f32>>, SceneError> {
    if source.points.is_empty() {
        return Err(SceneError::EmptyMesh);
    }
    if source_rows.len() != source.point_count() {
        return Err(SceneError::PointCountMismatch {
            expected: source.point_count(),
            got: source_rows.len(),
        });
    }

    let target_normals = match association {
        SurfaceAssociation::RayCast => target.vertex_normals(),
        _ => Vec::new(),
    };

    let mut out = Vec::with_capacity(target.point_count());
    for (pi, p) in target.points.iter().enumerate() {
        let p = Vec3::from_array(*p);
        let mut row = match association {
            SurfaceAssociation::ClosestComponent => source_rows[nearest_vertex(source, p)].clone(),
            SurfaceAssociation::ClosestPoint => match closest_surface_point(source, p) {
                Some((tri, at)) => blend_row(source, source_rows, tri, at),
                None => source_rows[nearest_vertex(source, p)].clone(),
            },
            SurfaceAssociation::RayCast => {
                let hit = raycast_surface_point(source, p, target_normals[pi])
                    .or_else(|| closest_surface_point(source, p));
                match hit {
                    Some((tri, at)) => blend_row(source, source_rows, tri, at),
                    None => source_rows[nearest_vertex(source, p)].clone(),
                }
            }
        };
        normalize_row(&mut row);
        out.push(row);
    }
    Ok(out)
}
