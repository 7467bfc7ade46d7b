use defweights_core::resample::{barycentric, closest_point_on_triangle, ray_triangle};
use defweights_core::{resample_weights, MeshData, SceneError, SurfaceAssociation};
use glam::Vec3;

fn approx_v(a: Vec3, b: Vec3, eps: f32) {
    assert!((a - b).length() <= eps, "left={a:?} right={b:?} eps={eps}");
}

const A: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const B: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const C: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// it should project interior points onto the triangle plane
#[test]
fn closest_point_interior() {
    let p = Vec3::new(0.25, 0.25, 1.0);
    approx_v(closest_point_on_triangle(p, A, B, C), Vec3::new(0.25, 0.25, 0.0), 1e-6);
}

/// it should clamp to vertex and edge regions outside the triangle
#[test]
fn closest_point_regions() {
    approx_v(closest_point_on_triangle(Vec3::new(-1.0, -1.0, 0.0), A, B, C), A, 1e-6);
    approx_v(closest_point_on_triangle(Vec3::new(3.0, 0.5, 0.0), A, B, C), B, 1e-6);
    approx_v(
        closest_point_on_triangle(Vec3::new(0.5, -2.0, 0.0), A, B, C),
        Vec3::new(0.5, 0.0, 0.0),
        1e-6,
    );
    // Hypotenuse edge region.
    approx_v(
        closest_point_on_triangle(Vec3::new(1.0, 1.0, 0.0), A, B, C),
        Vec3::new(0.5, 0.5, 0.0),
        1e-6,
    );
}

/// it should produce exact barycentrics at corners and midpoints
#[test]
fn barycentric_corners_and_midpoint() {
    assert_eq!(barycentric(A, A, B, C), [1.0, 0.0, 0.0]);
    assert_eq!(barycentric(B, A, B, C), [0.0, 1.0, 0.0]);
    let mid = barycentric(Vec3::new(0.5, 0.5, 0.0), A, B, C);
    assert!((mid[1] - 0.5).abs() < 1e-6 && (mid[2] - 0.5).abs() < 1e-6);
}

/// it should fall back to equal weights on a degenerate triangle
#[test]
fn barycentric_degenerate() {
    let bary = barycentric(Vec3::ZERO, A, A, A);
    assert_eq!(bary, [1.0 / 3.0; 3]);
}

/// it should intersect along the ray and miss outside the triangle
#[test]
fn ray_triangle_hit_and_miss() {
    let t = ray_triangle(Vec3::new(0.2, 0.2, 2.0), Vec3::NEG_Z, A, B, C).unwrap();
    assert!((t - 2.0).abs() < 1e-6);
    // Behind the origin still reports the signed distance (two-sided query).
    let t = ray_triangle(Vec3::new(0.2, 0.2, -1.5), Vec3::NEG_Z, A, B, C).unwrap();
    assert!((t + 1.5).abs() < 1e-6);
    assert!(ray_triangle(Vec3::new(2.0, 2.0, 1.0), Vec3::NEG_Z, A, B, C).is_none());
}

fn two_influence_rows(weights: &[f32]) -> Vec<Vec<f32>> {
    weights.iter().map(|w| vec![*w, 1.0 - *w]).collect()
}

/// it should carry weights across parallel planes under closest-point association
#[test]
fn closest_point_across_parallel_planes() {
    let source = MeshData::grid(5, 5, 1.0);
    let target = source.translated([0.0, 0.5, 0.0]);
    let weights: Vec<f32> = source.points.iter().map(|p| p[0] / 4.0).collect();

    let rows = resample_weights(
        &source,
        &two_influence_rows(&weights),
        &target,
        SurfaceAssociation::ClosestPoint,
    )
    .unwrap();

    assert_eq!(rows.len(), target.point_count());
    for (row, want) in rows.iter().zip(&weights) {
        assert!((row[0] - want).abs() < 1e-4);
        assert!((row[0] + row[1] - 1.0).abs() < 1e-5);
    }
}

/// it should hit the source plane when ray casting along target normals
#[test]
fn raycast_hits_plane_below() {
    let source = MeshData::grid(5, 5, 1.0);
    let target = source.translated([0.0, 2.0, 0.0]);
    let weights: Vec<f32> = source.points.iter().map(|p| p[2] / 4.0).collect();

    let rows = resample_weights(
        &source,
        &two_influence_rows(&weights),
        &target,
        SurfaceAssociation::RayCast,
    )
    .unwrap();

    for (row, want) in rows.iter().zip(&weights) {
        assert!((row[0] - want).abs() < 1e-4);
    }
}

/// it should fall back to closest point when the ray misses entirely
#[test]
fn raycast_falls_back_on_miss() {
    let source = MeshData::grid(3, 3, 1.0);
    // Far off to the side; +Y rays never meet the source plane's footprint.
    let target = MeshData {
        points: vec![[10.0, 0.0, 1.0]],
        triangles: vec![],
    };
    let rows = resample_weights(
        &source,
        &two_influence_rows(&[0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0]),
        &target,
        SurfaceAssociation::RayCast,
    )
    .unwrap();
    // Closest surface point is on the x = 2 edge, z = 1 row.
    assert!((rows[0][0] - 0.5).abs() < 1e-4);
}

/// it should copy the nearest vertex row verbatim under closest-component association
#[test]
fn closest_component_copies_nearest_vertex() {
    let source = MeshData::grid(2, 2, 1.0);
    let target = MeshData {
        points: vec![[0.9, 0.3, 0.1]],
        triangles: vec![],
    };
    let rows = resample_weights(
        &source,
        &two_influence_rows(&[0.1, 0.7, 0.3, 0.9]),
        &target,
        SurfaceAssociation::ClosestComponent,
    )
    .unwrap();
    assert_eq!(rows[0], vec![0.7, 0.3]);
}

/// it should normalize every resampled row
#[test]
fn rows_are_normalized() {
    let source = MeshData::grid(2, 2, 1.0);
    let rows_in: Vec<Vec<f32>> = vec![vec![0.2, 0.2]; 4];
    let rows = resample_weights(
        &source,
        &rows_in,
        &MeshData::grid(3, 3, 0.5),
        SurfaceAssociation::ClosestPoint,
    )
    .unwrap();
    for row in rows {
        let sum: f32 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }
}

/// it should refuse an empty source mesh and mismatched row counts
#[test]
fn resample_input_validation() {
    let target = MeshData::grid(2, 2, 1.0);
    assert_eq!(
        resample_weights(&MeshData::default(), &[], &target, SurfaceAssociation::ClosestPoint)
            .unwrap_err(),
        SceneError::EmptyMesh
    );
    let source = MeshData::grid(2, 2, 1.0);
    assert!(matches!(
        resample_weights(
            &source,
            &vec![vec![1.0, 0.0]; 3],
            &target,
            SurfaceAssociation::ClosestPoint
        )
        .unwrap_err(),
        SceneError::PointCountMismatch { expected: 4, got: 3 }
    ));
}
