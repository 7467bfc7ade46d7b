use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use defweights_core::{
    transfer_deformer_weights, DeformerKind, MemoryScene, MeshData, NullProgress, SceneGraph,
    SurfaceAssociation, TransferConfig, TransferRequest, WeightResolution,
};

fn build_scene(association: SurfaceAssociation) -> (MemoryScene, TransferRequest) {
    let mut scene = MemoryScene::new();
    let fine = MeshData::grid(30, 30, 1.0);
    let source_mesh = scene.add_mesh("body", fine.clone());
    let target_mesh = scene.add_mesh("jacket", MeshData::grid(20, 20, 1.5));
    let source = scene
        .add_deformer("bodyCluster", DeformerKind::Cluster, &[source_mesh])
        .unwrap();
    let target = scene
        .add_deformer("jacketWire", DeformerKind::Wire, &[target_mesh])
        .unwrap();

    let weights: Vec<f32> = fine.points.iter().map(|p| p[0] / 29.0).collect();
    let map = scene
        .resolve_weight_map(source, source_mesh, WeightResolution::ConnectionTraced)
        .unwrap()
        .unwrap();
    scene.write_weight_map(source, map, &weights).unwrap();

    let request = TransferRequest {
        source_mesh: Some(source_mesh),
        target_mesh: Some(target_mesh),
        source_deformer: Some(source),
        target_deformer: Some(target),
        association,
    };
    (scene, request)
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    for association in [
        SurfaceAssociation::ClosestPoint,
        SurfaceAssociation::RayCast,
        SurfaceAssociation::ClosestComponent,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{association:?}")),
            &association,
            |b, &association| {
                b.iter_batched(
                    || build_scene(association),
                    |(mut scene, request)| {
                        transfer_deformer_weights(
                            &mut scene,
                            &request,
                            &TransferConfig::default(),
                            &mut NullProgress,
                        )
                        .unwrap();
                        scene
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_transfer);
criterion_main!(benches);
