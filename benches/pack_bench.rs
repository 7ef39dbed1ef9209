//! Packing and light assignment benchmarks.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use light_volumes::options::BuilderOptions;
use light_volumes::pack::pack_volumes;
use light_volumes::scene::LightVolumeBuilder;
use light_volumes::{LightData, LightVolume, LightVolumeInfo, LightVolumeRange};

fn grid_volumes(volumes: usize, lights_per_volume: usize) -> Vec<LightVolume> {
    (0..volumes)
        .map(|v| {
            LightVolume::new(
                (0..lights_per_volume)
                    .map(|i| {
                        LightData::omni(
                            Vec3::new(v as f32, i as f32, 0.0),
                            4.0,
                            Vec3::ONE,
                        )
                    })
                    .collect(),
            )
        })
        .collect()
}

fn pack_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_volumes");
    let mut infos = vec![LightVolumeInfo::default(); 2048];
    let mut ranges = vec![LightVolumeRange::default(); 256];

    for (volumes, lights) in [(16, 4), (256, 8), (512, 16)] {
        let input = grid_volumes(volumes, lights);
        group.bench_function(format!("{volumes}x{lights}"), |b| {
            b.iter(|| {
                black_box(pack_volumes(
                    black_box(&input),
                    &mut infos,
                    &mut ranges,
                ))
            })
        });
    }
    group.finish();
}

fn builder_benchmark(c: &mut Criterion) {
    let mut builder = LightVolumeBuilder::new(BuilderOptions::default());
    for i in 0..128 {
        let t = i as f32;
        builder.add_light(LightData::omni(
            Vec3::new(t.sin() * 32.0, 2.0, t.cos() * 32.0),
            12.0,
            Vec3::ONE,
        ));
    }
    for i in 0..256 {
        let t = i as f32 * 0.37;
        let _ = builder.add_volume(Vec3::new(t.cos() * 30.0, 1.0, t.sin() * 30.0), 2.0);
    }

    c.bench_function("build_256_volumes_128_lights", |b| {
        b.iter(|| black_box(builder.build()))
    });
}

criterion_group!(benches, pack_benchmark, builder_benchmark);
criterion_main!(benches);
