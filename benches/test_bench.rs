use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use indicatif::ProgressBar;
use nalgebra::{Point3, Vector3};
use pathtrace::{Accumulator, Camera, Material, RenderOptions, Scene, Shape};
use std::path::Path;

static SIZES: [u32; 2] = [16, 32];

pub fn single_sphere_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Single sphere");
    for &size in &SIZES {
        let mut scene = Scene::new(
            RenderOptions {
                width: size,
                height: size,
                ..RenderOptions::default()
            },
            Camera {
                position: Point3::new(0.0, 0.0, 10.0),
                direction: -Vector3::z(),
                ..Camera::default()
            },
        );
        scene.add_object(Shape::sphere(Point3::origin(), 2.0, Material::default()));
        scene.add_object(Shape::sphere(
            Point3::new(2.0, 3.0, 2.0),
            0.5,
            Material::light(Vector3::repeat(20.0)),
        ));
        let scene = scene.build_raytracing_scene();

        group.bench_with_input(BenchmarkId::new("Pass", size), &size, |b, &size| {
            let mut accumulator = Accumulator::new(size, size);
            let mut pass = 0;
            b.iter(|| {
                pass += 1;
                scene.render_pass(&mut accumulator, pass, &ProgressBar::hidden())
            })
        });
    }
    group.finish();
}

fn scene_file_benchmark(c: &mut Criterion, name: &str, scene_path: &str) {
    let mut scene = Scene::from_path(Path::new(scene_path)).expect("failed to load scene");
    scene.render_options.width = 32;
    scene.render_options.height = 32;
    let scene = scene.build_raytracing_scene();

    let mut group = c.benchmark_group(name);
    group.sample_size(20);
    group.bench_function("Pass", |b| {
        let mut accumulator = Accumulator::new(32, 32);
        let mut pass = 0;
        b.iter(|| {
            pass += 1;
            scene.render_pass(&mut accumulator, pass, &ProgressBar::hidden())
        })
    });
    group.finish();
}

pub fn simple_scene_benchmark(c: &mut Criterion) {
    scene_file_benchmark(c, "Simple scene", "scenes/simple.json");
}

pub fn materials_scene_benchmark(c: &mut Criterion) {
    scene_file_benchmark(c, "Materials scene", "scenes/materials.json");
}

criterion_group!(
    benches,
    single_sphere_benchmark,
    simple_scene_benchmark,
    materials_scene_benchmark
);
criterion_main!(benches);
