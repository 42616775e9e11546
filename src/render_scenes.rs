#![deny(clippy::all)]

use anyhow::{Context, Result};
use log::info;
use pathtrace::Scene;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scenes = [
        "scenes/simple.json",
        "scenes/complex.json",
        "scenes/materials.json",
    ];
    let output_dir = Path::new("renders");
    let iterations = 3;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("unable to create {}", output_dir.display()))?;

    for scene in &scenes {
        let scene_path = Path::new(scene);
        let scene_name = scene_path
            .file_stem()
            .with_context(|| format!("invalid scene path {}", scene_path.display()))?;

        let mut output_filename = PathBuf::from(output_dir);
        output_filename.push(scene_name);
        output_filename.set_extension("ppm");

        let scene = Scene::from_path(scene_path)
            .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
        let mut scene = scene.build_raytracing_scene();
        // Snapshots would only overwrite each other across iterations
        scene.render_options.snapshot_dir = None;

        let mut duration_sum = Duration::new(0, 0);
        let mut sample_sum = 0;

        println!("Path tracing {}...", scene_path.display());
        for i in 0..iterations {
            let result = scene.render(false)?;
            duration_sum += result.duration;
            sample_sum += result.samples;

            println!(
                "│ Iteration {}: rendered in {:.3?} ({} samples)",
                i + 1,
                result.duration,
                result.samples
            );

            if i == iterations - 1 {
                println!(
                    "│ Avg time: {:.3?} (avg {} samples)",
                    duration_sum / iterations,
                    sample_sum / u64::from(iterations)
                );
                result
                    .accumulator
                    .save(&output_filename)
                    .context("unable to write image")?;
                println!("└ Wrote rendered image to {}", output_filename.display());
            }
        }
        println!();
    }

    info!("rendered {} scenes", scenes.len());
    Ok(())
}
