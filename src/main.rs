#![deny(clippy::all)]

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use log::info;
use pathtrace::{RenderOptions, Scene};
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn parse_value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse()
                .with_context(|| format!("invalid value for --{}: {}", name, value))
        })
        .transpose()
}

fn apply_overrides(options: &mut RenderOptions, matches: &ArgMatches) -> Result<()> {
    if let Some(width) = parse_value(matches, "width")? {
        options.width = width;
    }
    if let Some(height) = parse_value(matches, "height")? {
        options.height = height;
    }
    if let Some(max_samples) = parse_value(matches, "samples")? {
        options.max_samples = max_samples;
    }
    if let Some(min_samples) = parse_value(matches, "min-samples")? {
        options.min_samples = min_samples;
    }
    if let Some(max_variance) = parse_value(matches, "max-variance")? {
        options.max_variance = max_variance;
    }
    if let Some(seed) = parse_value(matches, "seed")? {
        options.seed = seed;
    }
    if let Some(interval) = parse_value(matches, "snapshot-interval")? {
        options.snapshot_interval = interval;
    }
    if let Some(snapshot_dir) = matches.value_of("snapshot-dir") {
        options.snapshot_dir = Some(PathBuf::from(snapshot_dir));
    }
    if matches.is_present("adaptive") {
        options.adaptive = true;
    }
    if matches.is_present("no-emitter-sampling") {
        options.emitter_sampling = false;
    }

    options.validate()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("path tracer")
        .about("A Monte Carlo path tracer written in Rust")
        .arg(
            Arg::with_name("scene")
                .index(1)
                .required(true)
                .takes_value(true)
                .help("input scene as a json file"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .default_value("render.ppm")
                .help(
                    "Output rendered image to file\n\
                     .ppm files are written as ASCII pixmaps",
                ),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .help("Image width in pixels"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .help("Image height in pixels"),
        )
        .arg(
            Arg::with_name("samples")
                .long("samples")
                .takes_value(true)
                .help("Maximum samples per pixel"),
        )
        .arg(
            Arg::with_name("min-samples")
                .long("min-samples")
                .takes_value(true)
                .help("Samples every pixel takes before adaptive sampling may skip it"),
        )
        .arg(
            Arg::with_name("max-variance")
                .long("max-variance")
                .takes_value(true)
                .help("Variance below which a pixel is considered converged"),
        )
        .arg(
            Arg::with_name("adaptive")
                .long("adaptive")
                .help("Stop sampling pixels once they converge"),
        )
        .arg(
            Arg::with_name("no-emitter-sampling")
                .long("no-emitter-sampling")
                .help("Disable direct light sampling at diffuse surfaces"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for the random number generators"),
        )
        .arg(
            Arg::with_name("snapshot-dir")
                .long("snapshot-dir")
                .takes_value(true)
                .help("Directory for intermediate snapshots"),
        )
        .arg(
            Arg::with_name("snapshot-interval")
                .long("snapshot-interval")
                .takes_value(true)
                .help("Passes between snapshots, 0 to disable"),
        )
        .arg(
            Arg::with_name("density")
                .long("density")
                .takes_value(true)
                .help("Output a grayscale map of samples taken per pixel"),
        )
        .arg(
            Arg::with_name("noprogress")
                .long("no-progress")
                .help("Hide progress bar"),
        )
        .get_matches();

    let scene_path = Path::new(matches.value_of("scene").context("missing scene path")?);
    let output_path = Path::new(matches.value_of("output").unwrap_or("render.ppm"));
    let use_progress = !matches.is_present("noprogress");

    let mut scene = Scene::from_path(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
    apply_overrides(&mut scene.render_options, &matches)?;

    let scene = scene.build_raytracing_scene();
    let result = scene.render(use_progress)?;
    info!(
        "Rendered {} samples over {} passes in {:.3?}",
        result.samples, result.passes, result.duration
    );

    result
        .accumulator
        .save(output_path)
        .context("unable to write image")?;
    info!("Output written to {}", output_path.display());

    if let Some(density_path) = matches.value_of("density") {
        let density_path = Path::new(density_path);
        result
            .accumulator
            .save_density(density_path, scene.render_options.max_samples)
            .context("unable to write sample density map")?;
        info!("Sample density written to {}", density_path.display());
    }

    Ok(())
}
