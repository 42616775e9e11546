use super::{Accumulator, Camera, RaytracingCamera, RenderOptions, Tracer};
use crate::error::Error;
use crate::primitives::Shape;
use crate::utils;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fs;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RenderResult {
    pub accumulator: Accumulator,
    pub duration: Duration,
    /// Sample passes run, fewer than `max_samples` if every pixel converged.
    pub passes: u32,
    pub samples: u64,
}

#[derive(Debug)]
pub struct RaytracingScene {
    pub render_options: RenderOptions,
    camera: RaytracingCamera,
    tracer: Tracer,
}

impl RaytracingScene {
    pub fn new(render_options: RenderOptions, camera: Camera, objects: Vec<Shape>) -> Self {
        let camera = RaytracingCamera::new(camera, render_options.width, render_options.height);
        let tracer = Tracer::new(objects, render_options.tracer_options());

        Self {
            render_options,
            camera,
            tracer,
        }
    }

    pub fn get_width(&self) -> u32 {
        self.render_options.width
    }

    pub fn get_height(&self) -> u32 {
        self.render_options.height
    }

    pub fn get_num_objects(&self) -> usize {
        self.tracer.get_shapes().len()
    }

    pub fn get_tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Independent random stream for one row of one pass.
    fn row_rng(&self, pass: u32, y: u32) -> StdRng {
        let stream = (u64::from(pass) << 32) | u64::from(y);
        StdRng::seed_from_u64(
            self.render_options
                .seed
                .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                ^ stream,
        )
    }

    /// Traces one sample for every pixel that has not converged yet and
    /// returns the number of samples taken.
    pub fn render_pass(
        &self,
        accumulator: &mut Accumulator,
        pass: u32,
        progress: &ProgressBar,
    ) -> u64 {
        let options = &self.render_options;

        accumulator
            .par_rows_mut()
            .progress_with(progress.clone())
            .map(|(y, row)| {
                let mut rng = self.row_rng(pass, y);
                let mut samples: u64 = 0;

                for (x, cell) in row.iter_mut().enumerate() {
                    let converged = cell.should_stop(options.min_samples, options.max_variance);
                    if options.adaptive && converged {
                        continue;
                    }

                    let ray = self.camera.build_ray(x as u32, y, &mut rng);
                    let radiance = self.tracer.get_radiance(&ray, &mut rng);
                    cell.add_sample(utils::clamp_color(radiance));
                    samples += 1;
                }

                samples
            })
            .sum()
    }

    fn build_progress_bar(&self) -> ProgressBar {
        let rows = u64::from(self.get_height()) * u64::from(self.render_options.max_samples);

        let progress = ProgressBar::new(rows);
        progress.set_draw_delta(rows / 200);
        progress.set_style(
            ProgressStyle::default_bar().template(
                format!(
                    "{} {} {}",
                    "[{elapsed_precise} elapsed] [{eta_precise} left]",
                    "{bar:40}",
                    "{msg}",
                )
                .as_str(),
            ),
        );

        progress
    }

    fn save_snapshot(&self, accumulator: &Accumulator, pass: u32) -> Result<(), Error> {
        if let Some(snapshot_dir) = &self.render_options.snapshot_dir {
            let path = snapshot_dir.join(format!("render_{:05}.ppm", pass));
            accumulator.save(&path)?;
            debug!("saved snapshot {}", path.display());
        }

        Ok(())
    }

    pub fn render(&self, use_progress: bool) -> Result<RenderResult, Error> {
        let options = &self.render_options;
        options.validate()?;

        if let Some(snapshot_dir) = &options.snapshot_dir {
            fs::create_dir_all(snapshot_dir).map_err(|source| Error::CreateDir {
                path: snapshot_dir.clone(),
                source,
            })?;
        }

        let progress = if use_progress {
            self.build_progress_bar()
        } else {
            ProgressBar::hidden()
        };
        let mut accumulator = Accumulator::new(self.get_width(), self.get_height());
        let mut samples = 0;
        let mut passes = 0;

        info!(
            "rendering {}x{} with up to {} samples per pixel",
            self.get_width(),
            self.get_height(),
            options.max_samples
        );
        let start = Instant::now();
        for pass in 0..options.max_samples {
            if pass > 0 && options.snapshot_interval > 0 && pass % options.snapshot_interval == 0 {
                self.save_snapshot(&accumulator, pass)?;
            }

            let pass_samples = self.render_pass(&mut accumulator, pass, &progress);
            if pass_samples == 0 {
                info!("every pixel converged after {} passes", passes);
                break;
            }

            samples += pass_samples;
            passes += 1;
            progress.set_message(format!("pass {}, {} samples", passes, samples));
        }
        let duration = start.elapsed();
        progress.finish_with_message(format!("{} samples", samples));

        if let Some((min, max)) = accumulator.sample_range() {
            debug!("samples per pixel ranged from {} to {}", min, max);
        }

        Ok(RenderResult {
            accumulator,
            duration,
            passes,
            samples,
        })
    }
}
