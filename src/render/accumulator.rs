use super::GAMMA;
use crate::error::Error;
use crate::utils;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, ImageError, ImageResult, Rgb, RgbImage};
use itertools::{Itertools, MinMaxResult};
use log::debug;
use nalgebra::Vector3;
use num_traits::identities::Zero;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Running statistics of the radiance samples taken for one pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelStats {
    sum: Vector3<f64>,
    samples: u32,
    m2: f64,
    mean: Vector3<f64>,
}

impl Default for PixelStats {
    fn default() -> Self {
        Self {
            sum: Vector3::zero(),
            samples: 0,
            m2: 0.0,
            mean: Vector3::zero(),
        }
    }
}

impl PixelStats {
    pub fn add_sample(&mut self, value: Vector3<f64>) {
        let previous_mean = self.mean;

        self.samples += 1;
        self.sum += value;
        self.mean = self.sum / f64::from(self.samples);
        self.m2 += (value - previous_mean).dot(&(value - self.mean));
    }

    pub fn get_samples(&self) -> u32 {
        self.samples
    }

    pub fn get_mean(&self) -> Vector3<f64> {
        self.mean
    }

    /// Population variance of the samples, summed over the color channels.
    /// Undefined until two samples have been taken.
    pub fn variance(&self) -> Option<f64> {
        if self.samples < 2 {
            None
        } else {
            Some(self.m2 / f64::from(self.samples))
        }
    }

    /// Whether the pixel has converged and further samples can be skipped.
    pub fn should_stop(&self, min_samples: u32, max_variance: f64) -> bool {
        self.samples > min_samples && self.variance().is_some_and(|v| v < max_variance)
    }
}

/// Per-pixel sample statistics for a whole image. `y = 0` is the bottom row;
/// cells are stored top row first.
#[derive(Clone, Debug)]
pub struct Accumulator {
    width: u32,
    height: u32,
    pixels: Vec<PixelStats>,
}

impl Accumulator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PixelStats::default(); (width * height) as usize],
        }
    }

    pub fn get_width(&self) -> u32 {
        self.width
    }

    pub fn get_height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height);
        ((self.height - y - 1) * self.width + x) as usize
    }

    pub fn add_sample(&mut self, x: u32, y: u32, value: Vector3<f64>) {
        let index = self.index(x, y);
        self.pixels[index].add_sample(value);
    }

    pub fn should_stop(&self, x: u32, y: u32, min_samples: u32, max_variance: f64) -> bool {
        self.pixel(x, y).should_stop(min_samples, max_variance)
    }

    pub fn pixel(&self, x: u32, y: u32) -> &PixelStats {
        &self.pixels[self.index(x, y)]
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Vector3<f64> {
        self.pixel(x, y).get_mean()
    }

    /// Rows of cells paired with their `y` coordinate, for parallel passes
    /// with one writer per row.
    pub fn par_rows_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = (u32, &mut [PixelStats])> + '_ {
        let height = self.height;
        self.pixels
            .par_chunks_mut(self.width as usize)
            .enumerate()
            .map(move |(row, cells)| (height - row as u32 - 1, cells))
    }

    /// Fewest and most samples taken by any pixel.
    pub fn sample_range(&self) -> Option<(u32, u32)> {
        match self.pixels.iter().map(PixelStats::get_samples).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(samples) => Some((samples, samples)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |col, row| {
            let mean = self.pixels[(row * self.width + col) as usize].get_mean();
            Rgb([
                utils::to_display_u8(mean.x, GAMMA),
                utils::to_display_u8(mean.y, GAMMA),
                utils::to_display_u8(mean.z, GAMMA),
            ])
        })
    }

    /// Grayscale map of how many samples each pixel received relative to
    /// `max_samples`.
    pub fn density_image(&self, max_samples: u32) -> RgbImage {
        let max_samples = f64::from(max_samples.max(1));
        RgbImage::from_fn(self.width, self.height, |col, row| {
            let samples = self.pixels[(row * self.width + col) as usize].get_samples();
            let value = (255.0 * f64::from(samples) / max_samples).min(255.0) as u8;
            Rgb([value; 3])
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        save_image(&self.to_rgb_image(), path)
    }

    pub fn save_density(&self, path: &Path, max_samples: u32) -> Result<(), Error> {
        save_image(&self.density_image(max_samples), path)
    }
}

/// Encodes an image as an ASCII pixmap (`P3`).
pub fn write_ppm<W: Write>(image: &RgbImage, writer: W) -> ImageResult<()> {
    PnmEncoder::new(writer)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii))
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
}

/// Writes `.ppm` paths as ASCII pixmaps and anything else in the format
/// implied by the extension.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<(), Error> {
    let is_ppm = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("ppm"));

    let result = if is_ppm {
        File::create(path)
            .map_err(ImageError::IoError)
            .and_then(|file| write_ppm(image, BufWriter::new(file)))
    } else {
        image.save(path)
    };
    result.map_err(|source| Error::ImageWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {}", path.display());

    Ok(())
}
