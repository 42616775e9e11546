use crate::ray_intersection::Ray;
use crate::utils;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use serde::Deserialize;

/// Thin lens depth of field.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lens {
    pub aperture: f64,
    pub focal_distance: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Camera {
    pub position: Point3<f64>,
    pub direction: Vector3<f64>,
    pub up: Vector3<f64>,
    /// Vertical extent of the image plane at unit distance.
    pub fov_scale: f64,
    /// Distance along each primary ray at which it starts.
    pub near: f64,
    pub lens: Option<Lens>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(50.0, 52.0, 295.6),
            direction: Vector3::new(0.0, -0.042_612, -1.0),
            up: Vector3::y(),
            fov_scale: 0.5135,
            near: 0.0,
            lens: None,
        }
    }
}

#[derive(Debug)]
pub struct RaytracingCamera {
    position: Point3<f64>,
    direction: Vector3<f64>,
    cx: Vector3<f64>,
    cy: Vector3<f64>,
    near: f64,
    lens: Option<Lens>,
    width: f64,
    height: f64,
}

impl RaytracingCamera {
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        let (width, height) = (f64::from(width), f64::from(height));
        let direction = camera.direction.normalize();
        let cx = direction.cross(&camera.up).normalize() * (width * camera.fov_scale / height);
        let cy = cx.cross(&direction).normalize() * camera.fov_scale;

        Self {
            position: camera.position,
            direction,
            cx,
            cy,
            near: camera.near,
            lens: camera.lens,
            width,
            height,
        }
    }

    /// Primary ray through pixel `(x, y)`, with `y = 0` at the bottom of the
    /// image, jittered across the pixel with a tent filter.
    pub fn build_ray<R: Rng + ?Sized>(&self, x: u32, y: u32, rng: &mut R) -> Ray {
        let dx = utils::tent_filter(rng);
        let dy = utils::tent_filter(rng);

        self.ray_through(
            (f64::from(x) + dx) / self.width,
            (f64::from(y) + dy) / self.height,
            rng,
        )
    }

    /// Ray through the normalized film position `(sx, sy)` in `[0, 1]²`.
    fn ray_through<R: Rng + ?Sized>(&self, sx: f64, sy: f64, rng: &mut R) -> Ray {
        let d = self.cx * (sx - 0.5) + self.cy * (sy - 0.5) + self.direction;
        let origin = self.position + d * self.near;
        let direction = d.normalize();

        match self.lens {
            None => Ray::new(origin, direction),
            Some(lens) => {
                let focus = origin + direction * lens.focal_distance;
                let disk = utils::concentric_sample_disk(rng);
                let lens_origin = origin
                    + (self.cx.normalize() * disk.x + self.cy.normalize() * disk.y) * lens.aperture;

                Ray::new(lens_origin, (focus - lens_origin).normalize())
            }
        }
    }
}
