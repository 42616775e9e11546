use super::Primitive;
use crate::core::{Material, EPSILON};
use crate::ray_intersection::Ray;
use crate::utils;
use nalgebra::{Point3, Unit, Vector3};
use rand::Rng;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sphere {
    center: Point3<f64>,
    radius: f64,
    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
            material: Material::default(),
        }
    }
}

impl Sphere {
    pub fn new(center: Point3<f64>, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let hypot = ray.origin - self.center;
        let a = ray.direction.magnitude_squared();
        let b = 2.0 * hypot.dot(&ray.direction);
        let c = hypot.magnitude_squared() - self.radius * self.radius;

        let (t0, t1) = utils::quadratic(a, b, c)?;
        if t0 > EPSILON {
            Some(t0)
        } else if t1 > EPSILON {
            Some(t1)
        } else {
            None
        }
    }

    fn surface_normal(&self, hit_point: &Point3<f64>) -> Unit<Vector3<f64>> {
        Unit::new_normalize(hit_point - self.center)
    }

    fn random_surface_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3<f64> {
        self.center + utils::sample_sphere_angles(rng) * self.radius
    }

    fn get_material(&self) -> &Material {
        &self.material
    }
}
