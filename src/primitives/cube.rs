use super::Primitive;
use crate::core::{Material, EPSILON};
use crate::ray_intersection::Ray;
use nalgebra::{Point3, Rotation3, Unit, Vector3};
use rand::Rng;
use serde::Deserialize;
use std::mem;

fn slab(min: f64, max: f64, origin: f64, direction: f64) -> (f64, f64) {
    let mut t_min = (min - origin) / direction;
    let mut t_max = (max - origin) / direction;
    if t_min > t_max {
        mem::swap(&mut t_min, &mut t_max);
    }

    (t_min, t_max)
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CubeDefinition {
    min: Point3<f64>,
    max: Point3<f64>,
    angle: f64,
    material: Material,
}

impl Default for CubeDefinition {
    fn default() -> Self {
        Self {
            min: Point3::from([-0.5; 3]),
            max: Point3::from([0.5; 3]),
            angle: 0.0,
            material: Material::default(),
        }
    }
}

/// Box spanning `min..max` in its own frame, rotated by `angle` radians about
/// the vertical axis through its center.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "CubeDefinition")]
pub struct Cube {
    min: Point3<f64>,
    max: Point3<f64>,
    center: Point3<f64>,
    world_to_local: Rotation3<f64>,
    pub material: Material,
}

impl From<CubeDefinition> for Cube {
    fn from(definition: CubeDefinition) -> Self {
        Cube::new(
            definition.min,
            definition.max,
            definition.angle,
            definition.material,
        )
    }
}

impl Cube {
    /// Corners may be given in any order.
    pub fn new(min: Point3<f64>, max: Point3<f64>, angle: f64, material: Material) -> Self {
        let (min, max) = (min.inf(&max), min.sup(&max));

        Self {
            min,
            max,
            center: nalgebra::center(&min, &max),
            world_to_local: Rotation3::from_axis_angle(&Vector3::y_axis(), -angle),
            material,
        }
    }

    fn to_local(&self, point: &Point3<f64>) -> Point3<f64> {
        self.center + self.world_to_local * (point - self.center)
    }

    fn to_world(&self, point: &Point3<f64>) -> Point3<f64> {
        self.center + self.world_to_local.inverse_transform_vector(&(point - self.center))
    }
}

impl Primitive for Cube {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let origin = self.to_local(&ray.origin);
        let direction = self.world_to_local * ray.direction;

        let (mut t_min, mut t_max) = slab(self.min.x, self.max.x, origin.x, direction.x);
        for axis in 1..3 {
            let (axis_min, axis_max) = slab(
                self.min[axis],
                self.max[axis],
                origin[axis],
                direction[axis],
            );

            if t_min > axis_max + EPSILON || axis_min > t_max + EPSILON {
                return None;
            }
            t_min = t_min.max(axis_min);
            t_max = t_max.min(axis_max);
        }

        if t_min > EPSILON {
            Some(t_min)
        } else if t_max > EPSILON {
            Some(t_max)
        } else {
            None
        }
    }

    fn surface_normal(&self, hit_point: &Point3<f64>) -> Unit<Vector3<f64>> {
        let local = self.to_local(hit_point);

        let mut nearest = f64::INFINITY;
        let mut local_normal = Vector3::y_axis();
        for axis in 0..3 {
            let axis_normal = match axis {
                0 => Vector3::x_axis(),
                1 => Vector3::y_axis(),
                _ => Vector3::z_axis(),
            };

            let to_min = (local[axis] - self.min[axis]).abs();
            if to_min < nearest {
                nearest = to_min;
                local_normal = -axis_normal;
            }
            let to_max = (local[axis] - self.max[axis]).abs();
            if to_max < nearest {
                nearest = to_max;
                local_normal = axis_normal;
            }
        }

        Unit::new_normalize(
            self.world_to_local
                .inverse_transform_vector(&local_normal.into_inner()),
        )
    }

    fn random_surface_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3<f64> {
        let extent = self.max - self.min;
        let local = self.min
            + Vector3::new(
                rng.gen::<f64>() * extent.x,
                rng.gen::<f64>() * extent.y,
                rng.gen::<f64>() * extent.z,
            );

        self.to_world(&local)
    }

    fn get_material(&self) -> &Material {
        &self.material
    }
}
