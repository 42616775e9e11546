use super::Primitive;
use crate::core::{Material, SurfacePattern, EPSILON};
use crate::ray_intersection::Ray;
use nalgebra::{Point3, Unit, Vector2, Vector3};
use rand::Rng;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PlaneDefinition {
    normal: Vector3<f64>,
    offset: f64,
    pattern: SurfacePattern,
    material: Material,
}

impl Default for PlaneDefinition {
    fn default() -> Self {
        Self {
            normal: Vector3::y(),
            offset: 0.0,
            pattern: SurfacePattern::default(),
            material: Material::default(),
        }
    }
}

/// Infinite plane of points `p` with `p · normal + offset = 0`.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "PlaneDefinition")]
pub struct Plane {
    normal: Unit<Vector3<f64>>,
    offset: f64,
    pattern: SurfacePattern,
    pub material: Material,
}

impl From<PlaneDefinition> for Plane {
    fn from(definition: PlaneDefinition) -> Self {
        Plane::new(
            definition.normal,
            definition.offset,
            definition.pattern,
            definition.material,
        )
    }
}

impl Plane {
    pub fn new(
        normal: Vector3<f64>,
        offset: f64,
        pattern: SurfacePattern,
        material: Material,
    ) -> Self {
        let (normal, length) = Unit::new_and_get(normal);

        Self {
            normal,
            offset: offset / length,
            pattern,
            material,
        }
    }

    /// Coordinates of the projected point along the two axes least aligned
    /// with the normal.
    fn uv(&self, hit_point: &Point3<f64>) -> Vector2<f64> {
        let n = self.normal.into_inner();
        let p = hit_point.coords - n * (hit_point.coords.dot(&n) + self.offset);
        let (x, y, z) = (n.x.abs(), n.y.abs(), n.z.abs());

        if x > y && x > z {
            Vector2::new(p.y, p.z)
        } else if y > x && y > z {
            Vector2::new(p.x, p.z)
        } else {
            Vector2::new(p.x, p.y)
        }
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < EPSILON {
            return None;
        }

        let distance = -(ray.origin.coords.dot(&self.normal) + self.offset) / denom;
        if distance > EPSILON {
            Some(distance)
        } else {
            None
        }
    }

    fn surface_normal(&self, _hit_point: &Point3<f64>) -> Unit<Vector3<f64>> {
        self.normal
    }

    fn random_surface_point<R: Rng + ?Sized>(&self, _rng: &mut R) -> Point3<f64> {
        Point3::from(-self.offset * self.normal.into_inner())
    }

    fn get_material(&self) -> &Material {
        &self.material
    }

    fn surface_color(&self, hit_point: &Point3<f64>) -> Vector3<f64> {
        self.pattern.get_color(self.uv(hit_point), self.material.color)
    }
}
