mod cube;
mod plane;
mod sphere;

use crate::core::{Material, SurfacePattern};
use crate::ray_intersection::Ray;
use nalgebra::{Point3, Unit, Vector3};
use rand::Rng;
use serde::Deserialize;

pub use cube::*;
pub use plane::*;
pub use sphere::*;

/// Geometry and shading queries shared by every primitive.
pub trait Primitive {
    /// Distance along `ray` (in units of its direction vector) to the nearest
    /// hit beyond [`EPSILON`](crate::EPSILON), if any.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Outward normal at a point on the surface.
    fn surface_normal(&self, hit_point: &Point3<f64>) -> Unit<Vector3<f64>>;

    fn random_surface_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3<f64>;

    fn get_material(&self) -> &Material;

    fn surface_color(&self, _hit_point: &Point3<f64>) -> Vector3<f64> {
        self.get_material().color
    }

    fn emission(&self) -> Vector3<f64> {
        self.get_material().emissive
    }

    fn is_emissive(&self) -> bool {
        self.get_material().is_emissive()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Cube(Cube),
    Plane(Plane),
    Sphere(Sphere),
}

impl Shape {
    pub fn sphere(center: Point3<f64>, radius: f64, material: Material) -> Self {
        Shape::Sphere(Sphere::new(center, radius, material))
    }

    pub fn cube(min: Point3<f64>, max: Point3<f64>, angle: f64, material: Material) -> Self {
        Shape::Cube(Cube::new(min, max, angle, material))
    }

    pub fn plane(normal: Vector3<f64>, offset: f64, material: Material) -> Self {
        Shape::Plane(Plane::new(normal, offset, SurfacePattern::Solid, material))
    }

    pub fn checker_plane(
        normal: Vector3<f64>,
        offset: f64,
        colors: [Vector3<f64>; 2],
        size: f64,
        material: Material,
    ) -> Self {
        Shape::Plane(Plane::new(
            normal,
            offset,
            SurfacePattern::Checker { colors, size },
            material,
        ))
    }

    pub fn stripe_plane(
        normal: Vector3<f64>,
        offset: f64,
        colors: [Vector3<f64>; 2],
        size: f64,
        material: Material,
    ) -> Self {
        Shape::Plane(Plane::new(
            normal,
            offset,
            SurfacePattern::Stripe { colors, size },
            material,
        ))
    }
}

impl Primitive for Shape {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Cube(cube) => cube.intersect(ray),
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Sphere(sphere) => sphere.intersect(ray),
        }
    }

    fn surface_normal(&self, hit_point: &Point3<f64>) -> Unit<Vector3<f64>> {
        match self {
            Shape::Cube(cube) => cube.surface_normal(hit_point),
            Shape::Plane(plane) => plane.surface_normal(hit_point),
            Shape::Sphere(sphere) => sphere.surface_normal(hit_point),
        }
    }

    fn random_surface_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3<f64> {
        match self {
            Shape::Cube(cube) => cube.random_surface_point(rng),
            Shape::Plane(plane) => plane.random_surface_point(rng),
            Shape::Sphere(sphere) => sphere.random_surface_point(rng),
        }
    }

    fn get_material(&self) -> &Material {
        match self {
            Shape::Cube(cube) => cube.get_material(),
            Shape::Plane(plane) => plane.get_material(),
            Shape::Sphere(sphere) => sphere.get_material(),
        }
    }

    fn surface_color(&self, hit_point: &Point3<f64>) -> Vector3<f64> {
        match self {
            Shape::Cube(cube) => cube.surface_color(hit_point),
            Shape::Plane(plane) => plane.surface_color(hit_point),
            Shape::Sphere(sphere) => sphere.surface_color(hit_point),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_deserializes_each_shape() {
        let shapes: Vec<Shape> = serde_json::from_value(json!([
            { "type": "sphere", "center": [0, 1, 0], "radius": 2 },
            { "type": "cube", "min": [0, 0, 0], "max": [1, 1, 1], "angle": 0.5 },
            {
                "type": "plane",
                "normal": [0, 1, 0],
                "offset": 0,
                "pattern": { "type": "checker", "colors": [[1, 1, 1], [0, 0, 0]], "size": 5 }
            }
        ]))
        .unwrap();

        assert!(matches!(shapes[0], Shape::Sphere(_)));
        assert!(matches!(shapes[1], Shape::Cube(_)));
        assert!(matches!(shapes[2], Shape::Plane(_)));
    }

    #[test]
    fn it_rejects_unknown_shapes() {
        assert!(serde_json::from_value::<Shape>(json!({ "type": "mesh" })).is_err());
        assert!(
            serde_json::from_value::<Shape>(json!({ "type": "sphere", "size": 1 })).is_err()
        );
    }

    #[test]
    fn it_dispatches_through_the_shape() {
        let shape = Shape::sphere(Point3::origin(), 1.0, Material::light(Vector3::repeat(4.0)));
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::z());

        assert_eq!(shape.intersect(&ray), Some(4.0));
        assert!(shape.is_emissive());
        assert_eq!(shape.emission(), Vector3::repeat(4.0));
    }

    #[test]
    fn it_builds_patterned_planes() {
        let colors = [Vector3::repeat(1.0), Vector3::repeat(0.0)];
        let checker = Shape::checker_plane(Vector3::y(), 0.0, colors, 1.0, Material::default());
        let stripe = Shape::stripe_plane(Vector3::y(), 0.0, colors, 1.0, Material::default());

        let p = Point3::new(1.5, 0.0, 0.5);
        assert_eq!(checker.surface_color(&p), colors[1]);
        assert_eq!(stripe.surface_color(&p), colors[1]);

        let p = Point3::new(1.5, 0.0, 1.5);
        assert_eq!(checker.surface_color(&p), colors[0]);
        assert_eq!(stripe.surface_color(&p), colors[1]);
    }
}
