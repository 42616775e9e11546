use crate::primitives::{Primitive, Shape};
use nalgebra::{Point3, Unit, Vector3};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RayType {
    Primary,
    Diffuse(u8),
    Specular(u8),
    Shadow,
}

#[derive(Clone, Debug)]
pub struct Ray {
    pub ray_type: RayType,
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            ray_type: RayType::Primary,
            origin,
            direction,
        }
    }

    pub fn get_depth(&self) -> u8 {
        match self.ray_type {
            RayType::Primary => 0,
            RayType::Diffuse(depth) | RayType::Specular(depth) => depth,
            RayType::Shadow => panic!("shadow rays have no depth"),
        }
    }

    pub fn at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }
}

#[derive(Debug)]
pub struct Intersection<'a> {
    pub object: &'a Shape,
    pub index: usize,
    pub distance: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(object: &'a Shape, index: usize, distance: f64) -> Self {
        Self {
            object,
            index,
            distance,
        }
    }

    pub fn get_hit_point(&self, ray: &Ray) -> Point3<f64> {
        ray.at(self.distance)
    }

    /// Geometric normal flipped to face against the incoming ray.
    pub fn get_facing_normal(&self, ray: &Ray) -> Unit<Vector3<f64>> {
        let normal = self.object.surface_normal(&self.get_hit_point(ray));
        if normal.dot(&ray.direction) > 0.0 {
            -normal
        } else {
            normal
        }
    }
}
