use crate::core::{MaterialKind, EPSILON};
use crate::primitives::{Primitive, Shape};
use crate::ray_intersection::{Intersection, Ray, RayType};
use crate::utils;
use log::{debug, warn};
use nalgebra::{Point3, Unit, Vector3};
use num_traits::identities::Zero;
use rand::Rng;
use std::f64::consts::{FRAC_1_PI, TAU};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TracerOptions {
    /// Sample every emitter directly at diffuse hits.
    pub emitter_sampling: bool,
    /// Paths deeper than this are subject to Russian roulette.
    pub roulette_depth: u8,
    /// Paths deeper than this are always terminated.
    pub max_depth: u8,
    /// Apparent radius of emitters in the solid angle estimate of direct
    /// light sampling.
    pub light_radius: f64,
}

impl Default for TracerOptions {
    fn default() -> Self {
        Self {
            emitter_sampling: true,
            roulette_depth: 4,
            max_depth: 10,
            light_radius: 1.5,
        }
    }
}

/// Survival test for a path continuing through a surface with the given
/// albedo. Returns the albedo reweighted by the survival probability, or
/// `None` if the path is terminated.
fn russian_roulette<R: Rng + ?Sized>(albedo: Vector3<f64>, rng: &mut R) -> Option<Vector3<f64>> {
    let survival = albedo.max();
    if survival <= 0.0 || rng.gen::<f64>() > survival {
        None
    } else {
        Some(albedo / survival)
    }
}

#[derive(Debug)]
pub struct Tracer {
    shapes: Vec<Shape>,
    lights: Vec<usize>,
    options: TracerOptions,
}

impl Tracer {
    pub fn new(shapes: Vec<Shape>, mut options: TracerOptions) -> Self {
        // Rays one past the cap still need a representable depth
        if options.max_depth == u8::MAX {
            warn!("max_depth {} is too deep, using {}", u8::MAX, u8::MAX - 1);
            options.max_depth = u8::MAX - 1;
        }

        let lights: Vec<usize> = shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| shape.is_emissive())
            .map(|(index, _)| index)
            .collect();

        if lights.is_empty() {
            warn!("scene has no emissive objects, the render will be black");
        }
        debug!(
            "built tracer over {} objects with {} lights",
            shapes.len(),
            lights.len()
        );

        Self {
            shapes,
            lights,
            options,
        }
    }

    pub fn get_shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get_num_lights(&self) -> usize {
        self.lights.len()
    }

    pub fn get_options(&self) -> &TracerOptions {
        &self.options
    }

    /// Nearest hit along `ray`. Ties keep the object listed first.
    pub fn get_intersection(&self, ray: &Ray) -> Option<Intersection> {
        let mut nearest: Option<Intersection> = None;
        for (index, shape) in self.shapes.iter().enumerate() {
            if let Some(distance) = shape.intersect(ray) {
                let closer = match &nearest {
                    Some(hit) => distance < hit.distance,
                    None => true,
                };
                if closer {
                    nearest = Some(Intersection::new(shape, index, distance));
                }
            }
        }

        nearest
    }

    /// Next event estimate of the light reaching `hit_point` directly from
    /// every emitter, before the albedo is applied.
    pub fn sample_direct_light<R: Rng + ?Sized>(
        &self,
        hit_point: &Point3<f64>,
        normal: &Unit<Vector3<f64>>,
        rng: &mut R,
    ) -> Vector3<f64> {
        let radius_sq = self.options.light_radius * self.options.light_radius;

        let mut direct = Vector3::zero();
        for &light_index in &self.lights {
            let light = &self.shapes[light_index];
            let light_point = light.random_surface_point(rng);
            let to_light = light_point - hit_point;
            let distance_sq = to_light.magnitude_squared();
            let light_dir = to_light.normalize();

            let shadow_ray = Ray {
                ray_type: RayType::Shadow,
                origin: *hit_point,
                direction: light_dir,
            };
            let unoccluded = self
                .get_intersection(&shadow_ray)
                .is_some_and(|hit| hit.index == light_index);
            if !unoccluded {
                continue;
            }

            let cos_theta = normal.dot(&light_dir);
            if cos_theta > 0.0 {
                let cos_a_max = (1.0 - radius_sq / distance_sq).max(0.0).sqrt();
                let omega = TAU * (1.0 - cos_a_max);
                direct += light.emission() * (cos_theta * omega * FRAC_1_PI);
            }
        }

        direct
    }

    pub fn get_radiance<R: Rng + ?Sized>(&self, ray: &Ray, rng: &mut R) -> Vector3<f64> {
        let intersection = match self.get_intersection(ray) {
            Some(intersection) => intersection,
            None => return Vector3::zero(),
        };
        let object = intersection.object;
        let depth = ray.get_depth();

        if object.is_emissive() {
            // Already gathered by direct light sampling at the previous vertex
            let sampled_directly =
                self.options.emitter_sampling && matches!(ray.ray_type, RayType::Diffuse(_));
            return if sampled_directly {
                Vector3::zero()
            } else {
                object.emission()
            };
        }

        if depth > self.options.max_depth {
            return Vector3::zero();
        }

        let hit_point = intersection.get_hit_point(ray);
        let mut albedo = object.surface_color(&hit_point);
        if depth > self.options.roulette_depth {
            albedo = match russian_roulette(albedo, rng) {
                Some(albedo) => albedo,
                None => return Vector3::zero(),
            };
        }

        let normal = intersection.get_facing_normal(ray);
        let material = object.get_material();

        match material.kind {
            MaterialKind::Mirror => {
                let reflection_ray = Ray {
                    ray_type: RayType::Specular(depth + 1),
                    origin: hit_point + normal.into_inner() * EPSILON,
                    direction: utils::reflect(&ray.direction, &normal).into_inner(),
                };

                object.emission() + albedo.component_mul(&self.get_radiance(&reflection_ray, rng))
            }
            MaterialKind::Glass => {
                let outward_normal = object.surface_normal(&hit_point);
                let radiance = self.get_radiance_glass(
                    ray,
                    &hit_point,
                    &normal,
                    &outward_normal,
                    material.refractive_index,
                    rng,
                );

                object.emission() + albedo.component_mul(&radiance)
            }
            MaterialKind::Diffuse => {
                let direct = if self.options.emitter_sampling {
                    self.sample_direct_light(&hit_point, &normal, rng)
                } else {
                    Vector3::zero()
                };

                let bounce_ray = Ray {
                    ray_type: RayType::Diffuse(depth + 1),
                    origin: hit_point,
                    direction: utils::cosine_sample_hemisphere(&normal, rng).into_inner(),
                };
                let indirect = self.get_radiance(&bounce_ray, rng);

                let radiance = albedo.component_mul(&(direct + indirect));
                if depth == 0 || !self.options.emitter_sampling {
                    object.emission() + radiance
                } else {
                    radiance
                }
            }
        }
    }

    fn get_radiance_glass<R: Rng + ?Sized>(
        &self,
        ray: &Ray,
        hit_point: &Point3<f64>,
        normal: &Unit<Vector3<f64>>,
        outward_normal: &Unit<Vector3<f64>>,
        refractive_index: f64,
        rng: &mut R,
    ) -> Vector3<f64> {
        let depth = ray.get_depth();
        let incident = Unit::new_normalize(ray.direction);

        let reflection_ray = Ray {
            ray_type: RayType::Specular(depth + 1),
            origin: hit_point + normal.into_inner() * EPSILON,
            direction: utils::reflect(&incident, normal).into_inner(),
        };
        let reflection = self.get_radiance(&reflection_ray, rng);

        let refraction_dir = match utils::refract(&incident, outward_normal, refractive_index) {
            Some(direction) => direction,
            None => return reflection,
        };
        let kr = utils::fresnel(&incident, outward_normal, refractive_index);

        let refraction_ray = Ray {
            ray_type: RayType::Specular(depth + 1),
            origin: hit_point - normal.into_inner() * EPSILON,
            direction: refraction_dir.into_inner(),
        };
        let refraction = self.get_radiance(&refraction_ray, rng);

        refraction.lerp(&reflection, kr)
    }
}
