mod accumulator;
mod camera;
mod raytracing_scene;
mod scene;
mod tracer;

use crate::error::Error;
use serde::Deserialize;
use std::path::PathBuf;

pub use accumulator::{Accumulator, PixelStats};
pub use camera::{Camera, Lens, RaytracingCamera};
pub use raytracing_scene::{RaytracingScene, RenderResult};
pub use scene::Scene;
pub use tracer::{Tracer, TracerOptions};

const GAMMA: f64 = 2.2;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub max_samples: u32,
    /// Samples every pixel takes before adaptive sampling may skip it.
    pub min_samples: u32,
    /// Variance below which a pixel counts as converged.
    pub max_variance: f64,
    pub adaptive: bool,
    pub emitter_sampling: bool,
    pub roulette_depth: u8,
    pub max_depth: u8,
    pub light_radius: f64,
    pub seed: u64,
    /// Passes between snapshots written to `snapshot_dir`, 0 to disable.
    pub snapshot_interval: u32,
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let tracer_options = TracerOptions::default();

        Self {
            width: 256,
            height: 256,
            max_samples: 50,
            min_samples: 16,
            max_variance: 0.01,
            adaptive: false,
            emitter_sampling: tracer_options.emitter_sampling,
            roulette_depth: tracer_options.roulette_depth,
            max_depth: tracer_options.max_depth,
            light_radius: tracer_options.light_radius,
            seed: 0,
            snapshot_interval: 10,
            snapshot_dir: None,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |message: String| Err(Error::InvalidOptions(message));

        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.max_samples == 0 {
            return invalid("max_samples must be at least 1".to_string());
        }
        if self.min_samples > self.max_samples {
            return invalid(format!(
                "min_samples ({}) exceeds max_samples ({})",
                self.min_samples, self.max_samples
            ));
        }
        if self.max_variance.is_nan() || self.max_variance < 0.0 {
            return invalid(format!(
                "max_variance must be non-negative, got {}",
                self.max_variance
            ));
        }
        if self.max_depth == u8::MAX {
            return invalid(format!("max_depth must be below {}", u8::MAX));
        }
        if self.light_radius.is_nan() || self.light_radius < 0.0 {
            return invalid(format!(
                "light_radius must be non-negative, got {}",
                self.light_radius
            ));
        }

        Ok(())
    }

    pub fn tracer_options(&self) -> TracerOptions {
        TracerOptions {
            emitter_sampling: self.emitter_sampling,
            roulette_depth: self.roulette_depth,
            max_depth: self.max_depth,
            light_radius: self.light_radius,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Material;
    use crate::primitives::Shape;
    use nalgebra::{Point3, Vector3};
    use serde_json::json;

    #[test]
    fn it_builds_a_raytracing_scene_from_an_empty_scene_json() {
        let scene_json = json!({});
        let scene: Result<Scene, serde_json::error::Error> = serde_json::from_value(scene_json);
        assert!(scene.is_ok(), "failed to deserialize scene");

        scene.unwrap().build_raytracing_scene();
    }

    #[test]
    fn it_builds_a_raytracing_scene_from_a_scene_json() {
        let scene_json = json!({
          "width": 64,
          "height": 48,
          "max_samples": 8,
          "adaptive": true,
          "snapshot_dir": "temp",
          "camera": { "position": [50, 52, 295.6], "direction": [0, -0.042612, -1], "near": 140 },
          "objects": [
            {
              "type": "sphere",
              "center": [50, 65.1, 81.6],
              "radius": 8.5,
              "material": { "emissive": [400, 400, 400], "color": [0, 0, 0] }
            },
            {
              "type": "cube",
              "min": [20, 0, 40],
              "max": [40, 20, 60],
              "angle": 0.5,
              "material": { "type": "glass", "color": [1, 1, 1] }
            },
            {
              "type": "plane",
              "normal": [0, 1, 0],
              "pattern": { "type": "stripe", "colors": [[1, 1, 1], [0, 0, 0]], "size": 10 }
            }
          ]
        });

        let scene: Result<Scene, serde_json::error::Error> = serde_json::from_value(scene_json);
        assert!(scene.is_ok(), "failed to deserialize scene");

        let scene = scene.unwrap();
        assert_eq!(scene.render_options.width, 64);
        assert_eq!(scene.render_options.max_samples, 8);
        assert!(scene.render_options.adaptive);
        assert_eq!(
            scene.render_options.snapshot_dir,
            Some(PathBuf::from("temp"))
        );
        assert_eq!(scene.get_objects().len(), 3);

        let scene = scene.build_raytracing_scene();
        assert_eq!(scene.get_num_objects(), 3);
        assert_eq!(scene.get_tracer().get_num_lights(), 1);
    }

    #[test]
    fn it_rejects_unknown_scene_fields() {
        assert!(serde_json::from_value::<Scene>(json!({ "lights": [] })).is_err());
        assert!(serde_json::from_value::<Scene>(json!({ "max_depth": 300 })).is_err());
    }

    #[test]
    fn it_builds_a_raytracing_scene_from_a_scene() {
        let mut scene = Scene::new(
            RenderOptions {
                width: 200,
                height: 200,
                max_depth: 5,
                ..RenderOptions::default()
            },
            Camera::default(),
        );
        scene.add_object(Shape::sphere(
            Point3::new(50.0, 65.1, 81.6),
            8.5,
            Material::light(Vector3::repeat(400.0)),
        ));
        scene.add_object(Shape::checker_plane(
            Vector3::y(),
            0.0,
            [Vector3::repeat(1.0), Vector3::repeat(0.1)],
            10.0,
            Material::default(),
        ));

        let scene = scene.build_raytracing_scene();
        assert_eq!(scene.get_num_objects(), 2);
        assert_eq!(scene.get_tracer().get_options().max_depth, 5);
    }

    #[test]
    fn it_validates_render_options() {
        assert!(RenderOptions::default().validate().is_ok());

        let invalid = [
            RenderOptions {
                width: 0,
                ..RenderOptions::default()
            },
            RenderOptions {
                max_samples: 0,
                min_samples: 0,
                ..RenderOptions::default()
            },
            RenderOptions {
                max_samples: 4,
                min_samples: 8,
                ..RenderOptions::default()
            },
            RenderOptions {
                max_variance: f64::NAN,
                ..RenderOptions::default()
            },
            RenderOptions {
                max_depth: u8::MAX,
                ..RenderOptions::default()
            },
        ];
        for options in &invalid {
            assert!(
                matches!(options.validate(), Err(Error::InvalidOptions(_))),
                "{:?} should be rejected",
                options
            );
        }
    }
}
