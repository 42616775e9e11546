use super::raytracing_scene::RaytracingScene;
use super::{Camera, RenderOptions};
use crate::error::Error;
use crate::primitives::Shape;
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scene {
    #[serde(flatten)]
    pub render_options: RenderOptions,
    pub camera: Camera,
    objects: Vec<Shape>,
}

impl Scene {
    pub fn new(render_options: RenderOptions, camera: Camera) -> Self {
        Self {
            render_options,
            camera,
            ..Scene::default()
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|source| Error::SceneRead {
            path: path.to_path_buf(),
            source,
        })?;
        let scene: Scene = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "loaded {} objects from {}",
            scene.objects.len(),
            path.display()
        );

        Ok(scene)
    }

    pub fn add_object(&mut self, object: Shape) {
        self.objects.push(object);
    }

    pub fn get_objects(&self) -> &[Shape] {
        &self.objects
    }

    pub fn build_raytracing_scene(self) -> RaytracingScene {
        RaytracingScene::new(self.render_options, self.camera, self.objects)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn scene_path(name: &str) -> PathBuf {
        [env!("CARGO_MANIFEST_DIR"), "scenes", name].iter().collect()
    }

    #[test]
    fn it_loads_the_bundled_scenes() {
        for name in &["simple.json", "complex.json", "materials.json"] {
            let scene = Scene::from_path(&scene_path(name)).unwrap();
            assert!(!scene.get_objects().is_empty());
            assert!(scene.render_options.validate().is_ok());
        }
    }

    #[test]
    fn it_reports_missing_scene_files() {
        let result = Scene::from_path(&scene_path("missing.json"));
        assert!(matches!(result, Err(Error::SceneRead { .. })));
    }
}
