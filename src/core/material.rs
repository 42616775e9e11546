use nalgebra::Vector3;
use num_traits::identities::Zero;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Diffuse,
    Mirror,
    Glass,
}

impl Default for MaterialKind {
    fn default() -> Self {
        MaterialKind::Diffuse
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Material {
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub color: Vector3<f64>,
    pub emissive: Vector3<f64>,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::default(),
            color: Vector3::repeat(0.75),
            emissive: Vector3::zero(),
            refractive_index: 1.5,
        }
    }
}

impl Material {
    pub fn diffuse(color: Vector3<f64>) -> Self {
        Self {
            color,
            ..Material::default()
        }
    }

    pub fn mirror(color: Vector3<f64>) -> Self {
        Self {
            kind: MaterialKind::Mirror,
            color,
            ..Material::default()
        }
    }

    pub fn glass(color: Vector3<f64>, refractive_index: f64) -> Self {
        Self {
            kind: MaterialKind::Glass,
            color,
            refractive_index,
            ..Material::default()
        }
    }

    pub fn light(emissive: Vector3<f64>) -> Self {
        Self {
            color: Vector3::zero(),
            emissive,
            ..Material::default()
        }
    }

    pub fn is_emissive(&self) -> bool {
        self.emissive.max() > 0.0
    }
}
