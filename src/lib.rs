#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::wildcard_imports
)]

mod core;
mod error;
mod primitives;
mod ray_intersection;
mod render;
mod utils;

pub use crate::core::{Material, MaterialKind, SurfacePattern, EPSILON};
pub use crate::error::Error;
pub use crate::primitives::{Cube, Plane, Primitive, Shape, Sphere};
pub use crate::ray_intersection::{Intersection, Ray, RayType};
pub use crate::render::{
    Accumulator, Camera, Lens, PixelStats, RaytracingCamera, RaytracingScene, RenderOptions,
    RenderResult, Scene, Tracer, TracerOptions,
};
