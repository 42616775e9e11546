mod material;
mod pattern;

pub use material::*;
pub use pattern::*;

/// Minimum hit distance and surface offset shared by every intersection test.
pub const EPSILON: f64 = 1e-3;
