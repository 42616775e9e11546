mod fresnel;
mod rays;
mod sampling;

use nalgebra::Vector3;

pub use fresnel::fresnel;
pub use rays::{reflect, refract};
pub use sampling::{
    concentric_sample_disk, cosine_sample_hemisphere, sample_sphere_angles, tent_filter,
};

pub fn clamp_color(color: Vector3<f64>) -> Vector3<f64> {
    color.map(|c| c.clamp(0.0, 1.0))
}

/// Tone maps a linear color channel to an 8-bit display value.
pub fn to_display_u8(c: f64, gamma: f64) -> u8 {
    // f64::max also maps NaN radiance to black
    let value = c.max(0.0).powf(1.0 / gamma) * 255.0;
    value.min(255.0) as u8
}

pub fn quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        None
    } else if discriminant == 0.0 {
        Some((-0.5 * b / a, -0.5 * b / a))
    } else {
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let r0 = q / a;
        let r1 = c / q;
        Some((r0.min(r1), r0.max(r1)))
    }
}
