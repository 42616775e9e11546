use nalgebra::{Point2, Unit, Vector3};
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Maps a uniform square sample onto the unit disk with Shirley's concentric
/// mapping.
pub fn concentric_sample_disk<R: Rng + ?Sized>(rng: &mut R) -> Point2<f64> {
    let x = rng.gen_range(-1.0..1.0);
    let y = rng.gen_range(-1.0..1.0);

    if x == 0.0 && y == 0.0 {
        return Point2::origin();
    }

    let (r, theta) = if f64::abs(x) > f64::abs(y) {
        (x, FRAC_PI_4 * (y / x))
    } else {
        (y, FRAC_PI_2 - FRAC_PI_4 * (x / y))
    };

    Point2::new(r * theta.cos(), r * theta.sin())
}

// Cosine weighted direction around the normal
pub fn cosine_sample_hemisphere<R: Rng + ?Sized>(
    normal: &Unit<Vector3<f64>>,
    rng: &mut R,
) -> Unit<Vector3<f64>> {
    let angle = rng.gen_range(0.0..TAU);
    let radius_sq: f64 = rng.gen();
    let radius = radius_sq.sqrt();

    let w = normal.into_inner();
    let helper = if w.x.abs() > 0.1 {
        Vector3::y()
    } else {
        Vector3::x()
    };
    let u = helper.cross(&w).normalize();
    let v = w.cross(&u);

    Unit::new_normalize(
        u * (angle.cos() * radius) + v * (angle.sin() * radius) + w * (1.0 - radius_sq).sqrt(),
    )
}

/// Unit vector from uniformly drawn polar and azimuthal angles. Not uniform
/// over the sphere, the poles are oversampled.
pub fn sample_sphere_angles<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    let theta = rng.gen_range(0.0..=PI);
    let phi = rng.gen_range(0.0..TAU);

    Vector3::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    )
}

/// Tent distributed offset in `[-1, 1]`, peaked at zero.
pub fn tent_filter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.gen_range(0.0..2.0);
    if u < 1.0 {
        f64::sqrt(u) - 1.0
    } else {
        1.0 - f64::sqrt(2.0 - u)
    }
}
