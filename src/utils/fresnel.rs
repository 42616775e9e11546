use nalgebra::Vector3;
use std::mem;

/// Fraction of light reflected at a dielectric boundary between air and a
/// medium of index `ior`. `normal` is the outward normal of the medium.
pub fn fresnel(incident: &Vector3<f64>, normal: &Vector3<f64>, ior: f64) -> f64 {
    let mut cos_i = incident.dot(normal).clamp(-1.0, 1.0);
    let mut eta_i = 1.0;
    let mut eta_t = ior;
    if cos_i > 0.0 {
        mem::swap(&mut eta_i, &mut eta_t);
    }

    let sin_t = eta_i / eta_t * (1.0 - cos_i * cos_i).max(0.0).sqrt();
    if sin_t >= 1.0 {
        return 1.0;
    }

    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();
    cos_i = cos_i.abs();
    let r_s = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_p = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);

    (r_s * r_s + r_p * r_p) / 2.0
}
