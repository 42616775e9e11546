use nalgebra::{Unit, Vector3};

pub fn reflect(incident: &Vector3<f64>, normal: &Vector3<f64>) -> Unit<Vector3<f64>> {
    Unit::new_normalize(incident - 2.0 * incident.dot(normal) * normal)
}

/// Snell refraction through a boundary between air and a medium with index
/// `ior`, where `normal` is the outward normal of the medium. Returns `None`
/// on total internal reflection.
pub fn refract(
    incident: &Unit<Vector3<f64>>,
    normal: &Unit<Vector3<f64>>,
    ior: f64,
) -> Option<Unit<Vector3<f64>>> {
    let n_dot_i = normal.dot(&incident.into_inner()).clamp(-1.0, 1.0);
    let (refraction_normal, eta, cos_i) = if n_dot_i < 0.0 {
        (normal.into_inner(), 1.0 / ior, -n_dot_i)
    } else {
        (-normal.into_inner(), ior, n_dot_i)
    };

    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        None
    } else {
        Some(Unit::new_normalize(
            incident.into_inner() * eta + refraction_normal * (eta * cos_i - k.sqrt()),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PRECISION: f64 = 1e-9;

    #[test]
    fn it_reflects_about_the_normal() {
        let reflected = reflect(&Vector3::new(1.0, -1.0, 0.0), &Vector3::y());
        let expected = Vector3::new(1.0, 1.0, 0.0).normalize();

        assert!((reflected.into_inner() - expected).magnitude() < PRECISION);
    }

    #[test]
    fn it_passes_straight_through_at_normal_incidence() {
        let incident = -Vector3::y_axis();
        let refracted = refract(&incident, &Vector3::y_axis(), 1.5).unwrap();

        assert!((refracted.into_inner() - incident.into_inner()).magnitude() < PRECISION);
    }

    #[test]
    fn it_bends_toward_the_normal_when_entering() {
        let incident = Unit::new_normalize(Vector3::new(1.0, -1.0, 0.0));
        let refracted = refract(&incident, &Vector3::y_axis(), 1.5).unwrap();

        let sin_i = incident.x;
        let sin_t = refracted.x;
        assert!((sin_i - 1.5 * sin_t).abs() < PRECISION);
        assert!(refracted.y < 0.0);
    }

    #[test]
    fn it_bends_away_from_the_normal_when_leaving() {
        let incident = Unit::new_normalize(Vector3::new(0.3, 1.0, 0.0));
        let refracted = refract(&incident, &Vector3::y_axis(), 1.5).unwrap();

        assert!((1.5 * incident.x - refracted.x).abs() < PRECISION);
        assert!(refracted.y > 0.0);
    }

    #[test]
    fn it_detects_total_internal_reflection() {
        let incident = Unit::new_normalize(Vector3::new(1.0, 0.5, 0.0));
        assert!(refract(&incident, &Vector3::y_axis(), 1.5).is_none());
    }
}
