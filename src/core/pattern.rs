use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

fn cell_index(coordinate: f64, size: f64) -> i64 {
    (coordinate / size).floor() as i64
}

/// Position-dependent albedo for planar surfaces, evaluated on the plane's
/// local 2D coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum SurfacePattern {
    Solid,
    Checker {
        colors: [Vector3<f64>; 2],
        size: f64,
    },
    Stripe {
        colors: [Vector3<f64>; 2],
        size: f64,
    },
}

impl Default for SurfacePattern {
    fn default() -> Self {
        SurfacePattern::Solid
    }
}

impl SurfacePattern {
    pub fn get_color(&self, uv: Vector2<f64>, base_color: Vector3<f64>) -> Vector3<f64> {
        match self {
            SurfacePattern::Solid => base_color,
            SurfacePattern::Checker { colors, size } => {
                let cell = cell_index(uv.x, *size) + cell_index(uv.y, *size);
                colors[cell.rem_euclid(2) as usize]
            }
            SurfacePattern::Stripe { colors, size } => {
                colors[cell_index(uv.x, *size).rem_euclid(2) as usize]
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn white() -> Vector3<f64> {
        Vector3::repeat(1.0)
    }

    fn black() -> Vector3<f64> {
        Vector3::repeat(0.0)
    }

    #[test]
    fn it_returns_the_base_color_for_solid_surfaces() {
        let base = Vector3::new(0.2, 0.4, 0.6);
        assert_eq!(
            SurfacePattern::Solid.get_color(Vector2::new(13.0, -7.0), base),
            base
        );
    }

    #[test]
    fn it_alternates_checker_cells() {
        let checker = SurfacePattern::Checker {
            colors: [white(), black()],
            size: 2.0,
        };

        assert_eq!(checker.get_color(Vector2::new(0.5, 0.5), black()), white());
        assert_eq!(checker.get_color(Vector2::new(2.5, 0.5), black()), black());
        assert_eq!(checker.get_color(Vector2::new(0.5, 2.5), black()), black());
        assert_eq!(checker.get_color(Vector2::new(2.5, 2.5), black()), white());
    }

    #[test]
    fn it_floors_negative_checker_coordinates() {
        let checker = SurfacePattern::Checker {
            colors: [white(), black()],
            size: 1.0,
        };

        assert_eq!(checker.get_color(Vector2::new(-0.5, 0.5), white()), black());
        assert_eq!(checker.get_color(Vector2::new(-0.5, -0.5), black()), white());
        assert_eq!(checker.get_color(Vector2::new(-1.5, 0.5), black()), white());
    }

    #[test]
    fn it_uses_a_single_axis_for_stripes() {
        let stripe = SurfacePattern::Stripe {
            colors: [white(), black()],
            size: 1.0,
        };

        assert_eq!(stripe.get_color(Vector2::new(0.5, 0.5), black()), white());
        assert_eq!(stripe.get_color(Vector2::new(0.5, 7.5), black()), white());
        assert_eq!(stripe.get_color(Vector2::new(1.5, 0.5), black()), black());
        assert_eq!(stripe.get_color(Vector2::new(-0.5, 0.5), black()), black());
    }

    #[test]
    fn it_deserializes_patterns() {
        assert_eq!(
            serde_json::from_value::<SurfacePattern>(json!({ "type": "solid" })).unwrap(),
            SurfacePattern::Solid
        );
        assert_eq!(
            serde_json::from_value::<SurfacePattern>(json!({
                "type": "stripe",
                "colors": [[1, 1, 1], [0, 0, 0]],
                "size": 4
            }))
            .unwrap(),
            SurfacePattern::Stripe {
                colors: [white(), black()],
                size: 4.0
            }
        );
    }

    #[test]
    fn it_rejects_unknown_pattern_fields() {
        let result = serde_json::from_value::<SurfacePattern>(json!({
            "type": "checker",
            "colors": [[1, 1, 1], [0, 0, 0]],
            "size": 2,
            "scale": 3
        }));
        assert!(result.is_err());
    }
}
