//! Planar geometry over landmark coordinates.

use crate::landmarks::Landmark;

/// Angle reported for a jaw contour whose rays collapse to a point.
/// Reads as a soft, rounded jaw.
pub const DEGENERATE_ANGLE_DEG: f64 = 150.0;

/// Euclidean distance in the image plane. Depth is ignored.
pub fn distance(p1: &Landmark, p2: &Landmark) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle in degrees at vertex `b` between the rays `b -> a` and `b -> c`.
///
/// Returns [`DEGENERATE_ANGLE_DEG`] when either ray has zero length.
pub fn angle_at_vertex(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let (bax, bay) = (a.x - b.x, a.y - b.y);
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);

    let mag_ba = (bax * bax + bay * bay).sqrt();
    let mag_bc = (bcx * bcx + bcy * bcy).sqrt();
    if mag_ba == 0.0 || mag_bc == 0.0 {
        return DEGENERATE_ANGLE_DEG;
    }

    // Float overshoot past +-1 would make acos return NaN
    let cos = ((bax * bcx + bay * bcy) / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Round half up, i.e. `floor(x + 0.5)`. `2.5 -> 3`, `-2.5 -> -2`.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Landmark {
        Landmark::new(x, y, 0.0)
    }

    #[test]
    fn distance_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 5.0);
        let b = Landmark::new(3.0, 4.0, -2.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_propagates_nan() {
        let a = p(f64::NAN, 0.0);
        assert!(distance(&a, &p(1.0, 1.0)).is_nan());
    }

    #[test]
    fn right_and_straight_angles() {
        let right = angle_at_vertex(&p(1.0, 0.0), &p(0.0, 0.0), &p(0.0, 1.0));
        assert!((right - 90.0).abs() < 1e-9);

        let straight = angle_at_vertex(&p(-1.0, 0.0), &p(0.0, 0.0), &p(1.0, 0.0));
        assert!((straight - 180.0).abs() < 1e-9);

        let folded = angle_at_vertex(&p(2.0, 0.0), &p(0.0, 0.0), &p(1.0, 0.0));
        assert!(folded.abs() < 1e-6);
    }

    #[test]
    fn zero_length_ray_falls_back() {
        let b = p(0.3, 0.3);
        assert_eq!(angle_at_vertex(&b, &b, &p(0.9, 0.1)), DEGENERATE_ANGLE_DEG);
        assert_eq!(angle_at_vertex(&p(-4.0, 7.0), &b, &b), DEGENERATE_ANGLE_DEG);
        assert_eq!(angle_at_vertex(&b, &b, &b), DEGENERATE_ANGLE_DEG);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(23.5), 24.0);
        assert_eq!(round_half_up(33.0), 33.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
    }
}
