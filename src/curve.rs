use std::f32::consts::TAU;

use glam::Vec2;

/// Sample the parametric heart curve at `pieces` steps over `t in [0, 2pi]`.
///
/// The accumulating loop is boundary-inclusive, so the result holds `pieces`
/// or `pieces + 1` points. The y axis is negated so the heart stands upright
/// in the y-down view space.
pub fn heart_curve(pieces: u32) -> Vec<Vec2> {
    let dt = TAU / pieces as f32;
    let mut points = Vec::with_capacity(pieces as usize + 1);

    let mut t = 0.0f32;
    while t <= TAU {
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        points.push(Vec2::new(x, -y));
        t += dt;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_is_deterministic() {
        assert_eq!(heart_curve(110), heart_curve(110));
        assert_eq!(heart_curve(80), heart_curve(80));
    }

    #[test]
    fn test_sample_count_within_one_of_requested() {
        for pieces in [8u32, 80, 110, 333] {
            let len = heart_curve(pieces).len();
            assert!(
                len == pieces as usize || len == pieces as usize + 1,
                "{pieces} pieces produced {len} points"
            );
        }
    }

    #[test]
    fn test_known_samples() {
        let points = heart_curve(4);

        // t = 0: x = 0, y = -(13 - 5 - 2 - 1) = -5
        assert!(points[0].x.abs() < 1e-5);
        assert!((points[0].y + 5.0).abs() < 1e-4);

        // t = pi/2: x = 16, y = -(0 + 5 - 0 - 1) = -4
        assert!((points[1].x - 16.0).abs() < 1e-4);
        assert!((points[1].y + 4.0).abs() < 1e-4);
    }
}
