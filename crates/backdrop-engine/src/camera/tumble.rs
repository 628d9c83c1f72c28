use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Tumble phase `t` for a wall-clock reading in milliseconds.
///
/// Kept in `f64`: epoch milliseconds do not survive a round-trip through `f32`.
#[inline]
pub fn tumble_phase(wall_clock_ms: f64, period_ms: f64) -> f64 {
    wall_clock_ms / period_ms
}

/// Precessing rotation axis `(sin t, cos t, 0)`. Always unit length.
pub fn tumble_axis(phase: f64) -> Vec3 {
    let (sin, cos) = phase.sin_cos();
    Vec3::new(sin as f32, cos as f32, 0.0)
}

/// View matrix: pull back along -Z, then rotate about the precessing axis.
pub fn view_matrix(camera: &CameraConfig, phase: f64) -> Mat4 {
    let mut view = Mat4::IDENTITY;
    view *= Mat4::from_translation(Vec3::new(0.0, 0.0, -camera.distance));
    view *= Mat4::from_axis_angle(tumble_axis(phase), camera.tumble_angle);
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn axis_at_phase_zero_points_up() {
        let axis = tumble_axis(0.0);
        assert!((axis - Vec3::Y).length() < EPS);
    }

    #[test]
    fn axis_is_unit_length_for_any_phase() {
        for i in -200..200 {
            let phase = i as f64 * 0.173;
            assert!((tumble_axis(phase).length() - 1.0).abs() < EPS);
        }
        // A realistic epoch reading.
        let phase = tumble_phase(1_760_000_000_000.0, 2000.0);
        assert!((tumble_axis(phase).length() - 1.0).abs() < EPS);
    }

    #[test]
    fn phase_is_monotonic_in_wall_clock() {
        let mut last = f64::MIN;
        for ms in [0.0, 1.0, 16.6, 2000.0, 1_760_000_000_000.0, 1_760_000_000_016.0] {
            let t = tumble_phase(ms, 2000.0);
            assert!(t >= last);
            last = t;
        }
        assert_eq!(tumble_phase(2000.0, 2000.0), 1.0);
    }

    #[test]
    fn view_at_phase_zero_rotates_one_radian_about_y() {
        let camera = CameraConfig::default();
        let view = view_matrix(&camera, 0.0);
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)) * Mat4::from_rotation_y(1.0);
        assert!(view.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn origin_lands_five_units_in_front_of_camera() {
        let camera = CameraConfig::default();
        for phase in [0.0, 0.5, 2.0, 10.0] {
            let p = view_matrix(&camera, phase).transform_point3(Vec3::ZERO);
            assert!((p - Vec3::new(0.0, 0.0, -5.0)).length() < EPS);
        }
    }

    #[test]
    fn rotation_preserves_distance_from_origin() {
        let camera = CameraConfig::default();
        let view = view_matrix(&camera, 1.234);
        let p = view.transform_point3(Vec3::new(1.0, 1.0, 1.0)) - Vec3::new(0.0, 0.0, -5.0);
        assert!((p.length() - 3.0_f32.sqrt()).abs() < EPS);
    }
}
