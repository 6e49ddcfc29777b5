use axis_viewer::camera::RADIUS_MIN;
use axis_viewer::ViewerConfig;
use axis_viewer::projection::vertical_fov_degrees;
use axis_viewer::{
    build_projection, build_view, CameraController, ProjectionParams, RotateDirection,
    ViewProjection, ZoomDirection,
};
use glam::{Vec3, Vec4};

#[cfg(test)]
mod projection_tests {
    use super::*;

    #[test]
    fn test_fov_recovered_for_wide_aspect() {
        let params = ProjectionParams::new(40.0, 16.0 / 9.0, 0.1, 100.0);
        let projection = build_projection(&params);

        assert!((vertical_fov_degrees(&projection) - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_aspect_scales_horizontal_only() {
        let wide = build_projection(&ProjectionParams::new(40.0, 2.0, 0.1, 100.0));
        let square = build_projection(&ProjectionParams::new(40.0, 1.0, 0.1, 100.0));

        assert!((wide.x_axis.x * 2.0 - square.x_axis.x).abs() < 1e-5);
        assert_eq!(wide.y_axis.y, square.y_axis.y);
    }

    #[test]
    fn test_resize_changes_next_projection() {
        let mut params = ProjectionParams::new(40.0, 16.0 / 9.0, 0.1, 100.0);
        let before = build_projection(&params);

        params.set_viewport(1000, 1000);
        let after = build_projection(&params);

        assert_ne!(before, after);
        assert!((after.x_axis.x - after.y_axis.y).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = CameraController::default();
        let frame = ViewProjection::for_frame(&camera.current_pose(), &ProjectionParams::default());

        let clip = frame.combined() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_positive_y_axis_appears_above_centre() {
        let camera = CameraController::default();
        let frame = ViewProjection::for_frame(&camera.current_pose(), &ProjectionParams::default());

        let clip = frame.combined() * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert!(clip.y / clip.w > 0.0);
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;

    #[test]
    fn test_view_is_finite_everywhere_in_orbit() {
        let mut camera = CameraController::default();
        for _ in 0..200 {
            camera.apply_rotation(RotateDirection::Up, 0.05);
            camera.apply_rotation(RotateDirection::Right, 0.11);
            let view = build_view(&camera.current_pose());
            assert!(view.is_finite());
        }
        for _ in 0..400 {
            camera.apply_rotation(RotateDirection::Down, 0.05);
            let view = build_view(&camera.current_pose());
            assert!(view.is_finite());
        }
    }

    #[test]
    fn test_view_at_min_radius_is_finite() {
        let mut camera = CameraController::default();
        camera.apply_zoom(ZoomDirection::In, 1000.0);

        let pose = camera.current_pose();
        assert!(((pose.position - pose.focus).length() - RADIUS_MIN).abs() < 1e-6);
        assert!(build_view(&pose).is_finite());
    }

    #[test]
    fn test_side_up_hint_cannot_reach_degenerate_view() {
        let mut config = ViewerConfig::default();
        config.camera.position = [10.0, 0.0, 0.0];
        config.camera.up = [0.0, 0.0, 1.0];
        config.camera.rotation_step = std::f32::consts::FRAC_PI_2;
        assert!(config.validate().is_err());

        let mut camera = CameraController::from_config(&config.camera);
        camera.apply_rotation(RotateDirection::Left, std::f32::consts::FRAC_PI_2);

        let pose = camera.current_pose();
        assert_eq!(pose.up, Vec3::Y);
        assert!(build_view(&pose).is_finite());
    }

    #[test]
    fn test_view_keeps_world_up_on_screen_up() {
        let mut camera = CameraController::default();
        camera.apply_rotation(RotateDirection::Right, 1.2);
        camera.apply_rotation(RotateDirection::Up, 0.4);

        let view = build_view(&camera.current_pose());
        let up_in_view = view.transform_vector3(Vec3::Y);
        assert!(up_in_view.y > 0.0);
        assert!(up_in_view.x.abs() < 1e-5);
    }

    #[test]
    fn test_frames_rebuilt_after_input() {
        let mut camera = CameraController::default();
        let params = ProjectionParams::default();
        let before = ViewProjection::for_frame(&camera.current_pose(), &params);

        camera.apply_rotation(RotateDirection::Left, 0.05);
        let after = ViewProjection::for_frame(&camera.current_pose(), &params);

        assert_ne!(before.view, after.view);
        assert_eq!(before.projection, after.projection);
    }
}
