use std::time::Duration;

use cgmath::{Deg, Matrix4, Point3, Vector3};
use shape_viewer::{
    camera::{
        Camera, CameraController, CameraUniform, MAX_FOV, MAX_SPEED, MIN_FOV, MIN_SPEED,
        OPENGL_TO_WGPU_MATRIX, PITCH_LIMIT, Projection, ProjectionKind,
    },
    config::CameraConfig,
};
use winit::keyboard::KeyCode;

use crate::common::test_utils::{assert_close, assert_matrix_close};

mod common;

fn setup() -> (Camera, CameraController, Projection) {
    let config = CameraConfig::default();
    (
        Camera::from_config(&config),
        CameraController::new(config.mouse_sensitivity),
        Projection::new(800, 600),
    )
}

#[test]
fn starts_at_configured_position_looking_down_negative_z() {
    let (camera, _, _) = setup();
    assert_eq!(camera.position, Point3::new(0.0, 2.0, 10.0));
    assert_close(camera.front.x, 0.0);
    assert_close(camera.front.y, 0.0);
    assert_close(camera.front.z, -1.0);
    assert_eq!(camera.fov, Deg(45.0));
    assert_eq!(camera.movement_speed, 4.0);
}

#[test]
fn view_matrix_matches_look_at() {
    let (mut camera, mut controller, mut projection) = setup();
    camera.front = Vector3::new(0.0, 0.0, -1.0);
    controller.update(&mut camera, &mut projection, Duration::ZERO);

    let expected = Matrix4::look_at_rh(
        Point3::new(0.0, 2.0, 10.0),
        Point3::new(0.0, 2.0, 9.0),
        Vector3::unit_y(),
    );
    assert_eq!(camera.calc_matrix(), expected);
}

#[test]
fn first_mouse_sample_only_seeds() {
    let (mut camera, mut controller, _) = setup();
    let (yaw, pitch) = (camera.yaw, camera.pitch);
    controller.process_mouse(&mut camera, 400.0, 300.0);
    assert_eq!(camera.yaw, yaw);
    assert_eq!(camera.pitch, pitch);
}

#[test]
fn mouse_delta_is_scaled_by_sensitivity() {
    let (mut camera, mut controller, _) = setup();
    controller.process_mouse(&mut camera, 400.0, 300.0);
    let (yaw, pitch) = (camera.yaw.0, camera.pitch.0);

    controller.process_mouse(&mut camera, 410.0, 295.0);
    assert_close(camera.yaw.0 - yaw, 10.0 * 0.12);
    assert_close(camera.pitch.0 - pitch, 5.0 * 0.12);

    // Front follows the new angles.
    let yaw = cgmath::Rad::from(camera.yaw).0;
    let pitch = cgmath::Rad::from(camera.pitch).0;
    assert_close(camera.front.x, yaw.cos() * pitch.cos());
    assert_close(camera.front.y, pitch.sin());
    assert_close(camera.front.z, yaw.sin() * pitch.cos());
}

#[test]
fn pitch_stays_within_limits() {
    let (mut camera, mut controller, _) = setup();
    controller.process_mouse(&mut camera, 0.0, 0.0);
    for step in 1..50 {
        controller.process_mouse(&mut camera, 0.0, -1000.0 * step as f64);
        assert!(camera.pitch.0 <= PITCH_LIMIT);
    }
    assert_eq!(camera.pitch.0, PITCH_LIMIT);

    controller.process_mouse(&mut camera, 0.0, 1.0e6);
    assert_eq!(camera.pitch.0, -PITCH_LIMIT);
}

#[test]
fn scroll_clamps_speed_and_fov() {
    let (mut camera, mut controller, _) = setup();

    controller.process_scroll(&mut camera, 1.0);
    assert_close(camera.movement_speed, 4.25);
    assert_close(camera.fov.0, 44.0);

    for _ in 0..200 {
        controller.process_scroll(&mut camera, 1.0);
    }
    assert_eq!(camera.movement_speed, MAX_SPEED);
    assert_eq!(camera.fov.0, MIN_FOV);

    for _ in 0..200 {
        controller.process_scroll(&mut camera, -3.0);
    }
    assert_eq!(camera.movement_speed, MIN_SPEED);
    assert_eq!(camera.fov.0, MAX_FOV);
}

#[test]
fn projection_toggles_once_per_press() {
    let (mut camera, mut controller, mut projection) = setup();
    let dt = Duration::from_millis(16);
    assert_eq!(projection.kind, ProjectionKind::Perspective);

    controller.process_key(KeyCode::KeyP, true);
    controller.update(&mut camera, &mut projection, dt);
    assert_eq!(projection.kind, ProjectionKind::Orthographic);

    // held across several frames
    for _ in 0..5 {
        controller.update(&mut camera, &mut projection, dt);
    }
    assert_eq!(projection.kind, ProjectionKind::Orthographic);

    controller.process_key(KeyCode::KeyP, false);
    controller.update(&mut camera, &mut projection, dt);
    controller.process_key(KeyCode::KeyP, true);
    controller.update(&mut camera, &mut projection, dt);
    assert_eq!(projection.kind, ProjectionKind::Perspective);
}

#[test]
fn escape_requests_close() {
    let (mut camera, mut controller, mut projection) = setup();
    assert!(!controller.close_requested());
    assert!(controller.process_key(KeyCode::Escape, true));
    controller.update(&mut camera, &mut projection, Duration::ZERO);
    assert!(controller.close_requested());
}

#[test]
fn unrelated_keys_are_ignored() {
    let (_, mut controller, _) = setup();
    assert!(!controller.process_key(KeyCode::KeyZ, true));
    assert!(!controller.is_held(KeyCode::KeyZ));
}

#[test]
fn movement_scales_with_speed_and_delta_time() {
    let (mut camera, mut controller, mut projection) = setup();
    let half_second = Duration::from_millis(500);

    controller.process_key(KeyCode::KeyW, true);
    controller.update(&mut camera, &mut projection, half_second);
    assert_close(camera.position.z, 8.0);
    controller.process_key(KeyCode::KeyW, false);

    controller.process_key(KeyCode::KeyD, true);
    controller.update(&mut camera, &mut projection, half_second);
    assert_close(camera.position.x, 2.0);
    controller.process_key(KeyCode::KeyD, false);

    controller.process_key(KeyCode::KeyQ, true);
    controller.update(&mut camera, &mut projection, half_second);
    assert_close(camera.position.y, 4.0);
    controller.process_key(KeyCode::KeyQ, false);

    controller.process_key(KeyCode::KeyE, true);
    controller.update(&mut camera, &mut projection, Duration::from_secs(1));
    assert_close(camera.position.y, 0.0);
}

#[test]
fn projection_matrices_follow_kind() {
    let (camera, _, mut projection) = setup();
    let aspect: f32 = 800.0 / 600.0;

    assert_matrix_close(
        projection.calc_matrix(camera.fov),
        cgmath::perspective(Deg(45.0_f32), aspect, 0.1, 100.0),
    );

    projection.toggle();
    assert_matrix_close(
        projection.calc_matrix(camera.fov),
        cgmath::ortho(-10.0 * aspect, 10.0 * aspect, -10.0, 10.0, 0.1, 100.0),
    );
}

#[test]
fn resize_updates_aspect() {
    let mut projection = Projection::new(800, 600);
    projection.resize(1000, 500);
    assert_close(projection.aspect(), 2.0);
}

#[test]
fn uniform_holds_wgpu_projection() {
    let (camera, _, projection) = setup();
    let mut uniform = CameraUniform::new();
    uniform.update_view_proj(&camera, &projection);

    let expected: [[f32; 4]; 4] = (OPENGL_TO_WGPU_MATRIX * projection.calc_matrix(camera.fov)).into();
    assert_eq!(uniform.projection, expected);
    assert_eq!(uniform.view_position, [0.0, 2.0, 10.0, 1.0]);
}
