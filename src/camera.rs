//! Free-fly camera: state, input controller, projection and GPU uniform.
//!
//! The camera is driven by three inputs:
//! - keyboard: WASD moves along the front/right axes, Q/E moves vertically,
//!   P toggles between perspective and orthographic projection, Escape asks
//!   the application to close
//! - cursor movement: changes yaw/pitch (mouse-look)
//! - scroll wheel: changes movement speed and field of view
//!
//! Keys are recorded as they arrive and applied once per frame in
//! [`CameraController::update`], scaled by the frame's delta time. Mouse and
//! scroll input are applied to the [`Camera`] immediately.

use std::collections::HashSet;

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3};
use instant::Duration;
use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 10.0;
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 45.0;
/// Speed change per scroll unit. The field of view changes by one degree per unit.
pub const SPEED_PER_SCROLL: f32 = 0.25;
/// Converts touchpad pixel deltas into scroll units.
const PIXELS_PER_LINE: f32 = 40.0;

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
/// Half height of the orthographic view volume.
pub const ORTHO_HALF_HEIGHT: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub fov: Deg<f32>,
    pub movement_speed: f32,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P, yaw: Deg<f32>, pitch: Deg<f32>) -> Self {
        let mut camera = Self {
            position: position.into(),
            front: -Vector3::unit_z(),
            up: Vector3::unit_y(),
            yaw,
            pitch,
            fov: Deg(MAX_FOV),
            movement_speed: 4.0,
        };
        camera.update_front();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(
            config.position,
            Deg(config.yaw_deg),
            Deg(config.pitch_deg),
        );
        camera.fov = Deg(config.fov_deg.clamp(MIN_FOV, MAX_FOV));
        camera.movement_speed = config.movement_speed.clamp(MIN_SPEED, MAX_SPEED);
        camera
    }

    /// Right-handed look-at from the eye towards `position + front`.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Recomputes the unit front vector from yaw and pitch.
    pub fn update_front(&mut self) {
        let (sin_yaw, cos_yaw) = cgmath::Rad::from(self.yaw).0.sin_cos();
        let (sin_pitch, cos_pitch) = cgmath::Rad::from(self.pitch).0.sin_cos();
        self.front = Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
    }

    pub fn right(&self) -> Vector3<f32> {
        self.front.cross(self.up).normalize()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone)]
pub struct Projection {
    pub kind: ProjectionKind,
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            kind: ProjectionKind::Perspective,
            aspect: width as f32 / height.max(1) as f32,
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn toggle(&mut self) -> ProjectionKind {
        self.kind = match self.kind {
            ProjectionKind::Perspective => ProjectionKind::Orthographic,
            ProjectionKind::Orthographic => ProjectionKind::Perspective,
        };
        self.kind
    }

    /// Projection in OpenGL clip-space convention (depth in `[-1, 1]`).
    ///
    /// [`CameraUniform::update_view_proj`] converts it to wgpu's `[0, 1]` depth range.
    pub fn calc_matrix(&self, fov: Deg<f32>) -> Matrix4<f32> {
        match self.kind {
            ProjectionKind::Perspective => cgmath::perspective(fov, self.aspect, self.znear, self.zfar),
            ProjectionKind::Orthographic => {
                let half_width = ORTHO_HALF_HEIGHT * self.aspect;
                cgmath::ortho(
                    -half_width,
                    half_width,
                    -ORTHO_HALF_HEIGHT,
                    ORTHO_HALF_HEIGHT,
                    self.znear,
                    self.zfar,
                )
            }
        }
    }
}

/// Turns raw window input into camera motion.
#[derive(Debug)]
pub struct CameraController {
    sensitivity: f32,
    held: HashSet<KeyCode>,
    last_cursor: Option<(f64, f64)>,
    // Set while P is held so a long press toggles the projection only once.
    projection_latch: bool,
    close_requested: bool,
}

impl CameraController {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            held: HashSet::new(),
            last_cursor: None,
            projection_latch: false,
            close_requested: false,
        }
    }

    /// Feeds a window event to the controller. Returns `true` if it was consumed.
    pub fn handle_window_events(&mut self, camera: &mut Camera, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => self.process_key(*key, *state == ElementState::Pressed),
            WindowEvent::CursorMoved { position, .. } => {
                self.process_mouse(camera, position.x, position.y);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.process_scroll(camera, amount);
                true
            }
            WindowEvent::Focused(false) => {
                self.held.clear();
                false
            }
            _ => false,
        }
    }

    /// Records the press state of a key. Returns `true` for keys the camera reacts to.
    pub fn process_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let relevant = matches!(
            key,
            KeyCode::KeyW
                | KeyCode::KeyA
                | KeyCode::KeyS
                | KeyCode::KeyD
                | KeyCode::KeyQ
                | KeyCode::KeyE
                | KeyCode::KeyP
                | KeyCode::Escape
        );
        if !relevant {
            return false;
        }
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
        true
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Mouse-look from an absolute cursor position.
    ///
    /// The first sample only seeds the reference position.
    pub fn process_mouse(&mut self, camera: &mut Camera, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return;
        };
        let dx = (x - last_x) as f32 * self.sensitivity;
        // Window y grows downwards, pitch grows upwards.
        let dy = (last_y - y) as f32 * self.sensitivity;

        camera.yaw = Deg(camera.yaw.0 + dx);
        camera.pitch = Deg((camera.pitch.0 + dy).clamp(-PITCH_LIMIT, PITCH_LIMIT));
        camera.update_front();
    }

    pub fn process_scroll(&mut self, camera: &mut Camera, amount: f32) {
        camera.movement_speed =
            (camera.movement_speed + amount * SPEED_PER_SCROLL).clamp(MIN_SPEED, MAX_SPEED);
        camera.fov = Deg((camera.fov.0 - amount).clamp(MIN_FOV, MAX_FOV));
    }

    /// Applies held keys for one frame.
    pub fn update(&mut self, camera: &mut Camera, projection: &mut Projection, dt: Duration) {
        if self.is_held(KeyCode::Escape) {
            self.close_requested = true;
        }

        let velocity = camera.movement_speed * dt.as_secs_f32();
        let right = camera.right();
        if self.is_held(KeyCode::KeyW) {
            camera.position = camera.position + camera.front * velocity;
        }
        if self.is_held(KeyCode::KeyS) {
            camera.position = camera.position - camera.front * velocity;
        }
        if self.is_held(KeyCode::KeyA) {
            camera.position = camera.position - right * velocity;
        }
        if self.is_held(KeyCode::KeyD) {
            camera.position = camera.position + right * velocity;
        }
        if self.is_held(KeyCode::KeyQ) {
            camera.position.y += velocity;
        }
        if self.is_held(KeyCode::KeyE) {
            camera.position.y -= velocity;
        }

        if self.is_held(KeyCode::KeyP) {
            if !self.projection_latch {
                self.projection_latch = true;
                match projection.toggle() {
                    ProjectionKind::Orthographic => log::info!("Switched to Orthographic Projection"),
                    ProjectionKind::Perspective => log::info!("Switched to Perspective Projection"),
                }
            }
        } else {
            self.projection_latch = false;
        }
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

/// Camera data as laid out in the shader's `CameraUniform` struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    // w is unused, vec3 needs 16 byte alignment
    pub view_position: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
            view_position: [0.0; 4],
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view = camera.calc_matrix().into();
        self.projection = (OPENGL_TO_WGPU_MATRIX * projection.calc_matrix(camera.fov)).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the GPU context keeps for the camera.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}
