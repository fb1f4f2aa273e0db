//! Interactive cameras producing view and projection matrices.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DMat3, DVec3, Mat4, Vec3};
use log::debug;

use crate::params::{FixedViewpoint, OrbitParams, ProjectionParams};

/// Zoom is kept within this range
pub const ZOOM_RANGE: (f64, f64) = (0.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

/// Input and matrix interface shared by every camera.
///
/// Call [`Camera::update`] once per frame before reading the matrices.
pub trait Camera {
    /// Track the new window size (affects the aspect ratio)
    fn resize(&mut self, width: u32, height: u32);

    fn update(&mut self);

    fn handle_key(&mut self, _key: u32, _is_press: bool) {}

    fn handle_mouse_move(&mut self, _x: f64, _y: f64) {}

    fn handle_mouse_button(&mut self, _x: f64, _y: f64, _button: MouseButton, _action: ButtonAction) {}

    fn set_initial_mouse_pos(&mut self, _x: f64, _y: f64) {}

    fn view_matrix(&self) -> Mat4;

    fn proj_matrix(&self) -> Mat4;
}

fn perspective(projection: &ProjectionParams, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        projection.fov_degrees.to_radians(),
        aspect,
        projection.near_plane,
        projection.far_plane,
    )
}

/// Wrap an angle into (-pi, pi].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// World up, unless the view looks straight along it (pitch at +-pi/2).
/// Then the orbit's own rotated up axis is used instead.
fn up_vector(forward: DVec3, rotation: DMat3) -> DVec3 {
    let min_sin = 1e-6 * forward.length();
    [DVec3::Y, rotation * DVec3::Y, rotation * DVec3::Z]
        .into_iter()
        .find(|up| forward.cross(*up).length() > min_sin)
        .unwrap_or(DVec3::Y)
}

/// What a mouse drag currently does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackballState {
    Passive,
    Rotating,
    Zooming,
}

/// Trackball camera orbiting a target.
///
/// Dragging with the left button changes yaw (horizontal travel) and pitch
/// (vertical travel) relative to the angles at the start of the drag.
/// Dragging with the right button scales the eye distance. Matrices are
/// rebuilt lazily in [`Camera::update`].
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    state: TrackballState,
    yaw: f64,
    pitch: f64,
    zoom: f64,
    sensitivity: f64,
    last_yaw: f64,
    last_pitch: f64,
    last_x: f64,
    last_y: f64,
    target: DVec3,
    eye: DVec3,
    transformed_eye: DVec3,
    projection: ProjectionParams,
    aspect: f32,
    view: Mat4,
    proj: Mat4,
    dirty: bool,
}

impl OrbitCamera {
    pub fn new(params: &OrbitParams) -> Self {
        let eye = DVec3::from_array(params.eye);
        Self {
            state: TrackballState::Passive,
            yaw: 0.0,
            pitch: 0.0,
            zoom: params.zoom.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1),
            sensitivity: params.sensitivity,
            last_yaw: 0.0,
            last_pitch: 0.0,
            last_x: 0.0,
            last_y: 0.0,
            target: DVec3::from_array(params.target),
            eye,
            transformed_eye: eye,
            projection: params.projection.clone(),
            aspect: 1.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn set_target(&mut self, target: DVec3) {
        self.target = target;
        self.dirty = true;
    }

    pub fn set_eye(&mut self, eye: DVec3) {
        self.eye = eye;
        self.dirty = true;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
        self.dirty = true;
    }

    /// Force the next update to rebuild both matrices (e.g. after a resize)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.sensitivity = sensitivity;
    }

    pub fn state(&self) -> TrackballState {
        self.state
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn last_yaw(&self) -> f64 {
        self.last_yaw
    }

    pub fn last_pitch(&self) -> f64 {
        self.last_pitch
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn target(&self) -> Vec3 {
        self.target.as_vec3()
    }

    /// Eye position after the last update (yaw, pitch and zoom applied)
    pub fn transformed_eye(&self) -> Vec3 {
        self.transformed_eye.as_vec3()
    }

    fn mouse_rotate(&mut self, x: f64, y: f64) {
        self.yaw = wrap_angle(self.last_yaw + (self.last_x - x) * self.sensitivity);
        self.pitch = (self.last_pitch + (self.last_y - y) * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    fn mouse_zoom(&mut self, y: f64) {
        self.zoom = (self.zoom + (y - self.last_y) * self.sensitivity).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
        self.last_y = y;
    }

    fn release(&mut self) {
        self.state = TrackballState::Passive;
        self.last_yaw = self.yaw;
        self.last_pitch = self.pitch;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&OrbitParams::default())
    }
}

impl Camera for OrbitCamera {
    /// Updates the aspect ratio only; the projection is rebuilt on the next
    /// update that finds the camera dirty.
    fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            debug!("ignoring resize to zero height");
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    fn update(&mut self) {
        if !self.dirty {
            return;
        }

        self.proj = perspective(&self.projection, self.aspect);

        let rotation = DMat3::from_axis_angle(DVec3::Y, self.yaw) * DMat3::from_axis_angle(DVec3::X, self.pitch);
        self.transformed_eye = rotation * (self.zoom * (self.eye - self.target)) + self.target;
        let up = up_vector(self.target - self.transformed_eye, rotation);
        self.view = Mat4::look_at_rh(self.transformed_eye.as_vec3(), self.target.as_vec3(), up.as_vec3());

        self.dirty = false;
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        match self.state {
            TrackballState::Rotating => self.mouse_rotate(x, y),
            TrackballState::Zooming => self.mouse_zoom(y),
            TrackballState::Passive => {}
        }
        self.dirty = true;
    }

    fn handle_mouse_button(&mut self, x: f64, y: f64, button: MouseButton, action: ButtonAction) {
        match (self.state, button, action) {
            (TrackballState::Passive, _, ButtonAction::Press) => {
                self.last_x = x;
                self.last_y = y;
                match button {
                    MouseButton::Left => self.state = TrackballState::Rotating,
                    MouseButton::Right => self.state = TrackballState::Zooming,
                    _ => {}
                }
            }
            (TrackballState::Rotating, MouseButton::Left, ButtonAction::Release)
            | (TrackballState::Zooming, MouseButton::Right, ButtonAction::Release) => self.release(),
            _ => {}
        }
    }

    fn set_initial_mouse_pos(&mut self, x: f64, y: f64) {
        self.last_x = x;
        self.last_y = y;
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn proj_matrix(&self) -> Mat4 {
        self.proj
    }
}

/// Stationary camera looking from `eye` at `target`.
#[derive(Debug, Clone)]
pub struct FixedCamera {
    eye: Vec3,
    target: Vec3,
    projection: ProjectionParams,
    aspect: f32,
    view: Mat4,
    proj: Mat4,
}

impl FixedCamera {
    pub fn new(viewpoint: &FixedViewpoint) -> Self {
        Self {
            eye: Vec3::from_array(viewpoint.eye),
            target: Vec3::from_array(viewpoint.target),
            projection: viewpoint.projection.clone(),
            aspect: 1.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        }
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }
}

impl Camera for FixedCamera {
    fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    fn update(&mut self) {
        self.proj = perspective(&self.projection, self.aspect);
        self.view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn proj_matrix(&self) -> Mat4 {
        self.proj
    }
}
