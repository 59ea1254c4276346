//! Damped orbit camera around the galaxy center.

use glam::{Mat4, Vec3};

use crate::params::{OrbitCameraConfig, RenderConfig};

/// Keeps polar angle away from the poles so `look_at` stays well defined
const POLAR_EPSILON: f32 = 1e-3;

/// Orbit camera with damped rotate and zoom.
///
/// Input adds pending motion; every [`update`](Self::update) applies a
/// `damping_factor` share of it, so the view keeps gliding after the mouse
/// stops.
pub struct OrbitCamera {
    config: OrbitCameraConfig,
    target: Vec3,
    /// Angle around the Y axis (radians)
    azimuth: f32,
    /// Angle from the +Y axis (radians)
    polar: f32,
    distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
}

impl OrbitCamera {
    pub fn new(config: OrbitCameraConfig) -> Self {
        let target = Vec3::from_array(config.target);
        let offset = Vec3::from_array(config.position) - target;
        let distance = offset
            .length()
            .clamp(config.min_distance, config.max_distance);
        let polar = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos();
        let azimuth = offset.x.atan2(offset.z);

        Self {
            config,
            target,
            azimuth,
            polar,
            distance,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 1.0,
        }
    }

    /// Queue an orbit from a mouse drag of `(dx, dy)` pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_azimuth -= dx * self.config.rotate_speed;
        self.pending_polar -= dy * self.config.rotate_speed;
    }

    /// Queue a zoom of `lines` wheel notches (positive = closer)
    pub fn zoom(&mut self, lines: f32) {
        self.pending_zoom *= self.config.zoom_step.powf(lines);
    }

    /// Apply a damped share of pending motion
    pub fn update(&mut self) {
        let damping = self.config.damping_factor;

        self.azimuth += self.pending_azimuth * damping;
        self.polar = (self.polar + self.pending_polar * damping)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;

        let zoom_now = self.pending_zoom.powf(damping);
        self.distance = (self.distance * zoom_now)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.pending_zoom /= zoom_now;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.distance * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let eye = self.eye();
        let view = Mat4::look_at_rh(eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * view, eye)
    }
}
