//! Rendering and camera configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Orbit camera settings
#[derive(Debug, Clone)]
pub struct OrbitCameraConfig {
    /// Initial eye position
    pub position: [f32; 3],

    /// Orbit center
    pub target: [f32; 3],

    /// Fraction of pending motion applied per frame (0 = frozen, 1 = no damping)
    pub damping_factor: f32,

    /// Radians of orbit per pixel dragged
    pub rotate_speed: f32,

    /// Distance scale per wheel line
    pub zoom_step: f32,

    /// Closest allowed eye distance
    pub min_distance: f32,

    /// Farthest allowed eye distance
    pub max_distance: f32,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            position: [3.0, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
            damping_factor: 0.05,
            rotate_speed: 0.005,
            zoom_step: 0.95,
            min_distance: 0.5,
            max_distance: 60.0,
        }
    }
}
