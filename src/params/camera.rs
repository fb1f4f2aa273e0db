//! Camera configuration and presets.

/// Perspective projection shared by every camera
#[derive(Debug, Clone)]
pub struct ProjectionParams {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

/// Orbit (trackball) camera parameters
#[derive(Debug, Clone)]
pub struct OrbitParams {
    /// Radians of yaw/pitch (and units of zoom) per pixel of mouse travel
    pub sensitivity: f64,

    /// Initial distance multiplier on the eye-to-target offset, within [0, 10]
    pub zoom: f64,

    /// Base eye position before yaw/pitch/zoom are applied
    pub eye: [f64; 3],

    /// Orbit centre
    pub target: [f64; 3],

    pub projection: ProjectionParams,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            sensitivity: 0.01,
            zoom: 1.0,
            eye: [0.0, 0.0, 1.0],
            target: [0.0, 0.0, 0.0],
            projection: ProjectionParams::default(),
        }
    }
}

/// Stationary viewpoint (no mouse interaction)
#[derive(Debug, Clone)]
pub struct FixedViewpoint {
    /// Camera position
    pub eye: [f32; 3],

    /// Look-at target
    pub target: [f32; 3],

    pub projection: ProjectionParams,
}

impl Default for FixedViewpoint {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 2.0],
            target: [0.0, 0.0, 0.0],
            projection: ProjectionParams::default(),
        }
    }
}
