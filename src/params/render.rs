//! Window and presentation configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Background colour (linear RGBA)
    pub clear_color: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            clear_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
