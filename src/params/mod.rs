//! Parameter definitions with documented units and defaults.
//!
//! Demo defaults live here with:
//! - Units (radians, degrees, pixels, texels)
//! - Documented ranges and meanings
//! - Validation at the point a parameter turns into a live object

mod camera;
mod render;
mod texture;

// Re-export all types
pub use camera::{FixedViewpoint, OrbitParams, ProjectionParams};
pub use render::RenderConfig;
pub use texture::{FieldSpec, NoiseKind, PerlinParams, SimplexParams, TextureParams};
