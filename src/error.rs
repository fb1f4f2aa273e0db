//! Error taxonomy shared by the noise, camera and rendering layers.

use thiserror::Error;

/// Errors raised while configuring or realising a noise texture.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter is outside the range the field can work with
    /// (resolution < 2, inverted bounds, zero octaves, bad data length...).
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A noise kind was requested at a dimension it has no sampler for.
    #[error("{kind} noise is not defined for {dimension}D textures")]
    UnsupportedDimension { kind: &'static str, dimension: usize },

    /// GPU adapter, device or surface could not be acquired.
    #[error("graphics resource error: {0}")]
    Resource(String),

    #[error("failed to export texture: {0}")]
    Export(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject texture dimensions other than 1, 2 or 3.
pub fn check_dimension(dimension: usize) -> Result<()> {
    if (1..=3).contains(&dimension) {
        Ok(())
    } else {
        Err(Error::invalid(
            "dimension",
            format!("expected 1, 2 or 3, got {}", dimension),
        ))
    }
}
