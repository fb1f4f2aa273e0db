//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::error::{Error, Result};
use crate::params::{FieldSpec, NoiseKind, OrbitParams, PerlinParams, SimplexParams, TextureParams};

/// Default texels per side for 1D and 2D textures
pub const DEFAULT_RESOLUTION: usize = 1024;

/// Default texels per side for 3D textures (64^3 texels)
pub const DEFAULT_RESOLUTION_3D: usize = 64;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "noisetex")]
#[command(about = "Procedural noise texture generator and viewer", long_about = None)]
pub struct Args {
    /// Noise kind: white, perlin (default), simplex, wood
    #[arg(long, value_name = "KIND", default_value = "perlin")]
    pub kind: String,

    /// Texture dimension (1, 2 or 3)
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub dim: usize,

    /// Texels per side [default: 1024, or 64 for 3D]
    #[arg(long, value_name = "TEXELS")]
    pub resolution: Option<usize>,

    /// Lower bound of generated values
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lower: f32,

    /// Upper bound of generated values
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub upper: f32,

    /// Octave count (perlin: whole number, simplex: rounds up)
    #[arg(long)]
    pub octaves: Option<f32>,

    /// Base frequency (perlin)
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Amplitude falloff per octave (perlin, simplex)
    #[arg(long)]
    pub persistence: Option<f64>,

    /// Spatial scale of the first octave (simplex)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Write the texture to a PNG instead of opening a window
    #[arg(long, value_name = "PNG")]
    pub export: Option<PathBuf>,

    /// Distance of the orbit camera from the texture quad
    #[arg(long, value_name = "UNITS", default_value_t = 3.0)]
    pub eye_distance: f64,
}

impl Args {
    /// Parse the noise kind and its parameters
    pub fn noise_kind(&self) -> Result<NoiseKind> {
        match self.kind.to_lowercase().as_str() {
            "white" => Ok(NoiseKind::White),
            "perlin" => {
                let defaults = FieldSpec::default();
                let mut params = match defaults.kind {
                    NoiseKind::Perlin(params) => params,
                    _ => PerlinParams::default(),
                };
                if let Some(octaves) = self.octaves {
                    if octaves < 1.0 || octaves.fract() != 0.0 {
                        return Err(Error::invalid(
                            "octaves",
                            format!("perlin needs a whole number >= 1, got {}", octaves),
                        ));
                    }
                    params.octaves = octaves as usize;
                }
                if let Some(frequency) = self.frequency {
                    params.frequency = frequency;
                }
                if let Some(persistence) = self.persistence {
                    params.persistence = persistence;
                }
                Ok(NoiseKind::Perlin(params))
            }
            "simplex" => {
                let mut params = SimplexParams::default();
                if let Some(octaves) = self.octaves {
                    params.octaves = octaves;
                }
                if let Some(persistence) = self.persistence {
                    params.persistence = persistence as f32;
                }
                if let Some(scale) = self.scale {
                    params.scale = scale;
                }
                Ok(NoiseKind::Simplex(params))
            }
            "wood" => Ok(NoiseKind::Wood),
            other => Err(Error::invalid(
                "kind",
                format!("unknown noise kind `{}` (white, perlin, simplex, wood)", other),
            )),
        }
    }

    /// Texels per side, defaulting to a size that fits in memory
    pub fn resolution(&self) -> usize {
        self.resolution
            .unwrap_or(if self.dim >= 3 { DEFAULT_RESOLUTION_3D } else { DEFAULT_RESOLUTION })
    }

    /// Build the field description from the arguments
    pub fn field_spec(&self) -> Result<FieldSpec> {
        let kind = self.noise_kind()?;
        let resolution = self.resolution();
        info!(
            "Noise: {} {}D at {} texels per side, range [{}, {}]",
            kind.name(),
            self.dim,
            resolution,
            self.lower,
            self.upper
        );
        Ok(FieldSpec {
            kind,
            dimension: self.dim,
            texture: TextureParams {
                lower: self.lower,
                upper: self.upper,
                resolution,
            },
        })
    }

    /// Orbit camera placed `eye_distance` in front of the quad
    pub fn orbit_params(&self) -> Result<OrbitParams> {
        if !self.eye_distance.is_finite() || self.eye_distance <= 0.0 {
            return Err(Error::invalid(
                "eye_distance",
                format!("must be positive, got {}", self.eye_distance),
            ));
        }
        Ok(OrbitParams {
            eye: [0.0, 0.0, self.eye_distance],
            ..OrbitParams::default()
        })
    }
}
