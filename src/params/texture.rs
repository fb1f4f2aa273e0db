//! Noise texture configuration.

/// Lattice size and output range shared by every noise kind
#[derive(Debug, Clone)]
pub struct TextureParams {
    /// Lower bound of the generated values
    pub lower: f32,

    /// Upper bound of the generated values (must be >= lower)
    pub upper: f32,

    /// Texels per side (identical on every axis, must be >= 2)
    pub resolution: usize,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            resolution: 64,
        }
    }
}

/// Fractal Perlin noise parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PerlinParams {
    /// Number of summed noise layers
    pub octaves: usize,

    /// Frequency of the first octave (cycles per unit texture coordinate)
    pub frequency: f64,

    /// Amplitude falloff between successive octaves
    pub persistence: f64,
}

impl Default for PerlinParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            frequency: 1.0,
            persistence: 0.5,
        }
    }
}

/// Octave simplex noise parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexParams {
    /// Number of summed layers; a fractional count rounds up
    pub octaves: f32,

    /// Amplitude falloff between successive octaves
    pub persistence: f32,

    /// Spatial scale of the first octave
    pub scale: f32,
}

impl Default for SimplexParams {
    fn default() -> Self {
        Self {
            octaves: 4.0,
            persistence: 0.5,
            scale: 1.0,
        }
    }
}

/// Noise source selection
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseKind {
    /// Seeded uniform random values, drawn in lattice order
    White,

    /// Fractal Perlin noise
    Perlin(PerlinParams),

    /// Octave simplex noise
    Simplex(SimplexParams),

    /// Fixed wood-grain pipeline (rings + grain + turbulence)
    Wood,
}

impl NoiseKind {
    pub fn name(&self) -> &'static str {
        match self {
            NoiseKind::White => "white",
            NoiseKind::Perlin(_) => "perlin",
            NoiseKind::Simplex(_) => "simplex",
            NoiseKind::Wood => "wood",
        }
    }
}

/// Everything needed to build one noise texture at runtime
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub kind: NoiseKind,

    /// Texture dimension (1, 2 or 3)
    pub dimension: usize,

    pub texture: TextureParams,
}

impl Default for FieldSpec {
    /// The noise demo's teapot texture
    fn default() -> Self {
        Self {
            kind: NoiseKind::Perlin(PerlinParams {
                octaves: 12,
                frequency: 10.0,
                persistence: 0.5,
            }),
            dimension: 2,
            texture: TextureParams {
                resolution: 1024,
                ..TextureParams::default()
            },
        }
    }
}
