//! Texture upload boundary.
//!
//! Noise fields hand their texels to a [`TextureUploader`] and keep only the
//! returned handle. The wgpu renderer is one implementation; the
//! [`MemoryUploader`] keeps texels on the CPU for export and tests.

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};

/// Values stored per texel (RGB)
pub const CHANNELS: usize = 3;

/// Opaque id of an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureDimension {
    D1,
    D2,
    D3,
}

impl TextureDimension {
    pub fn from_rank(rank: usize) -> Result<Self> {
        match rank {
            1 => Ok(Self::D1),
            2 => Ok(Self::D2),
            3 => Ok(Self::D3),
            other => Err(Error::invalid(
                "dimension",
                format!("expected 1, 2 or 3, got {}", other),
            )),
        }
    }

    pub fn rank(self) -> usize {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Three 32-bit float channels
    Rgb32Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Linear,
    Nearest,
}

/// Storage shape and sampling state of one texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor {
    pub dimension: TextureDimension,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub format: PixelFormat,
    pub wrap: WrapMode,
    pub filter: FilterMode,
}

impl TextureDescriptor {
    /// Cube of `resolution` texels per side, repeating and linearly filtered.
    pub fn noise(dimension: TextureDimension, resolution: u32) -> Self {
        let (height, depth) = match dimension {
            TextureDimension::D1 => (1, 1),
            TextureDimension::D2 => (resolution, 1),
            TextureDimension::D3 => (resolution, resolution),
        };
        Self {
            dimension,
            width: resolution,
            height,
            depth,
            format: PixelFormat::Rgb32Float,
            wrap: WrapMode::Repeat,
            filter: FilterMode::Linear,
        }
    }

    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Number of floats a full upload must carry.
    pub fn value_count(&self) -> usize {
        self.texel_count() * CHANNELS
    }

    pub(crate) fn check_data(&self, data: Option<&[f32]>) -> Result<()> {
        match data {
            Some(values) if values.len() != self.value_count() => Err(Error::invalid(
                "data",
                format!(
                    "expected {} values for {}x{}x{} RGB texels, got {}",
                    self.value_count(),
                    self.width,
                    self.height,
                    self.depth,
                    values.len()
                ),
            )),
            _ => Ok(()),
        }
    }
}

/// Somewhere textures can be allocated, bound and released.
pub trait TextureUploader {
    /// Allocate storage and copy `data` into it. `None` allocates without
    /// copying (contents start zeroed).
    fn upload(&mut self, descriptor: &TextureDescriptor, data: Option<&[f32]>)
        -> Result<TextureHandle>;

    /// Make `handle` the texture used by subsequent draws.
    fn bind(&mut self, handle: TextureHandle);

    /// Release a texture. Unknown handles are ignored.
    fn delete(&mut self, handle: TextureHandle);
}

/// A texture kept in CPU memory
#[derive(Debug, Clone)]
pub struct StoredTexture {
    pub descriptor: TextureDescriptor,
    pub texels: Vec<f32>,
}

/// Headless uploader that keeps every texture in memory.
#[derive(Debug, Default)]
pub struct MemoryUploader {
    textures: HashMap<TextureHandle, StoredTexture>,
    next_id: u32,
    bound: Option<TextureHandle>,
    uploads: usize,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&StoredTexture> {
        self.textures.get(&handle)
    }

    pub fn texels(&self, handle: TextureHandle) -> Option<&[f32]> {
        self.texture(handle).map(|t| t.texels.as_slice())
    }

    pub fn bound(&self) -> Option<TextureHandle> {
        self.bound
    }

    /// Total uploads performed, including ones since deleted.
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Textures currently alive.
    pub fn live_count(&self) -> usize {
        self.textures.len()
    }
}

impl TextureUploader for MemoryUploader {
    fn upload(
        &mut self,
        descriptor: &TextureDescriptor,
        data: Option<&[f32]>,
    ) -> Result<TextureHandle> {
        descriptor.check_data(data)?;

        let texels = match data {
            Some(values) => values.to_vec(),
            None => vec![0.0; descriptor.value_count()],
        };

        self.next_id += 1;
        let handle = TextureHandle(self.next_id);
        self.textures.insert(
            handle,
            StoredTexture {
                descriptor: descriptor.clone(),
                texels,
            },
        );
        self.uploads += 1;
        Ok(handle)
    }

    fn bind(&mut self, handle: TextureHandle) {
        if self.textures.contains_key(&handle) {
            self.bound = Some(handle);
        } else {
            debug!("ignoring bind of unknown texture {:?}", handle);
        }
    }

    fn delete(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle).is_some() && self.bound == Some(handle) {
            self.bound = None;
        }
    }
}
