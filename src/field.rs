//! Noise fields: sample a generator over a lattice and upload the result.

use log::{debug, info};

use crate::error::{check_dimension, Error, Result};
use crate::generator::{
    Bounds, GeneratorFunction, PerlinNoise, SimplexNoise, WhiteNoise, WoodNoise,
};
use crate::lattice::Lattice;
use crate::params::{FieldSpec, NoiseKind};
use crate::upload::{TextureDescriptor, TextureDimension, TextureHandle, TextureUploader, CHANNELS};

/// A D-dimensional RGB noise texture backed by one generator.
///
/// Each lattice point `c` is normalised to `f = c / (resolution - 1)`.
/// Channel `k` samples the generator at `f` with axis `k` pushed out by
/// 1.0; channels past the last axis sample `f` itself.
pub struct NoiseField<G, const D: usize> {
    generator: G,
    lattice: Lattice<D>,
    texture: Option<TextureHandle>,
}

impl<G: GeneratorFunction<D>, const D: usize> NoiseField<G, D> {
    pub fn new(generator: G, resolution: usize) -> Result<Self> {
        check_dimension(D)?;
        if resolution < 2 {
            return Err(Error::invalid(
                "resolution",
                format!("must be at least 2, got {}", resolution),
            ));
        }
        if u32::try_from(resolution).is_err() {
            return Err(Error::invalid(
                "resolution",
                format!("{} does not fit a texture extent", resolution),
            ));
        }
        let lattice = Lattice::new(resolution);
        if lattice
            .checked_len()
            .and_then(|points| points.checked_mul(CHANNELS))
            .is_none()
        {
            return Err(Error::invalid(
                "resolution",
                format!("{}^{} texels overflow the texel buffer", resolution, D),
            ));
        }
        Ok(Self {
            generator,
            lattice,
            texture: None,
        })
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn lattice(&self) -> &Lattice<D> {
        &self.lattice
    }

    /// Evaluate the generator over the whole lattice.
    ///
    /// Returns `resolution^D * 3` floats, axis 0 fastest.
    pub fn synthesize(&mut self) -> Vec<f32> {
        let inv_res = 1.0 / (self.lattice.resolution() - 1) as f32;
        let mut data = vec![0.0; self.lattice.len() * CHANNELS];

        for (index, point) in self.lattice.points().enumerate() {
            let mut coordf = [0.0f32; D];
            for (f, &c) in coordf.iter_mut().zip(point.iter()) {
                *f = inv_res * c as f32;
            }

            let base = index * CHANNELS;
            for channel in 0..CHANNELS {
                let mut probe = coordf;
                if let Some(axis) = probe.get_mut(channel) {
                    *axis += 1.0;
                }
                data[base + channel] = self.generator.sample(&probe);
            }
        }

        data
    }

    fn descriptor(&self) -> Result<TextureDescriptor> {
        Ok(TextureDescriptor::noise(
            TextureDimension::from_rank(D)?,
            self.lattice.resolution() as u32,
        ))
    }
}

/// Dimension-erased view of a noise field, for choosing D at runtime.
pub trait NoiseTexture {
    fn dimension(&self) -> usize;

    fn resolution(&self) -> usize;

    fn bounds(&self) -> Bounds;

    /// Fill and upload the texture. Does nothing once initialised.
    fn generate(&mut self, uploader: &mut dyn TextureUploader) -> Result<()>;

    /// Bind for drawing. Does nothing until generated.
    fn bind(&self, uploader: &mut dyn TextureUploader);

    /// Release the GPU texture. Safe to call repeatedly.
    fn destroy(&mut self, uploader: &mut dyn TextureUploader);

    fn is_initialized(&self) -> bool {
        self.texture().is_some()
    }

    fn texture(&self) -> Option<TextureHandle>;
}

impl<G: GeneratorFunction<D>, const D: usize> NoiseTexture for NoiseField<G, D> {
    fn dimension(&self) -> usize {
        D
    }

    fn resolution(&self) -> usize {
        self.lattice.resolution()
    }

    fn bounds(&self) -> Bounds {
        self.generator.bounds()
    }

    fn generate(&mut self, uploader: &mut dyn TextureUploader) -> Result<()> {
        if self.texture.is_some() {
            debug!("noise texture already generated, skipping");
            return Ok(());
        }

        let descriptor = self.descriptor()?;
        let data = self.synthesize();
        let handle = uploader.upload(&descriptor, Some(&data))?;
        self.texture = Some(handle);

        info!(
            "generated {}^{} noise texture ({} values)",
            self.lattice.resolution(),
            D,
            data.len()
        );
        Ok(())
    }

    fn bind(&self, uploader: &mut dyn TextureUploader) {
        if let Some(handle) = self.texture {
            uploader.bind(handle);
        }
    }

    fn destroy(&mut self, uploader: &mut dyn TextureUploader) {
        if let Some(handle) = self.texture.take() {
            uploader.delete(handle);
        }
    }

    fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
}

/// Build the field described by `spec`, choosing the dimension at runtime.
///
/// Invalid parameters and unsupported (kind, dimension) pairs are rejected
/// here, before anything touches the GPU.
pub fn build_field(spec: &FieldSpec) -> Result<Box<dyn NoiseTexture>> {
    let bounds = Bounds::new(spec.texture.lower, spec.texture.upper)?;
    let resolution = spec.texture.resolution;

    match spec.dimension {
        1 => boxed_field::<1>(&spec.kind, bounds, resolution),
        2 => boxed_field::<2>(&spec.kind, bounds, resolution),
        3 => boxed_field::<3>(&spec.kind, bounds, resolution),
        other => Err(Error::invalid(
            "dimension",
            format!("expected 1, 2 or 3, got {}", other),
        )),
    }
}

fn boxed_field<const D: usize>(
    kind: &NoiseKind,
    bounds: Bounds,
    resolution: usize,
) -> Result<Box<dyn NoiseTexture>> {
    let field: Box<dyn NoiseTexture> = match kind {
        NoiseKind::White => Box::new(NoiseField::new(WhiteNoise::<D>::new(bounds), resolution)?),
        NoiseKind::Perlin(params) => Box::new(NoiseField::new(
            PerlinNoise::<D>::new(params, bounds)?,
            resolution,
        )?),
        NoiseKind::Simplex(params) => Box::new(NoiseField::new(
            SimplexNoise::<D>::new(params, bounds)?,
            resolution,
        )?),
        NoiseKind::Wood => Box::new(NoiseField::new(WoodNoise::<D>::new(bounds)?, resolution)?),
    };
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PerlinParams, SimplexParams, TextureParams};
    use crate::upload::MemoryUploader;

    /// Records every coordinate it is asked for and returns a fixed value.
    struct Probe<const D: usize> {
        calls: Vec<[f32; D]>,
        value: f32,
    }

    impl<const D: usize> Probe<D> {
        fn new(value: f32) -> Self {
            Self {
                calls: Vec::new(),
                value,
            }
        }
    }

    impl<const D: usize> GeneratorFunction<D> for Probe<D> {
        fn sample(&mut self, coord: &[f32; D]) -> f32 {
            self.calls.push(*coord);
            self.value
        }

        fn bounds(&self) -> Bounds {
            Bounds::default()
        }
    }

    fn spec(kind: NoiseKind, dimension: usize, resolution: usize) -> FieldSpec {
        FieldSpec {
            kind,
            dimension,
            texture: TextureParams {
                resolution,
                ..TextureParams::default()
            },
        }
    }

    #[test]
    fn test_resolution_below_two_rejected() {
        for resolution in [0, 1] {
            let result = NoiseField::<_, 2>::new(Probe::<2>::new(0.0), resolution);
            assert!(matches!(
                result,
                Err(Error::InvalidParameter {
                    name: "resolution",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_resolution_overflowing_buffer_rejected() {
        let result = NoiseField::<_, 3>::new(Probe::<3>::new(0.0), 1 << 22);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter {
                name: "resolution",
                ..
            })
        ));

        // The same resolution is fine when the point count fits
        assert!(NoiseField::<_, 1>::new(Probe::<1>::new(0.0), 1 << 22).is_ok());
    }

    #[test]
    fn test_dimension_outside_range_rejected() {
        assert!(NoiseField::<_, 4>::new(Probe::<4>::new(0.0), 2).is_err());
        assert!(build_field(&spec(NoiseKind::White, 0, 4)).is_err());
        assert!(build_field(&spec(NoiseKind::White, 4, 4)).is_err());
    }

    #[test]
    fn test_three_samples_per_point() {
        let mut field = NoiseField::<_, 2>::new(Probe::<2>::new(0.5), 3).unwrap();
        let data = field.synthesize();

        assert_eq!(data.len(), 3 * 3 * 3);
        assert_eq!(field.generator().calls.len(), 3 * 3 * 3);
        assert!(data.iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_channel_probes_offset_one_axis() {
        let mut field = NoiseField::<_, 2>::new(Probe::<2>::new(0.0), 3).unwrap();
        field.synthesize();
        let calls = &field.generator().calls;

        // Lattice point (1, 2) has flat index 1 + 2 * 3 = 7 -> f = (0.5, 1.0)
        let base = 7 * 3;
        assert_eq!(calls[base], [1.5, 1.0]);
        assert_eq!(calls[base + 1], [0.5, 2.0]);
        // No third axis to offset
        assert_eq!(calls[base + 2], [0.5, 1.0]);
    }

    #[test]
    fn test_channel_probes_in_3d() {
        let mut field = NoiseField::<_, 3>::new(Probe::<3>::new(0.0), 2).unwrap();
        field.synthesize();
        let calls = &field.generator().calls;

        // Last point (1, 1, 1) -> f = (1, 1, 1)
        let base = 7 * 3;
        assert_eq!(calls[base], [2.0, 1.0, 1.0]);
        assert_eq!(calls[base + 1], [1.0, 2.0, 1.0]);
        assert_eq!(calls[base + 2], [1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let mut uploader = MemoryUploader::new();
        let mut field = NoiseField::<_, 1>::new(Probe::<1>::new(0.25), 8).unwrap();

        field.generate(&mut uploader).unwrap();
        let first = field.texture();
        assert!(field.is_initialized());
        assert_eq!(field.generator().calls.len(), 8 * 3);

        field.generate(&mut uploader).unwrap();
        assert!(field.is_initialized());
        assert_eq!(field.texture(), first);
        assert_eq!(field.generator().calls.len(), 8 * 3);
        assert_eq!(uploader.upload_count(), 1);
    }

    #[test]
    fn test_bind_before_generate_is_noop() {
        let mut uploader = MemoryUploader::new();
        let field = NoiseField::<_, 2>::new(Probe::<2>::new(0.0), 2).unwrap();
        field.bind(&mut uploader);
        assert_eq!(uploader.bound(), None);
    }

    #[test]
    fn test_destroy_releases_and_allows_regeneration() {
        let mut uploader = MemoryUploader::new();
        let mut field = NoiseField::<_, 2>::new(Probe::<2>::new(0.0), 2).unwrap();

        field.generate(&mut uploader).unwrap();
        field.bind(&mut uploader);
        assert!(uploader.bound().is_some());

        field.destroy(&mut uploader);
        assert!(!field.is_initialized());
        assert_eq!(uploader.live_count(), 0);
        assert_eq!(uploader.bound(), None);

        field.destroy(&mut uploader);
        assert!(!field.is_initialized());

        field.generate(&mut uploader).unwrap();
        assert!(field.is_initialized());
        assert_eq!(uploader.upload_count(), 2);
    }

    #[test]
    fn test_build_field_dispatch() {
        let perlin = NoiseKind::Perlin(PerlinParams::default());
        let field = build_field(&spec(perlin.clone(), 3, 4)).unwrap();
        assert_eq!(field.dimension(), 3);
        assert_eq!(field.resolution(), 4);
        assert!(!field.is_initialized());

        assert!(build_field(&spec(NoiseKind::White, 1, 4)).is_ok());
        assert!(matches!(
            build_field(&spec(perlin, 1, 4)),
            Err(Error::UnsupportedDimension { .. })
        ));
        assert!(build_field(&spec(NoiseKind::Simplex(SimplexParams::default()), 1, 4)).is_err());
        assert!(build_field(&spec(NoiseKind::Wood, 1, 4)).is_err());
    }

    #[test]
    fn test_build_field_rejects_inverted_bounds() {
        let mut spec = spec(NoiseKind::White, 2, 4);
        spec.texture.lower = 2.0;
        spec.texture.upper = 1.0;
        assert!(matches!(
            build_field(&spec),
            Err(Error::InvalidParameter { name: "bounds", .. })
        ));
    }

    #[test]
    fn test_uploaded_texture_shape() {
        let mut uploader = MemoryUploader::new();
        let mut field = build_field(&spec(NoiseKind::White, 3, 3)).unwrap();
        field.generate(&mut uploader).unwrap();

        let stored = uploader.texture(field.texture().unwrap()).unwrap();
        assert_eq!(stored.descriptor.dimension, TextureDimension::D3);
        assert_eq!(stored.texels.len(), 27 * 3);
    }
}
