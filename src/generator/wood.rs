//! Wood-grain noise.
//!
//! Concentric cylinders (the rings of a log) plus stretched Perlin grain,
//! perturbed, cut off-centre and perturbed again. The pipeline is fixed;
//! only the output bounds vary per instance.

use noise::{
    Add, Cylinders, Fbm, MultiFractal, NoiseFn, Perlin, RotatePoint, ScaleBias, ScalePoint,
    Seedable, TranslatePoint, Turbulence,
};

use super::{lift, require_2d_or_3d, Bounds, GeneratorFunction};
use crate::error::Result;

const RING_FREQUENCY: f64 = 8.0;

const GRAIN_SEED: u32 = 0;
const GRAIN_FREQUENCY: f64 = 48.0;
const GRAIN_PERSISTENCE: f64 = 0.5;
const GRAIN_LACUNARITY: f64 = 2.20703125;
const GRAIN_OCTAVES: usize = 3;
const GRAIN_STRETCH: f64 = 0.25;
const GRAIN_SCALE: f64 = 0.25;
const GRAIN_BIAS: f64 = 0.125;

const PERTURB_SEED: u32 = 1;
const PERTURB_FREQUENCY: f64 = 4.0;
const PERTURB_POWER: f64 = 1.0 / 256.0;
const PERTURB_ROUGHNESS: usize = 4;

const CUT_OFFSET: f64 = 1.48;
// Identity: the cut is never actually rotated.
const CUT_ANGLES: [f64; 3] = [0.0, 0.0, 0.0];

const FINAL_SEED: u32 = 2;
const FINAL_FREQUENCY: f64 = 2.0;
const FINAL_POWER: f64 = 1.0 / 64.0;
const FINAL_ROUGHNESS: usize = 4;

pub struct WoodNoise<const D: usize> {
    pipeline: Box<dyn NoiseFn<f64, 3>>,
    bounds: Bounds,
}

impl<const D: usize> WoodNoise<D> {
    pub fn new(bounds: Bounds) -> Result<Self> {
        require_2d_or_3d("wood", D)?;
        Ok(Self {
            pipeline: wood_pipeline(),
            bounds,
        })
    }
}

fn wood_pipeline() -> Box<dyn NoiseFn<f64, 3>> {
    // Concentric rings, like a cut log
    let base_wood = Cylinders::new().set_frequency(RING_FREQUENCY);

    let grain_noise = Fbm::<Perlin>::new(GRAIN_SEED)
        .set_frequency(GRAIN_FREQUENCY)
        .set_persistence(GRAIN_PERSISTENCE)
        .set_lacunarity(GRAIN_LACUNARITY)
        .set_octaves(GRAIN_OCTAVES);

    // Stretch the grain along the log so it reads as fibres
    let stretched_grain = ScalePoint::new(grain_noise).set_y_scale(GRAIN_STRETCH);
    let grain = ScaleBias::<f64, _, 3>::new(stretched_grain)
        .set_scale(GRAIN_SCALE)
        .set_bias(GRAIN_BIAS);

    let combined = Add::<f64, _, _, 3>::new(base_wood, grain);

    let perturbed = Turbulence::<_, Perlin>::new(combined)
        .set_seed(PERTURB_SEED)
        .set_frequency(PERTURB_FREQUENCY)
        .set_power(PERTURB_POWER)
        .set_roughness(PERTURB_ROUGHNESS);

    // Cut a small distance away from the centre of the log
    let translated = TranslatePoint::new(perturbed).set_z_translation(CUT_OFFSET);
    let [ax, ay, az] = CUT_ANGLES;
    let rotated = RotatePoint::new(translated).set_angles(ax, ay, az, 0.0);

    let final_wood = Turbulence::<_, Perlin>::new(rotated)
        .set_seed(FINAL_SEED)
        .set_frequency(FINAL_FREQUENCY)
        .set_power(FINAL_POWER)
        .set_roughness(FINAL_ROUGHNESS);

    Box::new(final_wood)
}

impl<const D: usize> GeneratorFunction<D> for WoodNoise<D> {
    fn sample(&mut self, coord: &[f32; D]) -> f32 {
        self.bounds.rescale(self.pipeline.get(lift(coord)))
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}
