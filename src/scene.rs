//! Demo scene: one noise texture on a model, fed by a camera.

use glam::{Mat3, Mat4};
use log::warn;

use crate::error::Result;
use crate::field::NoiseTexture;
use crate::upload::TextureUploader;

/// Texture unit the noise texture is sampled from
pub const NOISE_TEXTURE_UNIT: i32 = 0;

/// A value assignable to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Mat3(Mat3),
    Float(f32),
    Int(i32),
}

/// Receives uniforms by name.
///
/// Shaders declare only the uniforms they use, so implementations must
/// ignore names they do not know rather than fail.
pub trait UniformSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// Scene drawing a single noise texture with the standard MVP/MV/N set.
pub struct NoiseScene {
    texture: Box<dyn NoiseTexture>,
    model: Mat4,
}

impl NoiseScene {
    pub fn new(texture: Box<dyn NoiseTexture>) -> Self {
        Self {
            texture,
            model: Mat4::IDENTITY,
        }
    }

    pub fn texture(&self) -> &dyn NoiseTexture {
        self.texture.as_ref()
    }

    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
    }

    /// Generate the texture (the slow part) and bind it.
    pub fn init(&mut self, uploader: &mut dyn TextureUploader) -> Result<()> {
        self.texture.generate(uploader)?;
        self.texture.bind(uploader);
        Ok(())
    }

    /// Push this frame's uniforms. Returns `false`, leaving the sink
    /// untouched, while there is no texture to draw with.
    pub fn prepare_frame(&self, sink: &mut dyn UniformSink, view: Mat4, proj: Mat4) -> bool {
        if !self.texture.is_initialized() {
            warn!("noise texture not generated, skipping draw");
            return false;
        }

        let mv = view * self.model;
        let normal = Mat3::from_mat4(mv).inverse();
        let mvp = proj * mv;

        sink.set_uniform("MVP", UniformValue::Mat4(mvp));
        sink.set_uniform("MV", UniformValue::Mat4(mv));
        sink.set_uniform("N", UniformValue::Mat3(normal));
        sink.set_uniform("noiseTex", UniformValue::Int(NOISE_TEXTURE_UNIT));
        true
    }

    pub fn teardown(&mut self, uploader: &mut dyn TextureUploader) {
        self.texture.destroy(uploader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::build_field;
    use crate::params::{FieldSpec, NoiseKind, TextureParams};
    use crate::upload::MemoryUploader;
    use glam::Vec3;

    #[derive(Default)]
    struct RecordingSink {
        values: Vec<(String, UniformValue)>,
    }

    impl UniformSink for RecordingSink {
        fn set_uniform(&mut self, name: &str, value: UniformValue) {
            self.values.push((name.to_string(), value));
        }
    }

    fn white_scene() -> NoiseScene {
        let spec = FieldSpec {
            kind: NoiseKind::White,
            dimension: 2,
            texture: TextureParams {
                resolution: 4,
                ..TextureParams::default()
            },
        };
        NoiseScene::new(build_field(&spec).unwrap())
    }

    #[test]
    fn test_no_draw_before_init() {
        let scene = white_scene();
        let mut sink = RecordingSink::default();
        assert!(!scene.prepare_frame(&mut sink, Mat4::IDENTITY, Mat4::IDENTITY));
        assert!(sink.values.is_empty());
    }

    #[test]
    fn test_init_generates_and_binds() {
        let mut uploader = MemoryUploader::new();
        let mut scene = white_scene();
        scene.init(&mut uploader).unwrap();

        assert!(scene.texture().is_initialized());
        assert_eq!(uploader.bound(), scene.texture().texture());

        scene.teardown(&mut uploader);
        assert!(!scene.texture().is_initialized());
        assert_eq!(uploader.live_count(), 0);
    }

    #[test]
    fn test_frame_uniforms() {
        let mut uploader = MemoryUploader::new();
        let mut scene = white_scene();
        scene.init(&mut uploader).unwrap();
        scene.set_model(Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)));

        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(1.0, 1.5, 0.1, 10.0);
        let mut sink = RecordingSink::default();
        assert!(scene.prepare_frame(&mut sink, view, proj));

        let names: Vec<&str> = sink.values.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["MVP", "MV", "N", "noiseTex"]);

        let mv = view * Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sink.values[0].1, UniformValue::Mat4(proj * mv));
        assert_eq!(sink.values[1].1, UniformValue::Mat4(mv));
        assert_eq!(sink.values[3].1, UniformValue::Int(0));
    }
}
