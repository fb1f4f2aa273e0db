//! End-to-end behaviour of noise fields and the orbit camera.

use std::f64::consts::FRAC_PI_2;

use noisetex::camera::{ButtonAction, Camera, MouseButton, OrbitCamera, TrackballState};
use noisetex::field::{build_field, NoiseField, NoiseTexture};
use noisetex::generator::{Bounds, GeneratorFunction, PerlinNoise, WhiteNoise};
use noisetex::lattice::Lattice;
use noisetex::params::{
    FieldSpec, NoiseKind, OrbitParams, PerlinParams, SimplexParams, TextureParams,
};
use noisetex::upload::MemoryUploader;

fn texels_of(field: &dyn NoiseTexture, uploader: &MemoryUploader) -> Vec<f32> {
    let handle = field.texture().expect("field was generated");
    uploader.texels(handle).expect("texture has data").to_vec()
}

#[test_log::test]
fn test_perlin_field_generates_once() {
    let params = PerlinParams {
        octaves: 1,
        frequency: 1.0,
        persistence: 0.5,
    };
    let bounds = Bounds::new(0.0, 1.0).unwrap();
    let mut field = NoiseField::<_, 2>::new(PerlinNoise::<2>::new(&params, bounds).unwrap(), 4).unwrap();
    let mut uploader = MemoryUploader::new();

    field.generate(&mut uploader).unwrap();
    assert!(field.is_initialized());
    let first = texels_of(&field, &uploader);
    assert_eq!(first.len(), 4 * 4 * 3);
    assert!(first.iter().all(|v| (0.0..=1.0).contains(v)));

    field.generate(&mut uploader).unwrap();
    assert!(field.is_initialized());
    let second = texels_of(&field, &uploader);
    assert_eq!(uploader.upload_count(), 1);
    assert_eq!(
        first.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
        second.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
    );
}

#[test_log::test]
fn test_every_sample_within_bounds() {
    let kinds = [
        NoiseKind::White,
        NoiseKind::Perlin(PerlinParams::default()),
        NoiseKind::Simplex(SimplexParams::default()),
        NoiseKind::Wood,
    ];
    let ranges = [(0.0, 1.0), (-2.0, 3.5), (0.25, 0.25)];

    for kind in &kinds {
        for dimension in 1..=3 {
            for &(lower, upper) in &ranges {
                let spec = FieldSpec {
                    kind: kind.clone(),
                    dimension,
                    texture: TextureParams {
                        lower,
                        upper,
                        resolution: 5,
                    },
                };
                let mut field = match build_field(&spec) {
                    Ok(field) => field,
                    Err(_) => {
                        // Only white noise has a 1D sampler
                        assert_eq!(dimension, 1);
                        assert_ne!(*kind, NoiseKind::White);
                        continue;
                    }
                };

                let mut uploader = MemoryUploader::new();
                field.generate(&mut uploader).unwrap();
                let texels = texels_of(field.as_ref(), &uploader);
                assert_eq!(texels.len(), 5usize.pow(dimension as u32) * 3);
                for value in texels {
                    assert!(
                        value >= lower && value <= upper,
                        "{} {}D produced {} outside [{}, {}]",
                        kind.name(),
                        dimension,
                        value,
                        lower,
                        upper
                    );
                }
            }
        }
    }
}

#[test]
fn test_white_noise_reproducible() {
    let bounds = Bounds::default();
    let mut a = WhiteNoise::<2>::new(bounds);
    let mut b = WhiteNoise::<2>::new(bounds);

    let first: Vec<f32> = (0..32).map(|i| a.sample(&[i as f32, 0.0])).collect();
    let second: Vec<f32> = (0..32).map(|i| b.sample(&[i as f32, 0.0])).collect();
    assert_eq!(first, second);
}

#[test]
fn test_lattice_flatten_round_trip() {
    let lattice = Lattice::<3>::new(4);
    for (index, coord) in lattice.points().enumerate() {
        assert_eq!(lattice.flatten(&coord), index);
        assert_eq!(lattice.unflatten(lattice.flatten(&coord)), coord);
    }
}

#[test]
fn test_orbit_drag_scenario() {
    let mut camera = OrbitCamera::new(&OrbitParams::default());
    assert_eq!(camera.state(), TrackballState::Passive);
    assert_eq!((camera.yaw(), camera.pitch(), camera.zoom()), (0.0, 0.0, 1.0));

    camera.handle_mouse_button(100.0, 100.0, MouseButton::Left, ButtonAction::Press);
    assert_eq!(camera.state(), TrackballState::Rotating);
    camera.handle_mouse_move(150.0, 120.0);
    camera.handle_mouse_button(150.0, 120.0, MouseButton::Left, ButtonAction::Release);

    assert!((camera.yaw() - (-0.5)).abs() < 1e-12);
    assert!((camera.pitch() - (-0.2)).abs() < 1e-12);
    assert_eq!(camera.state(), TrackballState::Passive);
    assert_eq!(camera.last_yaw(), camera.yaw());
    assert_eq!(camera.last_pitch(), camera.pitch());

    // A second drag continues from where the first ended
    camera.handle_mouse_button(0.0, 0.0, MouseButton::Left, ButtonAction::Press);
    camera.handle_mouse_move(0.0, 0.0);
    assert!((camera.yaw() - (-0.5)).abs() < 1e-12);
    assert!((camera.pitch() - (-0.2)).abs() < 1e-12);
}

#[test]
fn test_orbit_limits() {
    let mut camera = OrbitCamera::new(&OrbitParams::default());

    // Rotating: wrap yaw, clamp pitch
    camera.handle_mouse_button(0.0, 0.0, MouseButton::Left, ButtonAction::Press);
    camera.handle_mouse_move(-400.0, -400.0);
    assert!(camera.yaw() > -std::f64::consts::PI && camera.yaw() <= std::f64::consts::PI);
    assert_eq!(camera.pitch(), FRAC_PI_2);

    // Right release while rotating is ignored
    camera.handle_mouse_button(0.0, 0.0, MouseButton::Right, ButtonAction::Release);
    assert_eq!(camera.state(), TrackballState::Rotating);
    camera.handle_mouse_button(0.0, 0.0, MouseButton::Left, ButtonAction::Release);

    // Zooming: clamp to [0, 10]
    camera.handle_mouse_button(0.0, 0.0, MouseButton::Right, ButtonAction::Press);
    camera.handle_mouse_move(0.0, 600.0);
    camera.handle_mouse_move(0.0, 1200.0);
    assert_eq!(camera.zoom(), 10.0);
    camera.handle_mouse_move(0.0, -2000.0);
    assert_eq!(camera.zoom(), 0.0);
}

#[test]
fn test_orbit_view_follows_drag() {
    let mut camera = OrbitCamera::new(&OrbitParams::default());
    camera.resize(800, 600);
    camera.update();
    let before = camera.view_matrix();

    camera.handle_mouse_button(10.0, 10.0, MouseButton::Left, ButtonAction::Press);
    camera.handle_mouse_move(60.0, 10.0);
    camera.update();
    assert_ne!(camera.view_matrix(), before);
    assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
}
