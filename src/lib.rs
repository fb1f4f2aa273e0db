//! noisetex library - procedural noise textures and a small viewer

pub mod camera;
pub mod cli;
pub mod error;
pub mod export;
pub mod field;
pub mod generator;
pub mod lattice;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod upload;

pub use error::{Error, Result};
