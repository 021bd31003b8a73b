//! glint-demo - sample scene driver for the glint toolkit
//!
//! Decodes a texture (or falls back to a placeholder), renders a text banner
//! and computes the matrices for a quad spinning about Y. Results go through
//! the [`sinks`] traits, which the `glint` binary backs with PNG files and a
//! JSON uniform dump.

pub mod config;
pub mod scene;
pub mod sinks;

pub use config::Config;
pub use scene::{RunStats, run};
pub use sinks::{JsonUniforms, PngDirSink, TextureHandle, TextureSink, UniformSink};
