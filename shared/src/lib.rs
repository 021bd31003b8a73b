//! Shared types for the glint graphics-demo toolkit.
//!
//! Everything here is plain data with no I/O, so the image/text pipeline in
//! `glint-core` and the drivers in `tools/` can agree on one matrix layout.
//!
//! # Modules
//!
//! - [`math`] - Column-major 4x4 matrix algebra for model/view/projection

pub mod math;

pub use math::Matrix4x4;
