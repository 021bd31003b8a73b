//! Upload targets for textures and shader uniforms.
//!
//! The scene only talks to [`TextureSink`] and [`UniformSink`]; the demo
//! binary backs them with PNG files and a JSON dump so a run leaves behind
//! something to inspect.

use anyhow::{Context, Result};
use glint_core::PixelBuffer;
use glint_shared::Matrix4x4;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Opaque handle for an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Receives decoded textures (bottom-up RGBA8888).
pub trait TextureSink {
    fn upload(&mut self, name: &str, pixels: &PixelBuffer) -> Result<TextureHandle>;
}

/// Receives matrices bound to named uniform slots.
pub trait UniformSink {
    fn set_matrix(&mut self, slot: &str, matrix: &Matrix4x4) -> Result<()>;
}

/// Write a buffer as a top-down RGBA PNG.
pub fn write_png(path: &Path, pixels: &PixelBuffer) -> Result<()> {
    let (width, height) = pixels.dimensions();
    let image = image::RgbaImage::from_raw(width, height, pixels.to_top_down())
        .context("Pixel buffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Texture sink that saves each upload as `<dir>/<name>.png`.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    next_handle: u32,
}

impl PngDirSink {
    /// Create the sink, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self {
            dir,
            next_handle: 1,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }
}

impl TextureSink for PngDirSink {
    fn upload(&mut self, name: &str, pixels: &PixelBuffer) -> Result<TextureHandle> {
        let path = self.path_for(name);
        write_png(&path, pixels)?;
        tracing::info!(
            "Uploaded texture '{}' ({}x{}) -> {}",
            name,
            pixels.width(),
            pixels.height(),
            path.display()
        );

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }
}

/// Uniform sink that keeps every value written to each slot, in order.
#[derive(Debug, Default, Serialize)]
pub struct JsonUniforms {
    slots: BTreeMap<String, Vec<[f32; 16]>>,
}

impl JsonUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values written to `slot`, oldest first
    pub fn history(&self, slot: &str) -> &[[f32; 16]] {
        self.slots.get(slot).map(Vec::as_slice).unwrap_or_default()
    }

    /// Most recent value written to `slot`
    pub fn latest(&self, slot: &str) -> Option<Matrix4x4> {
        self.history(slot).last().map(|m| Matrix4x4::from_cols_array(*m))
    }

    /// Dump all slots as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.slots)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl UniformSink for JsonUniforms {
    fn set_matrix(&mut self, slot: &str, matrix: &Matrix4x4) -> Result<()> {
        self.slots
            .entry(slot.to_string())
            .or_default()
            .push(matrix.to_cols_array());
        Ok(())
    }
}
