//! The sample scene: a textured quad spinning about Y under a text banner.
//!
//! Nothing here touches a GPU. Textures and matrices are handed to the
//! sinks in the order a renderer would upload them.

use anyhow::Result;
use glint_core::{DecodedImage, GlyphRasterizer, PixelBuffer, TextExtent, TextRenderer, texture};
use glint_shared::Matrix4x4;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::{CameraConfig, Config, SurfaceConfig, TextConfig};
use crate::sinks::{TextureHandle, TextureSink, UniformSink};

/// Uniform slot names
pub const VIEW_PROJECTION_SLOT: &str = "view_projection";
pub const MODEL_SLOT: &str = "model";
pub const TEXT_MODEL_SLOT: &str = "text_model";

/// Banner inset from the surface's top-left corner, in pixels
const BANNER_MARGIN: f32 = 8.0;

/// Banner offset towards the camera from the quad's plane
const BANNER_DEPTH: f32 = 0.0001;

/// Decode the quad texture, falling back to the built-in placeholder.
pub fn load_texture(path: Option<&Path>) -> DecodedImage {
    let Some(path) = path else {
        tracing::info!("No texture configured, using placeholder");
        return DecodedImage::placeholder();
    };

    match texture::load(path) {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!("Failed to load texture {}: {}", path.display(), e);
            DecodedImage::placeholder()
        }
    }
}

/// Render the banner canvas.
///
/// The canvas is always returned; text that fails to render (no font, or a
/// glyph error part way through) leaves the canvas blank or partly drawn.
pub fn render_banner<R: GlyphRasterizer>(
    config: &TextConfig,
    text: &mut TextRenderer<R>,
) -> (PixelBuffer, TextExtent) {
    let mut canvas =
        PixelBuffer::filled(config.canvas_width, config.canvas_height, config.background);

    let extent = match text.draw(
        &mut canvas,
        &config.content,
        config.pixel_size,
        config.color,
        config.alpha,
        config.origin(),
    ) {
        Ok(extent) => extent,
        Err(glint_core::TextError::GlyphRenderFailure { drawn, .. }) => drawn,
        Err(e) => {
            tracing::warn!("Banner left blank: {}", e);
            TextExtent::default()
        }
    };

    if extent.width > config.canvas_width as i32 - config.origin().0 {
        tracing::warn!(
            "Banner text is {} px wide and overflows the {} px canvas",
            extent.width,
            config.canvas_width
        );
    }

    (canvas, extent)
}

/// Perspective projection times the camera pull-back that makes a unit quad
/// at the origin fill the view vertically.
pub fn view_projection(camera: &CameraConfig, surface: &SurfaceConfig) -> Matrix4x4 {
    let projection = Matrix4x4::perspective(camera.fov, surface.aspect(), camera.near, camera.far);
    let distance = -0.5 / (camera.fov.to_radians() / 2.0).tan();
    projection * Matrix4x4::position(0.0, 0.0, distance)
}

/// Spin about Y by one degree per frame, pushed one unit away.
pub fn model_matrix(frame: u32) -> Matrix4x4 {
    let mut model = Matrix4x4::rotation_y(frame as f32);
    model[14] = -1.0;
    model
}

/// Maps the unit quad (`-0.5..0.5` on both axes, `z = 0`) onto the banner.
///
/// The quad lives in the world space framed by [`view_projection`], where
/// the view spans `±0.5` vertically at `z = 0` and one surface pixel is
/// `1 / height`. The banner keeps the canvas size in pixels, sits
/// [`BANNER_MARGIN`] in from the top-left corner and is nudged towards the
/// camera so it draws over the spinning quad.
pub fn banner_model(text: &TextConfig, surface: &SurfaceConfig) -> Matrix4x4 {
    let pixel = 1.0 / surface.height as f32;
    let half_width = 0.5 * surface.aspect();
    let (canvas_w, canvas_h) = (
        text.canvas_width as f32 * pixel,
        text.canvas_height as f32 * pixel,
    );

    let mut model = Matrix4x4::IDENTITY;
    model.set(0, 0, canvas_w);
    model.set(1, 1, canvas_h);
    model.set(0, 3, -half_width + BANNER_MARGIN * pixel + canvas_w / 2.0);
    model.set(1, 3, 0.5 - BANNER_MARGIN * pixel - canvas_h / 2.0);
    model.set(2, 3, BANNER_DEPTH);
    model
}

/// Summary of one scene run
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub quad_texture: TextureHandle,
    pub banner_texture: TextureHandle,
    pub used_placeholder: bool,
    pub banner: TextExtent,
    pub frames: u32,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            f64::from(self.frames) / secs
        } else {
            0.0
        }
    }
}

/// Build the scene's textures and matrices and push them through the sinks.
pub fn run<R, T, U>(
    config: &Config,
    text: &mut TextRenderer<R>,
    textures: &mut T,
    uniforms: &mut U,
) -> Result<RunStats>
where
    R: GlyphRasterizer,
    T: TextureSink,
    U: UniformSink,
{
    let quad = load_texture(config.texture.path.as_deref());
    let used_placeholder = quad.is_placeholder();
    let quad_texture = textures.upload("quad", &quad.buffer)?;

    let (banner, extent) = render_banner(&config.text, text);
    let banner_texture = textures.upload("banner", &banner)?;

    uniforms.set_matrix(
        VIEW_PROJECTION_SLOT,
        &view_projection(&config.camera, &config.surface),
    )?;
    uniforms.set_matrix(TEXT_MODEL_SLOT, &banner_model(&config.text, &config.surface))?;

    let start = Instant::now();
    for frame in 0..config.output.frames {
        uniforms.set_matrix(MODEL_SLOT, &model_matrix(frame))?;
    }

    let stats = RunStats {
        quad_texture,
        banner_texture,
        used_placeholder,
        banner: extent,
        frames: config.output.frames,
        elapsed: start.elapsed(),
    };
    tracing::info!(
        "{} frames in {:.3} ms ({:.1} fps)",
        stats.frames,
        stats.elapsed.as_secs_f64() * 1000.0,
        stats.fps()
    );

    Ok(stats)
}
