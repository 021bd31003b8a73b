//! glint - sample scene and pipeline inspection tool
//!
//! Probes and decodes images, renders text banners and runs the spinning
//! quad scene, writing results as PNG files and a JSON uniform dump.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glint_core::{TextRenderer, texture};
use std::path::{Path, PathBuf};

use glint_demo::config::{Config, DEFAULT_CONFIG_FILE};
use glint_demo::{JsonUniforms, PngDirSink, scene, sinks};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Glint graphics demo tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dimensions of an image file
    Probe {
        /// Input BMP/PNG/JPG file
        image: PathBuf,
    },

    /// Decode an image and write it back out as PNG
    Texture {
        /// Input BMP/PNG/JPG file
        image: PathBuf,

        /// Output .png file
        #[arg(short, long, default_value = "texture.png")]
        output: PathBuf,
    },

    /// Render a line of text onto a banner canvas
    Text {
        /// Text to render
        text: String,

        /// Font file (overrides config)
        #[arg(short, long)]
        font: Option<PathBuf>,

        /// Pixel size (overrides config)
        #[arg(short, long)]
        size: Option<u32>,

        /// Output .png file
        #[arg(short, long, default_value = "text.png")]
        output: PathBuf,

        /// Config file for colors and canvas size
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Run the sample scene
    Run {
        /// Path to glint.toml
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Probe { image } => {
            let (width, height) = texture::probe(&image)
                .with_context(|| format!("Failed to probe {}", image.display()))?;
            println!("{width} x {height}");
        }

        Commands::Texture { image, output } => {
            tracing::info!("Converting {:?} -> {:?}", image, output);
            let decoded = scene::load_texture(Some(image.as_path()));
            sinks::write_png(&output, &decoded.buffer)?;
            tracing::info!("Done!");
        }

        Commands::Text {
            text,
            font,
            size,
            output,
            config,
        } => {
            let mut config = Config::load_or_default(&config)?;
            config.text.content = text;
            if let Some(font) = font {
                config.text.font = Some(font);
            }
            if let Some(size) = size {
                config.text.pixel_size = size;
            }

            let mut renderer = text_renderer(config.text.font.as_deref());
            let (canvas, extent) = scene::render_banner(&config.text, &mut renderer);
            sinks::write_png(&output, &canvas)?;
            tracing::info!(
                "Rendered {} glyphs ({} px) -> {:?}",
                extent.count,
                extent.width,
                output
            );
        }

        Commands::Run { config } => {
            let config = Config::load_or_default(&config)?;
            let mut renderer = text_renderer(config.text.font.as_deref());
            let mut textures = PngDirSink::new(&config.output.dir)?;
            let mut uniforms = JsonUniforms::new();

            let stats = scene::run(&config, &mut renderer, &mut textures, &mut uniforms)?;

            let uniforms_path = textures.dir().join("uniforms.json");
            uniforms.write_to(&uniforms_path)?;
            tracing::info!(
                "Scene complete: {} frames, {:.1} fps, uniforms -> {:?}",
                stats.frames,
                stats.fps(),
                uniforms_path
            );
        }
    }

    Ok(())
}

/// Text renderer with `font` loaded, or with no font if it is unset or
/// cannot be loaded.
fn text_renderer(font: Option<&Path>) -> TextRenderer {
    let mut renderer = TextRenderer::new();
    if let Some(font) = font {
        if let Err(e) = renderer.set_font(font) {
            tracing::warn!("Failed to load font {}: {}", font.display(), e);
        }
    }
    renderer
}
