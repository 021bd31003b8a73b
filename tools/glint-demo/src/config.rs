//! Demo configuration (glint.toml)
//!
//! Every section and field has a default, so an empty or partial file is
//! valid and a missing file simply means "all defaults".

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "glint.toml";

/// Demo configuration, one section per stage of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Virtual surface size (aspect ratio and banner placement)
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Spinning quad texture
    #[serde(default)]
    pub texture: TextureConfig,
    /// Text banner
    #[serde(default)]
    pub text: TextConfig,
    /// Projection settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Where uploads and uniform dumps go
    #[serde(default)]
    pub output: OutputConfig,
}

/// Virtual surface configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels (default: 640)
    #[serde(default = "default_surface_width")]
    pub width: u32,
    /// Surface height in pixels (default: 480)
    #[serde(default = "default_surface_height")]
    pub height: u32,
}

/// Texture configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextureConfig {
    /// Image file (.bmp, .png, .jpg, .jpeg); placeholder when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Text banner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    /// TrueType/OpenType font; the banner stays blank when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    /// Banner text (default: "Hello, glint!")
    #[serde(default = "default_content")]
    pub content: String,
    /// Nominal glyph size in pixels (default: 18)
    #[serde(default = "default_pixel_size")]
    pub pixel_size: u32,
    /// Text RGB color (default: [220, 220, 250])
    #[serde(default = "default_text_color")]
    pub color: [u8; 3],
    /// Text opacity (default: 255)
    #[serde(default = "default_alpha")]
    pub alpha: u8,
    /// Banner canvas width (default: 512)
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    /// Banner canvas height (default: 64)
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    /// Canvas fill before drawing (default: [16, 16, 16, 128])
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    /// Left edge of the text line (default: 24)
    #[serde(default = "default_text_x")]
    pub x: i32,
    /// Top edge of the text line; vertically centered when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

/// Camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees (default: 52.5)
    #[serde(default = "default_fov")]
    pub fov: f32,
    /// Near clip plane (default: 1.0)
    #[serde(default = "default_near")]
    pub near: f32,
    /// Far clip plane (default: 1000.0)
    #[serde(default = "default_far")]
    pub far: f32,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for uploaded textures and uniforms.json (default: "out")
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Number of animation frames to compute (default: 360)
    #[serde(default = "default_frames")]
    pub frames: u32,
}

fn default_surface_width() -> u32 {
    640
}
fn default_surface_height() -> u32 {
    480
}

fn default_content() -> String {
    "Hello, glint!".to_string()
}
fn default_pixel_size() -> u32 {
    18
}
fn default_text_color() -> [u8; 3] {
    [220, 220, 250]
}
fn default_alpha() -> u8 {
    255
}
fn default_canvas_width() -> u32 {
    512
}
fn default_canvas_height() -> u32 {
    64
}
fn default_background() -> [u8; 4] {
    [16, 16, 16, 128]
}
fn default_text_x() -> i32 {
    24
}

fn default_fov() -> f32 {
    52.5
}
fn default_near() -> f32 {
    1.0
}
fn default_far() -> f32 {
    1000.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}
fn default_frames() -> u32 {
    360
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: None,
            content: default_content(),
            pixel_size: default_pixel_size(),
            color: default_text_color(),
            alpha: default_alpha(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            background: default_background(),
            x: default_text_x(),
            y: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            frames: default_frames(),
        }
    }
}

impl SurfaceConfig {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl TextConfig {
    /// Top-down origin of the text line on the canvas
    pub fn origin(&self) -> (i32, i32) {
        let y = self
            .y
            .unwrap_or((self.canvas_height as i32 - self.pixel_size as i32) / 2);
        (self.x, y)
    }
}

impl Config {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse `path` if it exists, otherwise use defaults.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================================
    // Default value tests
    // =============================================================

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!((config.surface.width, config.surface.height), (640, 480));
        assert_eq!(config.texture.path, None);
        assert_eq!(config.text.pixel_size, 18);
        assert_eq!(config.text.color, [220, 220, 250]);
        assert_eq!(config.text.alpha, 255);
        assert_eq!((config.text.canvas_width, config.text.canvas_height), (512, 64));
        assert_eq!(config.text.background, [16, 16, 16, 128]);
        assert!((config.camera.fov - 52.5).abs() < f32::EPSILON);
        assert_eq!(config.output.frames, 360);
        assert_eq!(config.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_text_origin_centers_vertically() {
        let text = TextConfig::default();
        assert_eq!(text.origin(), (24, (64 - 18) / 2));

        let text = TextConfig {
            y: Some(3),
            ..TextConfig::default()
        };
        assert_eq!(text.origin(), (24, 3));
    }

    // =============================================================
    // TOML parsing tests
    // =============================================================

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial_text() {
        let toml_str = r#"
[text]
content = "spin"
color = [255, 0, 0]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.text.content, "spin");
        assert_eq!(config.text.color, [255, 0, 0]);
        assert_eq!(config.text.pixel_size, 18); // default
        assert_eq!(config.surface, SurfaceConfig::default());
    }

    #[test]
    fn test_config_serialize_roundtrip() {
        let mut config = Config::default();
        config.texture.path = Some(PathBuf::from("brick.png"));
        config.text.y = Some(10);
        config.camera.far = 50.0;

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("glint.toml");
        assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());

        std::fs::write(&missing, "[surface]\nwidth = 800\n").unwrap();
        assert_eq!(Config::load_or_default(&missing).unwrap().surface.width, 800);

        std::fs::write(&missing, "[surface]\nwidth = \"wide\"\n").unwrap();
        assert!(Config::load_or_default(&missing).is_err());
    }
}
