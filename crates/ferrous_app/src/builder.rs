use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ferrous_core::Color;
use ferrous_font::OutlineProvider;
use serde::Deserialize;

/// Window, text and logging settings of the viewer.
///
/// Every field has a default, so a TOML file only needs to name what it
/// changes:
///
/// ```toml
/// text = "Hello"
/// font_path = "assets/fonts/Roboto-Regular.ttf"
/// background = "#1E1E1E"
/// text_color = "#F5F5DC"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Font file to take outlines from.  `None` renders every character as
    /// the built-in fallback glyph.
    pub font_path: Option<PathBuf>,
    pub text: String,
    pub text_color: Color,
    pub background: Color,
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Ferrous Text Viewer".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            font_path: None,
            text: "Ferrous".to_string(),
            text_color: Color::BLACK,
            background: Color::WHITE,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("invalid viewer configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_colors(mut self, text_color: Color, background: Color) -> Self {
        self.text_color = text_color;
        self.background = background;
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }
}

/// Entry point of the viewer.  Pairs a configuration with the outline
/// provider the text is drawn from.
pub struct App {
    config: AppConfig,
    provider: Box<dyn OutlineProvider>,
}

impl App {
    pub fn new(config: AppConfig, provider: Box<dyn OutlineProvider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the event loop until the window is closed or a render fails.
    pub fn run(self) -> anyhow::Result<()> {
        crate::runner::run_internal(self.config, self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r##"
            text = "Hello"
            width = 640
            background = "#000000"
            text_color = "#FFFFFF80"
            font_path = "fonts/Inter.ttf"
            "##,
        )
        .unwrap();

        assert_eq!(config.text, "Hello");
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 720);
        assert_eq!(config.background, Color::BLACK);
        assert_eq!(config.text_color.a, 128.0 / 255.0);
        assert_eq!(config.font_path, Some(PathBuf::from("fonts/Inter.ttf")));
        assert!(config.vsync);
    }

    #[test]
    fn bad_colour_is_rejected() {
        assert!(AppConfig::from_toml_str(r##"background = "#12""##).is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(AppConfig::from_toml_str("width = \"wide\"").is_err());
    }

    #[test]
    fn builder_overrides() {
        let config = AppConfig::default()
            .with_title("t")
            .with_size(10, 20)
            .with_text("abc")
            .with_vsync(false)
            .with_font("a.ttf")
            .with_colors(Color::WHITE, Color::BLACK)
            .with_log_level("debug");

        assert_eq!(config.title, "t");
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.text, "abc");
        assert!(!config.vsync);
        assert_eq!(config.font_path, Some(PathBuf::from("a.ttf")));
        assert_eq!(config.text_color, Color::WHITE);
        assert_eq!(config.background, Color::BLACK);
        assert_eq!(config.log_level, "debug");
    }
}
