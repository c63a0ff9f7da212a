//! Windowed viewer for FerrousEngine text rendering.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ferrous_app::{App, AppConfig};
//! use ferrous_font::FontOutlines;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default().with_text("Hello");
//!     let font = FontOutlines::load("assets/fonts/Roboto-Regular.ttf")?;
//!     App::new(config, Box::new(font)).run()
//! }
//! ```

pub mod builder;
mod graphics;
pub mod logging;
mod runner;

pub use builder::{App, AppConfig};

pub use ferrous_core::Color;
pub use ferrous_renderer::{SamplerConfig, TextStyle};
