//! `ferrous_viewer [CONFIG.toml]`: opens a window and draws the configured
//! text with the jittered-coverage renderer.

use anyhow::Context as _;
use ferrous_app::{logging, App, AppConfig};
use ferrous_font::{tofu_outline, FontOutlines, GlyphTable, OutlineProvider, DEFAULT_UNITS_PER_EM};

fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    logging::init(logging::parse_level(&config.log_level)?)?;

    let provider: Box<dyn OutlineProvider> = match &config.font_path {
        Some(path) => Box::new(
            FontOutlines::load(path)
                .with_context(|| format!("cannot load font {}", path.display()))?,
        ),
        None => {
            log::warn!("no font_path configured; every character renders as a box");
            Box::new(
                GlyphTable::new(DEFAULT_UNITS_PER_EM)
                    .with_fallback(tofu_outline(), DEFAULT_UNITS_PER_EM),
            )
        }
    };

    log::info!("rendering {:?}", config.text);
    App::new(config, provider).run()
}
