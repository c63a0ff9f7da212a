//! Installs the global logger for the viewer binary.

use log::LevelFilter;

/// Parses a level name as accepted in `AppConfig::log_level`.
pub fn parse_level(name: &str) -> anyhow::Result<LevelFilter> {
    name.parse::<LevelFilter>()
        .map_err(|_| anyhow::anyhow!("unknown log level {:?}", name))
}

/// Routes `log` records at or above `level` to stderr as
/// `[LEVEL target] message`.  wgpu internals are capped at `warn`.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("wgpu_core", LevelFilter::Warn)
        .level_for("wgpu_hal", LevelFilter::Warn)
        .level_for("naga", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| anyhow::anyhow!("cannot install logger: {e}"))
}
