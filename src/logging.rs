//! Diagnostic logging setup.
//!
//! Command echoes are plain stdout lines (see `exec::run`); everything else
//! goes through the `log` facade to stderr via `fern`.

use log::LevelFilter;

/// Environment variable selecting the diagnostic log level.
pub const LOG_ENV: &str = "DCOS_NET_SETUP_LOG";

/// Level used when [`LOG_ENV`] is unset or unrecognised.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Parse a level name, falling back to [`DEFAULT_LEVEL`].
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install the stderr logger. Safe to call once per process.
pub fn setup_logging(level: LevelFilter) {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}: {}: {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Warning: failed to initialise logging: {}", e);
    }
}
