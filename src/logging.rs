//! Browser console logging for the `log` facade.

use log::{Level, LevelFilter};

/// Install the console logger at `default` verbosity.
///
/// Returns `false` when a logger was already installed; the current level is
/// then left alone.
pub fn install_console_logging(default: Level) -> bool {
    console_log::init_with_level(default).is_ok()
}

/// Change verbosity, installing the console logger first if needed.
pub fn set_console_log_level(filter: LevelFilter) {
    install_console_logging(Level::Info);
    log::set_max_level(filter);
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}
