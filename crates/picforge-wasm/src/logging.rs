//! `log` backend writing to the browser console.
//!
//! Core crates log through the `log` facade; this module routes those
//! records to `console.error` / `console.warn` / `console.info` /
//! `console.debug` so they show up with the right severity in dev tools.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        write_console(record.level(), &line);
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{}] {}: {}", level, target, message)
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, _line: &str) {}

/// Parse a level name as accepted by [`set_log_level`].
fn parse_filter(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

/// Install the console logger. Later calls only adjust the level.
pub(crate) fn install(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::trace!("console logger already installed");
    }
    log::set_max_level(level);
}

/// Change how verbose the core library is in the console.
///
/// Accepts `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_filter(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    install(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_filter(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_filter("off"), Some(LevelFilter::Off));
        assert_eq!(parse_filter("loud"), None);
    }

    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(Level::Warn, "picforge_core::idphoto", "using original bytes"),
            "[WARN] picforge_core::idphoto: using original bytes"
        );
    }

    #[test]
    fn test_install_is_repeatable() {
        install(LevelFilter::Info);
        install(LevelFilter::Warn);
        log::warn!("visible only in a browser console");
    }
}
