use gloo::console;
use log::{Level, LevelFilter, Metadata, Record};

/// Browser console logger.
///
/// Used directly through the `*_with_component` helpers and installed as the
/// `log` backend so records from the `shared` core land in the same console.
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Register as the global `log` backend. Later calls are no-ops.
    pub fn init(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }

    pub fn debug_with_component(component: &str, message: &str) {
        console::debug!(Self::line(component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::info!(Self::line(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(Self::line(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(Self::line(component, message));
    }

    fn line(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        let component = record.target();
        match record.level() {
            Level::Error => Self::error_with_component(component, &message),
            Level::Warn => Self::warn_with_component(component, &message),
            Level::Info => Self::info_with_component(component, &message),
            Level::Debug | Level::Trace => Self::debug_with_component(component, &message),
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_line_prefixes_component() {
        assert_eq!(Logger::line("odometer", "ready"), "[odometer] ready");
    }
}
