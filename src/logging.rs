/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;
use std::sync::Arc;

/// Target used for every record the client emits
pub const LOG_TARGET: &str = "immich";

/// Forwards records to whatever logger is installed for the process.
#[derive(Debug, Default)]
pub struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            log::logger().log(record);
        }
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// Logger handed to a client at construction.
#[derive(Clone)]
pub(crate) struct ClientLogger {
    sink: Arc<dyn Log>,
    level: LevelFilter,
}

impl ClientLogger {
    pub(crate) fn new(sink: Arc<dyn Log>, level: LevelFilter) -> Self {
        Self { sink, level }
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        level <= self.level
            && self
                .sink
                .enabled(&Metadata::builder().level(level).target(LOG_TARGET).build())
    }

    pub(crate) fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.sink.log(
            &Record::builder()
                .level(level)
                .target(LOG_TARGET)
                .module_path_static(Some(module_path!()))
                .args(args)
                .build(),
        );
    }
}

impl fmt::Debug for ClientLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientLogger")
            .field("level", &self.level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CaptureLogger {
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.lines
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    #[test]
    fn records_are_filtered_by_client_level() {
        let capture = Arc::new(CaptureLogger::default());
        let logger = ClientLogger::new(capture.clone(), LevelFilter::Error);

        logger.log(Level::Debug, format_args!("hidden {}", 1));
        logger.log(Level::Error, format_args!("failed with status code {}", 500));

        let lines = capture.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], (Level::Error, "failed with status code 500".to_string()));
    }

    #[test]
    fn off_level_is_silent() {
        let capture = Arc::new(CaptureLogger::default());
        let logger = ClientLogger::new(capture.clone(), LevelFilter::Off);

        logger.log(Level::Error, format_args!("nothing"));
        assert!(!logger.enabled(Level::Error));
        assert!(capture.lines.lock().unwrap().is_empty());
    }
}
