//! Logging sinks for the engine.
//!
//! Everything in the engine logs through the [`log`](::log) facade. This module provides the two
//! sinks applications install: a [`ConsoleLogger`] that prints to stdout and a [`ChannelLogger`]
//! that forwards records over a channel so they can be drained elsewhere (tests, overlays).

mod channel;

use ::log::{Level, Metadata, Record};

pub use channel::{ChannelLogger, LogMessage};

/// A logger printing `LEVEL - message` lines to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    level: Level,
}

impl ConsoleLogger {
    /// Construct a console logger which prints records at or above `level`.
    #[inline]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }
}

impl ::log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Initialize the console logger for the engine.
///
/// Only the first logger installed in a process takes effect; later calls leave it in place.
pub fn init(level: Level) {
    let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger::new(level)));
    if ::log::set_logger(logger).is_ok() {
        ::log::set_max_level(level.to_level_filter());
    }
}

/// Install a [`ChannelLogger`] as the process logger and return the receiving end.
///
/// Returns `None` if another logger was already installed.
pub fn init_channel(level: Level) -> Option<crossbeam::channel::Receiver<LogMessage>> {
    let (logger, receiver) = ChannelLogger::with_receiver(level);
    let logger: &'static ChannelLogger = Box::leak(Box::new(logger));
    ::log::set_logger(logger).ok()?;
    ::log::set_max_level(level.to_level_filter());
    Some(receiver)
}

#[cfg(test)]
mod tests {
    use ::log::Log;

    use super::*;

    #[test]
    fn console_logger_filters_by_level() {
        // Given
        let logger = ConsoleLogger::new(Level::Warn);

        // Then
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Info).build()));
    }
}
