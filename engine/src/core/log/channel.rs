use crossbeam::channel::{Receiver, Sender, unbounded};
use ::log::{Level, Metadata, Record};

/// A single record forwarded by a [`ChannelLogger`].
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub level: Level,
    pub message: String,
}

/// A logger which forwards records over a channel instead of printing them.
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    level: Level,
}

impl ::log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // A dropped receiver just means nobody is listening any more.
            let _ = self.sender.try_send(LogMessage {
                level: record.metadata().level(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    pub fn new(sender: Sender<LogMessage>, level: Level) -> Self {
        Self { sender, level }
    }

    pub fn with_receiver(level: Level) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender, level), receiver)
    }
}
