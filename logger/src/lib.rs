//! Global logging sink for the emulator.
//!
//! The sink is chosen once at startup with [`init_logger`]: either stdout or
//! a file in the system temp directory. Every line is prefixed with the time
//! elapsed since init, so instruction traces can be correlated with the
//! emulated cycle count.

use std::{
    fs::File,
    io::{self, Write},
    sync::Mutex,
    time::Instant,
};

use chrono::Utc;
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<Logger> = OnceCell::new();

/// Where log lines end up.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum LogKind {
    /// Log to the console. The default.
    Stdout,

    /// Log to /tmp/tangelo-<timestamp>.log
    File,
}

struct Sink {
    out: Box<dyn Write + Send>,
    started: Instant,
}

impl Sink {
    fn new(kind: LogKind) -> Self {
        let started = Instant::now();
        match kind {
            LogKind::Stdout => Self {
                out: Box::new(io::stdout()),
                started,
            },
            LogKind::File => {
                let filename = format!("tangelo-{}.log", Utc::now().timestamp());
                let path = std::env::temp_dir().join(filename);
                Self {
                    out: Box::new(File::create(path).expect("failed to create log file")),
                    started,
                }
            }
        }
    }

    fn write<T: std::fmt::Display>(&mut self, data: T) {
        let elapsed = self.started.elapsed();
        let seconds = elapsed.as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds / 60) % 60;
        let seconds = seconds % 60;
        let millis = elapsed.subsec_millis();

        // A failed write only loses the log line, never the emulation.
        let _ = writeln!(
            self.out,
            "[{hours:02}:{minutes:02}:{seconds:02}.{millis:03}] {data}"
        );
    }
}

struct Logger {
    sink: Mutex<Sink>,
}

impl Logger {
    fn new(kind: LogKind) -> Self {
        Self {
            sink: Mutex::new(Sink::new(kind)),
        }
    }

    fn log<T: std::fmt::Display>(&self, data: T) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.write(data);
        }
    }
}

/// Selects the log sink. Calling it twice is a no-op; logging before any call
/// drops the lines.
pub fn init_logger(kind: LogKind) {
    LOGGER.set(Logger::new(kind)).ok();
}

/// Writes one timestamped line to the active sink.
pub fn log<T: std::fmt::Display>(data: T) {
    if let Some(logger) = LOGGER.get() {
        logger.log(data);
    }
}
