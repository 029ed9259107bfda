//! Control-loop logger.
//!
//! Prints `[elapsed LEVEL] message` lines to stderr. Per-frame diagnostics
//! (no-target frames, suppressed commands) log at debug and command
//! traffic at info, so the default info level keeps a steady tracking run
//! readable. Install once at startup with `init_with_level`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

struct LoopLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for LoopLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Seconds.millis since startup; frame timing at typical capture
        // rates is legible at millisecond resolution.
        let elapsed = self.started.elapsed();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:4}.{:03}s {:5}] {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<LoopLogger> = OnceLock::new();

/// Install the loop logger with the provided level filter.
///
/// Later calls are no-ops, so the binary and library consumers can both
/// call this safely.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| LoopLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
