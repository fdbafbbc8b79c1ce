use anyhow::{Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record};

/// Writes every enabled record to stderr; the level is set through
/// `log::set_max_level`.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|err| anyhow!("Error initializing logger: {err}"))?;
    log::set_max_level(level);
    Ok(())
}
