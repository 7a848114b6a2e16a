//! Debug logging to an optional file.
//!
//! `log` records from this crate go through `ReleaseNotesLogger`, tracing
//! spans and events through a `tracing-subscriber` registry; both end up in
//! the file set with [`set_log_file`]. Nothing is written until
//! [`enable_logging`] is called.

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable that turns on verbose logging
pub const VERBOSE_ENV_VAR: &str = "RELEASE_NOTES_VERBOSE";

/// Targets muted unless verbose logging is on
const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "h2", "rustls", "want", "mio", "git2"];

struct LogState {
    enabled: bool,
    verbose: bool,
    file: Option<File>,
}

static STATE: Mutex<LogState> = parking_lot::const_mutex(LogState {
    enabled: false,
    verbose: false,
    file: None,
});

fn append_to_file(bytes: &[u8]) {
    if let Some(file) = STATE.lock().file.as_mut() {
        let _ = file.write_all(bytes);
        let _ = file.flush();
    }
}

/// Tracing writer; events share the log file with `log` records
#[derive(Clone)]
struct FileWriter;

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        append_to_file(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> fmt::MakeWriter<'a> for FileWriter {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter
    }
}

struct ReleaseNotesLogger;

static LOGGER: ReleaseNotesLogger = ReleaseNotesLogger;

impl log::Log for ReleaseNotesLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let state = STATE.lock();
        if !state.enabled || metadata.level() > Level::Debug {
            return false;
        }

        state.verbose || !is_noisy(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "{} {} [{}] - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
        append_to_file(line.as_bytes());
    }

    fn flush(&self) {}
}

fn is_noisy(target: &str) -> bool {
    NOISY_TARGETS.iter().any(|noisy| target.starts_with(noisy))
}

/// Whether the environment asks for verbose logs
fn verbose_requested(verbose_var: Option<&str>, rust_log: Option<&str>) -> bool {
    verbose_var.is_some() || rust_log.is_some_and(|v| v.contains("debug") || v.contains("trace"))
}

/// Installs the `log` logger and the tracing subscriber. Safe to call twice.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::OnceLock;
    static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

    let result = INIT_RESULT.get_or_init(|| {
        let verbose_var = std::env::var(VERBOSE_ENV_VAR).ok();
        let rust_log = std::env::var("RUST_LOG").ok();
        if verbose_requested(verbose_var.as_deref(), rust_log.as_deref()) {
            set_verbose_logging(true);
        }

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "release_notes=debug,warn".into());

        let fmt_layer = fmt::Layer::new()
            .with_target(true)
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(FileWriter);

        let tracing_result = Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
        let log_result =
            log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug));

        match (tracing_result, log_result) {
            (Err(tracing_err), Err(log_err)) => Err(format!(
                "Failed to initialize logging: tracing={tracing_err}, log={log_err}"
            )),
            _ => Ok(()),
        }
    });

    result.clone().map_err(Into::into)
}

pub fn enable_logging() {
    STATE.lock().enabled = true;
}

pub fn disable_logging() {
    STATE.lock().enabled = false;
}

pub fn set_verbose_logging(enabled: bool) {
    STATE.lock().verbose = enabled;
}

/// Turns verbose logging on when `enabled`; never turns it off
pub fn request_verbose_logging(enabled: bool) {
    STATE.lock().verbose |= enabled;
}

pub fn is_verbose_logging() -> bool {
    STATE.lock().verbose
}

pub fn set_log_file(file_path: &str) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    STATE.lock().file = Some(file);
    Ok(())
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}
