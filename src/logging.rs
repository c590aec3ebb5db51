use crate::common::types::{InsensitiveLogLevel, InsensitiveStatus, LogDestination};
use crate::config::Config;

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

const MODE_DISABLED: u8 = 0;
const MODE_STDERR: u8 = 1;
const MODE_FILE: u8 = 2;

pub struct InsensitiveLogger {
    mode: AtomicU8,
    level: AtomicU8,
    file: Mutex<Option<File>>,
}

impl InsensitiveLogger {
    const fn new() -> Self {
        Self {
            mode: AtomicU8::new(MODE_DISABLED),
            level: AtomicU8::new(InsensitiveLogLevel::Off as u8),
            file: Mutex::new(None),
        }
    }

    fn level(&self) -> Option<Level> {
        level_from_u8(self.level.load(Ordering::Relaxed))
    }

    fn set_level(&self, level: InsensitiveLogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
        log::set_max_level(level_filter_from_u8(level as u8));
    }

    fn set_mode(&self, mode: u8) {
        self.mode.store(mode, Ordering::Relaxed);
    }

    fn set_file(&self, file: Option<File>) {
        if let Ok(mut slot) = self.file.lock() {
            *slot = file;
        }
    }
}

impl Log for InsensitiveLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let Some(level) = self.level() else {
            return false;
        };
        metadata.level() <= level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match self.mode.load(Ordering::Relaxed) {
            MODE_STDERR => {
                let _ = write_record(&mut io::stderr().lock(), None, record);
            }
            MODE_FILE => {
                let Ok(mut slot) = self.file.lock() else {
                    return;
                };
                if let Some(file) = slot.as_mut() {
                    let _ = write_record(file, Some(std::process::id()), record);
                }
            }
            _ => {}
        }
    }

    fn flush(&self) {
        if let Ok(mut slot) = self.file.lock() {
            if let Some(file) = slot.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Returns write failures instead of panicking; callers drop them.
fn write_record<W: Write>(out: &mut W, pid: Option<u32>, record: &Record) -> io::Result<()> {
    match pid {
        Some(pid) => writeln!(out, "[insensitive][{}][pid {}] {}", record.level(), pid, record.args()),
        None => writeln!(out, "[insensitive][{}] {}", record.level(), record.args()),
    }
}

static LOGGER: InsensitiveLogger = InsensitiveLogger::new();
static LOGGER_STATE: OnceLock<LoggerInstall> = OnceLock::new();

#[derive(Copy, Clone)]
enum LoggerInstall {
    Installed,
    External,
}

fn init_logger() -> LoggerInstall {
    *LOGGER_STATE.get_or_init(|| match log::set_logger(&LOGGER) {
        Ok(()) => {
            log::set_max_level(LevelFilter::Off);
            LoggerInstall::Installed
        }
        Err(_) => LoggerInstall::External,
    })
}

fn level_filter_from_u8(level: u8) -> LevelFilter {
    match level_from_u8(level) {
        Some(level) => level.to_level_filter(),
        None => LevelFilter::Off,
    }
}

fn level_from_u8(level: u8) -> Option<Level> {
    match level {
        x if x == InsensitiveLogLevel::Error as u8 => Some(Level::Error),
        x if x == InsensitiveLogLevel::Warn as u8 => Some(Level::Warn),
        x if x == InsensitiveLogLevel::Info as u8 => Some(Level::Info),
        x if x == InsensitiveLogLevel::Debug as u8 => Some(Level::Debug),
        x if x == InsensitiveLogLevel::Trace as u8 => Some(Level::Trace),
        _ => None,
    }
}

/// Applies the logging part of `config`. A log file that cannot be opened
/// falls back to stderr.
pub fn install(config: &Config) {
    match &config.log_destination {
        LogDestination::Stderr => {
            log_set_stderr(config.log_level);
        }
        LogDestination::File(path) => {
            if log_set_file(path, config.log_level) != InsensitiveStatus::Ok {
                log_set_stderr(config.log_level);
                log::warn!(
                    "could not open log file {}; logging to stderr",
                    path.to_string_lossy()
                );
            }
        }
    }
}

pub fn log_set_stderr(level: InsensitiveLogLevel) -> InsensitiveStatus {
    if matches!(init_logger(), LoggerInstall::External) {
        return InsensitiveStatus::IoError;
    }
    LOGGER.set_file(None);
    LOGGER.set_mode(MODE_STDERR);
    LOGGER.set_level(level);
    InsensitiveStatus::Ok
}

pub fn log_set_file(path: &OsStr, level: InsensitiveLogLevel) -> InsensitiveStatus {
    if matches!(init_logger(), LoggerInstall::External) {
        return InsensitiveStatus::IoError;
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return InsensitiveStatus::IoError,
    };
    LOGGER.set_file(Some(file));
    LOGGER.set_mode(MODE_FILE);
    LOGGER.set_level(level);
    InsensitiveStatus::Ok
}

pub fn log_set_level(level: InsensitiveLogLevel) -> InsensitiveStatus {
    match init_logger() {
        LoggerInstall::Installed => {
            LOGGER.set_level(level);
            InsensitiveStatus::Ok
        }
        LoggerInstall::External => {
            log::set_max_level(level_filter_from_u8(level as u8));
            InsensitiveStatus::Ok
        }
    }
}

pub fn log_disable() -> InsensitiveStatus {
    match init_logger() {
        LoggerInstall::Installed => {
            LOGGER.set_mode(MODE_DISABLED);
            LOGGER.set_level(InsensitiveLogLevel::Off);
            LOGGER.set_file(None);
            InsensitiveStatus::Ok
        }
        LoggerInstall::External => {
            log::set_max_level(LevelFilter::Off);
            InsensitiveStatus::Ok
        }
    }
}
