use std::ffi::OsString;

use thiserror::Error;

#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsensitiveStatus {
    Ok = 0,
    InvalidArgument = 1,
    Disabled = 2,
    IoError = 3,
}

#[repr(i32)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub enum InsensitiveLogLevel {
    Off = 0,
    Error = 1,
    #[default]
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl InsensitiveLogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "0" => Some(Self::Off),
            "error" | "1" => Some(Self::Error),
            "warn" | "warning" | "2" => Some(Self::Warn),
            "info" | "3" => Some(Self::Info),
            "debug" | "4" => Some(Self::Debug),
            "trace" | "5" => Some(Self::Trace),
            _ => None,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Error),
            2 => Some(Self::Warn),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::Trace),
            _ => None,
        }
    }
}

/// Where log records go once the logger is installed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum LogDestination {
    #[default]
    Stderr,
    File(OsString),
}

/// Snapshot of the resolver counters, laid out for the C ABI.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ResolverMetrics {
    pub exact_hits: u64,
    pub excluded: u64,
    pub cache_hits: u64,
    pub scans: u64,
    pub scan_matches: u64,
    pub no_matches: u64,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected one of off, error, warn, info, debug, trace")]
    InvalidLogLevel { key: &'static str, value: String },

    #[error("invalid value {value:?} for {key}: expected a boolean (1/0, true/false, yes/no, on/off)")]
    InvalidFlag { key: &'static str, value: String },

    #[error("{key} is not valid UTF-8")]
    NotUnicode { key: &'static str },
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum BindError {
    #[error("could not find original function {0}")]
    MissingSymbol(&'static str),
}
