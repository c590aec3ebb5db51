use std::fs;

use insensitive::logging::{log_disable, log_set_file, log_set_level};
use insensitive::{global, InsensitiveLogLevel, InsensitiveStatus};

const TARGET: &str = "insensitive::logging_test";

#[test]
fn file_logging_receives_records() {
    let _guard = crate::LOG_MUTEX.lock().unwrap_or_else(|err| err.into_inner());
    global::config();
    let temp = tempfile::tempdir().expect("create temp dir");
    let log_path = temp.path().join("insensitive.log");

    let status = log_set_file(log_path.as_os_str(), InsensitiveLogLevel::Info);
    assert_eq!(status, InsensitiveStatus::Ok);

    log::info!(target: TARGET, "logging smoke test");
    log::debug!(target: TARGET, "debug should be filtered");
    log::logger().flush();
    log_disable();

    let contents = fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.contains("[insensitive][INFO]"), "log was {contents:?}");
    assert!(contents.contains("logging smoke test"));
    assert!(!contents.contains("debug should be filtered"));
}

#[test]
fn logging_level_off_suppresses_records() {
    let _guard = crate::LOG_MUTEX.lock().unwrap_or_else(|err| err.into_inner());
    global::config();
    let temp = tempfile::tempdir().expect("create temp dir");
    let log_path = temp.path().join("quiet.log");

    assert_eq!(
        log_set_file(log_path.as_os_str(), InsensitiveLogLevel::Info),
        InsensitiveStatus::Ok
    );
    assert_eq!(log_set_level(InsensitiveLogLevel::Off), InsensitiveStatus::Ok);

    log::error!(target: TARGET, "should not be logged");
    log::logger().flush();
    log_disable();

    let contents = fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.is_empty(), "log was {contents:?}");
}

#[test]
fn unwritable_log_file_is_an_error() {
    let _guard = crate::LOG_MUTEX.lock().unwrap_or_else(|err| err.into_inner());
    global::config();
    let temp = tempfile::tempdir().expect("create temp dir");
    let missing_dir = temp.path().join("no-such-dir").join("x.log");
    assert_eq!(
        log_set_file(missing_dir.as_os_str(), InsensitiveLogLevel::Info),
        InsensitiveStatus::IoError
    );
    log_disable();
}
