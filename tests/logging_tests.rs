//! Unit tests for the logging functionality in the `dcp-rs` crate.

use dcp_rs::logging::{init_logger, log_debug, log_error, log_frame_hex, log_info, log_warn};

/// Logging helpers must not panic with or without an initialized logger.
#[test]
fn test_logging() {
    log_error("This is an error message");
    log_warn("This is a warning message");
    log_info("This is an info message");
    log_debug("This is a debug message");
    log_frame_hex("Identify request", &[0xfe, 0xfe, 0x05, 0x00]);
    log_frame_hex("Empty frame", &[]);
}

#[test]
fn test_init_logger() {
    init_logger();
}
