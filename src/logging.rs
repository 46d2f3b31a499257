use crate::util::hex::pretty_hex;
use log::{debug, error, info, log_enabled, warn, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// Verbosity follows `RUST_LOG`, e.g. `RUST_LOG=dcp_rs=trace` to see every
/// block the telegram decoder walks over.
pub fn init_logger() {
    env_logger::init();
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}

/// Logs a labelled hex dump of a raw frame at debug level.
pub fn log_frame_hex(label: &str, data: &[u8]) {
    if log_enabled!(Level::Debug) {
        debug!("{label} ({} bytes):\n{}", data.len(), pretty_hex(data, 16));
    }
}
