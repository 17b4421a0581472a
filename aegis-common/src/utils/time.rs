use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current UNIX timestamp in seconds.
///
/// Used to stamp transactions, lifecycle events, and the statistics
/// register's `last_updated` field.
///
/// # Panics
///
/// Panics if the system clock is set before the UNIX epoch.
pub fn current_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before UNIX EPOCH")
        .as_secs()
}
