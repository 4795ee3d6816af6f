use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as unix seconds.
///
/// Falls back to zero if the system clock reads before the epoch.
pub(crate) fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
