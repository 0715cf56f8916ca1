/// Milliseconds since the Unix epoch, as sent by browser clients (`Date.now()`).
pub type EpochMillis = i64;

/// All server-side timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> EpochMillis {
    chrono::Utc::now().timestamp_millis()
}
