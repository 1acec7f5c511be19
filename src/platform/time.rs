//! Clocks

const MS_PER_DAY: f64 = 86_400_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;

/// Wall clock in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall clock in milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Minutes to add to local time to get UTC, as `Date.getTimezoneOffset` reports
/// them (positive west of Greenwich)
#[cfg(target_arch = "wasm32")]
pub fn utc_offset_min() -> f64 {
    js_sys::Date::new_0().get_timezone_offset()
}

/// Native sessions count days in UTC
#[cfg(not(target_arch = "wasm32"))]
pub fn utc_offset_min() -> f64 {
    0.0
}

/// Local calendar day (days since the epoch) containing `ms`, for a zone
/// `utc_offset_min` minutes behind UTC
pub fn day_number(ms: f64, utc_offset_min: f64) -> i64 {
    ((ms - utc_offset_min * MS_PER_MINUTE) / MS_PER_DAY).floor() as i64
}

/// Today's local calendar day
pub fn today() -> i64 {
    day_number(now_ms(), utc_offset_min())
}
