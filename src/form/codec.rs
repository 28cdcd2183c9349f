//! Conversion between a total-seconds duration and the hours/minutes/seconds
//! triple shown in the timer form.

pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Split a duration into `(hours, minutes, seconds)`.
///
/// Hours are not capped, so durations stored outside the form's nominal
/// range still display.
pub fn decode(total_seconds: u32) -> (i64, i64, i64) {
    let total = i64::from(total_seconds);
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total % SECONDS_PER_MINUTE;
    (hours, minutes, seconds)
}

/// Combine form fields into total seconds. Performs no clamping.
pub fn encode(hours: i64, minutes: i64, seconds: i64) -> i64 {
    hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds
}

/// Like [`encode`], but `None` when the total does not fit in an `i64`.
pub fn checked_encode(hours: i64, minutes: i64, seconds: i64) -> Option<i64> {
    hours
        .checked_mul(SECONDS_PER_HOUR)?
        .checked_add(minutes.checked_mul(SECONDS_PER_MINUTE)?)?
        .checked_add(seconds)
}

/// Render a duration as `HH:MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    let (h, m, s) = decode(total_seconds);
    format!("{:02}:{:02}:{:02}", h, m, s)
}
