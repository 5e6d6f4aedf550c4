//! Time representation for frame lookups.
//! All media times are nanoseconds (i64) from the start of the asset.

/// Time in nanoseconds since the start of the asset
pub type Time = i64;

/// Time constants for conversions
pub mod constants {
    use super::Time;

    pub const NANOS_PER_SECOND: Time = 1_000_000_000;
    pub const NANOS_PER_MILLI: Time = 1_000_000;
    pub const NANOS_PER_MICRO: Time = 1_000;
}

/// Time zero constant
pub const ZERO: Time = 0;

/// Convert seconds (f64) to nanoseconds (i64)
#[inline]
pub fn from_seconds(seconds: f64) -> Time {
    (seconds * constants::NANOS_PER_SECOND as f64).round() as Time
}

/// Convert nanoseconds (i64) to seconds (f64)
#[inline]
pub fn to_seconds(nanos: Time) -> f64 {
    nanos as f64 / constants::NANOS_PER_SECOND as f64
}

/// Convert nanoseconds to milliseconds
#[inline]
pub fn to_millis(nanos: Time) -> i64 {
    nanos / constants::NANOS_PER_MILLI
}

/// Convert FFmpeg's AV_TIME_BASE units (microseconds) to nanoseconds
#[inline]
pub fn from_micros(micros: i64) -> Time {
    micros.saturating_mul(constants::NANOS_PER_MICRO)
}

/// Convert nanoseconds to microseconds (AV_TIME_BASE units)
#[inline]
pub fn to_micros(nanos: Time) -> i64 {
    nanos / constants::NANOS_PER_MICRO
}

/// Convert a stream timestamp expressed in `num/den` seconds to nanoseconds
#[inline]
pub fn from_timebase(ts: i64, num: i32, den: i32) -> Time {
    if den == 0 {
        return ZERO;
    }
    let nanos = ts as i128 * num as i128 * constants::NANOS_PER_SECOND as i128 / den as i128;
    nanos.clamp(i64::MIN as i128, i64::MAX as i128) as Time
}

/// Stream start time in nanoseconds. Unset (`AV_NOPTS_VALUE`) or negative
/// starts count as zero.
#[inline]
pub fn start_from_timebase(start: i64, num: i32, den: i32) -> Time {
    if start == i64::MIN || start <= 0 {
        return ZERO;
    }
    from_timebase(start, num, den)
}

/// Asset-relative time to absolute stream time
#[inline]
pub fn to_stream_time(at: Time, start: Time) -> Time {
    at.saturating_add(start)
}

/// Absolute stream time to asset-relative time, never before the start
#[inline]
pub fn from_stream_time(ts: Time, start: Time) -> Time {
    ts.saturating_sub(start).max(ZERO)
}

/// Format time as MM:SS.mmm, with an hour prefix for long assets
pub fn format_time(nanos: Time) -> String {
    let nanos = nanos.max(0);
    let total_millis = to_millis(nanos);
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis / 60_000) % 60;
    let seconds = (total_millis / 1000) % 60;
    let millis = total_millis % 1000;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}
