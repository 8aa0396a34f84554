//! Human-readable rendering of sizes, durations and wall-clock times.

use chrono::{Local, NaiveTime, TimeZone};

const SIZE_PREFIXES: [&str; 9] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y"];
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Time of day at `unix_timestamp` in the local timezone, 12-hour clock with
/// an AM/PM marker, e.g. `03:04:05 PM`.
///
/// Falls back to `--:--:--` for timestamps chrono cannot represent.
pub fn format_clock(unix_timestamp: i64) -> String {
  match Local.timestamp_opt(unix_timestamp, 0).single() {
    Some(time) => time.format("%I:%M:%S %p").to_string(),
    None => "--:--:--".to_string(),
  }
}

/// Render a duration in seconds as `HH:MM:SS`.
///
/// The duration is read as a time of day counted from midnight, so it wraps
/// back to `00:00:00` after `23:59:59`.
///
/// ```rust
/// use ffmpeg_bar::format::format_elapsed;
/// assert_eq!(format_elapsed(0), "00:00:00");
/// assert_eq!(format_elapsed(3661), "01:01:01");
/// assert_eq!(format_elapsed(86_399), "23:59:59");
/// ```
pub fn format_elapsed(seconds: i64) -> String {
  let since_midnight = seconds.rem_euclid(SECONDS_PER_DAY) as u32;
  NaiveTime::from_num_seconds_from_midnight_opt(since_midnight, 0)
    .map(|time| time.format("%H:%M:%S").to_string())
    .unwrap_or_else(|| "00:00:00".to_string())
}

/// Scale `size` by powers of 1024 and render it with a binary prefix.
///
/// ```rust
/// use ffmpeg_bar::format::format_size;
/// assert_eq!(format_size(1023, "B", 2), "1023.00 B");
/// assert_eq!(format_size(1024, "B", 2), "1.00 KB");
/// assert_eq!(format_size(5_500_000, "b", 1), "5.2 Mb");
/// ```
pub fn format_size(size: u64, unit: &str, decimal_places: usize) -> String {
  let mut magnitude = size as f64;
  let mut prefix = SIZE_PREFIXES[0];
  for next in SIZE_PREFIXES {
    prefix = next;
    if magnitude < 1024.0 {
      break;
    }
    magnitude /= 1024.0;
  }
  format!("{magnitude:.decimal_places$} {prefix}{unit}")
}
