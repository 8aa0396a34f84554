//! One-line progress bar with elapsed time, remaining time and ETA.

use crate::{
  clock::Clock,
  format::{format_clock, format_elapsed},
};

/// Width used when the caller passes `0`.
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// Shown in place of the remaining time and ETA until the first frame lands.
pub const UNKNOWN_TIME: &str = "--:--:--";

const TRAILING_PADDING: usize = 10;

/// Render `value` out of `total` as a status line:
///
/// ```text
/// 50 / 100 [==========          ] 50% 00:00:10 / 00:00:10 (03:04:05 PM)
/// ```
///
/// Elapsed time is measured from `start` to `clock.now()`. The total run time
/// is extrapolated linearly from the fraction done; remaining time is that
/// estimate minus the elapsed time, and the ETA is `start` plus the estimate.
/// At 0% there is nothing to extrapolate from, so remaining time and ETA are
/// rendered as [`UNKNOWN_TIME`]. Past 100% remaining time stays at zero and
/// the ETA at now.
///
/// Returns an empty string when `total` is zero. The line ends with spaces so
/// that redrawing it over a longer previous line leaves no residue.
pub fn render_progress<C: Clock>(
  value: u64,
  total: u64,
  start: i64,
  bar_width: usize,
  clock: &C,
) -> String {
  if total == 0 {
    return String::new();
  }
  let bar_width = match bar_width {
    0 => DEFAULT_BAR_WIDTH,
    width => width,
  };

  let percent = value as f64 / total as f64 * 100.0;
  let filled = ((bar_width as f64 * percent / 100.0) as usize).min(bar_width);
  let bar = format!("{}{}", "=".repeat(filled), " ".repeat(bar_width - filled));

  let now = clock.now();
  let elapsed = now - start;
  let (remaining, eta) = if percent > 0.0 {
    let estimated_total = (elapsed as f64 / (percent / 100.0)) as i64;
    // Past 100% the estimate lies behind us.
    (
      format_elapsed((estimated_total - elapsed).max(0)),
      format_clock((start + estimated_total).max(now)),
    )
  } else {
    (UNKNOWN_TIME.to_string(), UNKNOWN_TIME.to_string())
  };

  format!(
    "{value} / {total} [{bar}] {}% {} / {remaining} ({eta}){}",
    percent as u64,
    format_elapsed(elapsed),
    " ".repeat(TRAILING_PADDING),
  )
}
