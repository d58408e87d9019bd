//! Human-readable duration strings for lap and sector times
//!
//! Times render the way pandas prints a `Timedelta`, which is what the frontend
//! already parses: `"0 days 00:01:37.284000"`. The fractional part is always six
//! digits (microseconds) and is dropped entirely when zero.

use std::time::Duration;

const SECS_PER_DAY: u64 = 86_400;

/// Format a duration as `"D days HH:MM:SS[.ffffff]"`.
pub fn format_timedelta(d: Duration) -> String {
    let total = d.as_secs();
    let days = total / SECS_PER_DAY;
    let rem = total % SECS_PER_DAY;
    let (hours, minutes, seconds) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    let micros = d.subsec_micros();

    if micros == 0 {
        format!("{days} days {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{days} days {hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    }
}

/// Convert float seconds (as OpenF1 reports times) to a `Duration`.
///
/// Returns `None` for negative, NaN or infinite inputs. Rounds to the nearest
/// microsecond so `97.284` does not come back as `97.283999`.
pub fn duration_from_secs(secs: f64) -> Option<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    let micros = (secs * 1_000_000.0).round() as u64;
    Some(Duration::from_micros(micros))
}
