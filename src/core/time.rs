//! Duration text: `mm:ss` or bare seconds to milliseconds and back.
//!
//! Parsing is total. Input that does not match the grammar yields zero
//! rather than an error.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1_000;

/// Parse duration text, returning 0 for anything unrecognised.
///
/// Accepts a bare non-negative integer (seconds) or `m:ss` / `mm:ss` /
/// `mmm:ss` with exactly two second digits.
///
/// ```
/// use table_clock::core::time;
///
/// assert_eq!(time::parse("05:00"), 300_000);
/// assert_eq!(time::parse("90"), 90_000);
/// assert_eq!(time::parse("5m"), 0);
/// ```
#[must_use]
pub fn parse(text: &str) -> u64 {
    try_parse(text).unwrap_or(0)
}

/// Parse duration text, using `fallback` when the result would be zero.
#[must_use]
pub fn parse_or(text: &str, fallback: u64) -> u64 {
    match parse(text) {
        0 => fallback,
        ms => ms,
    }
}

/// Parse duration text, returning `None` when it does not match the grammar.
#[must_use]
pub fn try_parse(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if all_digits(text) {
        let seconds: u64 = text.parse().ok()?;
        return seconds.checked_mul(MS_PER_SECOND);
    }

    let (minutes, seconds) = text.split_once(':')?;
    if !(1..=3).contains(&minutes.len()) || seconds.len() != 2 {
        return None;
    }
    if !all_digits(minutes) || !all_digits(seconds) {
        return None;
    }

    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    Some((minutes * 60 + seconds) * MS_PER_SECOND)
}

/// Render milliseconds as zero-padded `mm:ss`, dropping partial seconds.
///
/// ```
/// use table_clock::core::time;
///
/// assert_eq!(time::format(61_999), "01:01");
/// assert_eq!(time::format(0), "00:00");
/// ```
#[must_use]
pub fn format(ms: u64) -> String {
    let total_seconds = ms / MS_PER_SECOND;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Like [`format`], clamping negative values to zero.
#[must_use]
pub fn format_signed(ms: i64) -> String {
    format(u64::try_from(ms).unwrap_or(0))
}

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
