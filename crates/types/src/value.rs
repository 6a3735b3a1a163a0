//! Helpers for PJL textual values.
//!
//! Every PJL variable value is stored as text. PDL interpreters pull numbers
//! out of that text with the same forgiving rules a C `atoi`/`atof` would
//! apply: leading whitespace is skipped, the longest numeric prefix is used,
//! and anything unparsable is zero.

/// Case-insensitive (ASCII) equality of two PJL names or values.
pub fn compare(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Converts a value to an integer using its longest leading integer prefix.
///
/// A prefix too large for `i64` also yields zero; see [`try_to_int`].
pub fn to_int(value: &str) -> i64 {
    try_to_int(value).unwrap_or(0)
}

/// Like [`to_int`], but `None` when the leading integer overflows `i64`.
pub fn try_to_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return Some(0);
    }
    s[..end].parse().ok()
}

/// Converts a value to a float using its longest leading decimal prefix.
pub fn to_float(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end].parse().unwrap_or(0.0)
}
