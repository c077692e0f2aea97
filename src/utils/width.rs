//! Column width utilities.
//!
//! Terminal lines are measured in printable columns, not bytes: a multi-byte
//! glyph such as `█` takes one column, a wide CJK character takes two and ANSI
//! escape sequences take none. Measuring is delegated to [`console`].

use console::{measure_text_width, pad_str, truncate_str, Alignment};

/// Return the number of printable columns `text` occupies.
///
/// # Example
///
/// ```rust
/// use barpool::utils::text_width;
///
/// assert_eq!(text_width("█▉▊"), 3);
/// assert_eq!(text_width("abc"), 3);
/// ```
pub fn text_width(text: &str) -> usize {
    measure_text_width(text)
}

/// Truncate or right-pad `text` with spaces so it is exactly `width` columns wide.
///
/// A wide character that would straddle the boundary is dropped and the gap is
/// filled with a space, so the result never overflows.
pub fn fit_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let truncated = truncate_str(text, width, "");
    let padded = pad_str(&truncated, width, Alignment::Left, None);
    padded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_pads_short_lines() {
        let line = fit_width("abc", 6);
        assert_eq!(line, "abc   ");
        assert_eq!(text_width(&line), 6);
    }

    #[test]
    fn test_fit_width_truncates_long_lines() {
        assert_eq!(fit_width("abcdef", 4), "abcd");
    }

    #[test]
    fn test_fit_width_counts_columns_not_bytes() {
        let line = fit_width("███", 5);
        assert_eq!(text_width(&line), 5);
        assert!(line.starts_with("███"));
    }

    #[test]
    fn test_fit_width_wide_glyph_on_boundary() {
        // Each CJK character takes two columns.
        let line = fit_width("日本語", 5);
        assert_eq!(text_width(&line), 5);
    }

    #[test]
    fn test_fit_width_zero() {
        assert_eq!(fit_width("anything", 0), "");
    }
}
