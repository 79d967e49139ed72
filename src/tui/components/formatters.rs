// Number formatters
//
// Shared formatting utilities for displaying numbers in the TUI.

use crate::data::overview::group_thousands;
use unicode_width::UnicodeWidthChar;

/// Format a yuan amount: 65423.7 -> "¥ 65,424"
pub fn format_yuan(amount: f64) -> String {
    format!("¥ {}", group_thousands(amount.round() as u64))
}

/// Format a signed day-over-day delta: 12.34 -> "+12.3%", -0.9 -> "-0.9%"
pub fn format_delta(delta: f64) -> String {
    format!("{:+.1}%", delta)
}

/// Truncate a string to a display width, appending an ellipsis when cut.
/// CJK characters are double-width, so byte or char counts would misalign
/// table columns.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yuan_rounds_and_groups() {
        assert_eq!(format_yuan(65423.7), "¥ 65,424");
        assert_eq!(format_yuan(999.2), "¥ 999");
    }

    #[test]
    fn delta_keeps_sign() {
        assert_eq!(format_delta(12.34), "+12.3%");
        assert_eq!(format_delta(-0.9), "-0.9%");
        assert_eq!(format_delta(0.0), "+0.0%");
    }

    #[test]
    fn truncation_counts_cjk_as_double_width() {
        // 5 CJK chars = width 10, fits
        assert_eq!(truncate_width("山东红富士", 10), "山东红富士");

        let cut = truncate_width("山东红富士苹果 5斤装", 8);
        assert!(cut.ends_with('…'));
        let w: usize = cut.chars().map(|c| c.width().unwrap_or(0)).sum();
        assert!(w <= 8);
    }
}
