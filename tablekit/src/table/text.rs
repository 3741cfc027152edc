//! Display-width helpers for the text renderer.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use super::column::Alignment;

pub fn display_width(s: &str) -> usize {
    s.width()
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cuts `s` to `max_width` columns, ending with an ellipsis when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > target {
            break;
        }
        result.push(ch);
        width += w;
    }
    result.push('…');
    result
}

/// Fits `s` into exactly `width` columns.
pub fn pad_aligned(s: &str, width: usize, align: Alignment) -> String {
    let text = truncate_to_width(s, width);
    let gap = width.saturating_sub(display_width(&text));
    let (left, right) = match align {
        Alignment::Left => (0, gap),
        Alignment::Right => (gap, 0),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
    }

    #[test]
    fn test_pad_aligned() {
        assert_eq!(pad_aligned("ab", 5, Alignment::Left), "ab   ");
        assert_eq!(pad_aligned("ab", 5, Alignment::Right), "   ab");
        assert_eq!(pad_aligned("ab", 5, Alignment::Center), " ab  ");
        assert_eq!(pad_aligned("日本", 5, Alignment::Left), "日本 ");
    }
}
