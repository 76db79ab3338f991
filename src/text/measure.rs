//! Text Measurement
//!
//! Utilities for measuring text in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width and control characters: 0 cells

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Number of user-perceived characters (extended grapheme clusters).
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

#[inline]
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Measure the height of text when wrapped to a given width.
///
/// Returns the number of lines the text would occupy: 0 for empty text,
/// at least 1 otherwise.
pub fn measure_text_height(text: &str, available_width: usize) -> usize {
    if text.is_empty() {
        return 0;
    }

    if available_width == 0 {
        return 1;
    }

    let mut lines = 0usize;
    let mut current_line_width = 0usize;

    for c in text.chars() {
        if c == '\n' {
            lines += 1;
            current_line_width = 0;
            continue;
        }

        let w = char_width(c);
        if current_line_width + w > available_width && current_line_width > 0 {
            lines += 1;
            current_line_width = w;
        } else {
            current_line_width += w;
        }
    }

    if current_line_width > 0 || lines == 0 {
        lines += 1;
    }

    lines.max(1)
}
