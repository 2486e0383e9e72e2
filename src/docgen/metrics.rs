//! Glyph width tables for the built-in Helvetica faces.
//!
//! Widths are the AFM values (thousandths of an em) for the printable ASCII
//! range. Wrapping only needs to be close enough to keep lines inside the
//! content box, so characters outside the table fall back to a nominal width.

use super::renderer::FontStyle;

const FALLBACK_WIDTH: u16 = 556;

/// Helvetica widths for characters 0x20..=0x7E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20..0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0x30..0x39
    278, 278, 584, 584, 584, 556, 1015, // 0x3A..0x40
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 0x41..0x5A
    278, 278, 278, 469, 556, 333, // 0x5B..0x60
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556,
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 0x61..0x7A
    334, 260, 334, 584, // 0x7B..0x7E
];

/// Helvetica-Bold widths for characters 0x20..=0x7E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611,
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn glyph_width(ch: char, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD,
        // The oblique face shares the regular face's metrics.
        FontStyle::Regular | FontStyle::Oblique => &HELVETICA,
    };
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Measure a string in points at the given font size.
pub fn text_width_pt(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| glyph_width(ch, style) as u32).sum();
    units as f32 * size_pt / 1000.0
}

/// Greedy word wrap of a single paragraph (no embedded newlines) against a
/// maximum line width. Words wider than the line are hard-split so no line
/// ever exceeds the content box.
pub fn wrap_paragraph(text: &str, style: FontStyle, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let space_width = text_width_pt(" ", style, size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in text.split_whitespace() {
        for piece in split_oversized(word, style, size_pt, max_width_pt) {
            let piece_width = text_width_pt(&piece, style, size_pt);
            if current.is_empty() {
                current = piece;
                current_width = piece_width;
            } else if current_width + space_width + piece_width <= max_width_pt {
                current.push(' ');
                current.push_str(&piece);
                current_width += space_width + piece_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current = piece;
                current_width = piece_width;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_oversized(word: &str, style: FontStyle, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    if text_width_pt(word, style, size_pt) <= max_width_pt {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0f32;
    for ch in word.chars() {
        let w = glyph_width(ch, style) as f32 * size_pt / 1000.0;
        if !piece.is_empty() && width + w > max_width_pt {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_wider_text_as_wider() {
        let narrow = text_width_pt("ill", FontStyle::Regular, 12.0);
        let wide = text_width_pt("WWW", FontStyle::Regular, 12.0);
        assert!(wide > narrow);
    }

    #[test]
    fn bold_face_is_at_least_as_wide() {
        let regular = text_width_pt("Internship", FontStyle::Regular, 12.0);
        let bold = text_width_pt("Internship", FontStyle::Bold, 12.0);
        assert!(bold >= regular);
    }

    #[test]
    fn wrapped_lines_fit_the_content_box() {
        let text = "We are excited to extend an official online internship offer to you \
                    after a thorough review of your application and impressive qualifications";
        let max = 200.0;
        for line in wrap_paragraph(text, FontStyle::Regular, 12.0, max) {
            assert!(text_width_pt(&line, FontStyle::Regular, 12.0) <= max);
        }
    }

    #[test]
    fn wrapping_preserves_every_word_in_order() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_paragraph(text, FontStyle::Regular, 14.0, 120.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn oversized_word_is_hard_split() {
        let word = "a".repeat(400);
        let lines = wrap_paragraph(&word, FontStyle::Regular, 12.0, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_pt(line, FontStyle::Regular, 12.0) <= 100.0);
        }
        assert_eq!(lines.concat(), word);
    }
}
