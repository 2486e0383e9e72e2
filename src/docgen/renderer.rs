//! In-memory PDF rendering engine.
//!
//! Lays out styled text blocks onto fixed-geometry pages and serializes the
//! result to a byte buffer. The engine never touches durable storage; callers
//! own the returned bytes.

use printpdf::{
    Actions, BorderArray, BuiltinFont, Color, ColorArray, HighlightingMode, IndirectFontRef,
    LinkAnnotation, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use thiserror::Error;

use super::metrics::{text_width_pt, wrap_paragraph};

const MM_PER_PT: f32 = 25.4 / 72.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;
const DOCUMENT_TITLE: &str = "Renu Sharma Healthcare Education & Foundation";

/// Errors raised for malformed block input or failed PDF assembly.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("text block has no content")]
    EmptyBlock,
    #[error("text block has invalid font size {0}")]
    InvalidFontSize(f32),
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Fixed page geometry, in PDF points.
#[derive(Debug, Clone, Copy)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageConfig {
    /// A4 portrait with the letter generators' 50 pt margin.
    pub fn a4() -> Self {
        Self {
            width_pt: 595.28,
            height_pt: 841.89,
            margin_pt: 50.0,
        }
    }

    pub fn content_width_pt(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

impl FontStyle {
    fn builtin(self) -> BuiltinFont {
        match self {
            FontStyle::Regular => BuiltinFont::Helvetica,
            FontStyle::Bold => BuiltinFont::HelveticaBold,
            FontStyle::Oblique => BuiltinFont::HelveticaOblique,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

/// sRGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl TextColor {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    fn fill(self) -> Color {
        Color::Rgb(Rgb::new(self.r, self.g, self.b, None))
    }
}

/// One styled run of text. Paragraph breaks are embedded newlines; the
/// renderer wraps each paragraph against the content width.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub font: FontStyle,
    pub size_pt: f32,
    pub color: TextColor,
    pub align: Align,
    /// Extra leading between wrapped lines, on top of the font's own height.
    pub line_gap_pt: f32,
    /// Vertical gap inserted after the block.
    pub space_after_pt: f32,
    /// When set, every rendered line carries a clickable URI annotation.
    pub link: Option<String>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, font: FontStyle, size_pt: f32) -> Self {
        Self {
            text: text.into(),
            font,
            size_pt,
            color: TextColor::from_hex(0x333333),
            align: Align::Left,
            line_gap_pt: 0.0,
            space_after_pt: 0.0,
            link: None,
        }
    }

    pub fn color(mut self, color: TextColor) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn line_gap(mut self, gap_pt: f32) -> Self {
        self.line_gap_pt = gap_pt;
        self
    }

    pub fn space_after(mut self, space_pt: f32) -> Self {
        self.space_after_pt = space_pt;
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Oblique => &self.oblique,
        }
    }
}

/// Stateless layout engine over fixed page geometry.
pub struct PdfRenderer;

impl PdfRenderer {
    /// Render the blocks onto as many pages as the flow needs and return the
    /// serialized document.
    pub fn render(page: &PageConfig, blocks: &[TextBlock]) -> Result<Vec<u8>, RenderError> {
        for block in blocks {
            if block.text.trim().is_empty() {
                return Err(RenderError::EmptyBlock);
            }
            if block.size_pt <= 0.0 {
                return Err(RenderError::InvalidFontSize(block.size_pt));
            }
        }

        let (doc, first_page, first_layer) = PdfDocument::new(
            DOCUMENT_TITLE,
            Mm(page.width_pt * MM_PER_PT),
            Mm(page.height_pt * MM_PER_PT),
            "Layer 1",
        );
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
            oblique: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
        };

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut cursor_pt = page.height_pt - page.margin_pt;

        for block in blocks {
            layer.set_fill_color(block.color.fill());
            let line_advance = block.size_pt * LINE_HEIGHT_FACTOR + block.line_gap_pt;

            for paragraph in block.text.split('\n') {
                if paragraph.trim().is_empty() {
                    cursor_pt -= line_advance;
                    continue;
                }

                let lines =
                    wrap_paragraph(paragraph, block.font, block.size_pt, page.content_width_pt());
                let line_count = lines.len();
                for (line_index, line) in lines.into_iter().enumerate() {
                    cursor_pt -= line_advance;
                    if cursor_pt < page.margin_pt {
                        let (next_page, next_layer) = doc.add_page(
                            Mm(page.width_pt * MM_PER_PT),
                            Mm(page.height_pt * MM_PER_PT),
                            "Layer 1",
                        );
                        layer = doc.get_page(next_page).get_layer(next_layer);
                        layer.set_fill_color(block.color.fill());
                        cursor_pt = page.height_pt - page.margin_pt - line_advance;
                    }

                    // The closing line of a paragraph is never stretched.
                    let is_last_line = line_index + 1 == line_count;
                    draw_line(&layer, &fonts, page, block, &line, cursor_pt, is_last_line);
                }
            }

            cursor_pt -= block.space_after_pt;
        }

        Ok(doc.save_to_bytes()?)
    }
}

fn draw_line(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    page: &PageConfig,
    block: &TextBlock,
    line: &str,
    baseline_pt: f32,
    is_last_line: bool,
) {
    let line_width = text_width_pt(line, block.font, block.size_pt);
    let content_width = page.content_width_pt();
    let x_pt = match block.align {
        Align::Left | Align::Justify => page.margin_pt,
        Align::Center => page.margin_pt + (content_width - line_width).max(0.0) / 2.0,
        Align::Right => page.margin_pt + (content_width - line_width).max(0.0),
    };

    let gap_count = line.matches(' ').count();
    let mut drawn_width = line_width;
    if block.align == Align::Justify && !is_last_line && gap_count > 0 && line_width < content_width
    {
        let extra = (content_width - line_width) / gap_count as f32;
        layer.set_word_spacing(extra);
        drawn_width = content_width;
    }

    layer.use_text(
        line,
        block.size_pt,
        Mm(x_pt * MM_PER_PT),
        Mm(baseline_pt * MM_PER_PT),
        fonts.get(block.font),
    );

    if block.align == Align::Justify {
        layer.set_word_spacing(0.0);
    }

    if let Some(url) = &block.link {
        let rect = Rect::new(
            Mm(x_pt * MM_PER_PT),
            Mm((baseline_pt - block.size_pt * 0.25) * MM_PER_PT),
            Mm((x_pt + drawn_width) * MM_PER_PT),
            Mm((baseline_pt + block.size_pt) * MM_PER_PT),
        );
        layer.add_link_annotation(LinkAnnotation::new(
            rect,
            Some(BorderArray::default()),
            Some(ColorArray::default()),
            Actions::uri(url.clone()),
            Some(HighlightingMode::Invert),
        ));
    }
}
