//! Minimal deterministic PDF writer
//!
//! Emits a paginated PDF with embedded text operators (extractable by
//! downstream systems) using the standard Helvetica family only, so the
//! output never depends on environment fonts or locale. Content streams
//! are written uncompressed and every object offset is computed from the
//! byte stream itself: identical input drawing calls produce identical
//! output bytes.
//!
//! The writer is hand-assembled the same way thermal-receipt byte streams
//! are: a small builder with a fixed operator vocabulary.

use std::fmt::Write as _;

/// A4 portrait, in PDF points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

/// The three faces of the fixed document font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Oblique => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
        }
    }
}

/// Helvetica AFM widths for chars 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // 'A'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // 'a'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold AFM widths for chars 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // 'A'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389,
    556, 333, 611, 556, 778, 556, 556, 500, // 'a'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Advance width of `text` at `size` points.
///
/// Characters outside Latin-1 render as '?' (see [`encode_text`]) and are
/// measured as such, so centering stays consistent with what is drawn.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let table = match font {
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
        Font::Regular | Font::Oblique => &HELVETICA_WIDTHS,
    };
    let units: u64 = text
        .chars()
        .map(|c| {
            let code = match u32::from(c) {
                32..=126 => u32::from(c),
                // Latin-1 supplement beyond the table: approximate with
                // the lowercase average.
                160..=255 => return 556u64,
                _ => u32::from('?'),
            };
            u64::from(table[(code - 32) as usize])
        })
        .sum();
    (units as f64) * size / 1000.0
}

/// Escape and encode a string for a PDF literal string in WinAnsi.
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let byte = match u32::from(c) {
            code @ 32..=126 => code as u8,
            code @ 160..=255 => code as u8,
            _ => b'?',
        };
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            _ => out.push(byte),
        }
    }
    out
}

fn fmt_coord(value: f64) -> String {
    format!("{value:.2}")
}

/// Accumulates drawing operators for one page.
#[derive(Debug, Default)]
pub struct PageBuilder {
    ops: Vec<u8>,
}

impl PageBuilder {
    /// Draw `text` with its baseline at `(x, y)` (PDF coordinates, origin
    /// bottom-left).
    pub fn text(&mut self, x: f64, y: f64, font: Font, size: f64, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut op = String::new();
        let _ = write!(
            op,
            "BT /{} {} Tf {} {} Td (",
            font.resource(),
            fmt_coord(size),
            fmt_coord(x),
            fmt_coord(y)
        );
        self.ops.extend_from_slice(op.as_bytes());
        self.ops.extend_from_slice(&encode_text(text));
        self.ops.extend_from_slice(b") Tj ET\n");
    }

    /// Stroke a straight line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        let mut op = String::new();
        let _ = writeln!(
            op,
            "{} w {} {} m {} {} l S",
            fmt_coord(width),
            fmt_coord(x1),
            fmt_coord(y1),
            fmt_coord(x2),
            fmt_coord(y2)
        );
        self.ops.extend_from_slice(op.as_bytes());
    }

    /// Stroke a rectangle outline. `(x, y)` is the lower-left corner.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, width: f64) {
        let mut op = String::new();
        let _ = writeln!(
            op,
            "{} w {} {} {} {} re S",
            fmt_coord(width),
            fmt_coord(x),
            fmt_coord(y),
            fmt_coord(w),
            fmt_coord(h)
        );
        self.ops.extend_from_slice(op.as_bytes());
    }
}

/// Collects finished pages and serializes the document.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    pages: Vec<PageBuilder>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new page and return it for drawing.
    pub fn new_page(&mut self) -> &mut PageBuilder {
        self.pages.push(PageBuilder::default());
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// The page currently being drawn, opening the first page on demand.
    pub fn page_mut(&mut self) -> &mut PageBuilder {
        if self.pages.is_empty() {
            self.pages.push(PageBuilder::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize all pages into final PDF bytes.
    ///
    /// Object numbering is fixed: 1 catalog, 2 page tree, 3-5 fonts, then
    /// a page/content object pair per page in order.
    pub fn finish(self) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n");

        let page_count = self.pages.len();
        let first_page_obj = 6;

        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", first_page_obj + i * 2))
            .collect();

        push_object(&mut buf, &mut offsets, b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
        push_object(
            &mut buf,
            &mut offsets,
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), page_count)
                .into_bytes(),
        );
        for font in [Font::Regular, Font::Bold, Font::Oblique] {
            push_object(
                &mut buf,
                &mut offsets,
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .into_bytes(),
            );
        }

        for (i, page) in self.pages.into_iter().enumerate() {
            let content_obj = first_page_obj + i * 2 + 1;
            push_object(
                &mut buf,
                &mut offsets,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH:.2} {PAGE_HEIGHT:.2}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R /F3 5 0 R >> >> \
                     /Contents {content_obj} 0 R >>"
                )
                .into_bytes(),
            );

            let mut stream = format!("<< /Length {} >>\nstream\n", page.ops.len()).into_bytes();
            stream.extend_from_slice(&page.ops);
            stream.extend_from_slice(b"endstream");
            push_object(&mut buf, &mut offsets, stream);
        }

        let xref_offset = buf.len();
        let object_count = offsets.len() + 1;
        let mut xref = format!("xref\n0 {object_count}\n0000000000 65535 f \n");
        for offset in &offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        buf.extend_from_slice(xref.as_bytes());
        let _ = write!(
            buf_string(&mut buf),
            "trailer\n<< /Size {object_count} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );

        buf
    }
}

fn push_object(buf: &mut Vec<u8>, offsets: &mut Vec<usize>, body: Vec<u8>) {
    offsets.push(buf.len());
    let number = offsets.len();
    buf.extend_from_slice(format!("{number} 0 obj\n").as_bytes());
    buf.extend_from_slice(&body);
    buf.extend_from_slice(b"\nendobj\n");
}

/// Adapter so `write!` can append UTF-8 (here: pure ASCII) to a byte buffer.
struct BufWriter<'a>(&'a mut Vec<u8>);

impl std::fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn buf_string(buf: &mut Vec<u8>) -> BufWriter<'_> {
    BufWriter(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_drawing_produces_identical_bytes() {
        let build = || {
            let mut doc = DocumentBuilder::new();
            let page = doc.new_page();
            page.text(40.0, 800.0, Font::Bold, 16.0, "QUOTATION");
            page.line(40.0, 790.0, 555.0, 790.0, 0.8);
            doc.finish()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn output_has_pdf_framing_and_embedded_text() {
        let mut doc = DocumentBuilder::new();
        doc.new_page().text(40.0, 800.0, Font::Regular, 10.0, "Tile A");
        let bytes = doc.finish();

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Tile A) Tj"), "text must be embedded as operators");
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn parens_and_backslashes_are_escaped() {
        let mut doc = DocumentBuilder::new();
        doc.new_page().text(40.0, 800.0, Font::Regular, 10.0, r"600x600 (Glossy) \ matt");
        let bytes = doc.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains(r"600x600 \(Glossy\) \\ matt"));
    }

    #[test]
    fn width_metrics_are_monotone_in_text_length() {
        let short = text_width("Std", Font::Regular, 9.0);
        let long = text_width("Standard", Font::Regular, 9.0);
        assert!(long > short);
        // Bold runs wider than regular for the same text.
        assert!(text_width("Total", Font::Bold, 9.0) > text_width("Total", Font::Regular, 9.0));
    }

    #[test]
    fn multiple_pages_are_indexed_in_order() {
        let mut doc = DocumentBuilder::new();
        doc.new_page().text(40.0, 800.0, Font::Regular, 10.0, "one");
        doc.new_page().text(40.0, 800.0, Font::Regular, 10.0, "two");
        assert_eq!(doc.page_count(), 2);
        let bytes = doc.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Kids [6 0 R 8 0 R]"));
        assert!(text.contains("/Count 2"));
    }
}
