//! PDF rendering via lopdf
//!
//! Builds an A4 document with the base-14 Helvetica family and
//! WinAnsiEncoding, so no font files ship with the binary. Text outside
//! the 8-bit encoding is replaced with `?` rather than failing the
//! export. Every page carries a "Research Report" header and a page
//! number footer.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::ExportError;
use super::markdown::{Line, classify, plain_text};

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const HEADER_Y: i64 = PAGE_HEIGHT - 40;
const CONTENT_TOP: i64 = PAGE_HEIGHT - 70;
const CONTENT_BOTTOM: i64 = 50;
const FOOTER_Y: i64 = 28;
const BULLET_INDENT: i64 = 20;
const BODY_SIZE: i64 = 12;
const BODY_LEADING: i64 = 16;
const HEADING_LEADING: i64 = 22;
const BLANK_GAP: i64 = 10;

// Average glyph width as a fraction of the font size; Helvetica has no
// width table here, so wrapping and centering work off this estimate.
const CHAR_WIDTH_FACTOR: f64 = 0.5;

/// Render report text to PDF bytes
pub fn render_pdf(text: &str) -> Result<Vec<u8>, ExportError> {
    let mut composer = PdfComposer::new();

    for raw_line in text.split('\n') {
        // Classification happens after cleaning, as replacement can only
        // turn marker bytes into `?`, never create new markers.
        let line = to_latin1(raw_line);
        match classify(&line) {
            Line::Blank => composer.gap(BLANK_GAP),
            Line::Heading { level, text } => {
                let size = heading_size(level);
                for part in wrap(text, max_chars(PAGE_WIDTH - 2 * MARGIN, size)) {
                    composer.text_line("F2", size, MARGIN, HEADING_LEADING, latin1_bytes(&part));
                }
            }
            Line::Bullet(item) => {
                let width = PAGE_WIDTH - 2 * MARGIN - BULLET_INDENT;
                for (i, part) in wrap(item, max_chars(width, BODY_SIZE)).into_iter().enumerate() {
                    // 0x95 is the WinAnsi bullet; continuation lines hang
                    let mut bytes = if i == 0 { vec![0x95, b' '] } else { Vec::new() };
                    bytes.extend(latin1_bytes(&part));
                    composer.text_line("F1", BODY_SIZE, MARGIN + BULLET_INDENT, BODY_LEADING, bytes);
                }
            }
            Line::Paragraph(para) => {
                let flattened = plain_text(para);
                for part in wrap(&flattened, max_chars(PAGE_WIDTH - 2 * MARGIN, BODY_SIZE)) {
                    composer.text_line("F1", BODY_SIZE, MARGIN, BODY_LEADING, latin1_bytes(&part));
                }
            }
        }
    }

    composer.finish_page();
    assemble(composer.pages)
}

fn heading_size(level: u8) -> i64 {
    match level {
        1 => 16,
        2 => 14,
        _ => 13,
    }
}

/// Replace characters the 8-bit target encoding cannot carry
fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
        .collect()
}

fn max_chars(width: i64, size: i64) -> usize {
    (width as f64 / (size as f64 * CHAR_WIDTH_FACTOR)).max(1.0) as usize
}

/// Greedy word wrap; words longer than the limit get a line of their own
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn centered_x(text: &str, size: i64) -> i64 {
    let width = text.chars().count() as f64 * size as f64 * CHAR_WIDTH_FACTOR;
    ((PAGE_WIDTH as f64 - width) / 2.0) as i64
}

fn text_ops(font: &str, size: i64, x: i64, y: i64, bytes: Vec<u8>) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(bytes)]),
        Operation::new("ET", vec![]),
    ]
}

/// Accumulates content operations page by page
struct PdfComposer {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: i64,
}

impl PdfComposer {
    fn new() -> Self {
        let mut composer = Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: CONTENT_TOP,
        };
        composer.start_page();
        composer
    }

    fn start_page(&mut self) {
        let title = "Research Report";
        self.current = text_ops("F2", 12, centered_x(title, 12), HEADER_Y, latin1_bytes(title));
        self.y = CONTENT_TOP;
    }

    fn finish_page(&mut self) {
        let footer = format!("Page {}", self.pages.len() + 1);
        self.current.extend(text_ops(
            "F3",
            8,
            centered_x(&footer, 8),
            FOOTER_Y,
            latin1_bytes(&footer),
        ));
        let operations = std::mem::take(&mut self.current);
        self.pages.push(operations);
    }

    fn text_line(&mut self, font: &str, size: i64, x: i64, leading: i64, bytes: Vec<u8>) {
        if self.y - leading < CONTENT_BOTTOM {
            self.finish_page();
            self.start_page();
        }
        self.y -= leading;
        self.current.extend(text_ops(font, size, x, self.y, bytes));
    }

    fn gap(&mut self, height: i64) {
        self.y -= height;
    }
}

fn font_dict(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(font_dict("Helvetica"));
    let font_bold = doc.add_object(font_dict("Helvetica-Bold"));
    let font_oblique = doc.add_object(font_dict("Helvetica-Oblique"));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
            "F3" => font_oblique,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_latin1_replaces_wide_chars() {
        assert_eq!(to_latin1("café"), "café");
        assert_eq!(to_latin1("report 🎉 done"), "report ? done");
        assert_eq!(to_latin1("em—dash"), "em?dash");
    }

    #[test]
    fn test_wrap_respects_word_boundaries() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_wrap_gives_long_words_their_own_line() {
        let lines = wrap("a supercalifragilistic b", 10);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_empty_text_still_advances_one_line() {
        assert_eq!(wrap("", 80), vec![String::new()]);
    }

    #[test]
    fn test_heading_sizes() {
        assert_eq!(heading_size(1), 16);
        assert_eq!(heading_size(2), 14);
        assert_eq!(heading_size(3), 13);
    }

    #[test]
    fn test_render_produces_valid_single_page_pdf() {
        let text = "# Summary\n\nShort report body.\n\n- one finding\n- another finding";
        let bytes = render_pdf(text).unwrap();

        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let extracted = doc.extract_text(&[1]).unwrap();
        assert!(extracted.contains("Research Report"));
        assert!(extracted.contains("Short report body."));
        assert!(extracted.contains("Page 1"));
    }

    #[test]
    fn test_render_breaks_onto_multiple_pages() {
        let text = (1..=80)
            .map(|i| format!("Body line number {} with a little padding text.", i))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render_pdf(&text).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 2);

        let extracted = doc.extract_text(&[2]).unwrap();
        assert!(extracted.contains("Page 2"));
    }

    #[test]
    fn test_render_strips_bold_markers_in_paragraphs() {
        let bytes = render_pdf("This is **important** and __underlined__.").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let extracted = doc.extract_text(&[1]).unwrap();

        assert!(extracted.contains("This is important and underlined."));
        assert!(!extracted.contains("**"));
    }

    #[test]
    fn test_render_replaces_out_of_encoding_chars() {
        let bytes = render_pdf("# Résumé 🎉\n\n- café — ünïcode ✓\n\n**Bold** and plain ©").unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        // Emoji, em dash and check mark fall outside the 8-bit encoding;
        // Latin-1 accents survive.
        let extracted = doc.extract_text(&[1]).unwrap();
        assert!(extracted.contains('?'));
        assert!(extracted.contains("Bold and plain"));
        assert!(!extracted.contains('🎉'));
    }

    #[test]
    fn test_render_empty_text_still_has_header_and_footer() {
        let bytes = render_pdf("").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let extracted = doc.extract_text(&[1]).unwrap();
        assert!(extracted.contains("Research Report"));
        assert!(extracted.contains("Page 1"));
    }
}
