//! Line wrapping and page placement for the summary document.
//!
//! Geometry follows an A4 portrait page with 10 mm side margins, a 1 mm cell
//! padding and 10 mm line height at 12 pt. Widths come from the standard
//! Helvetica AFM metrics for printable ASCII; other bytes use the digit width.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

const fn mm(value: f32) -> f32 {
    value * 72.0 / 25.4
}

pub(crate) const PAGE_WIDTH: f32 = mm(210.0);
pub(crate) const PAGE_HEIGHT: f32 = mm(297.0);
pub(crate) const FONT_SIZE: i64 = 12;
pub(crate) const LINE_HEIGHT: f32 = mm(10.0);
pub(crate) const SECTION_GAP: f32 = mm(5.0);

const MARGIN: f32 = mm(10.0);
const BOTTOM_MARGIN: f32 = mm(20.0);
const CELL_PADDING: f32 = mm(1.0);
const TEXT_X: f32 = MARGIN + CELL_PADDING;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * (MARGIN + CELL_PADDING);
const DEFAULT_GLYPH_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    pub(crate) fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    fn glyph_width(self, byte: u8) -> u16 {
        let table = match self {
            FontFace::Regular => &HELVETICA,
            FontFace::Bold => &HELVETICA_BOLD,
        };
        byte.checked_sub(b' ')
            .and_then(|idx| table.get(usize::from(idx)))
            .copied()
            .unwrap_or(DEFAULT_GLYPH_WIDTH)
    }

    /// Rendered width in points at the document font size.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn text_width(self, text: &[u8]) -> f32 {
        let units: u32 = text.iter().map(|b| u32::from(self.glyph_width(*b))).sum();
        units as f32 * FONT_SIZE as f32 / 1000.0
    }
}

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines always start a new line and a single word wider than the
/// line is split between characters. Runs of spaces and leading indentation
/// are kept; only the space a line is broken at is dropped.
pub(crate) fn wrap(face: FontFace, text: &[u8], max_width: f32) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();

    for paragraph in text.split(|b| *b == b'\n') {
        let paragraph = paragraph.strip_suffix(b"\r").unwrap_or(paragraph);
        let mut line: Vec<u8> = Vec::new();
        // Empty words stand for extra spaces, so `line` being empty does not
        // mean nothing has been placed yet.
        let mut started = false;

        for word in paragraph.split(|b| *b == b' ') {
            let mut candidate = line.clone();
            if started {
                candidate.push(b' ');
            }
            candidate.extend_from_slice(word);
            if face.text_width(&candidate) <= max_width {
                line = candidate;
                started = true;
                continue;
            }

            if started {
                lines.push(std::mem::take(&mut line));
            }
            started = true;
            if face.text_width(word) <= max_width {
                line = word.to_vec();
                continue;
            }
            for byte in word {
                line.push(*byte);
                if line.len() > 1 && face.text_width(&line) > max_width {
                    line.pop();
                    lines.push(std::mem::replace(&mut line, vec![*byte]));
                }
            }
        }

        lines.push(line);
    }

    lines
}

/// Accumulates text operations page by page, top to bottom.
pub(crate) struct PageLayout {
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Distance from the top edge to the top of the next line.
    cursor: f32,
}

impl PageLayout {
    pub(crate) fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Vec::new(),
            cursor: MARGIN,
        }
    }

    /// Wrap and place a block of text.
    pub(crate) fn write_block(&mut self, face: FontFace, text: &[u8]) {
        for line in wrap(face, text, TEXT_WIDTH) {
            self.write_line(face, &line);
        }
    }

    fn write_line(&mut self, face: FontFace, line: &[u8]) {
        if self.cursor + LINE_HEIGHT > PAGE_HEIGHT - BOTTOM_MARGIN {
            self.finished.push(std::mem::take(&mut self.current));
            self.cursor = MARGIN;
        }

        if !line.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let baseline =
                PAGE_HEIGHT - (self.cursor + 0.5 * LINE_HEIGHT + 0.3 * FONT_SIZE as f32);
            self.current.extend([
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![face.resource_name().into(), Object::Integer(FONT_SIZE)],
                ),
                Operation::new("Td", vec![TEXT_X.into(), baseline.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(line.to_vec(), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ]);
        }
        self.cursor += LINE_HEIGHT;
    }

    /// Blank vertical space; never forces a page break on its own.
    pub(crate) fn gap(&mut self, height: f32) {
        self.cursor += height;
    }

    pub(crate) fn into_pages(mut self) -> Vec<Vec<Operation>> {
        self.finished.push(self.current);
        self.finished
    }
}
