mod layout;
mod text;

use coach_core::model::TranscriptEntry;
use lopdf::content::Content;
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::ExportError;
use layout::{FontFace, PAGE_HEIGHT, PAGE_WIDTH, PageLayout, SECTION_GAP};

pub use text::{REPLACEMENT, to_latin1};

pub const DEFAULT_TITLE: &str = "AI Interview Coach - Summary";

/// Renders a transcript as a PDF summary.
///
/// Output is a pure function of the entries and the title: no timestamps,
/// document IDs or other varying fields are written, so exporting the same
/// transcript twice yields identical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptExporter {
    title: String,
}

impl Default for TranscriptExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptExporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render `entries`, numbered from 1, into PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Pdf` if the content streams or the document
    /// cannot be serialized.
    pub fn export(&self, entries: &[TranscriptEntry]) -> Result<Vec<u8>, ExportError> {
        let mut layout = PageLayout::new();
        layout.write_block(FontFace::Regular, &to_latin1(&self.title));
        layout.gap(SECTION_GAP);

        for (idx, entry) in entries.iter().enumerate() {
            let number = idx + 1;
            layout.write_block(
                FontFace::Bold,
                &to_latin1(&format!("Question {number}: {}", entry.question())),
            );
            layout.write_block(
                FontFace::Regular,
                &to_latin1(&format!("Your Answer:\n{}", entry.answer())),
            );
            layout.write_block(
                FontFace::Regular,
                &to_latin1(&format!("AI Feedback:\n{}", entry.feedback())),
            );
            layout.gap(SECTION_GAP);
        }

        let document = build_document(layout.into_pages())?;
        tracing::debug!(
            entries = entries.len(),
            bytes = document.len(),
            "exported transcript"
        );
        Ok(document)
    }
}

fn build_document(pages: Vec<Vec<lopdf::content::Operation>>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).map_err(|e| ExportError::Pdf(e.to_string()))?;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}
