//! # Document Export
//!
//! Turns editor state into downloadable JSON artifacts.
//!
//! Exports are structural stand-ins for the real PPTX/PDF pipelines: the
//! payload is pretty-printed JSON regardless of the advertised format,
//! and file names only borrow the target format's conventions. Export is
//! synchronous and does not consult the session store.

use crate::deck::{SlideDeck, SlideLayout};
use crate::primitives::{DECK_EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use crate::report::ReportConfig;
use crate::types::StatlasError;
use serde::{Deserialize, Serialize};

// =============================================================================
// FILE NAMES
// =============================================================================

/// Replace each run of whitespace in a title with a single underscore.
///
/// Non-whitespace characters pass through untouched, including leading
/// and trailing runs (they become underscores, not nothing).
#[must_use]
pub fn underscore_whitespace(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_run = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Download name for the slide-oriented report flavor.
#[must_use]
pub fn slides_file_name(title: &str) -> String {
    format!("{}.json", underscore_whitespace(title))
}

/// Download name for the print-oriented report flavor.
#[must_use]
pub fn pdf_file_name(title: &str) -> String {
    format!("{}_report.json", underscore_whitespace(title))
}

// =============================================================================
// ARTIFACTS
// =============================================================================

/// One downloadable document: a file name, its bytes, and a MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested download name.
    pub file_name: String,
    /// Serialized document payload.
    pub bytes: Vec<u8>,
    /// Always `application/json` for these stand-in exports.
    pub mime_type: String,
}

impl ExportArtifact {
    fn json(file_name: String, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            bytes,
            mime_type: EXPORT_MIME_TYPE.to_string(),
        }
    }
}

// =============================================================================
// DECK DOCUMENTS
// =============================================================================

/// One slide as written to the deck export.
///
/// Identity is dropped on the wire; only content and presentation
/// metadata survive. A missing image omits the key entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDocument {
    pub title: String,
    pub content: String,
    pub layout: SlideLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The deck export payload: slides in deck order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDocument {
    pub slides: Vec<SlideDocument>,
}

impl DeckDocument {
    /// Snapshot a deck's slides into wire form.
    #[must_use]
    pub fn from_deck(deck: &SlideDeck) -> Self {
        Self {
            slides: deck
                .slides()
                .iter()
                .map(|slide| SlideDocument {
                    title: slide.title.clone(),
                    content: slide.content.clone(),
                    layout: slide.layout,
                    image: slide.image.clone(),
                })
                .collect(),
        }
    }
}

/// Export a deck as a single JSON artifact named
/// `analysis_presentation.json`.
///
/// # Errors
///
/// Returns `StatlasError::SerializationError` if serialization fails.
pub fn export_deck(deck: &SlideDeck) -> Result<ExportArtifact, StatlasError> {
    let document = DeckDocument::from_deck(deck);
    let bytes = serde_json::to_vec_pretty(&document)
        .map_err(|e| StatlasError::SerializationError(format!("Deck: {}", e)))?;
    Ok(ExportArtifact::json(DECK_EXPORT_FILE_NAME.to_string(), bytes))
}

/// Parse a deck export back into its document form.
///
/// # Errors
///
/// Returns `StatlasError::DeserializationError` if the payload is not a
/// valid deck document.
pub fn import_deck(data: &[u8]) -> Result<DeckDocument, StatlasError> {
    serde_json::from_slice(data)
        .map_err(|e| StatlasError::DeserializationError(format!("Deck: {}", e)))
}

// =============================================================================
// REPORT DOCUMENTS
// =============================================================================

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One included section as written to a report export.
///
/// `required` appears on the wire only when set, mirroring how the
/// catalog marks its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDocument {
    pub id: String,
    pub name: String,
    pub description: String,
    pub included: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

/// A report export payload.
///
/// The slide flavor carries no `format` key; the print flavor sets it to
/// `"PDF"`. Both embed the included sections in catalog order and the
/// caller-supplied generation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub description: String,
    pub sections: Vec<SectionDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub generated: String,
}

impl ReportDocument {
    fn from_config(config: &ReportConfig, format: Option<&str>, generated: &str) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            sections: config
                .included_sections()
                .into_iter()
                .map(|section| SectionDocument {
                    id: section.id.clone(),
                    name: section.name.clone(),
                    description: section.description.clone(),
                    included: section.included,
                    required: section.required,
                })
                .collect(),
            format: format.map(ToString::to_string),
            generated: generated.to_string(),
        }
    }
}

/// Export a report configuration as one or two JSON artifacts, depending
/// on its format.
///
/// The slide flavor (`<Title>.json`) comes first, then the print flavor
/// (`<Title>_report.json`). `generated` is the run's wall-clock
/// timestamp; the core takes it as input so exports stay deterministic.
///
/// # Errors
///
/// Returns `StatlasError::SerializationError` if serialization fails.
pub fn export_report(
    config: &ReportConfig,
    generated: &str,
) -> Result<Vec<ExportArtifact>, StatlasError> {
    let mut artifacts = Vec::new();

    if config.format.includes_slides() {
        let document = ReportDocument::from_config(config, None, generated);
        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| StatlasError::SerializationError(format!("Slides: {}", e)))?;
        artifacts.push(ExportArtifact::json(slides_file_name(&config.title), bytes));
    }

    if config.format.includes_pdf() {
        let document = ReportDocument::from_config(config, Some("PDF"), generated);
        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| StatlasError::SerializationError(format!("Pdf: {}", e)))?;
        artifacts.push(ExportArtifact::json(pdf_file_name(&config.title), bytes));
    }

    Ok(artifacts)
}

/// Parse a report export back into its document form.
///
/// # Errors
///
/// Returns `StatlasError::DeserializationError` if the payload is not a
/// valid report document.
pub fn import_report(data: &[u8]) -> Result<ReportDocument, StatlasError> {
    serde_json::from_slice(data)
        .map_err(|e| StatlasError::DeserializationError(format!("Report: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================
