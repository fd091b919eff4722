//! # Slide Deck Editor
//!
//! In-memory state machine for the presentation editor: an ordered list
//! of slides, a selected index, and an editing/previewing mode flag.
//!
//! Two invariants hold at all times:
//! - the deck contains at least one slide (the last slide cannot be
//!   deleted),
//! - the selected index points at an existing slide (re-clamped on
//!   delete).

use crate::types::SlideId;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SLIDE LAYOUT
// =============================================================================

/// Visual arrangement of a slide's title, body, and optional image.
///
/// Cosmetic metadata: layouts are recorded and exported but never change
/// how slide content is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    /// Title and body text only.
    #[default]
    TextOnly,
    /// Full-bleed image, no body text.
    ImageOnly,
    /// Text beside an image.
    TextImageSide,
    /// Text below an image.
    TextImageTop,
    /// Four content cells in a 2x2 arrangement.
    Grid,
}

impl SlideLayout {
    /// All layouts, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::TextOnly,
        Self::ImageOnly,
        Self::TextImageSide,
        Self::TextImageTop,
        Self::Grid,
    ];

    /// Stable identifier used on the wire.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TextOnly => "text-only",
            Self::ImageOnly => "image-only",
            Self::TextImageSide => "text-image-side",
            Self::TextImageTop => "text-image-top",
            Self::Grid => "grid",
        }
    }

    /// Human-readable name shown in layout pickers.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TextOnly => "Text Only",
            Self::ImageOnly => "Image Only",
            Self::TextImageSide => "Text + Image (Side)",
            Self::TextImageTop => "Text + Image (Top)",
            Self::Grid => "2x2 Grid",
        }
    }

    /// Parse a wire tag back into a layout.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|layout| layout.tag() == tag)
    }
}

impl fmt::Display for SlideLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// SLIDE
// =============================================================================

/// A single slide: identity, text content, and presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable identity, unique within the deck.
    pub id: SlideId,
    /// Slide heading.
    pub title: String,
    /// Body text; newlines separate paragraphs.
    pub content: String,
    /// Optional image reference.
    pub image: Option<String>,
    /// Visual arrangement.
    pub layout: SlideLayout,
}

impl Slide {
    /// A blank slide with the given identity.
    #[must_use]
    pub fn blank(id: SlideId) -> Self {
        Self {
            id,
            title: "New Slide".to_string(),
            content: String::new(),
            image: None,
            layout: SlideLayout::TextOnly,
        }
    }
}

// =============================================================================
// EDITOR MODE
// =============================================================================

/// Which surface of the editor is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorMode {
    /// Form fields for the selected slide are shown.
    #[default]
    Editing,
    /// A rendered view of the selected slide is shown.
    Previewing,
}

impl EditorMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Editing => Self::Previewing,
            Self::Previewing => Self::Editing,
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Editing => "editing",
            Self::Previewing => "previewing",
        };
        write!(f, "{label}")
    }
}

// =============================================================================
// SLIDE DECK
// =============================================================================

/// The editor's complete state: slides, selection, and mode.
///
/// Every mutation preserves the deck invariants; operations that would
/// break them (deleting the last slide, selecting past the end) are
/// ignored and report failure instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDeck {
    slides: Vec<Slide>,
    selected: usize,
    mode: EditorMode,
    next_id: SlideId,
}

impl SlideDeck {
    /// A new deck seeded with the starter slide, selected, in editing
    /// mode.
    #[must_use]
    pub fn new() -> Self {
        let starter = Slide {
            id: SlideId(1),
            title: "Statistical Analysis Results".to_string(),
            content: "This presentation contains comprehensive analysis of your data \
                      including descriptive statistics, correlation analysis, and \
                      regression modeling results."
                .to_string(),
            image: None,
            layout: SlideLayout::TextOnly,
        };
        Self {
            slides: vec![starter],
            selected: 0,
            mode: EditorMode::Editing,
            next_id: SlideId(2),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// All slides in deck order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides. Always at least 1.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Index of the selected slide.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected slide.
    #[must_use]
    pub fn selected_slide(&self) -> &Slide {
        // Invariant: selected is always within bounds of a non-empty deck.
        &self.slides[self.selected]
    }

    /// Current editor mode.
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Append a blank slide and select it. Returns the new slide's id.
    pub fn add_slide(&mut self) -> SlideId {
        let id = self.next_id;
        self.next_id = id.next();
        self.slides.push(Slide::blank(id));
        self.selected = self.slides.len() - 1;
        id
    }

    /// Delete the slide at `index`.
    ///
    /// Refused (returns `false`) when only one slide remains or the index
    /// is out of range. If the selection falls past the end afterwards it
    /// is clamped to the new last slide.
    pub fn delete_slide(&mut self, index: usize) -> bool {
        if self.slides.len() <= 1 || index >= self.slides.len() {
            return false;
        }
        self.slides.remove(index);
        if self.selected >= self.slides.len() {
            self.selected = self.slides.len() - 1;
        }
        true
    }

    /// Select the slide at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.selected = index;
        true
    }

    /// Replace the selected slide's title.
    pub fn update_title(&mut self, title: impl Into<String>) {
        self.selected_slide_mut().title = title.into();
    }

    /// Replace the selected slide's body text.
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.selected_slide_mut().content = content.into();
    }

    /// Set or clear the selected slide's image reference.
    pub fn update_image(&mut self, image: Option<String>) {
        self.selected_slide_mut().image = image;
    }

    /// Change the selected slide's layout.
    pub fn update_layout(&mut self, layout: SlideLayout) {
        self.selected_slide_mut().layout = layout;
    }

    /// Switch between editing and previewing. Returns the new mode.
    pub fn toggle_preview(&mut self) -> EditorMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Move the selection one slide back, stopping at the first slide.
    pub fn preview_prev(&mut self) -> usize {
        self.selected = self.selected.saturating_sub(1);
        self.selected
    }

    /// Move the selection one slide forward, stopping at the last slide.
    pub fn preview_next(&mut self) -> usize {
        self.selected = (self.selected + 1).min(self.slides.len() - 1);
        self.selected
    }

    fn selected_slide_mut(&mut self) -> &mut Slide {
        // Invariant: selected is always within bounds of a non-empty deck.
        &mut self.slides[self.selected]
    }
}

impl Default for SlideDeck {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
