//! # Core Type Definitions
//!
//! Shared types for the Statlas workflow engine:
//! - Identifiers (`SlideId`, `RunId`)
//! - Presentation hints for catalog entries (`PresentationHint`)
//! - Error types (`StatlasError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Use saturating arithmetic for counters to prevent overflow

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for a slide within a deck.
///
/// Ids are allocated by a per-deck monotonic counter, so a deck never
/// reuses an id even after deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlideId(pub u64);

impl SlideId {
    /// The next id in sequence, saturating at the maximum.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub u64);

impl RunId {
    /// The next id in sequence, saturating at the maximum.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

// =============================================================================
// PRESENTATION HINTS
// =============================================================================

/// Opaque rendering hint carried by catalog entries.
///
/// Section, format, and layout catalogs each tag their entries with one of
/// these. The engine never interprets them; a front-end maps them to
/// whatever visual it likes (an icon, a glyph, nothing at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationHint {
    /// A text document.
    Document,
    /// A picture or figure.
    Image,
    /// A duplicated / composite block.
    Duplicate,
    /// A bar chart.
    BarChart,
    /// A trend line.
    TrendChart,
    /// A pie chart.
    PieChart,
    /// A tabular spreadsheet.
    Spreadsheet,
    /// A slide presentation.
    Presentation,
    /// A download action.
    Download,
}

impl PresentationHint {
    /// Stable tag for serialized output and CLI display.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            PresentationHint::Document => "document",
            PresentationHint::Image => "image",
            PresentationHint::Duplicate => "duplicate",
            PresentationHint::BarChart => "bar-chart",
            PresentationHint::TrendChart => "trend-chart",
            PresentationHint::PieChart => "pie-chart",
            PresentationHint::Spreadsheet => "spreadsheet",
            PresentationHint::Presentation => "presentation",
            PresentationHint::Download => "download",
        }
    }
}

impl std::fmt::Display for PresentationHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Statlas system.
///
/// The simulated workflows themselves never fail; these variants cover the
/// tooling around them (file access, config parsing, artifact writing) and
/// the single-run guard at the driver seam.
#[derive(Debug, Error)]
pub enum StatlasError {
    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// A simulation run is already in flight on this driver.
    #[error("A simulation run is already in flight")]
    RunInFlight,
}

// =============================================================================
// TESTS
// =============================================================================
