//! # statlas-core
//!
//! The deterministic workflow engine for Statlas - THE LOGIC.
//!
//! This crate models everything the demo surfaces do that is actually
//! state: the staged progress simulator, file intake and its session
//! handoff, the report configuration, the slide deck editor, and the
//! JSON document exports.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Holds all editor and run state; front-ends only render it
//! - Never reads clocks: time advances only through explicit ticks, and
//!   timestamps are caller-supplied
//! - Never touches the filesystem or network; exports are byte buffers
//! - Has NO async (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod deck;
pub mod export;
pub mod intake;
pub mod primitives;
pub mod progress;
pub mod report;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{PresentationHint, RunId, SlideId, StatlasError};

// =============================================================================
// RE-EXPORTS: Workflow Engine
// =============================================================================

pub use deck::{EditorMode, Slide, SlideDeck, SlideLayout};
pub use export::{
    DeckDocument, ExportArtifact, ReportDocument, SectionDocument, SlideDocument, export_deck,
    export_report, import_deck, import_report, pdf_file_name, slides_file_name,
    underscore_whitespace,
};
pub use intake::{Intake, IntakeRecord, mime_for_extension, upload_stage_plan};
pub use progress::{CompletionToken, ProgressMode, SimulationRun, StagePlan};
pub use report::{
    REPORT_STAGE_LABELS, ReportConfig, ReportFormat, ReportSection, default_sections,
    estimated_duration_ms, report_stage_plan,
};
pub use session::SessionStore;
