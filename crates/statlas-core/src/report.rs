//! # Report Configuration
//!
//! The report generator's editable state: a title, an optional
//! description, an output format, and a fixed catalog of sections that
//! can be toggled in and out of the report.
//!
//! The catalog itself never changes shape. Toggling flips a section's
//! `included` flag; sections marked `required` ignore toggles, so at
//! least one section is always included.

use crate::primitives::{REPORT_STAGE_MS, SETTLE_DELAY_MS};
use crate::progress::{ProgressMode, StagePlan};
use crate::types::PresentationHint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage labels announced while a report run is in flight, in order.
pub const REPORT_STAGE_LABELS: [&str; 6] = [
    "Preparing data...",
    "Running statistical analysis...",
    "Generating visualizations...",
    "Creating presentation slides...",
    "Formatting PDF report...",
    "Finalizing documents...",
];

// =============================================================================
// OUTPUT FORMAT
// =============================================================================

/// Which document flavors a report run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Slide-oriented document only.
    Pptx,
    /// Print-oriented document only.
    Pdf,
    /// Both flavors in one run.
    #[default]
    Both,
}

impl ReportFormat {
    /// All formats, in catalog order.
    pub const ALL: [Self; 3] = [Self::Pptx, Self::Pdf, Self::Both];

    /// Stable identifier used on the wire and in CLI flags.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pptx => "pptx",
            Self::Pdf => "pdf",
            Self::Both => "both",
        }
    }

    /// Human-readable name shown in format pickers.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pptx => "PowerPoint",
            Self::Pdf => "PDF Report",
            Self::Both => "Both Formats",
        }
    }

    /// One-line description shown under the name.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pptx => "Interactive slides",
            Self::Pdf => "Static document",
            Self::Both => "PPTX + PDF",
        }
    }

    /// Icon hint for rendering front-ends.
    #[must_use]
    pub fn hint(&self) -> PresentationHint {
        match self {
            Self::Pptx => PresentationHint::Presentation,
            Self::Pdf => PresentationHint::Document,
            Self::Both => PresentationHint::Download,
        }
    }

    /// Whether this format produces the slide-oriented document.
    #[must_use]
    pub fn includes_slides(&self) -> bool {
        matches!(self, Self::Pptx | Self::Both)
    }

    /// Whether this format produces the print-oriented document.
    #[must_use]
    pub fn includes_pdf(&self) -> bool {
        matches!(self, Self::Pdf | Self::Both)
    }

    /// Parse a wire tag back into a format.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|format| format.tag() == tag)
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// One entry in the report's section catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    /// Stable identifier used on the wire and in CLI flags.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// One-line description of the section's contents.
    pub description: String,
    /// Icon hint for rendering front-ends.
    pub hint: PresentationHint,
    /// Whether the section goes into the generated report.
    pub included: bool,
    /// Required sections cannot be toggled out.
    pub required: bool,
}

impl ReportSection {
    fn catalog_entry(
        id: &str,
        name: &str,
        description: &str,
        hint: PresentationHint,
        included: bool,
        required: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            hint,
            included,
            required,
        }
    }
}

/// The section catalog with its default inclusion flags.
///
/// Six sections; all but hypothesis testing start included, and the
/// executive summary is required.
#[must_use]
pub fn default_sections() -> Vec<ReportSection> {
    vec![
        ReportSection::catalog_entry(
            "executive-summary",
            "Executive Summary",
            "High-level overview and key findings",
            PresentationHint::Document,
            true,
            true,
        ),
        ReportSection::catalog_entry(
            "descriptive-stats",
            "Descriptive Statistics",
            "Mean, median, standard deviation, quartiles",
            PresentationHint::BarChart,
            true,
            false,
        ),
        ReportSection::catalog_entry(
            "correlation-analysis",
            "Correlation Analysis",
            "Pearson correlation matrix with p-values",
            PresentationHint::TrendChart,
            true,
            false,
        ),
        ReportSection::catalog_entry(
            "regression-models",
            "Regression Analysis",
            "Linear regression models and coefficients",
            PresentationHint::PieChart,
            true,
            false,
        ),
        ReportSection::catalog_entry(
            "hypothesis-tests",
            "Hypothesis Testing",
            "T-tests, ANOVA, and significance testing",
            PresentationHint::Spreadsheet,
            false,
            false,
        ),
        ReportSection::catalog_entry(
            "visualizations",
            "Data Visualizations",
            "Charts, graphs, and plots",
            PresentationHint::BarChart,
            true,
            false,
        ),
    ]
}

// =============================================================================
// REPORT CONFIG
// =============================================================================

/// Editable configuration for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Report title; also drives the download file names.
    pub title: String,
    /// Free-text description, empty by default.
    pub description: String,
    /// Output format for the run.
    pub format: ReportFormat,
    sections: Vec<ReportSection>,
}

impl ReportConfig {
    /// Default configuration: stock title, empty description, both
    /// formats, catalog defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Data Analysis Report".to_string(),
            description: String::new(),
            format: ReportFormat::Both,
            sections: default_sections(),
        }
    }

    /// The full section catalog, in order.
    #[must_use]
    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// Look up a section by id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Sections currently included, in catalog order.
    #[must_use]
    pub fn included_sections(&self) -> Vec<&ReportSection> {
        self.sections
            .iter()
            .filter(|section| section.included)
            .collect()
    }

    /// Number of included sections. At least 1 while the required
    /// section holds.
    #[must_use]
    pub fn included_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|section| section.included)
            .count()
    }

    /// Flip a section's inclusion flag.
    ///
    /// Returns `false` without changes for unknown ids and for required
    /// sections.
    pub fn toggle_section(&mut self, id: &str) -> bool {
        let Some(section) = self
            .sections
            .iter_mut()
            .find(|section| section.id == id)
        else {
            return false;
        };
        if section.required {
            return false;
        }
        section.included = !section.included;
        true
    }

    /// Set a section's inclusion flag directly. Same refusal rules as
    /// [`Self::toggle_section`].
    pub fn set_section_included(&mut self, id: &str, included: bool) -> bool {
        let Some(section) = self
            .sections
            .iter_mut()
            .find(|section| section.id == id)
        else {
            return false;
        };
        if section.required {
            return false;
        }
        section.included = included;
        true
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// STAGE PLAN
// =============================================================================

/// Stage plan for a report run: six labelled stages with stage-weighted
/// percent.
#[must_use]
pub fn report_stage_plan() -> StagePlan {
    StagePlan::from_parts(
        REPORT_STAGE_LABELS
            .iter()
            .map(ToString::to_string)
            .collect(),
        ProgressMode::StageWeighted,
    )
}

/// Wall-clock estimate for a report run in milliseconds: all stages plus
/// the settle delay before documents appear.
#[must_use]
pub fn estimated_duration_ms() -> u64 {
    REPORT_STAGE_LABELS.len() as u64 * REPORT_STAGE_MS + SETTLE_DELAY_MS
}

// =============================================================================
// TESTS
// =============================================================================
