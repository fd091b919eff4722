//! # Workflow Primitives
//!
//! Hardcoded runtime constants for the Statlas workflows.
//!
//! These values reproduce the product's advertised behavior exactly and are
//! compiled into the binary. The app layer may override the timing values
//! through its configuration; everything else is immutable at runtime.

/// Percent added to upload progress on each tick.
///
/// The upload workflow ramps 0 → 100 in steps of this size, so a full ramp
/// takes `100 / UPLOAD_STEP_PERCENT` ticks.
pub const UPLOAD_STEP_PERCENT: u8 = 10;

/// Default delay between upload progress ticks, in milliseconds.
pub const UPLOAD_TICK_MS: u64 = 100;

/// Default duration of one report generation stage, in milliseconds.
pub const REPORT_STAGE_MS: u64 = 1500;

/// Default delay between the last report stage and artifact emission,
/// in milliseconds.
pub const SETTLE_DELAY_MS: u64 = 500;

/// Default delay between upload completion and the analysis tool handoff,
/// in milliseconds.
pub const HANDOFF_DELAY_MS: u64 = 1000;

/// Advertised upload size ceiling: 50 MB.
///
/// Advisory only. Intake records files of any size; front-ends may warn
/// when this ceiling is exceeded but must not reject.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// File extensions the upload surface advertises.
///
/// Advisory only, like the size ceiling. Lowercase, without the dot.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Default URL of the external analysis tool the upload hands off to.
pub const ANALYSIS_TOOL_URL: &str = "http://localhost:8501";

// =============================================================================
// SESSION STORE KEYS
// =============================================================================
//
// The external analysis tool reads these keys verbatim; the spelling is a
// wire contract, not a style choice.

/// Session key holding the uploaded file's name.
pub const SESSION_KEY_FILE_NAME: &str = "uploadedFileName";

/// Session key holding the uploaded file's size in bytes, as a string.
pub const SESSION_KEY_FILE_SIZE: &str = "uploadedFileSize";

/// Session key holding the uploaded file's MIME type.
pub const SESSION_KEY_FILE_TYPE: &str = "uploadedFileType";

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Fixed artifact name for slide deck exports.
pub const DECK_EXPORT_FILE_NAME: &str = "analysis_presentation.json";

/// MIME type attached to every exported artifact.
///
/// Always JSON; the advertised binary formats are cosmetic (see the report
/// and deck export contracts).
pub const EXPORT_MIME_TYPE: &str = "application/json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_ramp_divides_evenly() {
        // The ramp must land exactly on 100.
        assert_eq!(100 % UPLOAD_STEP_PERCENT, 0);
    }

    #[test]
    fn size_ceiling_is_50_mb() {
        assert_eq!(MAX_UPLOAD_BYTES, 52_428_800);
    }

    #[test]
    fn session_keys_match_wire_contract() {
        assert_eq!(SESSION_KEY_FILE_NAME, "uploadedFileName");
        assert_eq!(SESSION_KEY_FILE_SIZE, "uploadedFileSize");
        assert_eq!(SESSION_KEY_FILE_TYPE, "uploadedFileType");
    }

    #[test]
    fn accepted_extensions_are_lowercase() {
        for ext in ACCEPTED_EXTENSIONS {
            assert_eq!(ext, ext.to_lowercase());
        }
    }
}
