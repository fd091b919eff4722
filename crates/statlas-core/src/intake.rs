//! # File Intake
//!
//! Accepts a user-selected file, records its metadata into the session
//! store, and starts the simulated upload.
//!
//! The advertised constraints (extension allowlist, 50 MB ceiling) are
//! advisory: the helpers on [`IntakeRecord`] report whether a file matches,
//! front-ends may warn, but intake never rejects. MIME types are derived
//! from the file extension alone; content is never inspected.

use crate::primitives::{
    ACCEPTED_EXTENSIONS, MAX_UPLOAD_BYTES, SESSION_KEY_FILE_NAME, SESSION_KEY_FILE_SIZE,
    SESSION_KEY_FILE_TYPE, UPLOAD_STEP_PERCENT,
};
use crate::progress::{CompletionToken, ProgressMode, SimulationRun, StagePlan};
use crate::session::SessionStore;
use serde::{Deserialize, Serialize};

// =============================================================================
// MIME DERIVATION
// =============================================================================

/// MIME type for a file extension (lowercase, no dot).
///
/// Unknown extensions map to the empty string, the same value a browser
/// reports for a file it cannot classify.
#[must_use]
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "csv" => "text/csv",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        _ => "",
    }
}

// =============================================================================
// INTAKE RECORD
// =============================================================================

/// Minimal metadata captured about a user-selected file.
///
/// Never validated against actual file content; the byte size and MIME
/// type are taken at face value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// File name as selected, including extension.
    pub file_name: String,
    /// Size in bytes.
    pub byte_size: u64,
    /// MIME type, possibly empty for unknown extensions.
    pub mime_type: String,
}

impl IntakeRecord {
    /// Build a record, deriving the MIME type from the file extension.
    #[must_use]
    pub fn new(file_name: impl Into<String>, byte_size: u64) -> Self {
        let file_name = file_name.into();
        let mime_type = match extension_of(&file_name) {
            Some(ext) => mime_for_extension(&ext).to_string(),
            None => String::new(),
        };
        Self {
            file_name,
            byte_size,
            mime_type,
        }
    }

    /// Build a record with an explicit MIME type.
    #[must_use]
    pub fn with_mime_type(
        file_name: impl Into<String>,
        byte_size: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            byte_size,
            mime_type: mime_type.into(),
        }
    }

    /// Lowercased file extension, if the name has one.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.file_name)
    }

    /// Whether the extension is on the advertised allowlist. Advisory.
    #[must_use]
    pub fn extension_accepted(&self) -> bool {
        match self.extension() {
            Some(ext) => ACCEPTED_EXTENSIONS.contains(&ext.as_str()),
            None => false,
        }
    }

    /// Whether the size is within the advertised 50 MB ceiling. Advisory.
    #[must_use]
    pub fn within_size_limit(&self) -> bool {
        self.byte_size <= MAX_UPLOAD_BYTES
    }

    /// Write the record into the session store under the wire-contract
    /// keys, overwriting any previous upload.
    pub fn store(&self, session: &mut SessionStore) {
        session.set(SESSION_KEY_FILE_NAME, self.file_name.clone());
        session.set(SESSION_KEY_FILE_SIZE, self.byte_size.to_string());
        session.set(SESSION_KEY_FILE_TYPE, self.mime_type.clone());
    }

    /// Read a record back from the session store.
    ///
    /// Diagnostics only; the intended consumer is the external analysis
    /// tool. Returns `None` unless all three keys are present and the size
    /// parses.
    #[must_use]
    pub fn load(session: &SessionStore) -> Option<Self> {
        let file_name = session.get(SESSION_KEY_FILE_NAME)?.to_string();
        let byte_size = session.get(SESSION_KEY_FILE_SIZE)?.parse().ok()?;
        let mime_type = session.get(SESSION_KEY_FILE_TYPE)?.to_string();
        Some(Self {
            file_name,
            byte_size,
            mime_type,
        })
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

// =============================================================================
// UPLOAD PLAN
// =============================================================================

/// Stage plan for the simulated upload: a single implicit stage whose
/// percent ramps 0 to 100 in fixed increments.
#[must_use]
pub fn upload_stage_plan() -> StagePlan {
    StagePlan::from_parts(
        vec!["Uploading...".to_string()],
        ProgressMode::PercentRamp {
            step: UPLOAD_STEP_PERCENT,
        },
    )
}

// =============================================================================
// INTAKE SURFACE
// =============================================================================

/// Local state of the upload surface: the selected file and its simulated
/// upload run.
///
/// Selecting a file writes the session store immediately and starts a
/// fresh run. Reset clears only this local state; the session store keeps
/// whatever was last written.
#[derive(Debug, Clone, Default)]
pub struct Intake {
    record: Option<IntakeRecord>,
    run: Option<SimulationRun>,
}

impl Intake {
    /// Create an idle intake surface with no file selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a file: record its metadata in the session store and start
    /// the upload simulation. Replaces any in-progress selection.
    pub fn select(&mut self, record: IntakeRecord, session: &mut SessionStore) {
        record.store(session);
        self.record = Some(record);
        self.run = Some(SimulationRun::new(upload_stage_plan()));
    }

    /// Select the first of several candidate files, ignoring the rest.
    ///
    /// Returns `false` (and changes nothing) when the iterator is empty.
    pub fn select_first(
        &mut self,
        records: impl IntoIterator<Item = IntakeRecord>,
        session: &mut SessionStore,
    ) -> bool {
        match records.into_iter().next() {
            Some(record) => {
                self.select(record, session);
                true
            }
            None => false,
        }
    }

    /// The currently selected file, if any.
    #[must_use]
    pub fn record(&self) -> Option<&IntakeRecord> {
        self.record.as_ref()
    }

    /// The in-progress (or terminal) run, if a file has been selected.
    #[must_use]
    pub fn run(&self) -> Option<&SimulationRun> {
        self.run.as_ref()
    }

    /// Mutable access to the run for tick-driving front-ends.
    pub fn run_mut(&mut self) -> Option<&mut SimulationRun> {
        self.run.as_mut()
    }

    /// Whether the simulated upload has completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.run.as_ref().is_some_and(SimulationRun::is_complete)
    }

    /// Take the one-shot handoff token that gates opening the analysis
    /// tool. `Some` exactly once, after the run completes.
    pub fn take_handoff(&mut self) -> Option<CompletionToken> {
        self.run.as_mut()?.take_completion()
    }

    /// Return to the pre-upload state.
    ///
    /// Clears the selected file and its run. Does not touch the session
    /// store.
    pub fn reset(&mut self) {
        self.record = None;
        self.run = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_derivation_from_extension() {
        assert_eq!(IntakeRecord::new("data.csv", 10).mime_type, "text/csv");
        assert_eq!(
            IntakeRecord::new("book.XLSX", 10).mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            IntakeRecord::new("legacy.xls", 10).mime_type,
            "application/vnd.ms-excel"
        );
        assert_eq!(IntakeRecord::new("notes.txt", 10).mime_type, "");
        assert_eq!(IntakeRecord::new("no_extension", 10).mime_type, "");
        assert_eq!(IntakeRecord::new(".hidden", 10).mime_type, "");
    }

    #[test]
    fn advisory_checks_do_not_reject() {
        let odd = IntakeRecord::new("movie.mp4", MAX_UPLOAD_BYTES + 1);
        assert!(!odd.extension_accepted());
        assert!(!odd.within_size_limit());

        // Advisory only: intake still accepts the file.
        let mut intake = Intake::new();
        let mut session = SessionStore::new();
        intake.select(odd.clone(), &mut session);
        assert_eq!(intake.record(), Some(&odd));
        assert_eq!(session.get("uploadedFileName"), Some("movie.mp4"));
    }

    #[test]
    fn size_ceiling_boundary() {
        assert!(IntakeRecord::new("big.csv", MAX_UPLOAD_BYTES).within_size_limit());
        assert!(!IntakeRecord::new("bigger.csv", MAX_UPLOAD_BYTES + 1).within_size_limit());
    }

    #[test]
    fn select_writes_session_and_starts_run() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();

        intake.select(IntakeRecord::new("data.csv", 1024), &mut session);

        assert_eq!(session.get("uploadedFileName"), Some("data.csv"));
        assert_eq!(session.get("uploadedFileSize"), Some("1024"));
        assert_eq!(session.get("uploadedFileType"), Some("text/csv"));
        assert!(intake.run().is_some());
        assert!(!intake.is_complete());
    }

    #[test]
    fn select_first_uses_only_the_first_file() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();

        let picked = intake.select_first(
            vec![
                IntakeRecord::new("first.csv", 1),
                IntakeRecord::new("second.csv", 2),
            ],
            &mut session,
        );

        assert!(picked);
        assert_eq!(session.get("uploadedFileName"), Some("first.csv"));
    }

    #[test]
    fn select_first_empty_is_noop() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();

        assert!(!intake.select_first(Vec::new(), &mut session));
        assert!(intake.record().is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn new_selection_overwrites_session() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();

        intake.select(IntakeRecord::new("old.csv", 1), &mut session);
        intake.select(IntakeRecord::new("new.xls", 2), &mut session);

        assert_eq!(session.get("uploadedFileName"), Some("new.xls"));
        assert_eq!(session.get("uploadedFileSize"), Some("2"));
    }

    #[test]
    fn handoff_token_requires_completion() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();
        intake.select(IntakeRecord::new("data.csv", 1024), &mut session);

        assert!(intake.take_handoff().is_none());

        if let Some(run) = intake.run_mut() {
            run.run_to_completion();
        }
        assert!(intake.is_complete());
        assert!(intake.take_handoff().is_some());
        assert!(intake.take_handoff().is_none());
    }

    #[test]
    fn reset_clears_local_state_not_session() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();
        intake.select(IntakeRecord::new("data.csv", 1024), &mut session);

        intake.reset();

        assert!(intake.record().is_none());
        assert!(intake.run().is_none());
        // Session store survives reset.
        assert_eq!(session.get("uploadedFileName"), Some("data.csv"));
    }

    #[test]
    fn record_round_trips_through_session() {
        let mut session = SessionStore::new();
        let record = IntakeRecord::new("data.csv", 1024);
        record.store(&mut session);

        assert_eq!(IntakeRecord::load(&session), Some(record));
    }

    #[test]
    fn load_requires_all_keys() {
        let mut session = SessionStore::new();
        session.set(SESSION_KEY_FILE_NAME, "data.csv");
        assert_eq!(IntakeRecord::load(&session), None);
    }
}
