//! # Workflow Scenario Tests
//!
//! End-to-end runs of each interactive flow against the core state
//! machines, exercised the way a front-end would drive them.
//!
//! ## Flows
//! - Upload: select a file, ramp to 100%, hand off to the analysis tool
//! - Report: configure sections, run the staged generation, export
//! - Deck: edit slides, preview, export

use statlas_core::{
    IntakeRecord, ReportConfig, SessionStore, SimulationRun, SlideDeck, export_deck, export_report,
    import_deck, import_report, report_stage_plan, upload_stage_plan,
};

// =============================================================================
// UPLOAD FLOW
// =============================================================================

mod upload_flow {
    use super::*;
    use statlas_core::Intake;

    /// Selecting a CSV records its metadata under the session keys.
    #[test]
    fn selection_records_metadata_in_session() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();

        intake.select(IntakeRecord::new("data.csv", 1024), &mut session);

        assert_eq!(session.get("uploadedFileName"), Some("data.csv"));
        assert_eq!(session.get("uploadedFileSize"), Some("1024"));
        assert_eq!(session.get("uploadedFileType"), Some("text/csv"));
    }

    /// The simulated upload climbs 10 percent per tick and finishes at
    /// exactly 100.
    #[test]
    fn upload_ramp_reaches_completion() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();
        intake.select(IntakeRecord::new("data.csv", 1024), &mut session);

        let mut percents = Vec::new();
        while !intake.is_complete() {
            if let Some(run) = intake.run_mut() {
                run.tick();
                percents.push(run.percent());
            }
        }

        assert_eq!(percents, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert_eq!(upload_stage_plan().ticks_to_complete(), 10);
    }

    /// The analysis-tool handoff fires once per completed upload.
    #[test]
    fn handoff_fires_exactly_once() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();
        intake.select(IntakeRecord::new("data.csv", 1024), &mut session);

        assert!(intake.take_handoff().is_none());
        if let Some(run) = intake.run_mut() {
            run.run_to_completion();
        }

        assert!(intake.take_handoff().is_some());
        assert!(intake.take_handoff().is_none());
    }

    /// Reset returns the surface to the pre-upload state but leaves the
    /// session record for the analysis tool.
    #[test]
    fn reset_preserves_session_record() {
        let mut intake = Intake::new();
        let mut session = SessionStore::new();
        intake.select(IntakeRecord::new("data.csv", 1024), &mut session);
        if let Some(run) = intake.run_mut() {
            run.run_to_completion();
        }

        intake.reset();

        assert!(intake.record().is_none());
        assert!(!intake.is_complete());
        assert_eq!(session.get("uploadedFileName"), Some("data.csv"));
        assert_eq!(session.len(), 3);
    }

    /// The advertised limits warn but never block intake.
    #[test]
    fn advisory_limits_do_not_block() {
        let record = IntakeRecord::new("archive.zip", 200 * 1024 * 1024);
        assert!(!record.extension_accepted());
        assert!(!record.within_size_limit());

        let mut intake = Intake::new();
        let mut session = SessionStore::new();
        intake.select(record, &mut session);
        assert!(intake.run().is_some());
    }
}

// =============================================================================
// REPORT FLOW
// =============================================================================

mod report_flow {
    use super::*;

    /// The configuration lists six sections and includes five by
    /// default; only the executive summary is locked in.
    #[test]
    fn default_configuration_shape() {
        let config = ReportConfig::new();

        assert_eq!(config.sections().len(), 6);
        assert_eq!(config.included_count(), 5);

        let summary = config.section("executive-summary").expect("catalog entry");
        assert!(summary.required && summary.included);
    }

    /// Toggling the hypothesis-testing section moves the included count
    /// from five to six, and the required section cannot leave.
    #[test]
    fn toggling_sections() {
        let mut config = ReportConfig::new();

        assert!(config.toggle_section("hypothesis-tests"));
        assert_eq!(config.included_count(), 6);

        assert!(!config.toggle_section("executive-summary"));
        assert_eq!(config.included_count(), 6);
    }

    /// A report run announces all six stages in order and its percent
    /// climbs monotonically to 100.
    #[test]
    fn report_run_walks_all_stages() {
        let mut run = SimulationRun::new(report_stage_plan());

        let mut labels = Vec::new();
        let mut percents = Vec::new();
        while !run.is_complete() {
            labels.push(run.current_stage_label().map(ToString::to_string));
            run.tick();
            percents.push(run.percent());
        }

        assert_eq!(
            labels,
            vec![
                Some("Preparing data...".to_string()),
                Some("Running statistical analysis...".to_string()),
                Some("Generating visualizations...".to_string()),
                Some("Creating presentation slides...".to_string()),
                Some("Formatting PDF report...".to_string()),
                Some("Finalizing documents...".to_string()),
            ]
        );
        assert_eq!(percents, vec![16, 33, 50, 66, 83, 100]);
    }

    /// After a completed run, the default format exports both document
    /// flavors under their derived names.
    #[test]
    fn completed_run_exports_both_flavors() {
        let mut run = SimulationRun::new(report_stage_plan());
        run.run_to_completion();
        let _token = run.take_completion().expect("terminal run");

        let config = ReportConfig::new();
        let artifacts = export_report(&config, "2024-01-15T10:30:00Z").expect("export");

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].file_name, "Data_Analysis_Report.json");
        assert_eq!(artifacts[1].file_name, "Data_Analysis_Report_report.json");
        assert_eq!(artifacts[0].mime_type, "application/json");
    }

    /// Exports embed the included sections as full objects.
    #[test]
    fn exports_embed_toggled_sections() {
        let mut config = ReportConfig::new();
        assert!(config.toggle_section("hypothesis-tests"));

        let artifacts = export_report(&config, "t").expect("export");
        let document = import_report(&artifacts[0].bytes).expect("import");

        assert_eq!(document.sections.len(), 6);
        let names: Vec<&str> = document.sections.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Hypothesis Testing"));
        assert!(names.contains(&"Executive Summary"));
    }
}

// =============================================================================
// DECK FLOW
// =============================================================================

mod deck_flow {
    use super::*;

    /// Adding twice grows the starter deck to three slides with the last
    /// one selected.
    #[test]
    fn adding_slides_selects_the_newest() {
        let mut deck = SlideDeck::new();

        deck.add_slide();
        deck.add_slide();

        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.selected_index(), 2);
    }

    /// Deleting a slide below the end re-clamps the selection onto the
    /// new last slide.
    #[test]
    fn deletion_reclamps_selection() {
        let mut deck = SlideDeck::new();
        deck.add_slide();
        deck.add_slide();

        assert!(deck.delete_slide(1));

        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.selected_index(), 1);
    }

    /// The last remaining slide cannot be deleted.
    #[test]
    fn last_slide_survives_deletion() {
        let mut deck = SlideDeck::new();
        assert!(!deck.delete_slide(0));
        assert_eq!(deck.slide_count(), 1);
    }

    /// Editing, previewing, and exporting round trips the deck contents.
    #[test]
    fn edited_deck_exports_faithfully() {
        let mut deck = SlideDeck::new();
        deck.add_slide();
        deck.update_title("Correlation Heatmap");
        deck.update_content("Strong positive correlation between A and B.");
        deck.toggle_preview();
        deck.preview_prev();

        let artifact = export_deck(&deck).expect("export");
        assert_eq!(artifact.file_name, "analysis_presentation.json");

        let document = import_deck(&artifact.bytes).expect("import");
        assert_eq!(document.slides.len(), 2);
        assert_eq!(document.slides[0].title, "Statistical Analysis Results");
        assert_eq!(document.slides[1].title, "Correlation Heatmap");
    }
}
