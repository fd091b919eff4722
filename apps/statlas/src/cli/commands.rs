//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::AppConfig;
use crate::runner::{ProgressEvent, RunDriver};
use chrono::{SecondsFormat, Utc};
use statlas_core::{
    ExportArtifact, IntakeRecord, ReportConfig, ReportFormat, SessionStore, SlideDeck,
    StatlasError, default_sections, export_deck, export_report, primitives::MAX_UPLOAD_BYTES,
    report_stage_plan, upload_stage_plan,
};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

// =============================================================================
// PATH VALIDATION
// =============================================================================

/// Validate an input file path.
///
/// Canonicalizes the path to resolve symlinks and "..", ensures it
/// exists, and ensures it is a regular file. This keeps paths like
/// "../../../etc/passwd" from sneaking past the later reads.
fn validate_file_path(path: &Path) -> Result<PathBuf, StatlasError> {
    let canonical = path.canonicalize().map_err(|e| {
        StatlasError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(StatlasError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate a directory artifacts will be written into.
fn validate_output_dir(dir: &Path) -> Result<PathBuf, StatlasError> {
    let canonical = dir.canonicalize().map_err(|e| {
        StatlasError::IoError(format!(
            "Invalid output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    if !canonical.is_dir() {
        return Err(StatlasError::IoError(format!(
            "Output path '{}' is not a directory",
            dir.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// UPLOAD COMMAND
// =============================================================================

/// Record a data file and run the simulated upload.
pub async fn cmd_upload(
    config: &AppConfig,
    json_mode: bool,
    verbose: bool,
    file: &Path,
    no_open: bool,
) -> Result<(), StatlasError> {
    let validated = validate_file_path(file)?;
    let metadata = std::fs::metadata(&validated)
        .map_err(|e| StatlasError::IoError(format!("Cannot read file metadata: {}", e)))?;
    let file_name = validated
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| StatlasError::IoError("Upload path has no filename".to_string()))?;

    let record = IntakeRecord::new(file_name, metadata.len());

    // Advisory only: the advertised limits warn but never reject.
    if !record.extension_accepted() {
        tracing::warn!(
            "'{}' is not a .csv, .xlsx, or .xls file; continuing anyway",
            record.file_name
        );
    }
    if !record.within_size_limit() {
        tracing::warn!(
            "'{}' exceeds the advertised {} MB limit; continuing anyway",
            record.file_name,
            MAX_UPLOAD_BYTES / (1024 * 1024)
        );
    }

    // Session record first, then the simulated transfer.
    let mut session = SessionStore::new();
    record.store(&mut session);
    tracing::info!(
        "Recorded {} ({} bytes) for the analysis tool",
        record.file_name,
        record.byte_size
    );

    if !json_mode {
        println!("Uploading {} ({} bytes)", record.file_name, record.byte_size);
    }

    let mut driver = RunDriver::new();
    let (handle, rx) = driver.start(upload_stage_plan(), config.upload_tick())?;
    stream_events(rx, json_mode, verbose).await;
    let _run = handle.join().await?;

    if !no_open {
        // Give the completed state a beat before switching tools.
        tokio::time::sleep(config.handoff_delay()).await;
    }

    if json_mode {
        let session_state: serde_json::Map<String, serde_json::Value> = session
            .iter()
            .map(|(key, value)| (key.to_string(), serde_json::Value::String(value.to_string())))
            .collect();
        let output = serde_json::json!({
            "file_name": record.file_name,
            "byte_size": record.byte_size,
            "mime_type": record.mime_type,
            "session": session_state,
            "analysis_tool_url": if no_open {
                serde_json::Value::Null
            } else {
                serde_json::Value::String(config.analysis_tool_url.clone())
            },
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    if no_open {
        println!("Upload complete. Skipping analysis tool handoff.");
    } else {
        println!("Upload complete.");
        println!("Opening analysis tool: {}", config.analysis_tool_url);
    }

    Ok(())
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Configure and generate report documents.
#[allow(clippy::too_many_arguments)]
pub async fn cmd_report(
    config: &AppConfig,
    json_mode: bool,
    verbose: bool,
    title: Option<String>,
    description: Option<String>,
    format: &str,
    include: &[String],
    exclude: &[String],
    output: Option<PathBuf>,
) -> Result<(), StatlasError> {
    let mut report = ReportConfig::new();
    if let Some(title) = title {
        report.title = title;
    }
    if let Some(description) = description {
        report.description = description;
    }
    report.format = ReportFormat::from_tag(format).ok_or_else(|| {
        StatlasError::SerializationError(format!(
            "Unknown format: {}. Use: pptx, pdf, both",
            format
        ))
    })?;

    for id in include {
        apply_section_flag(&mut report, id, true)?;
    }
    for id in exclude {
        apply_section_flag(&mut report, id, false)?;
    }

    let plan = report_stage_plan();
    let estimate_ms =
        plan.ticks_to_complete() * config.report_stage_ms + config.settle_delay_ms;
    tracing::info!(
        "Generating \"{}\" ({} sections, format: {})",
        report.title,
        report.included_count(),
        report.format
    );

    if !json_mode {
        println!(
            "Generating \"{}\" ({} sections, format: {})",
            report.title,
            report.included_count(),
            report.format.display_name()
        );
        println!("Estimated time: {} ms", estimate_ms);
    }

    let mut driver = RunDriver::new();
    let (handle, rx) = driver.start(plan, config.report_stage())?;
    stream_events(rx, json_mode, verbose).await;
    let _run = handle.join().await?;

    // The documents appear a beat after the last stage finishes.
    tokio::time::sleep(config.settle_delay()).await;

    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let artifacts = export_report(&report, &generated)?;
    let dir = output.unwrap_or_else(|| config.artifact_dir.clone());
    let written = write_artifacts(&dir, &artifacts)?;

    if json_mode {
        let output = serde_json::json!({
            "title": report.title,
            "format": report.format.tag(),
            "included_sections": report.included_count(),
            "generated": generated,
            "artifacts": written
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    for (path, artifact) in written.iter().zip(&artifacts) {
        println!("Wrote {} bytes to {:?}", artifact.bytes.len(), path);
    }
    println!("Report \"{}\" generated at {}", report.title, generated);

    Ok(())
}

/// Resolve an `--include`/`--exclude` flag against the section catalog.
///
/// Unknown ids are hard errors; flags against the required section are
/// ignored with a warning, like the disabled checkbox they stand in for.
fn apply_section_flag(
    report: &mut ReportConfig,
    id: &str,
    included: bool,
) -> Result<(), StatlasError> {
    if report.section(id).is_none() {
        let known = default_sections()
            .iter()
            .map(|section| section.id.clone())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(StatlasError::SerializationError(format!(
            "Unknown section: {}. Use: {}",
            id, known
        )));
    }
    if !report.set_section_included(id, included) {
        tracing::warn!("Section '{}' is required and stays included", id);
    }
    Ok(())
}

// =============================================================================
// DECK COMMAND
// =============================================================================

/// Edit and export the presentation deck.
pub fn cmd_deck(
    config: &AppConfig,
    json_mode: bool,
    add: usize,
    output: Option<PathBuf>,
) -> Result<(), StatlasError> {
    let mut deck = SlideDeck::new();
    for _ in 0..add {
        deck.add_slide();
    }

    // Deck export is synchronous; no simulated run.
    let artifact = export_deck(&deck)?;
    let dir = output.unwrap_or_else(|| config.artifact_dir.clone());
    let written = write_artifacts(&dir, std::slice::from_ref(&artifact))?;

    tracing::info!("Exported deck with {} slides", deck.slide_count());

    if json_mode {
        let output = serde_json::json!({
            "slides": deck.slide_count(),
            "selected": deck.selected_index(),
            "artifacts": written
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Deck: {} slides", deck.slide_count());
    if let Some(path) = written.first() {
        println!("Wrote {} bytes to {:?}", artifact.bytes.len(), path);
    }

    Ok(())
}

// =============================================================================
// SECTIONS COMMAND
// =============================================================================

/// List report sections and output formats.
pub fn cmd_sections(json_mode: bool) -> Result<(), StatlasError> {
    let sections = default_sections();

    if json_mode {
        let output = serde_json::json!({
            "sections": sections
                .iter()
                .map(|section| serde_json::json!({
                    "id": section.id,
                    "name": section.name,
                    "description": section.description,
                    "hint": section.hint.tag(),
                    "included": section.included,
                    "required": section.required,
                }))
                .collect::<Vec<_>>(),
            "formats": ReportFormat::ALL
                .iter()
                .map(|format| serde_json::json!({
                    "id": format.tag(),
                    "name": format.display_name(),
                    "description": format.description(),
                    "hint": format.hint().tag(),
                }))
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Statlas Report Sections");
    println!("=======================");
    println!();
    for section in &sections {
        let mut flags = Vec::new();
        if section.required {
            flags.push("required");
        }
        if section.included {
            flags.push("included by default");
        }
        let suffix = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!("{:<22} {}{}", section.id, section.name, suffix);
        println!("{:<22} {}", "", section.description);
    }
    println!();
    println!("Output Formats");
    println!("==============");
    for format in ReportFormat::ALL {
        println!(
            "{:<6} {:<14} {}",
            format.tag(),
            format.display_name(),
            format.description()
        );
    }

    Ok(())
}

// =============================================================================
// OPEN COMMAND
// =============================================================================

/// Show the analysis tool handoff URL.
pub fn cmd_open(config: &AppConfig, json_mode: bool) -> Result<(), StatlasError> {
    if json_mode {
        let output = serde_json::json!({
            "analysis_tool_url": config.analysis_tool_url,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Analysis tool: {}", config.analysis_tool_url);
    println!("Open this URL after an upload completes to continue the workflow.");

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Write export artifacts into a directory and return the paths written.
pub fn write_artifacts(
    dir: &Path,
    artifacts: &[ExportArtifact],
) -> Result<Vec<PathBuf>, StatlasError> {
    let dir = validate_output_dir(dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes)
            .map_err(|e| StatlasError::SerializationError(format!("Write file: {}", e)))?;
        written.push(path);
    }

    Ok(written)
}

/// Drain a run's event stream, rendering each event as it arrives.
async fn stream_events(mut rx: mpsc::Receiver<ProgressEvent>, json_mode: bool, verbose: bool) {
    while let Some(event) = rx.recv().await {
        render_event(&event, json_mode, verbose);
    }
}

/// Render one progress event.
///
/// JSON mode emits one compact object per event so the stream stays
/// machine-parseable; text mode prints stage labels, with per-tick
/// percents behind `--verbose`.
fn render_event(event: &ProgressEvent, json_mode: bool, verbose: bool) {
    if json_mode {
        let line = match event {
            ProgressEvent::Started {
                run_id,
                stage_count,
            } => serde_json::json!({
                "event": "started",
                "run": run_id.to_string(),
                "stages": stage_count,
            }),
            ProgressEvent::StageStarted { index, label } => serde_json::json!({
                "event": "stage",
                "index": index,
                "label": label,
            }),
            ProgressEvent::Progress { percent } => serde_json::json!({
                "event": "progress",
                "percent": percent,
            }),
            ProgressEvent::Completed { run_id } => serde_json::json!({
                "event": "completed",
                "run": run_id.to_string(),
            }),
        };
        println!("{}", line);
        return;
    }

    match event {
        ProgressEvent::Started { .. } => {}
        ProgressEvent::StageStarted { label, .. } => println!("  {}", label),
        ProgressEvent::Progress { percent } => {
            if verbose {
                println!("    {}% complete", percent);
            }
        }
        ProgressEvent::Completed { .. } => println!("  Done."),
    }
}
