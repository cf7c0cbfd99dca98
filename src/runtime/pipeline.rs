//! Source → table → tab pipeline.
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::{SourceSection, TabSection},
    lib::{errors::PushError, fs::read_report_if_present},
    report::{parse_report, ReportFormat, Table},
    sheets::{tab_name, table_range, GridSize, SpreadsheetApi},
    source::{resolve_source, ReportFile},
};

/// Progress of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushStage {
    AwaitingSource,
    AwaitingWrite,
    Done,
}

impl PushStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PushStage::AwaitingSource => "awaiting_source",
            PushStage::AwaitingWrite => "awaiting_write",
            PushStage::Done => "done",
        }
    }
}

fn enter(stage: PushStage) {
    info!(target: "sheet_push::runtime", stage = stage.as_str(), "Entering stage");
}

/// A parsed report ready for upload.
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub report: ReportFile,
    pub format: ReportFormat,
    pub table: Table,
}

/// Destination tab title, grid size and range for a prepared table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPlan {
    pub title: String,
    pub grid: GridSize,
    pub range: String,
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PushOutcome {
    /// No input was present and the policy is to skip.
    Skipped { source: String, reason: String },
    /// Dry run: everything resolved, nothing sent.
    Planned {
        source: PathBuf,
        tab: String,
        range: String,
        rows: usize,
        columns: usize,
    },
    Uploaded {
        source: PathBuf,
        tab: String,
        sheet_id: i64,
        updated_range: String,
        rows: usize,
        columns: usize,
    },
}

impl PushOutcome {
    pub const fn status(&self) -> &'static str {
        match self {
            PushOutcome::Skipped { .. } => "skipped",
            PushOutcome::Planned { .. } => "planned",
            PushOutcome::Uploaded { .. } => "uploaded",
        }
    }

    pub fn skipped(section: &SourceSection) -> Self {
        PushOutcome::Skipped {
            source: section.spec.to_string(),
            reason: "report file not present".into(),
        }
    }

    pub fn planned(prepared: &PreparedUpload, plan: &TabPlan) -> Self {
        PushOutcome::Planned {
            source: prepared.report.path.clone(),
            tab: plan.title.clone(),
            range: plan.range.clone(),
            rows: prepared.table.row_count(),
            columns: prepared.table.column_count(),
        }
    }
}

/// Resolve and parse the report.
///
/// `Ok(None)` means no input was present and the missing-input policy is
/// `skip`; with `fail` the absence is returned as an error instead. No remote
/// call happens in either case.
pub fn prepare(section: &SourceSection) -> Result<Option<PreparedUpload>, PushError> {
    enter(PushStage::AwaitingSource);

    let Some(report) = resolve_source(&section.spec)? else {
        section.on_missing.apply(&section.spec)?;
        return Ok(None);
    };
    let Some(content) = read_report_if_present(&report.path)? else {
        section.on_missing.apply(&section.spec)?;
        return Ok(None);
    };

    let table = parse_report(&content, section.format)?;
    info!(
        target: "sheet_push::runtime",
        path = %report.path.display(),
        format = section.format.as_str(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Parsed report"
    );

    Ok(Some(PreparedUpload {
        report,
        format: section.format,
        table,
    }))
}

/// Compute the destination tab for a run started at `now`.
pub fn plan_tab(
    tab: &TabSection,
    prepared: &PreparedUpload,
    now: DateTime<Utc>,
    suffix: &str,
) -> TabPlan {
    let title = tab_name(&tab.prefix, tab.naming, now, suffix);
    let rows = prepared.table.row_count();
    let columns = prepared.table.column_count();
    TabPlan {
        range: table_range(&title, rows, columns),
        grid: GridSize::new(rows, columns),
        title,
    }
}

/// Create the tab and write the table into it.
///
/// When the write fails and cleanup is enabled the new tab is deleted again;
/// the write error is returned either way.
pub async fn upload<A: SpreadsheetApi>(
    api: &A,
    tab: &TabSection,
    prepared: PreparedUpload,
    plan: TabPlan,
) -> Result<PushOutcome, PushError> {
    enter(PushStage::AwaitingWrite);

    let handle = api.add_tab(&plan.title, plan.grid).await?;
    info!(
        target: "sheet_push::runtime",
        tab = %handle.title,
        sheet_id = handle.sheet_id,
        "Created tab"
    );

    let summary = match api.write_values(&plan.range, prepared.table.rows()).await {
        Ok(summary) => summary,
        Err(err) => {
            if tab.cleanup_on_failure {
                match api.delete_tab(&handle).await {
                    Ok(()) => warn!(
                        target: "sheet_push::runtime",
                        tab = %handle.title,
                        "Write failed; removed the empty tab"
                    ),
                    Err(cleanup) => warn!(
                        target: "sheet_push::runtime",
                        tab = %handle.title,
                        reason = %cleanup,
                        "Write failed and the empty tab could not be removed"
                    ),
                }
            } else {
                warn!(
                    target: "sheet_push::runtime",
                    tab = %handle.title,
                    "Write failed; leaving the empty tab in place"
                );
            }
            return Err(err.into());
        }
    };

    enter(PushStage::Done);
    info!(
        target: "sheet_push::runtime",
        tab = %handle.title,
        updated_range = %summary.updated_range,
        updated_rows = summary.updated_rows,
        updated_columns = summary.updated_columns,
        "Report pushed to spreadsheet"
    );

    Ok(PushOutcome::Uploaded {
        source: prepared.report.path,
        tab: handle.title,
        sheet_id: handle.sheet_id,
        updated_range: summary.updated_range,
        rows: prepared.table.row_count(),
        columns: prepared.table.column_count(),
    })
}
