//! Replay command
//!
//! Drives a [`CommandLineHandler`] through a scripted sequence of
//! evaluations and builds, recording every call it makes to the target
//! context.

use std::collections::HashSet;
use std::path::Path;

use colored::Colorize;
use ctx_core::{
    ApplySummary, ChangeDiff, CommandLineHandler, ContextError, ContextOperation,
    DiagnosticLogger, HandlerConfig, ItemMetadata, ProjectMetadata, TracingLogger,
    WorkspaceContext,
};
use ctx_fs::{ConfigStore, NormalizedPath, ProjectRoot};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// A replay script
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Absolute project root include paths are resolved against
    pub root: String,
    #[serde(default)]
    pub config: HandlerConfig,
    /// Include paths whose target context calls fail
    #[serde(default)]
    pub fail_on: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Evaluation,
    Build,
}

/// One evaluation or build as it arrives
#[derive(Debug, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub version: u64,
    #[serde(flatten)]
    pub diff: ChangeDiff,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub previous_metadata: ProjectMetadata,
    #[serde(default)]
    pub current_metadata: ProjectMetadata,
}

fn default_active() -> bool {
    true
}

/// A call the replay context accepted
#[derive(Debug, Clone, Serialize)]
pub struct ReplayCall {
    pub operation: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub kind: StepKind,
    pub version: u64,
    pub summary: ApplySummary,
    pub calls: Vec<ReplayCall>,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub tracked: Vec<String>,
    pub pending_evaluations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Target context that records calls and fails on chosen paths
#[derive(Debug, Default)]
struct ReplayContext {
    failing: HashSet<NormalizedPath>,
    calls: Vec<ReplayCall>,
}

impl ReplayContext {
    fn accept(
        &mut self,
        operation: ContextOperation,
        full_path: &NormalizedPath,
        logger: &dyn DiagnosticLogger,
    ) -> std::result::Result<(), ContextError> {
        if self.failing.contains(full_path) {
            return Err(ContextError::new(format!(
                "scripted failure for {full_path}"
            )));
        }
        logger.write_line(&format!("{operation} {full_path}"));
        self.calls.push(ReplayCall {
            operation: operation.to_string(),
            path: full_path.to_string(),
        });
        Ok(())
    }
}

impl WorkspaceContext for ReplayContext {
    fn add_item(
        &mut self,
        full_path: &NormalizedPath,
        _metadata: &ItemMetadata,
        _is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> std::result::Result<(), ContextError> {
        self.accept(ContextOperation::Add, full_path, logger)
    }

    fn remove_item(
        &mut self,
        full_path: &NormalizedPath,
        logger: &dyn DiagnosticLogger,
    ) -> std::result::Result<(), ContextError> {
        self.accept(ContextOperation::Remove, full_path, logger)
    }

    fn update_item(
        &mut self,
        full_path: &NormalizedPath,
        _previous_metadata: &ItemMetadata,
        _current_metadata: &ItemMetadata,
        _is_active_context: bool,
        logger: &dyn DiagnosticLogger,
    ) -> std::result::Result<(), ContextError> {
        self.accept(ContextOperation::Update, full_path, logger)
    }
}

/// Replay `script` and print the report.
///
/// # Errors
///
/// Returns an error if the script cannot be loaded, or after printing the
/// report if a step failed.
pub fn run_replay(script: &Path, json: bool) -> Result<()> {
    let script: Script = ConfigStore::new().load(&NormalizedPath::new(script))?;
    let report = replay(script)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    match report.error {
        Some(message) => Err(CliError::user(message)),
        None => Ok(()),
    }
}

/// Apply every step in order, stopping at the first failure.
pub fn replay(script: Script) -> Result<ReplayReport> {
    let root = ProjectRoot::new(&script.root)?;
    let context = ReplayContext {
        failing: script
            .fail_on
            .iter()
            .map(|include| root.make_rooted(include))
            .collect(),
        calls: Vec::new(),
    };
    let mut handler: CommandLineHandler<u64, ReplayContext> =
        CommandLineHandler::with_config(root, context, script.config);
    let logger = TracingLogger;

    let mut steps = Vec::new();
    let mut error = None;

    for (index, step) in script.steps.into_iter().enumerate() {
        let number = index + 1;
        tracing::debug!(step = number, kind = ?step.kind, version = step.version, "Replaying step");

        let result = match step.kind {
            StepKind::Evaluation => handler.apply_project_evaluation(
                step.version,
                step.diff,
                &step.previous_metadata,
                &step.current_metadata,
                step.active,
                &logger,
            ),
            StepKind::Build => {
                handler.apply_project_build(step.version, step.diff, step.active, &logger)
            }
        };
        let calls = std::mem::take(&mut handler.context_mut().calls);

        match result {
            Ok(summary) => steps.push(StepReport {
                step: number,
                kind: step.kind,
                version: step.version,
                summary,
                calls,
            }),
            Err(e) => {
                steps.push(StepReport {
                    step: number,
                    kind: step.kind,
                    version: step.version,
                    summary: summarize_accepted(&calls),
                    calls,
                });
                error = Some(format!("step {number} failed: {e}"));
                break;
            }
        }
    }

    Ok(ReplayReport {
        steps,
        tracked: handler
            .tracked_paths()
            .into_iter()
            .map(|path| path.to_string())
            .collect(),
        pending_evaluations: handler.pending_evaluations(),
        error,
    })
}

/// Counts for a step that failed part way, from the calls accepted before
/// the failure. Exclusions are not known for such a step.
fn summarize_accepted(calls: &[ReplayCall]) -> ApplySummary {
    let count = |operation: ContextOperation| {
        let name = operation.to_string();
        calls.iter().filter(|call| call.operation == name).count()
    };
    ApplySummary {
        added: count(ContextOperation::Add),
        removed: count(ContextOperation::Remove),
        updated: count(ContextOperation::Update),
        excluded: 0,
    }
}

fn print_report(report: &ReplayReport) {
    for step in &report.steps {
        let kind = match step.kind {
            StepKind::Evaluation => "evaluation".cyan(),
            StepKind::Build => "build".yellow(),
        };
        let mut line = format!(
            "step {} {} v{}: +{} -{} ~{}",
            step.step,
            kind,
            step.version,
            step.summary.added,
            step.summary.removed,
            step.summary.updated
        );
        if step.summary.excluded > 0 {
            line.push_str(&format!(" ({} excluded)", step.summary.excluded));
        }
        println!("{line}");

        for call in &step.calls {
            println!("  {} {}", call.operation.bold(), call.path);
        }
    }

    println!();
    println!("{}", "tracked:".green().bold());
    for path in &report.tracked {
        println!("  {path}");
    }
    println!("pending evaluations: {}", report.pending_evaluations);
}
