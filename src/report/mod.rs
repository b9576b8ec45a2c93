// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Final sync report.
//!
//! ```text
//! plan empty                      --> UpToDate
//! plan non-empty, no outcomes     --> Anomaly
//! otherwise                       --> Completed { succeeded, failures }
//! ```

use std::fmt;

use serde::Serialize;

use crate::install::InstallOutcome;


/// One failed dependency with its short diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    pub name: String,
    pub reason: String,
}

/// Classified result of a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportSummary {
    /// Nothing needed installing.
    UpToDate,
    /// Work was planned but nothing reported back.
    Anomaly { planned: usize },
    Completed {
        succeeded: usize,
        failures: Vec<FailureEntry>,
    },
}

/// Aggregated outcome of one `up` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    planned: usize,
    summary: ReportSummary,
}

impl SyncReport {
    /// Aggregate `outcomes` of a plan with `planned` entries.
    #[must_use]
    pub fn from_outcomes(planned: usize, outcomes: &[InstallOutcome]) -> Self {
        if planned == 0 {
            return Self {
                planned,
                summary: ReportSummary::UpToDate,
            };
        }

        let succeeded = outcomes.iter().filter(|o| o.success).count();
        let failures: Vec<FailureEntry> = outcomes
            .iter()
            .filter(|o| !o.success)
            .map(|o| FailureEntry {
                name: o.dependency_name.clone(),
                reason: o
                    .error
                    .clone()
                    .unwrap_or_else(|| "no result produced".to_string()),
            })
            .collect();

        let summary = if succeeded == 0 && failures.is_empty() {
            ReportSummary::Anomaly { planned }
        } else {
            ReportSummary::Completed {
                succeeded,
                failures,
            }
        };
        Self { planned, summary }
    }

    #[must_use]
    pub const fn planned(&self) -> usize {
        self.planned
    }

    #[must_use]
    pub const fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    /// Whether the run should end with a failure exit status.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        match &self.summary {
            ReportSummary::UpToDate => false,
            ReportSummary::Anomaly { .. } => true,
            ReportSummary::Completed { failures, .. } => !failures.is_empty(),
        }
    }

    /// Report lines for the console.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match &self.summary {
            ReportSummary::UpToDate => vec!["everything already up to date".to_string()],
            ReportSummary::Anomaly { planned } => vec![format!(
                "{planned} dependencies were planned but no install reported back"
            )],
            ReportSummary::Completed {
                succeeded,
                failures,
            } => {
                let mut lines = Vec::with_capacity(failures.len() + 1);
                if *succeeded > 0 {
                    lines.push(format!("successfully installed {succeeded} dependencies"));
                }
                lines.extend(
                    failures
                        .iter()
                        .map(|f| format!("failed to install {}: {}", f.name, f.reason)),
                );
                lines
            }
        }
    }

    /// Emit the report through tracing. An anomaly is logged as an error.
    pub fn log(&self) {
        match &self.summary {
            ReportSummary::Anomaly { planned } => {
                tracing::error!(planned, "no install outcomes for a non-empty plan");
            }
            ReportSummary::UpToDate => tracing::info!("everything already up to date"),
            ReportSummary::Completed {
                succeeded,
                failures,
            } => tracing::info!(
                succeeded,
                failed = failures.len(),
                "sync finished"
            ),
        }
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
