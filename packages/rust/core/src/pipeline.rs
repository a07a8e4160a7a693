//! End-to-end lead pipeline: directory search → per-company scrape and
//! outreach → CSV export.
//!
//! Every company returned by the directory yields exactly one [`LeadRow`].
//! Failures in scraping or drafting degrade that company's fields to empty
//! and are recorded as a [`PartialFailure`]; they never stop the run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info, instrument, warn};

use leadgen_directory::DirectoryClient;
use leadgen_export::ExportOutcome;
use leadgen_shared::{AppConfig, CompanyRecord, LeadRow, Result, SearchParams, read_api_key};
use leadgen_website::{SummaryOutcome, WebsiteSummarizer};

use crate::outreach::OutreachComposer;

// ---------------------------------------------------------------------------
// Per-company results
// ---------------------------------------------------------------------------

/// Pipeline stage that can fail for a single company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Website could not be fetched.
    Fetch,
    /// Generator failed while summarizing the website.
    Summarize,
    /// Generator failed while drafting the outreach email.
    Outreach,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Summarize => "summarize",
            Self::Outreach => "outreach",
        })
    }
}

/// One failed stage and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: String,
}

/// A company whose row was produced with some fields left empty.
#[derive(Debug, Clone)]
pub struct PartialFailure {
    /// The degraded, still exportable row.
    pub row: LeadRow,
    pub failures: Vec<StageFailure>,
}

impl PartialFailure {
    pub fn into_row(self) -> LeadRow {
        self.row
    }
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// What happened to the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// The run ended before export.
    NotAttempted { reason: String },
    /// The exporter had nothing to write.
    Skipped,
    Written { path: PathBuf, rows: usize },
    /// Writing failed; rows are still in the report.
    Failed { path: PathBuf, error: String },
}

/// Summary of one pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// One row per company, in directory order.
    pub rows: Vec<LeadRow>,
    /// Number of rows produced with at least one failed stage.
    pub degraded: usize,
    pub export: ExportStatus,
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// LeadPipeline
// ---------------------------------------------------------------------------

/// Sequential lead pipeline over the three external services.
pub struct LeadPipeline {
    directory: DirectoryClient,
    summarizer: WebsiteSummarizer,
    composer: OutreachComposer,
}

impl LeadPipeline {
    pub fn new(
        directory: DirectoryClient,
        summarizer: WebsiteSummarizer,
        composer: OutreachComposer,
    ) -> Self {
        Self {
            directory,
            summarizer,
            composer,
        }
    }

    /// Wire every stage from configuration and the process environment.
    ///
    /// The generator backend is selected here, once: a missing generative
    /// credential switches both LLM stages to stub replies.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let generator = leadgen_generator::from_config(&config.openai)?;
        let directory =
            DirectoryClient::new(&config.apollo, read_api_key(&config.apollo.api_key_env))?;
        let summarizer = WebsiteSummarizer::new(&config.scrape, generator.clone())?;
        let composer = OutreachComposer::new(generator, config.sender.clone());

        Ok(Self::new(directory, summarizer, composer))
    }

    /// Run the pipeline and export the rows to `output`.
    #[instrument(skip_all, fields(output = %output.display()))]
    pub async fn run(&self, params: &SearchParams, output: &Path) -> RunReport {
        let start = Instant::now();
        info!(?params, "starting lead pipeline");

        let companies = match self.directory.search(params).await {
            Ok(companies) => companies,
            Err(e) => {
                error!(error = %e, "company directory lookup failed");
                return RunReport {
                    rows: Vec::new(),
                    degraded: 0,
                    export: ExportStatus::NotAttempted {
                        reason: format!("directory lookup failed: {e}"),
                    },
                    elapsed: start.elapsed(),
                };
            }
        };

        if companies.is_empty() {
            warn!("no companies found, exiting");
            return RunReport {
                rows: Vec::new(),
                degraded: 0,
                export: ExportStatus::NotAttempted {
                    reason: "no companies found".into(),
                },
                elapsed: start.elapsed(),
            };
        }

        let total = companies.len();
        let mut rows = Vec::with_capacity(total);
        let mut degraded = 0;

        for (idx, company) in companies.iter().enumerate() {
            info!("[{}/{}] Processing: {}", idx + 1, total, company.name);

            match self.process_company(company).await {
                Ok(row) => rows.push(row),
                Err(partial) => {
                    degraded += 1;
                    let stages: Vec<String> =
                        partial.failures.iter().map(|f| f.stage.to_string()).collect();
                    warn!(company = %company.name, stages = ?stages, "lead row degraded");
                    rows.push(partial.into_row());
                }
            }
        }

        let export = match leadgen_export::export(&rows, output) {
            Ok(ExportOutcome::Written { path, rows }) => {
                info!(path = %path.display(), rows, "all done, results saved");
                ExportStatus::Written { path, rows }
            }
            Ok(ExportOutcome::Skipped) => ExportStatus::Skipped,
            Err(e) => {
                error!(error = %e, "error saving leads to CSV");
                ExportStatus::Failed {
                    path: output.to_path_buf(),
                    error: e.to_string(),
                }
            }
        };

        info!(
            companies = total,
            degraded,
            elapsed_ms = start.elapsed().as_millis(),
            "lead pipeline complete"
        );

        RunReport {
            rows,
            degraded,
            export,
            elapsed: start.elapsed(),
        }
    }

    /// Scrape, summarize, and draft outreach for one company.
    async fn process_company(
        &self,
        company: &CompanyRecord,
    ) -> std::result::Result<LeadRow, PartialFailure> {
        let mut row = LeadRow::from_company(company);
        let mut failures = Vec::new();

        match company.website() {
            None => warn!(company = %company.name, "no website, skipping scrape"),
            Some(website) => match self.summarizer.summarize(website, &company.name).await {
                Ok(SummaryOutcome::Summarized { summary, .. }) => {
                    row.set_description(&summary.key_points);
                }
                Ok(SummaryOutcome::Unreachable { error }) => {
                    failures.push(StageFailure {
                        stage: Stage::Fetch,
                        error: error.to_string(),
                    });
                }
                Err(e) => {
                    error!(company = %company.name, error = %e, "error summarizing website");
                    failures.push(StageFailure {
                        stage: Stage::Summarize,
                        error: e.to_string(),
                    });
                }
            },
        }

        match self.composer.compose(&company.name, &row.description).await {
            Ok(message) => row.set_outreach(message),
            Err(e) => {
                error!(company = %company.name, error = %e, "error generating outreach");
                failures.push(StageFailure {
                    stage: Stage::Outreach,
                    error: e.to_string(),
                });
            }
        }

        if failures.is_empty() {
            Ok(row)
        } else {
            Err(PartialFailure { row, failures })
        }
    }
}
