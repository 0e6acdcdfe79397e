//! Report writers — pluggable prose backends for composed reports.
//!
//! Default: `LlmReportWriter` when ENABLE_AI_REPORTS is on, otherwise
//! `TemplateReportWriter` (deterministic, no network).
//!
//! `AppState` holds an `Arc<dyn ReportWriter>`, chosen at startup via config.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{FACTS_ONLY_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::report::composer::{AssessmentReport, SectionKind};
use crate::report::prompts::{REPORT_PROMPT_TEMPLATE, REPORT_SYSTEM};

/// Bodies shorter than this are treated as empty LLM output.
const MIN_BODY_CHARS: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Turns a composed report into its final prose. Implement this to swap
/// backends without touching the report endpoint.
///
/// Carried in `AppState` as `Arc<dyn ReportWriter>`.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn write(&self, report: AssessmentReport) -> Result<AssessmentReport, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateReportWriter
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the composer's templated bodies.
pub struct TemplateReportWriter;

#[async_trait]
impl ReportWriter for TemplateReportWriter {
    async fn write(&self, mut report: AssessmentReport) -> Result<AssessmentReport, AppError> {
        report.writer_backend = self.backend().to_string();
        report.ai_generated = false;
        Ok(report)
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmReportWriter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NarrativeResponse {
    pub sections: Vec<NarrativeSection>,
}

#[derive(Debug, Deserialize)]
pub struct NarrativeSection {
    pub kind: SectionKind,
    pub body: String,
}

/// Asks Claude for section prose. Any LLM failure keeps the templated
/// bodies, so a report is always produced.
pub struct LlmReportWriter(pub LlmClient);

#[async_trait]
impl ReportWriter for LlmReportWriter {
    async fn write(&self, mut report: AssessmentReport) -> Result<AssessmentReport, AppError> {
        report.writer_backend = self.backend().to_string();
        report.ai_generated = false;

        let report_json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize report: {e}")))?;
        let prompt = REPORT_PROMPT_TEMPLATE
            .replace("{facts_only}", FACTS_ONLY_INSTRUCTION)
            .replace("{report_json}", &report_json);
        let system = format!("{REPORT_SYSTEM} {JSON_ONLY_SYSTEM}");

        match self.0.call_json::<NarrativeResponse>(&prompt, &system).await {
            Ok(narrative) => {
                let applied = apply_narrative(&mut report, narrative);
                info!(
                    "LLM rewrote {applied}/{} sections of report for result {}",
                    report.sections.len(),
                    report.result_id
                );
            }
            Err(e) => {
                warn!(
                    "LLM report writing failed for result {}, keeping template text: {e}",
                    report.result_id
                );
            }
        }
        Ok(report)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Replaces section bodies with LLM prose where the model returned a usable
/// body for that section kind. Returns the number of sections rewritten.
pub fn apply_narrative(report: &mut AssessmentReport, narrative: NarrativeResponse) -> usize {
    let mut applied = 0;
    for generated in narrative.sections {
        let body = generated.body.trim();
        if body.chars().count() < MIN_BODY_CHARS {
            continue;
        }
        if let Some(section) = report
            .sections
            .iter_mut()
            .find(|s| s.kind == generated.kind)
        {
            section.body = body.to_string();
            applied += 1;
        }
    }
    if applied > 0 {
        report.ai_generated = true;
    }
    applied
}
