//! Per-user history of generated artifacts and saved prompt versions.
//!
//! Writes are append-only. Every function takes the pool and the user id
//! explicitly; there is no ambient "current user".

pub mod feed;
pub mod handlers;
pub mod prompt_versions;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::export::ExportDocument;
use crate::flows::career::CareerRecommendation;
use crate::flows::interview::InterviewMessage;
use crate::flows::resume::CreateResumeInput;
use crate::flows::Language;
use crate::markdown::excerpt;

pub use feed::HistoryFeed;

/// Most recent records returned by any history read.
pub const HISTORY_LIMIT: i64 = 20;

/// Label stored on tailoring runs made with the built-in prompt.
pub const DEFAULT_PROMPT_VERSION: &str = "default";

// ────────────────────────────────────────────────────────────────────────────
// Entry kinds
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoringRun {
    pub resume_original: String,
    pub job_description: String,
    pub language: Language,
    pub tailored_resume_md: String,
    pub change_log: Vec<String>,
    pub match_score: f64,
    pub score_rationale: String,
    pub prompt_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResume {
    pub form_data: CreateResumeInput,
    pub generated_resume_md: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendationRun {
    pub interests: String,
    pub recommendations: Vec<CareerRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlanRun {
    pub career_name: String,
    pub development_plan_md: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub job_role: String,
    pub chat_history: Vec<InterviewMessage>,
    pub summary: String,
}

/// Every kind of artifact a user can find in their history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEntry {
    Tailoring(TailoringRun),
    CreatedResume(CreatedResume),
    CareerRecommendation(CareerRecommendationRun),
    DevelopmentPlan(DevelopmentPlanRun),
    Interview(InterviewRecord),
}

impl HistoryEntry {
    /// Value of the `kind` column; matches the serde tag.
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryEntry::Tailoring(_) => "tailoring",
            HistoryEntry::CreatedResume(_) => "created_resume",
            HistoryEntry::CareerRecommendation(_) => "career_recommendation",
            HistoryEntry::DevelopmentPlan(_) => "development_plan",
            HistoryEntry::Interview(_) => "interview",
        }
    }
}

/// What the history screen shows for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDisplay {
    pub title: String,
    /// First line of the body as plain text.
    pub excerpt: Option<String>,
    pub markdown: String,
    /// Export target when the record can be downloaded.
    pub export: Option<ExportDocument>,
}

pub fn display(entry: &HistoryEntry) -> EntryDisplay {
    let (title, markdown, export) = match entry {
        HistoryEntry::Tailoring(run) => (
            format!("Tailored resume ({:.0}%)", run.match_score),
            run.tailored_resume_md.clone(),
            Some(ExportDocument::TailoredResume),
        ),
        HistoryEntry::CreatedResume(created) => (
            format!("Resume: {}", created.form_data.full_name.trim()),
            created.generated_resume_md.clone(),
            Some(ExportDocument::CreatedResume),
        ),
        HistoryEntry::CareerRecommendation(run) => (
            "Career recommendations".to_string(),
            run.recommendations
                .iter()
                .map(|r| format!("## {}\n{}", r.career_name.trim(), r.rationale.trim()))
                .collect::<Vec<_>>()
                .join("\n\n"),
            None,
        ),
        HistoryEntry::DevelopmentPlan(plan) => (
            format!("Development plan: {}", plan.career_name.trim()),
            plan.development_plan_md.clone(),
            Some(ExportDocument::DevelopmentPlan),
        ),
        HistoryEntry::Interview(record) => (
            format!("Interview: {}", record.job_role.trim()),
            record.summary.clone(),
            Some(ExportDocument::InterviewSummary),
        ),
    };

    EntryDisplay {
        title,
        excerpt: excerpt(&markdown),
        markdown,
        export,
    }
}

/// A stored history entry as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub entry: HistoryEntry,
    pub display: EntryDisplay,
}

/// Appends an entry and notifies live subscribers.
///
/// Saving never fails the request that produced the artifact; errors are logged.
pub async fn record(pool: &PgPool, feed: &HistoryFeed, user_id: Uuid, entry: HistoryEntry) {
    let kind = entry.kind();
    match store::append_history(pool, user_id, &entry).await {
        Ok(id) => {
            info!(%user_id, %id, kind, "History entry saved");
            feed.notify(user_id);
        }
        Err(e) => warn!(%user_id, kind, "Failed to save history entry: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::interview::InterviewRole;

    fn interview() -> HistoryEntry {
        HistoryEntry::Interview(InterviewRecord {
            job_role: "Data Analyst".to_string(),
            chat_history: vec![InterviewMessage {
                role: InterviewRole::Assistant,
                content: "Why data?".to_string(),
            }],
            summary: "**Overall Performance:** solid.".to_string(),
        })
    }

    #[test]
    fn test_entry_serializes_with_type_tag() {
        let value = serde_json::to_value(interview()).unwrap();
        assert_eq!(value["type"], "interview");
        assert_eq!(value["jobRole"], "Data Analyst");
        assert_eq!(value["chatHistory"][0]["role"], "assistant");
    }

    #[test]
    fn test_kind_matches_serde_tag() {
        let entries = vec![
            interview(),
            HistoryEntry::DevelopmentPlan(DevelopmentPlanRun {
                career_name: "Data Analyst".to_string(),
                development_plan_md: "## Month 1: Foundational Skills".to_string(),
            }),
            HistoryEntry::CareerRecommendation(CareerRecommendationRun {
                interests: "maths".to_string(),
                recommendations: Vec::new(),
            }),
        ];
        for entry in entries {
            let value = serde_json::to_value(&entry).unwrap();
            assert_eq!(value["type"], entry.kind());
        }
    }

    #[test]
    fn test_entry_round_trips_through_payload() {
        let value = serde_json::to_value(interview()).unwrap();
        let back: HistoryEntry = serde_json::from_value(value).unwrap();
        assert!(matches!(back, HistoryEntry::Interview(r) if r.job_role == "Data Analyst"));
    }

    #[test]
    fn test_display_rounds_fractional_score() {
        let entry = HistoryEntry::Tailoring(TailoringRun {
            resume_original: "resume".to_string(),
            job_description: "job".to_string(),
            language: Language::En,
            tailored_resume_md: "# Jane Doe".to_string(),
            change_log: Vec::new(),
            match_score: 91.6,
            score_rationale: "Good.".to_string(),
            prompt_version: DEFAULT_PROMPT_VERSION.to_string(),
        });
        assert_eq!(display(&entry).title, "Tailored resume (92%)");
    }

    #[test]
    fn test_display_interview() {
        let shown = display(&interview());
        assert_eq!(shown.title, "Interview: Data Analyst");
        assert_eq!(shown.excerpt.as_deref(), Some("Overall Performance: solid."));
        assert_eq!(shown.export, Some(ExportDocument::InterviewSummary));
    }

    #[test]
    fn test_display_recommendations_as_sections() {
        let entry = HistoryEntry::CareerRecommendation(CareerRecommendationRun {
            interests: "games".to_string(),
            recommendations: vec![
                CareerRecommendation {
                    career_name: "Game Designer".to_string(),
                    rationale: "You like games.".to_string(),
                },
                CareerRecommendation {
                    career_name: "QA Tester".to_string(),
                    rationale: "You find bugs.".to_string(),
                },
            ],
        });
        let shown = display(&entry);
        assert_eq!(
            shown.markdown,
            "## Game Designer\nYou like games.\n\n## QA Tester\nYou find bugs."
        );
        assert_eq!(shown.export, None);
    }
}
