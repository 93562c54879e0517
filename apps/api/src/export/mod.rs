// Document export: paginated PDF drawing plans and DOCX paragraph descriptors.
// Both consume the shared Markdown classifier; neither encodes file bytes.

pub mod docx;
pub mod handlers;
pub mod metrics;
pub mod pdf;

use serde::{Deserialize, Serialize};

pub use metrics::PageGeometry;

/// Which screen a document is exported from. Fixes the download file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportDocument {
    #[default]
    TailoredResume,
    CreatedResume,
    DevelopmentPlan,
    InterviewSummary,
}

impl ExportDocument {
    pub fn pdf_file_name(self) -> &'static str {
        match self {
            ExportDocument::TailoredResume => "tailored-resume.pdf",
            ExportDocument::CreatedResume => "resume.pdf",
            ExportDocument::DevelopmentPlan => "development-plan.pdf",
            ExportDocument::InterviewSummary => "interview-summary.pdf",
        }
    }

    pub fn docx_file_name(self) -> &'static str {
        match self {
            ExportDocument::TailoredResume => "tailored-resume.docx",
            ExportDocument::CreatedResume => "resume.docx",
            ExportDocument::DevelopmentPlan => "development-plan.docx",
            ExportDocument::InterviewSummary => "interview-summary.docx",
        }
    }
}
