//! Mock interview: one question/feedback turn at a time, then a written summary.

use serde::{Deserialize, Serialize};

use super::prompts::{
    fill, PRACTICE_INTERVIEW_PROMPT_TEMPLATE, SUMMARIZE_INTERVIEW_PROMPT_TEMPLATE,
};
use super::{execute, Flow};
use crate::errors::AppError;
use crate::llm_client::prompts::MARKDOWN_SUBSET_INSTRUCTION;
use crate::llm_client::CompletionBackend;
use crate::validation::{FieldErrors, Validate};

/// Sentinel question that opens a session.
pub const START_QUESTION: &str = "START";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewRole {
    User,
    Assistant,
    Feedback,
}

/// One entry of a session transcript as kept by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewMessage {
    pub role: InterviewRole,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// practiceInterview
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeInterviewInput {
    pub job_role: String,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    /// Prior turns rendered as `role: content` lines.
    #[serde(default)]
    pub chat_history: String,
}

impl PracticeInterviewInput {
    pub fn is_opening(&self) -> bool {
        self.question.trim() == START_QUESTION
    }
}

impl Validate for PracticeInterviewInput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required(
            "jobRole",
            &self.job_role,
            "Please enter a job role to start the interview.",
        );
        errors.required("question", &self.question, "Question is required.");
        if !self.is_opening() {
            errors.required("answer", &self.answer, "Please type an answer.");
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeInterviewOutput {
    /// Markdown. Empty on the opening turn.
    #[serde(default)]
    pub feedback: String,
    pub next_question: String,
}

impl Validate for PracticeInterviewOutput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("nextQuestion", &self.next_question, "must not be empty");
    }
}

pub struct PracticeInterview;

impl Flow for PracticeInterview {
    const NAME: &'static str = "practice_interview";
    type Input = PracticeInterviewInput;
    type Output = PracticeInterviewOutput;

    fn prompt(input: &PracticeInterviewInput) -> String {
        let history = if input.chat_history.trim().is_empty() {
            "(none)"
        } else {
            input.chat_history.as_str()
        };
        fill(
            PRACTICE_INTERVIEW_PROMPT_TEMPLATE,
            &[
                ("job_role", input.job_role.trim()),
                ("chat_history", history),
                ("question", input.question.trim()),
                ("answer", &input.answer),
            ],
        )
    }
}

/// Runs one interview turn. The opening turn never carries feedback.
pub async fn practice(
    llm: &dyn CompletionBackend,
    input: &PracticeInterviewInput,
) -> Result<PracticeInterviewOutput, AppError> {
    let mut output = execute::<PracticeInterview>(llm, input).await?;
    if input.is_opening() {
        output.feedback.clear();
    }
    Ok(output)
}

// ────────────────────────────────────────────────────────────────────────────
// summarizeInterview
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeInterviewInput {
    pub job_role: String,
    /// JSON-encoded transcript.
    pub chat_history: String,
}

impl Validate for SummarizeInterviewInput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("jobRole", &self.job_role, "Job role is required.");
        errors.required("chatHistory", &self.chat_history, "Chat history is required.");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeInterviewOutput {
    /// Markdown.
    pub summary: String,
}

impl Validate for SummarizeInterviewOutput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("summary", &self.summary, "must not be empty");
    }
}

pub struct SummarizeInterview;

impl Flow for SummarizeInterview {
    const NAME: &'static str = "summarize_interview";
    type Input = SummarizeInterviewInput;
    type Output = SummarizeInterviewOutput;

    fn prompt(input: &SummarizeInterviewInput) -> String {
        fill(
            SUMMARIZE_INTERVIEW_PROMPT_TEMPLATE,
            &[
                ("job_role", input.job_role.trim()),
                ("chat_history", &input.chat_history),
                ("markdown_subset", MARKDOWN_SUBSET_INSTRUCTION),
            ],
        )
    }
}

/// A finished session as submitted for summary and saving.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub job_role: String,
    pub history: Vec<InterviewMessage>,
}

impl Validate for InterviewSession {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("jobRole", &self.job_role, "Job role is required.");
        if self.history.is_empty() {
            errors.push("history", "There is no interview history to save.");
        }
    }
}

impl InterviewSession {
    pub fn summary_input(&self) -> Result<SummarizeInterviewInput, AppError> {
        self.validate()?;
        let chat_history = serde_json::to_string(&self.history)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode transcript: {e}")))?;
        Ok(SummarizeInterviewInput {
            job_role: self.job_role.clone(),
            chat_history,
        })
    }
}
