//! Resume tailoring and match scoring against a job description.

use serde::{Deserialize, Serialize};

use super::prompts::{fill, MATCH_SCORE_PROMPT_TEMPLATE, TAILOR_PROMPT_TEMPLATE};
use super::{Flow, Language};
use crate::llm_client::prompts::{MARKDOWN_SUBSET_INSTRUCTION, TRUTHFULNESS_INSTRUCTION};
use crate::validation::{FieldErrors, Validate};

const MIN_RESUME_CHARS: usize = 100;
const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorInput {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub language: Language,
}

impl Validate for TailorInput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.min_chars(
            "resumeText",
            &self.resume_text,
            MIN_RESUME_CHARS,
            "Resume must be at least 100 characters.",
        );
        errors.min_chars(
            "jobDescription",
            &self.job_description,
            MIN_JOB_DESCRIPTION_CHARS,
            "Job description must be at least 50 characters.",
        );
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorOutput {
    pub tailored_md: String,
    #[serde(default)]
    pub change_log: Vec<String>,
    pub match_score: f64,
    pub score_rationale: String,
}

impl Validate for TailorOutput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("tailoredMd", &self.tailored_md, "must not be empty");
        check_score(errors, self.match_score);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreOutput {
    pub match_score: f64,
    pub score_rationale: String,
}

impl Validate for MatchScoreOutput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        check_score(errors, self.match_score);
    }
}

/// Scores may be fractional but must lie in 0..=100.
fn check_score(errors: &mut FieldErrors, score: f64) {
    if !(0.0..=MAX_SCORE).contains(&score) {
        errors.push("matchScore", "must be between 0 and 100");
    }
}

/// Rewrites a resume toward a job description and scores the fit.
pub struct TailorResume;

impl Flow for TailorResume {
    const NAME: &'static str = "tailor_resume";
    type Input = TailorInput;
    type Output = TailorOutput;

    fn prompt(input: &TailorInput) -> String {
        fill(
            TAILOR_PROMPT_TEMPLATE,
            &[
                ("truthfulness", TRUTHFULNESS_INSTRUCTION),
                ("markdown_subset", MARKDOWN_SUBSET_INSTRUCTION),
                ("language", input.language.as_str()),
                ("job_description", &input.job_description),
                ("resume_text", &input.resume_text),
            ],
        )
    }
}

/// Scores an unmodified resume against a job description.
pub struct ResumeMatchScore;

impl Flow for ResumeMatchScore {
    const NAME: &'static str = "resume_match_score";
    type Input = TailorInput;
    type Output = MatchScoreOutput;

    fn prompt(input: &TailorInput) -> String {
        fill(
            MATCH_SCORE_PROMPT_TEMPLATE,
            &[
                ("language", input.language.as_str()),
                ("job_description", &input.job_description),
                ("resume_text", &input.resume_text),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::flows::execute;
    use crate::llm_client::testing::StubBackend;

    fn input() -> TailorInput {
        TailorInput {
            resume_text: "Jane Doe. Senior backend engineer with eight years of Rust, Go and \
                          Postgres experience building payment systems."
                .to_string(),
            job_description: "We need a backend engineer fluent in Rust and SQL databases."
                .to_string(),
            language: Language::Ru,
        }
    }

    #[test]
    fn test_short_fields_are_reported_together() {
        let input = TailorInput {
            resume_text: "too short".to_string(),
            job_description: "also short".to_string(),
            language: Language::En,
        };
        match input.validate() {
            Err(AppError::InvalidFields(fields)) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["resumeText", "jobDescription"]);
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let prompt = TailorResume::prompt(&input());
        assert!(prompt.contains("LANGUAGE: ru"));
        assert!(prompt.contains("payment systems"));
        assert!(prompt.contains("do NOT fabricate"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{markdown_subset}"));
    }

    #[test]
    fn test_slot_names_in_user_text_stay_literal() {
        let input = TailorInput {
            job_description: "Paste {resume_text} here, then {language}.".to_string(),
            ..input()
        };
        let prompt = ResumeMatchScore::prompt(&input);
        assert!(prompt.contains("Paste {resume_text} here, then {language}."));
        assert_eq!(prompt.matches("payment systems").count(), 1);
        assert_eq!(prompt.matches("LANGUAGE: ru").count(), 1);
    }

    #[tokio::test]
    async fn test_tailor_parses_output() {
        let backend = StubBackend::replying(
            r##"{"tailoredMd":"# Jane Doe\n## Skills\n- Rust","changeLog":["Moved Rust up"],
                "matchScore":87,"scoreRationale":"Strong Rust match."}"##,
        );
        let output = execute::<TailorResume>(&backend, &input()).await.unwrap();
        assert_eq!(output.match_score, 87.0);
        assert_eq!(output.change_log, vec!["Moved Rust up"]);
        assert!(output.tailored_md.starts_with("# Jane Doe"));
    }

    #[tokio::test]
    async fn test_score_above_range_is_rejected() {
        let backend =
            StubBackend::replying(r#"{"matchScore":140,"scoreRationale":"Generous."}"#);
        let result = execute::<ResumeMatchScore>(&backend, &input()).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_fractional_score_is_accepted() {
        let backend =
            StubBackend::replying(r#"{"matchScore":87.5,"scoreRationale":"Close match."}"#);
        let output = execute::<ResumeMatchScore>(&backend, &input()).await.unwrap();
        assert_eq!(output.match_score, 87.5);
    }

    #[tokio::test]
    async fn test_negative_score_is_rejected() {
        let backend = StubBackend::replying(r#"{"matchScore":-3,"scoreRationale":"Odd."}"#);
        let result = execute::<ResumeMatchScore>(&backend, &input()).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_match_score_parses_output() {
        let backend = StubBackend::replying(r#"{"matchScore":55,"scoreRationale":"Gaps in SQL."}"#);
        let output = execute::<ResumeMatchScore>(&backend, &input()).await.unwrap();
        assert_eq!(output.match_score, 55.0);
        assert_eq!(output.score_rationale, "Gaps in SQL.");
    }
}
