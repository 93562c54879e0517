//! Career exploration: recommendations from interests, then a three-month plan.

use serde::{Deserialize, Serialize};

use super::prompts::{fill, DEVELOPMENT_PLAN_PROMPT_TEMPLATE, RECOMMEND_CAREERS_PROMPT_TEMPLATE};
use super::Flow;
use crate::llm_client::prompts::MARKDOWN_SUBSET_INSTRUCTION;
use crate::validation::{FieldErrors, Validate};

const MIN_INTERESTS_CHARS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendCareersInput {
    pub interests: String,
}

impl Validate for RecommendCareersInput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.min_chars(
            "interests",
            &self.interests,
            MIN_INTERESTS_CHARS,
            "Please describe your interests in at least 10 characters.",
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub career_name: String,
    /// Markdown.
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendCareersOutput {
    pub recommendations: Vec<CareerRecommendation>,
}

impl Validate for RecommendCareersOutput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        if self.recommendations.is_empty() {
            errors.push("recommendations", "must contain at least one career");
        }
        for (i, rec) in self.recommendations.iter().enumerate() {
            errors.required(
                &format!("recommendations[{i}].careerName"),
                &rec.career_name,
                "must not be empty",
            );
        }
    }
}

pub struct RecommendCareers;

impl Flow for RecommendCareers {
    const NAME: &'static str = "recommend_careers";
    type Input = RecommendCareersInput;
    type Output = RecommendCareersOutput;

    fn prompt(input: &RecommendCareersInput) -> String {
        fill(RECOMMEND_CAREERS_PROMPT_TEMPLATE, &[("interests", &input.interests)])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlanInput {
    pub career_name: String,
}

impl Validate for DevelopmentPlanInput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("careerName", &self.career_name, "Career name is required.");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlanOutput {
    pub development_plan_md: String,
}

impl Validate for DevelopmentPlanOutput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("developmentPlanMd", &self.development_plan_md, "must not be empty");
    }
}

pub struct CreateDevelopmentPlan;

impl Flow for CreateDevelopmentPlan {
    const NAME: &'static str = "create_development_plan";
    type Input = DevelopmentPlanInput;
    type Output = DevelopmentPlanOutput;

    fn prompt(input: &DevelopmentPlanInput) -> String {
        fill(
            DEVELOPMENT_PLAN_PROMPT_TEMPLATE,
            &[
                ("career_name", input.career_name.trim()),
                ("markdown_subset", MARKDOWN_SUBSET_INSTRUCTION),
            ],
        )
    }
}
