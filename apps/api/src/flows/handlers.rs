//! Axum route handlers for the prompt flows.
//!
//! Each handler runs one flow. When the request carries `userId`, the result is
//! appended to that user's history before responding.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use super::career::{
    CreateDevelopmentPlan, DevelopmentPlanInput, DevelopmentPlanOutput, RecommendCareers,
    RecommendCareersInput, RecommendCareersOutput,
};
use super::interview::{
    practice, InterviewSession, PracticeInterviewInput, PracticeInterviewOutput,
    SummarizeInterview, SummarizeInterviewOutput,
};
use super::resume::{CreateResume, CreateResumeInput, CreateResumeOutput};
use super::tailor::{MatchScoreOutput, ResumeMatchScore, TailorInput, TailorOutput, TailorResume};
use super::{execute, FlowRequest};
use crate::errors::AppError;
use crate::history::{
    self, CareerRecommendationRun, CreatedResume, DevelopmentPlanRun, HistoryEntry,
    InterviewRecord, TailoringRun, DEFAULT_PROMPT_VERSION,
};
use crate::state::AppState;

async fn remember(state: &AppState, user_id: Option<Uuid>, entry: impl FnOnce() -> HistoryEntry) {
    if let Some(user_id) = user_id {
        history::record(&state.db, &state.history_feed, user_id, entry()).await;
    }
}

/// POST /api/v1/flows/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest<TailorInput>>,
) -> Result<Json<TailorOutput>, AppError> {
    let output = execute::<TailorResume>(state.llm.as_ref(), &request.input).await?;

    remember(&state, request.user_id, || {
        HistoryEntry::Tailoring(TailoringRun {
            resume_original: request.input.resume_text.clone(),
            job_description: request.input.job_description.clone(),
            language: request.input.language,
            tailored_resume_md: output.tailored_md.clone(),
            change_log: output.change_log.clone(),
            match_score: output.match_score,
            score_rationale: output.score_rationale.clone(),
            prompt_version: DEFAULT_PROMPT_VERSION.to_string(),
        })
    })
    .await;

    Ok(Json(output))
}

/// POST /api/v1/flows/match-score
///
/// Scoring alone is not saved to history.
pub async fn handle_match_score(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest<TailorInput>>,
) -> Result<Json<MatchScoreOutput>, AppError> {
    let output = execute::<ResumeMatchScore>(state.llm.as_ref(), &request.input).await?;
    Ok(Json(output))
}

/// POST /api/v1/flows/create-resume
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest<CreateResumeInput>>,
) -> Result<Json<CreateResumeOutput>, AppError> {
    let output = execute::<CreateResume>(state.llm.as_ref(), &request.input).await?;

    remember(&state, request.user_id, || {
        HistoryEntry::CreatedResume(CreatedResume {
            form_data: request.input.clone(),
            generated_resume_md: output.generated_resume_md.clone(),
        })
    })
    .await;

    Ok(Json(output))
}

/// POST /api/v1/flows/recommend-careers
pub async fn handle_recommend_careers(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest<RecommendCareersInput>>,
) -> Result<Json<RecommendCareersOutput>, AppError> {
    let output = execute::<RecommendCareers>(state.llm.as_ref(), &request.input).await?;

    remember(&state, request.user_id, || {
        HistoryEntry::CareerRecommendation(CareerRecommendationRun {
            interests: request.input.interests.clone(),
            recommendations: output.recommendations.clone(),
        })
    })
    .await;

    Ok(Json(output))
}

/// POST /api/v1/flows/development-plan
pub async fn handle_development_plan(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest<DevelopmentPlanInput>>,
) -> Result<Json<DevelopmentPlanOutput>, AppError> {
    let output = execute::<CreateDevelopmentPlan>(state.llm.as_ref(), &request.input).await?;

    remember(&state, request.user_id, || {
        HistoryEntry::DevelopmentPlan(DevelopmentPlanRun {
            career_name: request.input.career_name.trim().to_string(),
            development_plan_md: output.development_plan_md.clone(),
        })
    })
    .await;

    Ok(Json(output))
}

/// POST /api/v1/flows/interview
///
/// One question/feedback turn. Sessions are saved through the summary endpoint.
pub async fn handle_interview_turn(
    State(state): State<AppState>,
    Json(request): Json<FlowRequest<PracticeInterviewInput>>,
) -> Result<Json<PracticeInterviewOutput>, AppError> {
    let output = practice(state.llm.as_ref(), &request.input).await?;
    Ok(Json(output))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummaryRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub session: InterviewSession,
}

/// POST /api/v1/flows/interview/summary
///
/// Summarizes a finished session and saves transcript plus summary.
pub async fn handle_interview_summary(
    State(state): State<AppState>,
    Json(request): Json<InterviewSummaryRequest>,
) -> Result<Json<SummarizeInterviewOutput>, AppError> {
    let input = request.session.summary_input()?;
    let output = execute::<SummarizeInterview>(state.llm.as_ref(), &input).await?;

    remember(&state, request.user_id, || {
        HistoryEntry::Interview(InterviewRecord {
            job_role: request.session.job_role.trim().to_string(),
            chat_history: request.session.history.clone(),
            summary: output.summary.clone(),
        })
    })
    .await;

    Ok(Json(output))
}
