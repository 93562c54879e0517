//! Prompt-flow façade.
//!
//! Every AI feature is a [`Flow`]: a typed input, a fixed prompt template, and a
//! typed JSON output. [`execute`] validates the input, makes exactly one model
//! call through the [`CompletionBackend`] seam, then validates what came back.
//! No retries, no caching, no streaming.
//!
//! The one flow that does not touch the model (local opportunities) lives in
//! `crate::places`.

pub mod career;
pub mod handlers;
pub mod interview;
pub mod prompts;
pub mod resume;
pub mod tailor;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{complete_json, prompts::JSON_ONLY_SYSTEM, CompletionBackend};
use crate::validation::{describe, FieldErrors, Validate};

// ────────────────────────────────────────────────────────────────────────────
// Flow trait
// ────────────────────────────────────────────────────────────────────────────

/// A single prompt flow. Implemented by zero-sized marker types.
pub trait Flow {
    /// Name used in logs and error messages.
    const NAME: &'static str;

    type Input: Validate + Sync;
    type Output: DeserializeOwned + Validate;

    /// Fills the flow's template with the (already validated) input.
    fn prompt(input: &Self::Input) -> String;

    fn system() -> &'static str {
        JSON_ONLY_SYSTEM
    }
}

/// Runs one flow end to end.
///
/// Input violations come back as `AppError::InvalidFields` before any call is
/// made. Provider failures and malformed or out-of-range output surface as
/// `AppError::Llm`.
pub async fn execute<F: Flow>(
    llm: &dyn CompletionBackend,
    input: &F::Input,
) -> Result<F::Output, AppError> {
    input.validate()?;

    let prompt = F::prompt(input);
    debug!(flow = F::NAME, prompt_len = prompt.len(), "Executing flow");

    let output: F::Output = complete_json(llm, &prompt, F::system())
        .await
        .map_err(|e| AppError::Llm(format!("{} call failed: {e}", F::NAME)))?;

    let mut violations = FieldErrors::new();
    output.validate_into(&mut violations);
    if !violations.is_empty() {
        let detail = describe(&violations.into_inner());
        warn!(flow = F::NAME, %detail, "Model output failed validation");
        return Err(AppError::Llm(format!(
            "{} returned invalid output: {detail}",
            F::NAME
        )));
    }

    Ok(output)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared wire types
// ────────────────────────────────────────────────────────────────────────────

/// Output language for the tailoring flows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Kz,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Kz => "kz",
        }
    }
}

/// Request envelope for every flow endpoint. `userId` opts into history.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRequest<I> {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub input: I,
}
