//! Saved custom system prompts, one append-only series per user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::{FieldErrors, Validate};

/// Versions returned by a listing, newest first.
pub const PROMPT_VERSION_LIMIT: i64 = 5;

const MIN_SYSTEM_PROMPT_CHARS: usize = 50;
const MIN_VERSION_LABEL_CHARS: usize = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPromptVersion {
    pub system_prompt: String,
    pub version_label: String,
}

impl Validate for NewPromptVersion {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.min_chars(
            "systemPrompt",
            &self.system_prompt,
            MIN_SYSTEM_PROMPT_CHARS,
            "System prompt must be at least 50 characters.",
        );
        errors.min_chars(
            "versionLabel",
            &self.version_label,
            MIN_VERSION_LABEL_CHARS,
            "Version label must be at least 3 characters.",
        );
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PromptVersionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version_label: String,
    pub system_prompt: String,
    pub created_at: DateTime<Utc>,
}

pub async fn save_prompt_version(
    pool: &PgPool,
    user_id: Uuid,
    version: &NewPromptVersion,
) -> Result<PromptVersionRow, AppError> {
    version.validate()?;

    let row = sqlx::query_as::<_, PromptVersionRow>(
        r#"
        INSERT INTO prompt_versions (id, user_id, version_label, system_prompt)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, version_label, system_prompt, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(version.version_label.trim())
    .bind(&version.system_prompt)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_prompt_versions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PromptVersionRow>, AppError> {
    let rows = sqlx::query_as::<_, PromptVersionRow>(
        r#"
        SELECT id, user_id, version_label, system_prompt, created_at
        FROM prompt_versions
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(PROMPT_VERSION_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_and_label_rejected() {
        let version = NewPromptVersion {
            system_prompt: "Be nice.".to_string(),
            version_label: "v1".to_string(),
        };
        let Err(AppError::InvalidFields(fields)) = version.validate() else {
            panic!("expected field errors");
        };
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_valid_version_passes() {
        let version = NewPromptVersion {
            system_prompt: "You are a meticulous resume editor. Keep every claim verifiable."
                .to_string(),
            version_label: "strict-v2".to_string(),
        };
        assert!(version.validate().is_ok());
    }

    #[test]
    fn test_deserializes_camel_case() {
        let version: NewPromptVersion =
            serde_json::from_str(r#"{"systemPrompt":"x","versionLabel":"abc"}"#).unwrap();
        assert_eq!(version.version_label, "abc");
    }
}
