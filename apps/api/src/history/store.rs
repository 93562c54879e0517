use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use super::{display, HistoryEntry, HistoryRecord, HISTORY_LIMIT};
use crate::errors::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

impl HistoryRow {
    /// Decodes the stored payload. `None` when the row no longer matches any entry kind.
    pub fn into_record(self) -> Option<HistoryRecord> {
        match serde_json::from_value::<HistoryEntry>(self.payload) {
            Ok(entry) => Some(HistoryRecord {
                id: self.id,
                user_id: self.user_id,
                created_at: self.created_at,
                display: display(&entry),
                entry,
            }),
            Err(e) => {
                warn!(id = %self.id, kind = %self.kind, "Skipping undecodable history row: {e}");
                None
            }
        }
    }
}

/// Append-only INSERT. `created_at` is assigned by the database.
pub async fn append_history(
    pool: &PgPool,
    user_id: Uuid,
    entry: &HistoryEntry,
) -> Result<Uuid, AppError> {
    let payload = serde_json::to_value(entry).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize history entry: {e}"))
    })?;
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO history_records (id, user_id, kind, payload)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(entry.kind())
    .bind(&payload)
    .execute(pool)
    .await?;

    Ok(id)
}

/// The user's most recent entries, newest first.
pub async fn recent_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<HistoryRecord>, AppError> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"
        SELECT id, user_id, kind, payload, created_at
        FROM history_records
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(HISTORY_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(HistoryRow::into_record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DevelopmentPlanRun;

    fn row(payload: Value) -> HistoryRow {
        HistoryRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: "development_plan".to_string(),
            payload,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_decodes_into_record() {
        let entry = HistoryEntry::DevelopmentPlan(DevelopmentPlanRun {
            career_name: "UX Designer".to_string(),
            development_plan_md: "## Month 1: Foundational Skills".to_string(),
        });
        let record = row(serde_json::to_value(&entry).unwrap())
            .into_record()
            .unwrap();
        assert_eq!(record.display.title, "Development plan: UX Designer");
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let record = row(serde_json::json!({"type": "horoscope", "sign": "leo"})).into_record();
        assert!(record.is_none());
    }
}
