//! Form queries.

use sqlx::PgPool;
use uuid::Uuid;

use forms_core::Form;
use forms_schedule::FormSchedule;

use crate::error::StorageError;
use crate::row::FormRow;

/// Read access to form records and their schedules.
#[derive(Debug, Clone)]
pub struct FormStore {
    pool: PgPool,
}

impl FormStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one form with its schedule.
    pub async fn read_form(&self, id: Uuid) -> Result<(Form, FormSchedule), StorageError> {
        let row = sqlx::query_as::<_, FormRow>(r#"SELECT * FROM form WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::FormNotFound(id))?;

        row.into_parts()
    }

    /// All active forms. Deleted (inactive) forms are excluded by default;
    /// callers that need them must ask explicitly.
    pub async fn list_active_forms(&self) -> Result<Vec<(Form, FormSchedule)>, StorageError> {
        let rows =
            sqlx::query_as::<_, FormRow>(r#"SELECT * FROM form WHERE active ORDER BY name"#)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(FormRow::into_parts).collect()
    }

    /// Active forms with scheduling enabled — the reminder worker's input.
    pub async fn list_reminder_forms(&self) -> Result<Vec<(Form, FormSchedule)>, StorageError> {
        let rows = sqlx::query_as::<_, FormRow>(
            r#"SELECT * FROM form WHERE active AND "schEnabled" ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FormRow::into_parts).collect()
    }
}
