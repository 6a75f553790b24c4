use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("form not found: {0}")]
    FormNotFound(uuid::Uuid),

    #[error("bad value in column {column}: {message}")]
    Column { column: String, message: String },
}

impl StorageError {
    pub fn column(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Column {
            column: column.into(),
            message: message.into(),
        }
    }
}
