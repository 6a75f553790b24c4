use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

/// Create a PostgreSQL connection pool and run migrations.
/// Returns None if PostgreSQL is not configured.
pub async fn init_pg_pool(config: &forms_core::config::PostgresConfig) -> Option<PgPool> {
    if !config.is_configured() {
        warn!("PG_USERNAME not configured — form storage disabled");
        return None;
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_string())
        .await;

    match pool {
        Ok(pool) => {
            info!("PostgreSQL connected: {}", config.host);
            match sqlx::migrate!("../../migrations").run(&pool).await {
                Ok(_) => {
                    info!("Database migrations applied successfully");
                    Some(pool)
                }
                Err(e) => {
                    warn!("Failed to run migrations: {} — form storage disabled", e);
                    None
                }
            }
        }
        Err(e) => {
            warn!(
                "Failed to connect to PostgreSQL: {} — form storage disabled",
                e
            );
            None
        }
    }
}
