//! PostgreSQL wiring for the todo service: env-driven pool and table DDL.

use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

fn required_env(name: &'static str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::BadRequest(format!("{name} is not set")))
}

/// Connection options from `DB_HOST`, `DB_PORT` (default 5432), `DB_NAME`,
/// `DB_USER`, `DB_PASSWORD`.
pub fn pg_options_from_env() -> Result<PgConnectOptions, AppError> {
    let port: u16 = std::env::var("DB_PORT")
        .unwrap_or_else(|_| "5432".into())
        .parse()
        .map_err(|_| AppError::BadRequest("DB_PORT is not a valid port".into()))?;
    Ok(PgConnectOptions::new()
        .host(&required_env("DB_HOST")?)
        .port(port)
        .database(&required_env("DB_NAME")?)
        .username(&required_env("DB_USER")?)
        .password(&required_env("DB_PASSWORD")?))
}

/// Lazily-connecting pool capped at one connection, serializing database
/// access within a runtime instance.
pub fn pg_pool_from_env() -> Result<PgPool, AppError> {
    let options = pg_options_from_env()?;
    Ok(PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy_with(options))
}

/// Create the todos table if missing. Called before every store operation so
/// a fresh database self-heals.
pub async fn ensure_todos_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            completed BOOLEAN DEFAULT FALSE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
