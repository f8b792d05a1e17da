use crate::db::models::DbUser;
use crate::error::AtriumError;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// The single process-wide database handle.
///
/// Every component that touches the database (registry, resolvers) holds a
/// clone of this; the underlying pool is shared. Created once at startup and
/// closed explicitly on shutdown.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(database_url: &str) -> Result<Self, AtriumError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

        info!(%database_url, "database connection established");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Inserts one user and returns the stored row, including the
    /// server-assigned id and timestamps.
    ///
    /// A duplicate email maps to `UniqueViolation` and inserts nothing; the
    /// statement is atomic, so there is no partial write to clean up.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<DbUser, AtriumError> {
        let now = Utc::now();
        let user: DbUser = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AtriumError::UniqueViolation {
                    model: "User",
                    field: "email",
                }
            }
            _ => AtriumError::Database(e),
        })?;

        Ok(user)
    }

    /// All users in insertion (`id`) order, the store default.
    pub async fn list_users(&self) -> Result<Vec<DbUser>, AtriumError> {
        let users: Vec<DbUser> = sqlx::query_as(
            "SELECT id, name, email, created_at, updated_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
