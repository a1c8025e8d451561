use crate::error::{AppError, AppResult};
use crate::models::LinkRecord;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use std::str::FromStr;
use std::time::Duration;

/// Database repository
pub struct Repository {
    pub(crate) pool: PgPool,
}

impl Repository {
    /// Create a new repository with a connection pool
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_seconds: u64,
    ) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Configuration(format!("Invalid database URL: {}", e)))?
            .disable_statement_logging();

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Create a new link entry.
    ///
    /// Key and secret key are expected to be collision-checked by the
    /// generator; the unique indexes are the last line of defense.
    pub async fn create_link(
        &self,
        key: &str,
        secret_key: &str,
        target_url: &str,
    ) -> AppResult<LinkRecord> {
        let now = chrono::Utc::now();

        let result = sqlx::query_as::<_, LinkRecord>(
            r#"
            INSERT INTO links (key, secret_key, target_url, is_active, clicks, created_at)
            VALUES ($1, $2, $3, TRUE, 0, $4)
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(secret_key)
        .bind(target_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Get an active link by its public key. Deactivated links are
    /// invisible to redirect lookups.
    pub async fn find_by_key(&self, key: &str) -> AppResult<Option<LinkRecord>> {
        let result = sqlx::query_as::<_, LinkRecord>(
            r#"
            SELECT * FROM links
            WHERE key = $1 AND is_active = TRUE
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Get a link by its secret key, active or not, so a deactivated
    /// link's admin view stays reachable.
    pub async fn find_by_secret_key(&self, secret_key: &str) -> AppResult<Option<LinkRecord>> {
        let result = sqlx::query_as::<_, LinkRecord>(
            r#"
            SELECT * FROM links
            WHERE secret_key = $1
            "#,
        )
        .bind(secret_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Record one click against a link. A single atomic UPDATE, never a
    /// read-modify-write, so concurrent redirects cannot lose counts.
    pub async fn record_click(&self, key: &str) -> AppResult<Option<LinkRecord>> {
        let now = chrono::Utc::now();

        let result = sqlx::query_as::<_, LinkRecord>(
            r#"
            UPDATE links
            SET clicks = clicks + 1,
                last_clicked_at = $1
            WHERE key = $2
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Soft-delete a link by its secret key. Idempotent: deactivating an
    /// already-inactive link succeeds and leaves its state unchanged.
    pub async fn deactivate(&self, secret_key: &str) -> AppResult<Option<LinkRecord>> {
        let result = sqlx::query_as::<_, LinkRecord>(
            r#"
            UPDATE links
            SET is_active = FALSE
            WHERE secret_key = $1
            RETURNING *
            "#,
        )
        .bind(secret_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Check if a public key is taken by any record, active or not.
    /// Keys of deactivated links are never reissued.
    pub async fn key_exists(&self, key: &str) -> AppResult<bool> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM links WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await?;

        Ok(result > 0)
    }

    /// Check if a secret key is taken by any record, active or not.
    pub async fn secret_key_exists(&self, secret_key: &str) -> AppResult<bool> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM links WHERE secret_key = $1
            "#,
        )
        .bind(secret_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(result > 0)
    }

    /// Get statistics
    pub async fn get_stats(&self) -> AppResult<Stats> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*) as total_links,
                COALESCE(CAST(SUM(clicks) AS BIGINT), 0) as total_clicks,
                COUNT(*) FILTER (WHERE is_active) as active_links,
                COUNT(*) FILTER (WHERE NOT is_active) as inactive_links
            FROM links
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Stats {
            total_links: row.0,
            total_clicks: row.1,
            active_links: row.2,
            inactive_links: row.3,
        })
    }
}

/// Statistics struct
#[derive(Debug)]
pub struct Stats {
    pub total_links: i64,
    pub total_clicks: i64,
    pub active_links: i64,
    pub inactive_links: i64,
}

/// Clone implementation for Repository
impl Clone for Repository {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_creation() {
        let stats = Stats {
            total_links: 100,
            total_clicks: 1000,
            active_links: 80,
            inactive_links: 20,
        };

        assert_eq!(stats.total_links, 100);
        assert_eq!(stats.total_clicks, 1000);
        assert_eq!(stats.active_links, 80);
        assert_eq!(stats.inactive_links, 20);
    }
}
