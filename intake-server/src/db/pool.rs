//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and acquire timeout.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing with 500.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a PostgreSQL connection pool with default limits.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/intake").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        url = %redact_password(database_url),
        max_connections,
        "connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Replace the password in a connection URL with `****` for display.
///
/// URLs without credentials are returned unchanged.
pub fn redact_password(database_url: &str) -> String {
    let Some((scheme, rest)) = database_url.split_once("://") else {
        return database_url.to_owned();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return database_url.to_owned();
    };

    match userinfo.split_once(':') {
        Some((user, _password)) => format!("{scheme}://{user}:****@{host}"),
        None => database_url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_password() {
        assert_eq!(
            redact_password("postgres://app:s3cret@db:5432/intake"),
            "postgres://app:****@db:5432/intake"
        );
    }

    #[test]
    fn leaves_passwordless_urls_alone() {
        assert_eq!(
            redact_password("postgres://localhost/intake"),
            "postgres://localhost/intake"
        );
        assert_eq!(
            redact_password("postgres://app@localhost/intake"),
            "postgres://app@localhost/intake"
        );
        assert_eq!(redact_password("not a url"), "not a url");
    }

    // Run with: DATABASE_URL=postgres://... cargo test -p intake-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
