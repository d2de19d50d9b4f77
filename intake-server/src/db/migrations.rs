//! Schema bootstrap for the intake tables
//!
//! Every statement is idempotent, so this runs on each `serve` start.

use sqlx::PgPool;

/// Create intake tables and indexes if they don't exist
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running intake migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS consultation_bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            full_name TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            email TEXT NOT NULL,
            consultation_type TEXT NOT NULL,
            preferred_date TEXT NOT NULL,
            preferred_time TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_messages (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone_number TEXT,
            subject TEXT,
            message TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Both list endpoints sort on created_at
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_consultation_bookings_created ON consultation_bookings(created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_contact_messages_created ON contact_messages(created_at DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Intake migrations complete");
    Ok(())
}
