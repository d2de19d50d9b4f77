//! Contact message repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{ContactStore, DbError};
use crate::models::NewContactMessage;

/// Contact message record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Postgres-backed contact message repository
#[derive(Clone)]
pub struct ContactRepo {
    pool: PgPool,
}

impl ContactRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for ContactRepo {
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, DbError> {
        // Absent optional fields bind as NULL
        let record = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (full_name, email, phone_number, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, email, phone_number, subject, message, created_at
            "#,
        )
        .bind(&message.full_name)
        .bind(message.email.as_str())
        .bind(message.phone_number.as_deref())
        .bind(message.subject.as_deref())
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, DbError> {
        let rows = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, full_name, email, phone_number, subject, message, created_at
            FROM contact_messages
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
