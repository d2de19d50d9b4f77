//! Consultation booking repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{ConsultationStore, DbError};
use crate::models::NewConsultation;

/// Booking record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ConsultationBooking {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub consultation_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub created_at: DateTime<Utc>,
}

/// Postgres-backed booking repository
#[derive(Clone)]
pub struct ConsultationRepo {
    pool: PgPool,
}

impl ConsultationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsultationStore for ConsultationRepo {
    async fn create(&self, booking: NewConsultation) -> Result<ConsultationBooking, DbError> {
        let record = sqlx::query_as::<_, ConsultationBooking>(
            r#"
            INSERT INTO consultation_bookings
                (full_name, phone_number, email, consultation_type, preferred_date, preferred_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, phone_number, email, consultation_type,
                      preferred_date, preferred_time, created_at
            "#,
        )
        .bind(&booking.full_name)
        .bind(&booking.phone_number)
        .bind(booking.email.as_str())
        .bind(&booking.consultation_type)
        .bind(&booking.preferred_date)
        .bind(&booking.preferred_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ConsultationBooking>, DbError> {
        let rows = sqlx::query_as::<_, ConsultationBooking>(
            r#"
            SELECT id, full_name, phone_number, email, consultation_type,
                   preferred_date, preferred_time, created_at
            FROM consultation_bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
