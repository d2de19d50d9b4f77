//! Store traits and their implementations
//!
//! Handlers only see the traits; `AppState` holds them as trait objects so
//! the Postgres repos and the in-memory store are interchangeable.
//!
//! Each store exposes exactly two operations:
//! - `create`: single INSERT ... RETURNING, no check-then-insert
//! - `list`: every row, newest first

pub mod consultations;
pub mod contact;
pub mod memory;

use async_trait::async_trait;

use crate::models::{NewConsultation, NewContactMessage};

pub use consultations::{ConsultationBooking, ConsultationRepo};
pub use contact::{ContactMessage, ContactRepo};
pub use memory::MemoryStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for consultation bookings
#[async_trait]
pub trait ConsultationStore: Send + Sync {
    /// Insert a booking; the store assigns `id` and `created_at`.
    async fn create(&self, booking: NewConsultation) -> Result<ConsultationBooking, DbError>;

    /// All bookings ordered by `created_at` descending.
    async fn list(&self) -> Result<Vec<ConsultationBooking>, DbError>;
}

/// Persistence for contact messages
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert a message; the store assigns `id` and `created_at`.
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, DbError>;

    /// All messages ordered by `created_at` descending.
    async fn list(&self) -> Result<Vec<ContactMessage>, DbError>;
}
