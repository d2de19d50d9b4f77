//! In-memory store
//!
//! Backs `intake serve --in-memory` and the router tests. Records live for
//! the lifetime of the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ConsultationBooking, ConsultationStore, ContactMessage, ContactStore, DbError};
use crate::models::{NewConsultation, NewContactMessage};

/// Process-local store implementing both intake traits
#[derive(Default)]
pub struct MemoryStore {
    consultations: RwLock<Vec<ConsultationBooking>>,
    messages: RwLock<Vec<ContactMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first. Rows are kept in insertion order, so reversing before the
/// stable sort breaks timestamp ties by insertion order.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[async_trait]
impl ConsultationStore for MemoryStore {
    async fn create(&self, booking: NewConsultation) -> Result<ConsultationBooking, DbError> {
        let record = ConsultationBooking {
            id: Uuid::new_v4(),
            full_name: booking.full_name,
            phone_number: booking.phone_number,
            email: booking.email.into_string(),
            consultation_type: booking.consultation_type,
            preferred_date: booking.preferred_date,
            preferred_time: booking.preferred_time,
            created_at: Utc::now(),
        };

        self.consultations.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ConsultationBooking>, DbError> {
        let rows = self.consultations.read().await;
        Ok(newest_first(rows.as_slice(), |b| b.created_at))
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, DbError> {
        let record = ContactMessage {
            id: Uuid::new_v4(),
            full_name: message.full_name,
            email: message.email.into_string(),
            phone_number: message.phone_number,
            subject: message.subject,
            message: message.message,
            created_at: Utc::now(),
        };

        self.messages.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, DbError> {
        let rows = self.messages.read().await;
        Ok(newest_first(rows.as_slice(), |m| m.created_at))
    }
}
