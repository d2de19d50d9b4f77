//! Contact message endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::SecondsFormat;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{ContactMessage, ContactStore};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{ContactSubmission, NewContactMessage};

/// Contact message as listed by GET. Absent optionals serialize as `null`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: String,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            phone_number: m.phone_number,
            subject: m.subject,
            message: m.message,
            created_at: m.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreated {
    pub success: bool,
    pub message_id: Uuid,
}

#[derive(Serialize)]
pub struct ContactMessageList {
    pub messages: Vec<ContactMessageResponse>,
}

/// POST /api/contact - leave a message
async fn create_message(
    State(state): State<Arc<AppState>>,
    JsonBody(submission): JsonBody<ContactSubmission>,
) -> Result<(StatusCode, Json<MessageCreated>), ApiError> {
    let message = NewContactMessage::try_from(submission)?;

    let stored = state
        .contact
        .create(message)
        .await
        .map_err(ApiError::store("creating contact message"))?;

    tracing::info!(message_id = %stored.id, "contact message received");

    Ok((
        StatusCode::CREATED,
        Json(MessageCreated {
            success: true,
            message_id: stored.id,
        }),
    ))
}

/// GET /api/contact - every message, newest first
async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContactMessageList>, ApiError> {
    let messages = state
        .contact
        .list()
        .await
        .map_err(ApiError::store("fetching contact messages"))?;

    Ok(Json(ContactMessageList {
        messages: messages.into_iter().map(ContactMessageResponse::from).collect(),
    }))
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/contact", get(list_messages).post(create_message))
}
