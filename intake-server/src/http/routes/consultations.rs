//! Consultation booking endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::SecondsFormat;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{ConsultationBooking, ConsultationStore};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{ConsultationSubmission, NewConsultation};

/// Booking as listed by GET
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub consultation_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub created_at: String,
}

impl From<ConsultationBooking> for ConsultationResponse {
    fn from(b: ConsultationBooking) -> Self {
        Self {
            id: b.id,
            full_name: b.full_name,
            phone_number: b.phone_number,
            email: b.email,
            consultation_type: b.consultation_type,
            preferred_date: b.preferred_date,
            preferred_time: b.preferred_time,
            created_at: b.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub success: bool,
    pub booking_id: Uuid,
}

#[derive(Serialize)]
pub struct ConsultationList {
    pub consultations: Vec<ConsultationResponse>,
}

/// POST /api/consultations - book a consultation
async fn create_consultation(
    State(state): State<Arc<AppState>>,
    JsonBody(submission): JsonBody<ConsultationSubmission>,
) -> Result<(StatusCode, Json<BookingCreated>), ApiError> {
    let booking = NewConsultation::try_from(submission)?;

    let stored = state
        .consultations
        .create(booking)
        .await
        .map_err(ApiError::store("creating consultation booking"))?;

    tracing::info!(booking_id = %stored.id, "consultation booked");

    Ok((
        StatusCode::CREATED,
        Json(BookingCreated {
            success: true,
            booking_id: stored.id,
        }),
    ))
}

/// GET /api/consultations - every booking, newest first
async fn list_consultations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConsultationList>, ApiError> {
    let bookings = state
        .consultations
        .list()
        .await
        .map_err(ApiError::store("fetching consultations"))?;

    Ok(Json(ConsultationList {
        consultations: bookings.into_iter().map(ConsultationResponse::from).collect(),
    }))
}

/// Consultation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/consultations",
        get(list_consultations).post(create_consultation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::repos::{DbError, MemoryStore};

    /// Store whose every call fails like a dropped connection
    struct BrokenStore;

    #[async_trait]
    impl ConsultationStore for BrokenStore {
        async fn create(&self, _: NewConsultation) -> Result<ConsultationBooking, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn list(&self) -> Result<Vec<ConsultationBooking>, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }
    }

    fn app_with(store: Arc<dyn ConsultationStore>) -> Router {
        let state = AppState::new(store, Arc::new(MemoryStore::new()));
        router().with_state(Arc::new(state))
    }

    fn valid_payload() -> Value {
        json!({
            "fullName": "Jo Bloggs",
            "phoneNumber": "555-0100",
            "email": "jo@x.com",
            "consultationType": "initial",
            "preferredDate": "2026-11-02",
            "preferredTime": "10:30"
        })
    }

    async fn post(app: &Router, body: String) -> (StatusCode, Value) {
        post_as(app, Some("application/json"), body).await
    }

    async fn post_as(app: &Router, content_type: Option<&str>, body: String) -> (StatusCode, Value) {
        let mut req = Request::builder().method("POST").uri("/api/consultations");
        if let Some(content_type) = content_type {
            req = req.header("content-type", content_type);
        }
        let response = app
            .clone()
            .oneshot(req.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn list(app: &Router) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/consultations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn submit_then_list() {
        let app = app_with(Arc::new(MemoryStore::new()));

        let (status, body) = post(&app, valid_payload().to_string()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        let id = body["bookingId"].as_str().unwrap().to_owned();

        let (status, body) = list(&app).await;
        assert_eq!(status, StatusCode::OK);
        let listed = &body["consultations"][0];
        assert_eq!(listed["id"], id.as_str());
        assert_eq!(listed["fullName"], "Jo Bloggs");
        assert_eq!(listed["consultationType"], "initial");
        // millisecond UTC timestamp, e.g. 2026-11-02T10:30:00.123Z
        let created_at = listed["createdAt"].as_str().unwrap();
        assert_eq!(created_at.len(), 24, "{created_at}");
        assert!(created_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let app = app_with(Arc::new(MemoryStore::new()));

        for name in ["first", "second", "third"] {
            let mut payload = valid_payload();
            payload["fullName"] = json!(name);
            let (status, _) = post(&app, payload.to_string()).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = list(&app).await;
        let names: Vec<_> = body["consultations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["fullName"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn missing_field_is_400_and_not_persisted() {
        let app = app_with(Arc::new(MemoryStore::new()));

        for field in [
            "fullName",
            "phoneNumber",
            "email",
            "consultationType",
            "preferredDate",
            "preferredTime",
        ] {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(field);
            let (status, body) = post(&app, payload.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
            assert_eq!(body, json!({ "error": "Missing required fields" }));
        }

        let mut payload = valid_payload();
        payload["preferredDate"] = json!("");
        let (status, _) = post(&app, payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = list(&app).await;
        assert!(body["consultations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_email_is_400() {
        let app = app_with(Arc::new(MemoryStore::new()));

        for email in ["not-an-email", "jo@localhost", "jo @x.com"] {
            let mut payload = valid_payload();
            payload["email"] = json!(email);
            let (status, body) = post(&app, payload.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Invalid email address" }));
        }
    }

    #[tokio::test]
    async fn store_failure_is_opaque_500() {
        let app = app_with(Arc::new(BrokenStore));

        let (status, body) = post(&app, valid_payload().to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));

        let (status, body) = list(&app).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn malformed_body_is_500() {
        let app = app_with(Arc::new(MemoryStore::new()));

        let (status, body) = post(&app, "{not json".to_owned()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn body_parsed_regardless_of_content_type() {
        let app = app_with(Arc::new(MemoryStore::new()));

        for content_type in [Some("text/plain;charset=UTF-8"), None] {
            let (status, body) = post_as(&app, content_type, valid_payload().to_string()).await;
            assert_eq!(status, StatusCode::CREATED, "{content_type:?}");
            assert_eq!(body["success"], true);

            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove("preferredTime");
            let (status, body) = post_as(&app, content_type, payload.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{content_type:?}");
            assert_eq!(body, json!({ "error": "Missing required fields" }));
        }

        let (_, body) = list(&app).await;
        assert_eq!(body["consultations"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn falsy_field_counts_as_missing() {
        let app = app_with(Arc::new(MemoryStore::new()));

        for falsy in [json!(false), json!(0), json!(null)] {
            let mut payload = valid_payload();
            payload["fullName"] = falsy.clone();
            let (status, body) = post(&app, payload.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{falsy}");
            assert_eq!(body, json!({ "error": "Missing required fields" }));
        }
    }

    #[tokio::test]
    async fn truthy_non_string_field_is_500() {
        let app = app_with(Arc::new(MemoryStore::new()));

        let mut payload = valid_payload();
        payload["preferredTime"] = json!(true);
        let (status, body) = post(&app, payload.to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
