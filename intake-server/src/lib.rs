//! intake-server: consultation bookings and contact messages over HTTP
//!
//! Two intake components share one layout: a validated submission type in
//! [`models`], a store trait with Postgres and in-memory implementations in
//! [`db`], and a submit/list route pair in [`http`].

pub mod db;
pub mod http;
pub mod models;

pub use db::repos::{ConsultationStore, ContactStore, DbError, MemoryStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::ValidationError;
