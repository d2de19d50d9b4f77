//! Database layer - connection pool, schema bootstrap, and stores
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default)
//! - Handlers depend on store traits, never on the pool directly
//! - One statement per operation; nothing to roll back

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, redact_password, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
