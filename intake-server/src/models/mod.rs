//! Domain models with validation at construction
//!
//! Raw submissions are deserialized as-is, then converted with `TryFrom`.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod email;
pub mod consultation;
pub mod contact;

pub use validation::ValidationError;
pub use email::EmailAddress;
pub use consultation::{ConsultationSubmission, NewConsultation};
pub use contact::{ContactSubmission, NewContactMessage};
