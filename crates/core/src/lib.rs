//! Core business logic for naijafix-rs.

pub mod services;
pub mod validation;

pub use services::*;
pub use validation::{
    Coordinates, CreateReportPayload, LocationPayload, UpdateReportPayload, derive_urgency,
    first_validation_message,
};
