//! Report payload validation and normalization.
//!
//! Explicit validation replaces the schema-level rules a document store
//! would apply implicitly: payloads are trimmed first, then checked field
//! by field, and every violation carries a message naming the field.

use std::str::FromStr;

use naijafix_common::nigeria;
use naijafix_db::entities::report::{Category, Priority, ReportStatus};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Optional coordinate pair attached to a location.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Composite location value as submitted by clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationPayload {
    /// Neighbourhood or street.
    #[validate(
        required(message = "Area is required"),
        custom(function = validate_area)
    )]
    pub area: Option<String>,
    /// Local Government Area. The create path tolerates its absence.
    #[validate(custom(function = validate_lga))]
    pub lga: Option<String>,
    /// Nigerian state or the FCT.
    #[validate(
        required(message = "State is required"),
        custom(function = validate_state)
    )]
    pub state: Option<String>,
    /// Optional coordinates.
    pub coordinates: Option<Coordinates>,
}

impl LocationPayload {
    fn normalize(&mut self) {
        trim_in_place(&mut self.area);
        trim_in_place(&mut self.lga);
        trim_in_place(&mut self.state);
    }
}

/// Creation payload. Every field arrives optional so that missing required
/// fields are reported by name instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateReportPayload {
    /// Short summary of the issue.
    #[validate(
        required(message = "Title is required"),
        custom(function = validate_title)
    )]
    pub title: Option<String>,
    /// Full description of the issue.
    #[validate(
        required(message = "Description is required"),
        custom(function = validate_description)
    )]
    pub description: Option<String>,
    /// Issue category.
    #[validate(
        required(message = "Category is required"),
        custom(function = validate_category)
    )]
    pub category: Option<String>,
    /// Handling priority; defaults to medium when omitted.
    #[validate(custom(function = validate_priority))]
    pub priority: Option<String>,
    /// Where the issue is.
    #[validate(required(message = "Location is required"), nested)]
    pub location: Option<LocationPayload>,
    /// Optional photo URL.
    #[validate(custom(function = validate_image))]
    pub image: Option<String>,
    /// Identifier of the submitting user or session.
    #[validate(
        required(message = "Userid is required"),
        custom(function = validate_userid)
    )]
    pub userid: Option<String>,
    /// Manual urgency override; the urgent priority forces this on anyway.
    pub is_urgent: Option<bool>,
}

impl CreateReportPayload {
    /// Trim free-text fields in place. Length rules apply post-trim.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.category);
        trim_in_place(&mut self.priority);
        trim_in_place(&mut self.image);
        trim_in_place(&mut self.userid);
        if let Some(location) = self.location.as_mut() {
            location.normalize();
        }
    }
}

/// Full-update payload: provided fields replace stored ones, absent fields
/// are left untouched. Same field rules as creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateReportPayload {
    /// Replacement title.
    #[validate(custom(function = validate_title))]
    pub title: Option<String>,
    /// Replacement description.
    #[validate(custom(function = validate_description))]
    pub description: Option<String>,
    /// Replacement category.
    #[validate(custom(function = validate_category))]
    pub category: Option<String>,
    /// Replacement priority.
    #[validate(custom(function = validate_priority))]
    pub priority: Option<String>,
    /// Replacement location (the whole composite is replaced).
    #[validate(nested)]
    pub location: Option<LocationPayload>,
    /// Replacement image URL; an empty string clears it.
    #[validate(custom(function = validate_image))]
    pub image: Option<String>,
    /// Replacement status.
    #[validate(custom(function = validate_status))]
    pub status: Option<String>,
    /// Handler assignment.
    pub assigned_to: Option<String>,
    /// Resolution notes.
    #[validate(custom(function = validate_resolution_notes))]
    pub resolution_notes: Option<String>,
    /// Expected resolution date.
    pub estimated_resolution_date: Option<chrono::DateTime<chrono::Utc>>,
    /// Vote counter; never negative.
    #[validate(custom(function = validate_votes))]
    pub votes: Option<i32>,
    /// Manual urgency flag. Setting priority to urgent overrides this to true.
    pub is_urgent: Option<bool>,
}

impl UpdateReportPayload {
    /// Trim free-text fields in place. Length rules apply post-trim.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.category);
        trim_in_place(&mut self.priority);
        trim_in_place(&mut self.status);
        trim_in_place(&mut self.image);
        if let Some(location) = self.location.as_mut() {
            location.normalize();
        }
    }
}

/// One-directional urgency derivation: the urgent priority forces the flag
/// on; it is never cleared automatically when priority moves away from
/// urgent. Runs on every write, not only on creation.
#[must_use]
pub const fn derive_urgency(priority: Priority, is_urgent: bool) -> bool {
    is_urgent || matches!(priority, Priority::Urgent)
}

/// Flatten a [`ValidationErrors`] tree into its first field message.
#[must_use]
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    fn first(errors: &ValidationErrors) -> Option<String> {
        for kind in errors.errors().values() {
            match kind {
                ValidationErrorsKind::Field(field_errors) => {
                    if let Some(err) = field_errors.first() {
                        return Some(
                            err.message
                                .as_ref()
                                .map_or_else(|| err.code.to_string(), ToString::to_string),
                        );
                    }
                }
                ValidationErrorsKind::Struct(nested) => {
                    if let Some(message) = first(nested) {
                        return Some(message);
                    }
                }
                ValidationErrorsKind::List(items) => {
                    if let Some(message) = items.values().next().and_then(|n| first(n)) {
                        return Some(message);
                    }
                }
            }
        }
        None
    }

    first(errors).unwrap_or_else(|| "Validation failed".to_string())
}

fn trim_in_place(field: &mut Option<String>) {
    if let Some(value) = field.as_mut() {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len < 5 {
        return Err(field_error(
            "title",
            "Title must be at least 5 characters long".to_string(),
        ));
    }
    if len > 200 {
        return Err(field_error(
            "title",
            "Title cannot exceed 200 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len < 10 {
        return Err(field_error(
            "description",
            "Description must be at least 10 characters long".to_string(),
        ));
    }
    if len > 2000 {
        return Err(field_error(
            "description",
            "Description cannot exceed 2000 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    Category::from_str(category)
        .map(|_| ())
        .map_err(|message| field_error("category", message))
}

fn validate_priority(priority: &str) -> Result<(), ValidationError> {
    Priority::from_str(priority)
        .map(|_| ())
        .map_err(|message| field_error("priority", message))
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    ReportStatus::from_str(status)
        .map(|_| ())
        .map_err(|message| field_error("status", message))
}

fn validate_area(area: &str) -> Result<(), ValidationError> {
    if area.is_empty() {
        return Err(field_error("area", "Area is required".to_string()));
    }
    if area.chars().count() > 100 {
        return Err(field_error(
            "area",
            "Area cannot exceed 100 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_lga(lga: &str) -> Result<(), ValidationError> {
    if lga.chars().count() > 100 {
        return Err(field_error(
            "lga",
            "LGA cannot exceed 100 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.is_empty() {
        return Err(field_error("state", "State is required".to_string()));
    }
    if !nigeria::is_valid_state(state) {
        return Err(field_error("state", format!("Invalid state: {state}")));
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), ValidationError> {
    // An empty string means "no image"; the stored value clears.
    if image.is_empty() {
        return Ok(());
    }
    let valid = Url::parse(image)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(field_error(
            "image",
            "Image must be a valid http(s) URL".to_string(),
        ))
    }
}

fn validate_userid(userid: &str) -> Result<(), ValidationError> {
    if userid.is_empty() {
        return Err(field_error("userid", "Userid is required".to_string()));
    }
    Ok(())
}

fn validate_resolution_notes(notes: &str) -> Result<(), ValidationError> {
    if notes.chars().count() > 1000 {
        return Err(field_error(
            "resolutionNotes",
            "Resolution notes cannot exceed 1000 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_votes(votes: i32) -> Result<(), ValidationError> {
    if votes < 0 {
        return Err(field_error("votes", "Votes cannot be negative".to_string()));
    }
    Ok(())
}
