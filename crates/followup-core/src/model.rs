//! Field-level and referential validation, applied before any write
//! reaches the store.

use crate::Result;
use crate::error::{FieldError, FollowupError};
use followup_types::{
    CreateContactRequest, CreateInteractionRequest, CreateTaskRequest, Database,
    UpdateContactRequest, UpdateTaskRequest,
};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn validate_create_contact(req: &CreateContactRequest) -> Result<()> {
    let mut errors = Vec::new();
    if req.name.trim().is_empty() {
        errors.push(FieldError::new("name", "is required"));
    }
    check_url("linkedinUrl", req.linkedin_url.as_deref(), &mut errors);
    check_email("email", req.email.as_deref(), &mut errors);
    finish(errors)
}

pub fn validate_update_contact(req: &UpdateContactRequest) -> Result<()> {
    let mut errors = Vec::new();
    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }
    }
    check_url("linkedinUrl", req.linkedin_url.as_deref(), &mut errors);
    check_email("email", req.email.as_deref(), &mut errors);
    finish(errors)
}

pub fn validate_create_interaction(req: &CreateInteractionRequest) -> Result<()> {
    let mut errors = Vec::new();
    if req.summary.trim().is_empty() {
        errors.push(FieldError::new("summary", "is required"));
    }
    check_url("link", req.link.as_deref(), &mut errors);
    finish(errors)
}

pub fn validate_create_task(req: &CreateTaskRequest) -> Result<()> {
    let mut errors = Vec::new();
    if req.title.trim().is_empty() {
        errors.push(FieldError::new("title", "is required"));
    }
    finish(errors)
}

pub fn validate_update_task(req: &UpdateTaskRequest) -> Result<()> {
    let mut errors = Vec::new();
    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            errors.push(FieldError::new("title", "must not be empty"));
        }
    }
    finish(errors)
}

/// Referential check: the id must name an existing contact in the
/// current document, otherwise the operation is rejected before any
/// write occurs.
pub fn require_contact(db: &Database, id: Uuid) -> Result<()> {
    if db.contact_exists(id) {
        Ok(())
    } else {
        Err(FollowupError::ContactNotFound(id))
    }
}

// An empty string is accepted everywhere a URL or email is optional; it
// is how clients clear a field.
fn check_url(field: &'static str, value: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(url) = value {
        if !url.is_empty() && reqwest::Url::parse(url).is_err() {
            errors.push(FieldError::new(field, "must be a valid URL"));
        }
    }
}

fn check_email(field: &'static str, value: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(email) = value {
        if !email.is_empty() && !EMAIL.is_match(email) {
            errors.push(FieldError::new(field, "must be a valid email address"));
        }
    }
}

fn finish(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FollowupError::validation(errors))
    }
}
