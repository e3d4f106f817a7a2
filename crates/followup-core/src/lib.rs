//! Core storage, parsing, and validation for the followup tracker.

mod auth;
mod dates;
mod error;
mod model;
mod rate;
mod store;

pub use auth::{OauthTokenProvider, TokenProvider};
pub use dates::resolve_natural_date;
pub use error::{FieldError, FollowupError, ValidationErrors};
pub use model::{
    require_contact, validate_create_contact, validate_create_interaction, validate_create_task,
    validate_update_contact, validate_update_task,
};
pub use rate::RateGate;
pub use store::{DriveConfig, DriveStore};

/// Result type for followup operations.
pub type Result<T> = std::result::Result<T, FollowupError>;
