//! Contact routes.

use crate::routes::{ApiError, map_error};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use followup_core::{FollowupError, validate_create_contact, validate_update_contact};
use followup_types::{Contact, CreateContactRequest, UpdateContactRequest};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// List contacts in creation order.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Contact>>, ApiError> {
    let db = state.store.read().await.map_err(map_error)?;
    Ok(Json(db.contacts))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    if !state.admit_write() {
        return Err(map_error(FollowupError::RateLimited));
    }
    validate_create_contact(&req).map_err(map_error)?;

    let mut db = state.store.read().await.map_err(map_error)?;
    let contact = Contact::new(req);
    db.contacts.push(contact.clone());
    state.store.write(&db).await.map_err(map_error)?;

    info!(target: "followup::api", "created contact {}", contact.id);
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Contact>, ApiError> {
    let db = state.store.read().await.map_err(map_error)?;
    let contact = db
        .contact(id)
        .cloned()
        .ok_or_else(|| map_error(FollowupError::ContactNotFound(id)))?;
    Ok(Json(contact))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    if !state.admit_write() {
        return Err(map_error(FollowupError::RateLimited));
    }
    validate_update_contact(&req).map_err(map_error)?;

    let mut db = state.store.read().await.map_err(map_error)?;
    let contact = db
        .contact_mut(id)
        .ok_or_else(|| map_error(FollowupError::ContactNotFound(id)))?;
    contact.apply(&req);
    let updated = contact.clone();

    state.store.write(&db).await.map_err(map_error)?;
    Ok(Json(updated))
}
