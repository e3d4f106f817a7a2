//! Interaction log routes.
//!
//! Interactions are append-only: logging one also stamps the contact's
//! last-touched timestamp.

use crate::routes::{ApiError, map_error};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use followup_core::{FollowupError, require_contact, validate_create_interaction};
use followup_types::{CreateInteractionRequest, Interaction};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateInteractionRequest>,
) -> Result<(StatusCode, Json<Interaction>), ApiError> {
    if !state.admit_write() {
        return Err(map_error(FollowupError::RateLimited));
    }
    validate_create_interaction(&req).map_err(map_error)?;

    let mut db = state.store.read().await.map_err(map_error)?;
    require_contact(&db, req.contact_id).map_err(map_error)?;

    let interaction = Interaction::new(req);
    if let Some(contact) = db.contact_mut(interaction.contact_id) {
        contact.record_touch(interaction.occurred_at);
    }
    db.interactions.push(interaction.clone());
    state.store.write(&db).await.map_err(map_error)?;

    info!(
        target: "followup::api",
        "logged interaction {} for contact {}",
        interaction.id,
        interaction.contact_id
    );
    Ok((StatusCode::CREATED, Json(interaction)))
}

/// List one contact's interactions, most recent first.
pub async fn list_for_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    let db = state.store.read().await.map_err(map_error)?;
    require_contact(&db, id).map_err(map_error)?;

    let mut interactions: Vec<Interaction> = db
        .interactions
        .into_iter()
        .filter(|i| i.contact_id == id)
        .collect();
    interactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    Ok(Json(interactions))
}
