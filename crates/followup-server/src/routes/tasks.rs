//! Task routes.
//!
//! Every write performs its own read-modify-write cycle against the
//! remote document; concurrent writers follow last-write-wins.

use crate::routes::{ApiError, map_error};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use followup_core::{FollowupError, require_contact, validate_create_task, validate_update_task};
use followup_types::{CreateTaskRequest, Task, UpdateTaskRequest};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// List tasks sorted by due date ascending, undated tasks last.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    let db = state.store.read().await.map_err(map_error)?;

    let mut tasks = db.tasks;
    tasks.sort_by(|a, b| match (a.due_at, b.due_at) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    });

    Ok(Json(tasks))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    if !state.admit_write() {
        return Err(map_error(FollowupError::RateLimited));
    }
    validate_create_task(&req).map_err(map_error)?;

    let mut db = state.store.read().await.map_err(map_error)?;
    if let Some(contact_id) = req.contact_id {
        require_contact(&db, contact_id).map_err(map_error)?;
    }

    let task = Task::new(req);
    db.tasks.push(task.clone());
    state.store.write(&db).await.map_err(map_error)?;

    info!(target: "followup::api", "created task {}", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if !state.admit_write() {
        return Err(map_error(FollowupError::RateLimited));
    }
    validate_update_task(&req).map_err(map_error)?;

    let mut db = state.store.read().await.map_err(map_error)?;
    if let Some(contact_id) = req.contact_id {
        require_contact(&db, contact_id).map_err(map_error)?;
    }

    let task = db
        .task_mut(id)
        .ok_or_else(|| map_error(FollowupError::TaskNotFound(id)))?;
    task.apply(&req);
    let updated = task.clone();

    state.store.write(&db).await.map_err(map_error)?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.admit_write() {
        return Err(map_error(FollowupError::RateLimited));
    }

    let mut db = state.store.read().await.map_err(map_error)?;
    db.remove_task(id)
        .ok_or_else(|| map_error(FollowupError::TaskNotFound(id)))?;

    state.store.write(&db).await.map_err(map_error)?;
    info!(target: "followup::api", "deleted task {}", id);
    Ok(StatusCode::NO_CONTENT)
}
