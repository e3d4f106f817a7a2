//! Task records: follow-up items with an optional due date.

use crate::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a task is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// A follow-up item, optionally linked to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub due_at: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Must reference an existing contact when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<Uuid>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an open task from a validated request.
    pub fn new(req: CreateTaskRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: req.title,
            due_at: req.due_at,
            priority: req.priority,
            status: TaskStatus::Open,
            contact_id: req.contact_id,
            notes: req.notes,
            created_at: Utc::now(),
        }
    }

    /// Merge an update into this task.
    ///
    /// Absent fields are left unchanged; `due_at` can be rescheduled but
    /// not cleared through this path.
    pub fn apply(&mut self, req: &UpdateTaskRequest) {
        if let Some(title) = &req.title {
            self.title = title.clone();
        }
        if let Some(due_at) = req.due_at {
            self.due_at = Some(due_at);
        }
        if let Some(priority) = req.priority {
            self.priority = priority;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        if let Some(contact_id) = req.contact_id {
            self.contact_id = Some(contact_id);
        }
        if let Some(notes) = &req.notes {
            self.notes = notes.clone();
        }
    }
}

/// Payload for creating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub contact_id: Option<Uuid>,
    #[serde(default)]
    pub notes: String,
}

/// Payload for partially updating a task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub contact_id: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}
