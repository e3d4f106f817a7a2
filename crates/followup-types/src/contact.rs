//! Contact records and the enums shared across the document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority of a contact or task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Where a contact relationship lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Linkedin,
    Email,
    Call,
    Whatsapp,
    Inperson,
}

impl Default for Channel {
    fn default() -> Self {
        Self::Linkedin
    }
}

/// Lifecycle state of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    /// Actively being followed up.
    Active,
    /// Waiting on the other party.
    Waiting,
    /// No further follow-up planned.
    Closed,
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// A person being tracked for follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub channel: Channel,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub tags: Vec<String>,
    pub priority: Priority,
    pub status: ContactStatus,
    /// When an interaction was last logged against this contact.
    pub last_touched_at: Option<DateTime<Utc>>,
    /// When the next follow-up is due, if scheduled.
    pub next_follow_up_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Create a contact from a validated request.
    pub fn new(req: CreateContactRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: req.name,
            channel: req.channel,
            notes: req.notes,
            linkedin_url: req.linkedin_url,
            email: req.email,
            company: req.company,
            role: req.role,
            tags: req.tags,
            priority: req.priority,
            status: req.status,
            last_touched_at: None,
            next_follow_up_at: req.next_follow_up_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge an update into this contact, bumping `updated_at`.
    ///
    /// Absent fields are left unchanged.
    pub fn apply(&mut self, req: &UpdateContactRequest) {
        if let Some(name) = &req.name {
            self.name = name.clone();
        }
        if let Some(channel) = req.channel {
            self.channel = channel;
        }
        if let Some(notes) = &req.notes {
            self.notes = notes.clone();
        }
        if let Some(url) = &req.linkedin_url {
            self.linkedin_url = Some(url.clone());
        }
        if let Some(email) = &req.email {
            self.email = Some(email.clone());
        }
        if let Some(company) = &req.company {
            self.company = Some(company.clone());
        }
        if let Some(role) = &req.role {
            self.role = Some(role.clone());
        }
        if let Some(tags) = &req.tags {
            self.tags = tags.clone();
        }
        if let Some(priority) = req.priority {
            self.priority = priority;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        if let Some(at) = req.last_touched_at {
            self.last_touched_at = Some(at);
        }
        if let Some(at) = req.next_follow_up_at {
            self.next_follow_up_at = Some(at);
        }
        self.updated_at = Utc::now();
    }

    /// Record that an interaction touched this contact.
    pub fn record_touch(&mut self, at: DateTime<Utc>) {
        self.last_touched_at = Some(at);
        self.updated_at = Utc::now();
    }
}

/// Payload for creating a contact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: String,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub next_follow_up_at: Option<DateTime<Utc>>,
}

/// Payload for partially updating a contact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub channel: Option<Channel>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    pub last_touched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_follow_up_at: Option<DateTime<Utc>>,
}
