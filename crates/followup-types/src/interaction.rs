//! Interaction records: one logged touch with a contact.

use crate::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who initiated the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outbound,
    Inbound,
}

/// What came out of the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    None,
    Positive,
    Rejected,
    Scheduled,
    NeedsInfo,
}

impl Default for Outcome {
    fn default() -> Self {
        Self::None
    }
}

/// A single logged touch with a contact.
///
/// Interactions are immutable once written: there is no update path,
/// only append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: Uuid,
    /// The contact this interaction belongs to. Must reference an
    /// existing contact at write time.
    pub contact_id: Uuid,
    pub channel: Channel,
    pub direction: Direction,
    pub occurred_at: DateTime<Utc>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub outcome: Outcome,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    /// Create an interaction from a validated request.
    ///
    /// `occurred_at` defaults to the creation instant when the request
    /// doesn't carry one.
    pub fn new(req: CreateInteractionRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            contact_id: req.contact_id,
            channel: req.channel,
            direction: req.direction,
            occurred_at: req.occurred_at.unwrap_or(now),
            summary: req.summary,
            link: req.link,
            outcome: req.outcome,
            created_at: now,
        }
    }
}

/// Payload for logging an interaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteractionRequest {
    pub contact_id: Uuid,
    pub channel: Channel,
    pub direction: Direction,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    pub summary: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub outcome: Outcome,
}
