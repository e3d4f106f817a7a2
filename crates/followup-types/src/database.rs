//! The whole-document aggregate persisted as a single JSON file.

use crate::{Contact, Interaction, Task};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The entire persisted state of one user's tracker.
///
/// Every write replaces the full document; there is no partial update at
/// the storage layer. Collections preserve insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub version: u32,
    pub contacts: Vec<Contact>,
    pub interactions: Vec<Interaction>,
    pub tasks: Vec<Task>,
}

impl Database {
    /// Schema version written into new documents.
    pub const CURRENT_VERSION: u32 = 1;

    /// The document a fresh (or recovered) store starts from.
    pub fn initial() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            contacts: Vec::new(),
            interactions: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn contact_exists(&self, id: Uuid) -> bool {
        self.contacts.iter().any(|c| c.id == id)
    }

    pub fn contact(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn contact_mut(&mut self, id: Uuid) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id == id)
    }

    pub fn task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove a task, returning it if it was present.
    pub fn remove_task(&mut self, id: Uuid) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }
}
