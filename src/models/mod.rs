//! Data models for Tether entities.
//!
//! This module defines the core data structures:
//! - `Person` - A tracked relationship with contact cadence and history
//! - `PersonInput` - Payload for creating a new person
//! - `PersonPatch` - Partial update applied to a stored person
//! - `UndoAction` - Snapshot of the last destructive action

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A person tracked by Tether.
///
/// `last_contact_date` always equals the newest entry in
/// `contact_history` once the person has been added. `contact_history`
/// never holds the same calendar date twice; `interaction_count` can
/// exceed `contact_history.len()` because same-day repeat contacts
/// increment the count without growing the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier (e.g., "tt-a1b2")
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Phone number, used only for import dedup matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Email address, used only for import dedup matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Optional label (e.g., "Friends", "Family", "Work")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Target contact cadence in days (>= 1)
    pub contact_frequency_days: u32,

    /// Calendar date of the most recent recorded contact
    pub last_contact_date: NaiveDate,

    /// Calendar date the person was added
    pub created_at: NaiveDate,

    /// Number of mark-contacted events, including the creation contact
    #[serde(default)]
    pub interaction_count: u32,

    /// Every contact date, insertion-ordered, no duplicates
    #[serde(default)]
    pub contact_history: Vec<NaiveDate>,

    /// Cached consecutive on-time contact count
    #[serde(default)]
    pub streak: u32,
}

impl Person {
    /// Create a new person from an input payload, seeding the creation
    /// contact for `today`.
    pub fn new(id: String, input: PersonInput, today: NaiveDate) -> Self {
        Self {
            id,
            name: input.name,
            notes: input.notes,
            phone: input.phone,
            email: input.email,
            category: input.category,
            contact_frequency_days: input.contact_frequency_days,
            last_contact_date: today,
            created_at: today,
            interaction_count: 0,
            contact_history: vec![today],
            streak: 0,
        }
    }
}

/// Payload for creating a new person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    pub name: String,

    #[serde(default)]
    pub notes: String,

    pub contact_frequency_days: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PersonInput {
    /// Validate the payload before it reaches the store.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("name must not be empty".to_string()));
        }
        if self.contact_frequency_days < 1 {
            return Err(Error::InvalidInput(
                "contact frequency must be at least 1 day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update for a stored person. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub contact_frequency_days: Option<u32>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl PersonPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.notes.is_none()
            && self.contact_frequency_days.is_none()
            && self.category.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }

    /// Shallow-merge the patch onto a person.
    pub fn apply(&self, person: &mut Person) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::InvalidInput("name must not be empty".to_string()));
            }
            person.name = name.clone();
        }
        if let Some(notes) = &self.notes {
            person.notes = notes.clone();
        }
        if let Some(freq) = self.contact_frequency_days {
            if freq < 1 {
                return Err(Error::InvalidInput(
                    "contact frequency must be at least 1 day".to_string(),
                ));
            }
            person.contact_frequency_days = freq;
        }
        if let Some(category) = &self.category {
            person.category = Some(category.clone());
        }
        if let Some(phone) = &self.phone {
            person.phone = Some(phone.clone());
        }
        if let Some(email) = &self.email {
            person.email = Some(email.clone());
        }
        Ok(())
    }
}

/// Kind of action held in the undo slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoKind {
    Update,
    Delete,
}

/// Single-slot snapshot of the most recent destructive action.
///
/// Each new destructive action overwrites the slot; a successful undo
/// clears it. There is no history stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoAction {
    pub kind: UndoKind,
    pub snapshot: Person,
}
