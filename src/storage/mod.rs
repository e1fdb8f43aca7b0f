//! Storage layer for Tether data.
//!
//! The whole person collection lives as one JSON array document under
//! a single key; every mutation is a read-modify-write of that
//! document. The undo slot is a second single-entry document. Both are
//! held by a [`DocumentBackend`]:
//!
//! - **File backend** (default): `~/.local/share/tether/` (or the
//!   platform data dir), overridable via `TT_DATA_DIR`
//! - **Memory backend**: for tests

pub mod backend;

pub use backend::{DocumentBackend, FileBackend, MemoryBackend};

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::models::{Person, PersonInput, PersonPatch, UndoAction, UndoKind};
use crate::streak::current_streak;
use crate::{Error, Result};

/// Key holding the serialized person collection.
pub const PEOPLE_KEY: &str = "people";

/// Key holding the serialized undo slot.
pub const UNDO_KEY: &str = "undo";

/// Store for the person collection, with a single-slot undo.
pub struct Store {
    backend: Box<dyn DocumentBackend>,
}

impl Store {
    /// Open the store at the default data directory.
    pub fn open() -> Result<Self> {
        Self::open_at(&default_data_dir()?)
    }

    /// Open the store at an explicit data directory.
    pub fn open_at(dir: &Path) -> Result<Self> {
        Ok(Self {
            backend: Box::new(FileBackend::new(dir)?),
        })
    }

    /// Build a store over an arbitrary backend.
    pub fn with_backend(backend: Box<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// Where this store keeps its data (for display purposes).
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Load the full person collection.
    ///
    /// A missing or malformed document is treated as "no data" and
    /// returns an empty collection; read errors are never surfaced.
    pub fn load_all(&self) -> Vec<Person> {
        match self.backend.get(PEOPLE_KEY) {
            Ok(Some(doc)) => serde_json::from_str(&doc).unwrap_or_default(),
            Ok(None) | Err(_) => Vec::new(),
        }
    }

    /// Persist the full person collection.
    fn save_all(&mut self, people: &[Person]) -> Result<()> {
        let doc = serde_json::to_string(people)?;
        self.backend.set(PEOPLE_KEY, &doc)
    }

    /// Get a person by id.
    pub fn get(&self, id: &str) -> Result<Person> {
        self.load_all()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Add a new person, seeding the creation contact for `today`.
    pub fn add(&mut self, input: PersonInput, today: NaiveDate) -> Result<Person> {
        input.validate()?;

        let mut people = self.load_all();

        let mut id = generate_id(&input.name);
        while people.iter().any(|p| p.id == id) {
            id = generate_id(&input.name);
        }

        let person = Person::new(id, input, today);
        people.push(person.clone());
        self.save_all(&people)?;

        Ok(person)
    }

    /// Shallow-merge a patch onto the stored person.
    pub fn update(&mut self, id: &str, patch: &PersonPatch) -> Result<Person> {
        let mut people = self.load_all();
        let person = people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        patch.apply(person)?;
        let updated = person.clone();
        self.save_all(&people)?;

        Ok(updated)
    }

    /// Replace a stored person wholesale, matching by id.
    fn replace(&mut self, person: Person) -> Result<Person> {
        let mut people = self.load_all();
        let slot = people
            .iter_mut()
            .find(|p| p.id == person.id)
            .ok_or_else(|| Error::NotFound(person.id.clone()))?;

        *slot = person.clone();
        self.save_all(&people)?;

        Ok(person)
    }

    /// Remove a person. A missing id is a no-op, not an error.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut people = self.load_all();
        let before = people.len();
        people.retain(|p| p.id != id);

        if people.len() != before {
            self.save_all(&people)?;
        }
        Ok(())
    }

    /// Record a contact with the person today.
    ///
    /// Appends `today` to the contact history unless already present,
    /// so a same-day repeat call never duplicates the date - but the
    /// interaction count still increments on every call. The streak is
    /// recomputed from the updated history.
    pub fn mark_contacted(&mut self, id: &str, today: NaiveDate) -> Result<Person> {
        let mut people = self.load_all();
        let person = people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        if !person.contact_history.contains(&today) {
            person.contact_history.push(today);
        }
        person.last_contact_date = today;
        person.interaction_count += 1;
        person.streak = current_streak(&person.contact_history, person.contact_frequency_days, today);

        let updated = person.clone();
        self.save_all(&people)?;

        Ok(updated)
    }

    /// Overwrite the undo slot with a snapshot of `person` taken before
    /// a destructive action.
    pub fn record_undo(&mut self, kind: UndoKind, person: Person) -> Result<()> {
        let action = UndoAction {
            kind,
            snapshot: person,
        };
        let doc = serde_json::to_string(&Some(action))?;
        self.backend.set(UNDO_KEY, &doc)
    }

    /// Peek at the undo slot. A missing or malformed slot reads as empty.
    pub fn undo_slot(&self) -> Option<UndoAction> {
        match self.backend.get(UNDO_KEY) {
            Ok(Some(doc)) => serde_json::from_str(&doc).unwrap_or(None),
            Ok(None) | Err(_) => None,
        }
    }

    /// Revert the most recent destructive action.
    ///
    /// Update-kind snapshots are restored by overwriting the matching
    /// id; delete-kind snapshots are re-inserted into the collection.
    /// The slot is cleared on success regardless of kind.
    pub fn undo(&mut self) -> Result<Person> {
        let action = self.undo_slot().ok_or(Error::NoActionToUndo)?;

        let restored = match action.kind {
            UndoKind::Update => self.replace(action.snapshot)?,
            UndoKind::Delete => {
                let mut people = self.load_all();
                people.push(action.snapshot.clone());
                self.save_all(&people)?;
                action.snapshot
            }
        };

        self.clear_undo()?;
        Ok(restored)
    }

    fn clear_undo(&mut self) -> Result<()> {
        self.backend.set(UNDO_KEY, "null")
    }
}

/// Resolve the default data directory: `TT_DATA_DIR` env var if set,
/// otherwise `<platform data dir>/tether`.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TT_DATA_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Other("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("tether"))
}

/// Generate a unique person ID.
///
/// Format: `tt-<4 hex chars>`, hashed from the seed plus the current
/// time. Callers must check collisions against the collection.
pub fn generate_id(seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(0)
            .to_le_bytes(),
    );
    let hash = hasher.finalize();
    let hash_hex = format!("{:x}", hash);
    format!("tt-{}", &hash_hex[..4])
}
