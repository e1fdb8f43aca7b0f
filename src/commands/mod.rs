//! Command implementations for the Tether CLI.
//!
//! Each command takes the store and an explicit `today`, does the work
//! through the engine modules, and returns a result struct that can be
//! rendered as JSON or human-readable text.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::bulk::{self, BulkReport};
use crate::import::{self, ContactCandidate};
use crate::models::{PersonInput, PersonPatch, UndoKind};
use crate::status::{with_status, PersonWithStatus};
use crate::storage::Store;
use crate::view::{self, QuickStats, ViewFilter};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for
/// humans.
pub trait CommandResult {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn describe_person(p: &PersonWithStatus) -> String {
    let due = if p.is_overdue {
        format!("overdue by {} days", p.days_overdue)
    } else {
        format!("contacted {} days ago", p.days_since_last_contact)
    };

    let mut line = format!(
        "{} {} ({}) - every {} days, {}",
        p.card_emoji, p.person.name, p.person.id, p.person.contact_frequency_days, due
    );
    if p.person.streak > 1 {
        line.push_str(&format!(", streak {}", p.person.streak));
    }
    if let Some(category) = &p.person.category {
        line.push_str(&format!(" [{}]", category));
    }
    line
}

/// Result wrapping a single person with computed status.
#[derive(Debug, Serialize)]
pub struct PersonResult(pub PersonWithStatus);

impl CommandResult for PersonResult {
    fn to_json(&self) -> String {
        json(&self.0)
    }

    fn to_human(&self) -> String {
        let p = &self.0;
        let mut out = describe_person(p);
        if !p.person.notes.is_empty() {
            out.push_str(&format!("\n  notes: {}", p.person.notes));
        }
        out.push_str(&format!(
            "\n  tracked since {}, {} interactions, level {}",
            p.person.created_at, p.person.interaction_count, p.interaction_level
        ));
        out
    }
}

/// Result of a list query.
#[derive(Debug, Serialize)]
pub struct ListResult {
    pub count: usize,
    pub people: Vec<PersonWithStatus>,
}

impl CommandResult for ListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.people.is_empty() {
            return "No people to show.".to_string();
        }
        self.people
            .iter()
            .map(describe_person)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub id: String,
    pub deleted: bool,
}

impl CommandResult for DeleteResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.deleted {
            format!("Deleted {} (undo with `tt undo`)", self.id)
        } else {
            format!("Nothing tracked under {}", self.id)
        }
    }
}

impl CommandResult for BulkReport {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!(
            "Marked {} of {} contacted",
            self.succeeded, self.attempted
        );
        for item in self.items.iter().filter(|i| !i.ok) {
            out.push_str(&format!(
                "\n  failed: {} ({}): {}",
                item.name,
                item.id,
                item.error.as_deref().unwrap_or("unknown error")
            ));
        }
        out
    }
}

/// Result of the stats command.
#[derive(Debug, Serialize)]
pub struct StatsResult(pub QuickStats);

impl CommandResult for StatsResult {
    fn to_json(&self) -> String {
        json(&self.0)
    }

    fn to_human(&self) -> String {
        format!(
            "{} people tracked: {} overdue, {} on time, {} contacted this week",
            self.0.total, self.0.overdue, self.0.on_time, self.0.contacted_this_week
        )
    }
}

/// Result of the categories command.
#[derive(Debug, Serialize)]
pub struct CategoriesResult {
    pub categories: Vec<String>,
}

impl CommandResult for CategoriesResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.categories.is_empty() {
            "No categories in use.".to_string()
        } else {
            self.categories.join("\n")
        }
    }
}

/// Result of an import run.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub dry_run: bool,
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub added: Vec<ImportedPerson>,
    pub duplicates: Vec<String>,
}

/// Identity of a person created during import.
#[derive(Debug, Serialize)]
pub struct ImportedPerson {
    pub id: String,
    pub name: String,
}

impl CommandResult for ImportResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let verb = if self.dry_run { "Would import" } else { "Imported" };
        let mut out = format!(
            "{} {} people, skipped {} duplicates",
            verb, self.imported, self.skipped_duplicates
        );
        for dup in &self.duplicates {
            out.push_str(&format!("\n  duplicate: {}", dup));
        }
        out
    }
}

/// Start tracking a person.
pub fn add(store: &mut Store, input: PersonInput, today: NaiveDate) -> Result<PersonResult> {
    let person = store.add(input, today)?;
    Ok(PersonResult(with_status(person, today)))
}

/// List people: filter, then search, then sort by urgency.
pub fn list(
    store: &Store,
    filter: ViewFilter,
    search: Option<&str>,
    category: Option<&str>,
    today: NaiveDate,
) -> Result<ListResult> {
    let mut people = view::filter(store.load_all(), filter, today);

    if let Some(category) = category {
        people.retain(|p| {
            p.category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
        });
    }
    if let Some(query) = search {
        people = view::search(people, query);
    }

    let people: Vec<_> = view::sort_by_urgency(people, today)
        .into_iter()
        .map(|p| with_status(p, today))
        .collect();

    Ok(ListResult {
        count: people.len(),
        people,
    })
}

/// Show one person by id.
pub fn show(store: &Store, id: &str, today: NaiveDate) -> Result<PersonResult> {
    let person = store.get(id)?;
    Ok(PersonResult(with_status(person, today)))
}

/// Patch a person's fields.
pub fn update(
    store: &mut Store,
    id: &str,
    patch: &PersonPatch,
    today: NaiveDate,
) -> Result<PersonResult> {
    let person = store.update(id, patch)?;
    Ok(PersonResult(with_status(person, today)))
}

/// Stop tracking a person, leaving a delete snapshot in the undo slot.
pub fn delete(store: &mut Store, id: &str) -> Result<DeleteResult> {
    match store.get(id) {
        Ok(person) => {
            store.record_undo(UndoKind::Delete, person)?;
            store.delete(id)?;
            Ok(DeleteResult {
                id: id.to_string(),
                deleted: true,
            })
        }
        Err(Error::NotFound(_)) => Ok(DeleteResult {
            id: id.to_string(),
            deleted: false,
        }),
        Err(e) => Err(e),
    }
}

/// Record a contact today, leaving an update snapshot in the undo slot.
pub fn contacted(store: &mut Store, id: &str, today: NaiveDate) -> Result<PersonResult> {
    let before = store.get(id)?;
    store.record_undo(UndoKind::Update, before)?;

    let person = store.mark_contacted(id, today)?;
    Ok(PersonResult(with_status(person, today)))
}

/// Mark everyone as contacted today.
pub fn contacted_all(store: &mut Store, today: NaiveDate) -> Result<BulkReport> {
    bulk::mark_all_contacted(store, today)
}

/// Mark a category as contacted today.
pub fn contacted_category(store: &mut Store, category: &str, today: NaiveDate) -> Result<BulkReport> {
    bulk::mark_category_contacted(store, category, today)
}

/// Revert the most recent destructive action.
pub fn undo(store: &mut Store, today: NaiveDate) -> Result<PersonResult> {
    let person = store.undo()?;
    Ok(PersonResult(with_status(person, today)))
}

/// Summary counts over the collection.
pub fn stats(store: &Store, today: NaiveDate) -> Result<StatsResult> {
    Ok(StatsResult(view::quick_stats(&store.load_all(), today)))
}

/// Distinct category labels in use.
pub fn categories(store: &Store) -> Result<CategoriesResult> {
    Ok(CategoriesResult {
        categories: view::all_categories(&store.load_all()),
    })
}

/// Import address-book candidates from a JSON file.
pub fn import(
    store: &mut Store,
    file: &Path,
    dry_run: bool,
    frequency: u32,
    today: NaiveDate,
) -> Result<ImportResult> {
    let raw = std::fs::read_to_string(file)?;
    let candidates: Vec<ContactCandidate> = serde_json::from_str(&raw)?;

    let existing = store.load_all();
    let plan = import::plan_import(candidates, &existing);

    let mut added = Vec::new();
    if !dry_run {
        for candidate in &plan.new {
            let input = PersonInput {
                name: candidate.name.clone(),
                notes: String::new(),
                contact_frequency_days: frequency,
                category: None,
                phone: candidate.phone.clone(),
                email: candidate.email.clone(),
            };
            let person = store.add(input, today)?;
            added.push(ImportedPerson {
                id: person.id,
                name: person.name,
            });
        }
    }

    Ok(ImportResult {
        dry_run,
        imported: if dry_run { plan.new.len() } else { added.len() },
        skipped_duplicates: plan.duplicates.len(),
        added,
        duplicates: plan.duplicates.into_iter().map(|c| c.name).collect(),
    })
}
