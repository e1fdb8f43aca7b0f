//! Bulk mark-contacted operations.
//!
//! Both operations run strictly sequentially and collect an explicit
//! per-person outcome, so callers can tell total success from partial.
//! Only one representative snapshot lands in the undo slot before the
//! batch starts, so undo recovers a single person's prior state, not
//! the whole batch.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::UndoKind;
use crate::storage::Store;
use crate::{Error, Result};

/// Outcome of one person within a bulk operation.
#[derive(Debug, Clone, Serialize)]
pub struct BulkItem {
    pub id: String,
    pub name: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for a whole bulk operation.
#[derive(Debug, Clone, Serialize)]
pub struct BulkReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<BulkItem>,
}

/// Mark every tracked person as contacted today.
///
/// An empty collection yields an empty report rather than an error.
pub fn mark_all_contacted(store: &mut Store, today: NaiveDate) -> Result<BulkReport> {
    let people = store.load_all();
    run_batch(store, people, today)
}

/// Mark everyone in a category as contacted today.
///
/// Fails with [`Error::EmptyCategory`] when no person carries the
/// category label.
pub fn mark_category_contacted(
    store: &mut Store,
    category: &str,
    today: NaiveDate,
) -> Result<BulkReport> {
    let people: Vec<_> = store
        .load_all()
        .into_iter()
        .filter(|p| p.category.as_deref() == Some(category))
        .collect();

    if people.is_empty() {
        return Err(Error::EmptyCategory(category.to_string()));
    }

    run_batch(store, people, today)
}

fn run_batch(
    store: &mut Store,
    people: Vec<crate::models::Person>,
    today: NaiveDate,
) -> Result<BulkReport> {
    // One representative snapshot before any mutation. Undo restores
    // only this person.
    if let Some(first) = people.first() {
        store.record_undo(UndoKind::Update, first.clone())?;
    }

    let mut items = Vec::with_capacity(people.len());
    let mut succeeded = 0;

    for person in &people {
        match store.mark_contacted(&person.id, today) {
            Ok(_) => {
                succeeded += 1;
                items.push(BulkItem {
                    id: person.id.clone(),
                    name: person.name.clone(),
                    ok: true,
                    error: None,
                });
            }
            Err(e) => {
                items.push(BulkItem {
                    id: person.id.clone(),
                    name: person.name.clone(),
                    ok: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(BulkReport {
        attempted: people.len(),
        succeeded,
        failed: people.len() - succeeded,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonInput;
    use crate::test_utils::memory_store;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(name: &str, category: Option<&str>) -> PersonInput {
        PersonInput {
            name: name.to_string(),
            notes: String::new(),
            contact_frequency_days: 7,
            category: category.map(String::from),
            phone: None,
            email: None,
        }
    }

    #[test]
    fn test_mark_all_contacted() {
        let mut store = memory_store();
        let today = date(2026, 8, 24);
        store.add(input("Alice", None), today).unwrap();
        store.add(input("Bob", None), today).unwrap();

        let report = mark_all_contacted(&mut store, today).unwrap();
        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 0);

        for person in store.load_all() {
            assert_eq!(person.interaction_count, 1);
        }
    }

    #[test]
    fn test_mark_all_contacted_empty_collection() {
        let mut store = memory_store();
        let report = mark_all_contacted(&mut store, date(2026, 8, 24)).unwrap();
        assert_eq!(report.attempted, 0);
        assert!(report.items.is_empty());
    }

    #[test]
    fn test_mark_all_records_first_person_snapshot() {
        let mut store = memory_store();
        let today = date(2026, 8, 24);
        let alice = store.add(input("Alice", None), today).unwrap();
        store.add(input("Bob", None), today).unwrap();

        mark_all_contacted(&mut store, today).unwrap();

        let slot = store.undo_slot().unwrap();
        assert_eq!(slot.snapshot.id, alice.id);
        assert_eq!(slot.snapshot.interaction_count, 0);
    }

    #[test]
    fn test_mark_category_scoped() {
        let mut store = memory_store();
        let today = date(2026, 8, 24);
        store.add(input("Alice", Some("Work")), today).unwrap();
        let bob = store.add(input("Bob", Some("Family")), today).unwrap();

        let report = mark_category_contacted(&mut store, "Work", today).unwrap();
        assert_eq!(report.attempted, 1);
        assert_eq!(report.succeeded, 1);

        // Bob is untouched.
        assert_eq!(store.get(&bob.id).unwrap().interaction_count, 0);
    }

    #[test]
    fn test_mark_category_empty_is_error() {
        let mut store = memory_store();
        let today = date(2026, 8, 24);
        store.add(input("Alice", Some("Work")), today).unwrap();

        let err = mark_category_contacted(&mut store, "Mentors", today).unwrap_err();
        assert!(matches!(err, Error::EmptyCategory(_)));
    }
}
