//! Sorting, filtering, and searching over the person collection.
//!
//! All functions here are pure: they take the collection and an
//! explicit `today` and return a new ordering or subset. Callers
//! compose them as filter, then search, then sort.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Person;
use crate::status::{classify, days_since};
use crate::{Error, Result};

/// Elapsed-time view filters over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    /// Only people whose contact is overdue
    Overdue,
    /// Contacted within the last 7 days (overdue included when inside
    /// the window)
    Week,
    /// Contacted within the last 30 days
    Month,
}

impl ViewFilter {
    /// Parse a filter from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "overdue" | "due" => Some(Self::Overdue),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    /// Parse a filter, erroring on unknown names.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unknown filter '{}' (expected all, overdue, week, or month)",
                s
            ))
        })
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Overdue => "overdue",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order people by urgency: overdue first (most overdue leading), then
/// everyone else by longest idle time. Stable among ties.
pub fn sort_by_urgency(mut people: Vec<Person>, today: NaiveDate) -> Vec<Person> {
    people.sort_by(|a, b| {
        let sa = classify(a.last_contact_date, a.contact_frequency_days, today);
        let sb = classify(b.last_contact_date, b.contact_frequency_days, today);

        match (sa.is_overdue, sb.is_overdue) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => sb.days_overdue.cmp(&sa.days_overdue),
            (false, false) => sb.days_since_last_contact.cmp(&sa.days_since_last_contact),
        }
    });
    people
}

/// Keep only the people matching the filter.
pub fn filter(people: Vec<Person>, criterion: ViewFilter, today: NaiveDate) -> Vec<Person> {
    match criterion {
        ViewFilter::All => people,
        ViewFilter::Overdue => people
            .into_iter()
            .filter(|p| classify(p.last_contact_date, p.contact_frequency_days, today).is_overdue)
            .collect(),
        ViewFilter::Week => people
            .into_iter()
            .filter(|p| days_since(p.last_contact_date, today) <= 7)
            .collect(),
        ViewFilter::Month => people
            .into_iter()
            .filter(|p| days_since(p.last_contact_date, today) <= 30)
            .collect(),
    }
}

/// Case-insensitive substring search over name, notes, and category.
/// An empty or whitespace-only query passes everything through.
pub fn search(people: Vec<Person>, query: &str) -> Vec<Person> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return people;
    }

    people
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.notes.to_lowercase().contains(&needle)
                || p.category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Summary counts over the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub total: usize,
    pub overdue: usize,
    pub contacted_this_week: usize,
    pub on_time: usize,
}

/// Compute summary counts for the collection.
pub fn quick_stats(people: &[Person], today: NaiveDate) -> QuickStats {
    let mut overdue = 0;
    let mut contacted_this_week = 0;

    for p in people {
        if classify(p.last_contact_date, p.contact_frequency_days, today).is_overdue {
            overdue += 1;
        }
        if days_since(p.last_contact_date, today) <= 7 {
            contacted_this_week += 1;
        }
    }

    QuickStats {
        total: people.len(),
        overdue,
        contacted_this_week,
        on_time: people.len() - overdue,
    }
}

/// All distinct category labels in use, sorted.
pub fn all_categories(people: &[Person]) -> Vec<String> {
    let set: BTreeSet<String> = people.iter().filter_map(|p| p.category.clone()).collect();
    set.into_iter().collect()
}
