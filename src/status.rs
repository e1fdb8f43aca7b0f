//! Contact status classification.
//!
//! Pure functions deriving overdue facts and interaction level from raw
//! dates and counts. `today` is always an explicit input so callers can
//! inject a clock.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Person;

/// Derived overdue facts for a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactStatus {
    /// Whole days elapsed since the last contact, clamped to 0
    pub days_since_last_contact: u32,
    /// True when the elapsed days meet or exceed the cadence
    pub is_overdue: bool,
    /// Days past the cadence, 0 when not overdue
    pub days_overdue: u32,
}

/// Whole days elapsed from `date` to `today`, never negative.
///
/// Both sides are date-only values, so partial days never count and a
/// future `date` clamps to 0.
pub fn days_since(date: NaiveDate, today: NaiveDate) -> u32 {
    (today - date).num_days().max(0) as u32
}

/// Classify a person's contact status at day granularity.
///
/// The boundary is overdue: `days_since == frequency_days` reports
/// `is_overdue` with `days_overdue == 0`.
pub fn classify(last_contact: NaiveDate, frequency_days: u32, today: NaiveDate) -> ContactStatus {
    let days_since_last_contact = days_since(last_contact, today);
    let is_overdue = days_since_last_contact >= frequency_days;
    let days_overdue = if is_overdue {
        days_since_last_contact - frequency_days
    } else {
        0
    };

    ContactStatus {
        days_since_last_contact,
        is_overdue,
        days_overdue,
    }
}

/// Interaction level (1-5) derived from cumulative contact count.
pub fn interaction_level(count: u32) -> u8 {
    match count {
        20.. => 5,
        12.. => 4,
        6.. => 3,
        2.. => 2,
        _ => 1,
    }
}

/// Card color for an interaction level. Out-of-range levels fall back
/// to level 1.
pub fn card_color(level: u8) -> &'static str {
    match level {
        5 => "#f2c14e", // Saffron
        4 => "#e9b872", // Sand
        3 => "#9cd1c8", // Seafoam
        2 => "#c8dfaf", // Sage
        _ => "#f3b399", // Apricot
    }
}

/// Emoji indicator for an interaction level. Out-of-range levels fall
/// back to level 1.
pub fn level_emoji(level: u8) -> &'static str {
    match level {
        5 => "\u{1f4ab}", // 💫
        4 => "\u{1f33a}", // 🌺
        3 => "\u{1f338}", // 🌸
        2 => "\u{1f33f}", // 🌿
        _ => "\u{1f331}", // 🌱
    }
}

/// A person enriched with computed status. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PersonWithStatus {
    #[serde(flatten)]
    pub person: Person,
    pub days_since_last_contact: u32,
    pub is_overdue: bool,
    pub days_overdue: u32,
    pub interaction_level: u8,
    pub card_color: &'static str,
    pub card_emoji: &'static str,
}

/// Enrich a person with computed contact status.
pub fn with_status(person: Person, today: NaiveDate) -> PersonWithStatus {
    let status = classify(person.last_contact_date, person.contact_frequency_days, today);
    let level = interaction_level(person.interaction_count);

    PersonWithStatus {
        days_since_last_contact: status.days_since_last_contact,
        is_overdue: status.is_overdue,
        days_overdue: status.days_overdue,
        interaction_level: level,
        card_color: card_color(level),
        card_emoji: level_emoji(level),
        person,
    }
}
