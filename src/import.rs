//! Address-book import reconciliation.
//!
//! Compares external candidate records against the tracked collection
//! to keep imports from creating duplicates. Matching is fuzzy only in
//! normalization; the rules themselves are exact.

use serde::{Deserialize, Serialize};

use crate::models::Person;

/// A raw candidate record from an external address-book source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCandidate {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn normalize_email(email: Option<&str>) -> String {
    email.map(|e| e.trim().to_lowercase()).unwrap_or_default()
}

/// Strip everything except alphanumerics, then lowercase. "555-1234"
/// and "(555) 1234" normalize to the same value.
fn normalize_phone(phone: Option<&str>) -> String {
    phone
        .map(|p| {
            p.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .unwrap_or_default()
}

/// True when the candidate matches some tracked person.
///
/// A normalized exact name match is required. Given that, the phone
/// channel decides when both sides have one; otherwise the email
/// channel decides when both sides have one; otherwise the match holds
/// only when neither side carries a phone or an email.
pub fn is_duplicate(candidate: &ContactCandidate, existing: &[Person]) -> bool {
    let name = normalize_name(&candidate.name);
    let phone = normalize_phone(candidate.phone.as_deref());
    let email = normalize_email(candidate.email.as_deref());

    existing.iter().any(|person| {
        if normalize_name(&person.name) != name {
            return false;
        }

        let person_phone = normalize_phone(person.phone.as_deref());
        let person_email = normalize_email(person.email.as_deref());

        if !phone.is_empty() && !person_phone.is_empty() {
            return phone == person_phone;
        }

        if !email.is_empty() && !person_email.is_empty() {
            return email == person_email;
        }

        phone.is_empty() && email.is_empty() && person_phone.is_empty() && person_email.is_empty()
    })
}

/// A batch of candidates split into new entries and duplicates.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPlan {
    pub new: Vec<ContactCandidate>,
    pub duplicates: Vec<ContactCandidate>,
}

/// Classify every candidate against the existing collection.
///
/// Candidates earlier in the batch don't shadow later ones; each is
/// compared against the stored collection only, matching the original
/// import flow.
pub fn plan_import(candidates: Vec<ContactCandidate>, existing: &[Person]) -> ImportPlan {
    let mut plan = ImportPlan {
        new: Vec::new(),
        duplicates: Vec::new(),
    };

    for candidate in candidates {
        if is_duplicate(&candidate, existing) {
            plan.duplicates.push(candidate);
        } else {
            plan.new.push(candidate);
        }
    }

    plan
}
