use std::{collections::HashSet, fmt};

use indexmap::IndexSet;
use serde::Serialize;

use crate::{Instance, Tour};

const MAX_CITED_IDS: usize = 10;
const VALID_MESSAGE: &str = "valid Hamiltonian cycle";

/// Why a tour was rejected. Checks run in declaration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    CountMismatch,
    DuplicateCities,
    UnknownCities,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::CountMismatch => "count mismatch",
            Self::DuplicateCities => "duplicate cities",
            Self::UnknownCities => "unknown cities",
        };
        write!(f, "{value}")
    }
}

/// Verdict of a validation run plus the human-readable reason.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationResult {
    rejection: Option<Rejection>,
    message: String,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            rejection: None,
            message: VALID_MESSAGE.to_string(),
        }
    }

    fn rejected(rejection: Rejection, message: String) -> Self {
        Self {
            rejection: Some(rejection),
            message,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Checks that `tour` visits every city of `instance` exactly once.
///
/// 1. step count equals city count (an empty instance never validates),
/// 2. no id repeats,
/// 3. every id exists in the instance.
///
/// The first failing check decides the reason.
pub fn validate(tour: &Tour, instance: &Instance) -> ValidationResult {
    let steps = tour.len();
    let cities = instance.len();

    if steps != cities {
        return ValidationResult::rejected(
            Rejection::CountMismatch,
            format!("tour has {steps} steps but instance has {cities} cities"),
        );
    }
    if cities == 0 {
        return ValidationResult::rejected(
            Rejection::CountMismatch,
            "instance has no cities to tour".to_string(),
        );
    }

    let mut seen = HashSet::with_capacity(steps);
    let mut repeated = IndexSet::new();
    for id in tour.ids() {
        if !seen.insert(id.as_str()) {
            repeated.insert(id.as_str());
        }
    }
    if seen.len() != steps {
        return ValidationResult::rejected(
            Rejection::DuplicateCities,
            format!(
                "duplicate or missing cities: {} distinct of {steps} steps, repeated {}",
                seen.len(),
                cite(&repeated.into_iter().collect::<Vec<_>>())
            ),
        );
    }

    let unknown: Vec<&str> = tour
        .ids()
        .iter()
        .map(String::as_str)
        .filter(|id| !instance.contains(id))
        .collect();
    if !unknown.is_empty() {
        return ValidationResult::rejected(
            Rejection::UnknownCities,
            format!("unknown cities: {}", cite(&unknown)),
        );
    }

    ValidationResult::accepted()
}

fn cite(ids: &[&str]) -> String {
    let shown = ids
        .iter()
        .take(MAX_CITED_IDS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    match ids.len().saturating_sub(MAX_CITED_IDS) {
        0 => shown,
        more => format!("{shown} (+{more} more)"),
    }
}
