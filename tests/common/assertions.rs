//! Common assertion helpers for CLI output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// The inline message shown when a listing cannot be fetched
pub fn load_failed() -> impl Predicate<str> {
    predicates::str::contains("Failed to load scripts. (CORS or API Error)")
}

pub fn needs_listing() -> impl Predicate<str> {
    predicates::str::contains("No scripts listed yet")
}

pub fn has_card(number: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("[{number}]"))
}

pub fn has_error() -> impl Predicate<str> {
    predicates::str::contains("✕ Error:")
}
