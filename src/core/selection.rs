//! Resolving `show`/`copy` arguments to a script.
//!
//! A target is either a card number from the last listing (`3`) or a script
//! slug (`infinite-yield-abc123`). Card numbers are validated against the
//! saved grid; slugs are used as-is so scripts can be opened without listing
//! them first. A slug made only of digits needs the `slug:` prefix
//! (`slug:12345`), otherwise it reads as a card number.

use crate::core::card::{image_url, CardStyle};
use crate::core::error::{Result, ScriptHubError};
use crate::core::state::{GridSnapshot, ScriptSummary};

pub const SLUG_PREFIX: &str = "slug:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Card(usize),
    Identifier(String),
}

impl Target {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ScriptHubError::NoTarget);
        }

        if let Some(slug) = input.strip_prefix(SLUG_PREFIX) {
            let slug = slug.trim();
            if slug.is_empty() {
                return Err(ScriptHubError::NoTarget);
            }
            return Ok(Target::Identifier(slug.to_string()));
        }

        match input.parse::<usize>() {
            Ok(0) => Err(ScriptHubError::ZeroCard),
            Ok(number) => Ok(Target::Card(number)),
            Err(_) => Ok(Target::Identifier(input.to_string())),
        }
    }
}

/// Everything the detail view needs before the body is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub identifier: String,
    pub title: String,
    pub image_url: String,
}

impl Selection {
    fn from_summary(summary: &ScriptSummary, style: &CardStyle) -> Self {
        Self {
            identifier: summary.identifier.clone(),
            title: summary.title.clone(),
            image_url: image_url(summary, style),
        }
    }
}

pub fn resolve(target: &Target, grid: Option<&GridSnapshot>, style: &CardStyle) -> Result<Selection> {
    match target {
        Target::Card(number) => {
            let grid = grid.ok_or(ScriptHubError::NoGridState)?;
            if grid.cards.is_empty() {
                return Err(ScriptHubError::NoGridState);
            }
            let summary = grid
                .cards
                .get(number - 1)
                .ok_or_else(|| ScriptHubError::card_out_of_range(*number, grid.cards.len()))?;
            Ok(Selection::from_summary(summary, style))
        }
        Target::Identifier(identifier) => {
            let known = grid.and_then(|grid| {
                grid.cards
                    .iter()
                    .find(|summary| &summary.identifier == identifier)
            });
            Ok(match known {
                Some(summary) => Selection::from_summary(summary, style),
                None => Selection {
                    identifier: identifier.clone(),
                    title: identifier.clone(),
                    image_url: style.fallback_image.clone(),
                },
            })
        }
    }
}
