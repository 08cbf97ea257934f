//! Card presentation rules for a [`ScriptSummary`].

use crate::core::state::ScriptSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    pub image_host: String,
    pub fallback_image: String,
}

/// What one grid card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub number: usize,
    pub identifier: String,
    pub title: String,
    pub views: String,
    pub game: String,
    pub image_url: String,
}

impl CardView {
    pub fn new(number: usize, summary: &ScriptSummary, style: &CardStyle) -> Self {
        Self {
            number,
            identifier: summary.identifier.clone(),
            title: summary.title.clone(),
            views: format_views(summary.views()),
            game: summary.game_name().to_string(),
            image_url: image_url(summary, style),
        }
    }
}

/// Number the cards from 1 in display order.
pub fn card_views(cards: &[ScriptSummary], style: &CardStyle) -> Vec<CardView> {
    cards
        .iter()
        .enumerate()
        .map(|(i, summary)| CardView::new(i + 1, summary, style))
        .collect()
}

/// Thousands-separated view count, e.g. `1,500`.
pub fn format_views(views: u64) -> String {
    let mut buffer = itoa::Buffer::new();
    let digits = buffer.format(views);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Absolute image URL for the script's game, or the fallback image.
///
/// `"0"` is what the API sends for "no image".
pub fn image_url(summary: &ScriptSummary, style: &CardStyle) -> String {
    let reference = summary
        .game
        .as_ref()
        .and_then(|game| game.image_reference.as_deref())
        .filter(|reference| !reference.is_empty() && *reference != "0");

    match reference {
        Some(reference) if reference.starts_with("http") => reference.to_string(),
        Some(reference) if reference.starts_with('/') => {
            format!("{}{}", style.image_host, reference)
        }
        Some(reference) => format!("{}/{}", style.image_host, reference),
        None => style.fallback_image.clone(),
    }
}
