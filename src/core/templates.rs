//! Template system for consistent grid and detail output.
//!
//! Templates are plain strings with `{placeholder}` slots. Rendering is a
//! single pass: each placeholder is replaced by its value from the
//! [`TemplateContext`], colored according to what it is (titles bold, numbers
//! muted, games yellow). Literal text is left uncolored.
//!
//! # Public API
//! - [`Templates`]: Template definitions for all output sections
//! - [`TemplateContext`]: Context data for template rendering
//! - [`TEMPLATES`]: Global template instance
//! - [`render_template`]: Rendering with colors
//! - [`render_template_plain`]: Plain text rendering for testing
//! - [`strip_ansi_codes`]: Utility for removing color codes
//! - [`render_grid`] / [`render_detail`]: Whole-view renderers

use crate::core::card::{card_views, CardStyle, CardView};
use crate::core::detail::DetailView;
use crate::core::grid::GridController;
use colored::*;
use std::fmt::Write;

/// Template definitions for all output formatting
pub struct Templates {
    pub header_listing: &'static str,
    pub header_search: &'static str,
    pub card_title: &'static str,
    pub card_meta: &'static str,
    pub card_slug: &'static str,
    pub grid_message: &'static str,
    pub pagination: &'static str,
    pub detail_title: &'static str,
    pub detail_meta: &'static str,
}

/// Global templates instance
pub static TEMPLATES: Templates = Templates {
    header_listing: "Scripts: {filter} (page {page})",
    header_search: "Search: \"{search}\" (page {page})",
    card_title: "[{n}] {title}",
    card_meta: "     {views} views · {game}",
    card_slug: "     {slug}",
    grid_message: "   {message}",
    pagination: "➤ More scripts available: script-hub more",
    detail_title: "{title}",
    detail_meta: "{slug} · {image}",
};

/// Context for template rendering
#[derive(Debug, Default)]
pub struct TemplateContext<'a> {
    pub filter: Option<&'a str>,
    pub search: Option<&'a str>,
    pub page: Option<u32>,
    pub n: Option<usize>,
    pub title: Option<&'a str>,
    pub views: Option<&'a str>,
    pub game: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub image: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl<'a> TemplateContext<'a> {
    pub fn for_card(card: &'a CardView) -> Self {
        Self {
            n: Some(card.number),
            title: Some(&card.title),
            views: Some(&card.views),
            game: Some(&card.game),
            slug: Some(&card.identifier),
            image: Some(&card.image_url),
            ..Default::default()
        }
    }
}

/// Render a template with context and apply colors
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let mut output = String::with_capacity(template.len() + 64);
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            output.push(ch);
            continue;
        }

        let mut placeholder = String::new();
        let mut found_closing = false;
        for next_ch in chars.by_ref() {
            if next_ch == '}' {
                found_closing = true;
                break;
            }
            placeholder.push(next_ch);
        }

        if !found_closing {
            // No closing brace found, treat as literal
            output.push(ch);
            output.push_str(&placeholder);
            continue;
        }

        if !push_placeholder(&mut output, &placeholder, context) {
            // Unknown or empty placeholder, keep as-is
            output.push('{');
            output.push_str(&placeholder);
            output.push('}');
        }
    }

    output
}

fn push_placeholder(output: &mut String, name: &str, context: &TemplateContext) -> bool {
    let rendered = match name {
        "filter" => context.filter.map(|v| v.blue().to_string()),
        "search" => context.search.map(|v| v.blue().to_string()),
        "page" => context.page.map(|v| v.to_string().white().to_string()),
        "n" => context.n.map(|v| v.to_string().bright_black().to_string()),
        "title" => context.title.map(|v| v.white().bold().to_string()),
        "views" => context.views.map(|v| v.cyan().to_string()),
        "game" => context.game.map(|v| v.yellow().to_string()),
        "slug" => context.slug.map(|v| v.bright_black().to_string()),
        "image" => context.image.map(|v| v.bright_black().to_string()),
        "message" => context.message.map(|v| v.white().to_string()),
        _ => return false,
    };

    if let Some(value) = rendered {
        output.push_str(&value);
    }
    true
}

/// Strip ANSI color codes for testing
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Render template without colors for testing
pub fn render_template_plain(template: &str, context: &TemplateContext) -> String {
    strip_ansi_codes(&render_template(template, context))
}

/// Header, cards (or the inline status message) and the pagination hint.
pub fn render_grid(grid: &GridController, style: &CardStyle) -> String {
    let mut out = String::new();
    let query = grid.query();

    let header = if query.has_search() {
        render_template(
            TEMPLATES.header_search,
            &TemplateContext {
                search: Some(&query.search_text),
                page: Some(query.page),
                ..Default::default()
            },
        )
    } else {
        render_template(
            TEMPLATES.header_listing,
            &TemplateContext {
                filter: Some(query.filter.as_str()),
                page: Some(query.page),
                ..Default::default()
            },
        )
    };
    let _ = writeln!(out, "\n{header}\n");

    if let Some(message) = grid.status().message() {
        let context = TemplateContext {
            message: Some(message),
            ..Default::default()
        };
        let _ = writeln!(out, "{}", render_template(TEMPLATES.grid_message, &context));
    }

    for card in card_views(grid.cards(), style) {
        let context = TemplateContext::for_card(&card);
        let _ = writeln!(out, "{}", render_template(TEMPLATES.card_title, &context));
        let _ = writeln!(out, "{}", render_template(TEMPLATES.card_meta, &context));
        let _ = writeln!(out, "{}", render_template(TEMPLATES.card_slug, &context));
    }

    if grid.pagination_visible() {
        let _ = writeln!(out, "\n{}", TEMPLATES.pagination.blue());
    }

    out
}

pub fn render_detail(view: &DetailView) -> String {
    let context = TemplateContext {
        title: Some(&view.title),
        slug: Some(&view.identifier),
        image: Some(&view.image_url),
        ..Default::default()
    };

    let mut out = String::new();
    let _ = writeln!(out, "\n{}", render_template(TEMPLATES.detail_title, &context));
    let _ = writeln!(out, "{}\n", render_template(TEMPLATES.detail_meta, &context));
    let _ = writeln!(out, "{}", view.body.display_text());
    out
}
