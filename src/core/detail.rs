//! Detail modal: one script's body, resolved on demand, plus copy.
//!
//! Opening a card shows the cached body right away. On a miss the modal shows
//! a placeholder, fetches the single script through the relay chain, caches
//! it, and swaps in the body or an inline error.
//!
//! Copy never trusts what the modal currently shows (it may still be
//! fetching); it resolves the body again through the same cache-then-fetch
//! path before writing it to the clipboard.

use crate::core::catalog::Catalog;
use crate::core::error::{Result, ScriptHubError};

pub const FETCHING_PLACEHOLDER: &str = "-- Fetching script...";
pub const MISSING_BODY_MESSAGE: &str = "-- Error fetching script";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyState {
    Fetching,
    Ready(String),
    /// The API answered without a body
    Missing,
    Failed(String),
}

impl BodyState {
    pub fn display_text(&self) -> String {
        match self {
            BodyState::Fetching => FETCHING_PLACEHOLDER.to_string(),
            BodyState::Ready(body) => body.clone(),
            BodyState::Missing => MISSING_BODY_MESSAGE.to_string(),
            BodyState::Failed(message) => format!("-- Error: {message}"),
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            BodyState::Ready(body) => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub identifier: String,
    pub title: String,
    pub image_url: String,
    pub body: BodyState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Resolved, but the API had no body to copy
    Failed,
    /// Transport or clipboard failure
    Error,
}

impl CopyOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CopyOutcome::Copied => "Copied!",
            CopyOutcome::Failed => "Failed",
            CopyOutcome::Error => "Error",
        }
    }
}

/// Where copied script bodies go.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| ScriptHubError::clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ScriptHubError::clipboard(e.to_string()))
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DetailModal {
    current: Option<DetailView>,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&DetailView> {
        self.current.as_ref()
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn open(
        &mut self,
        catalog: &mut Catalog,
        identifier: &str,
        title: &str,
        image_url: &str,
    ) -> &DetailView {
        self.open_with(catalog, identifier, title, image_url, |_| {})
    }

    /// Open the modal, calling `on_change` for the placeholder (on a cache
    /// miss) and again for the final content.
    pub fn open_with<F>(
        &mut self,
        catalog: &mut Catalog,
        identifier: &str,
        title: &str,
        image_url: &str,
        mut on_change: F,
    ) -> &DetailView
    where
        F: FnMut(&DetailView),
    {
        let cached = catalog.bodies.get(identifier).map(str::to_string);
        let needs_fetch = cached.is_none();

        let view = self.current.insert(DetailView {
            identifier: identifier.to_string(),
            title: title.to_string(),
            image_url: image_url.to_string(),
            body: cached.map_or(BodyState::Fetching, BodyState::Ready),
        });

        if needs_fetch {
            on_change(&*view);
            view.body = match catalog.resolve_body(identifier) {
                Ok(Some(body)) => BodyState::Ready(body),
                Ok(None) => BodyState::Missing,
                Err(e) => BodyState::Failed(e.to_string()),
            };
        }

        on_change(&*view);
        view
    }

    /// Resolve the body again and put it on the clipboard.
    pub fn copy(
        &self,
        catalog: &mut Catalog,
        identifier: &str,
        clipboard: &mut dyn ClipboardSink,
    ) -> CopyOutcome {
        copy_script(catalog, identifier, clipboard)
    }
}

/// Copy straight from a card; same resolution path as [`DetailModal::copy`].
pub fn copy_script(
    catalog: &mut Catalog,
    identifier: &str,
    clipboard: &mut dyn ClipboardSink,
) -> CopyOutcome {
    match catalog.resolve_body(identifier) {
        Ok(Some(body)) => match clipboard.write_text(&body) {
            Ok(()) => CopyOutcome::Copied,
            Err(e) => {
                log::warn!("Copy of {identifier} failed: {e}");
                CopyOutcome::Error
            }
        },
        Ok(None) => CopyOutcome::Failed,
        Err(e) => {
            log::warn!("Could not resolve {identifier} for copy: {e}");
            CopyOutcome::Error
        }
    }
}
