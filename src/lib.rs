//! Script Hub - a terminal browser for a public script catalog.
//!
//! The catalog API is reached through an ordered chain of relay endpoints.
//! Listing responses are cached for a short time and script bodies are kept
//! indefinitely, both in a small file-backed key/value store.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Relay transport and catalog endpoints
//! - Response and script body caching
//! - Grid controller (search, filter, pagination) and detail modal
//! - Error handling and result types
//! - UI templates and output formatting

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use crate::core::{
    // Controllers
    Catalog,
    ClipboardSink,
    CopyOutcome,
    DetailModal,
    GridController,
    GridSnapshot,
    GridStatus,
    HubConfig,
    HubContext,
    LoadMode,
    MemoryClipboard,
    QueryOutcome,
    QueryState,

    // Transport
    HttpGet,
    HttpResponse,
    Relay,
    RelayTransport,

    // Error handling
    Result,
    ScriptHubError,
    TransportError,

    // Storage
    FileStorage,
    MemoryStorage,
    Storage,

    ScriptFilter,
    ScriptSummary,

    // UI and formatting
    render_template,
    render_template_plain,
    strip_ansi_codes,
    TemplateContext,
    Templates,
    TEMPLATES,
};
