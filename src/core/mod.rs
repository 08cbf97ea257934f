//! Core functionality for script-hub.
//!
//! This module provides the building blocks behind every command: the relay
//! transport, the two cache tiers over persistent storage, the grid
//! controller and detail modal, and the UI components that render them.

pub mod api;
pub mod cache;
pub mod card;
pub mod catalog;
pub mod config;
pub mod context;
pub mod debounce;
pub mod detail;
pub mod dirs;
pub mod error;
pub mod filter;
pub mod grid;
pub mod output;
pub mod relay;
pub mod selection;
pub mod state;
pub mod storage;
pub mod templates;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, ScriptHubError, StorageError, TransportError};

// === Transport ===
// Ordered relay fallback over a pluggable HTTP client
pub use relay::{first_success, EnvelopeKind, HttpGet, HttpResponse, Relay, RelayTransport, ReqwestHttp};

// === Storage and caches ===
// localStorage-style key/value store and the response/body caches on top of it
pub use cache::{ResponseCache, ScriptBodyCache};
pub use storage::{FileStorage, MemoryStorage, Storage};

// === Catalog state ===
// Records exchanged with the API and the grid snapshot kept between commands
pub use filter::ScriptFilter;
pub use state::{GameInfo, GridSnapshot, QueryState, ScriptSummary};

// === Controllers ===
// Grid paging/search/filter and the per-script detail view
pub use catalog::Catalog;
pub use detail::{copy_script, ClipboardSink, CopyOutcome, DetailModal, MemoryClipboard, SystemClipboard};
pub use grid::{GridController, GridStatus, LoadMode, QueryOutcome};

// === Command initialization ===
pub use config::HubConfig;
pub use context::HubContext;
pub use selection::{Selection, Target};

// === UI templates ===
// Template system for consistent output formatting with colors
pub use templates::{
    render_detail, render_grid, render_template, render_template_plain, strip_ansi_codes,
    TemplateContext, Templates, TEMPLATES,
};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{
    print_error, print_info, print_key_value, print_section_header,
    print_success, print_warning,
};
