//! # ModKit - shared client infrastructure
//!
//! Building blocks the Ethica client modules share:
//!
//! - **HTTP**: [`TracedClient`], a `reqwest` wrapper that opens an
//!   `outgoing_http` span per request and propagates a W3C `traceparent`.
//! - **Pagination**: [`Page`], [`PageInfo`] and [`PageRequest`] with opaque
//!   offset cursors for read-only collections.
//! - **Configuration**: [`ConfigProvider`] plus typed accessors for
//!   per-module configuration sections.

pub use anyhow::Result;

pub mod config;
pub use config::{module_config_required, ConfigProvider};

pub mod page;
pub use page::{Page, PageError, PageInfo, PageRequest};

// HTTP utilities
pub mod http;
pub use http::client::TracedClient;
