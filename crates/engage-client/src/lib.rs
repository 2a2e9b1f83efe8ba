//! # engage-client
//!
//! Core client infrastructure for the Silverpop Engage XML API.
//!
//! This crate provides the pieces every API operation builds on:
//! - client configuration with builder and environment loading
//! - the shared error type for the whole workspace
//! - a thin XML-over-POST transport on top of `reqwest`
//! - session token management (lazy login, URL decoration)
//!
//! ## Security
//!
//! The account password is held only in [`ClientConfig`] and is redacted
//! from its `Debug` output; it never appears in tracing output or error
//! messages.

mod config;
mod error;
mod http;
mod session;
pub mod xml;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use http::HttpTransport;
pub use session::SessionManager;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("engage-api/", env!("CARGO_PKG_VERSION"));
