//! # engage-lists
//!
//! Operations of the Engage list-management XML API: list enumeration,
//! column metadata retrieval, list export, and bulk row upsert into
//! relational tables.
//!
//! Every operation is a build → exchange → validate → extract pipeline:
//! [`RequestEnvelope`] (or [`TableRows`] for the bulk upsert) renders the
//! request, [`EngageClient`] owns the session and the wire exchange, and
//! [`ApiResponse`] is the typed accessor layer that checks the
//! success/fault/partial-failure contract before anything is extracted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use engage_client::ClientConfig;
//! use engage_lists::EngageClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), engage_client::Error> {
//!     let client = EngageClient::new(ClientConfig::from_env()?)?;
//!
//!     // Implicitly logs in on the first call.
//!     for list in client.get_lists(false).await? {
//!         println!("{} {}", list.id, list.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod envelope;
mod ops;
mod response;
mod table;
mod types;

pub use client::EngageClient;
pub use envelope::RequestEnvelope;
pub use ops::{Operation, OperationName, Outcome};
pub use response::ApiResponse;
pub use table::TableRows;
pub use types::{ColumnDescriptor, ColumnType, ListDescriptor};

// The shared error type lives in engage-client; re-exported for callers
// that depend on this crate alone.
pub use engage_client::{Error, ErrorKind, Result};
