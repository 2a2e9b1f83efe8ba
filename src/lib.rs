//! # engage-api
//!
//! A Silverpop Engage XML API client for Rust: list enumeration, column
//! metadata retrieval, list export, and bulk row upsert into relational
//! tables, over the session-stateful XML-over-POST protocol.
//!
//! ## Crates
//!
//! - **engage-client** - Configuration, errors, XML-over-POST transport,
//!   session token management
//! - **engage-lists** - The API operations: envelope construction,
//!   response validation, typed extraction
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use engage_api::{ClientConfig, EngageClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), engage_api::Error> {
//!     // Reads ENGAGE_URL, ENGAGE_USERNAME, ENGAGE_PASSWORD.
//!     let client = EngageClient::new(ClientConfig::from_env()?)?;
//!
//!     // The first call performs the login exchange implicitly.
//!     for list in client.get_lists(false).await? {
//!         println!("{},{}", list.id, list.name);
//!     }
//!
//!     let path = client.export_list("85628").await?;
//!     println!("exported to {path}");
//!
//!     Ok(())
//! }
//! ```

// Re-export both crates for convenient access
pub use engage_client as client;
pub use engage_lists as lists;

// Re-export commonly used types at the top level
pub use engage_client::{ClientConfig, ClientConfigBuilder, Error, ErrorKind, Result};
pub use engage_lists::{
    ColumnDescriptor, ColumnType, EngageClient, ListDescriptor, Operation, OperationName, Outcome,
    TableRows,
};
