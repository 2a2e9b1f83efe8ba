//! The closed set of supported API operations.

use std::fmt;
use std::str::FromStr;

use engage_client::{Error, ErrorKind};

use crate::types::{ColumnDescriptor, ListDescriptor, LAST_MODIFIED_FORMAT};

/// Wire-level name of an API operation.
///
/// `as_str` is the exact element name inside the request envelope. The
/// `FromStr` impl accepts any casing, the way operators type command
/// names; a name outside this set is `UnsupportedOperation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationName {
    Login,
    GetLists,
    GetListMetaData,
    ExportList,
    InsertUpdateRelationalTable,
}

impl OperationName {
    /// Exact element name used inside the request envelope.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationName::Login => "Login",
            OperationName::GetLists => "GetLists",
            OperationName::GetListMetaData => "GetListMetaData",
            OperationName::ExportList => "ExportList",
            OperationName::InsertUpdateRelationalTable => "InsertUpdateRelationalTable",
        }
    }

    /// Only the login exchange goes out without a session token on the URL.
    pub fn is_login(&self) -> bool {
        matches!(self, OperationName::Login)
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "login" => Ok(OperationName::Login),
            "getlists" => Ok(OperationName::GetLists),
            "getlistmetadata" => Ok(OperationName::GetListMetaData),
            "exportlist" => Ok(OperationName::ExportList),
            "insertupdaterelationaltable" => Ok(OperationName::InsertUpdateRelationalTable),
            _ => Err(Error::new(ErrorKind::UnsupportedOperation(s.to_string()))),
        }
    }
}

/// One dispatchable operation together with its parameters.
///
/// Login is absent on purpose: it is never dispatched directly, only
/// triggered by the session layer.
#[derive(Debug, Clone)]
pub enum Operation {
    GetLists {
        relational: bool,
    },
    GetListMetaData {
        list_id: String,
    },
    ExportList {
        list_id: String,
    },
    InsertUpdateRelationalTable {
        list_id: String,
        records: Vec<Vec<String>>,
    },
}

impl Operation {
    /// The wire name this operation dispatches under.
    pub fn name(&self) -> OperationName {
        match self {
            Operation::GetLists { .. } => OperationName::GetLists,
            Operation::GetListMetaData { .. } => OperationName::GetListMetaData,
            Operation::ExportList { .. } => OperationName::ExportList,
            Operation::InsertUpdateRelationalTable { .. } => {
                OperationName::InsertUpdateRelationalTable
            }
        }
    }
}

/// Typed result of a dispatched operation.
///
/// `Display` renders the console form: lists and columns as one line per
/// entry, the export as its remote path, the upsert as the row count
/// report.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Lists(Vec<ListDescriptor>),
    Columns(Vec<ColumnDescriptor>),
    ExportedFile(String),
    RowsUpserted(usize),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Lists(lists) => {
                let lines: Vec<String> = lists
                    .iter()
                    .map(|list| match &list.last_modified {
                        Some(ts) => format!(
                            "{},{},{}",
                            list.id,
                            list.name,
                            ts.format(LAST_MODIFIED_FORMAT)
                        ),
                        None => format!("{},{}", list.id, list.name),
                    })
                    .collect();
                f.write_str(&lines.join("\n"))
            }
            Outcome::Columns(columns) => {
                let mut lines = vec!["No.,Name,Type,Default_Value,Selection_Values".to_string()];
                lines.extend(columns.iter().map(|column| {
                    format!(
                        "{},{},{},{},{}",
                        column.ordinal,
                        column.name,
                        column.column_type,
                        column.default_value,
                        column.selection_values.join("|")
                    )
                }));
                f.write_str(&lines.join("\n"))
            }
            Outcome::ExportedFile(path) => f.write_str(path),
            Outcome::RowsUpserted(count) => write!(f, "{count} Row(s) Inserted or Updated"),
        }
    }
}
