//! Descriptor types returned by the list operations.

use chrono::NaiveDateTime;
use engage_client::{Error, ErrorKind, Result};
use std::fmt;

/// Timestamp pattern the API uses for `LAST_MODIFIED`.
pub(crate) const LAST_MODIFIED_FORMAT: &str = "%m/%d/%y %I:%M %p";

/// One list (or relational table) visible to the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDescriptor {
    pub id: String,
    pub name: String,
    pub last_modified: Option<NaiveDateTime>,
}

/// One column of a list, as reported by `GetListMetaData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// 1-based position in document order.
    pub ordinal: usize,
    pub name: String,
    pub column_type: ColumnType,
    pub default_value: String,
    /// Allowed values for selection columns; empty for other types.
    pub selection_values: Vec<String>,
}

/// Column types, keyed by the API's numeric type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Boolean,
    Numeric,
    Date,
    Time,
    Country,
    SelectOne,
    Segmenting,
    System,
    Unknown,
    SmsOptIn,
    SmsOptedOutDate,
    SmsPhoneNumber,
    PhoneNumber,
    Timestamp,
    MultiSelect,
}

impl ColumnType {
    /// Map a numeric type code from the wire.
    ///
    /// The table is fixed; a code outside it is rejected rather than
    /// defaulted.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(ColumnType::Text),
            1 => Ok(ColumnType::Boolean),
            2 => Ok(ColumnType::Numeric),
            3 => Ok(ColumnType::Date),
            4 => Ok(ColumnType::Time),
            5 => Ok(ColumnType::Country),
            6 => Ok(ColumnType::SelectOne),
            8 => Ok(ColumnType::Segmenting),
            9 => Ok(ColumnType::System),
            12 => Ok(ColumnType::Unknown),
            13 => Ok(ColumnType::SmsOptIn),
            14 => Ok(ColumnType::SmsOptedOutDate),
            15 => Ok(ColumnType::SmsPhoneNumber),
            16 => Ok(ColumnType::PhoneNumber),
            17 => Ok(ColumnType::Timestamp),
            20 => Ok(ColumnType::MultiSelect),
            other => Err(Error::new(ErrorKind::InvalidParameter(format!(
                "unmapped column type code {other}"
            )))),
        }
    }

    /// Human-readable label, spelled the way the vendor documents it.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Numeric => "numeric",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Country => "Country",
            ColumnType::SelectOne => "Select One",
            ColumnType::Segmenting => "Segmenting",
            ColumnType::System => "System",
            ColumnType::Unknown => "Unknown",
            ColumnType::SmsOptIn => "SMS Opt In",
            ColumnType::SmsOptedOutDate => "SMS Opted Out Date",
            ColumnType::SmsPhoneNumber => "SMS Phone Number",
            ColumnType::PhoneNumber => "Phone Number",
            ColumnType::Timestamp => "Timestamp",
            ColumnType::MultiSelect => "Multi-Select",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
