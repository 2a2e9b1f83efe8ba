//! Tabular input for the bulk upsert operation.

use engage_client::{xml, Error, ErrorKind, Result};

/// Header plus data rows, validated to be rectangular.
///
/// The first input record is consumed as the header and is never sent as
/// data. A row whose cardinality differs from the header's is rejected
/// outright — truncating or padding would silently misalign cells with
/// their destination columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRows {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableRows {
    /// Split raw records into header and data rows, validating the shape.
    ///
    /// Validation happens entirely up front: a shape error means no XML
    /// was and will be produced for any part of the input.
    pub fn from_records(records: Vec<Vec<String>>) -> Result<Self> {
        let mut records = records.into_iter();
        let header = records.next().ok_or_else(|| {
            Error::new(ErrorKind::InvalidParameter(
                "bulk input is empty; the first record must be the header".into(),
            ))
        })?;
        if header.is_empty() {
            return Err(Error::new(ErrorKind::InvalidParameter(
                "bulk input header has no columns".into(),
            )));
        }

        let rows: Vec<Vec<String>> = records.collect();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(Error::new(ErrorKind::RowShape {
                    row: i + 1,
                    expected: header.len(),
                    found: row.len(),
                }));
            }
        }

        Ok(Self { header, rows })
    }

    /// Column names, in input order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render the full `InsertUpdateRelationalTable` request envelope.
    ///
    /// Each data row becomes a `ROW` of `COLUMN` elements tagged with the
    /// header name at the same position.
    pub fn to_xml(&self, list_id: &str) -> String {
        let mut rows_xml = String::new();
        for row in &self.rows {
            rows_xml.push_str("<ROW>");
            for (name, cell) in self.header.iter().zip(row) {
                rows_xml.push_str(&format!(
                    r#"<COLUMN name="{}">{}</COLUMN>"#,
                    xml::escape(name),
                    xml::escape(cell),
                ));
            }
            rows_xml.push_str("</ROW>");
        }

        format!(
            "<Envelope><Body><InsertUpdateRelationalTable>\
             <TABLE_ID>{table_id}</TABLE_ID>\
             <ROWS>{rows_xml}</ROWS>\
             </InsertUpdateRelationalTable></Body></Envelope>",
            table_id = xml::escape(list_id),
        )
    }
}
