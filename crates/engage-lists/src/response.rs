//! Typed accessors over a parsed response document.
//!
//! All path navigation lives here; operation handlers never touch raw
//! node paths themselves.

use chrono::NaiveDateTime;
use roxmltree::{Document, Node};

use engage_client::{Error, ErrorKind, Result};

use crate::types::{ColumnDescriptor, ColumnType, ListDescriptor, LAST_MODIFIED_FORMAT};

/// Parse a raw response body into an XML document.
pub(crate) fn parse_document(body: &str) -> Result<Document<'_>> {
    Document::parse(body).map_err(|e| {
        Error::with_source(
            ErrorKind::MalformedResponse("response is not well-formed XML".into()),
            e,
        )
    })
}

/// Read-only view of one API response.
pub struct ApiResponse<'a, 'input> {
    body: Node<'a, 'input>,
}

impl<'a, 'input> ApiResponse<'a, 'input> {
    /// Wrap a parsed document rooted at `Envelope`.
    pub fn new(doc: &'a Document<'input>) -> Result<Self> {
        let root = doc.root_element();
        if root.tag_name().name() != "Envelope" {
            return Err(malformed("response has no Envelope root"));
        }
        let body = child(root, "Body").ok_or_else(|| malformed("response has no Body"))?;
        Ok(Self { body })
    }

    fn result(&self) -> Option<Node<'a, 'input>> {
        child(self.body, "RESULT")
    }

    fn require_result(&self) -> Result<Node<'a, 'input>> {
        self.result().ok_or_else(|| malformed("missing RESULT"))
    }

    /// `RESULT/SUCCESS` as the API's boolean-as-text.
    ///
    /// Absence of the node is a protocol violation, not a failure result.
    pub fn success(&self) -> Result<bool> {
        let success = child(self.require_result()?, "SUCCESS")
            .ok_or_else(|| malformed("missing RESULT/SUCCESS"))?;
        let text = success.text().unwrap_or("").trim();
        Ok(matches!(text, "true" | "TRUE"))
    }

    /// `Body/Fault/FaultString` text, when the server reported a fault.
    pub fn fault_string(&self) -> Option<String> {
        child(self.body, "Fault")
            .and_then(|fault| child(fault, "FaultString"))
            .and_then(|n| n.text())
            .map(|t| t.trim().to_string())
    }

    /// Descriptions of individually failed rows under `RESULT/FAILURES`.
    pub fn failures(&self) -> Vec<String> {
        let Some(result) = self.result() else {
            return Vec::new();
        };
        let Some(failures) = child(result, "FAILURES") else {
            return Vec::new();
        };
        failures
            .children()
            .filter(|n| n.has_tag_name("FAILURE"))
            .map(|n| n.attribute("description").unwrap_or("").to_string())
            .collect()
    }

    /// Enforce the success / fault / partial-failure contract.
    ///
    /// Partial failures outrank an overall `SUCCESS=true`: rows reported
    /// failed individually are an error even when the operation as a
    /// whole was accepted.
    pub fn validate(&self) -> Result<()> {
        if !self.success()? {
            let fault = self.fault_string().unwrap_or_else(|| {
                "server reported failure without a fault string".to_string()
            });
            return Err(Error::new(ErrorKind::ServerFault(fault)));
        }
        let failures = self.failures();
        if !failures.is_empty() {
            return Err(Error::new(ErrorKind::PartialFailure(failures)));
        }
        Ok(())
    }

    /// Text of a single `RESULT/<tag>` element.
    pub fn result_text(&self, tag: &str) -> Result<String> {
        child(self.require_result()?, tag)
            .and_then(|n| n.text())
            .map(|t| t.trim().to_string())
            .ok_or_else(|| malformed(&format!("missing or empty RESULT/{tag}")))
    }

    /// `RESULT/LIST[]` entries in document order.
    pub fn lists(&self) -> Result<Vec<ListDescriptor>> {
        let result = self.require_result()?;
        let mut lists = Vec::new();
        for node in result.children().filter(|n| n.has_tag_name("LIST")) {
            let id = required_text(node, "ID")?;
            let name = required_text(node, "NAME")?;
            let last_modified = match child(node, "LAST_MODIFIED").and_then(|n| n.text()) {
                Some(text) => Some(
                    NaiveDateTime::parse_from_str(text.trim(), LAST_MODIFIED_FORMAT).map_err(
                        |e| {
                            Error::with_source(
                                ErrorKind::MalformedResponse(format!(
                                    "unparseable LAST_MODIFIED {:?}",
                                    text.trim()
                                )),
                                e,
                            )
                        },
                    )?,
                ),
                None => None,
            };
            lists.push(ListDescriptor {
                id,
                name,
                last_modified,
            });
        }
        Ok(lists)
    }

    /// `RESULT/COLUMNS/COLUMN[]` entries, ordinals assigned in document
    /// order starting at 1.
    pub fn columns(&self) -> Result<Vec<ColumnDescriptor>> {
        let result = self.require_result()?;
        let Some(columns_node) = child(result, "COLUMNS") else {
            return Ok(Vec::new());
        };

        let mut columns = Vec::new();
        for (i, node) in columns_node
            .children()
            .filter(|n| n.has_tag_name("COLUMN"))
            .enumerate()
        {
            let name = required_text(node, "NAME")?;
            let code: u32 = required_text(node, "TYPE")?.parse().map_err(|e| {
                Error::with_source(
                    ErrorKind::MalformedResponse(format!("non-numeric TYPE for column {name:?}")),
                    e,
                )
            })?;
            let column_type = ColumnType::from_code(code)?;
            let default_value = child(node, "DEFAULT_VALUE")
                .and_then(|n| n.text())
                .unwrap_or("")
                .trim()
                .to_string();
            let selection_values = child(node, "SELECTION_VALUES")
                .map(|sv| {
                    sv.children()
                        .filter(|n| n.is_element())
                        .map(|n| n.text().unwrap_or("").trim().to_string())
                        .collect()
                })
                .unwrap_or_default();

            columns.push(ColumnDescriptor {
                ordinal: i + 1,
                name,
                column_type,
                default_value,
                selection_values,
            });
        }
        Ok(columns)
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn required_text(node: Node<'_, '_>, name: &str) -> Result<String> {
    child(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .ok_or_else(|| {
            malformed(&format!(
                "missing or empty {name} under {}",
                node.tag_name().name()
            ))
        })
}

fn malformed(message: &str) -> Error {
    Error::new(ErrorKind::MalformedResponse(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(xml: &str) -> Document<'_> {
        parse_document(xml).expect("well-formed test XML")
    }

    #[test]
    fn test_success_truthy_literals() {
        for literal in ["true", "TRUE"] {
            let xml = format!(
                "<Envelope><Body><RESULT><SUCCESS>{literal}</SUCCESS></RESULT></Body></Envelope>"
            );
            let doc = response(&xml);
            let resp = ApiResponse::new(&doc).unwrap();
            assert!(resp.success().unwrap(), "{literal} should be truthy");
            assert!(resp.validate().is_ok());
        }
    }

    #[test]
    fn test_success_everything_else_is_falsy() {
        for literal in ["false", "FALSE", "True", "yes", "1", ""] {
            let xml = format!(
                "<Envelope><Body><RESULT><SUCCESS>{literal}</SUCCESS></RESULT></Body></Envelope>"
            );
            let doc = response(&xml);
            let resp = ApiResponse::new(&doc).unwrap();
            assert!(!resp.success().unwrap(), "{literal:?} should be falsy");
        }
    }

    #[test]
    fn test_missing_success_node_is_malformed() {
        let doc = response("<Envelope><Body><RESULT></RESULT></Body></Envelope>");
        let resp = ApiResponse::new(&doc).unwrap();
        let err = resp.success().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedResponse(_)));

        let doc = response("<Envelope><Body></Body></Envelope>");
        let resp = ApiResponse::new(&doc).unwrap();
        let err = resp.validate().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn test_unparseable_body_is_malformed() {
        let err = parse_document("this is not xml <").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedResponse(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_fault_becomes_server_fault() {
        let doc = response(
            "<Envelope><Body>\
             <RESULT><SUCCESS>false</SUCCESS></RESULT>\
             <Fault><FaultString>Invalid Login</FaultString></Fault>\
             </Body></Envelope>",
        );
        let resp = ApiResponse::new(&doc).unwrap();
        let err = resp.validate().unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::ServerFault(ref message) if message == "Invalid Login"
        ));
        assert_eq!(err.to_string(), "Invalid Login");
    }

    #[test]
    fn test_partial_failures_outrank_overall_success() {
        let doc = response(
            r#"<Envelope><Body><RESULT>
                 <SUCCESS>TRUE</SUCCESS>
                 <FAILURES>
                   <FAILURE failure_type="permanent" description="Row 3 bad"/>
                   <FAILURE failure_type="permanent" description="Row 7 bad"/>
                 </FAILURES>
               </RESULT></Body></Envelope>"#,
        );
        let resp = ApiResponse::new(&doc).unwrap();
        assert!(resp.success().unwrap());

        let err = resp.validate().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::PartialFailure(_)));
        assert_eq!(err.to_string(), "1. Row 3 bad; 2. Row 7 bad");
    }

    #[test]
    fn test_empty_failures_container_is_not_an_error() {
        let doc = response(
            "<Envelope><Body><RESULT>\
             <SUCCESS>true</SUCCESS><FAILURES></FAILURES>\
             </RESULT></Body></Envelope>",
        );
        let resp = ApiResponse::new(&doc).unwrap();
        assert!(resp.validate().is_ok());
    }

    #[test]
    fn test_result_text_extraction() {
        let doc = response(
            "<Envelope><Body><RESULT>\
             <SUCCESS>true</SUCCESS>\
             <SESSIONID>33D8KSL3</SESSIONID>\
             </RESULT></Body></Envelope>",
        );
        let resp = ApiResponse::new(&doc).unwrap();
        assert_eq!(resp.result_text("SESSIONID").unwrap(), "33D8KSL3");

        let err = resp.result_text("FILE_PATH").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn test_lists_in_document_order() {
        let doc = response(
            "<Envelope><Body><RESULT><SUCCESS>true</SUCCESS>\
             <LIST><ID>85628</ID><NAME>Customers</NAME></LIST>\
             <LIST><ID>90211</ID><NAME>Purchases</NAME>\
             <LAST_MODIFIED>01/15/24 03:45 PM</LAST_MODIFIED></LIST>\
             </RESULT></Body></Envelope>",
        );
        let resp = ApiResponse::new(&doc).unwrap();
        let lists = resp.lists().unwrap();

        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].id, "85628");
        assert_eq!(lists[0].name, "Customers");
        assert!(lists[0].last_modified.is_none());
        assert_eq!(lists[1].id, "90211");
        assert_eq!(
            lists[1]
                .last_modified
                .expect("timestamp present")
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            "2024-01-15 15:45"
        );
    }

    #[test]
    fn test_columns_with_ordinals_and_selection_values() {
        let doc = response(
            "<Envelope><Body><RESULT><SUCCESS>true</SUCCESS><COLUMNS>\
             <COLUMN><NAME>EMAIL</NAME><TYPE>9</TYPE></COLUMN>\
             <COLUMN><NAME>AGE</NAME><TYPE>2</TYPE><DEFAULT_VALUE>0</DEFAULT_VALUE></COLUMN>\
             <COLUMN><NAME>STATE</NAME><TYPE>6</TYPE><SELECTION_VALUES>\
             <VALUE>CA</VALUE><VALUE>NY</VALUE></SELECTION_VALUES></COLUMN>\
             </COLUMNS></RESULT></Body></Envelope>",
        );
        let resp = ApiResponse::new(&doc).unwrap();
        let columns = resp.columns().unwrap();

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].ordinal, 1);
        assert_eq!(columns[0].name, "EMAIL");
        assert_eq!(columns[0].column_type, ColumnType::System);
        assert_eq!(columns[0].default_value, "");
        assert!(columns[0].selection_values.is_empty());

        assert_eq!(columns[1].ordinal, 2);
        assert_eq!(columns[1].column_type, ColumnType::Numeric);
        assert_eq!(columns[1].default_value, "0");

        assert_eq!(columns[2].ordinal, 3);
        assert_eq!(columns[2].column_type, ColumnType::SelectOne);
        assert_eq!(columns[2].selection_values, vec!["CA", "NY"]);
    }

    #[test]
    fn test_unmapped_column_type_code_is_rejected() {
        let doc = response(
            "<Envelope><Body><RESULT><SUCCESS>true</SUCCESS><COLUMNS>\
             <COLUMN><NAME>ODD</NAME><TYPE>7</TYPE></COLUMN>\
             </COLUMNS></RESULT></Body></Envelope>",
        );
        let resp = ApiResponse::new(&doc).unwrap();
        let err = resp.columns().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidParameter(_)));
    }
}
