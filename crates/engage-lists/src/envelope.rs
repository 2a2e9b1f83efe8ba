//! Request envelope construction.

use engage_client::{xml, Error, ErrorKind, Result};

use crate::ops::OperationName;

/// Builder for the fixed two-level request wrapper.
///
/// Every request, the login included, goes out as
/// `<Envelope><Body><Op>…</Op></Body></Envelope>` with one child element
/// per field, in insertion order. Output is deterministic for identical
/// input.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    operation: OperationName,
    fields: Vec<(String, String)>,
}

impl RequestEnvelope {
    /// Start an envelope for the given operation.
    pub fn new(operation: OperationName) -> Self {
        Self {
            operation,
            fields: Vec::new(),
        }
    }

    /// Append a field. Insertion order is preserved in the output.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Render the envelope to XML.
    ///
    /// Field values get standard XML text escaping and nothing more.
    /// Field names become element names and must therefore be plain
    /// identifiers.
    pub fn to_xml(&self) -> Result<String> {
        let mut body = String::new();
        for (name, value) in &self.fields {
            if !is_element_name(name) {
                return Err(Error::new(ErrorKind::InvalidParameter(format!(
                    "field name {name:?} is not a valid element name"
                ))));
            }
            body.push_str(&format!("<{name}>{}</{name}>", xml::escape(value)));
        }
        Ok(format!(
            "<Envelope><Body><{op}>{body}</{op}></Body></Envelope>",
            op = self.operation.as_str(),
        ))
    }
}

/// Element names: ASCII letters, digits, underscores; no leading digit.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_envelope_shape() {
        let envelope = RequestEnvelope::new(OperationName::Login)
            .field("USERNAME", "jojo@mojocom.com")
            .field("PASSWORD", "swordfish")
            .to_xml()
            .unwrap();

        assert_eq!(
            envelope,
            "<Envelope><Body><Login>\
             <USERNAME>jojo@mojocom.com</USERNAME>\
             <PASSWORD>swordfish</PASSWORD>\
             </Login></Body></Envelope>"
        );
    }

    #[test]
    fn test_child_element_set_matches_field_set() {
        let envelope = RequestEnvelope::new(OperationName::GetLists)
            .field("VISIBILITY", "1")
            .field("LIST_TYPE", "2")
            .to_xml()
            .unwrap();

        let doc = roxmltree::Document::parse(&envelope).unwrap();
        let operation = doc
            .root_element()
            .first_element_child()
            .and_then(|body| body.first_element_child())
            .expect("Envelope/Body/GetLists");

        assert_eq!(operation.tag_name().name(), "GetLists");
        let children: Vec<(&str, &str)> = operation
            .children()
            .filter(|n| n.is_element())
            .map(|n| (n.tag_name().name(), n.text().unwrap_or("")))
            .collect();
        assert_eq!(children, vec![("VISIBILITY", "1"), ("LIST_TYPE", "2")]);
    }

    #[test]
    fn test_deterministic_output() {
        let build = || {
            RequestEnvelope::new(OperationName::ExportList)
                .field("LIST_ID", "85628")
                .field("EXPORT_TYPE", "ALL")
                .to_xml()
                .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_values_are_escaped() {
        let envelope = RequestEnvelope::new(OperationName::Login)
            .field("USERNAME", "a&b<c>")
            .to_xml()
            .unwrap();
        assert!(envelope.contains("<USERNAME>a&amp;b&lt;c&gt;</USERNAME>"));
    }

    #[test]
    fn test_bad_field_name_is_invalid_parameter() {
        for name in ["", "1LEADING_DIGIT", "has space", "angle<bracket"] {
            let err = RequestEnvelope::new(OperationName::GetLists)
                .field(name, "x")
                .to_xml()
                .unwrap_err();
            assert!(
                matches!(err.kind, ErrorKind::InvalidParameter(_)),
                "field name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_field_list_still_wraps() {
        let envelope = RequestEnvelope::new(OperationName::GetLists).to_xml().unwrap();
        assert_eq!(envelope, "<Envelope><Body><GetLists></GetLists></Body></Envelope>");
    }
}
