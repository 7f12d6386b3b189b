//! JSON report writer

use crate::error::{Error, Result};
use crate::records::Documentation;

/// Render the records as JSON, indented when `pretty` is set
pub fn render_json(documentation: &Documentation, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(documentation)
    } else {
        serde_json::to_string(documentation)
    };
    text.map_err(|e| Error::Output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::DocumentationRecord;

    #[test]
    fn test_render_json() {
        let doc = Documentation {
            elements: vec![DocumentationRecord {
                id: 0,
                name: "foo".to_string(),
                namespace: None,
                description: String::new(),
                children: vec![],
                attributes: vec![],
            }],
        };

        let text = render_json(&doc, false).unwrap();
        assert_eq!(
            text,
            r#"{"elements":[{"id":0,"name":"foo","namespace":null,"description":"","children":[],"attributes":[]}]}"#
        );
        assert!(render_json(&doc, true).unwrap().contains("\n  \"elements\""));
    }
}
