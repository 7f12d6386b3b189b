//! XML report writer

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::records::{AttributeRecord, AttributeType, Documentation, DocumentationRecord};

/// Serializes documentation records as an XML report
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer {
    indent: Option<usize>,
    declaration: bool,
}

impl XmlRenderer {
    /// Create a renderer writing compact XML without declaration
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent nested elements by `indent` spaces
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// Start the report with an XML declaration
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Render the report
    pub fn render(&self, documentation: &Documentation) -> Result<String> {
        let writer = match self.indent {
            Some(indent) => Writer::new_with_indent(Vec::new(), b' ', indent),
            None => Writer::new(Vec::new()),
        };
        let mut report = Report { writer };

        if self.declaration {
            report.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        if documentation.is_empty() {
            report.event(Event::Empty(BytesStart::new("documentation")))?;
        } else {
            report.start(BytesStart::new("documentation"))?;
            for record in documentation {
                report.element(record)?;
            }
            report.end("documentation")?;
        }

        String::from_utf8(report.writer.into_inner()).map_err(|e| Error::Output(e.to_string()))
    }
}

struct Report {
    writer: Writer<Vec<u8>>,
}

impl Report {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Output(e.to_string()))
    }

    fn start(&mut self, start: BytesStart<'_>) -> Result<()> {
        self.event(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// `<name>text</name>`, or `<name/>` for empty text
    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.event(Event::Empty(BytesStart::new(name)));
        }
        self.start(BytesStart::new(name))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn element(&mut self, record: &DocumentationRecord) -> Result<()> {
        let id = record.id.to_string();
        let start = BytesStart::new("element")
            .with_attributes([("name", record.name.as_str()), ("id", id.as_str())]);
        self.start(start)?;
        self.text_element("namespace", record.namespace.as_deref().unwrap_or_default())?;
        self.text_element("description", &record.description)?;
        for child in &record.children {
            let id = child.id.to_string();
            self.event(Event::Empty(
                BytesStart::new("child").with_attributes([("id", id.as_str())]),
            ))?;
        }
        for attribute in &record.attributes {
            self.attribute(attribute)?;
        }
        self.end("element")
    }

    fn attribute(&mut self, attribute: &AttributeRecord) -> Result<()> {
        self.start(BytesStart::new("attribute"))?;
        self.text_element("name", &attribute.name)?;
        self.text_element("namespace", attribute.namespace.as_deref().unwrap_or_default())?;
        self.text_element("description", &attribute.description)?;
        self.data_type(&attribute.data_type)?;
        self.text_element("use", attribute.usage.as_str())?;
        self.end("attribute")
    }

    fn data_type(&mut self, data_type: &AttributeType) -> Result<()> {
        let Some(name) = data_type.type_name() else {
            return self.event(Event::Empty(BytesStart::new("type")));
        };
        let start = BytesStart::new("type").with_attributes([("name", name)]);

        match data_type {
            AttributeType::Primitive(datatype) => {
                if datatype.description.is_empty() && datatype.params.is_empty() {
                    return self.event(Event::Empty(start));
                }
                self.start(start)?;
                if !datatype.description.is_empty() {
                    self.text_element("description", &datatype.description)?;
                }
                for param in &datatype.params {
                    self.start(BytesStart::new("param").with_attributes([("name", param.name.as_str())]))?;
                    self.event(Event::Text(BytesText::new(&param.value)))?;
                    self.end("param")?;
                }
                self.end("type")
            }
            AttributeType::Enum { values } if !values.is_empty() => {
                self.start(start)?;
                for value in values {
                    let value_start = BytesStart::new("value").with_attributes([("name", value.value.as_str())]);
                    if value.description.is_empty() {
                        self.event(Event::Empty(value_start))?;
                    } else {
                        self.start(value_start)?;
                        self.text_element("description", &value.description)?;
                        self.end("value")?;
                    }
                }
                self.end("type")
            }
            _ => self.event(Event::Empty(start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ChildRef, Datatype, EnumValue, Param, Use};
    use pretty_assertions::assert_eq;

    fn record(id: usize, name: &str) -> DocumentationRecord {
        DocumentationRecord {
            id,
            name: name.to_string(),
            namespace: None,
            description: String::new(),
            children: vec![],
            attributes: vec![],
        }
    }

    #[test]
    fn test_compact_single_element() {
        let doc = Documentation {
            elements: vec![record(0, "foo")],
        };
        let xml = XmlRenderer::new().render(&doc).unwrap();
        assert_eq!(
            xml,
            r#"<documentation><element name="foo" id="0"><namespace/><description/></element></documentation>"#
        );
    }

    #[test]
    fn test_attributes_and_types() {
        let mut book = record(0, "book");
        book.namespace = Some("urn:books".to_string());
        book.description = "A <book>".to_string();
        book.children.push(ChildRef {
            id: 1,
            name: "title".to_string(),
        });
        book.attributes.push(AttributeRecord {
            name: "size".to_string(),
            namespace: None,
            description: String::new(),
            usage: Use::Required,
            data_type: AttributeType::Primitive(Datatype {
                name: "integer".to_string(),
                description: String::new(),
                params: vec![Param {
                    name: "minInclusive".to_string(),
                    value: "1".to_string(),
                }],
            }),
        });
        book.attributes.push(AttributeRecord {
            name: "align".to_string(),
            namespace: None,
            description: "Alignment".to_string(),
            usage: Use::Optional,
            data_type: AttributeType::Enum {
                values: vec![
                    EnumValue {
                        value: "left".to_string(),
                        description: "Left aligned".to_string(),
                    },
                    EnumValue {
                        value: "right".to_string(),
                        description: String::new(),
                    },
                ],
            },
        });
        let doc = Documentation {
            elements: vec![book, record(1, "title")],
        };

        let xml = XmlRenderer::new().render(&doc).unwrap();
        let expected = concat!(
            r#"<documentation><element name="book" id="0">"#,
            r#"<namespace>urn:books</namespace><description>A &lt;book&gt;</description>"#,
            r#"<child id="1"/>"#,
            r#"<attribute><name>size</name><namespace/><description/>"#,
            r#"<type name="integer"><param name="minInclusive">1</param></type>"#,
            r#"<use>required</use></attribute>"#,
            r#"<attribute><name>align</name><namespace/><description>Alignment</description>"#,
            r#"<type name="enum"><value name="left"><description>Left aligned</description></value>"#,
            r#"<value name="right"/></type><use>optional</use></attribute>"#,
            r#"</element><element name="title" id="1"><namespace/><description/></element>"#,
            r#"</documentation>"#,
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_indent_and_declaration() {
        let doc = Documentation {
            elements: vec![record(0, "foo")],
        };
        let xml = XmlRenderer::new()
            .with_indent(Some(2))
            .with_declaration(true)
            .render(&doc)
            .unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("\n  <element name=\"foo\" id=\"0\">\n    <namespace/>"));
        assert_eq!(XmlRenderer::new().render(&Documentation::default()).unwrap(), "<documentation/>");
    }
}
