//! Documentation records
//!
//! The flattened, per-element summary handed to the output serializers.

use serde::Serialize;
use std::fmt;

/// Attribute use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Use {
    /// The attribute must be present
    Required,
    /// The attribute is reachable through an `optional` wrapper
    Optional,
}

impl Use {
    /// Name used in the reports
    pub fn as_str(self) -> &'static str {
        match self {
            Use::Required => "required",
            Use::Optional => "optional",
        }
    }
}

impl fmt::Display for Use {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Datatype parameter (`<param name="...">value</param>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Parameter value
    pub value: String,
}

/// Primitive datatype of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Datatype {
    /// Datatype name (`type` of the `data` pattern)
    pub name: String,
    /// Documentation of the `data` pattern
    pub description: String,
    /// Datatype parameters in document order
    pub params: Vec<Param>,
}

/// Member of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    /// Value text
    pub value: String,
    /// Documentation following the value
    pub description: String,
}

/// Type classification of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeType {
    /// Primitive datatype
    Primitive(Datatype),
    /// Free text
    Text,
    /// Enumeration of values in document order
    Enum {
        /// Values
        values: Vec<EnumValue>,
    },
    /// Content could not be classified
    Unknown,
}

impl AttributeType {
    /// Type name shown in the reports, `None` if unclassified
    pub fn type_name(&self) -> Option<&str> {
        match self {
            AttributeType::Primitive(datatype) => Some(&datatype.name),
            AttributeType::Text => Some("text"),
            AttributeType::Enum { .. } => Some("enum"),
            AttributeType::Unknown => None,
        }
    }

    /// Description attached to the type
    pub fn description(&self) -> &str {
        match self {
            AttributeType::Primitive(datatype) => &datatype.description,
            _ => "",
        }
    }
}

/// Documented attribute of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRecord {
    /// Attribute name
    pub name: String,
    /// Attribute namespace, `None` for no namespace
    pub namespace: Option<String>,
    /// Attribute documentation
    pub description: String,
    /// Required or optional
    #[serde(rename = "use")]
    pub usage: Use,
    /// Type classification
    #[serde(rename = "type")]
    pub data_type: AttributeType,
}

/// Reference to a child element's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildRef {
    /// Id of the child's record
    pub id: usize,
    /// Name of the child
    pub name: String,
}

/// Documentation of one element pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationRecord {
    /// Ordinal in document order
    pub id: usize,
    /// Element name
    pub name: String,
    /// Element namespace, `None` for no namespace
    pub namespace: Option<String>,
    /// Element documentation
    pub description: String,
    /// Child elements in document order
    pub children: Vec<ChildRef>,
    /// Attributes in document order
    pub attributes: Vec<AttributeRecord>,
}

/// Ordered collection of documentation records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Documentation {
    /// Records ordered by id
    pub elements: Vec<DocumentationRecord>,
}

impl Documentation {
    /// Get a record by id
    pub fn get(&self, id: usize) -> Option<&DocumentationRecord> {
        self.elements.get(id).filter(|r| r.id == id)
    }

    /// Records with a given name in document order
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocumentationRecord> + 'a {
        self.elements.iter().filter(move |r| r.name == name)
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentationRecord> {
        self.elements.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if there is no record
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a Documentation {
    type Item = &'a DocumentationRecord;
    type IntoIter = std::slice::Iter<'a, DocumentationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
