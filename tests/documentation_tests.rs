//! End-to-end documentation tests
//!
//! Load grammars from disk or memory and check the resulting records and
//! reports.

use pretty_assertions::assert_eq;
use std::path::PathBuf;

use rng2doc::records::{AttributeRecord, AttributeType, Use};
use rng2doc::{render, Config, Documentation, DocumentationBuilder, Error, Loader, Location, OutputFormat, Rendered};

fn fixture(name: &str) -> Location {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    Location::Path(path)
}

fn document(text: &str) -> Documentation {
    rng2doc::parse(&Location::String(text.to_string()), &Loader::new()).unwrap()
}

fn xml_report(location: &Location) -> String {
    let grammar = Loader::new().load(location).unwrap();
    let builder = DocumentationBuilder::new(&grammar);
    let documentation = builder.build();
    match render(&documentation, &grammar, builder.index(), &Config::default()).unwrap() {
        Rendered::Stdout(text) => text,
        other => panic!("expected stdout report, got {other:?}"),
    }
}

fn attribute<'a>(doc: &'a Documentation, element: &'a str, name: &str) -> &'a AttributeRecord {
    doc.find_by_name(element)
        .next()
        .unwrap()
        .attributes
        .iter()
        .find(|a| a.name == name)
        .unwrap()
}

#[test]
fn test_minimal_element_report() {
    assert_eq!(
        xml_report(&fixture("simple.rng")),
        "<documentation><element name=\"foo\" id=\"0\"><namespace/><description/></element></documentation>\n"
    );
}

#[test]
fn test_attribute_use() {
    let required = document(
        r#"<element name="foo" xmlns="http://relaxng.org/ns/structure/1.0">
             <attribute name="test"/>
           </element>"#,
    );
    assert_eq!(attribute(&required, "foo", "test").usage, Use::Required);

    let optional = document(
        r#"<element name="foo" xmlns="http://relaxng.org/ns/structure/1.0">
             <optional><attribute name="test"/></optional>
           </element>"#,
    );
    assert_eq!(attribute(&optional, "foo", "test").usage, Use::Optional);

    let grammar = Loader::new()
        .parse(r#"<element name="foo" xmlns="http://relaxng.org/ns/structure/1.0"><optional><attribute name="test"/></optional></element>"#)
        .unwrap();
    let builder = DocumentationBuilder::new(&grammar);
    let text = rng2doc::output::XmlRenderer::new().render(&builder.build()).unwrap();
    assert!(text.contains("<use>optional</use>"));
}

#[test]
fn test_address_book() {
    let grammar = Loader::new().load(&fixture("addressbook.rng")).unwrap();
    let doc = DocumentationBuilder::new(&grammar).build();

    let names: Vec<&str> = doc.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["addressBook", "card", "name", "email", "note"]);
    let ids: Vec<usize> = doc.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);

    let book = doc.get(0).unwrap();
    assert_eq!(book.description, "Root of an address book.");
    assert_eq!(book.namespace.as_deref(), Some("urn:example:addressbook"));
    assert_eq!(book.children.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1]);

    let card = doc.get(1).unwrap();
    assert_eq!(card.description, "A single contact.");
    assert_eq!(card.children.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3, 4]);
    let uses: Vec<(&str, Use)> = card.attributes.iter().map(|a| (a.name.as_str(), a.usage)).collect();
    assert_eq!(
        uses,
        vec![
            ("id", Use::Required),
            ("priority", Use::Optional),
            ("kind", Use::Optional),
            ("xml:lang", Use::Required),
        ]
    );

    let id = attribute(&doc, "card", "id");
    assert_eq!(id.description, "Unique identifier");
    assert_eq!(id.data_type.type_name(), Some("ID"));
    assert_eq!(id.namespace, None);

    match &attribute(&doc, "card", "priority").data_type {
        AttributeType::Primitive(datatype) => {
            let params: Vec<(&str, &str)> = datatype
                .params
                .iter()
                .map(|p| (p.name.as_str(), p.value.as_str()))
                .collect();
            assert_eq!(params, vec![("minInclusive", "1"), ("maxInclusive", "5")]);
        }
        other => panic!("expected a datatype, got {other:?}"),
    }

    match &attribute(&doc, "card", "kind").data_type {
        AttributeType::Enum { values } => {
            let values: Vec<(&str, &str)> = values
                .iter()
                .map(|v| (v.value.as_str(), v.description.as_str()))
                .collect();
            assert_eq!(values, vec![("private", "Private contact"), ("work", "Work contact")]);
        }
        other => panic!("expected an enumeration, got {other:?}"),
    }

    let lang = attribute(&doc, "card", "xml:lang");
    assert_eq!(lang.data_type, AttributeType::Text);
    assert_eq!(lang.namespace.as_deref(), Some(rng2doc::XML_NAMESPACE));

    let version = attribute(&doc, "addressBook", "version");
    assert_eq!(version.data_type.type_name(), Some("enum"));

    assert_eq!(doc.get(2).unwrap().namespace.as_deref(), Some("urn:example:addressbook"));
    assert_eq!(doc.get(4).unwrap().namespace, None);
}

#[test]
fn test_choice_of_values_is_enumeration() {
    let doc = document(
        r#"<element name="e" xmlns="http://relaxng.org/ns/structure/1.0">
             <attribute name="v"><choice><value>a</value><value>b</value></choice></attribute>
           </element>"#,
    );
    match &attribute(&doc, "e", "v").data_type {
        AttributeType::Enum { values } => {
            let values: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
            assert_eq!(values, vec!["a", "b"]);
        }
        other => panic!("expected an enumeration, got {other:?}"),
    }
}

#[test]
fn test_prefix_beats_ns_attribute() {
    let doc = document(
        r#"<grammar xmlns="http://relaxng.org/ns/structure/1.0" xmlns:x="urn:prefix" ns="urn:inherited">
             <start>
               <element name="x:a" ns="urn:explicit">
                 <element name="b" ns=""><empty/></element>
                 <element name="c"><empty/></element>
               </element>
             </start>
           </grammar>"#,
    );

    let namespaces: Vec<Option<&str>> = doc.iter().map(|r| r.namespace.as_deref()).collect();
    assert_eq!(namespaces, vec![Some("urn:prefix"), None, Some("urn:explicit")]);
}

#[test]
fn test_recursive_grammar_terminates() {
    let grammar = Loader::new().load(&fixture("recursive.rng")).unwrap();
    let doc = DocumentationBuilder::new(&grammar).build();

    assert_eq!(doc.len(), 1);
    let section = doc.get(0).unwrap();
    assert_eq!(section.children.len(), 1);
    assert_eq!(section.children[0].id, 0);
    assert_eq!(section.attributes[0].usage, Use::Optional);
}

#[test]
fn test_output_is_deterministic() {
    let location = fixture("addressbook.rng");
    assert_eq!(xml_report(&location), xml_report(&location));

    let grammar = Loader::new().load(&location).unwrap();
    let builder = DocumentationBuilder::new(&grammar);
    let doc = builder.build();
    let config = Config::new(OutputFormat::Json);
    let first = render(&doc, &grammar, builder.index(), &config).unwrap();
    let second = render(&DocumentationBuilder::new(&grammar).build(), &grammar, builder.index(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_grammar_with_doctype() {
    let grammar = Loader::new().load(&fixture("doctype.rng")).unwrap();
    let doc = DocumentationBuilder::new(&grammar).build();

    let names: Vec<&str> = doc.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["chapter", "title"]);
    assert_eq!(doc.get(1).unwrap().description, "Title of a chapter.");
}

#[test]
fn test_wrong_namespace_is_rejected() {
    let err = Loader::new().load(&fixture("wrong_namespace.rng")).unwrap_err();
    match err {
        Error::WrongGrammarNamespace { namespace, tag } => {
            assert_eq!(namespace.as_deref(), Some("urn:x-test:wrong-ns"));
            assert_eq!(tag, "wrongelement");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_structural_check() {
    let location = fixture("invalid_structure.rng");
    assert!(Loader::new().load(&location).is_ok());

    let err = Loader::new().with_validate(true).load(&location).unwrap_err();
    match err {
        Error::SchemaValidation(e) => {
            assert_eq!(e.path.as_deref(), Some("/grammar/start/element/attribute/data"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
