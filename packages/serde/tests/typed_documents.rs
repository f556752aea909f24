use serde::{Deserialize, Serialize};
use structyaml_core::{path, Document, Node, Settings};
use structyaml_serde::{
    document_from_json_str, document_to_json, Error, TypedSection, TypedSectionMut,
};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Config {
    name: String,
    listen: Listen,
    features: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Listen {
    host: String,
    port: u16,
}

const CONFIG: &str = r#"{
    "name": "gateway",
    "listen": {"host": "0.0.0.0", "port": 8080},
    "features": ["auth", "metrics"]
}"#;

#[test]
fn read_whole_document_as_struct() {
    let doc = document_from_json_str(Settings::shared_default(), CONFIG).unwrap();
    let config: Config = doc.root().read_as(path![]).unwrap().unwrap();
    assert_eq!(config.listen.port, 8080);
    assert_eq!(config.features, vec!["auth", "metrics"]);
}

#[test]
fn write_then_edit_with_untyped_api() {
    let mut doc = Document::new();
    let config = Config {
        name: "edge".to_string(),
        listen: Listen {
            host: "localhost".to_string(),
            port: 80,
        },
        features: vec![],
    };
    doc.root_mut().write_as("service", &config).unwrap();
    doc.root_mut().set("service.listen.port", 8081).unwrap();

    let edited: Config = doc.root().read_as("service").unwrap().unwrap();
    assert_eq!(edited.listen.port, 8081);
    assert_eq!(edited.name, "edge");
}

#[test]
fn comments_from_source_survive_typed_writes() {
    let source = Node::mapping(vec![(
        Node::scalar("listen").with_before(["# public endpoint"]),
        Node::mapping(vec![
            (Node::scalar("host"), Node::scalar("example.org")),
            (
                Node::scalar("port"),
                Node::scalar(443).with_inline(["# https"]),
            ),
        ]),
    )]);
    let mut doc = Document::build(Settings::shared_default(), &source);

    doc.root_mut()
        .write_as(
            "listen",
            &Listen {
                host: "example.net".to_string(),
                port: 8443,
            },
        )
        .unwrap();

    let listen = doc.root().get_section_safe("listen").unwrap();
    assert_eq!(listen.before_comments(), ["# public endpoint"]);
    assert_eq!(listen.get_string("host"), "example.net");
}

#[test]
fn typed_read_of_missing_struct_field_fails() {
    let doc = document_from_json_str(
        Settings::shared_default(),
        r#"{"listen": {"host": "h"}}"#,
    )
    .unwrap();
    let err = doc.root().read_as::<Listen>("listen").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn json_export_reflects_edits() {
    let mut doc = document_from_json_str(Settings::shared_default(), CONFIG).unwrap();
    doc.root_mut().remove("features");
    doc.root_mut().set("listen.tls", true).unwrap();
    assert_eq!(
        document_to_json(&doc),
        serde_json::json!({
            "name": "gateway",
            "listen": {"host": "0.0.0.0", "port": 8080, "tls": true}
        })
    );
}
