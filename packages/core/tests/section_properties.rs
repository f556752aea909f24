use structyaml_core::{
    path, Comments, Document, Error, Key, KeyMode, Mapping, Node, Path, Settings, Value,
};

fn structured() -> Document {
    Document::with_settings(Settings::structured().into())
}

#[test]
fn created_section_is_found_at_its_path() {
    for mut doc in [Document::new(), structured()] {
        let id = doc.root_mut().create_section(path!["a", "b", "c"]).id();
        let found = doc.root().get_section_safe(path!["a", "b", "c"]).unwrap();
        assert_eq!(found.id(), id);
        assert_eq!(found.path(), &path!["a", "b", "c"]);
    }
}

#[test]
fn create_section_is_idempotent() {
    let mut doc = Document::new();
    let first = doc.root_mut().create_section("db").id();
    let second = doc.root_mut().create_section("db").id();
    assert_eq!(first, second);
    assert_eq!(doc.section_count(), 2);
}

#[test]
fn set_then_get_round_trips() {
    let values = [
        Value::from(true),
        Value::from(-12),
        Value::from(0.5),
        Value::from("text"),
        Value::from(vec![Value::from(1), Value::from("two")]),
    ];
    for mode in [KeyMode::String, KeyMode::Structured] {
        let mut doc = Document::with_settings(Settings::default().with_key_mode(mode).into());
        for (i, value) in values.iter().enumerate() {
            let key = format!("k{}", i);
            doc.root_mut().set(key.as_str(), value.clone()).unwrap();
            let item = doc.root().get_safe(key.as_str()).unwrap();
            assert_eq!(item.as_value(), Some(value), "mode {}", mode);
        }
    }
}

#[test]
fn deep_emptiness() {
    let mut doc = Document::new();
    doc.root_mut().create_section("a.b.c");
    let root = doc.root();
    assert!(root.is_empty(true));
    assert!(!root.is_empty(false));

    doc.root_mut().set("a.b.c.d", 1).unwrap();
    assert!(!doc.root().is_empty(true));
}

#[test]
fn overwrite_preserves_comments() {
    let mut doc = Document::new();
    let mut root = doc.root_mut();
    root.set(
        "port",
        Mapping::with_comments(
            Comments::new(vec!["# listen port".into()], vec!["# tcp".into()]),
            Value::from(80),
        ),
    )
    .unwrap();
    root.set("port", 8080).unwrap();

    let block = doc.root().get_block("port").unwrap();
    assert_eq!(block.comments().before, vec!["# listen port"]);
    assert_eq!(block.comments().inline, vec!["# tcp"]);
    assert_eq!(doc.root().get_i32("port"), 8080);
}

#[test]
fn leaf_to_section_preserves_comments() {
    let mut doc = Document::new();
    let mut root = doc.root_mut();
    root.set(
        "db",
        Mapping::with_comments(Comments::new(vec!["# storage".into()], vec![]), Value::from("sqlite")),
    )
    .unwrap();
    root.set("db.driver", "postgres").unwrap();

    let db = doc.root().get_section_safe("db").unwrap();
    assert_eq!(db.before_comments(), ["# storage"]);
    assert_eq!(db.get_string("driver"), "postgres");
}

#[test]
fn raw_map_overwrite_preserves_comments() {
    let mut doc = Document::new();
    let mut root = doc.root_mut();
    root.set(
        "cache",
        Mapping::with_comments(Comments::new(vec!["# cache".into()], vec![]), Value::Null),
    )
    .unwrap();
    let map: Value = serde_json::from_str(r#"{"ttl": 60, "tiers": {"l1": 10}}"#).unwrap();
    root.set("cache", map).unwrap();

    let cache = doc.root().get_section_safe("cache").unwrap();
    assert_eq!(cache.before_comments(), ["# cache"]);
    assert_eq!(cache.get_i32("ttl"), 60);
    assert_eq!(cache.get_i32("tiers.l1"), 10);
}

#[test]
fn relocation_restamps_descendants() {
    let mut doc = structured();
    let mut root = doc.root_mut();
    root.set(path!["old", "inner", "deep", "x"], 1).unwrap();
    root.set(path!["old", "inner", "y"], 2).unwrap();
    let moved = doc.root().get_section_safe(path!["old", "inner"]).unwrap().id();

    doc.root_mut().set(path!["new", "home"], moved).unwrap();

    let root = doc.root();
    assert!(!root.contains(path!["old", "inner"]));
    let home = root.get_section_safe(path!["new", "home"]).unwrap();
    assert_eq!(home.id(), moved);
    assert_eq!(home.path(), &path!["new", "home"]);
    assert_eq!(home.name(), Some(&Key::from("home")));

    for (relative, item) in home.values(true) {
        if let Some(section) = item.as_section() {
            assert_eq!(section.path(), &home.path().join(&relative));
            assert_eq!(section.parent().unwrap().path(), &section.path().parent());
        }
    }
    let deep = root.get_section_safe(path!["new", "home", "deep"]).unwrap();
    assert_eq!(deep.path(), &path!["new", "home", "deep"]);
    assert_eq!(deep.get_i32("x"), 1);
}

#[test]
fn relocation_onto_itself_is_a_no_op() {
    let mut doc = Document::new();
    doc.root_mut().set("a.b", 1).unwrap();
    let a = doc.root().get_section_safe("a").unwrap().id();
    doc.root_mut().set("a", a).unwrap();
    assert_eq!(doc.root().get_i32("a.b"), 1);
    assert_eq!(doc.section_count(), 2);
}

#[test]
fn relocation_into_own_subtree_fails() {
    let mut doc = Document::new();
    doc.root_mut().set("a.b.c", 1).unwrap();
    let a = doc.root().get_section_safe("a").unwrap().id();

    let err = doc.root_mut().set("a.b.moved", a).unwrap_err();
    assert!(matches!(err, Error::InvalidRelocation { .. }));
    assert_eq!(doc.root().get_i32("a.b.c"), 1);

    let root = doc.root_id();
    let err = doc.root_mut().set("elsewhere", root).unwrap_err();
    assert!(matches!(err, Error::InvalidRelocation { .. }));
}

#[test]
fn moving_a_child_over_its_parent() {
    let mut doc = Document::new();
    doc.root_mut().set("a.b.c", 1).unwrap();
    doc.root_mut().set("a.other", 2).unwrap();
    let b = doc.root().get_section_safe("a.b").unwrap().id();

    doc.root_mut().set("a", b).unwrap();

    let a = doc.root().get_section_safe("a").unwrap();
    assert_eq!(a.id(), b);
    assert_eq!(a.get_i32("c"), 1);
    assert!(!a.contains("other"));
    assert_eq!(doc.section_count(), 2);
}

#[test]
fn stale_section_cannot_be_moved() {
    let mut doc = Document::new();
    doc.root_mut().set("gone.x", 1).unwrap();
    let gone = doc.root().get_section_safe("gone").unwrap().id();
    assert!(doc.root_mut().remove("gone"));

    assert_eq!(doc.root_mut().set("back", gone), Err(Error::StaleSection));
    assert!(doc.section(gone).is_none());
}

#[test]
fn rejected_move_creates_no_sections() {
    let mut doc = Document::new();
    doc.root_mut().set("a.b", 1).unwrap();
    let a = doc.root().get_section_safe("a").unwrap().id();

    let err = doc.root_mut().set("a.x.y.moved", a).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidRelocation {
            from: path!["a"],
            to: path!["a", "x", "y", "moved"],
        }
    );
    assert!(!doc.root().contains("a.x"));
    assert_eq!(doc.section_count(), 2);

    let root = doc.root_id();
    assert!(doc.root_mut().set("fresh.home", root).is_err());
    assert!(!doc.root().contains("fresh"));
}

#[test]
fn moving_through_missing_sections_still_works() {
    let mut doc = Document::new();
    doc.root_mut().set("a.b", 1).unwrap();
    let a = doc.root().get_section_safe("a").unwrap().id();

    doc.root_mut().set("x.y.a", a).unwrap();
    assert!(!doc.root().contains("a"));
    assert_eq!(doc.root().get_i32("x.y.a.b"), 1);
}

#[test]
fn section_handles_do_not_cross_documents() {
    let mut first = Document::new();
    let only_in_first = first.root_mut().create_section("only_in_first").id();
    let mut second = Document::new();
    second.root_mut().set("victim.data", 1).unwrap();

    assert!(second.section(only_in_first).is_none());
    assert_eq!(
        second.root_mut().set("dest", only_in_first),
        Err(Error::ForeignSection)
    );
    assert_eq!(
        second.root_mut().set("new.deep.dest", only_in_first),
        Err(Error::ForeignSection)
    );

    let root = second.root();
    assert_eq!(root.get_i32_safe("victim.data"), Some(1));
    assert!(!root.contains("dest"));
    assert!(!root.contains("new"));
    assert!(first.section(only_in_first).is_some());
}

#[test]
fn clone_issues_its_own_handles() {
    let mut original = Document::new();
    original.root_mut().set("a.b", 1).unwrap();
    let a = original.root().get_section_safe("a").unwrap().id();

    let mut copy = original.clone();
    assert!(copy.section(a).is_none());
    assert_eq!(copy.root_mut().set("moved", a), Err(Error::ForeignSection));

    let copied_a = copy.root().get_section_safe("a").unwrap().id();
    assert_ne!(copied_a, a);
    copy.root_mut().set("moved", copied_a).unwrap();
    assert_eq!(copy.root().get_i32("moved.b"), 1);
    assert_eq!(original.root().get_i32("a.b"), 1);
    assert!(!original.root().contains("moved"));
}

#[test]
fn import_copies_a_subtree_with_comments() {
    let mut defaults = Document::new();
    defaults.root_mut().set("server.port", 8080).unwrap();
    defaults.root_mut().set("server.tls.enabled", false).unwrap();
    {
        let mut root = defaults.root_mut();
        root.entry_comments_mut("server").unwrap().before = vec!["# server".into()];
        root.entry_comments_mut("server.port").unwrap().inline = vec!["# http".into()];
    }

    let mut doc = Document::new();
    doc.root_mut().set("server", "placeholder").unwrap();
    let server = defaults.root().get_section_safe("server").unwrap();
    let imported = doc.root_mut().import("server", server).unwrap().id();

    let root = doc.root();
    let server = root.get_section_safe("server").unwrap();
    assert_eq!(server.id(), imported);
    assert_eq!(server.before_comments(), ["# server"]);
    assert_eq!(server.get_i32("port"), 8080);
    assert_eq!(
        root.get_block("server.port").unwrap().comments().inline,
        vec!["# http"]
    );
    let tls = root.get_section_safe("server.tls").unwrap();
    assert_eq!(tls.path(), &path!["server", "tls"]);
    assert_eq!(tls.parent().unwrap().id(), imported);
    assert!(!tls.get_bool("enabled"));
    assert_eq!(doc.section_count(), 3);

    assert_eq!(defaults.root().get_i32("server.port"), 8080);
}

#[test]
fn import_adapts_keys_to_the_target_mode() {
    let mut source = structured();
    source.root_mut().set(path!["limits", 1], "one").unwrap();
    let limits = source.root().get_section_safe("limits").unwrap();

    let mut doc = Document::new();
    doc.root_mut().import("limits", limits).unwrap();
    assert_eq!(doc.root().get_string("limits.1"), "one");
    assert!(doc.root_mut().import(path![], limits).is_err());
}

#[test]
fn map_valued_block_becomes_a_section() {
    let mut doc = Document::new();
    let map: Value = serde_json::from_str(r#"{"k": 1, "nested": {"deep": true}}"#).unwrap();
    doc.root_mut()
        .set(
            "cfg",
            Mapping::with_comments(Comments::new(vec!["# config".into()], vec![]), map),
        )
        .unwrap();

    let root = doc.root();
    assert!(root.is_section("cfg"));
    assert_eq!(root.get_i32_safe("cfg.k"), Some(1));
    assert!(root.get_bool("cfg.nested.deep"));
    assert_eq!(
        root.get_section_safe("cfg").unwrap().before_comments(),
        ["# config"]
    );
    assert!(!root.is_empty(true));
}

#[test]
fn path_from_string_keeps_empty_segments() {
    assert_eq!(Path::from_string("a.b.c", '.'), path!["a", "b", "c"]);
    assert_eq!(Path::from_string(".a", '.'), path!["", "a"]);
    assert_eq!(Path::from_string("a.", '.'), path!["a", ""]);
    assert_eq!(Path::from_string("a..b", '.'), path!["a", "", "b"]);
}

#[test]
fn integer_list_drops_invalid_elements() {
    let mut doc = Document::new();
    doc.root_mut()
        .set(
            "mixed",
            vec![Value::from(1), Value::from("x"), Value::from(2.9), Value::from(true)],
        )
        .unwrap();
    assert_eq!(doc.root().get_i32_list("mixed"), vec![1, 2]);
    assert_eq!(doc.root().get_i64_list("mixed"), vec![1, 2]);
}

#[test]
fn nested_map_scenario() {
    let source = Node::mapping(vec![(
        Node::scalar("a"),
        Node::mapping(vec![(Node::scalar("b"), Node::scalar(1))]),
    )]);
    let mut doc = Document::build(Settings::structured().into(), &source);

    let a = doc.root().get_section_safe(path!["a"]).unwrap();
    assert_eq!(a.get_i32("b"), 1);

    assert!(doc.root_mut().remove(path!["a", "b"]));
    let a = doc.root().get_section_safe(path!["a"]).unwrap();
    assert!(a.is_empty(false));
    assert!(!doc.root_mut().remove(path!["a", "b"]));
}

#[test]
fn settings_loaded_from_json_drive_lookup() {
    let settings: Settings =
        serde_json::from_str(r#"{"separator": "/", "default-number": -1}"#).unwrap();
    let mut doc = Document::with_settings(settings.into());
    doc.root_mut().set("server/port", 9000).unwrap();

    let root = doc.root();
    assert_eq!(root.get_i32(path!["server", "port"]), 9000);
    assert_eq!(root.get_i32("server/missing"), -1);
    assert!(!root.contains("server.port"));
    assert_eq!(
        root.get_section_safe("server").unwrap().path_as_string().unwrap(),
        "server"
    );
}
