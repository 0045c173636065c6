mod common;

use common::{p, v};
use json_delta::json_value::{from_value, to_value, JsonWriteOptions, Ownership};
use json_delta::{JsonError, Patch, Pointer, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Settings {
    theme: String,
    font_size: u32,
    plugins: Vec<String>,
    beta: bool,
}

#[test]
fn typed_records_diff_and_patch() {
    let before = Settings {
        theme: "dark".into(),
        font_size: 12,
        plugins: vec!["git".into(), "lint".into()],
        beta: false,
    };
    let after = Settings {
        font_size: 14,
        plugins: vec!["git".into()],
        beta: true,
        ..before.clone()
    };

    let patch = Patch::diff(&to_value(&before).unwrap(), &to_value(&after).unwrap());
    let mut doc = to_value(&before).unwrap();
    patch.apply_to(&mut doc, &Default::default()).unwrap();
    assert_eq!(from_value::<Settings>(&doc).unwrap(), after);
}

#[test]
fn fragment_pointers_resolve() {
    let doc: Value = r#"{"c%d": 2, "e^f": 3, " ": 7, "foo": ["bar"]}"#.parse().unwrap();
    assert_eq!(doc.resolve(&p("#/c%25d")).unwrap(), &v(json!(2)));
    assert_eq!(doc.resolve(&p("#/e%5Ef")).unwrap(), &v(json!(3)));
    assert_eq!(doc.resolve(&p("#/%20")).unwrap(), &v(json!(7)));
    assert_eq!(doc.resolve(&p("#/foo/0")).unwrap(), &v(json!("bar")));
    assert_eq!(doc.resolve(&p("#")).unwrap(), &doc);
    assert_eq!(Pointer::parse("#/%zz"), Err(json_delta::PointerError::InvalidPointerSyntax));
}

#[test]
fn patched_copy_shares_untouched_subtrees() {
    let original = v(json!({
        "big": {"rows": [[1, 2], [3, 4]]},
        "small": {"n": 0}
    }));
    let mut doc = original.clone();
    let patch =
        Patch::from_slice(br#"[{"op": "replace", "path": "/small/n", "value": 1}]"#).unwrap();
    patch.apply_to(&mut doc, &Default::default()).unwrap();

    assert_eq!(doc.get("big").unwrap().ownership(), Some(Ownership::Shared));
    assert_eq!(doc.get("small").unwrap().ownership(), Some(Ownership::Owned));
    assert_eq!(original.resolve(&p("/small/n")).unwrap(), &v(json!(0)));

    drop(original);
    assert_eq!(doc.get("big").unwrap().ownership(), Some(Ownership::Owned));
}

#[test]
fn test_failure_carries_diagnostics() {
    let mut doc = v(json!({"a": [1, 2]}));
    let patch = Patch::from_slice(br#"[{"op": "test", "path": "/a/1", "value": "2"}]"#).unwrap();
    match patch.apply_to(&mut doc, &Default::default()) {
        Err(JsonError::PatchTestFailed { path, expected, found }) => {
            assert_eq!(path, "/a/1");
            assert_eq!(expected, v(json!("2")));
            assert_eq!(found, Some(v(json!(2))));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn pretty_printed_result() {
    let patch = Patch::from_slice(br#"[{"op": "add", "path": "/b", "value": [1]}]"#).unwrap();
    let out = patch
        .apply_to_slice(br#"{"a": null}"#, &Default::default(), &JsonWriteOptions::pretty())
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n  \"a\": null,\n  \"b\": [\n    1\n  ]\n}"
    );
}
