mod common;

use common::{load_patch_cases, v, PatchCase};
use json_delta::json_patch::{from_json_patch, ApplyPatchOptions, DecodeOptions};
use json_delta::{JsonError, Value};

fn run_case(case: &PatchCase) -> Result<Value, JsonError> {
    let patch = from_json_patch(&v(case.patch.clone()), &DecodeOptions::default())?;
    let mut doc = v(case.doc.clone());
    let result = patch.apply_to(&mut doc, &ApplyPatchOptions::default());
    if case.unchanged {
        assert_eq!(doc, v(case.doc.clone()), "{}: document changed", case.comment);
    }
    result.map(|_| doc)
}

#[test]
fn patch_cases_match_expectations() {
    let cases = load_patch_cases("patch_cases.json");
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let outcome = run_case(case);
        match (&case.expected, &case.error, outcome) {
            (Some(expected), None, Ok(doc)) if doc == v(expected.clone()) => {}
            (None, Some(code), Err(err)) if err.to_string().starts_with(code.as_str()) => {}
            (_, _, outcome) => failures.push(format!("{}: got {outcome:?}", case.comment)),
        }
    }
    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
}

#[test]
fn patch_cases_in_place_agree_on_success() {
    for case in load_patch_cases("patch_cases.json") {
        let Some(expected) = &case.expected else {
            continue;
        };
        let patch = from_json_patch(&v(case.patch.clone()), &DecodeOptions::default()).unwrap();
        let mut doc = v(case.doc.clone());
        patch.apply_to(&mut doc, &ApplyPatchOptions::mutate()).unwrap();
        assert_eq!(doc, v(expected.clone()), "{}", case.comment);
    }
}

#[test]
fn patch_cases_round_trip_through_text() {
    for case in load_patch_cases("patch_cases.json") {
        let Ok(patch) = from_json_patch(&v(case.patch.clone()), &DecodeOptions::default()) else {
            continue;
        };
        let text = serde_json::to_vec(&patch).unwrap();
        let reparsed = json_delta::Patch::from_slice(&text).unwrap();
        assert_eq!(reparsed, patch, "{}", case.comment);
    }
}
