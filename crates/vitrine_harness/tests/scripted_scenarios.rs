//! Scenario scripts end to end
//!
//! Assertion mismatches come back as failed reports naming the step;
//! a step that cannot run at all is a hard error.

use std::path::Path;

use vitrine_harness::{Scenario, Session};

#[test]
fn smoke_scenario_from_disk_passes() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/smoke.json");
    let scenario = Scenario::from_path(&path).unwrap();
    let mut session = Session::demo().unwrap();

    let report = scenario.run(&mut session).unwrap();
    assert!(!report.is_failed(), "{:?}", report.message);
    assert!(report.elapsed_ms > 0.0);
}

#[test]
fn meters_reveal_counts_up() {
    let scenario = Scenario::from_json(
        r#"{
            "name": "meters",
            "steps": [
                { "type": "settle" },
                { "type": "assert_text", "target": "meter-count", "equals": "0" },
                { "type": "click", "target": "meters-reveal" },
                { "type": "settle" },
                { "type": "assert_text", "target": "meter-count", "equals": "1234" }
            ]
        }"#,
    )
    .unwrap();
    let mut session = Session::demo().unwrap();

    let report = scenario.run(&mut session).unwrap();
    assert!(!report.is_failed(), "{:?}", report.message);
}

#[test]
fn tab_switch_walkthrough() {
    let scenario = Scenario::from_json(
        r#"{
            "name": "tabs",
            "steps": [
                { "type": "settle" },
                { "type": "assert_displayed", "target": "tab-panel-1", "shown": true },
                { "type": "click", "target": "tab-2" },
                { "type": "settle" },
                { "type": "assert_displayed", "target": "tab-panel-1", "shown": false },
                { "type": "assert_displayed", "target": "tab-panel-2", "shown": true },
                { "type": "assert_class", "target": "tab-2", "class": "active", "present": true },
                { "type": "assert_class", "target": "tab-1", "class": "active", "present": false }
            ]
        }"#,
    )
    .unwrap();
    let mut session = Session::demo().unwrap();

    let report = scenario.run(&mut session).unwrap();
    assert!(!report.is_failed(), "{:?}", report.message);
}

#[test]
fn assertion_failure_reports_the_step() {
    let scenario = Scenario::from_json(
        r#"{
            "name": "diverges",
            "steps": [
                { "type": "settle" },
                { "type": "assert_text", "target": "listbox-label", "equals": "Nobody" }
            ]
        }"#,
    )
    .unwrap();
    let mut session = Session::demo().unwrap();

    let report = scenario.run(&mut session).unwrap();
    assert!(report.is_failed());
    assert_eq!(report.failed_step, Some(1));
    let message = report.message.unwrap();
    assert!(message.contains("listbox-label"), "{message}");
}

#[test]
fn missing_element_is_a_hard_error() {
    let scenario = Scenario::from_json(
        r#"{
            "name": "broken",
            "steps": [ { "type": "click", "target": "no-such-element" } ]
        }"#,
    )
    .unwrap();
    let mut session = Session::demo().unwrap();

    let err = scenario.run(&mut session).unwrap_err();
    assert!(err.to_string().contains("step 0"), "{err}");
}
