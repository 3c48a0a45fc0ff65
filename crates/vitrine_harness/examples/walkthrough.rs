//! Scripted Walkthrough
//!
//! Drives the headless demo page through a short session touching most of
//! the widget set - stacked overlays peeled off with Escape, a filtered
//! combobox, a toast living out its lifetime, the meters counting up - and
//! prints the run report as JSON.
//!
//! Run with: cargo run -p vitrine_harness --example walkthrough

use anyhow::Result;

use vitrine_harness::{Scenario, Session};

const SCRIPT: &str = r#"{
    "name": "walkthrough",
    "steps": [
        { "type": "settle" },
        { "type": "click", "target": "dialog-open" },
        { "type": "settle" },
        { "type": "assert_displayed", "target": "dialog", "shown": true },
        { "type": "click", "target": "dropdown-trigger" },
        { "type": "settle" },
        { "type": "assert_open_overlays", "count": 2 },
        { "type": "key", "key": "escape" },
        { "type": "settle" },
        { "type": "key", "key": "escape" },
        { "type": "settle" },
        { "type": "assert_open_overlays", "count": 0 },
        { "type": "input", "target": "combobox-input", "text": "tom" },
        { "type": "settle" },
        { "type": "assert_child_count", "target": "combobox-options", "count": 1 },
        { "type": "click", "target": "elsewhere" },
        { "type": "settle" },
        { "type": "click", "target": "toast-trigger" },
        { "type": "assert_child_count", "target": "toasts", "count": 1 },
        { "type": "settle" },
        { "type": "assert_child_count", "target": "toasts", "count": 0 },
        { "type": "click", "target": "meters-reveal" },
        { "type": "settle" },
        { "type": "assert_text", "target": "meter-count", "equals": "1234" }
    ]
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut session = Session::demo()?;
    let scenario = Scenario::from_json(SCRIPT)?;
    let report = scenario.run(&mut session)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
