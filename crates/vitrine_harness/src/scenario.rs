//! Scripted sessions
//!
//! A scenario is a JSON step list driven against a [`Session`]: inputs,
//! clock advances, and assertions on what the page shows. Broken scripts and
//! missing elements are hard errors; an assertion that does not hold is a
//! reported failure naming the step that diverged, so a runner can print
//! where a script went wrong instead of unwinding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vitrine_core::events::KeyCode;

use crate::session::Session;

/// A named step list, usually parsed from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Step>,
}

/// One scripted action or assertion
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Click the element with this id
    Click { target: String },
    /// Press an untargeted key: "enter", "escape", or "space"
    Key { key: String },
    /// Type into the element with this id
    Input { target: String, text: String },
    /// Advance the clock once
    Tick { ms: f32 },
    /// Step the clock until every tween has landed
    Settle,
    AssertText { target: String, equals: String },
    AssertClass { target: String, class: String, present: bool },
    AssertDisplayed { target: String, shown: bool },
    AssertOpenOverlays { count: usize },
    AssertChildCount { target: String, count: usize },
}

/// Run status for a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub scenario: String,
    pub status: RunStatus,
    /// Index of the assertion that diverged
    pub failed_step: Option<usize>,
    pub message: Option<String>,
    /// Clock time the script advanced
    pub elapsed_ms: f32,
}

impl RunReport {
    fn passed(scenario: &str, elapsed_ms: f32) -> Self {
        Self {
            scenario: scenario.to_string(),
            status: RunStatus::Passed,
            failed_step: None,
            message: None,
            elapsed_ms,
        }
    }

    fn failed(scenario: &str, step: usize, message: String, elapsed_ms: f32) -> Self {
        Self {
            scenario: scenario.to_string(),
            status: RunStatus::Failed,
            failed_step: Some(step),
            message: Some(message),
            elapsed_ms,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, RunStatus::Failed)
    }
}

impl Scenario {
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("parsing scenario JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_json(&input)
    }

    /// Drive every step against the session. Broken steps are `Err`; an
    /// assertion that does not hold stops the run with a failed report.
    pub fn run(&self, session: &mut Session) -> Result<RunReport> {
        let mut elapsed_ms = 0.0;
        for (index, step) in self.steps.iter().enumerate() {
            debug!(scenario = %self.name, index, ?step, "scenario step");
            let held = apply_step(session, step, &mut elapsed_ms)
                .with_context(|| format!("{}: step {index}", self.name))?;
            if let Some(message) = held {
                return Ok(RunReport::failed(&self.name, index, message, elapsed_ms));
            }
        }
        Ok(RunReport::passed(&self.name, elapsed_ms))
    }
}

/// `Ok(None)` when the step held, `Ok(Some(message))` for an assertion that
/// did not, `Err` when the step could not be carried out at all
fn apply_step(session: &mut Session, step: &Step, elapsed_ms: &mut f32) -> Result<Option<String>> {
    match step {
        Step::Click { target } => {
            session.click(target)?;
        }
        Step::Key { key } => {
            session.key(parse_key(key)?);
        }
        Step::Input { target, text } => {
            session.input(target, text)?;
        }
        Step::Tick { ms } => {
            session.tick(*ms);
            *elapsed_ms += *ms;
        }
        Step::Settle => {
            *elapsed_ms += session.settle();
        }
        Step::AssertText { target, equals } => {
            let found = session.text(target)?;
            if found != *equals {
                return Ok(Some(format!(
                    "text of '{target}' is {found:?}, expected {equals:?}"
                )));
            }
        }
        Step::AssertClass {
            target,
            class,
            present,
        } => {
            let has = session.has_class(target, class)?;
            if has != *present {
                return Ok(Some(format!(
                    "class '{class}' on '{target}' is {has}, expected {present}"
                )));
            }
        }
        Step::AssertDisplayed { target, shown } => {
            let displayed = session.displayed(target)?;
            if displayed != *shown {
                return Ok(Some(format!(
                    "'{target}' displayed is {displayed}, expected {shown}"
                )));
            }
        }
        Step::AssertOpenOverlays { count } => {
            let open = session.open_overlays();
            if open != *count {
                return Ok(Some(format!("{open} overlays open, expected {count}")));
            }
        }
        Step::AssertChildCount { target, count } => {
            let children = session.child_count(target)?;
            if children != *count {
                return Ok(Some(format!(
                    "'{target}' has {children} children, expected {count}"
                )));
            }
        }
    }
    Ok(None)
}

fn parse_key(name: &str) -> Result<KeyCode> {
    match name {
        "enter" => Ok(KeyCode::ENTER),
        "escape" => Ok(KeyCode::ESCAPE),
        "space" => Ok(KeyCode::SPACE),
        other => bail!("unknown key '{other}'; expected enter, escape, or space"),
    }
}
