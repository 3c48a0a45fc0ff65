//! Vitrine harness
//!
//! Headless driving of the whole demo page. [`Session`] builds the demo
//! markup over an in-memory tree and mounts every widget on one page;
//! [`Scenario`] replays a JSON step script against it and reports where the
//! script diverged. The widgets' own tests cover each widget in isolation;
//! this crate covers the page as a whole - overlay stacking, outside clicks
//! that land on another widget's trigger, scripted walkthroughs.
//!
//! ```ignore
//! let mut session = Session::demo()?;
//! let scenario = Scenario::from_path(Path::new("scenarios/smoke.json"))?;
//! let report = scenario.run(&mut session)?;
//! assert!(!report.is_failed());
//! ```

pub mod scenario;
pub mod session;

pub use scenario::{RunReport, RunStatus, Scenario, Step};
pub use session::{demo_dom, Session};
