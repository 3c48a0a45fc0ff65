//! Vitrine Core
//!
//! This crate provides the foundational primitives for the Vitrine widget kit:
//!
//! - **Events**: input events with propagation and default-action control
//! - **Tree capability**: the [`DomTree`] trait widgets drive, plus the
//!   in-memory implementation used by tests and headless runs
//! - **Visual properties**: the sparse property bag tweens interpolate
//! - **Configuration**: `data-*` attribute parsing with typed errors
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::dom::{DomTree, MemoryDom, ViewNode};
//!
//! let mut dom = MemoryDom::new();
//! let root = dom.root();
//! let panel = dom.append_child(root, &ViewNode::new("div").id("menu"));
//!
//! assert_eq!(dom.element_by_id("menu"), Some(panel));
//! assert!(dom.contains(root, panel));
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod visual;

pub use config::DataAttrs;
pub use dom::{Bounds, DomTree, ElementId, MemoryDom, ViewNode};
pub use error::{ConfigError, Result};
pub use events::{Event, EventData, EventType, KeyCode, Modifiers};
pub use visual::Visual;
