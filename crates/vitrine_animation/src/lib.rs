//! Vitrine Animation System
//!
//! Cancellable tweens, timelines, and stagger timing on a deterministic
//! clock.
//!
//! # Features
//!
//! - **Tweens**: two-endpoint visual interpolation with easing, repeat, yoyo
//! - **Timelines**: several tweens grouped under one cancellable handle
//! - **Strict kill semantics**: a killed tween never fires its completion
//! - **External clock**: `tick(dt)` driven, so tests control time exactly

pub mod easing;
pub mod engine;
pub mod presets;
pub mod scheduler;
pub mod stagger;
pub mod timeline;
pub mod tween;

pub use easing::Easing;
pub use engine::TweenEngine;
pub use presets::{Motion, MotionPreset};
pub use scheduler::{TweenId, TweenScheduler};
pub use stagger::{Stagger, StaggerDirection};
pub use timeline::{timeline, TimelineSpec, TimelineStep};
pub use tween::{tween, CompleteFn, Tween, TweenSpec, UpdateFn};
