//! Tween scheduler
//!
//! Owns every active tween and advances them on an externally driven clock.
//! `tick(dt)` samples each track, merges the results into the tree, fires
//! update and completion callbacks, and reports which handles finished so the
//! widget layer can settle its state machines.
//!
//! Determinism matters here: the clock only moves when the caller moves it,
//! which is what lets tests step an animation to its exact end.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::debug;

use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::visual::Visual;

use crate::engine::TweenEngine;
use crate::timeline::TimelineSpec;
use crate::tween::{CompleteFn, Tween, TweenSpec, UpdateFn};

new_key_type! {
    /// Handle to a scheduled tween or timeline
    pub struct TweenId;
}

struct Track {
    target: ElementId,
    tween: Tween,
    offset_ms: f32,
}

impl Track {
    fn end_ms(&self) -> f32 {
        self.offset_ms + self.tween.total_duration_ms()
    }
}

struct Entry {
    tracks: SmallVec<[Track; 2]>,
    elapsed_ms: f32,
    end_ms: f32,
    on_complete: Option<CompleteFn>,
    on_update: Option<UpdateFn>,
}

/// The in-tree [`TweenEngine`]: slotmap-backed, tick-driven
pub struct TweenScheduler {
    entries: SlotMap<TweenId, Entry>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    /// Number of live tweens and timelines
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_single(
        &mut self,
        target: ElementId,
        from: Visual,
        spec: TweenSpec,
    ) -> TweenId {
        let (tween, delay_ms, on_complete, on_update) = spec.into_tween(from);
        let track = Track {
            target,
            tween,
            offset_ms: delay_ms,
        };
        let end_ms = track.end_ms();
        let mut tracks: SmallVec<[Track; 2]> = SmallVec::new();
        tracks.push(track);
        self.entries.insert(Entry {
            tracks,
            elapsed_ms: 0.0,
            end_ms,
            on_complete,
            on_update,
        })
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenEngine for TweenScheduler {
    /// Advance all tweens by `dt_ms` and apply their samples to `dom`
    ///
    /// Finished handles are reported after their completion callbacks have
    /// run, so callers can route them with the tree already settled.
    fn tick(&mut self, dt_ms: f32, dom: &mut dyn DomTree) -> SmallVec<[TweenId; 4]> {
        let mut finished: SmallVec<[TweenId; 4]> = SmallVec::new();

        for (id, entry) in self.entries.iter_mut() {
            entry.elapsed_ms += dt_ms;

            for track in &entry.tracks {
                let local = entry.elapsed_ms - track.offset_ms;
                if local < 0.0 {
                    continue;
                }
                dom.merge_visual(track.target, &track.tween.sample(local));
            }

            if let Some(update) = entry.on_update.as_mut() {
                let progress = if entry.end_ms > 0.0 {
                    (entry.elapsed_ms / entry.end_ms).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                update(dom, progress);
            }

            if entry.elapsed_ms >= entry.end_ms {
                finished.push(id);
            }
        }

        for &id in &finished {
            if let Some(entry) = self.entries.remove(id) {
                if let Some(complete) = entry.on_complete {
                    complete(dom);
                }
            }
        }

        finished
    }

    fn to(&mut self, dom: &dyn DomTree, target: ElementId, spec: TweenSpec) -> TweenId {
        let from = dom.visual(target).baseline(&spec.to);
        self.insert_single(target, from, spec)
    }

    fn from_to(
        &mut self,
        dom: &mut dyn DomTree,
        target: ElementId,
        from: Visual,
        spec: TweenSpec,
    ) -> TweenId {
        dom.merge_visual(target, &from);
        self.insert_single(target, from, spec)
    }

    fn set(&mut self, dom: &mut dyn DomTree, target: ElementId, props: &Visual) {
        dom.merge_visual(target, props);
    }

    fn timeline(&mut self, dom: &mut dyn DomTree, spec: TimelineSpec) -> TweenId {
        let mut tracks: SmallVec<[Track; 2]> = SmallVec::new();
        for step in spec.steps {
            let from = match step.from {
                Some(from) => {
                    dom.merge_visual(step.target, &from);
                    from
                }
                None => dom.visual(step.target).baseline(&step.to),
            };
            tracks.push(Track {
                target: step.target,
                tween: Tween::new(from, step.to, step.duration_ms).ease(step.easing),
                offset_ms: step.offset_ms,
            });
        }
        let end_ms = tracks.iter().map(Track::end_ms).fold(0.0, f32::max);
        self.entries.insert(Entry {
            tracks,
            elapsed_ms: 0.0,
            end_ms,
            on_complete: spec.on_complete,
            on_update: spec.on_update,
        })
    }

    fn kill(&mut self, id: TweenId) {
        if self.entries.remove(id).is_some() {
            debug!(?id, "tween killed");
        }
    }

    fn kill_tweens_of(&mut self, target: ElementId) {
        let doomed: Vec<TweenId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.tracks.iter().any(|t| t.target == target))
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            self.entries.remove(id);
            debug!(?id, "tween killed by target");
        }
    }

    fn is_active(&self, id: TweenId) -> bool {
        self.entries.contains_key(id)
    }
}
