//! Animated meters
//!
//! Count-up counters, filling progress bars, and ring gauges. Targets come
//! from `data-count`, `data-value`, and `data-percent`; everything animates
//! from zero when revealed. Counters write their text on every update tick,
//! snapped to whole numbers. Rings map their percentage onto a stroke dash
//! offset over a fixed circumference, the usual SVG ring trick.
//!
//! `data-speed` on an individual meter divides its durations.

use tracing::debug;

use vitrine_animation::{tween, Easing};
use vitrine_core::config::DataAttrs;
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::error::{ConfigError, Result};
use vitrine_core::events::{event_types, Event};
use vitrine_core::Visual;

use crate::page::{Ui, Widget};

#[derive(Clone, Debug)]
pub struct MetersConfig {
    pub counters: Vec<String>,
    pub bars: Vec<String>,
    pub rings: Vec<String>,
    /// Button that reveals every meter at once
    pub trigger: Option<String>,
    /// Dash length of a full ring, in SVG user units
    pub ring_circumference: f32,
}

impl Default for MetersConfig {
    fn default() -> Self {
        Self {
            counters: vec!["meter-count".into()],
            bars: vec!["meter-bar".into()],
            rings: vec!["meter-ring".into()],
            trigger: Some("meters-reveal".into()),
            ring_circumference: 283.0,
        }
    }
}

#[derive(Debug)]
struct Counter {
    element: ElementId,
    target: f32,
    speed: f32,
}

#[derive(Debug)]
struct Bar {
    element: ElementId,
    value: f32,
    speed: f32,
}

#[derive(Debug)]
struct Ring {
    element: ElementId,
    percent: f32,
    speed: f32,
}

#[derive(Debug)]
pub struct Meters {
    counters: Vec<Counter>,
    bars: Vec<Bar>,
    rings: Vec<Ring>,
    trigger: Option<ElementId>,
    circumference: f32,
}

fn read_speed(attrs: &DataAttrs<'_>) -> Result<f32> {
    let speed = attrs.number_or("speed", 1.0)?;
    if speed <= 0.0 {
        return Err(ConfigError::InvalidAttribute {
            attr: "data-speed".into(),
            value: speed.to_string(),
            expected: "a speed greater than zero",
        });
    }
    Ok(speed)
}

fn read_percentage(attrs: &DataAttrs<'_>, name: &str) -> Result<f32> {
    let value = attrs.number_or(name, 0.0)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::InvalidAttribute {
            attr: format!("data-{name}"),
            value: value.to_string(),
            expected: "a percentage from 0 to 100",
        });
    }
    Ok(value)
}

impl Meters {
    /// Bind to existing markup and read every meter's target value
    pub fn mount(dom: &mut dyn DomTree, config: MetersConfig) -> Result<Option<Self>> {
        let mut counters = Vec::new();
        for id in &config.counters {
            let Some(element) = dom.element_by_id(id) else {
                debug!(id = %id, "counter missing, skipped");
                continue;
            };
            let attrs = DataAttrs::new(dom, element);
            let target = attrs.number_or("count", 0.0)?;
            if target < 0.0 {
                return Err(ConfigError::InvalidAttribute {
                    attr: "data-count".into(),
                    value: target.to_string(),
                    expected: "a non-negative count",
                });
            }
            let speed = read_speed(&attrs)?;
            counters.push(Counter {
                element,
                target,
                speed,
            });
        }

        let mut bars = Vec::new();
        for id in &config.bars {
            let Some(element) = dom.element_by_id(id) else {
                debug!(id = %id, "bar missing, skipped");
                continue;
            };
            let attrs = DataAttrs::new(dom, element);
            let value = read_percentage(&attrs, "value")?;
            let speed = read_speed(&attrs)?;
            bars.push(Bar {
                element,
                value,
                speed,
            });
        }

        let mut rings = Vec::new();
        for id in &config.rings {
            let Some(element) = dom.element_by_id(id) else {
                debug!(id = %id, "ring missing, skipped");
                continue;
            };
            let attrs = DataAttrs::new(dom, element);
            let percent = read_percentage(&attrs, "percent")?;
            let speed = read_speed(&attrs)?;
            rings.push(Ring {
                element,
                percent,
                speed,
            });
        }

        if counters.is_empty() && bars.is_empty() && rings.is_empty() {
            debug!("no meters found, widget not mounted");
            return Ok(None);
        }
        let trigger = config.trigger.as_deref().and_then(|id| dom.element_by_id(id));
        Ok(Some(Self {
            counters,
            bars,
            rings,
            trigger,
            circumference: config.ring_circumference,
        }))
    }

    fn reveal(&mut self, ui: &mut Ui<'_>) {
        debug!("meters revealed");
        for counter in &self.counters {
            let element = counter.element;
            let target = counter.target;
            ui.anim.kill_tweens_of(element);
            let spec = tween(Visual::opacity(1.0))
                .duration(2000.0)
                .ease(Easing::QuadOut)
                .speed(counter.speed)
                .on_update(move |dom, progress| {
                    let eased = Easing::QuadOut.apply(progress);
                    let value = (target * eased).round() as i64;
                    dom.set_text(element, &value.to_string());
                });
            ui.anim.from_to(ui.dom, element, Visual::opacity(0.0), spec);
        }
        for bar in &self.bars {
            ui.anim.kill_tweens_of(bar.element);
            let spec = tween(Visual::default().with_width_pct(bar.value))
                .duration(1500.0)
                .ease(Easing::CubicOut)
                .speed(bar.speed);
            ui.anim
                .from_to(ui.dom, bar.element, Visual::default().with_width_pct(0.0), spec);
        }
        for ring in &self.rings {
            ui.anim.kill_tweens_of(ring.element);
            let offset = self.circumference * (1.0 - ring.percent / 100.0);
            let spec = tween(Visual::default().with_dash_offset(offset))
                .duration(1500.0)
                .ease(Easing::CubicOut)
                .speed(ring.speed);
            ui.anim.from_to(
                ui.dom,
                ring.element,
                Visual::default().with_dash_offset(self.circumference),
                spec,
            );
        }
    }
}

impl Widget for Meters {
    fn name(&self) -> &'static str {
        "meters"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        if self.trigger.is_some_and(|t| ui.dom.contains(t, target)) {
            self.reveal(ui);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OverlayRegistry;
    use vitrine_animation::{TweenEngine, TweenScheduler};
    use vitrine_core::dom::{MemoryDom, ViewNode};

    fn markup() -> MemoryDom {
        MemoryDom::build(&[
            ViewNode::new("span")
                .id("meter-count")
                .attr("data-count", "1234")
                .text("0"),
            ViewNode::new("div").id("meter-bar").attr("data-value", "70"),
            ViewNode::new("circle")
                .id("meter-ring")
                .attr("data-percent", "75"),
            ViewNode::new("button").id("meters-reveal"),
        ])
    }

    struct Fixture {
        dom: MemoryDom,
        sched: TweenScheduler,
        overlays: OverlayRegistry,
        meters: Meters,
    }

    impl Fixture {
        fn with_dom(mut dom: MemoryDom) -> Self {
            let meters = Meters::mount(&mut dom, MetersConfig::default())
                .unwrap()
                .unwrap();
            Self {
                dom,
                sched: TweenScheduler::new(),
                overlays: OverlayRegistry::new(),
                meters,
            }
        }

        fn new() -> Self {
            Self::with_dom(markup())
        }

        fn reveal(&mut self) {
            let target = self.dom.element_by_id("meters-reveal").unwrap();
            let mut event = Event::click(target);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            self.meters.handle_event(&mut event, &mut ui);
        }

        fn tick(&mut self, ms: f32) {
            self.sched.tick(ms, &mut self.dom);
        }

        fn text_of(&self, id: &str) -> Option<String> {
            let el = self.dom.element_by_id(id).unwrap();
            self.dom.text(el)
        }
    }

    #[test]
    fn counter_counts_up_to_its_target() {
        let mut fx = Fixture::new();
        fx.reveal();

        fx.tick(1000.0);
        assert_eq!(fx.text_of("meter-count").as_deref(), Some("926"));

        fx.tick(1000.0);
        assert_eq!(fx.text_of("meter-count").as_deref(), Some("1234"));
        let counter = fx.dom.element_by_id("meter-count").unwrap();
        assert_eq!(fx.dom.visual(counter).opacity, Some(1.0));
    }

    #[test]
    fn bar_fills_from_zero_to_its_value() {
        let mut fx = Fixture::new();
        let bar = fx.dom.element_by_id("meter-bar").unwrap();
        fx.reveal();
        assert_eq!(fx.dom.visual(bar).width_pct, Some(0.0));

        fx.tick(1500.0);
        assert_eq!(fx.dom.visual(bar).width_pct, Some(70.0));
    }

    #[test]
    fn ring_maps_percent_onto_the_dash_offset() {
        let mut fx = Fixture::new();
        let ring = fx.dom.element_by_id("meter-ring").unwrap();
        fx.reveal();
        assert_eq!(fx.dom.visual(ring).dash_offset, Some(283.0));

        fx.tick(1500.0);
        assert_eq!(fx.dom.visual(ring).dash_offset, Some(70.75));
    }

    #[test]
    fn per_meter_speed_divides_the_duration() {
        let mut dom = MemoryDom::build(&[
            ViewNode::new("span")
                .id("meter-count")
                .attr("data-count", "100")
                .attr("data-speed", "2"),
            ViewNode::new("button").id("meters-reveal"),
        ]);
        let meters = Meters::mount(&mut dom, MetersConfig::default())
            .unwrap()
            .unwrap();
        let mut fx = Fixture {
            dom,
            sched: TweenScheduler::new(),
            overlays: OverlayRegistry::new(),
            meters,
        };
        fx.reveal();
        fx.tick(1000.0);
        assert_eq!(fx.text_of("meter-count").as_deref(), Some("100"));
        assert!(fx.sched.is_idle());
    }

    #[test]
    fn re_reveal_restarts_cleanly() {
        let mut fx = Fixture::new();
        fx.reveal();
        fx.tick(700.0);
        fx.reveal();
        assert_eq!(fx.sched.active_count(), 3, "one tween per meter");
    }

    #[test]
    fn malformed_count_is_a_config_error() {
        let mut dom =
            MemoryDom::build(&[ViewNode::new("span").id("meter-count").attr("data-count", "lots")]);
        let err = Meters::mount(&mut dom, MetersConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAttribute {
                attr: "data-count".into(),
                value: "lots".into(),
                expected: "a number",
            }
        );
    }

    #[test]
    fn nan_never_reaches_an_animated_property() {
        let mut dom =
            MemoryDom::build(&[ViewNode::new("div").id("meter-bar").attr("data-value", "NaN")]);
        let err = Meters::mount(&mut dom, MetersConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonFinite {
                attr: "data-value".into()
            }
        );
    }

    #[test]
    fn out_of_range_percent_is_rejected() {
        let mut dom = MemoryDom::build(&[ViewNode::new("circle")
            .id("meter-ring")
            .attr("data-percent", "140")]);
        let err = Meters::mount(&mut dom, MetersConfig::default()).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidAttribute { attr, .. } if attr == "data-percent")
        );
    }

    #[test]
    fn mount_without_any_meters_is_none() {
        let mut dom = MemoryDom::build(&[ViewNode::new("div").id("unrelated")]);
        assert!(Meters::mount(&mut dom, MetersConfig::default())
            .unwrap()
            .is_none());
    }
}
