//! Headless demo page
//!
//! [`Session`] builds the demo markup in a [`MemoryDom`], mounts every widget
//! on a [`Page`], and exposes the verbs a script needs: click, type, press a
//! key, advance the clock. Probes resolve elements by id so a failed lookup
//! names the element instead of a slotmap key.
//!
//! The page is the same one the widgets' own tests bind to piece by piece,
//! assembled whole so cross-widget behavior (overlay stacking, outside
//! clicks landing on another widget's trigger) gets exercised for real.

use anyhow::{Context, Result};

use vitrine_animation::TweenScheduler;
use vitrine_core::dom::{Bounds, DomTree, ElementId, MemoryDom, ViewNode};
use vitrine_core::events::{Event, KeyCode};
use vitrine_widgets::widgets::{
    CheckboxConfig, Checkboxes, Combobox, ComboboxConfig, Dialog, DialogConfig, Disclosure,
    DisclosureConfig, Dropdown, DropdownConfig, IconButtons, IconButtonsConfig, Listbox,
    ListboxConfig, Meters, MetersConfig, Popover, PopoverConfig, RadioConfig, RadioGroup, Scenes,
    ScenesConfig, Tabs, TabsConfig, ToastConfig, ToastHost,
};
use vitrine_widgets::Page;

/// Clock step used by [`Session::settle`]
const FRAME_MS: f32 = 16.0;

/// Upper bound on how long [`Session::settle`] keeps stepping. The longest
/// chain on the page is a toast lifetime plus its exit, well under this.
const MAX_SETTLE_MS: f32 = 60_000.0;

/// The whole demo page, headless
pub struct Session {
    pub dom: MemoryDom,
    pub sched: TweenScheduler,
    pub page: Page,
}

impl Session {
    /// Build the demo markup and mount every widget on it. The radio group
    /// plays its entrance at mount, so the clock is not idle on return; call
    /// [`settle`](Self::settle) first when a test wants a quiet baseline.
    pub fn demo() -> Result<Self> {
        let mut dom = demo_dom();
        let mut sched = TweenScheduler::new();
        let mut page = Page::new();

        page.mount(|id| Dropdown::mount(&mut dom, id, DropdownConfig::default()))
            .context("mounting dropdown")?;
        page.mount(|id| Listbox::mount(&mut dom, id, ListboxConfig::default()))
            .context("mounting listbox")?;
        page.mount(|id| Combobox::mount(&mut dom, id, ComboboxConfig::default()))
            .context("mounting combobox")?;
        page.mount(|id| Dialog::mount(&mut dom, id, DialogConfig::default()))
            .context("mounting dialog")?;
        page.mount(|id| Popover::mount(&mut dom, id, PopoverConfig::default()))
            .context("mounting popover")?;
        page.mount(|_| Disclosure::mount(&mut dom, DisclosureConfig::default()))
            .context("mounting disclosure")?;
        page.mount(|_| Tabs::mount(&mut dom, TabsConfig::default()))
            .context("mounting tabs")?;

        let scenes = Scenes::mount(&mut dom, ScenesConfig::default())?
            .context("mounting scenes")?;
        page.mount(move |_| Some(scenes));
        let buttons = IconButtons::mount(&mut dom, IconButtonsConfig::default())?
            .context("mounting icon buttons")?;
        page.mount(move |_| Some(buttons));
        let meters = Meters::mount(&mut dom, MetersConfig::default())?
            .context("mounting meters")?;
        page.mount(move |_| Some(meters));

        page.mount(|_| Checkboxes::mount(&mut dom, CheckboxConfig::default()))
            .context("mounting checkboxes")?;
        page.mount(|_| RadioGroup::mount(&mut dom, &mut sched, RadioConfig::default()))
            .context("mounting radio group")?;
        page.mount(|_| ToastHost::mount(&mut dom, ToastConfig::default()))
            .context("mounting toast host")?;

        Ok(Self { dom, sched, page })
    }

    /// Resolve an element by id
    pub fn element(&self, id: &str) -> Result<ElementId> {
        self.dom
            .element_by_id(id)
            .with_context(|| format!("no element with id '{id}'"))
    }

    pub fn click(&mut self, id: &str) -> Result<()> {
        let target = self.element(id)?;
        self.click_element(target);
        Ok(())
    }

    /// Click an element found some other way, a rendered row for instance
    pub fn click_element(&mut self, target: ElementId) {
        let mut event = Event::click(target);
        self.page.dispatch(&mut event, &mut self.dom, &mut self.sched);
    }

    pub fn key(&mut self, key: KeyCode) {
        let mut event = Event::key_down(None, key);
        self.page.dispatch(&mut event, &mut self.dom, &mut self.sched);
    }

    pub fn input(&mut self, id: &str, text: &str) -> Result<()> {
        let target = self.element(id)?;
        let mut event = Event::text_input(target, text);
        self.page.dispatch(&mut event, &mut self.dom, &mut self.sched);
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let mut event = Event::resize(width, height);
        self.page.dispatch(&mut event, &mut self.dom, &mut self.sched);
    }

    /// Advance the clock once
    pub fn tick(&mut self, ms: f32) {
        self.page.tick(ms, &mut self.dom, &mut self.sched);
    }

    /// Step the clock a frame at a time until every tween has landed, and
    /// return the time that took. Chained stages keep it running: a toast's
    /// exit only starts when its lifetime finishes, and both are waited out.
    pub fn settle(&mut self) -> f32 {
        let mut spent = 0.0;
        while !self.sched.is_idle() && spent < MAX_SETTLE_MS {
            self.tick(FRAME_MS);
            spent += FRAME_MS;
        }
        spent
    }

    pub fn idle(&self) -> bool {
        self.sched.is_idle()
    }

    pub fn open_overlays(&self) -> usize {
        self.page.open_overlays()
    }

    /// Text of an element; empty when it has none
    pub fn text(&self, id: &str) -> Result<String> {
        let el = self.element(id)?;
        Ok(self.dom.text(el).unwrap_or_default())
    }

    pub fn has_class(&self, id: &str, class: &str) -> Result<bool> {
        let el = self.element(id)?;
        Ok(self.dom.has_class(el, class))
    }

    pub fn displayed(&self, id: &str) -> Result<bool> {
        let el = self.element(id)?;
        Ok(self.dom.is_displayed(el))
    }

    pub fn child_count(&self, id: &str) -> Result<usize> {
        let el = self.element(id)?;
        Ok(self.dom.children(el).len())
    }

    /// First descendant of `parent` carrying exactly `text`. Rendered rows
    /// have no ids, so tests reach them by their visible label.
    pub fn find_by_text(&self, parent: ElementId, text: &str) -> Option<ElementId> {
        let mut stack = self.dom.children(parent);
        while let Some(el) = stack.pop() {
            if self.dom.text(el).as_deref() == Some(text) {
                return Some(el);
            }
            stack.extend(self.dom.children(el));
        }
        None
    }

    /// First descendant of `parent` with attribute `name` equal to `value`
    pub fn find_by_attr(&self, parent: ElementId, name: &str, value: &str) -> Option<ElementId> {
        let mut stack = self.dom.children(parent);
        while let Some(el) = stack.pop() {
            if self.dom.attr(el, name).as_deref() == Some(value) {
                return Some(el);
            }
            stack.extend(self.dom.children(el));
        }
        None
    }
}

/// The demo markup every widget's default config binds to
pub fn demo_dom() -> MemoryDom {
    let mut dom = MemoryDom::build(&[
        ViewNode::new("div").id("dropdown").child(
            ViewNode::new("button")
                .id("dropdown-trigger")
                .text("Options")
                .child(ViewNode::new("span").id("dropdown-chevron")),
        ).child(
            ViewNode::new("ul")
                .id("dropdown-menu")
                .child(ViewNode::new("li").id("menu-item-1").text("Account settings"))
                .child(ViewNode::new("li").id("menu-item-2").text("Support"))
                .child(ViewNode::new("li").id("menu-item-3").text("Sign out")),
        ),
        ViewNode::new("div").id("listbox").child(
            ViewNode::new("button")
                .id("listbox-button")
                .child(ViewNode::new("span").id("listbox-label")),
        ).child(ViewNode::new("ul").id("listbox-options")),
        ViewNode::new("div")
            .id("combobox")
            .child(ViewNode::new("input").id("combobox-input"))
            .child(ViewNode::new("button").id("combobox-button"))
            .child(ViewNode::new("ul").id("combobox-options")),
        ViewNode::new("button").id("dialog-open").text("Open dialog"),
        ViewNode::new("div").id("dialog").child(
            ViewNode::new("div").id("dialog-backdrop"),
        ).child(
            ViewNode::new("div")
                .id("dialog-card")
                .child(ViewNode::new("button").id("dialog-close").text("Got it")),
        ),
        ViewNode::new("div")
            .id("popover")
            .child(ViewNode::new("button").id("popover-trigger").text("Solutions"))
            .child(
                ViewNode::new("div")
                    .id("popover-panel")
                    .child(ViewNode::new("div").id("popover-glow")),
            ),
        disclosure_section("disclosure-1", "What is your refund policy?"),
        disclosure_section("disclosure-2", "Do you offer technical support?"),
        ViewNode::new("nav")
            .child(ViewNode::new("button").id("tab-1").text("Recent"))
            .child(ViewNode::new("button").id("tab-2").text("Popular"))
            .child(ViewNode::new("button").id("tab-3").text("Trending")),
        ViewNode::new("div").id("tab-panel-1"),
        ViewNode::new("div").id("tab-panel-2"),
        ViewNode::new("div").id("tab-panel-3"),
        ViewNode::new("section")
            .id("scenes")
            .child(ViewNode::new("div").id("scene-1"))
            .child(ViewNode::new("div").id("scene-2").attr("data-transition", "tilt"))
            .child(ViewNode::new("div").id("scene-3").attr("data-transition", "ripple"))
            .child(ViewNode::new("div").id("scene-4").attr("data-transition", "expand")),
        ViewNode::new("div")
            .id("scene-dots")
            .child(ViewNode::new("button").id("dot-1"))
            .child(ViewNode::new("button").id("dot-2"))
            .child(ViewNode::new("button").id("dot-3"))
            .child(ViewNode::new("button").id("dot-4")),
        ViewNode::new("button").id("scenes-next"),
        ViewNode::new("button").id("scenes-prev"),
        fx_button("fx-button-1", "bounce"),
        fx_button("fx-button-2", "spin"),
        fx_button("fx-button-3", "vibrate"),
        fx_button("fx-button-4", "pop"),
        ViewNode::new("label").id("check-comments").text("Comments"),
        ViewNode::new("label")
            .id("check-candidates")
            .class("checked")
            .text("Candidates"),
        ViewNode::new("label").id("check-offers").text("Offers"),
        ViewNode::new("div").id("plans"),
        ViewNode::new("div").id("toasts"),
        ViewNode::new("button").id("toast-trigger").text("Save changes"),
        ViewNode::new("span")
            .id("meter-count")
            .attr("data-count", "1234")
            .text("0"),
        ViewNode::new("div").id("meter-bar").attr("data-value", "70"),
        ViewNode::new("circle")
            .id("meter-ring")
            .attr("data-percent", "75"),
        ViewNode::new("button").id("meters-reveal").text("Reveal"),
        ViewNode::new("div").id("elsewhere"),
    ]);

    // Geometry the layout engine would report on a live page.
    for stem in ["disclosure-1", "disclosure-2"] {
        if let Some(panel) = dom.element_by_id(&format!("{stem}-panel")) {
            dom.set_natural_height(panel, 120.0);
        }
    }
    if let Some(panel) = dom.element_by_id("popover-panel") {
        dom.set_bounds(
            panel,
            Bounds {
                x: 0.0,
                y: 0.0,
                width: 320.0,
                height: 200.0,
            },
        );
    }
    dom
}

fn disclosure_section(stem: &str, question: &str) -> ViewNode {
    ViewNode::new("div").id(stem).child(
        ViewNode::new("button")
            .id(format!("{stem}-trigger"))
            .text(question)
            .child(ViewNode::new("span").id(format!("{stem}-chevron"))),
    ).child(ViewNode::new("div").id(format!("{stem}-panel")))
}

fn fx_button(id: &str, anim: &str) -> ViewNode {
    ViewNode::new("button")
        .id(id)
        .attr("data-anim", anim)
        .child(ViewNode::new("span").id(format!("{id}-icon")))
}
