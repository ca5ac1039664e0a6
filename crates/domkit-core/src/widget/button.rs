//! Push and toggle buttons.

use std::cell::Cell;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::base::WidgetBase;
use crate::handlers::{Handler, HandlerCollection};
use crate::selection::Toggleable;
use crate::touch::{TouchClickCanceller, locations_match};

/// Whether a button keeps an on/off state between clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    #[default]
    Standard,
    Toggleable,
}

/// How a button is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonOptions {
    pub kind: ButtonKind,
    /// Borderless styling.
    pub flat: bool,
    /// Initial toggled state; ignored for standard buttons.
    pub active: bool,
}

/// The state the view reflects as styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonVisual {
    pub pressed: bool,
    pub active: bool,
    pub disabled: bool,
}

/// A button driven by pointer and touch events.
///
/// A press followed by a release is a click. Releasing a toggleable button
/// flips its state before click handlers are called with the new state.
pub struct Button {
    base: WidgetBase,
    kind: ButtonKind,
    flat: bool,
    toggled: Cell<bool>,
    pointer_down: Cell<bool>,
    disabled: Cell<bool>,
    touch_origin: Cell<Option<Point>>,
    click_handlers: HandlerCollection<bool>,
}

impl Button {
    pub fn new(id: impl Into<String>, options: ButtonOptions, canceller: Option<TouchClickCanceller>) -> Self {
        let toggleable = options.kind == ButtonKind::Toggleable;
        Self {
            base: WidgetBase::new(id, canceller),
            kind: options.kind,
            flat: options.flat,
            toggled: Cell::new(toggleable && options.active),
            pointer_down: Cell::new(false),
            disabled: Cell::new(false),
            touch_origin: Cell::new(None),
            click_handlers: HandlerCollection::new(),
        }
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn is_flat(&self) -> bool {
        self.flat
    }

    /// Register a handler called with the toggled state after every click.
    pub fn add_click_handler(&self, handler: Handler<bool>) {
        self.click_handlers.add(handler);
    }

    pub fn remove_click_handler(&self, handler: &Handler<bool>) {
        self.click_handlers.remove(handler);
    }

    /// Mouse down or touch start.
    pub fn press(&self) {
        if self.disabled.get() {
            return;
        }
        self.pointer_down.set(true);
    }

    /// Mouse up, or a touch that ended where it started.
    pub fn release(&self) {
        if self.disabled.get() {
            return;
        }
        if self.kind == ButtonKind::Toggleable {
            self.toggled.set(!self.toggled.get());
        }
        self.pointer_down.set(false);
        self.click_handlers.notify(self.toggled.get());
    }

    /// The pointer left the button.
    pub fn leave(&self) {
        if self.disabled.get() {
            return;
        }
        self.pointer_down.set(false);
    }

    /// Press and release programmatically.
    pub fn click(&self) {
        self.press();
        self.release();
    }

    /// Touch start; the first point is the touch origin.
    pub fn touch_start(&self, points: &[Point]) {
        self.base.record_touch_start(points);
        self.touch_origin.set(points.first().copied());
        self.press();
    }

    /// Touch end at `point`. A touch that wandered away from its origin
    /// counts as leaving rather than clicking.
    pub fn touch_end(&self, point: Point) {
        match self.touch_origin.take() {
            Some(origin) if locations_match(origin, point) => self.release(),
            _ => self.leave(),
        }
    }

    pub fn enable(&self) {
        self.disabled.set(false);
    }

    /// Ignore every interaction until re-enabled.
    pub fn disable(&self) {
        self.disabled.set(true);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn is_pressed(&self) -> bool {
        self.pointer_down.get()
    }

    pub fn visual(&self) -> ButtonVisual {
        ButtonVisual {
            pressed: self.pointer_down.get(),
            active: self.toggled.get(),
            disabled: self.disabled.get(),
        }
    }

    /// Drop all click handlers and release the click canceller.
    pub fn destroy(&self) {
        self.click_handlers.clear();
        self.base.destroy();
    }
}

impl Toggleable for Button {
    fn is_toggleable(&self) -> bool {
        self.kind == ButtonKind::Toggleable
    }

    fn state(&self) -> bool {
        self.is_toggleable() && self.toggled.get()
    }

    fn set_state(&self, state: bool) {
        if self.is_toggleable() && self.toggled.get() != state {
            self.click();
        }
    }

    fn add_state_handler(&self, handler: Handler<bool>) {
        self.add_click_handler(handler);
    }

    fn remove_state_handler(&self, handler: &Handler<bool>) {
        self.remove_click_handler(handler);
    }
}
