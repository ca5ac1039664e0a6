//! Palette visibility state machine.
//!
//! A [`Palette`] owns the geometry inputs and drives a [`PaletteSurface`]
//! (the DOM view in the browser, a recorder in tests). Every transition
//! recomputes the layout because the sibling may have moved since the last
//! one. Subscribers come in two flavours:
//!
//! - immediate handlers, called synchronously with the new visibility;
//! - delayed handlers, called once the transition has finished animating.
//!
//! Only one delayed notification is ever pending; a new transition or
//! dropping the palette cancels it.

use std::rc::Rc;
use std::time::Duration;

use kurbo::{Rect, Size};

use super::geometry::{BoundsPolicy, PaletteLayout};
use super::sizing::{SizingCache, SizingMeasurements};
use crate::config::PaletteConfig;
use crate::error::PaletteResult;
use crate::geometry::{Edge, Range};
use crate::handlers::{Handler, HandlerCollection};
use crate::timer::{Scheduler, TimerSlot};

/// The rendering side of a palette.
pub trait PaletteSurface {
    /// Current bounding box of the sibling element, in document coordinates.
    fn sibling_box(&self) -> Rect;

    /// Expand the palette to `layout`.
    fn show(&mut self, layout: &PaletteLayout);

    /// Collapse the palette onto its anchor point.
    fn hide(&mut self, layout: &PaletteLayout);

    /// Move the palette to `layout` without a transition.
    fn shift(&mut self, layout: &PaletteLayout, visible: bool);
}

/// A popup menu anchored to a sibling element by a triangular connector.
pub struct Palette<S: PaletteSurface> {
    surface: S,
    sibling_edge: Edge,
    bounds: Range,
    policy: BoundsPolicy,
    transition: Duration,
    measurements: SizingMeasurements,
    content: Size,
    sizing: SizingCache,
    layout: PaletteLayout,
    visible: bool,
    visible_handlers: HandlerCollection<bool>,
    delayed_handlers: Rc<HandlerCollection<bool>>,
    delayed_timer: TimerSlot,
}

impl<S: PaletteSurface> Palette<S> {
    /// Create a palette and render its initial state. No handler is notified.
    pub fn new(
        surface: S,
        config: &PaletteConfig,
        measurements: SizingMeasurements,
        content: Size,
        scheduler: Rc<dyn Scheduler>,
    ) -> PaletteResult<Self> {
        let popup_edge = config.sibling_edge.opposite();
        let sizing = SizingCache::measure(measurements, content, popup_edge);
        let bounds = config.bounds()?;
        let layout = PaletteLayout::compute(
            surface.sibling_box(),
            config.sibling_edge,
            content,
            sizing,
            bounds,
            config.policy,
        )?;

        let mut palette = Self {
            surface,
            sibling_edge: config.sibling_edge,
            bounds,
            policy: config.policy,
            transition: config.transition(),
            measurements,
            content,
            sizing,
            layout,
            visible: config.visible,
            visible_handlers: HandlerCollection::new(),
            delayed_handlers: Rc::new(HandlerCollection::new()),
            delayed_timer: TimerSlot::new(scheduler),
        };

        if palette.visible {
            palette.surface.show(&palette.layout);
        } else {
            palette.surface.hide(&palette.layout);
        }
        Ok(palette)
    }

    /// Show or hide the palette. Requesting the current state does nothing.
    pub fn set_visible(&mut self, visible: bool) -> PaletteResult<()> {
        if visible == self.visible {
            return Ok(());
        }

        let layout = self.recompute()?;
        if visible {
            self.surface.show(&layout);
        } else {
            self.surface.hide(&layout);
        }
        self.visible = visible;
        log::debug!("palette on {} edge now {}", self.sibling_edge, if visible { "visible" } else { "hidden" });

        self.visible_handlers.notify(visible);

        let delayed = self.delayed_handlers.clone();
        self.delayed_timer
            .start(self.transition, move || delayed.notify(visible));
        Ok(())
    }

    pub fn show(&mut self) -> PaletteResult<()> {
        self.set_visible(true)
    }

    pub fn hide(&mut self) -> PaletteResult<()> {
        self.set_visible(false)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Recompute and reapply the layout after the viewport changed size.
    /// Visibility is unchanged and no handler is notified.
    pub fn on_viewport_resize(&mut self) -> PaletteResult<()> {
        let layout = self.recompute()?;
        self.surface.shift(&layout, self.visible);
        Ok(())
    }

    /// Replace the range the anchored edge must stay within.
    pub fn bound(&mut self, bounds: Range) -> PaletteResult<()> {
        let bounds = bounds.validated()?;
        let previous = std::mem::replace(&mut self.bounds, bounds);
        match self.recompute() {
            Ok(layout) => {
                self.surface.shift(&layout, self.visible);
                Ok(())
            }
            Err(err) => {
                self.bounds = previous;
                Err(err)
            }
        }
    }

    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Change the menu content size, re-measuring the palette.
    pub fn set_content_size(&mut self, content: Size) -> PaletteResult<()> {
        let popup_edge = self.sibling_edge.opposite();
        let sizing = SizingCache::measure(self.measurements, content, popup_edge);
        let layout = PaletteLayout::compute(
            self.surface.sibling_box(),
            self.sibling_edge,
            content,
            sizing,
            self.bounds,
            self.policy,
        )?;
        self.content = content;
        self.sizing = sizing;
        self.layout = layout;
        if self.visible {
            self.surface.show(&self.layout);
        }
        Ok(())
    }

    /// Register a handler called as soon as visibility changes.
    pub fn on_visible_changed(&self, handler: Handler<bool>) {
        self.visible_handlers.add(handler);
    }

    /// Register a handler called once the show/hide transition has finished.
    pub fn on_visible_changed_delayed(&self, handler: Handler<bool>) {
        self.delayed_handlers.add(handler);
    }

    pub fn remove_visible_changed_handler(&self, handler: &Handler<bool>) {
        self.visible_handlers.remove(handler);
    }

    pub fn remove_delayed_handler(&self, handler: &Handler<bool>) {
        self.delayed_handlers.remove(handler);
    }

    /// The most recently applied layout.
    pub fn layout(&self) -> &PaletteLayout {
        &self.layout
    }

    pub fn sizing(&self) -> &SizingCache {
        &self.sizing
    }

    pub fn sibling_edge(&self) -> Edge {
        self.sibling_edge
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Cancel any pending delayed notification and drop every handler.
    pub fn teardown(&mut self) {
        self.delayed_timer.cancel();
        self.visible_handlers.clear();
        self.delayed_handlers.clear();
    }

    fn recompute(&mut self) -> PaletteResult<PaletteLayout> {
        self.layout = PaletteLayout::compute(
            self.surface.sibling_box(),
            self.sibling_edge,
            self.content,
            self.sizing,
            self.bounds,
            self.policy,
        )?;
        Ok(self.layout)
    }
}
