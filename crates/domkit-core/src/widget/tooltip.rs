//! Hover tooltips with an optional display delay.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect};

use crate::config::TooltipConfig;
use crate::handlers::{Handler, HandlerCollection};
use crate::timer::{Scheduler, TimerSlot};

/// Vertical offset of the tooltip from the bottom of its target.
pub const OFFSET_FROM_BOTTOM: f64 = -10.0;
/// Horizontal offset of the tooltip from the centre of its target.
pub const OFFSET_FROM_CENTER: f64 = 0.0;
/// Opacity of a shown tooltip.
pub const SHOW_OPACITY: f64 = 0.8;
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// What the view should do with the tooltip element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipEvent {
    /// Fade in with the top-left corner at the given point.
    Show(Point),
    Hide,
}

/// Tooltip state for one target element.
pub struct Tooltip {
    display_delay: Duration,
    pending_show: TimerSlot,
    visible: Rc<Cell<bool>>,
    handlers: Rc<HandlerCollection<TooltipEvent>>,
}

impl Tooltip {
    pub fn new(config: &TooltipConfig, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            display_delay: config.display_delay(),
            pending_show: TimerSlot::new(scheduler),
            visible: Rc::new(Cell::new(false)),
            handlers: Rc::new(HandlerCollection::new()),
        }
    }

    /// Where the tooltip is shown for a target occupying `target`.
    pub fn show_position(target: Rect) -> Point {
        Point::new(
            target.x0 + target.width() / 2.0 + OFFSET_FROM_CENTER,
            target.y0 + target.height() + OFFSET_FROM_BOTTOM,
        )
    }

    pub fn on_event(&self, handler: Handler<TooltipEvent>) {
        self.handlers.add(handler);
    }

    pub fn remove_handler(&self, handler: &Handler<TooltipEvent>) {
        self.handlers.remove(handler);
    }

    /// The pointer entered the target. `target` reports the target's box and
    /// is read when the tooltip actually shows.
    ///
    /// Re-entering while a delayed show is pending shows the tooltip at once.
    pub fn pointer_enter(&self, target: impl Fn() -> Rect + 'static) {
        if self.pending_show.is_pending() {
            self.pending_show.cancel();
            self.show(Self::show_position(target()));
        } else if !self.display_delay.is_zero() {
            let visible = self.visible.clone();
            let handlers = self.handlers.clone();
            self.pending_show.start(self.display_delay, move || {
                visible.set(true);
                handlers.notify(TooltipEvent::Show(Self::show_position(target())));
            });
        } else {
            self.show(Self::show_position(target()));
        }
    }

    /// The pointer left the target: drop any pending show and fade out.
    pub fn pointer_leave(&self) {
        self.pending_show.cancel();
        self.visible.set(false);
        self.handlers.notify(TooltipEvent::Hide);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn is_show_pending(&self) -> bool {
        self.pending_show.is_pending()
    }

    fn show(&self, position: Point) {
        self.visible.set(true);
        self.handlers.notify(TooltipEvent::Show(position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::handler;
    use crate::timer::ManualScheduler;
    use std::cell::RefCell;

    fn target() -> Rect {
        Rect::from_origin_size((100.0, 200.0), (40.0, 30.0))
    }

    fn tooltip(delay_ms: u64) -> (Rc<ManualScheduler>, Tooltip, Rc<RefCell<Vec<TooltipEvent>>>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let tooltip = Tooltip::new(
            &TooltipConfig {
                display_delay_ms: delay_ms,
            },
            scheduler.clone(),
        );
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        tooltip.on_event(handler(move |e| sink.borrow_mut().push(e)));
        (scheduler, tooltip, events)
    }

    #[test]
    fn test_show_position_below_centre() {
        assert_eq!(Tooltip::show_position(target()), Point::new(120.0, 220.0));
    }

    #[test]
    fn test_no_delay_shows_immediately() {
        let (scheduler, tooltip, events) = tooltip(0);
        tooltip.pointer_enter(target);
        assert_eq!(*events.borrow(), vec![TooltipEvent::Show(Point::new(120.0, 220.0))]);
        assert!(tooltip.is_visible());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_delayed_show() {
        let (scheduler, tooltip, events) = tooltip(500);
        tooltip.pointer_enter(target);
        assert!(events.borrow().is_empty());
        assert!(tooltip.is_show_pending());

        scheduler.advance(Duration::from_millis(499));
        assert!(events.borrow().is_empty());
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*events.borrow(), vec![TooltipEvent::Show(Point::new(120.0, 220.0))]);
        assert!(tooltip.is_visible());
        assert!(!tooltip.is_show_pending());
    }

    #[test]
    fn test_delayed_show_reads_target_when_shown() {
        let (scheduler, tooltip, events) = tooltip(500);
        let target_box = Rc::new(Cell::new(target()));
        let current = target_box.clone();
        tooltip.pointer_enter(move || current.get());

        target_box.set(Rect::from_origin_size((300.0, 400.0), (40.0, 30.0)));
        scheduler.advance(Duration::from_millis(500));
        assert_eq!(*events.borrow(), vec![TooltipEvent::Show(Point::new(320.0, 420.0))]);
    }

    #[test]
    fn test_leave_cancels_pending_show() {
        let (scheduler, tooltip, events) = tooltip(500);
        tooltip.pointer_enter(target);
        scheduler.advance(Duration::from_millis(200));
        tooltip.pointer_leave();
        scheduler.advance(Duration::from_secs(1));

        assert_eq!(*events.borrow(), vec![TooltipEvent::Hide]);
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_reenter_while_pending_shows_now() {
        let (scheduler, tooltip, events) = tooltip(500);
        tooltip.pointer_enter(target);
        scheduler.advance(Duration::from_millis(100));
        tooltip.pointer_enter(target);

        assert_eq!(events.borrow().len(), 1);
        assert!(!tooltip.is_show_pending());
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_drop_cancels_pending_show() {
        let (scheduler, tooltip, events) = tooltip(500);
        tooltip.pointer_enter(target);
        drop(tooltip);
        scheduler.advance(Duration::from_secs(1));
        assert!(events.borrow().is_empty());
    }
}
