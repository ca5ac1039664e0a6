//! Suppression of the synthetic clicks browsers emit after touches.
//!
//! Touch locations are recorded in a [`TouchRegistry`] shared by every
//! widget of an application, so a touch on one element also cancels the
//! delayed click landing on a neighbour. The registry is created by the
//! application root and handed to widgets explicitly.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Point;

use crate::expiration::ExpirationQueue;
use crate::timer::Clock;

/// How long a touch location keeps cancelling clicks.
pub const CLICK_DELAY: Duration = Duration::from_millis(1000);

/// Distance on each axis under which two locations count as the same spot.
pub const LOCATION_TOLERANCE: f64 = 20.0;

/// Whether two pointer locations are close enough to be the same gesture.
pub fn locations_match(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < LOCATION_TOLERANCE && (a.y - b.y).abs() < LOCATION_TOLERANCE
}

/// Recently touched locations, shared across widgets.
pub struct TouchRegistry {
    recent: RefCell<ExpirationQueue<Point>>,
}

impl TouchRegistry {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            recent: RefCell::new(ExpirationQueue::new(clock, CLICK_DELAY)),
        }
    }

    /// Remember the given touch points.
    pub fn record_touches(&self, points: &[Point]) {
        let mut recent = self.recent.borrow_mut();
        for point in points {
            recent.add(*point);
        }
    }

    /// Whether `point` is near a touch seen within the click delay.
    pub fn is_recent_touch(&self, point: Point) -> bool {
        self.recent
            .borrow_mut()
            .contains_by(|touched| locations_match(*touched, point))
    }

    /// Forget every recorded touch.
    pub fn clear(&self) {
        self.recent.borrow_mut().clear();
    }
}

/// Per-element handle onto the shared [`TouchRegistry`].
#[derive(Clone)]
pub struct TouchClickCanceller {
    registry: Rc<TouchRegistry>,
}

impl TouchClickCanceller {
    pub fn new(registry: Rc<TouchRegistry>) -> Self {
        Self { registry }
    }

    /// Record every point of a touchstart.
    pub fn on_touch_start(&self, points: &[Point]) {
        self.registry.record_touches(points);
    }

    /// Whether a click/mousedown/mouseup at `point` was generated by a recent
    /// touch and should be stopped.
    pub fn should_cancel_click(&self, point: Point) -> bool {
        let cancel = self.registry.is_recent_touch(point);
        if cancel {
            log::debug!("cancelling touch-generated click at ({}, {})", point.x, point.y);
        }
        cancel
    }

    pub fn registry(&self) -> &Rc<TouchRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    #[test]
    fn test_locations_match_within_tolerance() {
        let a = Point::new(100.0, 100.0);
        assert!(locations_match(a, Point::new(119.0, 81.0)));
        assert!(!locations_match(a, Point::new(120.0, 100.0)));
        assert!(!locations_match(a, Point::new(100.0, 79.0)));
    }

    #[test]
    fn test_click_after_touch_is_cancelled() {
        let clock = Rc::new(ManualScheduler::new());
        let registry = Rc::new(TouchRegistry::new(clock.clone()));
        let canceller = TouchClickCanceller::new(registry);

        canceller.on_touch_start(&[Point::new(50.0, 50.0)]);
        clock.advance(Duration::from_millis(300));
        assert!(canceller.should_cancel_click(Point::new(55.0, 48.0)));
        assert!(!canceller.should_cancel_click(Point::new(200.0, 50.0)));
    }

    #[test]
    fn test_touch_expires_after_click_delay() {
        let clock = Rc::new(ManualScheduler::new());
        let registry = Rc::new(TouchRegistry::new(clock.clone()));
        let canceller = TouchClickCanceller::new(registry);

        canceller.on_touch_start(&[Point::new(50.0, 50.0)]);
        clock.advance(CLICK_DELAY);
        assert!(!canceller.should_cancel_click(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_registry_is_shared_between_elements() {
        let clock = Rc::new(ManualScheduler::new());
        let registry = Rc::new(TouchRegistry::new(clock));
        let first = TouchClickCanceller::new(registry.clone());
        let second = TouchClickCanceller::new(registry);

        first.on_touch_start(&[Point::new(10.0, 10.0), Point::new(300.0, 300.0)]);
        assert!(second.should_cancel_click(Point::new(301.0, 299.0)));
    }

    #[test]
    fn test_clear_forgets_touches() {
        let clock = Rc::new(ManualScheduler::new());
        let registry = TouchRegistry::new(clock);
        registry.record_touches(&[Point::new(1.0, 1.0)]);
        registry.clear();
        assert!(!registry.is_recent_touch(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_isolated_registries_do_not_interfere() {
        let clock = Rc::new(ManualScheduler::new());
        let a = TouchClickCanceller::new(Rc::new(TouchRegistry::new(clock.clone())));
        let b = TouchClickCanceller::new(Rc::new(TouchRegistry::new(clock)));

        a.on_touch_start(&[Point::new(10.0, 10.0)]);
        assert!(!b.should_cancel_click(Point::new(10.0, 10.0)));
    }
}
