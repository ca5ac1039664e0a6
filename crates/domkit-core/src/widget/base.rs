//! Shared element bookkeeping and the per-element widget registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::Point;

use crate::touch::TouchClickCanceller;

/// State common to every widget bound to a page element.
#[derive(Clone)]
pub struct WidgetBase {
    /// Id of the element the widget is bound to.
    id: String,
    canceller: RefCell<Option<TouchClickCanceller>>,
}

impl WidgetBase {
    /// Bind to element `id`. Passing a canceller makes the widget suppress
    /// clicks generated by touches.
    pub fn new(id: impl Into<String>, canceller: Option<TouchClickCanceller>) -> Self {
        Self {
            id: id.into(),
            canceller: RefCell::new(canceller),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the widget cancels clicks generated by touch events.
    pub fn cancels_touch_generated_clicks(&self) -> bool {
        self.canceller.borrow().is_some()
    }

    /// Record a touchstart with the click canceller, if any.
    pub fn record_touch_start(&self, points: &[Point]) {
        if let Some(canceller) = self.canceller.borrow().as_ref() {
            canceller.on_touch_start(points);
        }
    }

    /// Whether a mouse event at `point` should be swallowed.
    pub fn should_cancel_click(&self, point: Point) -> bool {
        self.canceller
            .borrow()
            .as_ref()
            .is_some_and(|c| c.should_cancel_click(point))
    }

    /// Release the click canceller.
    pub fn destroy(&self) {
        self.canceller.borrow_mut().take();
    }
}

/// Widgets keyed by element id, so binding the same element twice yields
/// the same instance.
pub struct WidgetRegistry<W> {
    widgets: RefCell<HashMap<String, Rc<W>>>,
}

impl<W> Default for WidgetRegistry<W> {
    fn default() -> Self {
        Self {
            widgets: RefCell::new(HashMap::new()),
        }
    }
}

impl<W> WidgetRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the widget bound to `id`, creating it with `create` if absent.
    pub fn get_or_create(&self, id: &str, create: impl FnOnce() -> W) -> Rc<W> {
        if let Some(existing) = self.get(id) {
            return existing;
        }
        let widget = Rc::new(create());
        self.widgets
            .borrow_mut()
            .insert(id.to_string(), widget.clone());
        widget
    }

    pub fn get(&self, id: &str) -> Option<Rc<W>> {
        self.widgets.borrow().get(id).cloned()
    }

    /// Unbind the widget for `id`.
    pub fn remove(&self, id: &str) -> Option<Rc<W>> {
        self.widgets.borrow_mut().remove(id)
    }

    /// Unbind every widget.
    pub fn clear(&self) {
        self.widgets.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.widgets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.borrow().is_empty()
    }
}
