//! Thin helpers over `web-sys` used by every view.

use kurbo::{Point, Rect};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::css;
use crate::error::{ViewError, ViewResult};

pub fn window() -> ViewResult<Window> {
    web_sys::window().ok_or(ViewError::NoWindow)
}

pub fn document() -> ViewResult<Document> {
    window()?.document().ok_or(ViewError::NoWindow)
}

/// Look up an element by id.
pub fn html_element_by_id(id: &str) -> ViewResult<HtmlElement> {
    document()?
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| ViewError::MissingElement(id.to_string()))
}

/// Create a `div` carrying `classes`.
pub fn create_div(document: &Document, classes: &[&str]) -> ViewResult<HtmlElement> {
    let div = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ViewError::Dom("created element is not an HtmlElement".into()))?;
    for class in classes {
        div.class_list().add_1(class)?;
    }
    Ok(div)
}

/// Whether touch events are supported by the document.
pub fn supports_touch() -> bool {
    document()
        .map(|d| js_sys::Reflect::has(&d, &"ontouchstart".into()).unwrap_or(false))
        .unwrap_or(false)
}

/// Border box of `element` in document coordinates.
pub fn document_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    let (scroll_x, scroll_y) = window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    Rect::from_origin_size(
        (rect.left() + scroll_x, rect.top() + scroll_y),
        (rect.width(), rect.height()),
    )
}

/// A computed style length, in whole pixels. Missing or unparsable values
/// read as zero.
pub fn computed_px(element: &Element, property: &str) -> f64 {
    let value = window()
        .ok()
        .and_then(|w| w.get_computed_style(element).ok().flatten())
        .and_then(|style| style.get_property_value(property).ok());
    match value.as_deref().and_then(css::parse_px) {
        Some(px) => px,
        None => {
            log::warn!("cannot read {} of element, assuming 0", property);
            0.0
        }
    }
}

/// Set inline styles, logging rather than failing on rejected values.
pub fn set_styles(element: &HtmlElement, styles: &[(&str, String)]) {
    let style = element.style();
    for (property, value) in styles {
        if let Err(err) = style.set_property(property, value) {
            log::warn!("cannot set {}: {:?}", property, err);
        }
    }
}

/// Position an absolutely positioned element.
pub fn set_position(element: &HtmlElement, position: Point) {
    set_styles(
        element,
        &[("top", css::px(position.y)), ("left", css::px(position.x))],
    );
}

/// Add or remove a class.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(err) = result {
        log::warn!("cannot toggle class {}: {:?}", class, err);
    }
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Every class on `element`.
pub fn class_names(element: &Element) -> Vec<String> {
    let list = element.class_list();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

/// Direct children of `element` that are HTML elements.
pub fn html_children(element: &Element) -> Vec<HtmlElement> {
    let children = element.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Client coordinates of a mouse event.
pub fn mouse_point(event: &Event) -> Option<Point> {
    event
        .dyn_ref::<web_sys::MouseEvent>()
        .map(|e| Point::new(e.client_x() as f64, e.client_y() as f64))
}

/// Client coordinates of every active touch of a touch event.
pub fn touch_points(event: &Event) -> Vec<Point> {
    let Some(event) = event.dyn_ref::<web_sys::TouchEvent>() else {
        return Vec::new();
    };
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

/// Client coordinates of the first touch that ended.
pub fn changed_touch_point(event: &Event) -> Option<Point> {
    event
        .dyn_ref::<web_sys::TouchEvent>()
        .and_then(|e| e.changed_touches().get(0))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
}

/// Event listeners registered on one target, removed on drop.
pub struct Listeners {
    target: EventTarget,
    // Keep closures alive while registered
    entries: Vec<(&'static str, Closure<dyn Fn(Event)>)>,
}

impl Listeners {
    pub fn new(target: impl Into<EventTarget>) -> Self {
        Self {
            target: target.into(),
            entries: Vec::new(),
        }
    }

    /// Register `f` for events of type `name`.
    pub fn listen(&mut self, name: &'static str, f: impl Fn(Event) + 'static) -> ViewResult<()> {
        let closure = Closure::wrap(Box::new(f) as Box<dyn Fn(Event)>);
        self.target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        self.entries.push((name, closure));
        Ok(())
    }

    /// Unregister every listener.
    pub fn clear(&mut self) {
        for (name, closure) in self.entries.drain(..) {
            self.target
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.clear();
    }
}
