//! Binds [`Button`] models to page elements.

use std::rc::Rc;

use domkit_core::handlers::{Handler, handler};
use domkit_core::selection::Toggleable;
use domkit_core::touch::{TouchClickCanceller, TouchRegistry};
use domkit_core::widget::Button;
use web_sys::{Event, HtmlElement};

use crate::css;
use crate::dom::{self, Listeners};
use crate::error::ViewResult;

/// A button element driven by a [`Button`] model.
pub struct DomButton {
    button: Rc<Button>,
    element: HtmlElement,
    _listeners: Listeners,
}

impl DomButton {
    /// Bind `element`. Its classes decide the kind of button; elements with
    /// no button class become standard buttons. With a touch registry on a
    /// touch capable document, clicks generated by touches are cancelled.
    pub fn attach(element: HtmlElement, touch: Option<Rc<TouchRegistry>>) -> ViewResult<Self> {
        let classes = dom::class_names(&element);
        let options = css::button_options(classes.iter().map(String::as_str));
        if !css::has_button_class(classes.iter().map(String::as_str)) {
            dom::set_class(&element, css::BUTTON, true);
        }

        let canceller = touch
            .filter(|_| dom::supports_touch())
            .map(TouchClickCanceller::new);
        let cancels_clicks = canceller.is_some();
        let button = Rc::new(Button::new(element.id(), options, canceller));

        // Clicks may come from a radio group rather than this element's events.
        {
            let (weak, element) = (Rc::downgrade(&button), element.clone());
            button.add_click_handler(handler(move |_| {
                if let Some(button) = weak.upgrade() {
                    sync_classes(&button, &element);
                }
            }));
        }

        let mut listeners = Listeners::new(element.clone());
        {
            let (button, element) = (button.clone(), element.clone());
            listeners.listen("mousedown", move |event| {
                if !cancel_touch_click(&button, &event) {
                    button.press();
                    sync_classes(&button, &element);
                }
            })?;
        }
        {
            let (button, element) = (button.clone(), element.clone());
            listeners.listen("mouseup", move |event| {
                if !cancel_touch_click(&button, &event) {
                    button.release();
                    sync_classes(&button, &element);
                }
            })?;
        }
        {
            let (button, element) = (button.clone(), element.clone());
            listeners.listen("mouseleave", move |_| {
                button.leave();
                sync_classes(&button, &element);
            })?;
        }

        if cancels_clicks {
            {
                let button = button.clone();
                listeners.listen("click", move |event| {
                    cancel_touch_click(&button, &event);
                })?;
            }
            {
                let (button, element) = (button.clone(), element.clone());
                listeners.listen("touchstart", move |event| {
                    button.touch_start(&dom::touch_points(&event));
                    sync_classes(&button, &element);
                })?;
            }
            {
                let (button, element) = (button.clone(), element.clone());
                listeners.listen("touchend", move |event| {
                    match dom::changed_touch_point(&event) {
                        Some(point) => button.touch_end(point),
                        None => button.leave(),
                    }
                    sync_classes(&button, &element);
                })?;
            }
            {
                let (button, element) = (button.clone(), element.clone());
                listeners.listen("touchleave", move |_| {
                    button.leave();
                    sync_classes(&button, &element);
                })?;
            }
        }

        sync_classes(&button, &element);
        Ok(Self {
            button,
            element,
            _listeners: listeners,
        })
    }

    pub fn button(&self) -> &Rc<Button> {
        &self.button
    }

    /// The model as a radio group member.
    pub fn toggleable(&self) -> Rc<dyn Toggleable> {
        self.button.clone()
    }

    pub fn add_click_handler(&self, handler: Handler<bool>) {
        self.button.add_click_handler(handler);
    }

    pub fn remove_click_handler(&self, handler: &Handler<bool>) {
        self.button.remove_click_handler(handler);
    }

    /// Click programmatically, updating the element's classes.
    pub fn click(&self) {
        self.button.click();
        self.sync();
    }

    pub fn set_state(&self, state: bool) {
        self.button.set_state(state);
        self.sync();
    }

    pub fn enable(&self) {
        self.button.enable();
        self.sync();
    }

    pub fn disable(&self) {
        self.button.disable();
        self.sync();
    }

    fn sync(&self) {
        sync_classes(&self.button, &self.element);
    }
}

impl Drop for DomButton {
    fn drop(&mut self) {
        self.button.destroy();
    }
}

fn sync_classes(button: &Button, element: &HtmlElement) {
    for (class, on) in css::button_visual_classes(button.visual()) {
        dom::set_class(element, class, on);
    }
}

/// Swallow a mouse event generated by a recent touch. Returns whether it did.
fn cancel_touch_click(button: &Button, event: &Event) -> bool {
    let Some(point) = dom::mouse_point(event) else {
        return false;
    };
    if !button.base().should_cancel_click(point) {
        return false;
    }
    event.stop_immediate_propagation();
    event.stop_propagation();
    event.prevent_default();
    true
}
