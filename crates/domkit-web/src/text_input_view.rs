//! Binds [`TextInput`] models to input elements.

use std::rc::Rc;

use domkit_core::touch::{TouchClickCanceller, TouchRegistry};
use domkit_core::widget::TextInput;
use web_sys::HtmlInputElement;

use crate::css;
use crate::dom::{self, Listeners};
use crate::error::ViewResult;

pub struct DomTextInput {
    input: Rc<TextInput>,
    _listeners: Listeners,
}

impl DomTextInput {
    pub fn attach(element: HtmlInputElement, touch: Option<Rc<TouchRegistry>>) -> ViewResult<Self> {
        dom::set_class(&element, css::TEXT_INPUT, true);

        let canceller = touch
            .filter(|_| dom::supports_touch())
            .map(TouchClickCanceller::new);
        let input = Rc::new(TextInput::new(element.id(), canceller));

        let mut listeners = Listeners::new(element.clone());
        {
            let (input, element) = (input.clone(), element.clone());
            listeners.listen("focus", move |_| {
                let value = input.focus(&element.value());
                element.set_value(&value);
            })?;
        }

        if input.base().cancels_touch_generated_clicks() {
            {
                let input = input.clone();
                listeners.listen("touchstart", move |event| {
                    input.base().record_touch_start(&dom::touch_points(&event));
                })?;
            }
            for name in ["click", "mousedown", "mouseup"] {
                let input = input.clone();
                listeners.listen(name, move |event| {
                    let Some(point) = dom::mouse_point(&event) else {
                        return;
                    };
                    if input.base().should_cancel_click(point) {
                        event.stop_immediate_propagation();
                        event.stop_propagation();
                        event.prevent_default();
                    }
                })?;
            }
            {
                let (input, element) = (input.clone(), element.clone());
                listeners.listen("touchend", move |_| {
                    if input.focus_on_touch_end() {
                        if let Err(err) = element.focus() {
                            log::warn!("cannot focus text input: {:?}", err);
                        }
                    }
                })?;
            }
        }

        Ok(Self {
            input,
            _listeners: listeners,
        })
    }

    pub fn input(&self) -> &Rc<TextInput> {
        &self.input
    }
}

impl Drop for DomTextInput {
    fn drop(&mut self) {
        self.input.destroy();
    }
}
