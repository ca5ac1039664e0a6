//! Text inputs that clear themselves on focus.

use std::cell::RefCell;

use super::base::WidgetBase;
use crate::touch::TouchClickCanceller;

pub struct TextInput {
    base: WidgetBase,
    previous_value: RefCell<String>,
}

impl TextInput {
    pub fn new(id: impl Into<String>, canceller: Option<TouchClickCanceller>) -> Self {
        Self {
            base: WidgetBase::new(id, canceller),
            previous_value: RefCell::new(String::new()),
        }
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    /// The field gained focus while holding `current`. Returns the value the
    /// field should hold afterwards, which is always empty.
    pub fn focus(&self, current: &str) -> String {
        *self.previous_value.borrow_mut() = current.to_string();
        String::new()
    }

    /// Value the field held before it was last focused.
    pub fn previous_value(&self) -> String {
        self.previous_value.borrow().clone()
    }

    /// Whether a touch end should focus the field. Clicks generated by the
    /// touch are cancelled, so the field must be focused explicitly.
    pub fn focus_on_touch_end(&self) -> bool {
        self.base.cancels_touch_generated_clicks()
    }

    pub fn destroy(&self) {
        self.base.destroy();
    }
}
