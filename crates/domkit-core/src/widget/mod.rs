//! Widget models.
//!
//! Each widget is a plain state machine over explicit events. The DOM layer
//! forwards browser events into these models and renders their state; none
//! of them touch the DOM themselves. Shared element bookkeeping lives in
//! [`WidgetBase`], which widgets hold by composition.

mod base;
mod button;
mod text_input;
mod tooltip;

pub use base::{WidgetBase, WidgetRegistry};
pub use button::{Button, ButtonKind, ButtonOptions, ButtonVisual};
pub use text_input::TextInput;
pub use tooltip::{
    FADE_DURATION, OFFSET_FROM_BOTTOM, OFFSET_FROM_CENTER, SHOW_OPACITY, Tooltip, TooltipEvent,
};
