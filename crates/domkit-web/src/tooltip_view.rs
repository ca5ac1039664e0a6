//! Binds [`Tooltip`] models to page elements.

use std::rc::Rc;

use domkit_core::config::TooltipConfig;
use domkit_core::handlers::{Handler, handler};
use domkit_core::timer::Scheduler;
use domkit_core::widget::{FADE_DURATION, SHOW_OPACITY, Tooltip, TooltipEvent};
use web_sys::HtmlElement;

use crate::css;
use crate::dom::{self, Listeners};
use crate::error::{ViewError, ViewResult};

/// A tooltip element shown while the pointer hovers its parent.
pub struct DomTooltip {
    tooltip: Rc<Tooltip>,
    element: HtmlElement,
    render: Handler<TooltipEvent>,
    _listeners: Listeners,
}

impl DomTooltip {
    /// Bind the tooltip `element`. Its parent becomes the hover target and
    /// the tooltip itself moves to the end of the body so it can be
    /// positioned in document coordinates.
    pub fn attach(element: HtmlElement, config: &TooltipConfig, scheduler: Rc<dyn Scheduler>) -> ViewResult<Self> {
        let target = element
            .parent_element()
            .ok_or_else(|| ViewError::Dom("tooltip has no parent element".into()))?;
        let body = dom::document()?
            .body()
            .ok_or_else(|| ViewError::Dom("document has no body".into()))?;
        element.remove();
        body.append_child(&element)?;
        dom::set_class(&element, css::TOOLTIP, true);
        dom::set_styles(
            &element,
            &[
                ("position", "absolute".to_string()),
                ("opacity", "0".to_string()),
                ("pointer-events", "none".to_string()),
                ("transition", format!("opacity {}ms", FADE_DURATION.as_millis())),
            ],
        );

        let tooltip = Rc::new(Tooltip::new(config, scheduler));
        let render = {
            let element = element.clone();
            handler(move |event| render(&element, event))
        };
        tooltip.on_event(render.clone());

        let mut listeners = Listeners::new(target.clone());
        {
            let (tooltip, target) = (tooltip.clone(), target.clone());
            listeners.listen("mouseenter", move |_| {
                let target = target.clone();
                tooltip.pointer_enter(move || dom::document_rect(&target));
            })?;
        }
        {
            let tooltip = tooltip.clone();
            listeners.listen("mouseleave", move |_| tooltip.pointer_leave())?;
        }

        Ok(Self {
            tooltip,
            element,
            render,
            _listeners: listeners,
        })
    }

    pub fn tooltip(&self) -> &Rc<Tooltip> {
        &self.tooltip
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl Drop for DomTooltip {
    fn drop(&mut self) {
        self.tooltip.remove_handler(&self.render);
    }
}

fn render(element: &HtmlElement, event: TooltipEvent) {
    match event {
        TooltipEvent::Show(position) => {
            dom::set_position(element, position);
            dom::set_styles(element, &[("opacity", SHOW_OPACITY.to_string())]);
        }
        TooltipEvent::Hide => dom::set_styles(element, &[("opacity", "0".to_string())]),
    }
}
