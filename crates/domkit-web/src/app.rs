//! The application root owning the services widgets share.

use std::rc::Rc;

use domkit_core::config::{PaletteConfig, TooltipConfig};
use domkit_core::error::SelectionResult;
use domkit_core::selection::RadioGroup;
use domkit_core::timer::{Scheduler, SystemClock};
use domkit_core::touch::TouchRegistry;
use domkit_core::widget::WidgetRegistry;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

use crate::button_view::DomButton;
use crate::css;
use crate::dom;
use crate::error::{ViewError, ViewResult};
use crate::palette_view::DomPalette;
use crate::scheduler::BrowserScheduler;
use crate::text_input_view::DomTextInput;
use crate::tooltip_view::DomTooltip;

/// Creates widgets and keeps them bound, one instance per element id.
///
/// Every widget created here shares one [`TouchRegistry`], so a touch on
/// one element cancels the synthetic click landing on a neighbour.
pub struct Domkit {
    touch: Rc<TouchRegistry>,
    scheduler: Rc<dyn Scheduler>,
    buttons: WidgetRegistry<DomButton>,
    text_inputs: WidgetRegistry<DomTextInput>,
    tooltips: WidgetRegistry<DomTooltip>,
}

impl Domkit {
    pub fn new() -> ViewResult<Self> {
        let window = dom::window()?;
        Ok(Self {
            touch: Rc::new(TouchRegistry::new(Rc::new(SystemClock::new()))),
            scheduler: Rc::new(BrowserScheduler::new(window)),
            buttons: WidgetRegistry::new(),
            text_inputs: WidgetRegistry::new(),
            tooltips: WidgetRegistry::new(),
        })
    }

    pub fn touch_registry(&self) -> &Rc<TouchRegistry> {
        &self.touch
    }

    /// Bind the button with element id `id`, or return the existing binding.
    pub fn button(&self, id: &str) -> ViewResult<Rc<DomButton>> {
        if let Some(existing) = self.buttons.get(id) {
            return Ok(existing);
        }
        let button = DomButton::attach(dom::html_element_by_id(id)?, Some(self.touch.clone()))?;
        Ok(self.buttons.get_or_create(id, || button))
    }

    /// Bind every element carrying one of the button classes.
    pub fn create_all_buttons(&self) -> ViewResult<Vec<Rc<DomButton>>> {
        let mut buttons = Vec::new();
        for class in [
            css::BUTTON,
            css::FLAT_BUTTON,
            css::TOGGLEABLE_BUTTON,
            css::FLAT_TOGGLEABLE_BUTTON,
        ] {
            for element in elements_with_class(class)? {
                let id = element_id(&element)?;
                if buttons.iter().any(|b: &Rc<DomButton>| b.button().base().id() == id) {
                    continue;
                }
                buttons.push(self.button(&id)?);
            }
        }
        Ok(buttons)
    }

    pub fn text_input(&self, id: &str) -> ViewResult<Rc<DomTextInput>> {
        if let Some(existing) = self.text_inputs.get(id) {
            return Ok(existing);
        }
        let element = dom::html_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| ViewError::Dom(format!("#{} is not an input element", id)))?;
        let input = DomTextInput::attach(element, Some(self.touch.clone()))?;
        Ok(self.text_inputs.get_or_create(id, || input))
    }

    pub fn create_all_text_inputs(&self) -> ViewResult<Vec<Rc<DomTextInput>>> {
        elements_with_class(css::TEXT_INPUT)?
            .iter()
            .map(|element| self.text_input(&element_id(element)?))
            .collect()
    }

    pub fn tooltip(&self, id: &str, config: &TooltipConfig) -> ViewResult<Rc<DomTooltip>> {
        if let Some(existing) = self.tooltips.get(id) {
            return Ok(existing);
        }
        let tooltip = DomTooltip::attach(dom::html_element_by_id(id)?, config, self.scheduler.clone())?;
        Ok(self.tooltips.get_or_create(id, || tooltip))
    }

    pub fn create_all_tooltips(&self, config: &TooltipConfig) -> ViewResult<Vec<Rc<DomTooltip>>> {
        elements_with_class(css::TOOLTIP)?
            .iter()
            .map(|element| self.tooltip(&element_id(element)?, config))
            .collect()
    }

    /// Attach the element `menu_id` as a palette hanging from `sibling_id`.
    pub fn palette(&self, sibling_id: &str, menu_id: &str, config: &PaletteConfig) -> ViewResult<DomPalette> {
        DomPalette::new(sibling_id, menu_id, config, self.scheduler.clone())
    }

    /// Group bound buttons so at most one of them is active.
    pub fn radio_group(&self, buttons: &[Rc<DomButton>], initial: Option<usize>) -> SelectionResult<RadioGroup> {
        RadioGroup::new(buttons.iter().map(|b| b.toggleable()).collect(), initial)
    }

    /// Unbind every widget and forget recorded touches.
    pub fn teardown(&self) {
        self.buttons.clear();
        self.text_inputs.clear();
        self.tooltips.clear();
        self.touch.clear();
    }
}

fn elements_with_class(class: &str) -> ViewResult<Vec<HtmlElement>> {
    let collection = dom::document()?.get_elements_by_class_name(class);
    Ok((0..collection.length())
        .filter_map(|i| collection.item(i))
        .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Widgets are keyed by element id, so bulk creation needs ids.
fn element_id(element: &HtmlElement) -> ViewResult<String> {
    let id = element.id();
    if id.is_empty() {
        return Err(ViewError::MissingElement(format!(
            "(element with classes \"{}\" has no id)",
            element.class_name()
        )));
    }
    Ok(id)
}
