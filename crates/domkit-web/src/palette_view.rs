//! DOM rendering of palettes.
//!
//! The palette is built from absolutely positioned divs appended to the
//! body:
//!
//! ```text
//! div.dk-palette
//! ├── div.dk-palette-menu-container
//! │   └── div.dk-palette-menu
//! │       └── (caller's menu element)
//! ├── div.dk-palette-anchor-border-{edge}
//! └── div.dk-palette-anchor-{edge}
//! ```
//!
//! Hiding collapses every part onto the anchor point and lets the CSS
//! transition animate it.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use domkit_core::config::PaletteConfig;
use domkit_core::geometry::{Edge, Range};
use domkit_core::handlers::{Handler, handler};
use domkit_core::palette::{Palette, PaletteLayout, PaletteSurface, SizingMeasurements};
use domkit_core::timer::Scheduler;
use kurbo::{Point, Rect, Size};
use web_sys::{Document, HtmlElement};

use crate::css;
use crate::dom::{self, Listeners};
use crate::error::{ViewError, ViewResult};

/// The DOM elements making up one palette.
pub struct DomPaletteSurface {
    sibling: HtmlElement,
    root: HtmlElement,
    menu_container: HtmlElement,
    menu_frame: HtmlElement,
    anchor: HtmlElement,
    anchor_border: HtmlElement,
    menu: HtmlElement,
    popup_edge: Edge,
}

impl DomPaletteSurface {
    /// Build the palette elements around `menu`, detaching it from where it
    /// currently sits in the page.
    pub fn build(
        document: &Document,
        sibling: HtmlElement,
        menu: HtmlElement,
        popup_edge: Edge,
    ) -> ViewResult<Self> {
        if menu.parent_node().is_some() {
            menu.remove();
        }

        let body = document
            .body()
            .ok_or_else(|| ViewError::Dom("document has no body".into()))?;

        let root = dom::create_div(document, &[css::PALETTE, css::APPEAR_TRANSITION])?;
        body.append_child(&root)?;

        let menu_container = dom::create_div(
            document,
            &[css::PALETTE_MENU_CONTAINER, css::APPEAR_TRANSITION],
        )?;
        root.append_child(&menu_container)?;

        let menu_frame = dom::create_div(document, &[css::PALETTE_MENU, css::APPEAR_TRANSITION])?;
        menu_container.append_child(&menu_frame)?;
        menu_frame.append_child(&menu)?;

        let anchor_border_class = css::anchor_border_class(popup_edge);
        let anchor_border = dom::create_div(document, &[anchor_border_class.as_str(), css::APPEAR_TRANSITION])?;
        root.append_child(&anchor_border)?;

        let anchor_class = css::anchor_class(popup_edge);
        let anchor = dom::create_div(document, &[anchor_class.as_str(), css::APPEAR_TRANSITION])?;
        root.append_child(&anchor)?;

        Ok(Self {
            sibling,
            root,
            menu_container,
            menu_frame,
            anchor,
            anchor_border,
            menu,
            popup_edge,
        })
    }

    /// Outer size of the menu, margins included. Only accurate once the
    /// menu is attached to the document.
    pub fn content_size(&self) -> Size {
        let rect = self.menu.get_bounding_client_rect();
        let horizontal = dom::computed_px(&self.menu, "margin-left")
            + dom::computed_px(&self.menu, "margin-right");
        let vertical = dom::computed_px(&self.menu, "margin-top")
            + dom::computed_px(&self.menu, "margin-bottom");
        Size::new(rect.width() + horizontal, rect.height() + vertical)
    }

    /// Read the connector, border and padding sizes from the stylesheet.
    pub fn measurements(&self) -> SizingMeasurements {
        SizingMeasurements {
            anchor_height: dom::computed_px(&self.anchor, &css::anchor_height_property(self.popup_edge)),
            border_width: dom::computed_px(&self.menu_container, "border-top-width"),
            menu_container_padding: dom::computed_px(&self.menu_container, "padding-top"),
        }
    }

    /// The caller's menu element.
    pub fn menu(&self) -> &HtmlElement {
        &self.menu
    }

    /// Remove the palette from the page.
    pub fn remove(&self) {
        self.root.remove();
    }

    fn set_transition(&self, on: bool) {
        for element in [&self.root, &self.anchor, &self.anchor_border] {
            dom::set_class(element, css::APPEAR_TRANSITION, on);
        }
    }

    fn set_menu_visibility(element: &HtmlElement, hidden: bool) {
        for child in dom::html_children(element) {
            Self::set_menu_visibility(&child, hidden);
        }
        if dom::has_class(element, css::NO_TRANSITION) {
            return;
        }

        let (add, remove) = if hidden {
            (css::DISAPPEAR_TRANSITION, css::APPEAR_TRANSITION)
        } else {
            (css::APPEAR_TRANSITION, css::DISAPPEAR_TRANSITION)
        };
        dom::set_class(element, add, true);
        dom::set_class(element, remove, false);

        let styles: Vec<(&str, String)> = css::MENU_HIDE_STYLES
            .iter()
            .map(|(property, value)| (*property, if hidden { value.to_string() } else { String::new() }))
            .collect();
        dom::set_styles(element, &styles);
    }
}

fn box_styles(origin: Point, size: Size) -> Vec<(&'static str, String)> {
    vec![
        ("top", css::px(origin.y)),
        ("left", css::px(origin.x)),
        ("width", css::px(size.width)),
        ("height", css::px(size.height)),
        ("border-width", String::new()),
        ("padding", String::new()),
    ]
}

fn collapsed_styles() -> Vec<(&'static str, String)> {
    ["top", "left", "width", "height", "border-width", "padding"]
        .into_iter()
        .map(|property| (property, "0".to_string()))
        .collect()
}

impl PaletteSurface for DomPaletteSurface {
    fn sibling_box(&self) -> Rect {
        dom::document_rect(&self.sibling)
    }

    fn show(&mut self, layout: &PaletteLayout) {
        self.set_transition(true);

        dom::set_styles(&self.root, &box_styles(layout.palette_offset, layout.palette_dimensions()));

        for (element, offset) in [
            (&self.anchor, layout.relative_anchor_offset()),
            (&self.anchor_border, layout.relative_anchor_border_offset()),
        ] {
            dom::set_styles(
                element,
                &[
                    ("top", css::px(offset.y)),
                    ("left", css::px(offset.x)),
                    ("border-width", String::new()),
                    ("padding", String::new()),
                ],
            );
        }

        dom::set_styles(
            &self.menu_container,
            &box_styles(layout.menu_container_offset(), layout.content),
        );
        let padding = layout.sizing.menu_container_padding;
        dom::set_styles(&self.menu_frame, &box_styles(Point::new(padding, padding), layout.content));

        Self::set_menu_visibility(&self.menu, false);
    }

    fn hide(&mut self, layout: &PaletteLayout) {
        self.set_transition(true);

        dom::set_styles(&self.root, &box_styles(layout.anchor_position, Size::ZERO)[..4]);
        let collapsed = collapsed_styles();
        for element in [&self.anchor, &self.anchor_border, &self.menu_container, &self.menu_frame] {
            dom::set_styles(element, &collapsed);
        }

        Self::set_menu_visibility(&self.menu, true);
    }

    fn shift(&mut self, layout: &PaletteLayout, visible: bool) {
        dom::set_class(&self.root, css::APPEAR_TRANSITION, false);
        if !visible {
            dom::set_position(&self.root, layout.anchor_position);
            return;
        }

        dom::set_position(&self.root, layout.palette_offset);
        dom::set_class(&self.anchor, css::APPEAR_TRANSITION, false);
        dom::set_position(&self.anchor, layout.relative_anchor_offset());
        dom::set_class(&self.anchor_border, css::APPEAR_TRANSITION, false);
        dom::set_position(&self.anchor_border, layout.relative_anchor_border_offset());
    }
}

/// A palette bound to page elements and to window resizes.
///
/// Every method may be called from a visibility handler while the palette
/// is notifying: reads use state cached outside the palette and mutations
/// report [`ViewError::Reentrant`] instead of panicking.
pub struct DomPalette {
    palette: Rc<RefCell<Palette<DomPaletteSurface>>>,
    visible: Rc<Cell<bool>>,
    menu: HtmlElement,
    _listeners: Listeners,
}

impl DomPalette {
    /// Attach the element `menu_id` as a palette hanging from `sibling_id`.
    pub fn new(
        sibling_id: &str,
        menu_id: &str,
        config: &PaletteConfig,
        scheduler: Rc<dyn Scheduler>,
    ) -> ViewResult<Self> {
        let window = dom::window()?;
        let document = dom::document()?;
        let sibling = dom::html_element_by_id(sibling_id)?;
        let menu = dom::html_element_by_id(menu_id)?;

        let surface = DomPaletteSurface::build(&document, sibling, menu.clone(), config.sibling_edge.opposite())?;
        // Sizes are only meaningful once the menu is in the document.
        let content = surface.content_size();
        let measurements = surface.measurements();
        let palette = Palette::new(surface, config, measurements, content, scheduler)?;

        let visible = Rc::new(Cell::new(palette.is_visible()));
        // Registered first, so it runs before any caller handler.
        {
            let visible = visible.clone();
            palette.on_visible_changed(handler(move |v| visible.set(v)));
        }
        let palette = Rc::new(RefCell::new(palette));

        let mut listeners = Listeners::new(window);
        let weak = Rc::downgrade(&palette);
        listeners.listen("resize", move |_| {
            let Some(palette) = weak.upgrade() else {
                return;
            };
            let Ok(mut palette) = palette.try_borrow_mut() else {
                return;
            };
            if let Err(err) = palette.on_viewport_resize() {
                log::warn!("palette resize failed: {}", err);
            }
        })?;

        log::debug!("palette attached to #{} as {}", sibling_id, menu_id);
        Ok(Self {
            palette,
            visible,
            menu,
            _listeners: listeners,
        })
    }

    /// Like [`new`](Self::new), with the config given as JSON.
    pub fn from_json(
        sibling_id: &str,
        menu_id: &str,
        config: &str,
        scheduler: Rc<dyn Scheduler>,
    ) -> ViewResult<Self> {
        let config = PaletteConfig::from_json(config)?;
        Self::new(sibling_id, menu_id, &config, scheduler)
    }

    pub fn set_visible(&self, visible: bool) -> ViewResult<()> {
        self.palette_mut()?.set_visible(visible)?;
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn bound(&self, range: Range) -> ViewResult<()> {
        self.palette_mut()?.bound(range)?;
        Ok(())
    }

    pub fn on_visible_changed(&self, handler: Handler<bool>) -> ViewResult<()> {
        self.palette_ref()?.on_visible_changed(handler);
        Ok(())
    }

    pub fn on_visible_changed_delayed(&self, handler: Handler<bool>) -> ViewResult<()> {
        self.palette_ref()?.on_visible_changed_delayed(handler);
        Ok(())
    }

    pub fn remove_visible_changed_handler(&self, handler: &Handler<bool>) -> ViewResult<()> {
        self.palette_ref()?.remove_visible_changed_handler(handler);
        Ok(())
    }

    pub fn remove_delayed_handler(&self, handler: &Handler<bool>) -> ViewResult<()> {
        self.palette_ref()?.remove_delayed_handler(handler);
        Ok(())
    }

    /// The caller's menu element, now inside the palette.
    pub fn menu_element(&self) -> &HtmlElement {
        &self.menu
    }

    pub fn palette(&self) -> &Rc<RefCell<Palette<DomPaletteSurface>>> {
        &self.palette
    }

    /// Cancel pending notifications and remove the palette from the page.
    pub fn destroy(self) -> ViewResult<()> {
        let mut palette = self.palette_mut()?;
        palette.teardown();
        palette.surface().remove();
        Ok(())
    }

    fn palette_ref(&self) -> ViewResult<Ref<'_, Palette<DomPaletteSurface>>> {
        self.palette.try_borrow().map_err(|_| ViewError::Reentrant)
    }

    fn palette_mut(&self) -> ViewResult<RefMut<'_, Palette<DomPaletteSurface>>> {
        self.palette.try_borrow_mut().map_err(|_| ViewError::Reentrant)
    }
}
