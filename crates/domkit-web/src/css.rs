//! Class names and CSS value helpers shared by the views.

use domkit_core::geometry::Edge;
use domkit_core::widget::{ButtonKind, ButtonOptions, ButtonVisual};

pub const PALETTE: &str = "dk-palette";
pub const PALETTE_MENU_CONTAINER: &str = "dk-palette-menu-container";
pub const PALETTE_MENU: &str = "dk-palette-menu";
pub const APPEAR_TRANSITION: &str = "dk-palette-appear-transition";
pub const DISAPPEAR_TRANSITION: &str = "dk-palette-disappear-transition";
/// Menu elements carrying this class are never faded in or out.
pub const NO_TRANSITION: &str = "dk-palette-no-transition";

pub const BUTTON: &str = "dk-button";
pub const FLAT_BUTTON: &str = "dk-flat-button";
pub const TOGGLEABLE_BUTTON: &str = "dk-toggleable-button";
pub const FLAT_TOGGLEABLE_BUTTON: &str = "dk-flat-toggleable-button";
pub const ACTIVE_BUTTON: &str = "dk-active-button";
pub const PRESSED_BUTTON: &str = "dk-pressed-button";
pub const DISABLED: &str = "dk-disabled";

pub const TEXT_INPUT: &str = "dk-text-input";
pub const TOOLTIP: &str = "dk-tooltip";

/// Inline styles that collapse a menu element while the palette is hidden.
pub const MENU_HIDE_STYLES: [(&str, &str); 9] = [
    ("top", "0"),
    ("left", "0"),
    ("width", "0"),
    ("height", "0"),
    ("border-width", "0"),
    ("padding", "0"),
    ("margin", "0"),
    ("opacity", "0"),
    ("font-size", "0"),
];

/// Class of the filled connector for a palette anchored on `popup_edge`.
pub fn anchor_class(popup_edge: Edge) -> String {
    format!("dk-palette-anchor-{}", popup_edge)
}

/// Class of the connector's border triangle.
pub fn anchor_border_class(popup_edge: Edge) -> String {
    format!("dk-palette-anchor-border-{}", popup_edge)
}

/// Computed-style property holding the connector height: the border on the
/// side of the connector facing away from the palette body.
pub fn anchor_height_property(popup_edge: Edge) -> String {
    format!("border-{}-width", popup_edge.opposite())
}

/// Parse the leading integer of a CSS length such as `"12px"`, the way
/// computed styles are read back. Fractions are truncated.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse::<i64>().ok().map(|v| v as f64)
}

/// Format a pixel length for an inline style.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Whether the element already carries one of the button classes.
pub fn has_button_class<'a>(classes: impl IntoIterator<Item = &'a str>) -> bool {
    classes
        .into_iter()
        .any(|c| matches!(c, BUTTON | FLAT_BUTTON | TOGGLEABLE_BUTTON | FLAT_TOGGLEABLE_BUTTON))
}

/// Derive button options from an element's class list.
pub fn button_options<'a>(classes: impl IntoIterator<Item = &'a str>) -> ButtonOptions {
    let mut options = ButtonOptions::default();
    for class in classes {
        match class {
            FLAT_BUTTON => options.flat = true,
            TOGGLEABLE_BUTTON => options.kind = ButtonKind::Toggleable,
            FLAT_TOGGLEABLE_BUTTON => {
                options.flat = true;
                options.kind = ButtonKind::Toggleable;
            }
            ACTIVE_BUTTON => options.active = true,
            _ => {}
        }
    }
    options
}

/// Classes toggled to reflect a button's state.
pub fn button_visual_classes(visual: ButtonVisual) -> [(&'static str, bool); 3] {
    [
        (PRESSED_BUTTON, visual.pressed),
        (ACTIVE_BUTTON, visual.active),
        (DISABLED, visual.disabled),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px(" 0px "), Some(0.0));
        assert_eq!(parse_px("1.75px"), Some(1.0));
        assert_eq!(parse_px("-3px"), Some(-3.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px(""), None);
    }

    #[test]
    fn test_anchor_classes() {
        assert_eq!(anchor_class(Edge::Top), "dk-palette-anchor-top");
        assert_eq!(anchor_border_class(Edge::Left), "dk-palette-anchor-border-left");
        assert_eq!(anchor_height_property(Edge::Top), "border-bottom-width");
        assert_eq!(anchor_height_property(Edge::Right), "border-left-width");
    }

    #[test]
    fn test_button_options_from_classes() {
        let plain = button_options(["dk-button"]);
        assert_eq!(plain, ButtonOptions::default());

        let toggle = button_options(["dk-flat-toggleable-button", "dk-active-button"]);
        assert_eq!(toggle.kind, ButtonKind::Toggleable);
        assert!(toggle.flat);
        assert!(toggle.active);

        assert!(button_options(["dk-flat-button"]).flat);
    }

    #[test]
    fn test_has_button_class() {
        assert!(has_button_class(["other", "dk-toggleable-button"]));
        assert!(!has_button_class(["dk-active-button"]));
    }

    #[test]
    fn test_visual_classes() {
        let classes = button_visual_classes(ButtonVisual {
            pressed: true,
            active: false,
            disabled: true,
        });
        assert_eq!(
            classes,
            [(PRESSED_BUTTON, true), (ACTIVE_BUTTON, false), (DISABLED, true)]
        );
    }
}
