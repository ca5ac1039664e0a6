//! Error types for the DOM layer.

use domkit_core::PaletteError;
use thiserror::Error;

/// Failures binding widgets to the page.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("No browser window available")]
    NoWindow,
    #[error("Cannot find element #{0}")]
    MissingElement(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("Widget is already handling an event")]
    Reentrant,
    #[error("Invalid widget config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Result type for DOM operations.
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ViewError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ViewError::Dom(format!("{:?}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_error_is_transparent() {
        let err: ViewError = PaletteError::InvalidEdge("middle".into()).into();
        assert_eq!(err.to_string(), "Cannot anchor palette to nonstandard edge: middle");
    }

    #[test]
    fn test_missing_element_message() {
        assert_eq!(
            ViewError::MissingElement("menu".into()).to_string(),
            "Cannot find element #menu"
        );
    }
}
