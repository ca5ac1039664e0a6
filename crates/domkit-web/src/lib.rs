//! domkit DOM bindings
//!
//! Binds the `domkit-core` models to page elements through `web-sys`. The
//! DOM modules only exist on `wasm32`; class names, CSS parsing and error
//! types compile everywhere.

pub mod css;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod button_view;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod palette_view;
#[cfg(target_arch = "wasm32")]
mod scheduler;
#[cfg(target_arch = "wasm32")]
mod text_input_view;
#[cfg(target_arch = "wasm32")]
mod tooltip_view;
#[cfg(target_arch = "wasm32")]
mod web;

pub use error::{ViewError, ViewResult};

#[cfg(target_arch = "wasm32")]
pub use app::Domkit;
#[cfg(target_arch = "wasm32")]
pub use button_view::DomButton;
#[cfg(target_arch = "wasm32")]
pub use palette_view::{DomPalette, DomPaletteSurface};
#[cfg(target_arch = "wasm32")]
pub use scheduler::BrowserScheduler;
#[cfg(target_arch = "wasm32")]
pub use text_input_view::DomTextInput;
#[cfg(target_arch = "wasm32")]
pub use tooltip_view::DomTooltip;
