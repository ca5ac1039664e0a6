//! domkit core library
//!
//! Platform-agnostic geometry, state machines and widget models for the
//! domkit widget toolkit. Nothing here touches the DOM; the `domkit-web`
//! crate binds these models to page elements.

pub mod config;
pub mod error;
pub mod expiration;
pub mod geometry;
pub mod handlers;
pub mod palette;
pub mod selection;
pub mod timer;
pub mod touch;
pub mod widget;

pub use config::{PALETTE_TRANSITION_MS, PaletteConfig, TooltipConfig};
pub use error::{PaletteError, PaletteResult, SelectionError, SelectionResult};
pub use expiration::ExpirationQueue;
pub use geometry::{Axis, Edge, Range};
pub use handlers::{Handler, HandlerCollection, handler};
pub use palette::{BoundsPolicy, Palette, PaletteLayout, PaletteSurface, SizingCache, SizingMeasurements};
pub use selection::{RadioGroup, Toggleable};
pub use timer::{Clock, ManualScheduler, Scheduler, SystemClock, TimerId, TimerSlot};
pub use touch::{TouchClickCanceller, TouchRegistry};
pub use widget::{Button, ButtonKind, ButtonOptions, ButtonVisual, TextInput, Tooltip, TooltipEvent, WidgetBase, WidgetRegistry};
