//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and per-line styling

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{GUTTER_WIDTH, gutter_label, render};
pub use status::{position_text, status_text};
