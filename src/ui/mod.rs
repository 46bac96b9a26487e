//! Terminal rendering for the combobox.
//!
//! ```text
//! Combobox → compute_viewmodel → ComboboxViewModel → render_frame → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready rows, layout and pointer hit-testing
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Frame buffer utilities and match highlighting
//! - [`theme`]: Colour schemes and ANSI escape sequence generation
//! - [`icons`]: Glyphs themes can assign to each role

pub mod components;
pub mod helpers;
pub mod icons;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use icons::Icon;
pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{compute_viewmodel, ComboboxViewModel, Hint, Layout, ListRow, PointerTarget};
