//! Terminal rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: component renderers and layouts
//! - [`helpers`]: cursor movement, truncation, highlighting, wrapping
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BannerInfo, DetailInfo, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo,
    SearchBarInfo, UIViewModel,
};
