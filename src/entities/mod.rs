//! Entity type definitions
//!
//! - [`Page`] - a content page file with its design fields
//! - [`DesignPreset`] / [`ColorPreset`] - built-in and stored color presets
//! - [`SectionTemplate`] - a reusable block layout saved by an editor
//! - [`LunaTheming`] - site-wide design tokens

pub mod page;
pub mod preset;
pub mod section;
pub mod theming;

pub use page::Page;
pub use preset::{ColorPreset, DesignPreset, DesignPresets};
pub use section::SectionTemplate;
pub use theming::LunaTheming;
