//! CLI command implementations

pub mod colors;
pub mod completions;
pub mod inherit;
pub mod init;
pub mod page;
pub mod presets;
pub mod sections;
pub mod theming;
pub mod validate;
