//! Luna: design inheritance and theming for Luna sites
//!
//! A site is a directory of page files. Design fields set on a page are
//! inherited by every page below it unless overridden, and the toolkit
//! resolves, inspects and validates them from the command line.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
pub mod yaml;
