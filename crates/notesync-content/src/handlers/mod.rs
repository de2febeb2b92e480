//! Metadata encoding handlers

mod frontmatter;
mod properties;

pub use frontmatter::FrontmatterHandler;
pub use properties::{PropertiesHandler, render_property_value};
