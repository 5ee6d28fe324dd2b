//! Core types - pure abstractions shared across the codebase.

mod document;
mod state;
mod structure;

pub use document::{Document, DocumentId};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
pub use structure::{NavigationCategory, NavigationItem, SiteStructure};

#[cfg(test)]
pub(crate) use structure::test_structure;

#[cfg(test)]
pub use document::test_document;
