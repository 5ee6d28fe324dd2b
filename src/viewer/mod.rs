//! Document viewer: markdown rendering, viewer state and page composition.

mod page;
mod render;
mod state;

pub use page::{INDEX_PAGE, PageMode, StaticPages, ViewerPage, analyzing_page, error_page, upload_page};
pub use render::{MarkdownOptions, PulldownRenderer};
pub use state::{Theme, ViewerAction, ViewerEffect, ViewerState};
