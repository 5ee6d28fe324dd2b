//! Markdown rendering.
//!
//! A render failure is contained to one document: the caller shows an
//! inline error and keeps navigation and raw source usable.

use crate::config::RenderConfig;
use pulldown_cmark::{Event, Options, Parser, html};
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Error parsing markdown content.")]
    MalformedMarkdown,
}

/// Converts document content to HTML.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

/// Options for markdown conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Pass embedded HTML through; when false it is shown as text
    pub raw_html: bool,
}

impl MarkdownOptions {
    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

impl From<&RenderConfig> for MarkdownOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            tables: config.tables,
            footnotes: config.footnotes,
            strikethrough: config.strikethrough,
            task_lists: config.task_lists,
            raw_html: config.raw_html,
        }
    }
}

/// pulldown-cmark backed renderer.
#[derive(Debug, Clone, Copy)]
pub struct PulldownRenderer {
    options: MarkdownOptions,
}

impl PulldownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn to_html(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options.to_pulldown_options());
        let mut out = String::with_capacity(source.len() * 3 / 2);

        if self.options.raw_html {
            html::push_html(&mut out, parser);
        } else {
            html::push_html(&mut out, parser.map(escape_html_event));
        }
        out
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        guarded(|| self.to_html(source))
    }
}

/// Embedded HTML becomes text, which `push_html` escapes.
fn escape_html_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        other => other,
    }
}

/// Run a rendering step, turning a panic into [`RenderError::MalformedMarkdown`].
fn guarded(render: impl FnOnce() -> String) -> Result<String, RenderError> {
    catch_unwind(AssertUnwindSafe(render)).map_err(|_| RenderError::MalformedMarkdown)
}
