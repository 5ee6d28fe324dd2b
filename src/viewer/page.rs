//! Page composition.
//!
//! The same viewer markup serves both outputs:
//!
//! - [`PageMode::Static`]: written to disk by `build`. Links point at
//!   sibling `.html` files; search, theme and source toggles run in
//!   viewer.js.
//! - [`PageMode::Live`]: served by `serve`. Every control is a link back to
//!   the server, which owns the [`ViewerState`].

use super::render::MarkdownRenderer;
use super::state::{DisplayMode, Theme, ViewerState};
use crate::embed::{PAGE_HTML, PageVars};
use crate::reconcile::{FilteredCategory, Reconciler};
use crate::utils::html::{escape, escape_attr};
use crate::utils::plural::plural_count;
use crate::utils::slug::{SlugAllocator, slugify_reference};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rustc_hash::FxHashMap;

/// File name of the landing page in the static output.
pub const INDEX_PAGE: &str = "index.html";

const EMPTY_TITLE: &str = "Select a Page";
const EMPTY_HINT: &str = "Choose a document from the sidebar to view its content.";
const NO_RESULTS: &str = "No results found";
const SEARCH_PLACEHOLDER: &str = "Search docs...";
const FOOTER: &str = "Generated by docugen";

/// Output file per navigation reference.
///
/// Slugs are derived from the reference with its extension removed;
/// `index` is reserved for the landing page.
#[derive(Debug, Default)]
pub struct StaticPages<'a> {
    files: FxHashMap<&'a str, String>,
    order: Vec<&'a str>,
}

impl<'a> StaticPages<'a> {
    pub fn allocate(reconciler: &Reconciler<'a>) -> Self {
        let mut slugs = SlugAllocator::with_reserved(["index"]);
        let mut pages = Self::default();
        for reference in reconciler.references() {
            let file = format!("{}.html", slugs.allocate(slugify_reference(reference)));
            pages.files.insert(reference, file);
            pages.order.push(reference);
        }
        pages
    }

    pub fn file(&self, reference: &str) -> Option<&str> {
        self.files.get(reference).map(String::as_str)
    }

    /// `(reference, file)` in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &str)> + '_ {
        self.order
            .iter()
            .filter_map(|reference| Some((*reference, self.file(reference)?)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

/// Where the page ends up.
#[derive(Debug, Clone, Copy)]
pub enum PageMode<'p, 'a> {
    Static(&'p StaticPages<'a>),
    Live,
}

impl PageMode<'_, '_> {
    fn as_str(self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Live => "live",
        }
    }

    fn asset_base(self) -> &'static str {
        match self {
            Self::Static(_) => "",
            Self::Live => "/",
        }
    }

    fn home(self) -> &'static str {
        match self {
            Self::Static(_) => INDEX_PAGE,
            Self::Live => "/",
        }
    }

    fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    fn select_href(self, reference: &str) -> String {
        match self {
            Self::Static(pages) => pages.file(reference).unwrap_or(INDEX_PAGE).to_string(),
            Self::Live => format!("/select?file={}", utf8_percent_encode(reference, NON_ALPHANUMERIC)),
        }
    }
}

/// Wrap a body in the shared document shell.
fn shell(lang: &str, mode: &str, asset_base: &str, title: &str, theme: Option<Theme>, head: &str, body: &str) -> String {
    PAGE_HTML.render(&PageVars {
        lang: &escape_attr(lang),
        title: &escape(title),
        theme: theme.map_or("system", Theme::as_str),
        mode,
        asset_base,
        head,
        body,
    })
}

/// Composes viewer pages for one reconciled session.
pub struct ViewerPage<'r, 'a> {
    reconciler: &'r Reconciler<'a>,
    renderer: &'r dyn MarkdownRenderer,
    lang: &'r str,
}

impl<'r, 'a> ViewerPage<'r, 'a> {
    pub fn new(reconciler: &'r Reconciler<'a>, renderer: &'r dyn MarkdownRenderer, lang: &'r str) -> Self {
        Self {
            reconciler,
            renderer,
            lang,
        }
    }

    /// Full HTML document for the given viewer state.
    pub fn render(&self, state: &ViewerState, mode: PageMode<'_, 'a>) -> String {
        let structure = self.reconciler.structure();
        let selection = state.effective_selection(self.reconciler.default_selection());
        let entry = selection.and_then(|reference| self.reconciler.lookup(reference));

        let title = match entry {
            Some(entry) => format!("{} | {}", entry.title, structure.site_title),
            None => structure.site_title.clone(),
        };
        let head = format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_attr(&structure.site_description)
        );

        let mut body = String::from("<div class=\"layout\">");
        body.push_str(&self.sidebar(state, selection, mode));
        body.push_str("<div class=\"content\">");
        body.push_str(&format!(
            "<header class=\"mobile-header\"><span>{}</span>\
             <button class=\"button\" type=\"button\" data-menu-toggle>Menu</button></header>",
            escape(entry.map_or(structure.site_title.as_str(), |entry| entry.title)),
        ));
        body.push_str("<main class=\"scroll\" id=\"top\" data-scroll><div class=\"page\">");
        match selection {
            Some(reference) => body.push_str(&self.article(reference, state.mode(), mode)),
            None => body.push_str(&empty_state()),
        }
        body.push_str("</div></main></div></div>");

        shell(
            self.lang,
            mode.as_str(),
            mode.asset_base(),
            &title,
            state.theme(),
            &head,
            &body,
        )
    }

    fn sidebar(&self, state: &ViewerState, selection: Option<&str>, mode: PageMode<'_, 'a>) -> String {
        let structure = self.reconciler.structure();
        let mut html = String::from("<aside class=\"sidebar\"><div class=\"sidebar-header\"><div class=\"brand\">");

        html.push_str(&format!(
            "<a class=\"brand-title\" href=\"{}\" title=\"{}\">{}</a>",
            mode.home(),
            escape_attr(&structure.site_description),
            escape(&structure.site_title),
        ));
        html.push_str("<div class=\"brand-actions\">");
        html.push_str(&theme_toggle(state.theme(), mode));
        if mode.is_live() {
            html.push_str("<a class=\"button\" href=\"/reset\">New</a>");
        }
        html.push_str("</div></div>");

        // static pages filter client-side; the form only submits when live
        let term = if mode.is_live() { state.search() } else { "" };
        html.push_str(&format!(
            "<form class=\"search\" action=\"/search\" method=\"get\" role=\"search\">\
             <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"{SEARCH_PLACEHOLDER}\" \
             autocomplete=\"off\" data-search></form></div>",
            escape_attr(term),
        ));

        html.push_str("<nav class=\"nav\">");
        let categories = self.reconciler.filtered(term);
        let mut shown = 0;
        for category in categories.iter().filter(|category| !category.items.is_empty()) {
            html.push_str(&nav_category(category, selection, mode));
            shown += 1;
        }
        let hidden = if shown > 0 { " hidden" } else { "" };
        html.push_str(&format!("<p class=\"nav-empty\" data-nav-empty{hidden}>{NO_RESULTS}</p>"));
        html.push_str("</nav>");

        html.push_str(&format!("<div class=\"sidebar-footer\">{FOOTER}</div></aside>"));
        html
    }

    fn article(&self, reference: &str, display: DisplayMode, mode: PageMode<'_, 'a>) -> String {
        let Some(document) = self.reconciler.resolve(reference).document() else {
            return empty_state();
        };

        let mut html = String::from("<div class=\"page-header\"><div>");
        if let Some(entry) = self.reconciler.lookup(reference) {
            html.push_str(&format!("<div class=\"breadcrumb\">{}</div>", escape(entry.category)));
        }
        html.push_str(&format!(
            "<h1>{}</h1></div>",
            escape(self.reconciler.page_title(reference, document))
        ));

        let label = match display {
            DisplayMode::Rendered => "View Source",
            DisplayMode::RawSource => "View Rendered",
        };
        if mode.is_live() {
            html.push_str(&format!(
                "<a class=\"button\" href=\"/source\" data-keep-scroll>{label}</a>"
            ));
        } else {
            html.push_str(&format!(
                "<button class=\"button\" type=\"button\" data-source-toggle>{label}</button>"
            ));
        }
        html.push_str("</div>");

        let show_rendered = display == DisplayMode::Rendered;
        // live pages carry only the active view
        if show_rendered || !mode.is_live() {
            let rendered = match self.renderer.render(document.content()) {
                Ok(rendered) => rendered,
                Err(e) => format!("<div class=\"render-error\">{}</div>", escape(&e.to_string())),
            };
            let hidden = if show_rendered { "" } else { " hidden" };
            html.push_str(&format!(
                "<article class=\"markdown\" data-rendered{hidden}>{rendered}</article>"
            ));
        }
        if !show_rendered || !mode.is_live() {
            let hidden = if show_rendered { " hidden" } else { "" };
            html.push_str(&format!(
                "<pre class=\"source\" data-source{hidden}><code>{}</code></pre>",
                escape(document.content())
            ));
        }
        html
    }
}

fn nav_category(category: &FilteredCategory<'_>, selection: Option<&str>, mode: PageMode<'_, '_>) -> String {
    let mut html = format!(
        "<div class=\"nav-category\" data-category><h3>{}</h3><ul>",
        escape(category.category_name)
    );
    for item in &category.items {
        let active = if selection == Some(item.file_reference.as_str()) {
            " active"
        } else {
            ""
        };
        html.push_str(&format!(
            "<li><a class=\"nav-item{active}\" href=\"{}\" data-title=\"{}\">{}</a></li>",
            escape_attr(&mode.select_href(&item.file_reference)),
            escape_attr(&item.title),
            escape(&item.title),
        ));
    }
    html.push_str("</ul></div>");
    html
}

fn theme_toggle(theme: Option<Theme>, mode: PageMode<'_, '_>) -> String {
    let href = match (mode, theme) {
        (PageMode::Static(_), _) => "#".to_string(),
        (PageMode::Live, Some(theme)) => format!("/theme?current={}", theme.as_str()),
        (PageMode::Live, None) => "/theme".to_string(),
    };
    // viewer.js relabels the toggle once the displayed theme is known
    let (label, title) = match theme {
        Some(Theme::Dark) => ("Light", "Switch to Light Mode"),
        _ => ("Dark", "Switch to Dark Mode"),
    };
    format!("<a class=\"button\" href=\"{href}\" title=\"{title}\" data-theme-toggle data-keep-scroll>{label}</a>")
}

fn empty_state() -> String {
    format!("<div class=\"empty-state\"><h2>{EMPTY_TITLE}</h2><p>{EMPTY_HINT}</p></div>")
}

// =============================================================================
// Session pages (live only)
// =============================================================================

/// Idle: drop zone and file picker.
pub fn upload_page(lang: &str, theme: Option<Theme>, extensions: &[String]) -> String {
    let accept = extensions.join(",");
    let body = format!(
        "<main class=\"landing\">\
         <div class=\"dropzone\" data-dropzone data-accept=\"{accept}\">\
         <h2>Upload your docs</h2>\
         <p>Drag and drop your markdown files here, or click to browse.</p>\
         <label class=\"button primary\">Choose Files\
         <input type=\"file\" multiple accept=\"{accept}\" data-file-input></label>\
         </div>\
         <div class=\"alert\" role=\"alert\" data-upload-error hidden></div>\
         </main>",
        accept = escape_attr(&accept),
    );
    shell(lang, "live", "/", "docugen", theme, "", &body)
}

/// Analyzing: polls by reloading until the session leaves this state.
pub fn analyzing_page(lang: &str, theme: Option<Theme>, documents: usize) -> String {
    let body = format!(
        "<main class=\"landing\">\
         <div class=\"spinner\"></div>\
         <h2>Designing your site...</h2>\
         <p>Reading {}, organizing categories, and building the navigation.</p>\
         <div class=\"actions\"><a class=\"button\" href=\"/reset\">Cancel</a></div>\
         </main>",
        plural_count(documents, "file"),
    );
    shell(
        lang,
        "live",
        "/",
        "Designing your site...",
        theme,
        "<meta http-equiv=\"refresh\" content=\"1\">",
        &body,
    )
}

/// Error: the message plus retry (when documents were kept) and reset.
pub fn error_page(lang: &str, theme: Option<Theme>, message: &str, can_retry: bool) -> String {
    let retry = if can_retry {
        "<a class=\"button primary\" href=\"/retry\">Try again</a>"
    } else {
        ""
    };
    let body = format!(
        "<main class=\"landing\">\
         <div class=\"alert\" role=\"alert\"><strong>Error:</strong> {}</div>\
         <div class=\"actions\">{retry}<a class=\"button\" href=\"/reset\">Start over</a></div>\
         </main>",
        escape(message),
    );
    shell(lang, "live", "/", "Error", theme, "", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Document, SiteStructure, test_document, test_structure};
    use crate::viewer::render::{MarkdownOptions, PulldownRenderer, RenderError};

    struct FailingRenderer;

    impl MarkdownRenderer for FailingRenderer {
        fn render(&self, _source: &str) -> Result<String, RenderError> {
            Err(RenderError::MalformedMarkdown)
        }
    }

    fn fixture() -> (SiteStructure, Vec<Document>) {
        let structure = test_structure(&[
            ("Welcome", &[("Home", "index.md")]),
            ("Docs", &[("Guide", "guide.md"), ("API", "api.md")]),
            ("Empty", &[]),
        ]);
        let docs = vec![
            test_document("index.md", "# Home\n\nWelcome <b>in</b>."),
            test_document("guide.md", "# Guide"),
            test_document("API.MD", "# API"),
        ];
        (structure, docs)
    }

    fn renderer() -> PulldownRenderer {
        PulldownRenderer::new(MarkdownOptions::default())
    }

    #[test]
    fn test_live_page_shows_default_selection() {
        let (structure, docs) = fixture();
        let reconciler = Reconciler::new(&structure, &docs);
        let renderer = renderer();
        let page = ViewerPage::new(&reconciler, &renderer, "en");

        let html = page.render(&ViewerState::new(None), PageMode::Live);
        assert!(html.contains("data-theme=\"system\""));
        assert!(html.contains("<h1>Home</h1>"));
        assert!(html.contains("<div class=\"breadcrumb\">Welcome</div>"));
        assert!(html.contains("class=\"nav-item active\" href=\"/select?file=index%2Emd\""));
        assert!(!html.contains("<h3>Empty</h3>"));
        assert!(!html.contains("data-source hidden"));
    }

    #[test]
    fn test_case_drift_resolves_to_document() {
        let (structure, docs) = fixture();
        let reconciler = Reconciler::new(&structure, &docs);
        let renderer = renderer();
        let page = ViewerPage::new(&reconciler, &renderer, "en");

        let mut state = ViewerState::new(Some(Theme::Dark));
        state.select("api.md");
        let html = page.render(&state, PageMode::Live);
        assert!(html.contains("<h1>API</h1></div>"));
        assert!(html.contains("data-rendered><h1>API</h1>"));
        assert!(html.contains("data-theme=\"dark\""));
    }

    #[test]
    fn test_unresolved_selection_shows_empty_state() {
        let (structure, docs) = fixture();
        let reconciler = Reconciler::new(&structure, &docs);
        let renderer = renderer();
        let page = ViewerPage::new(&reconciler, &renderer, "en");

        let mut state = ViewerState::new(None);
        state.select("missing.md");
        let html = page.render(&state, PageMode::Live);
        assert!(html.contains(EMPTY_TITLE));
        assert!(!html.contains("<h1>Home</h1>"));
    }

    #[test]
    fn test_live_raw_source_view() {
        let (structure, docs) = fixture();
        let reconciler = Reconciler::new(&structure, &docs);
        let renderer = renderer();
        let page = ViewerPage::new(&reconciler, &renderer, "en");

        let mut state = ViewerState::new(None);
        state.toggle_source();
        let html = page.render(&state, PageMode::Live);
        assert!(html.contains("Welcome &lt;b&gt;in&lt;/b&gt;."));
        assert!(!html.contains("data-rendered"));
        assert!(html.contains(">View Rendered</a>"));
    }

    #[test]
    fn test_search_without_matches() {
        let (structure, docs) = fixture();
        let reconciler = Reconciler::new(&structure, &docs);
        let renderer = renderer();
        let page = ViewerPage::new(&reconciler, &renderer, "en");

        let mut state = ViewerState::new(None);
        state.set_search("zzz");
        let html = page.render(&state, PageMode::Live);
        assert!(html.contains("data-nav-empty>No results found"));
        assert!(!html.contains("data-category"));
        // selection survives filtering
        assert!(html.contains("<h1>Home</h1>"));
    }

    #[test]
    fn test_render_failure_is_contained() {
        let (structure, docs) = fixture();
        let reconciler = Reconciler::new(&structure, &docs);
        let page = ViewerPage::new(&reconciler, &FailingRenderer, "en");

        let html = page.render(&ViewerState::new(None), PageMode::Live);
        assert!(html.contains("<div class=\"render-error\">Error parsing markdown content.</div>"));
        assert!(html.contains("data-category"));
    }

    #[test]
    fn test_static_pages() {
        let (structure, docs) = fixture();
        let reconciler = Reconciler::new(&structure, &docs);
        let pages = StaticPages::allocate(&reconciler);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.file("index.md"), Some("index-2.html"));
        assert_eq!(pages.file("api.md"), Some("api.html"));

        let renderer = renderer();
        let page = ViewerPage::new(&reconciler, &renderer, "de");
        let html = page.render(&ViewerState::new(Some(Theme::Light)), PageMode::Static(&pages));
        assert!(html.contains("<html lang=\"de\" data-theme=\"light\" data-mode=\"static\">"));
        assert!(html.contains("href=\"guide.html\""));
        assert!(html.contains("href=\"assets/viewer.css\""));
        // both views are present for the client-side toggle
        assert!(html.contains("data-rendered>"));
        assert!(html.contains("data-source hidden>"));
        assert!(!html.contains("/reset"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let structure = test_structure(&[("<Cat>", &[("A & B", "a.md")])]);
        let docs = vec![test_document("a.md", "text")];
        let reconciler = Reconciler::new(&structure, &docs);
        let renderer = renderer();
        let page = ViewerPage::new(&reconciler, &renderer, "en");

        let html = page.render(&ViewerState::new(None), PageMode::Live);
        assert!(html.contains("<h3>&lt;Cat&gt;</h3>"));
        assert!(html.contains("<h1>A &amp; B</h1>"));
        assert!(html.contains("<title>A &amp; B | Test Docs</title>"));
    }

    #[test]
    fn test_session_pages() {
        let exts = vec![".md".to_string(), ".txt".to_string()];
        let upload = upload_page("en", None, &exts);
        assert!(upload.contains(" accept=\".md,.txt\""));
        // dropped files are filtered by the same list before being read
        assert!(upload.contains("data-accept=\".md,.txt\""));
        assert!(upload.contains("data-upload-error hidden"));

        let analyzing = analyzing_page("en", Some(Theme::Dark), 3);
        assert!(analyzing.contains("http-equiv=\"refresh\""));
        assert!(analyzing.contains("Reading 3 files"));

        let error = error_page("en", None, "Failed <again>", true);
        assert!(error.contains("Failed &lt;again&gt;"));
        assert!(error.contains("/retry"));
        assert!(!error_page("en", None, "x", false).contains("/retry"));
    }
}
