//! Request routing for the live viewer.
//!
//! | Route                  | Effect                                        |
//! |------------------------|-----------------------------------------------|
//! | `GET /`                | page for the current session state            |
//! | `GET /assets/<name>`   | embedded viewer assets                        |
//! | `POST /api/upload`     | JSON `[{name, content, lastModified}]`        |
//! | `GET /select?file=`    | select a navigation item                      |
//! | `GET /source`          | toggle rendered/raw view                      |
//! | `GET /search?q=`       | set the search term                           |
//! | `GET /theme?current=`  | flip the theme shown by the client            |
//! | `GET /reset`           | discard the session                           |
//! | `GET /retry`           | re-run a failed analysis                      |
//!
//! Viewer actions redirect back to `/`; a selection redirects to `/#top`.

use super::ServeContext;
use crate::{
    config::cfg,
    debug,
    embed::{EmbeddedAsset, asset},
    ingest::{IngestError, Ingestor, Upload},
    reconcile::Reconciler,
    session::{AppError, AppState},
    viewer::{PageMode, Theme, ViewerAction, ViewerEffect, ViewerPage, analyzing_page, error_page, upload_page},
};
use serde_json::json;
use tiny_http::Method;
use url::Url;

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Asset(String),
    Upload,
    Viewer(ViewerAction),
    Reset,
    Retry,
    NotFound,
    MethodNotAllowed,
}

impl Route {
    pub fn parse(method: &Method, raw_url: &str) -> Self {
        let Ok(url) = Url::parse("http://localhost").and_then(|base| base.join(raw_url)) else {
            return Self::NotFound;
        };
        let query = |key: &str| {
            url.query_pairs()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.into_owned())
        };

        let is_read = matches!(method, Method::Get | Method::Head);
        match url.path() {
            "/api/upload" if *method == Method::Post => Self::Upload,
            "/api/upload" => Self::MethodNotAllowed,
            _ if !is_read => Self::MethodNotAllowed,
            "/" | "/index.html" => Self::Home,
            "/select" => match query("file") {
                Some(file) => Self::Viewer(ViewerAction::Select(file)),
                None => Self::NotFound,
            },
            "/source" => Self::Viewer(ViewerAction::ToggleSource),
            "/search" => Self::Viewer(ViewerAction::Search(query("q").unwrap_or_default())),
            "/theme" => Self::Viewer(ViewerAction::ToggleTheme(
                query("current").as_deref().and_then(Theme::parse),
            )),
            "/reset" => Self::Reset,
            "/retry" => Self::Retry,
            path => match path.strip_prefix("/assets/") {
                Some(name) => Self::Asset(name.to_string()),
                None => Self::NotFound,
            },
        }
    }
}

/// What the client reported about itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientHints {
    /// From `Sec-CH-Prefers-Color-Scheme`.
    pub prefers_dark: Option<bool>,
}

impl ClientHints {
    pub fn from_color_scheme(value: Option<&str>) -> Self {
        let prefers_dark = value.map(|v| v.trim_matches('"')).and_then(|v| match v {
            "dark" => Some(true),
            "light" => Some(false),
            _ => None,
        });
        Self { prefers_dark }
    }
}

/// Response to send, independent of the HTTP library.
#[derive(Debug)]
pub enum Reply {
    Html(String),
    Json { status: u16, body: serde_json::Value },
    Redirect(&'static str),
    Asset(&'static EmbeddedAsset),
    NotFound,
    MethodNotAllowed,
}

pub fn dispatch(ctx: &ServeContext, route: Route, hints: ClientHints, body: &[u8]) -> Reply {
    match route {
        Route::Home => home(ctx, hints),
        Route::Asset(name) => asset(&name).map_or(Reply::NotFound, Reply::Asset),
        Route::Upload => upload(ctx, body),
        Route::Viewer(action) => match ctx.session.with(|app| app.apply(action)) {
            Ok(ViewerEffect::ResetScroll) => Reply::Redirect("/#top"),
            Ok(ViewerEffect::None) => Reply::Redirect("/"),
            Err(e) => {
                debug!("serve"; "ignored viewer action: {}", e);
                Reply::Redirect("/")
            }
        },
        Route::Reset => {
            ctx.session.reset();
            Reply::Redirect("/")
        }
        Route::Retry => {
            if let Err(e) = ctx.session.retry() {
                debug!("serve"; "retry ignored: {}", e);
            }
            Reply::Redirect("/")
        }
        Route::NotFound => Reply::NotFound,
        Route::MethodNotAllowed => Reply::MethodNotAllowed,
    }
}

fn home(ctx: &ServeContext, hints: ClientHints) -> Reply {
    let config = cfg();
    let lang = config.site.language.as_str();
    let theme = Theme::initial(config.render.theme, hints.prefers_dark);

    ctx.session.with(|app| {
        if let Ok(session) = app.viewing_mut() {
            session.viewer_mut().adopt_theme(theme);
            let reconciler = Reconciler::new(session.structure(), session.documents());
            let page = ViewerPage::new(&reconciler, &ctx.renderer, lang);
            return Reply::Html(page.render(session.viewer(), PageMode::Live));
        }

        Reply::Html(match app.state() {
            AppState::Analyzing { documents, .. } => analyzing_page(lang, theme, documents.len()),
            AppState::Error { message, .. } => error_page(lang, theme, message, true),
            AppState::Idle | AppState::Viewing(_) => upload_page(lang, theme, &config.ingest.extensions),
        })
    })
}

fn upload(ctx: &ServeContext, body: &[u8]) -> Reply {
    let uploads: Vec<Upload> = match serde_json::from_slice(body) {
        Ok(uploads) => uploads,
        Err(e) => return json_error(400, &format!("invalid upload: {e}")),
    };

    let documents = match Ingestor::new(&cfg().ingest).ingest_uploads(uploads) {
        Ok(documents) => documents,
        Err(e @ IngestError::NoValidFiles) => return json_error(400, &e.to_string()),
        Err(e) => return json_error(500, &e.to_string()),
    };
    let count = documents.len();

    match ctx.session.upload(documents) {
        Ok(_) => Reply::Json {
            status: 202,
            body: json!({ "documents": count }),
        },
        Err(e @ (AppError::Busy | AppError::AlreadyViewing)) => json_error(409, &e.to_string()),
        Err(e) => json_error(400, &e.to_string()),
    }
}

fn json_error(status: u16, message: &str) -> Reply {
    Reply::Json {
        status,
        body: json!({ "error": message }),
    }
}
