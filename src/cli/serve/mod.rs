//! Local viewer server.
//!
//! Serves the upload page, drives the session through analysis and renders
//! the viewer server-side. Analyses run on a small tokio runtime; requests
//! are handled on a rayon pool.

mod lifecycle;
mod response;
mod routes;

use crate::{
    cli::GenerateArgs,
    config::SiteConfig,
    core::is_shutdown,
    generate::Generator,
    ingest::Ingestor,
    log,
    session::Session,
    viewer::{MarkdownOptions, PulldownRenderer, Theme},
};
use anyhow::{Context, Result};
use routes::{ClientHints, Route};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Largest accepted upload request body.
const MAX_UPLOAD_BYTES: u64 = 64 * 1024 * 1024;

/// Request handler threads.
const HANDLER_THREADS: usize = 4;

/// Shared by every request handler. Settings are read through
/// [`cfg()`](crate::config::cfg).
pub struct ServeContext {
    pub session: Arc<Session>,
    pub renderer: PulldownRenderer,
}

/// Start the viewer and block until Ctrl+C.
///
/// With `inputs`, they are ingested and analyzed right away; otherwise the
/// viewer starts idle with an upload page.
pub fn serve(config: Arc<SiteConfig>, inputs: &[PathBuf], args: &GenerateArgs) -> Result<()> {
    let generator = Generator::from_config(&config.generation, args.structure.as_deref())
        .context("Cannot start the viewer without a structure generator")?;
    log!("serve"; "structures from {}", generator.describe());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("docugen-analysis")
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    // `system` is settled per client from its color scheme hint
    let initial_theme = Theme::initial(config.render.theme, None);
    let session = Session::new(generator, runtime.handle().clone(), initial_theme);

    if !inputs.is_empty() {
        let documents = Ingestor::new(&config.ingest).ingest_paths(inputs)?;
        session.upload(documents)?;
    }

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(&server);
    log!("serve"; "http://{}", addr);

    let ctx = Arc::new(ServeContext {
        renderer: PulldownRenderer::new(MarkdownOptions::from(&config.render)),
        session: Arc::clone(&session),
    });
    run_request_loop(&server, &ctx)?;

    session.reset();
    lifecycle::shutdown_runtime(runtime);
    Ok(())
}

fn run_request_loop(server: &Server, ctx: &Arc<ServeContext>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(HANDLER_THREADS)
        .build()
        .context("Failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let ctx = Arc::clone(ctx);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &ctx) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(mut request: Request, ctx: &ServeContext) -> Result<()> {
    // Early exit if shutdown requested
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    let route = Route::parse(request.method(), request.url());
    let hints = ClientHints::from_color_scheme(
        response::header_value(&request, "Sec-CH-Prefers-Color-Scheme").as_deref(),
    );

    let mut body = Vec::new();
    if route == Route::Upload {
        request
            .as_reader()
            .take(MAX_UPLOAD_BYTES + 1)
            .read_to_end(&mut body)
            .context("Failed to read upload body")?;
        if body.len() as u64 > MAX_UPLOAD_BYTES {
            return response::respond_too_large(request);
        }
    }

    crate::debug!("serve"; "{} {}", request.method(), request.url());
    response::respond(request, routes::dispatch(ctx, route, hints, &body))
}
