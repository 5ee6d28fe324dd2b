//! HTTP response handlers.

use super::routes::Reply;
use crate::utils::mime::types::{HTML, JSON, PLAIN};
use anyhow::Result;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Client hint asked for on every page.
const ACCEPT_CH: &str = "Sec-CH-Prefers-Color-Scheme";

/// Send a [`Reply`].
pub fn respond(request: Request, reply: Reply) -> Result<()> {
    match reply {
        Reply::Html(body) => send_page(request, body),
        Reply::Json { status, body } => send_body(request, status, JSON, body.to_string().into_bytes()),
        Reply::Redirect(location) => respond_redirect(request, location),
        Reply::Asset(asset) => send_body(request, 200, asset.mime(), asset.content.as_bytes().to_vec()),
        Reply::NotFound => send_body(request, 404, PLAIN, b"404 Not Found".to_vec()),
        Reply::MethodNotAllowed => send_body(request, 405, PLAIN, b"405 Method Not Allowed".to_vec()),
    }
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with 413 when an upload exceeds the body limit.
pub fn respond_too_large(request: Request) -> Result<()> {
    let body = serde_json::json!({ "error": "upload too large" }).to_string();
    send_body(request, 413, JSON, body.into_bytes())
}

/// 303 so the browser follows with a GET.
fn respond_redirect(request: Request, location: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(303))
        .with_header(make_header("Location", location))
        .with_header(make_header("Cache-Control", "no-store"));
    request.respond(response)?;
    Ok(())
}

/// Session pages change with every action and are never cached.
fn send_page(request: Request, body: String) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 200, HTML);
    }
    let response = Response::from_string(body)
        .with_header(make_header("Content-Type", HTML))
        .with_header(make_header("Cache-Control", "no-store"))
        .with_header(make_header("Accept-CH", ACCEPT_CH))
        .with_header(make_header("Vary", ACCEPT_CH));
    request.respond(response)?;
    Ok(())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(request: Request, status: u16, content_type: &'static str, body: Vec<u8>) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, content_type);
    }
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

/// Read a request header (case-insensitive).
pub fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.to_string())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    // static ASCII strings always form a valid header
    Header::from_bytes(key, value).expect("static header")
}
