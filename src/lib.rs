//! Magic Card Gallery in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Service Worker
//! bridge to call. Uses `matchit` for URL routing, and every route answers
//! with an HTML fragment for HTMX to swap into the page (or JSON for
//! `/api/gallery/state`).
//!
//! The gallery itself lives in WASM memory for the lifetime of the worker;
//! see [`gallery::state`].

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod routes;

/// Install the panic hook and console logging when the module loads.
#[wasm_bindgen(start)]
pub fn init() {
    logging::init();
}

/// Process an HTTP-like request and return an HTML fragment.
///
/// # Arguments
/// * `method`: HTTP method ("GET" or "POST")
/// * `path`: URL path (e.g., "/api/gallery/inspect")
/// * `query`: Query string, with or without the leading `?`
/// * `body`: Request body (form data or JSON). Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/gallery", "gallery").ok();
    router.insert("/api/gallery/counter", "counter").ok();
    router.insert("/api/gallery/state", "state").ok();
    router.insert("/api/gallery/add", "add").ok();
    router.insert("/api/gallery/shuffle", "shuffle").ok();
    router.insert("/api/gallery/float", "float").ok();
    router.insert("/api/gallery/inspect", "inspect").ok();
    router.insert("/api/gallery/bounce", "bounce").ok();
    router.insert("/api/gallery/dismiss", "dismiss").ok();
    router.insert("/api/gallery/tick", "tick").ok();
    router.insert("/api/gallery/config", "config").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("gallery", "GET") => routes::gallery::handle_gallery_get(query),
            ("counter", "GET") => routes::gallery::handle_counter_get(query),
            ("state", "GET") => routes::gallery::handle_state_get(query),

            ("add", "POST") => routes::gallery::handle_add_post(body),
            ("shuffle", "POST") => routes::gallery::handle_shuffle_post(body),
            ("float", "POST") => routes::gallery::handle_float_post(body),
            ("inspect", "POST") => routes::gallery::handle_inspect_post(body),
            ("bounce", "POST") => routes::gallery::handle_bounce_post(body),
            ("dismiss", "POST") => routes::gallery::handle_dismiss_post(body),
            ("tick", "POST") => routes::gallery::handle_tick_post(body),
            ("config", "POST") => routes::gallery::handle_config_post(body),

            _ => {
                tracing::warn!(method, path, "method not allowed");
                method_not_allowed()
            }
        },
        Err(_) => {
            tracing::warn!(method, path, "route not found");
            not_found()
        }
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}
