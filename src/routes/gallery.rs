//! `/api/gallery/*` routes: the card gallery's buttons and hooks.
//!
//! `GET /api/gallery` returns the whole `#gallery` body. Every POST answers
//! with out-of-band swaps only (its hooks use `hx-swap="none"`): the faces
//! that changed, or the whole gallery when the grid was rebuilt, plus the
//! click counter, detail panel, loading slot and tick slot. The tick slot
//! holds a hidden element that posts to `/api/gallery/tick` once the next
//! scheduled step is due.

use tracing::warn;

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::gallery::card::CardId;
use crate::gallery::controller::Controller;
use crate::gallery::state::{restart_gallery, with_gallery_mut};
use crate::gallery::surface::HtmlSurface;
use crate::routes::util::{get_param, parse_form_body};

fn render_page(controller: &mut Controller<HtmlSurface>) -> String {
    let next = controller.next_due_in();
    controller.surface_mut().render(next)
}

fn render_update(controller: &mut Controller<HtmlSurface>) -> String {
    let next = controller.next_due_in();
    controller.surface_mut().render_update(next)
}

/// Parse the `card` form value into an id.
fn card_param(body: &str) -> Result<CardId, GalleryError> {
    let params = parse_form_body(body);
    let raw = get_param(&params, "card").unwrap_or("");
    raw.parse()
}

// ── GET /api/gallery ───────────────────────────────────────────────

/// Handle GET /api/gallery
/// Returns the current gallery, starting it on first call.
pub fn handle_gallery_get(_query: &str) -> String {
    with_gallery_mut(render_page)
}

// ── GET /api/gallery/counter ───────────────────────────────────────

pub fn handle_counter_get(_query: &str) -> String {
    with_gallery_mut(|g| g.surface().render_counter(false))
}

// ── GET /api/gallery/state ─────────────────────────────────────────

/// Handle GET /api/gallery/state
/// Returns a JSON snapshot of cards, counters and pending work.
pub fn handle_state_get(_query: &str) -> String {
    with_gallery_mut(|g| serde_json::to_string(&g.snapshot()).unwrap_or_else(|_| "{}".to_string()))
}

// ── POST /api/gallery/add ──────────────────────────────────────────

pub fn handle_add_post(_body: &str) -> String {
    with_gallery_mut(|g| {
        g.add();
        render_update(g)
    })
}

// ── POST /api/gallery/shuffle ──────────────────────────────────────

pub fn handle_shuffle_post(_body: &str) -> String {
    with_gallery_mut(|g| {
        g.shuffle();
        render_update(g)
    })
}

// ── POST /api/gallery/float ────────────────────────────────────────

/// Handle POST /api/gallery/float
/// Body: optional `enabled=true|false` to force a value; otherwise toggles.
pub fn handle_float_post(body: &str) -> String {
    let params = parse_form_body(body);
    let force = match get_param(&params, "enabled") {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    };
    with_gallery_mut(|g| {
        g.toggle_float(force);
        render_update(g)
    })
}

// ── POST /api/gallery/inspect ──────────────────────────────────────

/// Handle POST /api/gallery/inspect
/// Body: card=card-{n}
pub fn handle_inspect_post(body: &str) -> String {
    let result = card_param(body).and_then(|id| {
        with_gallery_mut(|g| -> Result<String, GalleryError> {
            g.inspect(id)?;
            Ok(render_update(g))
        })
    });
    result.unwrap_or_else(|e| {
        warn!(error = %e, "inspect rejected");
        e.to_html()
    })
}

// ── POST /api/gallery/bounce ───────────────────────────────────────

/// Handle POST /api/gallery/bounce
/// Body: card=card-{n}
pub fn handle_bounce_post(body: &str) -> String {
    let result = card_param(body).and_then(|id| {
        with_gallery_mut(|g| -> Result<String, GalleryError> {
            g.bounce(id)?;
            Ok(render_update(g))
        })
    });
    result.unwrap_or_else(|e| {
        warn!(error = %e, "bounce rejected");
        e.to_html()
    })
}

// ── POST /api/gallery/dismiss ──────────────────────────────────────

pub fn handle_dismiss_post(_body: &str) -> String {
    with_gallery_mut(|g| {
        g.dismiss();
        render_update(g)
    })
}

// ── POST /api/gallery/tick ─────────────────────────────────────────

/// Handle POST /api/gallery/tick
/// Due steps already ran when the gallery was borrowed; this just reports
/// what changed.
pub fn handle_tick_post(_body: &str) -> String {
    with_gallery_mut(render_update)
}

// ── POST /api/gallery/config ───────────────────────────────────────

/// Handle POST /api/gallery/config
/// Body: JSON [`GalleryConfig`]. Applies it and starts the cards over;
/// the click counter and id sequence carry on.
pub fn handle_config_post(body: &str) -> String {
    match GalleryConfig::from_json(body) {
        Ok(config) => {
            restart_gallery(config);
            with_gallery_mut(render_update)
        }
        Err(e) => {
            warn!(error = %e, "config rejected");
            e.to_html()
        }
    }
}
