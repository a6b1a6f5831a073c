//! Presentation surface: the set of primitives the gallery writes into.
//!
//! [`Surface`] is what the projector and controller see. [`HtmlSurface`] keeps
//! a mirror of the page's card grid, counter, detail panel and loading overlay
//! in memory and renders them as HTMX fragments. Interaction hooks on each
//! node carry the card's id, never the card itself.

use crate::gallery::card::CardId;

/// Visual transitions toggled as CSS classes on card nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Transition {
    Shake,
    Flip,
    Bounce,
    /// Continuous, stays on until floating is switched off.
    Float,
}

impl Transition {
    pub fn css_class(self) -> &'static str {
        match self {
            Transition::Shake => "animate-shake",
            Transition::Flip => "animate-flip",
            Transition::Bounce => "animate-bounce-scale",
            Transition::Float => "animate-float",
        }
    }
}

/// A user interaction bound to one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Inspect(CardId),
    Bounce(CardId),
}

impl Hook {
    pub fn route(&self) -> &'static str {
        match self {
            Hook::Inspect(_) => "/api/gallery/inspect",
            Hook::Bounce(_) => "/api/gallery/bounce",
        }
    }

    pub fn card(&self) -> CardId {
        match self {
            Hook::Inspect(id) | Hook::Bounce(id) => *id,
        }
    }
}

/// One rendered card widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNode {
    pub card_id: CardId,
    pub icon: String,
    pub title: String,
    pub description: String,
    /// Cosmetic reveal delay; not an ordering guarantee.
    pub reveal_delay_ms: u64,
    /// Active transitions, kept sorted and unique.
    pub transitions: Vec<Transition>,
    pub on_tap: Hook,
    pub on_enter: Hook,
}

impl CardNode {
    pub fn has(&self, transition: Transition) -> bool {
        self.transitions.contains(&transition)
    }
}

/// Contents of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub title: String,
    pub body: String,
    pub clicks: u32,
}

pub trait Surface {
    /// Remove every card node from the container.
    fn clear_cards(&mut self);

    /// Append a card node at the end of the container.
    fn insert_card(&mut self, node: CardNode);

    /// Card nodes in display order.
    fn card_nodes(&self) -> &[CardNode];

    /// Returns false when no node carries `card`.
    fn add_transition(&mut self, card: CardId, transition: Transition) -> bool;

    fn remove_transition(&mut self, card: CardId, transition: Transition) -> bool;

    fn set_counter(&mut self, clicks: u64);

    fn show_detail(&mut self, detail: Detail);

    fn hide_detail(&mut self);

    fn set_loading(&mut self, loading: bool);
}

/// In-memory mirror of the gallery page, rendered to HTML on demand.
///
/// The mirror remembers what changed since it was last rendered. A cleared
/// or refilled grid is re-sent whole, with the staggered reveal; otherwise
/// only the faces whose transitions changed go out, as out-of-band swaps.
/// Each card's outer element (and the hooks on it) stays in the page until
/// the grid itself is replaced.
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    nodes: Vec<CardNode>,
    counter: u64,
    detail: Option<Detail>,
    loading: bool,
    grid_dirty: bool,
    dirty_faces: Vec<CardId>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the grid was rebuilt since the last render.
    pub fn grid_dirty(&self) -> bool {
        self.grid_dirty
    }

    /// Render the whole `#gallery` body plus out-of-band counter and detail
    /// panel. Used for the initial page load.
    ///
    /// `next_tick_ms` adds a hidden element that posts to `/api/gallery/tick`
    /// after that many milliseconds, so pending steps get applied even when
    /// the user does nothing.
    pub fn render(&mut self, next_tick_ms: Option<u64>) -> String {
        let mut html = self.render_body(next_tick_ms);
        html.push_str(&self.render_counter(true));
        html.push_str(&self.render_detail(true));
        html
    }

    /// Render only what changed since the last render, entirely as
    /// out-of-band swaps. Every hook posts with `hx-swap="none"` and gets
    /// this back.
    pub fn render_update(&mut self, next_tick_ms: Option<u64>) -> String {
        let mut html = String::with_capacity(1024);
        if self.grid_dirty {
            html.push_str(r#"<div id="gallery" hx-swap-oob="innerHTML">"#);
            html.push_str(&self.render_body(next_tick_ms));
            html.push_str("</div>");
        } else {
            for id in std::mem::take(&mut self.dirty_faces) {
                if let Some(node) = self.nodes.iter().find(|n| n.card_id == id) {
                    html.push_str(&render_face(node, true));
                }
            }
            html.push_str(&self.render_loading(true));
            html.push_str(&render_tick(next_tick_ms, true));
        }
        html.push_str(&self.render_counter(true));
        html.push_str(&self.render_detail(true));
        html
    }

    pub fn render_counter(&self, out_of_band: bool) -> String {
        format!(
            r#"<span id="click-counter" class="font-bold"{}>Clicks: {}</span>"#,
            oob_attr(out_of_band),
            self.counter
        )
    }

    pub fn render_detail(&self, out_of_band: bool) -> String {
        let Some(detail) = &self.detail else {
            return format!(
                r#"<div id="card-modal" class="modal hidden"{}></div>"#,
                oob_attr(out_of_band)
            );
        };

        let times = if detail.clicks == 1 { "time" } else { "times" };
        format!(
            r#"<div id="card-modal" class="modal"{oob}>
  <div class="modal-content">
    <h2 id="modal-title" class="text-xl font-bold">{title}</h2>
    <p id="modal-body">{body}</p>
    <p class="text-sm opacity-75">Clicked {clicks} {times}</p>
    <button id="modal-close" hx-post="/api/gallery/dismiss" hx-swap="none">Close</button>
    <button id="modal-action" class="bg-purple-600 text-white" hx-post="/api/gallery/dismiss" hx-swap="none">Cast Spell!</button>
  </div>
</div>"#,
            oob = oob_attr(out_of_band),
            title = escape_html(&detail.title),
            body = escape_html(&detail.body),
            clicks = detail.clicks,
            times = times,
        )
    }

    /// Grid, loading slot and tick slot. Reveal classes go out only when the
    /// grid was rebuilt since the last render.
    fn render_body(&mut self, next_tick_ms: Option<u64>) -> String {
        let reveal = self.grid_dirty;
        self.grid_dirty = false;
        self.dirty_faces.clear();

        let mut html = String::with_capacity(512 + self.nodes.len() * 768);
        html.push_str(r#"<div id="card-grid" class="grid grid-cols-2 md:grid-cols-3 gap-4">"#);
        for node in &self.nodes {
            html.push_str(&render_node(node, reveal));
        }
        html.push_str("</div>");
        html.push_str(&self.render_loading(false));
        html.push_str(&render_tick(next_tick_ms, false));
        html
    }

    fn render_loading(&self, out_of_band: bool) -> String {
        let overlay = if self.loading {
            r#"<div class="loading-overlay animate-pulse">Summoning a new card...</div>"#
        } else {
            ""
        };
        format!(r#"<div id="loading"{}>{}</div>"#, oob_attr(out_of_band), overlay)
    }

    fn node_mut(&mut self, card: CardId) -> Option<&mut CardNode> {
        self.nodes.iter_mut().find(|n| n.card_id == card)
    }

    fn mark_face(&mut self, card: CardId) {
        if !self.dirty_faces.contains(&card) {
            self.dirty_faces.push(card);
        }
    }
}

impl Surface for HtmlSurface {
    fn clear_cards(&mut self) {
        self.nodes.clear();
        self.dirty_faces.clear();
        self.grid_dirty = true;
    }

    fn insert_card(&mut self, node: CardNode) {
        self.nodes.push(node);
        self.grid_dirty = true;
    }

    fn card_nodes(&self) -> &[CardNode] {
        &self.nodes
    }

    fn add_transition(&mut self, card: CardId, transition: Transition) -> bool {
        let Some(node) = self.node_mut(card) else {
            return false;
        };
        if let Err(pos) = node.transitions.binary_search(&transition) {
            node.transitions.insert(pos, transition);
            self.mark_face(card);
        }
        true
    }

    fn remove_transition(&mut self, card: CardId, transition: Transition) -> bool {
        let Some(node) = self.node_mut(card) else {
            return false;
        };
        let before = node.transitions.len();
        node.transitions.retain(|t| *t != transition);
        if node.transitions.len() != before {
            self.mark_face(card);
        }
        true
    }

    fn set_counter(&mut self, clicks: u64) {
        self.counter = clicks;
    }

    fn show_detail(&mut self, detail: Detail) {
        self.detail = Some(detail);
    }

    fn hide_detail(&mut self) {
        self.detail = None;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

fn oob_attr(out_of_band: bool) -> &'static str {
    if out_of_band { r#" hx-swap-oob="true""# } else { "" }
}

/// The slot holding the hidden tick element, empty when nothing is pending.
fn render_tick(next_tick_ms: Option<u64>, out_of_band: bool) -> String {
    let hook = match next_tick_ms {
        Some(delay) => format!(
            r#"<div class="hidden" hx-post="/api/gallery/tick" hx-trigger="load delay:{delay}ms" hx-swap="none"></div>"#
        ),
        None => String::new(),
    };
    format!(r#"<div id="gallery-tick"{}>{}</div>"#, oob_attr(out_of_band), hook)
}

fn render_node(node: &CardNode, reveal: bool) -> String {
    let (class, style) = if reveal {
        (
            "magic-card animate-card-reveal",
            format!(r#" style="animation-delay:{}ms""#, node.reveal_delay_ms),
        )
    } else {
        ("magic-card", String::new())
    };

    format!(
        r#"<div id="{id}" class="{class}"{style}
  hx-post="{tap_route}" hx-vals='{{"card":"{tap_card}"}}' hx-trigger="click" hx-swap="none">
  <div class="hidden" hx-post="{enter_route}" hx-vals='{{"card":"{enter_card}"}}' hx-trigger="mouseenter from:closest .magic-card" hx-swap="none"></div>
  {face}
</div>"#,
        id = node.card_id,
        class = class,
        style = style,
        tap_route = node.on_tap.route(),
        tap_card = node.on_tap.card(),
        enter_route = node.on_enter.route(),
        enter_card = node.on_enter.card(),
        face = render_face(node, false),
    )
}

/// The swappable inside of a card: content plus transition classes.
fn render_face(node: &CardNode, out_of_band: bool) -> String {
    let mut classes = String::from("card-face");
    for t in &node.transitions {
        classes.push(' ');
        classes.push_str(t.css_class());
    }

    format!(
        r#"<div id="{id}-face" class="{classes}"{oob}>
    <div class="card-icon text-5xl">{icon}</div>
    <h3 class="card-title font-bold">{title}</h3>
    <p class="card-description text-sm">{description}</p>
  </div>"#,
        id = node.card_id,
        classes = classes,
        oob = oob_attr(out_of_band),
        icon = escape_html(&node.icon),
        title = escape_html(&node.title),
        description = escape_html(&node.description),
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
