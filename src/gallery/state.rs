//! Process-wide gallery state.
//!
//! [`AppState`] holds the counters and the floating flag; only the controller
//! mutates it. The running controller itself lives in a `thread_local!` +
//! `RefCell`, which is safe in single-threaded WASM: the Web Worker keeps the
//! module alive, so the gallery persists across `handle_request` calls for
//! the whole browser session.
//!
//! Every mutable access first syncs the controller's clock to
//! `chrono::Utc::now()`, so scheduled steps land on time no matter which
//! request arrives next.

use std::cell::RefCell;

use chrono::Utc;

use crate::config::GalleryConfig;
use crate::gallery::card::CardFactory;
use crate::gallery::controller::Controller;
use crate::gallery::surface::HtmlSurface;

/// Counters and flags shared by every interaction.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    click_counter: u64,
    floating_enabled: bool,
    factory: CardFactory,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total inspects across all cards. Never reset.
    pub fn click_counter(&self) -> u64 {
        self.click_counter
    }

    /// Increment the click counter and return the new value.
    pub fn record_click(&mut self) -> u64 {
        self.click_counter += 1;
        self.click_counter
    }

    pub fn floating_enabled(&self) -> bool {
        self.floating_enabled
    }

    pub fn set_floating(&mut self, enabled: bool) {
        self.floating_enabled = enabled;
    }

    /// Ids handed out so far.
    pub fn cards_issued(&self) -> u64 {
        self.factory.issued()
    }

    pub fn factory_mut(&mut self) -> &mut CardFactory {
        &mut self.factory
    }
}

thread_local! {
    static GALLERY: RefCell<Controller<HtmlSurface>> =
        RefCell::new(started(GalleryConfig::default()));
}

fn started(config: GalleryConfig) -> Controller<HtmlSurface> {
    let mut controller = Controller::new(config, HtmlSurface::new());
    controller.start();
    controller
}

/// Execute a closure with mutable access to the gallery.
///
/// The gallery starts with the default config on first use. Steps that fell
/// due since the previous access run before `f`.
pub fn with_gallery_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Controller<HtmlSurface>) -> R,
{
    GALLERY.with(|g| {
        let mut controller = g.borrow_mut();
        controller.sync_to(Utc::now());
        f(&mut *controller)
    })
}

/// Execute a closure with shared access to the gallery as of the last
/// mutable access. Does not move the clock.
pub fn with_gallery<F, R>(f: F) -> R
where
    F: FnOnce(&Controller<HtmlSurface>) -> R,
{
    GALLERY.with(|g| f(&*g.borrow()))
}

/// Apply `config` to the running gallery. Click counter, id sequence and
/// floating flag carry over; the cards start over.
pub fn restart_gallery(config: GalleryConfig) {
    with_gallery_mut(|g| g.reconfigure(config));
}

/// Replace the running gallery with a fresh default one.
pub fn reset_gallery() {
    GALLERY.with(|g| {
        *g.borrow_mut() = started(GalleryConfig::default());
    });
}
