//! Interaction controller: the handlers behind every gallery button.
//!
//! Mutating handlers compute a new card list with the collection operations
//! and re-project it. Timed steps (the add loading transition, the shuffle
//! shake, transient flip/bounce classes) are scheduled tasks keyed by
//! purpose, so a pending step can be replaced or cancelled.
//!
//! The controller is `Idle` except while an add's loading transition runs.
//! A second add during that window is ignored.
//!
//! The scheduler's clock follows wall time: [`Controller::sync_to`] runs
//! before every request and advances it by the time since the last one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::gallery::card::{Card, CardId};
use crate::gallery::collection::{self, CardCollection};
use crate::gallery::projector::{self, ProjectOptions};
use crate::gallery::rng::GalleryRng;
use crate::gallery::scheduler::Scheduler;
use crate::gallery::state::AppState;
use crate::gallery::surface::{Detail, Surface, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    /// An add is waiting out its loading transition.
    Busy,
}

/// What a scheduled task is for. At most one task per key is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKey {
    PendingAdd,
    PendingShuffle,
    ClearTransition(CardId, Transition),
}

#[derive(Debug, Clone)]
pub enum Deferred {
    CompleteAdd,
    /// Cards read back when the shuffle started.
    CompleteShuffle(Vec<Card>),
    ClearTransition(CardId, Transition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Started,
    AlreadyPending,
}

/// Serializable view of the gallery for `/api/gallery/state`.
#[derive(Debug, Clone, Serialize)]
pub struct GallerySnapshot {
    pub cards: Vec<Card>,
    pub click_counter: u64,
    pub cards_issued: u64,
    pub floating_enabled: bool,
    pub phase: Phase,
    pub pending_tasks: usize,
}

pub struct Controller<S: Surface> {
    config: GalleryConfig,
    state: AppState,
    collection: CardCollection,
    surface: S,
    scheduler: Scheduler<TaskKey, Deferred>,
    rng: GalleryRng,
    phase: Phase,
    last_sync: Option<DateTime<Utc>>,
}

fn rng_for(config: &GalleryConfig) -> GalleryRng {
    match config.seed {
        Some(seed) => GalleryRng::seeded(seed),
        None => GalleryRng::from_entropy(),
    }
}

impl<S: Surface> Controller<S> {
    pub fn new(config: GalleryConfig, surface: S) -> Self {
        Self {
            rng: rng_for(&config),
            config,
            state: AppState::new(),
            collection: CardCollection::default(),
            surface,
            scheduler: Scheduler::new(),
            phase: Phase::Idle,
            last_sync: None,
        }
    }

    /// Render the initial cards from the seed set, in order.
    pub fn start(&mut self) {
        let cards = collection::generate(
            self.config.initial_cards,
            false,
            self.state.factory_mut(),
            &mut self.rng,
        );
        debug!(count = cards.len(), "gallery started");
        self.surface.set_counter(self.state.click_counter());
        self.reproject(cards);
    }

    /// Apply a new config and start over with fresh initial cards.
    ///
    /// Counters, the id sequence and the floating flag carry over. Pending
    /// steps are dropped, including an add still loading.
    pub fn reconfigure(&mut self, config: GalleryConfig) {
        self.cancel(TaskKey::PendingAdd);
        self.scheduler.clear();
        self.rng = rng_for(&config);
        self.config = config;
        self.surface.hide_detail();
        debug!(
            clicks = self.state.click_counter(),
            issued = self.state.cards_issued(),
            "gallery reconfigured"
        );
        self.start();
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn collection(&self) -> &CardCollection {
        &self.collection
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Milliseconds until the next scheduled step, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.scheduler.next_due_in()
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            cards: self.collection.to_vec(),
            click_counter: self.state.click_counter(),
            cards_issued: self.state.cards_issued(),
            floating_enabled: self.state.floating_enabled(),
            phase: self.phase,
            pending_tasks: self.scheduler.pending(),
        }
    }

    // ── Handlers ───────────────────────────────────────────────────────

    /// Show the loading transition and schedule one random card to be
    /// appended when it ends.
    pub fn add(&mut self) -> AddOutcome {
        if self.phase == Phase::Busy {
            warn!("add ignored: previous add still loading");
            return AddOutcome::AlreadyPending;
        }
        self.phase = Phase::Busy;
        self.surface.set_loading(true);
        self.scheduler
            .schedule(TaskKey::PendingAdd, self.config.loading_ms, Deferred::CompleteAdd);
        debug!(delay_ms = self.config.loading_ms, "add started");
        AddOutcome::Started
    }

    /// Shake every displayed card, then project the read-back cards in a new
    /// random order once the shake ends.
    pub fn shuffle(&mut self) {
        let read_back =
            collection::extract_from_presentation(self.surface.card_nodes(), self.state.factory_mut());
        let ids: Vec<CardId> = self.surface.card_nodes().iter().map(|n| n.card_id).collect();
        for id in ids {
            self.surface.add_transition(id, Transition::Shake);
        }
        debug!(count = read_back.len(), delay_ms = self.config.shake_ms, "shuffle started");
        self.scheduler.schedule(
            TaskKey::PendingShuffle,
            self.config.shake_ms,
            Deferred::CompleteShuffle(read_back),
        );
    }

    /// Flip floating on or off, or force it to `force`. Returns the new value.
    pub fn toggle_float(&mut self, force: Option<bool>) -> bool {
        let enabled = force.unwrap_or(!self.state.floating_enabled());
        self.state.set_floating(enabled);

        let ids: Vec<CardId> = self.surface.card_nodes().iter().map(|n| n.card_id).collect();
        for id in ids {
            if enabled {
                self.surface.add_transition(id, Transition::Float);
            } else {
                self.surface.remove_transition(id, Transition::Float);
            }
        }
        debug!(enabled, "floating toggled");
        enabled
    }

    /// Count a click on `id`, flip its node and open the detail panel.
    /// Returns the card's updated click count.
    pub fn inspect(&mut self, id: CardId) -> Result<u32, GalleryError> {
        if self.collection.get(id).is_none() {
            return Err(GalleryError::UnknownCard(id));
        }

        let total = self.state.record_click();
        self.surface.set_counter(total);
        self.play_transient(id, Transition::Flip, self.config.flip_ms);

        let card = self
            .collection
            .get_mut(id)
            .ok_or(GalleryError::UnknownCard(id))?;
        card.click_count += 1;
        let detail = Detail {
            title: format!("{} {}", card.icon, card.title),
            body: card.description.clone(),
            clicks: card.click_count,
        };
        let clicks = card.click_count;
        self.surface.show_detail(detail);

        debug!(card = %id, clicks, total, "card inspected");
        Ok(clicks)
    }

    /// Short scale-bounce on pointer-enter.
    pub fn bounce(&mut self, id: CardId) -> Result<(), GalleryError> {
        if self.collection.get(id).is_none() {
            return Err(GalleryError::UnknownCard(id));
        }
        self.play_transient(id, Transition::Bounce, self.config.bounce_ms);
        Ok(())
    }

    pub fn dismiss(&mut self) {
        self.surface.hide_detail();
    }

    /// Advance the clock by `elapsed_ms` and run every step that became due.
    /// Returns how many ran.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let due = self.scheduler.advance(elapsed_ms);
        let ran = due.len();
        for (_, task) in due {
            self.run(task);
        }
        ran
    }

    /// Advance the clock to wall time `now` and run what became due.
    ///
    /// The first call only records `now`. A `now` earlier than the last sync
    /// (clock adjustment) runs nothing and keeps the later instant.
    pub fn sync_to(&mut self, now: DateTime<Utc>) -> usize {
        let Some(last) = self.last_sync else {
            self.last_sync = Some(now);
            return 0;
        };
        let elapsed = (now - last).num_milliseconds();
        if elapsed <= 0 {
            return 0;
        }
        self.last_sync = Some(now);
        self.advance(elapsed as u64)
    }

    /// Drop a scheduled step. Cancelling a pending add returns to `Idle`.
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        let cancelled = self.scheduler.cancel(&key);
        if cancelled && key == TaskKey::PendingAdd {
            self.phase = Phase::Idle;
            self.surface.set_loading(false);
        }
        cancelled
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn run(&mut self, task: Deferred) {
        match task {
            Deferred::CompleteAdd => self.complete_add(),
            Deferred::CompleteShuffle(cards) => {
                let shuffled = collection::shuffle(&cards, &mut self.rng);
                debug!(count = shuffled.len(), "shuffle applied");
                self.reproject(shuffled);
            }
            Deferred::ClearTransition(id, transition) => {
                // The node may be gone after a re-projection.
                self.surface.remove_transition(id, transition);
            }
        }
    }

    fn complete_add(&mut self) {
        let new_cards = collection::generate(1, true, self.state.factory_mut(), &mut self.rng);
        let mut cards =
            collection::extract_from_presentation(self.surface.card_nodes(), self.state.factory_mut());
        cards.extend(new_cards);
        debug!(count = cards.len(), "add completed");

        self.reproject(cards);
        self.surface.set_loading(false);
        self.phase = Phase::Idle;
    }

    fn play_transient(&mut self, id: CardId, transition: Transition, duration_ms: u64) {
        if self.surface.add_transition(id, transition) {
            self.scheduler.schedule(
                TaskKey::ClearTransition(id, transition),
                duration_ms,
                Deferred::ClearTransition(id, transition),
            );
        }
    }

    fn reproject(&mut self, cards: Vec<Card>) {
        self.collection = CardCollection::from_cards(cards);
        projector::project(
            &self.collection,
            &mut self.surface,
            ProjectOptions {
                stagger_ms: self.config.stagger_ms,
                floating: self.state.floating_enabled(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::seeds::SEED_CARDS;
    use crate::gallery::surface::HtmlSurface;

    fn gallery() -> Controller<HtmlSurface> {
        let mut c = Controller::new(
            GalleryConfig {
                seed: Some(7),
                ..GalleryConfig::default()
            },
            HtmlSurface::new(),
        );
        c.start();
        c
    }

    fn titles(c: &Controller<HtmlSurface>) -> Vec<String> {
        c.surface().card_nodes().iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn start_projects_seed_cards() {
        let c = gallery();
        assert_eq!(c.collection().len(), 6);
        assert_eq!(c.surface().card_nodes().len(), 6);
        assert_eq!(titles(&c)[0], SEED_CARDS[0].title);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn inspect_twice_counts_per_card_and_globally() {
        let mut c = gallery();
        let id = c.collection().iter().next().unwrap().id;

        assert_eq!(c.inspect(id), Ok(1));
        assert_eq!(c.state().click_counter(), 1);
        assert_eq!(c.surface().detail().unwrap().clicks, 1);

        assert_eq!(c.inspect(id), Ok(2));
        assert_eq!(c.state().click_counter(), 2);
        assert_eq!(c.collection().get(id).unwrap().click_count, 2);
        assert_eq!(c.surface().counter(), 2);
        let detail = c.surface().detail().unwrap();
        assert_eq!(detail.clicks, 2);
        assert!(detail.title.contains(SEED_CARDS[0].title));
    }

    #[test]
    fn inspect_flips_then_clears() {
        let mut c = gallery();
        let id = c.collection().iter().next().unwrap().id;
        c.inspect(id).unwrap();
        assert!(c.surface().card_nodes()[0].has(Transition::Flip));
        assert_eq!(c.next_due_in(), Some(c.config().flip_ms));

        c.advance(c.config().flip_ms);
        assert!(!c.surface().card_nodes()[0].has(Transition::Flip));
    }

    #[test]
    fn inspect_unknown_card_changes_nothing() {
        let mut c = gallery();
        let err = c.inspect(CardId::new(999)).unwrap_err();
        assert_eq!(err, GalleryError::UnknownCard(CardId::new(999)));
        assert_eq!(c.state().click_counter(), 0);
        assert!(c.surface().detail().is_none());
    }

    #[test]
    fn dismiss_closes_detail_without_touching_cards() {
        let mut c = gallery();
        let id = c.collection().iter().next().unwrap().id;
        c.inspect(id).unwrap();
        c.dismiss();
        assert!(c.surface().detail().is_none());
        assert_eq!(c.collection().get(id).unwrap().click_count, 1);
    }

    #[test]
    fn add_goes_busy_then_appends_one_card() {
        let mut c = gallery();
        let before = titles(&c);

        assert_eq!(c.add(), AddOutcome::Started);
        assert_eq!(c.phase(), Phase::Busy);
        assert!(c.surface().is_loading());
        assert_eq!(c.surface().card_nodes().len(), 6);

        c.advance(c.config().loading_ms - 1);
        assert_eq!(c.phase(), Phase::Busy);

        c.advance(1);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.surface().is_loading());
        let after = titles(&c);
        assert_eq!(after.len(), 7);
        assert_eq!(&after[..6], &before[..]);
        assert!(after[6].ends_with(" #1"));
    }

    #[test]
    fn add_while_busy_is_ignored() {
        let mut c = gallery();
        assert_eq!(c.add(), AddOutcome::Started);
        c.advance(100);
        assert_eq!(c.add(), AddOutcome::AlreadyPending);
        c.advance(c.config().loading_ms);
        assert_eq!(c.collection().len(), 7);
        assert_eq!(c.snapshot().pending_tasks, 0);
    }

    #[test]
    fn add_reads_back_fresh_ids_and_resets_clicks() {
        let mut c = gallery();
        let first = c.collection().iter().next().unwrap().id;
        c.inspect(first).unwrap();
        c.add();
        c.advance(c.config().loading_ms);

        assert!(c.collection().get(first).is_none());
        assert!(c.collection().iter().all(|card| card.click_count == 0));
        assert_eq!(c.state().click_counter(), 1);
    }

    #[test]
    fn cancel_pending_add_returns_to_idle() {
        let mut c = gallery();
        c.add();
        assert!(c.cancel(TaskKey::PendingAdd));
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.surface().is_loading());
        c.advance(10_000);
        assert_eq!(c.collection().len(), 6);
    }

    #[test]
    fn shuffle_shakes_then_reorders_same_cards() {
        let mut c = gallery();
        let mut before = titles(&c);

        c.shuffle();
        assert!(c.surface().card_nodes().iter().all(|n| n.has(Transition::Shake)));
        assert_eq!(titles(&c), before);

        c.advance(c.config().shake_ms);
        let mut after = titles(&c);
        assert!(c.surface().card_nodes().iter().all(|n| !n.has(Transition::Shake)));
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn toggle_float_flips_and_forces() {
        let mut c = gallery();
        let original = c.state().floating_enabled();

        assert_eq!(c.toggle_float(None), !original);
        assert!(c.surface().card_nodes().iter().all(|n| n.has(Transition::Float)));
        assert_eq!(c.toggle_float(None), original);
        assert!(c.surface().card_nodes().iter().all(|n| !n.has(Transition::Float)));

        assert!(c.toggle_float(Some(true)));
        assert!(c.toggle_float(Some(true)));
        assert!(!c.toggle_float(Some(false)));
        assert!(!c.state().floating_enabled());
    }

    #[test]
    fn floating_survives_reprojection() {
        let mut c = gallery();
        c.toggle_float(Some(true));
        c.shuffle();
        c.advance(c.config().shake_ms);
        assert!(c.surface().card_nodes().iter().all(|n| n.has(Transition::Float)));
    }

    #[test]
    fn bounce_is_transient() {
        let mut c = gallery();
        let id = c.collection().iter().nth(2).unwrap().id;
        c.bounce(id).unwrap();
        assert!(c.surface().card_nodes()[2].has(Transition::Bounce));
        c.advance(c.config().bounce_ms);
        assert!(!c.surface().card_nodes()[2].has(Transition::Bounce));
        assert!(c.bounce(CardId::new(999)).is_err());
    }

    #[test]
    fn stale_clear_after_reprojection_is_harmless() {
        let mut c = gallery();
        let id = c.collection().iter().next().unwrap().id;
        c.inspect(id).unwrap();
        c.shuffle();
        // shake ends before the flip clear
        assert_eq!(c.advance(c.config().flip_ms), 2);
        assert_eq!(c.surface().card_nodes().len(), 6);
    }

    #[test]
    fn snapshot_reports_state() {
        let mut c = gallery();
        c.add();
        let snap = c.snapshot();
        assert_eq!(snap.cards.len(), 6);
        assert_eq!(snap.phase, Phase::Busy);
        assert_eq!(snap.pending_tasks, 1);
        assert_eq!(snap.cards_issued, 6);
    }

    #[test]
    fn reconfigure_keeps_counters_and_id_sequence() {
        let mut c = gallery();
        let id = c.collection().iter().next().unwrap().id;
        c.inspect(id).unwrap();
        c.inspect(id).unwrap();
        c.toggle_float(Some(true));
        c.add();

        c.reconfigure(GalleryConfig {
            initial_cards: 3,
            seed: Some(7),
            ..GalleryConfig::default()
        });

        assert_eq!(c.state().click_counter(), 2);
        assert_eq!(c.surface().counter(), 2);
        assert_eq!(c.state().cards_issued(), 9);
        assert_eq!(c.collection().len(), 3);
        assert!(c.collection().get(id).is_none());
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.surface().is_loading());
        assert!(c.surface().detail().is_none());
        assert_eq!(c.next_due_in(), None);
        assert!(c.surface().card_nodes().iter().all(|n| n.has(Transition::Float)));
    }

    #[test]
    fn sync_to_follows_wall_time() {
        let mut c = gallery();
        let t0 = Utc::now();
        assert_eq!(c.sync_to(t0), 0);
        c.add();

        for step in 1..=9 {
            c.sync_to(t0 + chrono::Duration::milliseconds(step * 100));
            let id = c.collection().iter().next().unwrap().id;
            c.inspect(id).unwrap();
            assert_eq!(c.phase(), Phase::Busy);
        }

        c.sync_to(t0 + chrono::Duration::milliseconds(1000));
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.collection().len(), 7);
    }

    #[test]
    fn sync_to_ignores_clock_going_backwards() {
        let mut c = gallery();
        let t0 = Utc::now();
        c.sync_to(t0);
        c.add();
        assert_eq!(c.sync_to(t0 - chrono::Duration::seconds(5)), 0);
        assert_eq!(c.next_due_in(), Some(c.config().loading_ms));
        c.sync_to(t0 + chrono::Duration::milliseconds(999));
        assert_eq!(c.phase(), Phase::Busy);
    }
}
