//! End-to-end gallery flow through `handle_request`, as the Service Worker
//! bridge drives it.

use magic_card_gallery::gallery::card::CardId;
use magic_card_gallery::gallery::state::{reset_gallery, with_gallery, with_gallery_mut};
use magic_card_gallery::handle_request;

fn post(path: &str, body: &str) -> String {
    handle_request("POST", path, "", body)
}

/// Let `ms` pass on the gallery clock, then post the tick the page would.
fn tick_after(ms: u64) -> String {
    with_gallery_mut(|g| g.advance(ms));
    post("/api/gallery/tick", "")
}

fn snapshot() -> serde_json::Value {
    let json = handle_request("GET", "/api/gallery/state", "", "");
    serde_json::from_str(&json).unwrap()
}

fn card_ids() -> Vec<CardId> {
    with_gallery(|g| g.collection().iter().map(|c| c.id).collect())
}

fn titles() -> Vec<String> {
    with_gallery(|g| g.collection().iter().map(|c| c.title.clone()).collect())
}

#[test]
fn add_shuffle_inspect_session() {
    reset_gallery();
    post("/api/gallery/config", r#"{"seed": 2024, "loading_ms": 200, "shake_ms": 100}"#);
    assert_eq!(card_ids().len(), 6);

    // Add: busy until the loading transition ends
    let html = post("/api/gallery/add", "");
    assert!(html.contains("Summoning a new card"));
    assert!(html.contains("load delay:200ms"));
    let html = tick_after(200);
    assert!(!html.contains("Summoning a new card"));
    assert_eq!(card_ids().len(), 7);

    // Shuffle keeps the same titles
    let mut before = titles();
    post("/api/gallery/shuffle", "");
    tick_after(100);
    let mut after = titles();
    before.sort();
    after.sort();
    assert_eq!(before, after);

    // Inspect the same card twice
    let target = card_ids()[3];
    let html = post("/api/gallery/inspect", &format!("card={}", target));
    assert!(html.contains("Clicks: 1"));
    let html = post("/api/gallery/inspect", &format!("card={}", target));
    assert!(html.contains("Clicks: 2"));
    assert!(html.contains("Clicked 2 times"));
    assert_eq!(
        with_gallery(|g| g.collection().get(target).map(|c| c.click_count)),
        Some(2)
    );

    let html = post("/api/gallery/dismiss", "");
    assert!(html.contains("modal hidden"));

    reset_gallery();
}

#[test]
fn shuffle_reads_back_with_fresh_ids() {
    reset_gallery();
    post("/api/gallery/config", r#"{"seed": 1, "initial_cards": 3}"#);
    let original = card_ids();
    let original_titles = titles();

    post("/api/gallery/shuffle", "");
    tick_after(500);

    let ids = card_ids();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| !original.contains(id)));
    let mut a = original_titles;
    let mut b = titles();
    a.sort();
    b.sort();
    assert_eq!(a, b);

    reset_gallery();
}

#[test]
fn float_state_reported_in_snapshot() {
    reset_gallery();
    post("/api/gallery/float", "");
    let json = handle_request("GET", "/api/gallery/state", "", "");
    assert!(json.contains("\"floating_enabled\":true"));
    post("/api/gallery/float", "enabled=false");
    let json = handle_request("GET", "/api/gallery/state", "", "");
    assert!(json.contains("\"floating_enabled\":false"));
    reset_gallery();
}

#[test]
fn counters_never_go_backwards_across_config() {
    reset_gallery();
    let target = card_ids()[0];
    post("/api/gallery/inspect", &format!("card={}", target));
    post("/api/gallery/inspect", &format!("card={}", target));
    let before = snapshot();

    let html = post("/api/gallery/config", r#"{"initial_cards": 2, "seed": 5}"#);
    assert!(html.contains("Clicks: 2"));
    let after = snapshot();
    assert_eq!(after["click_counter"], before["click_counter"]);
    assert!(after["cards_issued"].as_u64() > before["cards_issued"].as_u64());

    // fresh ids never collide with ones already handed out
    let new_ids = card_ids();
    assert_eq!(new_ids.len(), 2);
    assert!(new_ids.iter().all(|id| *id > CardId::new(6)));

    reset_gallery();
}

#[test]
fn pending_add_lands_without_a_tick() {
    reset_gallery();
    post("/api/gallery/config", r#"{"loading_ms": 30}"#);
    post("/api/gallery/add", "");
    assert_eq!(snapshot()["phase"], "busy");

    // No tick posted: whatever request comes next finds the add completed.
    std::thread::sleep(std::time::Duration::from_millis(60));
    let state = snapshot();
    assert_eq!(state["phase"], "idle");
    assert_eq!(state["cards"].as_array().map(Vec::len), Some(7));

    reset_gallery();
}
