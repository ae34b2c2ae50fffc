//! Tracker integration tests.
//!
//! These tests drive the tracker the way a front-end would: intents in,
//! roster snapshots and card state out.

mod common;

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{wait_until, FakeCamera};
use realm_tracker::capture::{CaptureEvent, CaptureOutcome, UnavailableCamera};
use realm_tracker::{
    CameraState, FeedbackKind, HealthTier, Intent, Photo, PlayerId, RosterConfig, Tracker,
    FLASH_DURATION,
};

fn tracker() -> Tracker {
    Tracker::new(RosterConfig::default(), Arc::new(UnavailableCamera::default()))
}

fn p(id: u32) -> PlayerId {
    PlayerId::new(id)
}

// =============================================================================
// Roster Tests
// =============================================================================

/// Test that a tracker starts with one default player and a card for it.
#[test]
fn test_starts_with_one_player() {
    let tracker = tracker();

    assert_eq!(tracker.roster().len(), 1);
    let player = tracker.roster().get(p(1)).unwrap();
    assert_eq!(player.name, "Player 1");
    assert_eq!((player.health, player.shields), (10, 0));
    assert!(tracker.card(p(1)).is_some());
}

/// Test that adding and removing players keeps cards in sync.
#[test]
fn test_cards_follow_membership() {
    let mut tracker = tracker();
    let now = Instant::now();

    assert!(tracker.handle(Intent::Add, now));
    assert!(tracker.card(p(2)).is_some());

    assert!(tracker.handle(Intent::Remove(p(1)), now));
    assert!(tracker.card(p(1)).is_none());
    assert_eq!(tracker.cards(now).len(), 1);

    // Removing again is a no-op
    assert!(!tracker.handle(Intent::Remove(p(1)), now));
}

/// Test the documented absorption example end to end.
#[test]
fn test_damage_through_shields() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::AdjustShields(p(1), 3), now);
    tracker.handle(Intent::AdjustHealth(p(1), -5), now);

    let player = tracker.roster().get(p(1)).unwrap();
    assert_eq!((player.health, player.shields), (8, 0));
}

/// Test that defeated players stay on the roster.
#[test]
fn test_defeated_player_stays() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::AdjustHealth(p(1), -15), now);

    let cards = tracker.cards(now);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].player.health, -5);
    assert_eq!(cards[0].tier, HealthTier::Defeated);
}

// =============================================================================
// Feedback Tests
// =============================================================================

/// Test that damage flashes with the health lost, not the raw amount.
#[test]
fn test_damage_flash() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::AdjustShields(p(1), 3), now);
    tracker.handle(Intent::AdjustHealth(p(1), -5), now);

    let flash = tracker.card(p(1)).unwrap().flash(now).unwrap();
    assert_eq!(flash.feedback.kind, FeedbackKind::Damage);
    assert_eq!(flash.feedback.value, -2);
}

/// Test that fully absorbed damage shows a shield break.
#[test]
fn test_shield_break_flash() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::AdjustShields(p(1), 5), now);
    tracker.handle(Intent::AdjustHealth(p(1), -3), now);

    let flash = tracker.card(p(1)).unwrap().flash(now).unwrap();
    assert_eq!(flash.feedback.kind, FeedbackKind::ShieldBreak);
    assert_eq!(flash.feedback.label(), "-3");
}

/// Test that heals flash and that flashes expire on tick.
#[test]
fn test_heal_flash_expires() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::AdjustHealth(p(1), 4), now);
    assert_eq!(tracker.cards(now)[0].flash.unwrap().label(), "+4");

    assert_eq!(tracker.tick(now + Duration::from_millis(100)), 0);
    assert_eq!(tracker.tick(now + FLASH_DURATION), 1);
    assert!(tracker.card(p(1)).unwrap().flash(now).is_none());
}

/// Test that raising shields from zero does not flash.
#[test]
fn test_shield_gain_no_flash() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::AdjustShields(p(1), 1), now);
    assert!(tracker.card(p(1)).unwrap().flash(now).is_none());
}

// =============================================================================
// Rename Tests
// =============================================================================

/// Test renaming through the inline editor.
#[test]
fn test_rename_flow() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::BeginRename(p(1)), now);
    assert_eq!(tracker.card(p(1)).unwrap().name_editor.input(), Some("Player 1"));

    tracker.handle(Intent::EditName(p(1), "Ayla".to_string()), now);
    assert!(tracker.handle(Intent::CommitRename(p(1)), now));
    assert_eq!(tracker.roster().get(p(1)).unwrap().name, "Ayla");
    assert!(!tracker.card(p(1)).unwrap().name_editor.is_editing());
}

/// Test that committing an empty name stores the fallback label.
#[test]
fn test_rename_empty_falls_back() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::BeginRename(p(1)), now);
    tracker.handle(Intent::EditName(p(1), String::new()), now);
    tracker.handle(Intent::CommitRename(p(1)), now);

    assert_eq!(tracker.roster().get(p(1)).unwrap().name, "Player");
}

/// Test that cancelling an edit keeps the old name.
#[test]
fn test_rename_cancel() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::BeginRename(p(1)), now);
    tracker.handle(Intent::EditName(p(1), "Typo".to_string()), now);
    tracker.handle(Intent::CancelRename(p(1)), now);

    assert!(!tracker.handle(Intent::CommitRename(p(1)), now));
    assert_eq!(tracker.roster().get(p(1)).unwrap().name, "Player 1");
}

// =============================================================================
// History Tests
// =============================================================================

/// Test undo and redo, including card bookkeeping.
#[test]
fn test_undo_redo() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::Add, now);
    tracker.handle(Intent::AdjustHealth(p(2), -3), now);

    assert!(tracker.handle(Intent::Undo, now));
    assert_eq!(tracker.roster().get(p(2)).unwrap().health, 10);

    assert!(tracker.handle(Intent::Undo, now));
    assert!(tracker.card(p(2)).is_none());
    assert!(!tracker.handle(Intent::Undo, now));

    assert!(tracker.handle(Intent::Redo, now));
    assert!(tracker.card(p(2)).is_some());
    assert!(tracker.handle(Intent::Redo, now));
    assert_eq!(tracker.roster().get(p(2)).unwrap().health, 7);
    assert!(!tracker.handle(Intent::Redo, now));
}

/// Test that an id freed by undoing its creation goes to nobody else.
#[test]
fn test_undo_add_never_reissues_id() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::Add, now);
    tracker.handle(Intent::BeginRename(p(2)), now);
    tracker.handle(Intent::EditName(p(2), "Ayla".to_string()), now);
    tracker.handle(Intent::CommitRename(p(2)), now);
    tracker.handle(Intent::Undo, now);
    tracker.handle(Intent::Undo, now);

    assert!(tracker.handle(Intent::Add, now));
    let ids: Vec<PlayerId> = tracker.roster().ids().collect();
    assert_eq!(ids, vec![p(1), p(3)]);
    assert!(tracker.card(p(2)).is_none());
    assert!(tracker.card(p(3)).is_some());
}

/// Test that undoing a rename reports a change even though vitality is equal.
#[test]
fn test_undo_rename() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.handle(Intent::BeginRename(p(1)), now);
    tracker.handle(Intent::EditName(p(1), "Bram".to_string()), now);
    tracker.handle(Intent::CommitRename(p(1)), now);

    assert!(tracker.handle(Intent::Undo, now));
    assert_eq!(tracker.roster().get(p(1)).unwrap().name, "Player 1");
}

// =============================================================================
// Photo Tests
// =============================================================================

/// Test the camera flow from open to portrait.
#[tokio::test]
async fn test_camera_capture_sets_photo() {
    let camera = FakeCamera::ready(b"portrait");
    let stats = camera.stats();
    let mut tracker = Tracker::new(RosterConfig::default(), Arc::new(camera));
    let now = Instant::now();

    tracker.handle(Intent::OpenCamera(p(1)), now);
    assert!(tracker.card(p(1)).unwrap().is_camera_live());

    // Remove is refused while the camera is live
    assert!(!tracker.handle(Intent::Remove(p(1)), now));

    tracker.handle(Intent::Capture(p(1)), now);
    let event = tracker.next_capture_event().await.unwrap();
    assert!(tracker.on_capture_event(event, now));

    let photo = tracker.roster().get(p(1)).unwrap().photo.clone().unwrap();
    assert_eq!(photo.decode().unwrap(), b"portrait");
    assert_eq!(tracker.card(p(1)).unwrap().camera, CameraState::Closed);

    wait_until(|| stats.stops() == 1).await;
}

/// Test that a camera failure is shown on the card and leaves the player alone.
#[tokio::test]
async fn test_camera_failure_reported() {
    let mut tracker = Tracker::new(RosterConfig::default(), Arc::new(FakeCamera::denied()));
    let now = Instant::now();
    let before = tracker.roster().clone();

    tracker.handle(Intent::OpenCamera(p(1)), now);
    let event = tracker.next_capture_event().await.unwrap();
    assert!(!tracker.on_capture_event(event, now));

    let card = tracker.card(p(1)).unwrap();
    assert!(card.camera_error().unwrap().contains("camera permissions"));
    assert_eq!(tracker.roster(), &before);

    tracker.handle(Intent::CloseCamera(p(1)), now);
    assert_eq!(tracker.card(p(1)).unwrap().camera, CameraState::Closed);
    assert!(tracker.handle(Intent::Remove(p(1)), now));
}

/// Test that a result from a closed session never lands.
#[tokio::test]
async fn test_stale_capture_ignored() {
    let mut tracker = Tracker::new(RosterConfig::default(), Arc::new(FakeCamera::ready(b"x")));
    let now = Instant::now();

    tracker.handle(Intent::OpenCamera(p(1)), now);
    let first = tracker.card(p(1)).unwrap().live_attempt().unwrap();
    tracker.handle(Intent::CloseCamera(p(1)), now);
    tracker.handle(Intent::OpenCamera(p(1)), now);

    let late = CaptureEvent {
        player: p(1),
        attempt: first,
        outcome: CaptureOutcome::Captured(Photo::encode("image/jpeg", b"late")),
    };
    assert!(!tracker.on_capture_event(late, now));
    assert!(tracker.roster().get(p(1)).unwrap().photo.is_none());
    assert!(tracker.card(p(1)).unwrap().is_camera_live());
}

/// Test that a result for a removed player is dropped.
#[tokio::test]
async fn test_capture_for_removed_player_ignored() {
    let mut tracker = tracker();
    let now = Instant::now();
    tracker.handle(Intent::Remove(p(1)), now);

    let event = CaptureEvent {
        player: p(1),
        attempt: 0,
        outcome: CaptureOutcome::Captured(Photo::encode("image/jpeg", b"x")),
    };
    assert!(!tracker.on_capture_event(event, now));
}

/// Test that undoing a player's creation cancels its camera.
#[tokio::test]
async fn test_undo_add_closes_camera() {
    let camera = FakeCamera::ready(b"x");
    let stats = camera.stats();
    let mut tracker = Tracker::new(RosterConfig::default(), Arc::new(camera));
    let now = Instant::now();

    tracker.handle(Intent::Add, now);
    tracker.handle(Intent::OpenCamera(p(2)), now);
    wait_until(|| stats.opens() == 1).await;

    tracker.handle(Intent::Undo, now);
    assert!(tracker.card(p(2)).is_none());
    wait_until(|| stats.stops() == 1).await;
}

/// Test portrait upload from a file, and clearing it.
#[tokio::test]
async fn test_upload_and_clear_photo() {
    let mut tracker = tracker();
    let now = Instant::now();

    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    file.write_all(b"jpeg").unwrap();

    assert!(tracker.upload_photo(p(1), file.path(), now).await.unwrap());
    let photo = tracker.roster().get(p(1)).unwrap().photo.clone().unwrap();
    assert_eq!(photo.mime(), Some("image/jpeg"));

    assert!(tracker.handle(Intent::ClearPhoto(p(1)), now));
    assert!(tracker.roster().get(p(1)).unwrap().photo.is_none());
}

/// Test that a failed upload leaves the roster unchanged.
#[tokio::test]
async fn test_upload_failure() {
    let mut tracker = tracker();
    let before = tracker.roster().clone();

    let result = tracker.upload_photo(p(1), "/missing/face.png", Instant::now()).await;
    assert!(result.is_err());
    assert_eq!(tracker.roster(), &before);
}

/// Test that shutdown releases live cameras.
#[tokio::test]
async fn test_shutdown_releases_cameras() {
    let camera = FakeCamera::ready(b"x");
    let stats = camera.stats();
    let mut tracker = Tracker::new(RosterConfig::default(), Arc::new(camera));

    tracker.handle(Intent::OpenCamera(p(1)), Instant::now());
    wait_until(|| stats.opens() == 1).await;

    tracker.shutdown().await;
    assert_eq!(stats.stops(), 1);
}
