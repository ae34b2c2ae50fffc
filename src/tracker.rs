//! The tracker: one event loop over the roster.
//!
//! `Tracker` turns user intents into roster actions, keeps one `CardView`
//! per player, runs camera sessions and applies their results. All roster
//! changes happen synchronously inside `&mut self` calls; the only
//! asynchronous inputs are capture events, which the caller feeds back
//! through `on_capture_event`.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use realm_tracker::capture::UnavailableCamera;
//! use realm_tracker::core::{PlayerId, RosterConfig};
//! use realm_tracker::tracker::{Intent, Tracker};
//!
//! # async fn demo() {
//! let mut tracker = Tracker::new(RosterConfig::default(), Arc::new(UnavailableCamera::default()));
//! tracker.handle(Intent::AdjustHealth(PlayerId::new(1), -2), Instant::now());
//!
//! tracker.handle(Intent::OpenCamera(PlayerId::new(1)), Instant::now());
//! if let Some(event) = tracker.next_capture_event().await {
//!     tracker.on_capture_event(event, Instant::now());
//! }
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tokio::sync::mpsc;

use crate::capture::{
    load_photo_file, CameraDevice, CaptureEvent, CaptureHandle, CaptureOutcome, CaptureSession,
};
use crate::core::{PlayerId, Roster, RosterAction, RosterConfig, RosterHistory};
use crate::error::CaptureError;
use crate::view::{CameraState, CardSnapshot, CardView, Feedback};

/// A user request coming from the front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Add a player with default stats.
    Add,
    /// Remove a player. Refused while the card's camera is in use.
    Remove(PlayerId),
    /// Enter name edit mode.
    BeginRename(PlayerId),
    /// Replace the text in the name editor.
    EditName(PlayerId, String),
    /// Submit the edited name.
    CommitRename(PlayerId),
    /// Leave edit mode without renaming.
    CancelRename(PlayerId),
    /// Heal (positive) or damage (negative).
    AdjustHealth(PlayerId, i64),
    /// Raise or lower shields.
    AdjustShields(PlayerId, i64),
    /// Start a camera session for the card.
    OpenCamera(PlayerId),
    /// Take the portrait from the open camera.
    Capture(PlayerId),
    /// Close the camera, discarding any pending result.
    CloseCamera(PlayerId),
    /// Remove the portrait.
    ClearPhoto(PlayerId),
    /// Step back one roster snapshot.
    Undo,
    /// Re-apply an undone snapshot.
    Redo,
}

/// Roster, per-card view state and capture sessions.
pub struct Tracker {
    history: RosterHistory,
    cards: FxHashMap<PlayerId, CardView>,
    captures: FxHashMap<PlayerId, CaptureHandle>,
    session: CaptureSession,
    events_tx: mpsc::UnboundedSender<CaptureEvent>,
    events_rx: mpsc::UnboundedReceiver<CaptureEvent>,
    next_attempt: u64,
}

impl Tracker {
    /// Create a tracker with `config.initial_players` players.
    #[must_use]
    pub fn new(config: RosterConfig, camera: Arc<dyn CameraDevice>) -> Self {
        Self::with_session(config, CaptureSession::new(camera))
    }

    /// Create a tracker with custom capture options.
    #[must_use]
    pub fn with_session(config: RosterConfig, session: CaptureSession) -> Self {
        let history = RosterHistory::from_config(config);
        let cards = history.present().ids().map(|id| (id, CardView::new())).collect();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            history,
            cards,
            captures: FxHashMap::default(),
            session,
            events_tx,
            events_rx,
            next_attempt: 0,
        }
    }

    // === Queries ===

    /// The current roster snapshot.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        self.history.present()
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &RosterHistory {
        &self.history
    }

    /// View state of a card.
    #[must_use]
    pub fn card(&self, id: PlayerId) -> Option<&CardView> {
        self.cards.get(&id)
    }

    /// Everything needed to draw the cards, in roster order.
    #[must_use]
    pub fn cards(&self, now: Instant) -> Vec<CardSnapshot<'_>> {
        self.roster()
            .iter()
            .filter_map(|player| {
                self.cards
                    .get(&player.id)
                    .map(|view| CardSnapshot::new(player, view, now))
            })
            .collect()
    }

    // === Intents ===

    /// Handle a user intent. Returns true if the roster changed.
    pub fn handle(&mut self, intent: Intent, now: Instant) -> bool {
        tracing::trace!(?intent, "handling intent");
        match intent {
            Intent::Add => self.apply(RosterAction::Add, now),
            Intent::Remove(id) => {
                if self.cards.get(&id).is_some_and(|c| !c.can_remove()) {
                    tracing::debug!(player = %id, "remove ignored while camera is open");
                    return false;
                }
                self.apply(RosterAction::Remove { id }, now)
            }
            Intent::BeginRename(id) => {
                if let (Some(player), Some(card)) =
                    (self.history.present().get(id), self.cards.get_mut(&id))
                {
                    card.name_editor.begin(&player.name);
                }
                false
            }
            Intent::EditName(id, text) => {
                if let Some(card) = self.cards.get_mut(&id) {
                    card.name_editor.set_input(text);
                }
                false
            }
            Intent::CommitRename(id) => {
                let name = self.cards.get_mut(&id).and_then(|c| c.name_editor.commit());
                match name {
                    Some(name) => self.apply(RosterAction::Rename { id, name }, now),
                    None => false,
                }
            }
            Intent::CancelRename(id) => {
                if let Some(card) = self.cards.get_mut(&id) {
                    card.name_editor.cancel();
                }
                false
            }
            Intent::AdjustHealth(id, amount) => {
                self.apply(RosterAction::AdjustHealth { id, amount }, now)
            }
            Intent::AdjustShields(id, amount) => {
                self.apply(RosterAction::AdjustShields { id, amount }, now)
            }
            Intent::OpenCamera(id) => {
                self.open_camera(id);
                false
            }
            Intent::Capture(id) => {
                let requested = self.captures.get(&id).is_some_and(|handle| handle.capture());
                if !requested {
                    tracing::debug!(player = %id, "capture requested without a live camera");
                }
                false
            }
            Intent::CloseCamera(id) => {
                self.close_camera(id);
                false
            }
            Intent::ClearPhoto(id) => self.apply(RosterAction::SetPhoto { id, photo: None }, now),
            Intent::Undo => {
                let before = self.history.present().clone();
                self.history.undo() && self.sync(&before, now)
            }
            Intent::Redo => {
                let before = self.history.present().clone();
                self.history.redo() && self.sync(&before, now)
            }
        }
    }

    /// Expire finished flashes. Returns how many were cleared.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.cards
            .values_mut()
            .map(|card| card.tick(now))
            .filter(|cleared| *cleared)
            .count()
    }

    // === Photos ===

    /// Wait for the next capture result.
    pub async fn next_capture_event(&mut self) -> Option<CaptureEvent> {
        self.events_rx.recv().await
    }

    /// Apply a capture result. Results from closed or superseded sessions
    /// are dropped. Returns true if the roster changed.
    pub fn on_capture_event(&mut self, event: CaptureEvent, now: Instant) -> bool {
        let CaptureEvent { player, attempt, outcome } = event;

        let Some(card) = self.cards.get_mut(&player) else {
            tracing::debug!(%player, attempt, "capture result for a removed player");
            return false;
        };
        if card.live_attempt() != Some(attempt) {
            tracing::debug!(%player, attempt, "ignoring stale capture result");
            return false;
        }
        self.captures.remove(&player);

        match outcome {
            CaptureOutcome::Captured(photo) => {
                card.camera = CameraState::Closed;
                tracing::info!(%player, %photo, "portrait captured");
                self.apply(RosterAction::SetPhoto { id: player, photo: Some(photo) }, now)
            }
            CaptureOutcome::Failed(e) => {
                tracing::warn!(%player, error = %e, "camera capture failed");
                card.camera = CameraState::Failed { message: e.to_string() };
                false
            }
        }
    }

    /// Load a portrait from an image file. Returns true if the roster
    /// changed.
    pub async fn upload_photo(
        &mut self,
        id: PlayerId,
        path: impl AsRef<Path>,
        now: Instant,
    ) -> Result<bool, CaptureError> {
        let photo = match load_photo_file(path.as_ref()).await {
            Ok(photo) => photo,
            Err(e) => {
                tracing::warn!(
                    player = %id,
                    path = %path.as_ref().display(),
                    error = %e,
                    "photo upload failed"
                );
                return Err(e);
            }
        };
        Ok(self.apply(RosterAction::SetPhoto { id, photo: Some(photo) }, now))
    }

    /// Cancel every capture session and wait for the devices to be released.
    pub async fn shutdown(mut self) {
        for (_, handle) in self.captures.drain() {
            handle.shutdown().await;
        }
    }

    // === Internals ===

    fn open_camera(&mut self, id: PlayerId) {
        let Some(card) = self.cards.get_mut(&id) else {
            return;
        };
        if let Some(previous) = self.captures.remove(&id) {
            previous.cancel();
        }

        let attempt = self.next_attempt;
        self.next_attempt += 1;

        let handle = self.session.start(id, attempt, self.events_tx.clone());
        card.camera = CameraState::Live { attempt };
        self.captures.insert(id, handle);
        tracing::debug!(player = %id, attempt, "camera opened");
    }

    fn close_camera(&mut self, id: PlayerId) {
        if let Some(handle) = self.captures.remove(&id) {
            handle.cancel();
        }
        if let Some(card) = self.cards.get_mut(&id) {
            card.camera = CameraState::Closed;
        }
    }

    fn apply(&mut self, action: RosterAction, now: Instant) -> bool {
        tracing::debug!(
            action = action.kind(),
            target = ?action.target(),
            "applying roster action"
        );
        let before = self.history.present().clone();
        self.history.apply(action);
        self.sync(&before, now)
    }

    /// Bring card views in line with the current roster and start flashes.
    fn sync(&mut self, before: &Roster, now: Instant) -> bool {
        let diff = self.history.present().diff(before);

        for id in &diff.removed {
            self.cards.remove(id);
            if let Some(handle) = self.captures.remove(id) {
                handle.cancel();
            }
            tracing::info!(player = %id, "player removed");
        }
        for id in &diff.added {
            self.cards.insert(*id, CardView::new());
            tracing::info!(player = %id, "player added");
        }
        for delta in &diff.changed {
            if let (Some(feedback), Some(card)) =
                (Feedback::from_delta(delta), self.cards.get_mut(&delta.id))
            {
                card.show(feedback, now);
            }
        }

        self.history.present() != before
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("roster", self.roster())
            .field("live_captures", &self.captures.len())
            .finish()
    }
}
