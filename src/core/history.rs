//! Snapshot history with undo and redo.
//!
//! Because roster snapshots are immutable and share structure, history is
//! just a list of earlier rosters.

use im::Vector;

use super::action::{ActionRecord, RosterAction};
use super::config::RosterConfig;
use super::roster::Roster;

/// Roster plus undo/redo stacks.
#[derive(Clone, Debug)]
pub struct RosterHistory {
    present: Roster,
    past: Vector<Roster>,
    future: Vec<Roster>,
    log: Vector<ActionRecord>,
    next_sequence: u64,
    limit: usize,
}

impl RosterHistory {
    /// Start a history at `initial`. The undo depth comes from the roster's
    /// configuration.
    #[must_use]
    pub fn new(initial: Roster) -> Self {
        let limit = initial.config().history_limit;
        Self {
            present: initial,
            past: Vector::new(),
            future: Vec::new(),
            log: Vector::new(),
            next_sequence: 0,
            limit,
        }
    }

    /// Start from a fresh roster populated per `config`.
    #[must_use]
    pub fn from_config(config: RosterConfig) -> Self {
        Self::new(Roster::with_initial_players(config))
    }

    /// The current snapshot.
    #[must_use]
    pub fn present(&self) -> &Roster {
        &self.present
    }

    /// Apply an action, making the result the current snapshot.
    ///
    /// Clears the redo stack. An action that leaves the roster unchanged
    /// (e.g. unknown player) is logged but does not create an undo step.
    pub fn apply(&mut self, action: RosterAction) -> &Roster {
        let next = self.present.apply(&action);
        self.record(action);

        if next != self.present {
            let previous = std::mem::replace(&mut self.present, next);
            self.push_past(previous);
            self.future.clear();
        }
        &self.present
    }

    /// Step back one snapshot. Returns false if there is nothing to undo.
    ///
    /// The restored snapshot keeps the current issued-ID mark, so an ID
    /// whose creation was undone is not handed out again.
    pub fn undo(&mut self) -> bool {
        match self.past.pop_back() {
            Some(previous) => {
                let previous = previous.with_high_water(self.present.high_water());
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone snapshot. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let next = next.with_high_water(self.present.high_water());
                let current = std::mem::replace(&mut self.present, next);
                self.push_past(current);
                true
            }
            None => false,
        }
    }

    /// Check if `undo` would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if `redo` would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.past.len()
    }

    /// Every action applied so far, in order.
    #[must_use]
    pub fn log(&self) -> &Vector<ActionRecord> {
        &self.log
    }

    fn record(&mut self, action: RosterAction) {
        self.log.push_back(ActionRecord::new(action, self.next_sequence));
        self.next_sequence += 1;
    }

    fn push_past(&mut self, roster: Roster) {
        if self.limit == 0 {
            return;
        }
        self.past.push_back(roster);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn history() -> RosterHistory {
        RosterHistory::from_config(RosterConfig::default())
    }

    #[test]
    fn test_starts_with_initial_players() {
        let history = history();
        assert_eq!(history.present().len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_restores_previous_snapshot() {
        let mut history = history();
        let before = history.present().clone();

        history.apply(RosterAction::AdjustHealth { id: PlayerId::new(1), amount: -3 });
        assert_ne!(history.present(), &before);

        assert!(history.undo());
        assert_eq!(history.present(), &before);
        assert!(!history.undo());
    }

    #[test]
    fn test_redo() {
        let mut history = history();
        history.apply(RosterAction::Add);
        let after = history.present().clone();

        history.undo();
        assert!(history.can_redo());
        assert!(history.redo());
        assert_eq!(history.present(), &after);
        assert!(!history.redo());
    }

    #[test]
    fn test_undone_add_does_not_reuse_id() {
        let mut history = history();
        history.apply(RosterAction::Add);
        history.apply(RosterAction::Rename { id: PlayerId::new(2), name: "Ayla".to_string() });
        history.undo();
        history.undo();

        history.apply(RosterAction::Add);
        let ids: Vec<PlayerId> = history.present().ids().collect();
        assert_eq!(ids, vec![PlayerId::new(1), PlayerId::new(3)]);
    }

    #[test]
    fn test_redo_after_undo_keeps_ids() {
        let mut history = history();
        history.apply(RosterAction::Add);
        history.undo();
        history.redo();

        assert!(history.present().contains(PlayerId::new(2)));
        history.apply(RosterAction::Add);
        assert_eq!(history.present().last().unwrap().id, PlayerId::new(3));
    }

    #[test]
    fn test_new_action_clears_redo() {
        let mut history = history();
        history.apply(RosterAction::Add);
        history.undo();

        history.apply(RosterAction::AdjustShields { id: PlayerId::new(1), amount: 1 });
        assert!(!history.can_redo());
    }

    #[test]
    fn test_noop_action_not_undoable() {
        let mut history = history();
        history.apply(RosterAction::Remove { id: PlayerId::new(42) });

        assert!(!history.can_undo());
        assert_eq!(history.log().len(), 1);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history =
            RosterHistory::from_config(RosterConfig::new().with_history_limit(2));
        for _ in 0..5 {
            history.apply(RosterAction::Add);
        }

        assert_eq!(history.depth(), 2);
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.present().len(), 4);
    }

    #[test]
    fn test_zero_limit_disables_undo() {
        let mut history =
            RosterHistory::from_config(RosterConfig::new().with_history_limit(0));
        history.apply(RosterAction::Add);
        assert!(!history.can_undo());
        assert_eq!(history.present().len(), 2);
    }

    #[test]
    fn test_log_sequence() {
        let mut history = history();
        history.apply(RosterAction::Add);
        history.apply(RosterAction::Remove { id: PlayerId::new(1) });

        let sequences: Vec<_> = history.log().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
        assert_eq!(history.log()[1].action, RosterAction::Remove { id: PlayerId::new(1) });
    }
}
