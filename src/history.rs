// Linear undo/redo over whole-surface snapshots.
//
// `step` points at the snapshot matching what is on screen. Saving while
// `step` is behind the newest entry drops everything after it; there is no
// branching history.

use crate::surface::Snapshot;
use std::num::NonZeroUsize;

#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    /// `None` until the first save.
    step: Option<usize>,
    limit: Option<NonZeroUsize>,
}

impl History {
    pub fn new(limit: Option<NonZeroUsize>) -> Self {
        Self { snapshots: Vec::new(), step: None, limit }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn step(&self) -> Option<usize> {
        self.step
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.step.and_then(|i| self.snapshots.get(i))
    }

    pub fn can_undo(&self) -> bool {
        self.step.is_some_and(|s| s > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.step.is_some_and(|s| s + 1 < self.snapshots.len())
    }

    /// Record a new current state. Duplicates are kept on purpose.
    pub fn save(&mut self, snapshot: Snapshot) {
        let keep = self.step.map_or(0, |s| s + 1);
        if keep < self.snapshots.len() {
            log::debug!("discarding {} redo entries", self.snapshots.len() - keep);
            self.snapshots.truncate(keep);
        }
        self.snapshots.push(snapshot);
        self.step = Some(self.snapshots.len() - 1);

        if let Some(limit) = self.limit {
            let excess = self.snapshots.len().saturating_sub(limit.get());
            if excess > 0 {
                self.snapshots.drain(..excess);
                self.step = self.step.map(|s| s - excess);
                log::debug!("history limit {limit}: evicted {excess} oldest");
            }
        }
    }

    /// Step back one entry and hand out the snapshot to display.
    /// `None` (and no change) at the oldest entry.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let step = self.step?;
        if step == 0 {
            return None;
        }
        self.seek(step - 1)
    }

    /// Step forward one entry. `None` (and no change) at the newest entry.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.seek(self.step.map_or(0, |s| s + 1))
    }

    /// Move the cursor to `index` without touching the entries.
    pub fn seek(&mut self, index: usize) -> Option<Snapshot> {
        let snapshot = self.snapshots.get(index)?.clone();
        self.step = Some(index);
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: u8) -> Snapshot {
        Snapshot::from_png(1, 1, vec![tag])
    }

    fn filled(n: u8) -> History {
        let mut h = History::new(None);
        for i in 0..n {
            h.save(snap(i));
        }
        h
    }

    #[test]
    fn starts_empty_with_no_cursor() {
        let h = History::new(None);
        assert!(h.is_empty());
        assert_eq!(h.step(), None);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn save_advances_cursor() {
        let h = filled(3);
        assert_eq!(h.len(), 3);
        assert_eq!(h.step(), Some(2));
        assert_eq!(h.current(), Some(&snap(2)));
    }

    #[test]
    fn save_after_undo_truncates_redo_branch() {
        let mut h = filled(5);
        h.undo();
        h.undo();
        assert_eq!(h.step(), Some(2));
        h.save(snap(99));
        assert_eq!(h.len(), 4);
        assert_eq!(h.step(), Some(3));
        assert_eq!(h.get(3), Some(&snap(99)));
        assert!(h.redo().is_none());
    }

    #[test]
    fn undo_at_start_and_redo_at_end_are_no_ops() {
        let mut h = filled(1);
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert_eq!(h.step(), Some(0));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn undo_then_redo_returns_to_newest() {
        let mut h = filled(4);
        assert_eq!(h.undo(), Some(snap(2)));
        assert_eq!(h.undo(), Some(snap(1)));
        assert_eq!(h.redo(), Some(snap(2)));
        assert_eq!(h.redo(), Some(snap(3)));
        assert_eq!(h.step(), Some(3));
    }

    #[test]
    fn duplicate_saves_are_kept() {
        let mut h = filled(1);
        h.save(snap(0));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn limit_evicts_oldest_and_shifts_cursor() {
        let mut h = History::new(NonZeroUsize::new(3));
        for i in 0..5 {
            h.save(snap(i));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.step(), Some(2));
        assert_eq!(h.get(0), Some(&snap(2)));
        h.undo();
        h.undo();
        assert!(h.undo().is_none());
        assert_eq!(h.current(), Some(&snap(2)));
    }
}
