//! Selection cursor over the current match list.
//!
//! A small state machine: `Idle` when there is nothing to select (no list,
//! an empty list, or right after an acceptance) and `Active` with a cursor
//! that wraps around at both ends.

/// Navigator state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavState {
    /// No active selection.
    #[default]
    Idle,
    /// `cursor` is always `< len`, and `len` is never zero.
    Active { cursor: usize, len: usize },
}

/// A cursor movement between two match list positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavState,
}

impl Navigator {
    pub const fn new() -> Self {
        Self {
            state: NavState::Idle,
        }
    }

    pub const fn state(&self) -> NavState {
        self.state
    }

    /// The selected match index, or `None` when there is no active selection.
    pub const fn cursor(&self) -> Option<usize> {
        match self.state {
            NavState::Idle => None,
            NavState::Active { cursor, .. } => Some(cursor),
        }
    }

    pub const fn is_active(&self) -> bool {
        matches!(self.state, NavState::Active { .. })
    }

    /// Start a fresh selection over a new match list of `len` entries.
    ///
    /// The cursor always starts at the first match.
    pub fn show(&mut self, len: usize) {
        self.state = if len == 0 {
            NavState::Idle
        } else {
            NavState::Active { cursor: 0, len }
        };
        tracing::trace!(state = ?self.state, "Navigator show");
    }

    /// Move the selection up by one, wrapping to the end.
    pub fn move_up(&mut self) -> Option<Move> {
        let NavState::Active { cursor, len } = self.state else {
            return None;
        };
        let to = if cursor > 0 { cursor - 1 } else { len - 1 };
        self.state = NavState::Active { cursor: to, len };
        tracing::trace!(from = cursor, to, "Navigator up");
        Some(Move { from: cursor, to })
    }

    /// Move the selection down by one, wrapping to the start.
    pub fn move_down(&mut self) -> Option<Move> {
        let NavState::Active { cursor, len } = self.state else {
            return None;
        };
        let to = if cursor < len - 1 { cursor + 1 } else { 0 };
        self.state = NavState::Active { cursor: to, len };
        tracing::trace!(from = cursor, to, "Navigator down");
        Some(Move { from: cursor, to })
    }

    /// Left never affects the selection.
    pub const fn move_left(&self) {}

    /// Commit the current selection, returning the accepted index.
    ///
    /// Terminal for the suggestion cycle: the navigator goes back to `Idle`
    /// until the next [`Navigator::show`].
    pub fn accept(&mut self) -> Option<usize> {
        let accepted = self.cursor();
        self.state = NavState::Idle;
        accepted
    }

    /// Same as [`Navigator::accept`].
    pub fn move_right(&mut self) -> Option<usize> {
        self.accept()
    }

    /// Acceptance without a commit: clears the selection.
    pub fn reset(&mut self) {
        self.state = NavState::Idle;
    }
}
