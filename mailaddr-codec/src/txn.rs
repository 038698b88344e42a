//! Scoped commit/rollback of cursor positions.

use crate::cursor::Cursor;

/// A savepoint over a [`Cursor`], for backtracking between grammar
/// alternatives.
///
/// Opening a transaction records the current offset. Dropping it rewinds
/// the cursor to the savepoint, on every exit path of the enclosing scope;
/// this is the rollback of a failed alternative. [`Txn::commit`] moves the
/// savepoint to the current offset instead, and [`Txn::accept`] commits
/// while passing its argument through, to be used as the last expression of
/// a successful production.
///
/// List productions commit once per parsed element, so that a trailing
/// malformed element leaves the cursor just after the last good one.
/// Transactions nest naturally; each owns exactly one savepoint.
#[derive(Debug)]
pub struct Txn<'c> {
    cursor: &'c mut Cursor,
    savepoint: usize,
}

impl<'c> Txn<'c> {
    /// Opens a transaction at the current cursor position.
    pub fn open(cursor: &'c mut Cursor) -> Self {
        let savepoint = cursor.pos();

        Self { cursor, savepoint }
    }

    /// The cursor, reborrowed for nested productions.
    pub fn cursor(&mut self) -> &mut Cursor {
        self.cursor
    }

    /// Moves the savepoint to the current position. Idempotent.
    pub fn commit(&mut self) {
        self.savepoint = self.cursor.pos();
    }

    /// Commits and returns `value` unchanged.
    pub fn accept<T>(mut self, value: T) -> T {
        self.commit();

        value
    }
}

impl Drop for Txn<'_> {
    fn drop(&mut self) {
        // the savepoint always lies on a codepoint boundary in the source
        self.cursor.rewind(self.savepoint);
    }
}
