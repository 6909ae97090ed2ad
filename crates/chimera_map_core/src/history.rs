//! Linear undo/redo history over whole-state snapshots

/// A stack of snapshots with a cursor pointing at the current one.
///
/// The stack is never empty: it starts with the initial state and
/// `0 <= index < len` holds after every operation. Pushing after an undo
/// discards the redo branch. Depth is unbounded.
#[derive(Debug, Clone)]
pub struct History<T> {
    index: usize,
    stack: Vec<T>,
}

impl<T> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            index: 0,
            stack: vec![initial],
        }
    }

    /// The current state
    pub fn current(&self) -> &T {
        &self.stack[self.index]
    }

    /// Push a new state, truncating anything that could have been redone
    pub fn push(&mut self, state: T) {
        self.stack.truncate(self.index + 1);
        self.stack.push(state);
        self.index = self.stack.len() - 1;
    }

    /// Overwrite the current state without adding a history step
    pub fn replace(&mut self, state: T) {
        self.stack[self.index] = state;
    }

    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.stack.len()
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// A history always holds at least its initial state
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Cursor position of the current state
    pub fn index(&self) -> usize {
        self.index
    }
}
