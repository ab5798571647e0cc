/*
 * Ready Queue
 *
 * FIFO of process slots waiting for the CPU. Observably it is one growing
 * sequence read through a cursor: slots are only ever appended at the back
 * and read at the front, never removed from the middle, and the same slot
 * may appear once per dispatch. Storage is a ring buffer so memory stays
 * proportional to the processes waiting, not to the dispatches so far.
 */

use std::collections::VecDeque;

/// FIFO queue of slots into the engine's process table
#[derive(Debug, Default)]
pub struct ReadyQueue {
    /// Slots appended but not yet read
    entries: VecDeque<usize>,

    /// Front cursor: slots read so far
    cursor: usize,

    /// Length of the full sequence: slots appended so far
    appended: usize,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot at the back
    pub fn push_back(&mut self, slot: usize) {
        self.entries.push_back(slot);
        self.appended += 1;
    }

    /// Read the slot at the cursor and advance the cursor
    pub fn pop_front(&mut self) -> Option<usize> {
        let slot = self.entries.pop_front()?;
        self.cursor += 1;
        Some(slot)
    }

    /// Position of the front cursor in the full sequence
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the full sequence, including slots already read
    pub fn total_len(&self) -> usize {
        self.appended
    }

    /// Slots waiting to be read
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cursor has reached the end of the sequence
    pub fn is_drained(&self) -> bool {
        self.cursor == self.appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = ReadyQueue::new();
        queue.push_back(2);
        queue.push_back(0);
        queue.push_back(2);
        assert_eq!(queue.pop_front(), Some(2));
        assert_eq!(queue.pop_front(), Some(0));
        assert_eq!(queue.pop_front(), Some(2));
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn test_cursor_and_length_only_grow() {
        let mut queue = ReadyQueue::new();
        assert!(queue.is_drained());

        queue.push_back(0);
        queue.push_back(1);
        assert_eq!(queue.total_len(), 2);
        assert_eq!(queue.pending(), 2);

        queue.pop_front();
        queue.push_back(0);
        assert_eq!(queue.cursor(), 1);
        assert_eq!(queue.total_len(), 3);
        assert_eq!(queue.pending(), 2);

        queue.pop_front();
        queue.pop_front();
        assert_eq!(queue.pop_front(), None);
        assert_eq!(queue.cursor(), 3);
        assert!(queue.is_drained());
    }
}
