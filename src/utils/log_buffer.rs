/*
 * Buffered Log Capture
 *
 * Keeps the most recent log lines in a fixed-capacity in-memory buffer.
 *
 * Design:
 * - Bounded: MAX_LINES lines of at most MAX_LINE_LENGTH bytes each
 * - Overwrite on overflow (the oldest line is dropped)
 * - Longer lines are truncated on a char boundary
 * - Guarded by a spin lock; held only to push or copy lines out
 */

use heapless::{Deque, String};
use spin::Mutex;

/// Longest line kept, in bytes
pub const MAX_LINE_LENGTH: usize = 160;

/// Number of lines kept
pub const MAX_LINES: usize = 256;

type Line = String<MAX_LINE_LENGTH>;

/// Global log buffer
static LOG_BUFFER: Mutex<Deque<Line, MAX_LINES>> = Mutex::new(Deque::new());

/// Append a line, evicting the oldest one when full
pub fn write_log(message: &str) {
    let mut end = message.len().min(MAX_LINE_LENGTH);
    while !message.is_char_boundary(end) {
        end -= 1;
    }

    let mut line = Line::new();
    // cannot fail: end <= MAX_LINE_LENGTH
    let _ = line.push_str(&message[..end]);

    let mut buffer = LOG_BUFFER.lock();
    if buffer.is_full() {
        buffer.pop_front();
    }
    let _ = buffer.push_back(line);
}

/// Copy of the buffered lines, oldest first
pub fn recent() -> Vec<std::string::String> {
    let buffer = LOG_BUFFER.lock();
    buffer.iter().map(|line| line.as_str().to_owned()).collect()
}

/// Whether any buffered line contains `needle`
pub fn contains(needle: &str) -> bool {
    let buffer = LOG_BUFFER.lock();
    buffer.iter().any(|line| line.contains(needle))
}

/// Number of buffered lines
pub fn len() -> usize {
    LOG_BUFFER.lock().len()
}

pub fn clear() {
    LOG_BUFFER.lock().clear();
}
