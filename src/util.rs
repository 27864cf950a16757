/// Tracks the current line number while scanning the input.
///
/// Used to attach line context to header errors and skipped-line warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationTracker {
    /// Current 1-based line index in the input.
    pub line_index: usize,
}

impl LocationTracker {
    /// Creates a new tracker positioned before the first line.
    pub fn new() -> Self {
        LocationTracker { line_index: 0 }
    }

    /// Creates a tracker positioned on the line following the 0-based `offset`.
    pub fn at_offset(offset: usize) -> Self {
        LocationTracker { line_index: offset }
    }

    /// Advances the tracker to the next line.
    pub fn next_line(&mut self) {
        self.line_index += 1;
    }
}
