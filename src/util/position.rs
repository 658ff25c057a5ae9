use std::fmt;

/// A 1-based line/column location in the source text.
///
/// Columns count characters, not bytes, from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Source line, starting at 1.
    pub line:   usize,
    /// Character offset within the line, starting at 1.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    ///
    /// ```
    /// use minilang::util::Position;
    ///
    /// let pos = Position::new(3, 7);
    /// assert_eq!(pos.to_string(), "line 3, column 7");
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a source text.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
