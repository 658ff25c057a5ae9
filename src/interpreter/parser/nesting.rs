use std::cell::Cell;

use crate::{error::ParseError, interpreter::parser::core::ParseResult, util::Position};

/// Deepest syntactic nesting a program may have.
///
/// Every bracket, block, unary `-`, right-hand side of `=`, `else if` and
/// each link of an operator or postfix chain opens one level.
pub const MAX_NESTING_DEPTH: usize = 1000;

thread_local! {
    static NESTING_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Nesting levels opened by one parsing routine.
///
/// The levels close when the guard is dropped, so an early return with an
/// error leaves the counter balanced.
#[derive(Debug, Default)]
pub struct Nesting {
    levels: usize,
}

impl Nesting {
    /// Opens one level at `position`.
    ///
    /// # Errors
    /// Returns [`ParseError::NestingTooDeep`] when the program is already
    /// [`MAX_NESTING_DEPTH`] levels deep.
    pub fn enter(position: Position) -> ParseResult<Self> {
        let mut nesting = Self::default();
        nesting.deepen(position)?;
        Ok(nesting)
    }

    /// Opens one more level, held until this guard drops.
    pub fn deepen(&mut self, position: Position) -> ParseResult<()> {
        NESTING_DEPTH.with(|depth| {
                         let current = depth.get();
                         if current >= MAX_NESTING_DEPTH {
                             return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                                     position });
                         }
                         depth.set(current + 1);
                         self.levels += 1;
                         Ok(())
                     })
    }
}

impl Drop for Nesting {
    fn drop(&mut self) {
        NESTING_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(self.levels)));
    }
}
