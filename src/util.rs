/// Source positions attached to tokens, AST nodes and errors.
pub mod position;
/// In-memory output capture.
pub mod output;
/// Host stack growth for deep recursion.
pub mod stack;

pub use output::SharedBuffer;
pub use position::Position;
