/// Core evaluation logic and context management.
///
/// Contains the runtime context, the expression dispatcher, the program entry
/// point and the control-flow signal used to unwind `return`.
pub mod core;

/// Statement execution.
///
/// Executes declarations, blocks, `if`, `while`, function definitions and
/// `return`, and threads the resulting control flow outward.
pub mod statement;

/// Evaluation of `for` loops.
///
/// Manages the loop scope and runs the init, condition, body and update
/// clauses in order.
pub mod for_loop;

/// Name lookup, indexing and assignment.
pub mod access;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions:
/// arithmetic, concatenation, ordering and equality.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Function evaluation.
///
/// Handles calls to user-defined closures and to native functions, argument
/// count checks and the call depth limit.
pub mod function;
