use crate::util::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// A name was read or assigned but no scope in the chain binds it.
    UndefinedVariable {
        /// The name of the variable.
        name:     String,
        /// Where the name was used.
        position: Position,
    },
    /// An operand or argument had the wrong type.
    TypeMismatch {
        /// Details about the type mismatch.
        details:  String,
        /// Where the mismatch occurred.
        position: Position,
    },
    /// Integer division with a zero divisor.
    DivisionByZero {
        /// Position of the division.
        position: Position,
    },
    /// An index was negative or not smaller than the array length.
    IndexOutOfBounds {
        /// The index that was requested.
        index:    i64,
        /// The length of the indexed array.
        length:   usize,
        /// Position of the index expression.
        position: Position,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityMismatch {
        /// Name of the callee.
        name:     String,
        /// Human readable description of the accepted argument counts.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
        /// Position of the call.
        position: Position,
    },
    /// The callee of a call expression is not a function.
    NotCallable {
        /// Type name of the value that was called.
        found:    String,
        /// Position of the call.
        position: Position,
    },
    /// A `return` statement executed outside of any function body.
    ReturnOutsideFunction {
        /// Position of the `return` statement.
        position: Position,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// Position of the operation.
        position: Position,
    },
    /// A native function reported a failure.
    NativeFailure {
        /// Name of the native function.
        name:     String,
        /// The host-side error message.
        details:  String,
        /// Position of the call.
        position: Position,
    },
    /// The call depth bound was exceeded.
    StackOverflow {
        /// The configured maximum call depth.
        depth:    usize,
        /// Position of the call that exceeded the bound.
        position: Position,
    },
}

impl RuntimeError {
    /// Returns the position of the node that raised the error.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UndefinedVariable { position, .. }
            | Self::TypeMismatch { position, .. }
            | Self::DivisionByZero { position }
            | Self::IndexOutOfBounds { position, .. }
            | Self::ArityMismatch { position, .. }
            | Self::NotCallable { position, .. }
            | Self::ReturnOutsideFunction { position }
            | Self::Overflow { position }
            | Self::NativeFailure { position, .. }
            | Self::StackOverflow { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, position } => {
                write!(f, "Error on {position}: undefined variable: {name}")
            },
            Self::TypeMismatch { details, position } => {
                write!(f, "Error on {position}: type mismatch: {details}")
            },
            Self::DivisionByZero { position } => write!(f, "Error on {position}: division by zero"),
            Self::IndexOutOfBounds { index,
                                     length,
                                     position, } => write!(f,
                                                           "Error on {position}: index out of bounds: index {index} for array of length {length}"),
            Self::ArityMismatch { name,
                                  expected,
                                  found,
                                  position, } => write!(f,
                                                        "Error on {position}: arity mismatch: '{name}' expects {expected} argument(s), got {found}"),
            Self::NotCallable { found, position } => {
                write!(f, "Error on {position}: not callable: value of type {found}")
            },
            Self::ReturnOutsideFunction { position } => {
                write!(f, "Error on {position}: return outside of a function")
            },
            Self::Overflow { position } => write!(f, "Error on {position}: integer overflow"),
            Self::NativeFailure { name,
                                  details,
                                  position, } => {
                write!(f, "Error on {position}: native function '{name}' failed: {details}")
            },
            Self::StackOverflow { depth, position } => write!(f,
                                                              "Error on {position}: stack overflow: call depth exceeded {depth}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
