use std::{fmt, io::Write, rc::Rc};

use log::debug;

use crate::interpreter::{environment::Environment, value::Value};

/// Signature of a host-implemented function.
///
/// A native receives the evaluated arguments and the interpreter's output
/// sink. [`NativeFunction::call`] checks the argument count against the
/// declared [`Arity`] first, so the function may index `args` freely.
pub type NativeFn = fn(&[Value], &mut dyn Write) -> Result<Value, NativeError>;

/// Specifies the allowed number of arguments for a native function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means the function accepts any count listed in `slice`.
/// - `Any` accepts every argument count, including zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    Any,
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// # Example
    /// ```
    /// use minilang::interpreter::native::Arity;
    ///
    /// assert!(Arity::Exact(2).check(2));
    /// assert!(!Arity::OneOf(&[1, 2]).check(3));
    /// assert!(Arity::Any.check(0));
    /// ```
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                let counts = counts.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}", counts.join(" or "))
            },
            Self::Any => write!(f, "any number of"),
        }
    }
}

/// Failure reported by a native function.
///
/// The evaluator turns these into runtime errors that carry the position of
/// the call.
#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    /// An argument had the wrong type.
    #[error("{0}")]
    TypeMismatch(String),
    /// An argument had the right type but an unusable value.
    #[error("{0}")]
    InvalidArgument(String),
    /// The function was called with an argument count its arity rejects.
    #[error("expects {expected} argument(s), got {found}")]
    ArityMismatch { expected: String, found: usize },
    /// Writing to the output sink failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl NativeError {
    /// Builds a type mismatch naming the function, the argument and what
    /// was found instead.
    #[must_use]
    pub fn expected(function: &str, what: &str, found: &Value) -> Self {
        Self::TypeMismatch(format!("{function} expects {what}, found {}", found.type_name()))
    }
}

/// Views `args` as exactly `N` arguments.
///
/// # Errors
/// Returns [`NativeError::ArityMismatch`] for any other count.
///
/// # Example
/// ```
/// use minilang::interpreter::{native::exact, value::Value};
///
/// let args = [Value::Integer(1), Value::Integer(2)];
/// let [a, b] = exact(&args).unwrap();
/// assert_eq!((a, b), (&Value::Integer(1), &Value::Integer(2)));
///
/// assert!(exact::<1>(&args).is_err());
/// ```
pub fn exact<const N: usize>(args: &[Value]) -> Result<&[Value; N], NativeError> {
    args.try_into()
        .map_err(|_| NativeError::ArityMismatch { expected: N.to_string(),
                                                  found:    args.len(), })
}

/// A function provided by the host and bound to a name in the global scope.
pub struct NativeFunction {
    pub name:  String,
    pub arity: Arity,
    func:      NativeFn,
}

impl NativeFunction {
    /// Invokes the host implementation.
    ///
    /// # Errors
    /// Returns [`NativeError::ArityMismatch`] without running the function
    /// when `args` does not satisfy its arity, and otherwise whatever the
    /// function itself reports.
    pub fn call(&self, args: &[Value], out: &mut dyn Write) -> Result<Value, NativeError> {
        if !self.arity.check(args.len()) {
            return Err(NativeError::ArityMismatch { expected: self.arity.to_string(),
                                                    found:    args.len(), });
        }
        (self.func)(args, out)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// The table of native functions a program can call.
///
/// The registry is populated by the host before a program runs and then
/// installed into the global environment, one binding per function. The
/// evaluator has no knowledge of individual names; calling a native goes
/// through the same [`Value`] dispatch as calling a user function.
///
/// # Example
/// ```
/// use minilang::interpreter::{
///     environment::Environment,
///     native::{Arity, NativeRegistry},
///     value::Value,
/// };
///
/// let mut registry = NativeRegistry::new();
/// registry.register("answer", Arity::Exact(0), |_, _| Ok(Value::Integer(42)));
///
/// let globals = Environment::new();
/// registry.install(&globals);
///
/// assert!(matches!(globals.get("answer"), Some(Value::NativeFunction(_))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NativeRegistry {
    functions: Vec<Rc<NativeFunction>>,
}

impl NativeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function, replacing any earlier registration of the same
    /// name.
    pub fn register(&mut self, name: &str, arity: Arity, func: NativeFn) -> &mut Self {
        let function = Rc::new(NativeFunction { name: name.to_string(),
                                                arity,
                                                func });

        match self.functions.iter_mut().find(|f| f.name == name) {
            Some(slot) => *slot = function,
            None => self.functions.push(function),
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rc<NativeFunction>> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Names of all registered functions, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Binds every registered function in `env`.
    pub fn install(&self, env: &Environment) {
        for function in &self.functions {
            env.define(&function.name, Value::NativeFunction(Rc::clone(function)));
        }
        debug!("installed {} native functions", self.functions.len());
    }
}
