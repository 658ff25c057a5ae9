use std::{cell::RefCell, collections::HashSet, fmt, mem, ops::Deref, rc::Rc};

use crate::{
    ast::{FunctionDef, LiteralValue},
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, native::NativeFunction},
    util::{Position, stack},
};

/// Shared, mutable storage behind an array value.
///
/// Clones share the same elements. Dereferences to the `RefCell` holding
/// them.
///
/// Dropping the last handle to an array releases nested arrays one at a
/// time instead of recursively, so arbitrarily deep nesting can be freed.
///
/// # Example
/// ```
/// use minilang::interpreter::value::{ArrayRef, Value};
///
/// let array = ArrayRef::new(vec![Value::Integer(1)]);
/// let alias = array.clone();
/// alias.borrow_mut().push(Value::Integer(2));
///
/// assert_eq!(array.borrow().len(), 2);
/// assert!(array.ptr_eq(&alias));
/// ```
#[derive(Debug, Clone)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    /// Returns `true` if both handles refer to the same array.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared storage, identifying the array.
    #[must_use]
    pub fn as_ptr(&self) -> *const RefCell<Vec<Value>> {
        Rc::as_ptr(&self.0)
    }

    /// Empties the array if this is its last handle.
    fn take_if_unique(&self) -> Vec<Value> {
        if Rc::strong_count(&self.0) != 1 {
            return Vec::new();
        }
        self.0
            .try_borrow_mut()
            .map(|mut items| mem::take(&mut *items))
            .unwrap_or_default()
    }
}

impl Deref for ArrayRef {
    type Target = RefCell<Vec<Value>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for ArrayRef {
    fn drop(&mut self) {
        let mut pending = self.take_if_unique();
        while let Some(value) = pending.pop() {
            if let Value::Array(inner) = value {
                pending.append(&mut inner.take_if_unique());
            }
        }
    }
}

/// Represents a runtime value in the interpreter.
///
/// Integers, strings and `null` have value semantics. Arrays and functions
/// are handles: cloning the `Value` clones the handle, so every alias
/// observes mutations made through any other.
#[derive(Debug, Clone)]
pub enum Value {
    /// A signed 64-bit integer. Also serves as the truth value of
    /// conditions: zero is false, anything else is true.
    Integer(i64),
    /// A string of text.
    String(String),
    /// An ordered, mutable, shared sequence of values.
    Array(ArrayRef),
    /// A user-defined function together with the scope it was defined in.
    Function(Rc<Closure>),
    /// A function implemented by the host and registered by name.
    NativeFunction(Rc<NativeFunction>),
    /// The absence of a value, produced by functions that return nothing.
    Null,
}

/// A user-defined function value.
///
/// Holds the definition and the environment that was active when the
/// definition executed. Calls run in a child of that environment.
///
/// The definition binds the closure into that same environment, so the two
/// keep each other alive for as long as the interpreter runs. The evaluation
/// context empties such scopes when it is dropped.
pub struct Closure {
    pub def: Rc<FunctionDef>,
    pub env: Environment,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
         .field("name", &self.def.name)
         .field("params", &self.def.params)
         .finish_non_exhaustive()
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(ArrayRef::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Str(s) => s.as_str().into(),
        }
    }
}

impl Value {
    /// The user-facing name of the value's type, as used in error messages
    /// and by the `type` builtin.
    ///
    /// # Example
    /// ```
    /// use minilang::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "integer");
    /// assert_eq!(Value::from(vec![]).type_name(), "array");
    /// assert_eq!(Value::Null.type_name(), "null");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Function(_) => "function",
            Self::NativeFunction(_) => "native function",
            Self::Null => "null",
        }
    }

    /// Converts the value to `i64`, or returns a type mismatch naming `what`
    /// was expected to be an integer.
    ///
    /// # Parameters
    /// - `what`: Description of the operand, e.g. `"array index"`.
    /// - `position`: Source position for error reporting.
    pub fn as_integer(&self, what: &str, position: Position) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch { details: format!("{what} must be an integer, found {}",
                                                                       other.type_name()),
                                                      position }),
        }
    }

    /// Returns the shared storage of an array value, or a type mismatch.
    ///
    /// # Parameters
    /// - `what`: Description of the operand, e.g. `"index target"`.
    /// - `position`: Source position for error reporting.
    pub fn as_array(&self, what: &str, position: Position) -> EvalResult<&ArrayRef> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(RuntimeError::TypeMismatch { details: format!("{what} must be an array, found {}",
                                                                       other.type_name()),
                                                      position }),
        }
    }

    /// Interprets the value as a condition.
    ///
    /// Only integers have a truth value: zero is false, any other integer is
    /// true. Every other type is a type mismatch.
    pub fn is_truthy(&self, position: Position) -> EvalResult<bool> {
        self.as_integer("condition", position).map(|n| n != 0)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, open: &mut HashSet<*const RefCell<Vec<Self>>>)
                  -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(items) => {
                let ptr = items.as_ptr();
                if !open.insert(ptr) {
                    return write!(f, "[...]");
                }

                write!(f, "[")?;
                for (index, value) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    stack::guarded(|| value.fmt_nested(f, open))?;
                }
                write!(f, "]")?;

                open.remove(&ptr);
                Ok(())
            },
            Self::Function(closure) => write!(f, "<function {}>", closure.def.name),
            Self::NativeFunction(native) => write!(f, "<native fn {}>", native.name),
            Self::Null => write!(f, "null"),
        }
    }
}

/// Equality as the language defines it.
///
/// Integers and strings compare by value. Arrays, functions and native
/// functions compare by identity, so two arrays with equal contents are
/// different unless they are the same array. `null` equals `null`. Values of
/// different types are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::NativeFunction(a), Self::NativeFunction(b)) => Rc::ptr_eq(a, b),
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

/// Display text of a value, as written by `print`.
///
/// Strings are written without quotes, arrays as `[a, b, c]` with their
/// elements rendered the same way, and functions as opaque placeholders. An
/// array that contains itself is rendered as `[...]` at the point of
/// recursion.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut HashSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(Value::from("hi there").to_string(), "hi there");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn display_nested_arrays() {
        let inner = Value::from(vec![Value::Integer(2), Value::from("x")]);
        let outer = Value::from(vec![Value::Integer(1), inner, Value::from(vec![])]);
        assert_eq!(outer.to_string(), "[1, [2, x], []]");
    }

    #[test]
    fn display_self_containing_array() {
        let array = Value::from(vec![Value::Integer(1)]);
        let Value::Array(items) = &array else {
            unreachable!()
        };
        items.borrow_mut().push(array.clone());

        assert_eq!(array.to_string(), "[1, [...]]");

        // Break the cycle.
        items.borrow_mut().clear();
    }

    fn nest(depth: usize) -> Value {
        let mut value = Value::from(vec![]);
        for _ in 0..depth {
            value = Value::from(vec![value]);
        }
        value
    }

    #[test]
    fn deeply_nested_array_drops() {
        drop(nest(500_000));
    }

    #[test]
    fn deeply_nested_array_displays() {
        let text = nest(100_000).to_string();
        assert_eq!(text.len(), 200_002);
        assert!(text.starts_with("[[[") && text.ends_with("]]]"));
    }

    #[test]
    fn dropping_one_alias_keeps_shared_contents() {
        let inner = Value::from(vec![Value::Integer(7)]);
        let outer = Value::from(vec![inner.clone()]);
        drop(outer);

        assert_eq!(inner.to_string(), "[7]");
    }

    #[test]
    fn arrays_compare_by_identity() {
        let a = Value::from(vec![Value::Integer(1)]);
        let b = Value::from(vec![Value::Integer(1)]);
        let alias = a.clone();

        assert_eq!(a, alias);
        assert_ne!(a, b);
    }

    #[test]
    fn cross_type_values_are_not_equal() {
        assert_ne!(Value::Integer(1), Value::from("1"));
        assert_ne!(Value::Null, Value::Integer(0));
        assert_eq!(Value::Null, Value::Null);
    }

    #[test]
    fn truthiness() {
        let position = Position::start();
        assert!(Value::Integer(-1).is_truthy(position).unwrap());
        assert!(!Value::Integer(0).is_truthy(position).unwrap());
        assert!(matches!(Value::from("").is_truthy(position),
                         Err(RuntimeError::TypeMismatch { .. })));
    }
}
