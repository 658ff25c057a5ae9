use std::io::Write;

use crate::interpreter::{
    native::{NativeError, exact},
    value::Value,
};

/// Number of elements in an array, or of characters in a string.
///
/// # Example
/// ```
/// use minilang::{interpreter::value::Value, stdlib::array::len};
///
/// let mut out = std::io::sink();
/// assert_eq!(len(&[Value::from("héllo")], &mut out).unwrap(), Value::Integer(5));
/// ```
pub fn len(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [value] = exact(args)?;
    let length = match value {
        Value::Array(items) => items.borrow().len(),
        Value::String(s) => s.chars().count(),
        other => return Err(NativeError::expected("len", "an array or a string", other)),
    };

    i64::try_from(length).map(Value::Integer)
                         .map_err(|_| NativeError::InvalidArgument("length does not fit in an integer".to_string()))
}

/// Appends a value to the end of an array in place and returns `null`.
pub fn push(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [array, value] = exact(args)?;
    match array {
        Value::Array(items) => {
            items.borrow_mut().push(value.clone());
            Ok(Value::Null)
        },
        other => Err(NativeError::expected("push", "an array", other)),
    }
}

/// Removes and returns the last element of an array.
///
/// Popping an empty array is an error.
pub fn pop(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [array] = exact(args)?;
    match array {
        Value::Array(items) => items.borrow_mut()
                                    .pop()
                                    .ok_or_else(|| NativeError::InvalidArgument("pop from an empty array".to_string())),
        other => Err(NativeError::expected("pop", "an array", other)),
    }
}
