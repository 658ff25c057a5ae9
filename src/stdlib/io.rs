use std::io::Write;

use crate::interpreter::{
    native::{NativeError, exact},
    value::Value,
};

/// Writes the display text of a value followed by a newline, and returns
/// `null`.
///
/// Accepts exactly one argument of any type.
///
/// # Example
/// ```
/// use minilang::{interpreter::value::Value, stdlib::io::print};
///
/// let mut out = Vec::<u8>::new();
/// let result = print(&[Value::from(vec![Value::Integer(1), Value::from("a")])], &mut out).unwrap();
///
/// assert_eq!(result, Value::Null);
/// assert_eq!(String::from_utf8(out).unwrap(), "[1, a]\n");
/// ```
pub fn print(args: &[Value], out: &mut dyn Write) -> Result<Value, NativeError> {
    let [value] = exact(args)?;
    writeln!(out, "{value}")?;
    Ok(Value::Null)
}
