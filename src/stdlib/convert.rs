use std::io::Write;

use crate::interpreter::{
    native::{NativeError, exact},
    value::Value,
};

/// Converts any value to its display text.
///
/// This is the explicit conversion that makes `"n = " + str(n)` possible;
/// `+` itself never converts.
pub fn str(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [value] = exact(args)?;
    Ok(Value::String(value.to_string()))
}

/// Parses a string as a decimal integer, or returns an integer unchanged.
///
/// Leading and trailing whitespace is ignored.
///
/// # Example
/// ```
/// use minilang::{interpreter::value::Value, stdlib::convert::int};
///
/// let mut out = std::io::sink();
/// assert_eq!(int(&[Value::from(" -12 ")], &mut out).unwrap(), Value::Integer(-12));
/// assert!(int(&[Value::from("twelve")], &mut out).is_err());
/// ```
pub fn int(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [value] = exact(args)?;
    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::String(s) => s.trim()
                             .parse::<i64>()
                             .map(Value::Integer)
                             .map_err(|err| NativeError::InvalidArgument(format!("cannot convert \"{s}\" to an integer: {err}"))),
        other => Err(NativeError::expected("int", "a string or an integer", other)),
    }
}

/// Returns the name of the argument's type as a string.
pub fn type_of(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [value] = exact(args)?;
    Ok(Value::from(value.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_uses_display_text() {
        let mut out = std::io::sink();
        let array = Value::from(vec![Value::Integer(1), Value::Null]);
        assert_eq!(str(&[array], &mut out).unwrap(), Value::from("[1, null]"));
        assert_eq!(str(&[Value::Integer(-3)], &mut out).unwrap(), Value::from("-3"));
    }

    #[test]
    fn type_names() {
        let mut out = std::io::sink();
        assert_eq!(type_of(&[Value::from("x")], &mut out).unwrap(), Value::from("string"));
        assert_eq!(type_of(&[Value::Null], &mut out).unwrap(), Value::from("null"));
    }
}
