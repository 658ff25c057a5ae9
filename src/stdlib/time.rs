use std::{
    io::Write,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::interpreter::{native::NativeError, value::Value};

/// Milliseconds elapsed since the Unix epoch.
pub fn clock(_: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_err(|err| NativeError::InvalidArgument(format!("system clock is before the epoch: {err}")))?;

    i64::try_from(elapsed.as_millis()).map(Value::Integer)
                                      .map_err(|_| NativeError::InvalidArgument("clock value does not fit in an integer".to_string()))
}
