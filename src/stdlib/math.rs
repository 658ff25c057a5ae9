use std::io::Write;

use rand::Rng;

use crate::interpreter::{
    native::{NativeError, exact},
    value::Value,
};

fn integer(function: &str, value: &Value) -> Result<i64, NativeError> {
    match value {
        Value::Integer(n) => Ok(*n),
        other => Err(NativeError::expected(function, "an integer", other)),
    }
}

/// Absolute value of an integer.
pub fn abs(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [value] = exact(args)?;
    integer("abs", value)?.checked_abs()
                          .map(Value::Integer)
                          .ok_or_else(|| NativeError::InvalidArgument("abs overflows for the smallest integer".to_string()))
}

/// Computes the minimum or maximum of two integers.
///
/// The operation is selected by the `name` parameter, which must be `"min"`
/// or `"max"`.
///
/// # Example
/// ```
/// use minilang::{interpreter::value::Value, stdlib::math::min_max};
///
/// let mut out = std::io::sink();
/// let r = min_max("min", &[Value::Integer(3), Value::Integer(7)], &mut out).unwrap();
/// assert_eq!(r, Value::Integer(3));
/// ```
pub fn min_max(name: &str, args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let [a, b] = exact(args)?;
    let a = integer(name, a)?;
    let b = integer(name, b)?;

    Ok(Value::Integer(if name == "min" { a.min(b) } else { a.max(b) }))
}

/// Returns a uniformly distributed random integer.
///
/// - `random(n)` draws from `0` up to but excluding `n`; `n` must be
///   positive.
/// - `random(lo, hi)` draws from `lo` to `hi` inclusive; `lo` must not
///   exceed `hi`.
pub fn random(args: &[Value], _: &mut dyn Write) -> Result<Value, NativeError> {
    let mut rng = rand::thread_rng();

    match args {
        [upper] => {
            let upper = integer("random", upper)?;
            if upper <= 0 {
                return Err(NativeError::InvalidArgument(format!("random upper bound must be positive, got {upper}")));
            }
            Ok(Value::Integer(rng.gen_range(0..upper)))
        },
        [low, high] => {
            let low = integer("random", low)?;
            let high = integer("random", high)?;
            if low > high {
                return Err(NativeError::InvalidArgument(format!("random range is empty: {low} > {high}")));
            }
            Ok(Value::Integer(rng.gen_range(low..=high)))
        },
        _ => Err(NativeError::ArityMismatch { expected: "1 or 2".to_string(),
                                              found:    args.len(), }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_stays_in_range() {
        let mut out = std::io::sink();
        for _ in 0..100 {
            let Value::Integer(n) = random(&[Value::Integer(3)], &mut out).unwrap() else {
                panic!("random returned a non-integer");
            };
            assert!((0..3).contains(&n));

            let Value::Integer(n) = random(&[Value::Integer(-2), Value::Integer(2)], &mut out).unwrap()
            else {
                panic!("random returned a non-integer");
            };
            assert!((-2..=2).contains(&n));
        }
    }

    #[test]
    fn random_rejects_empty_ranges() {
        let mut out = std::io::sink();
        assert!(random(&[Value::Integer(0)], &mut out).is_err());
        assert!(random(&[Value::Integer(5), Value::Integer(4)], &mut out).is_err());
        assert_eq!(random(&[Value::Integer(4), Value::Integer(4)], &mut out).unwrap(),
                   Value::Integer(4));
    }

    #[test]
    fn abs_and_bounds() {
        let mut out = std::io::sink();
        assert_eq!(abs(&[Value::Integer(-9)], &mut out).unwrap(), Value::Integer(9));
        assert!(abs(&[Value::Integer(i64::MIN)], &mut out).is_err());
        assert_eq!(min_max("max", &[Value::Integer(-1), Value::Integer(4)], &mut out).unwrap(),
                   Value::Integer(4));
    }
}
