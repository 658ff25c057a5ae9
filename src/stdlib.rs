//! The standard library shipped with the interpreter.
//!
//! Every function here is an ordinary native function: the evaluator knows
//! nothing about these names and reaches them only through the
//! [`NativeRegistry`] they are registered in.

use crate::interpreter::native::{Arity, NativeRegistry};

/// Array and string length, `push` and `pop`.
pub mod array;
/// Conversions between types and type inspection.
pub mod convert;
/// Console output.
pub mod io;
/// Integer helpers and random numbers.
pub mod math;
/// Wall-clock time.
pub mod time;

/// Defines the standard library by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the native.
///
/// The macro produces:
/// - `NativeDef` (internal metadata),
/// - `NATIVE_TABLE` (static table read by [`registry`]),
/// - `NATIVE_FUNCTIONS` (public list of native names).
macro_rules! native_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct NativeDef {
            name:  &'static str,
            arity: Arity,
            func:  crate::interpreter::native::NativeFn,
        }
        static NATIVE_TABLE: &[NativeDef] = &[
            $(
                NativeDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const NATIVE_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

native_functions! {
    "print"  => { arity: Arity::Exact(1), func: io::print },
    "len"    => { arity: Arity::Exact(1), func: array::len },
    "push"   => { arity: Arity::Exact(2), func: array::push },
    "pop"    => { arity: Arity::Exact(1), func: array::pop },
    "str"    => { arity: Arity::Exact(1), func: convert::str },
    "int"    => { arity: Arity::Exact(1), func: convert::int },
    "type"   => { arity: Arity::Exact(1), func: convert::type_of },
    "abs"    => { arity: Arity::Exact(1), func: math::abs },
    "min"    => { arity: Arity::Exact(2), func: |args, out| math::min_max("min", args, out) },
    "max"    => { arity: Arity::Exact(2), func: |args, out| math::min_max("max", args, out) },
    "random" => { arity: Arity::OneOf(&[1, 2]), func: math::random },
    "clock"  => { arity: Arity::Exact(0), func: time::clock },
}

/// Returns a registry holding the whole standard library.
///
/// # Example
/// ```
/// use minilang::stdlib::{NATIVE_FUNCTIONS, registry};
///
/// let registry = registry();
/// assert_eq!(registry.len(), NATIVE_FUNCTIONS.len());
/// assert!(registry.get("print").is_some());
/// ```
#[must_use]
pub fn registry() -> NativeRegistry {
    let mut registry = NativeRegistry::new();
    for def in NATIVE_TABLE {
        registry.register(def.name, def.arity, def.func);
    }
    registry
}
