/// Integer arithmetic and string concatenation.
pub mod arithmetic;
/// Ordering and equality comparisons.
pub mod comparison;
/// Operator dispatch.
pub mod core;
