/// Remaining host stack below which recursive code switches to a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each additional stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Runs `f`, first moving onto a freshly allocated stack segment when less
/// than the red zone is left on the current one.
///
/// Every recursive walk over source nesting (parsing, evaluation, value
/// display) goes through this, so its depth is limited by the interpreter's
/// own bounds and not by the size of the host thread's stack.
///
/// # Example
/// ```
/// use minilang::util::stack::guarded;
///
/// fn depth(n: u64) -> u64 {
///     if n == 0 { 0 } else { guarded(|| 1 + depth(n - 1)) }
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
#[inline]
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, f)
}
