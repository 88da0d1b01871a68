//! Tolerant float comparison.

/// Default tolerance used by [`approximately_equal`].
pub const EPSILON: f32 = 1e-6;

/// Returns `true` when `a` and `b` differ by less than `epsilon`.
#[must_use]
pub fn approximately_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}
