/// Tolerance used whenever two numeric-encoded class labels are compared.
pub const LABEL_EPSILON: f64 = 1e-4;

/// True when `a` and `b` name the same label, within [`LABEL_EPSILON`].
/// A missing label (`NaN`) never equals anything.
#[inline]
pub fn label_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < LABEL_EPSILON
}
