//! Geometry and numeric helpers shared across the converter.
//!
//! Provides the `Point`/`Matrix` tuple types, affine matrix operations, and
//! the named epsilon comparators that every floating-point comparison in the
//! state classifier goes through.

/// Default epsilon for scalar comparisons.
pub const EPSILON: f64 = 1e-6;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A 6-element affine transformation matrix (a, b, c, d, e, f).
/// Transforms point (x, y) to (ax + cy + e, bx + dy + f).
pub type Matrix = (f64, f64, f64, f64, f64, f64);

/// Identity transformation matrix.
pub const MATRIX_IDENTITY: Matrix = (1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// True if `a` is positive beyond the epsilon.
#[inline]
pub fn is_positive(a: f64, epsilon: f64) -> bool {
    a > epsilon
}

/// Mixed absolute/relative comparison for matrix entries.
///
/// Entries of a composed text transform can be large (device-scale) or tiny
/// (residual rotations), so a pure absolute epsilon misclassifies one or the
/// other.
#[inline]
fn entry_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon * 1.0_f64.max(a.abs()).max(b.abs())
}

/// Compares the rotation/scale prefix (first four entries) of two matrices.
pub fn mat_prefix_equal(m1: &Matrix, m2: &Matrix, epsilon: f64) -> bool {
    entry_eq(m1.0, m2.0, epsilon)
        && entry_eq(m1.1, m2.1, epsilon)
        && entry_eq(m1.2, m2.2, epsilon)
        && entry_eq(m1.3, m2.3, epsilon)
}

/// Compares all six entries of two matrices.
pub fn mat_equal(m1: &Matrix, m2: &Matrix, epsilon: f64) -> bool {
    mat_prefix_equal(m1, m2, epsilon)
        && entry_eq(m1.4, m2.4, epsilon)
        && entry_eq(m1.5, m2.5, epsilon)
}

/// Multiplies two matrices: result = m1 * m0.
/// This applies m0 first, then m1.
pub fn mult_matrix(m1: Matrix, m0: Matrix) -> Matrix {
    let (a1, b1, c1, d1, e1, f1) = m1;
    let (a0, b0, c0, d0, e0, f0) = m0;
    (
        a0 * a1 + c0 * b1,
        b0 * a1 + d0 * b1,
        a0 * c1 + c0 * d1,
        b0 * c1 + d0 * d1,
        a0 * e1 + c0 * f1 + e0,
        b0 * e1 + d0 * f1 + f0,
    )
}

/// Translates a matrix by (x, y) inside the projection.
///
/// The matrix is changed so that its origin is at the specified point in its
/// own coordinate system.
pub fn translate_matrix(m: Matrix, v: Point) -> Matrix {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a, b, c, d, x * a + y * c + e, x * b + y * d + f)
}

/// Applies a matrix to a point.
pub fn apply_matrix_pt(m: Matrix, v: Point) -> Point {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a * x + c * y + e, b * x + d * y + f)
}

/// Formats a number for CSS output: three decimals, trailing zeros trimmed.
pub fn fmt_number(v: f64) -> String {
    let mut s = format!("{:.3}", v);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s.truncate(0);
        s.push('0');
    }
    s
}

/// Escapes text for inclusion in HTML element content.
pub fn enc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
