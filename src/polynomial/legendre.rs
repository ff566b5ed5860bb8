//! Legendre nodes for optimal NTF zero placement.
//!
//! Minimizing the integrated in-band power of `∏(ω² − ωᵢ²)` over a
//! normalized band `[-1, 1]` places the `ωᵢ` at the roots of the Legendre
//! polynomial `Pₙ`. These are the normalized optimal zero positions used by
//! the candidate generator; they are computed here for any order instead of
//! being tabulated.
use std::f64::consts::PI;

const NEWTON_MAX_ITER: usize = 100;
const NEWTON_TOL: f64 = 1e-15;

/// Roots of the Legendre polynomial `Pₙ`, in ascending order.
///
/// Uses Newton's method from the classical Chebyshev-like starting guesses
/// `cos(π(i + ¾)/(n + ½))`. Roots are symmetric about 0; for odd `n` the
/// middle root is exactly `0.0`. `n == 0` returns an empty vector.
///
/// # Examples
/// ```
/// use deltasigma_ntf::polynomial::legendre_roots;
///
/// let r = legendre_roots(2);
/// assert!((r[1] - (1.0_f64 / 3.0).sqrt()).abs() < 1e-14);
/// ```
pub fn legendre_roots(n: usize) -> Vec<f64> {
    let mut roots = vec![0.0; n];
    let nf = n as f64;
    for i in 0..n.div_ceil(2) {
        let mut x = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        for _ in 0..NEWTON_MAX_ITER {
            let (p, dp) = legendre_with_derivative(n, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < NEWTON_TOL {
                break;
            }
        }
        roots[i] = -x;
        roots[n - 1 - i] = x;
    }
    if n % 2 == 1 {
        roots[n / 2] = 0.0;
    }
    roots
}

/// `(Pₙ(x), Pₙ'(x))` via the three-term recurrence.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    if n == 0 {
        return (1.0, 0.0);
    }
    for k in 1..n {
        let kf = k as f64;
        let p_next = ((2.0 * kf + 1.0) * x * p - kf * p_prev) / (kf + 1.0);
        p_prev = p;
        p = p_next;
    }
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}
