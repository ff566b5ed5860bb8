//! polynomial — complex-root arithmetic shared by the NTF synthesis stack.
//!
//! Purpose
//! -------
//! Collect the small set of root/polynomial primitives that the candidate
//! generator, the stability gate and the objective rely on: expanding roots
//! into coefficients, evaluating a polynomial from its roots, clustering
//! numerically duplicated roots, reflecting roots into the unit disk, and
//! computing the Legendre nodes used for optimal zero placement.
//!
//! Key behaviors
//! -------------
//! - [`roots_to_coefficients`] / [`evaluate_from_roots`] convert between
//!   root form and coefficient form of a monic polynomial.
//! - [`cluster_roots`] / [`snap_roots`] merge roots closer than a tolerance
//!   with a deterministic (lexicographic) ordering.
//! - [`reflect_into_unit_disk`] moves a root on or outside the unit circle to
//!   its mirror image just inside it.
//! - [`legendre_roots`] returns the ascending roots of the Legendre
//!   polynomial `Pₙ` for any `n`.
//!
//! Conventions
//! -----------
//! - Complex values are `num_complex::Complex64`; coefficient vectors are
//!   ordered highest power first.
//! - Everything here is pure, allocation-light and panic-free for finite
//!   input. Non-finite roots propagate as NaN rather than erroring; callers
//!   (the stability gate) reject them.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`roots`] cover expansion against hand-computed
//!   polynomials, cluster determinism, snap idempotence and reflection.
//! - Unit tests in [`legendre`] compare against the closed-form nodes of
//!   low-order Legendre polynomials.

pub mod legendre;
pub mod roots;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::legendre::legendre_roots;
pub use self::roots::{
    REFLECT_EPS, RootCluster, cluster_roots, evaluate_from_roots, reflect_into_unit_disk,
    roots_to_coefficients, snap_roots, sort_conjugate_pairs,
};

pub mod prelude {
    pub use super::legendre::legendre_roots;
    pub use super::roots::{
        RootCluster, cluster_roots, evaluate_from_roots, reflect_into_unit_disk,
        roots_to_coefficients, snap_roots,
    };
}
