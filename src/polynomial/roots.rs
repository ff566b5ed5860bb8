//! Root-form polynomial helpers.
//!
//! A polynomial is carried as the list of its roots (monic, leading
//! coefficient 1). These helpers expand, evaluate, cluster and reflect roots.
//! Clustering is single-linkage and repeated until the surviving centroids
//! are pairwise at least `tolerance` apart, which makes [`snap_roots`]
//! idempotent.
use num_complex::Complex64;
use std::cmp::Ordering;

/// Shrink factor applied after reflecting a root into the unit disk.
///
/// A root with `|p| >= 1` is mapped to `p / |p|² · (1 − REFLECT_EPS)`, so the
/// result has modulus at most `1 − REFLECT_EPS`. Must stay well above the
/// stability margin used by the gate.
pub const REFLECT_EPS: f64 = 1e-4;

/// A group of roots merged by [`cluster_roots`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootCluster {
    /// Mean position of the merged roots.
    pub centroid: Complex64,
    /// Number of input roots merged into this cluster.
    pub multiplicity: usize,
}

/// Expand `∏(x − rᵢ)` into coefficients, highest power first.
///
/// The result has length `roots.len() + 1` and a leading `1`. An empty root
/// list yields the constant polynomial `[1]`.
///
/// # Examples
/// ```
/// use deltasigma_ntf::polynomial::roots_to_coefficients;
/// use num_complex::Complex64;
///
/// // (x - 1)(x + 1) = x² - 1
/// let c = roots_to_coefficients(&[Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)]);
/// assert_eq!(c.len(), 3);
/// assert!((c[2].re + 1.0).abs() < 1e-15);
/// ```
pub fn roots_to_coefficients(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex64::new(1.0, 0.0));
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for k in (1..coeffs.len()).rev() {
            let prev = coeffs[k - 1];
            coeffs[k] -= root * prev;
        }
    }
    coeffs
}

/// Evaluate the monic polynomial `∏(x − rᵢ)` at `x`.
pub fn evaluate_from_roots(roots: &[Complex64], x: Complex64) -> Complex64 {
    roots.iter().fold(Complex64::new(1.0, 0.0), |acc, &r| acc * (x - r))
}

/// Reflect a root on or outside the unit circle to just inside it.
///
/// - `|p| < 1`: returned unchanged.
/// - `|p| >= 1`: returns `p / |p|² · (1 − REFLECT_EPS)`.
///
/// Non-finite input is returned unchanged (and fails any later modulus
/// check).
pub fn reflect_into_unit_disk(pole: Complex64) -> Complex64 {
    let modulus = pole.norm();
    if modulus >= 1.0 { pole / (modulus * modulus) * (1.0 - REFLECT_EPS) } else { pole }
}

/// Merge roots whose distance is below `tolerance`.
///
/// Behavior
/// --------
/// - Builds single-linkage groups over the current centroids and merges
///   them, recomputing each centroid from its original members; repeats
///   until no two centroids are closer than `tolerance`.
/// - Centroids are computed relative to the lexicographically smallest
///   member, so a cluster of identical roots reports that root exactly.
/// - Output is sorted lexicographically by `(re, im)` of the centroid.
///
/// A non-positive or NaN `tolerance` disables merging.
pub fn cluster_roots(roots: &[Complex64], tolerance: f64) -> Vec<RootCluster> {
    let groups = group_indices(roots, tolerance);
    let mut clusters: Vec<RootCluster> = groups
        .iter()
        .map(|g| RootCluster { centroid: centroid(roots, g), multiplicity: g.len() })
        .collect();
    clusters.sort_by(|a, b| lexicographic(&a.centroid, &b.centroid));
    clusters
}

/// Replace every root with the centroid of its cluster, keeping multiplicity.
///
/// The output has the same length and positional order as the input; roots
/// that were within `tolerance` of each other become bit-identical.
/// `snap_roots(&snap_roots(r, tol), tol) == snap_roots(r, tol)`.
pub fn snap_roots(roots: &[Complex64], tolerance: f64) -> Vec<Complex64> {
    let mut snapped = roots.to_vec();
    for group in group_indices(roots, tolerance) {
        let c = centroid(roots, &group);
        for idx in group {
            snapped[idx] = c;
        }
    }
    snapped
}

/// Deterministic conjugate-pair ordering (MATLAB `cplxpair` style).
///
/// Complex roots come first, sorted by real part with each conjugate pair
/// adjacent (negative imaginary part first); real roots follow in ascending
/// order. A root counts as real when `|im| <= 100·ε·|z|`.
pub fn sort_conjugate_pairs(roots: &mut [Complex64]) {
    let is_real = |z: &Complex64| z.im.abs() <= 100.0 * f64::EPSILON * z.norm().max(1.0);
    roots.sort_by(|a, b| match (is_real(a), is_real(b)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => a.re.total_cmp(&b.re),
        (false, false) => a
            .re
            .total_cmp(&b.re)
            .then(a.im.abs().total_cmp(&b.im.abs()))
            .then(a.im.total_cmp(&b.im)),
    });
}

// ---- Helpers ----

fn lexicographic(a: &Complex64, b: &Complex64) -> Ordering {
    a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im))
}

fn centroid(roots: &[Complex64], members: &[usize]) -> Complex64 {
    let anchor = members
        .iter()
        .map(|&i| roots[i])
        .min_by(lexicographic)
        .unwrap_or(Complex64::new(0.0, 0.0));
    let offset: Complex64 = members.iter().map(|&i| roots[i] - anchor).sum();
    anchor + offset / members.len().max(1) as f64
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Index groups of `roots` after repeated single-linkage merging.
fn group_indices(roots: &[Complex64], tolerance: f64) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = (0..roots.len()).map(|i| vec![i]).collect();
    if !(tolerance > 0.0) {
        return groups;
    }
    loop {
        let centroids: Vec<Complex64> = groups.iter().map(|g| centroid(roots, g)).collect();
        let n = groups.len();
        let mut parent: Vec<usize> = (0..n).collect();
        let mut merged = false;
        for i in 0..n {
            for j in (i + 1)..n {
                if (centroids[i] - centroids[j]).norm() < tolerance {
                    let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                    if ri != rj {
                        parent[rj] = ri;
                        merged = true;
                    }
                }
            }
        }
        if !merged {
            return groups;
        }
        let mut next: Vec<Vec<usize>> = Vec::new();
        let mut slot: Vec<Option<usize>> = vec![None; n];
        for i in 0..n {
            let root = find(&mut parent, i);
            let target = match slot[root] {
                Some(t) => t,
                None => {
                    next.push(Vec::new());
                    slot[root] = Some(next.len() - 1);
                    next.len() - 1
                }
            };
            next[target].extend_from_slice(&groups[i]);
        }
        groups = next;
    }
}
