//! Generic fixed-length genetic operators.
//!
//! These operate on `&mut [G]` gene slices and know nothing about what a
//! gene means: any problem whose chromosome is a fixed-length sequence over
//! a finite alphabet can use them.
//!
//! # Crossover Operators
//!
//! - [`two_point_crossover`]: swap the segment between two cut points, O(n)
//!
//! # Mutation Operators
//!
//! - [`resample_mutation`]: independently redraw each gene from the
//!   alphabet with a fixed probability, O(n)
//!
//! # References
//!
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems" (multi-point crossover)
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, §4.2

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Two-point crossover, in place.
///
/// Picks cut points `1 <= c1 < c2 <= n` and swaps `a[c1..c2]` with
/// `b[c1..c2]`. Contiguous runs of genes outside the segment survive
/// untouched in both children.
///
/// Returns `true` if a segment was exchanged. Sequences shorter than two
/// genes are left unchanged.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn two_point_crossover<G, R: Rng>(a: &mut [G], b: &mut [G], rng: &mut R) -> bool {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    let n = a.len();
    if n < 2 {
        return false;
    }

    let (start, end) = cut_points(n, rng);
    a[start..end].swap_with_slice(&mut b[start..end]);
    true
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Resample mutation: each gene is redrawn uniformly from `alleles` with
/// probability `gene_rate`.
///
/// Returns `true` if at least one gene ended up with a different value.
pub fn resample_mutation<G: Clone + PartialEq, R: Rng>(
    genes: &mut [G],
    alleles: &[G],
    gene_rate: f64,
    rng: &mut R,
) -> bool {
    if alleles.is_empty() {
        return false;
    }

    let mut changed = false;
    for gene in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < gene_rate {
            let value = random_allele(alleles, rng);
            if value != *gene {
                *gene = value;
                changed = true;
            }
        }
    }
    changed
}

/// Draws one value uniformly from `alleles`.
///
/// # Panics
/// Panics if `alleles` is empty.
pub fn random_allele<G: Clone, R: Rng>(alleles: &[G], rng: &mut R) -> G {
    alleles[rng.random_range(0..alleles.len())].clone()
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick cut points `[start, end)` with `1 <= start < end <= n`.
fn cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(1..=n);
    let b = rng.random_range(1..n);
    if b >= a {
        (a, b + 1)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
