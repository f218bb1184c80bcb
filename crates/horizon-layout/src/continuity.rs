// crates/horizon-layout/src/continuity.rs
//
// Continuity mode: choose the ambiguity-group element that best matches the
// previous snapshot on the nodes both snapshots share.

use horizon_core::PriorCoords;

use crate::spectral::Point;
use crate::transform::{AxisTransform, AMBIGUITY_GROUP};

/// Outcome of aligning a raw embedding to a prior snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Winning transform; apply it to every point, not just the shared ones.
    pub transform: AxisTransform,
    /// Scaled squared residual of the winner.
    pub residual: f64,
    /// Number of nodes present in both snapshots.
    pub shared: usize,
}

/// Squared residual `‖s·Z − P‖²` after the best uniform scale.
///
/// `s = (Z·P) / (Z·Z)` over all flattened coordinates, with a denominator of
/// 1 when `Z` is all zeros, and taken in magnitude only: sign changes are the
/// job of the flip candidates.
pub fn scaled_residual(z: &[Point], prior: &[Point]) -> f64 {
    let zz: f64 = z.iter().map(|p| p[0] * p[0] + p[1] * p[1]).sum();
    let denom = if zz == 0.0 { 1.0 } else { zz };
    let zp: f64 = z
        .iter()
        .zip(prior)
        .map(|(a, b)| a[0] * b[0] + a[1] * b[1])
        .sum();
    let s = (zp / denom).abs();
    z.iter()
        .zip(prior)
        .map(|(a, b)| (s * a[0] - b[0]).powi(2) + (s * a[1] - b[1]).powi(2))
        .sum()
}

/// Pick the transform aligning `points` with `prior`.
///
/// Returns `None` when fewer than `min_shared` nodes have a prior
/// coordinate; the caller then leaves the embedding untouched. Candidates
/// are scored in `AMBIGUITY_GROUP` order and only a strictly smaller residual
/// replaces the current best, so ties go to the earlier candidate.
pub fn align_to_prior(
    points: &[Point],
    nodes: &[String],
    prior: &PriorCoords,
    min_shared: usize,
) -> Option<Alignment> {
    let (current, previous): (Vec<Point>, Vec<Point>) = nodes
        .iter()
        .zip(points)
        .filter_map(|(name, &p)| prior.get(name).map(|&q| (p, q)))
        .unzip();

    let shared = current.len();
    if shared < min_shared {
        return None;
    }

    let mut best = Alignment {
        transform: AxisTransform::IDENTITY,
        residual: f64::INFINITY,
        shared,
    };
    for candidate in AMBIGUITY_GROUP {
        let z = candidate.apply_all(&current);
        let residual = scaled_residual(&z, &previous);
        if residual < best.residual {
            best.transform = candidate;
            best.residual = residual;
        }
    }
    Some(best)
}
