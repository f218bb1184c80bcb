// crates/horizon-layout/src/anchor.rs
//
// Hash-anchored orientation for the first snapshot of a timeline.
//
// With no history to align against, rotation is pinned by a pseudo-random
// probe derived from the node names and reflection by the declared node
// order. The same node set in the same order therefore always comes out in
// the same orientation.

use horizon_core::crypto::hash_unit_scalar;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::spectral::Point;

/// Unit-length probe over nodes: hashed names, mean-centered, L2-normalized.
///
/// Falls back to the uniform vector `1/n` when every name hashes to the
/// same value (centered norm of zero).
pub fn probe<'a, I>(names: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut g: Vec<f64> = names.into_iter().map(hash_unit_scalar).collect();
    let n = g.len();
    if n == 0 {
        return g;
    }
    let mean = g.iter().sum::<f64>() / n as f64;
    for v in g.iter_mut() {
        *v -= mean;
    }
    let norm = g.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in g.iter_mut() {
            *v /= norm;
        }
        g
    } else {
        vec![1.0 / n as f64; n]
    }
}

/// `Xᵀ g`: the direction of the point cloud as seen by the probe.
fn project(points: &[Point], g: &[f64]) -> [f64; 2] {
    points.iter().zip(g).fold([0.0, 0.0], |acc, (p, w)| {
        [acc[0] + p[0] * w, acc[1] + p[1] * w]
    })
}

fn snap(points: &mut [Point], epsilon: f64) {
    for p in points.iter_mut() {
        for v in p.iter_mut() {
            if v.abs() < epsilon {
                *v = 0.0;
            }
        }
    }
}

/// Rotate and reflect a raw embedding into its canonical first-snapshot pose.
///
/// 1. Project onto the name probe; if the projection is degenerate, retry
///    with the probe of the reversed name list, and if that is degenerate too
///    only snap near-zero values.
/// 2. Rotate every point by `-atan2(a_y, a_x)` so the probe direction lands
///    on the positive x-axis.
/// 3. Flip y when the y-coordinates correlate negatively with the
///    zero-centered node index.
pub fn anchor_first_snapshot(points: &[Point], names: &[String], config: &LayoutConfig) -> Vec<Point> {
    let mut out = points.to_vec();

    let mut a = project(points, &probe(names.iter().map(String::as_str)));
    let mut norm = a[0].hypot(a[1]);
    if norm < config.probe_degenerate_norm {
        debug!(norm, "name probe degenerate, retrying with reversed names");
        a = project(points, &probe(names.iter().rev().map(String::as_str)));
        norm = a[0].hypot(a[1]);
        if norm < config.probe_degenerate_norm {
            debug!(norm, "reversed probe degenerate, skipping rotation");
            snap(&mut out, config.rotation_snap_epsilon);
            return out;
        }
    }

    let theta = (a[1] / norm).atan2(a[0] / norm);
    let (sin, cos) = theta.sin_cos();
    for p in out.iter_mut() {
        let [x, y] = *p;
        *p = [x * cos + y * sin, y * cos - x * sin];
    }

    let center = (out.len() as f64 - 1.0) / 2.0;
    let b: f64 = out
        .iter()
        .enumerate()
        .map(|(i, p)| p[1] * (i as f64 - center))
        .sum();
    if b < 0.0 {
        for p in out.iter_mut() {
            p[1] = -p[1];
        }
    }
    debug!(theta, flipped_y = b < 0.0, "hash-anchored orientation");

    snap(&mut out, config.rotation_snap_epsilon);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_probe_is_centered_unit_vector() {
        let g = probe(["A", "B", "C", "D"]);
        assert_abs_diff_eq!(g.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.iter().map(|v| v * v).sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_probe_uniform_fallback() {
        assert_eq!(probe(["same", "same"]), vec![0.5, 0.5]);
        assert_eq!(probe(["only"]), vec![1.0]);
        assert!(probe(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn test_probe_direction_lands_on_positive_x() {
        let nodes = names(&["A", "B", "C", "D"]);
        let points = vec![[1.0, 2.0], [-0.5, 1.0], [0.3, -1.7], [-0.8, -1.3]];
        let out = anchor_first_snapshot(&points, &nodes, &LayoutConfig::default());
        let a = project(&out, &probe(nodes.iter().map(String::as_str)));
        assert!(a[0] > 0.0);
        assert_abs_diff_eq!(a[1], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_preserves_distances() {
        let nodes = names(&["n1", "n2", "n3"]);
        let points = vec![[1.0, 0.0], [0.0, 1.0], [-1.0, -1.0]];
        let out = anchor_first_snapshot(&points, &nodes, &LayoutConfig::default());
        let d = |p: [f64; 2], q: [f64; 2]| (p[0] - q[0]).hypot(p[1] - q[1]);
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(d(out[i], out[j]), d(points[i], points[j]), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_reflection_follows_node_order() {
        let nodes = names(&["A", "B", "C", "D", "E"]);
        let points = vec![[2.0, 0.3], [1.0, -0.4], [0.0, 1.1], [-1.0, -0.2], [-2.0, 0.7]];
        let out = anchor_first_snapshot(&points, &nodes, &LayoutConfig::default());
        let b: f64 = out.iter().enumerate().map(|(i, p)| p[1] * (i as f64 - 2.0)).sum();
        assert!(b >= 0.0);
    }

    #[test]
    fn test_reversed_probe_used_when_forward_degenerate() {
        let nodes = names(&["A", "B", "C", "D"]);
        let points = vec![[1.0, 2.0], [-0.5, 1.0], [0.3, -1.7], [-0.8, -1.3]];
        let forward = probe(nodes.iter().map(String::as_str));
        let reversed = probe(nodes.iter().rev().map(String::as_str));
        let a_fwd = project(&points, &forward);
        let a_rev = project(&points, &reversed);
        let (n_fwd, n_rev) = (a_fwd[0].hypot(a_fwd[1]), a_rev[0].hypot(a_rev[1]));
        assert!(n_fwd < n_rev);

        // Threshold between the two norms: only the forward probe is degenerate.
        let config = LayoutConfig {
            probe_degenerate_norm: (n_fwd + n_rev) / 2.0,
            ..LayoutConfig::default()
        };
        let out = anchor_first_snapshot(&points, &nodes, &config);
        let a = project(&out, &reversed);
        assert_abs_diff_eq!(a[0], n_rev, epsilon = 1e-9);
        assert_abs_diff_eq!(a[1], 0.0, epsilon = 1e-9);

        // Not the pose the forward probe would have chosen.
        let default = anchor_first_snapshot(&points, &nodes, &LayoutConfig::default());
        assert_ne!(out, default);
    }

    #[test]
    fn test_degenerate_probe_skips_rotation() {
        let nodes = names(&["A", "B"]);
        let points = vec![[0.0, 1e-13], [0.0, 0.0]];
        let config = LayoutConfig {
            probe_degenerate_norm: 1.0,
            ..LayoutConfig::default()
        };
        let out = anchor_first_snapshot(&points, &nodes, &config);
        assert_eq!(out, vec![[0.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_same_names_same_pose() {
        let nodes = names(&["alpha", "beta", "gamma"]);
        let points = vec![[1.0, 0.2], [-0.4, 0.9], [-0.6, -1.1]];
        let a = anchor_first_snapshot(&points, &nodes, &LayoutConfig::default());
        let b = anchor_first_snapshot(&points, &nodes, &LayoutConfig::default());
        assert_eq!(a, b);
    }
}
