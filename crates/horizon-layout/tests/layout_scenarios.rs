// crates/horizon-layout/tests/layout_scenarios.rs
//
// End-to-end layout scenarios through the public API: degenerate sizes,
// first-snapshot anchoring, continuity across consecutive snapshots, and
// output normalization.

use approx::assert_abs_diff_eq;

use horizon_core::{DissimilarityMatrix, Layout, PriorCoords};
use horizon_layout::{
    deterministic_layout, AxisTransform, JacobiEigensolver, LayoutConfig, LayoutEngine,
    ResolveMode,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn matrix(list: &[&str], rows: Vec<Vec<f64>>) -> DissimilarityMatrix {
    DissimilarityMatrix::new(names(list), rows).unwrap()
}

/// Euclidean distance matrix of a planar point set.
fn from_points(list: &[&str], points: &[[f64; 2]]) -> DissimilarityMatrix {
    let rows = points
        .iter()
        .map(|p| {
            points
                .iter()
                .map(|q| (p[0] - q[0]).hypot(p[1] - q[1]))
                .collect()
        })
        .collect();
    matrix(list, rows)
}

fn pentagon() -> DissimilarityMatrix {
    from_points(
        &["ara", "bel", "cor", "dun", "eis"],
        &[[0.0, 3.0], [2.5, 1.0], [1.5, -2.0], [-1.7, -2.2], [-2.9, 0.6]],
    )
}

fn assert_normalized(layout: &Layout) {
    for (name, point) in layout.iter() {
        for v in point {
            assert!(v.is_finite(), "{name}: non-finite {v}");
            assert!(v != 0.0 || v.is_sign_positive(), "{name}: negative zero");
            let requantized: f64 = format!("{:.4}", v).parse().unwrap();
            assert_eq!(v, requantized, "{name}: {v} has more than 4 decimals");
        }
    }
}

// ---------------------------------------------------------------------------
// Degenerate sizes
// ---------------------------------------------------------------------------

#[test]
fn empty_matrix_gives_empty_layout() {
    let layout = deterministic_layout(&DissimilarityMatrix::empty(), None).unwrap();
    assert!(layout.is_empty());
    assert_eq!(serde_json::to_string(&layout).unwrap(), "{}");
}

#[test]
fn single_node_sits_at_origin() {
    let layout = deterministic_layout(&matrix(&["solo"], vec![vec![0.0]]), None).unwrap();
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.get("solo"), Some([0.0, 0.0]));
}

// ---------------------------------------------------------------------------
// First snapshot (hash-anchored)
// ---------------------------------------------------------------------------

#[test]
fn collinear_triple_first_snapshot() {
    let m = matrix(
        &["A", "B", "C"],
        vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ],
    );
    let engine = LayoutEngine::new(LayoutConfig::default());
    let (layout, mode) = engine.layout_with_mode(&m, Some(&PriorCoords::new())).unwrap();
    assert_eq!(mode, ResolveMode::HashAnchored);
    assert_eq!(layout.len(), 3);
    assert_normalized(&layout);

    let a = layout.get("A").unwrap();
    let b = layout.get("B").unwrap();
    let c = layout.get("C").unwrap();
    assert!(layout.iter().any(|(_, p)| p[0] != 0.0 || p[1] != 0.0));
    assert_eq!(a[0].abs(), 1.0);
    assert_eq!(c[0], -a[0]);
    assert_eq!(b, [0.0, 0.0]);
    assert_eq!([a[1], c[1]], [0.0, 0.0]);

    let json = serde_json::to_value(&layout).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 3);
    assert!(obj.values().all(|v| v.as_array().map(|a| a.len()) == Some(2)));
}

#[test]
fn collinear_triple_second_snapshot_is_identical() {
    let m = matrix(
        &["A", "B", "C"],
        vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ],
    );
    let first = deterministic_layout(&m, None).unwrap();
    let second = deterministic_layout(&m, Some(&first.to_prior())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn collinear_triple_exact_coordinates() {
    let m = matrix(
        &["A", "B", "C"],
        vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ],
    );
    let layout = deterministic_layout(&m, None).unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    assert_eq!(json, r#"{"A":[-1.0,0.0],"B":[0.0,0.0],"C":[1.0,0.0]}"#);
}

#[test]
fn pentagon_exact_coordinates() {
    let layout = deterministic_layout(&pentagon(), None).unwrap();
    let expected = [
        ("ara", [2.3857, -1.688]),
        ("bel", [-0.6519, -2.6992]),
        ("cor", [-2.6265, -0.2291]),
        ("dun", [-1.0549, 2.5655]),
        ("eis", [1.9476, 2.0508]),
    ];
    let actual: Vec<(&str, [f64; 2])> = layout.iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn renaming_nodes_changes_the_pose() {
    let geometry = [[0.0, 3.0], [2.5, 1.0], [1.5, -2.0], [-1.7, -2.2]];
    let first = deterministic_layout(&from_points(&["A", "B", "C", "D"], &geometry), None).unwrap();
    let renamed =
        deterministic_layout(&from_points(&["W", "X", "Y", "Z"], &geometry), None).unwrap();

    let first_points: Vec<[f64; 2]> = first.iter().map(|(_, p)| p).collect();
    let renamed_points: Vec<[f64; 2]> = renamed.iter().map(|(_, p)| p).collect();
    assert_ne!(first_points, renamed_points);
    assert_eq!(first_points[0], [0.7242, -3.0181]);
    assert_eq!(renamed_points[0], [2.547, -1.7736]);

    // Same shape either way.
    for i in 0..4 {
        for j in 0..4 {
            let d = |p: &[[f64; 2]]| (p[i][0] - p[j][0]).hypot(p[i][1] - p[j][1]);
            assert_abs_diff_eq!(d(&first_points[..]), d(&renamed_points[..]), epsilon = 1e-3);
        }
    }
}

#[test]
fn two_nodes_split_evenly_along_x() {
    let m = matrix(&["left", "right"], vec![vec![0.0, 5.0], vec![5.0, 0.0]]);
    let layout = deterministic_layout(&m, None).unwrap();
    let p = layout.get("left").unwrap();
    let q = layout.get("right").unwrap();
    assert_eq!(p[0].abs(), 2.5);
    assert_eq!(q[0], -p[0]);
    assert_eq!([p[1], q[1]], [0.0, 0.0]);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let m = pentagon();
    let a = deterministic_layout(&m, None).unwrap();
    let b = deterministic_layout(&m, None).unwrap();
    assert_eq!(a, b);
    assert_normalized(&a);
}

#[test]
fn first_snapshot_preserves_geometry() {
    let m = pentagon();
    let layout = deterministic_layout(&m, None).unwrap();
    let points: Vec<[f64; 2]> = layout.iter().map(|(_, p)| p).collect();
    for i in 0..points.len() {
        for j in 0..points.len() {
            let d = (points[i][0] - points[j][0]).hypot(points[i][1] - points[j][1]);
            assert_abs_diff_eq!(d, m.get(i, j), epsilon = 1e-3);
        }
    }
}

#[test]
fn jacobi_solver_gives_same_layout() {
    let m = pentagon();
    let default = deterministic_layout(&m, None).unwrap();
    let jacobi = LayoutEngine::with_solver(JacobiEigensolver::new(), LayoutConfig::default())
        .layout(&m, None)
        .unwrap();
    for ((_, p), (_, q)) in default.iter().zip(jacobi.iter()) {
        assert_abs_diff_eq!(p[0], q[0], epsilon = 2e-4);
        assert_abs_diff_eq!(p[1], q[1], epsilon = 2e-4);
    }
}

// ---------------------------------------------------------------------------
// Continuity across snapshots
// ---------------------------------------------------------------------------

#[test]
fn continuity_converges_on_its_own_output() {
    let m = pentagon();
    let first = deterministic_layout(&m, None).unwrap();
    let engine = LayoutEngine::new(LayoutConfig::default());
    let (second, _) = engine.layout_with_mode(&m, Some(&first.to_prior())).unwrap();
    let (third, mode) = engine.layout_with_mode(&m, Some(&second.to_prior())).unwrap();
    assert_eq!(second, third);
    assert!(matches!(mode, ResolveMode::Continuity(_)));
}

#[test]
fn continuity_recovers_mirrored_prior() {
    let m = pentagon();
    let engine = LayoutEngine::new(LayoutConfig::default());
    let unrelated: PriorCoords = [("x".to_string(), [0.0, 0.0])].into_iter().collect();
    let (base, mode) = engine.layout_with_mode(&m, Some(&unrelated)).unwrap();
    assert_eq!(mode, ResolveMode::Passthrough);
    // `base` kept the raw orientation (one unrelated prior node); mirror and
    // scale it and expect continuity to undo exactly that transform.
    let target = AxisTransform {
        swap: true,
        x_sign: -1,
        y_sign: 1,
    };
    let prior: PriorCoords = base
        .iter()
        .map(|(n, p)| {
            let q = target.apply(p);
            (n.to_string(), [q[0] * 10.0, q[1] * 10.0])
        })
        .collect();
    let (aligned, mode) = engine.layout_with_mode(&m, Some(&prior)).unwrap();
    assert_eq!(mode, ResolveMode::Continuity(target));
    for (name, p) in aligned.iter() {
        let expected = target.apply(base.get(name).unwrap());
        assert_abs_diff_eq!(p[0], expected[0], epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], expected[1], epsilon = 1e-12);
    }
}

#[test]
fn continuity_with_partial_overlap_orients_new_nodes() {
    let before = from_points(&["A", "B", "C"], &[[0.0, 2.0], [2.0, -1.0], [-2.0, -1.0]]);
    let after = from_points(
        &["A", "B", "C", "D"],
        &[[0.0, 2.0], [2.0, -1.0], [-2.0, -1.0], [0.0, -3.0]],
    );
    let first = deterministic_layout(&before, None).unwrap();
    let engine = LayoutEngine::new(LayoutConfig::default());
    let (second, mode) = engine.layout_with_mode(&after, Some(&first.to_prior())).unwrap();
    assert!(matches!(mode, ResolveMode::Continuity(_)));
    assert_eq!(second.len(), 4);
    assert!(second.get("D").is_some());
    assert_normalized(&second);
}

#[test]
fn insufficient_overlap_keeps_raw_orientation() {
    let m = pentagon();
    let engine = LayoutEngine::new(LayoutConfig::default());
    let prior: PriorCoords = [("ara".to_string(), [9.0, 9.0])].into_iter().collect();
    let (_, mode) = engine.layout_with_mode(&m, Some(&prior)).unwrap();
    assert_eq!(mode, ResolveMode::Passthrough);
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn coarse_snap_threshold_zeroes_small_coordinates() {
    let m = pentagon();
    let config = LayoutConfig {
        snap_epsilon: 10.0,
        ..LayoutConfig::default()
    };
    let layout = LayoutEngine::new(config).layout(&m, None).unwrap();
    assert!(layout.iter().all(|(_, p)| p == [0.0, 0.0]));
}
