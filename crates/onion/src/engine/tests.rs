use super::*;
use crate::error::{ConfigError, Tangent};
use nalgebra::vector;
use proptest::prelude::*;

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| vector![x, y]).collect()
}

fn sorted(mut v: Vec<Point>) -> Vec<Point> {
    sort_lex(&mut v);
    v
}

fn union(layers: &[Layer]) -> Vec<Point> {
    layers
        .iter()
        .flat_map(|l| l.vertices().iter().copied())
        .collect()
}

fn engine_with(algorithm: HullAlgorithm, points: Vec<Point>) -> LayerEngine {
    let mut e = LayerEngine::new(EngineCfg {
        algorithm,
        ..EngineCfg::default()
    });
    e.initialize(points).unwrap();
    e
}

fn nested_squares() -> Vec<Point> {
    pts(&[
        (0.0, 0.0),
        (0.0, 3.0),
        (3.0, 3.0),
        (3.0, 0.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (2.0, 2.0),
        (2.0, 1.0),
    ])
}

#[test]
fn square_with_inner_square() {
    for algo in HullAlgorithm::ALL {
        let e = engine_with(algo, nested_squares());
        let layers = e.layers();
        assert_eq!(layers.len(), 2, "{algo}");
        assert_eq!(
            layers[0].vertices(),
            pts(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]).as_slice()
        );
        assert_eq!(
            layers[1].vertices(),
            pts(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]).as_slice()
        );
        let steps = e.computation_steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps.as_slice()[0].remaining.len(), 8);
        assert_eq!(steps.as_slice()[1].remaining.len(), 4);
        assert_eq!(steps.as_slice()[1].hull, layers[1]);
        assert_eq!(e.performance_info().layer_count, 2);
    }
}

#[test]
fn two_points_form_one_degenerate_layer() {
    let e = engine_with(HullAlgorithm::GrahamScan, pts(&[(5.0, 5.0), (0.0, 0.0)]));
    assert_eq!(e.layers().len(), 1);
    assert!(e.layers()[0].is_degenerate());
    assert_eq!(
        e.layers()[0].vertices(),
        pts(&[(0.0, 0.0), (5.0, 5.0)]).as_slice()
    );
    assert_eq!(e.computation_steps().len(), 1);
}

#[test]
fn empty_set_has_no_layers_or_steps() {
    let mut e = LayerEngine::default();
    e.recompute().unwrap();
    assert!(e.layers().is_empty());
    assert!(e.computation_steps().is_empty());
    assert_eq!(e.performance_info().layer_count, 0);
}

#[test]
fn duplicate_interior_point_stays_together() {
    // Pinned: the outer hull is unaffected; both copies of (1, 1) end up in the
    // degenerate innermost layer.
    let square = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    let mut input = pts(&square);
    input.push(vector![1.0, 1.0]);
    for algo in HullAlgorithm::ALL {
        let mut e = engine_with(algo, input.clone());
        e.add_point(vector![1.0, 1.0]).unwrap();
        let copies = e
            .all_points()
            .iter()
            .filter(|p| **p == vector![1.0, 1.0])
            .count();
        assert_eq!(copies, 2);
        assert_eq!(e.layers().len(), 2, "{algo}");
        assert_eq!(e.layers()[0].vertices(), pts(&square).as_slice());
        assert_eq!(
            e.layers()[1].vertices(),
            pts(&[(1.0, 1.0), (1.0, 1.0)]).as_slice()
        );
    }
}

#[test]
fn each_hull_vertex_removes_one_copy() {
    // Pinned: three copies of an interior point give a one-vertex layer
    // followed by a two-copy degenerate layer; a duplicated hull corner
    // resurfaces as its own innermost layer.
    let square = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    let mut input = pts(&square);
    input.extend(pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]));
    for algo in HullAlgorithm::ALL {
        let e = engine_with(algo, input.clone());
        let lens: Vec<usize> = e.layers().iter().map(Layer::len).collect();
        assert_eq!(lens, vec![4, 1, 2], "{algo}");
        assert_eq!(sorted(union(e.layers())), sorted(input.clone()));
    }

    let mut corner = pts(&square);
    corner.push(vector![0.0, 0.0]);
    let e = engine_with(HullAlgorithm::JarvisMarch, corner);
    assert_eq!(e.layers().len(), 2);
    assert_eq!(e.layers()[1].vertices(), pts(&[(0.0, 0.0)]).as_slice());
}

#[test]
fn collinear_points_peel_to_their_extremes() {
    let line = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
    for algo in HullAlgorithm::ALL {
        let e = engine_with(algo, line.clone());
        let got: Vec<Vec<Point>> = e.layers().iter().map(|l| l.vertices().to_vec()).collect();
        assert_eq!(
            got,
            vec![
                pts(&[(0.0, 0.0), (4.0, 4.0)]),
                pts(&[(1.0, 1.0), (3.0, 3.0)]),
                pts(&[(2.0, 2.0)]),
            ],
            "{algo}"
        );
    }
}

#[test]
fn remove_absent_point_is_a_noop() {
    let mut e = engine_with(HullAlgorithm::GrahamScan, nested_squares());
    let before = e.computation_steps().clone();
    assert!(!e.remove_point(vector![9.0, 9.0]).unwrap());
    assert_eq!(e.all_points().len(), 8);
    assert_eq!(e.computation_steps(), &before);
}

#[test]
fn remove_point_takes_first_match_only() {
    let mut input = nested_squares();
    input.push(vector![1.0, 1.0]);
    let mut e = engine_with(HullAlgorithm::DivideAndConquer, input);
    assert!(e.remove_point(vector![1.0, 1.0]).unwrap());
    assert_eq!(sorted(e.all_points().to_vec()), sorted(nested_squares()));
    assert_eq!(e.layers().len(), 2);
}

#[test]
fn peel_drops_exactly_the_outer_layer() {
    for algo in HullAlgorithm::ALL {
        let mut e = engine_with(algo, nested_squares());
        let before = e.layers().to_vec();
        assert!(e.peel_one_layer().unwrap());
        assert_eq!(e.layers(), &before[1..]);
        assert_eq!(e.peeled(), &before[..1]);
        assert_eq!(e.all_points().len(), 4);

        assert!(e.re_add_layer().unwrap());
        assert_eq!(e.layers(), before.as_slice());
        assert_eq!(e.peeled_count(), 0);
        assert!(!e.re_add_layer().unwrap());
    }
}

#[test]
fn peel_until_empty_then_restore() {
    let mut e = engine_with(HullAlgorithm::GrahamScan, nested_squares());
    assert!(e.peel_one_layer().unwrap());
    assert!(e.peel_one_layer().unwrap());
    assert!(e.layers().is_empty());
    assert!(e.all_points().is_empty());
    assert!(!e.peel_one_layer().unwrap());
    assert_eq!(e.peeled_count(), 2);

    e.re_add_layer().unwrap();
    e.re_add_layer().unwrap();
    assert_eq!(sorted(e.all_points().to_vec()), sorted(nested_squares()));
    assert_eq!(e.layers().len(), 2);
}

#[test]
fn initialize_clears_peeled_stack() {
    let mut e = engine_with(HullAlgorithm::GrahamScan, nested_squares());
    e.peel_one_layer().unwrap();
    e.initialize(pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])).unwrap();
    assert_eq!(e.peeled_count(), 0);
    assert_eq!(e.layers().len(), 1);
}

#[test]
fn algorithm_switch_recomputes() {
    let mut e = engine_with(HullAlgorithm::GrahamScan, nested_squares());
    let graham = e.layers().to_vec();
    e.set_algorithm(HullAlgorithm::JarvisMarch).unwrap();
    assert_eq!(e.algorithm(), HullAlgorithm::JarvisMarch);
    assert_eq!(e.layers(), graham.as_slice());

    let err = e.set_algorithm_by_name("bogus").unwrap_err();
    assert!(matches!(
        err,
        SetAlgorithmError::Config(ConfigError::UnknownAlgorithm { .. })
    ));
    assert_eq!(e.algorithm(), HullAlgorithm::JarvisMarch);

    e.set_algorithm_by_name("divide").unwrap();
    assert_eq!(e.algorithm(), HullAlgorithm::DivideAndConquer);
    assert_eq!(e.layers(), graham.as_slice());
}

/// A negative tolerance classifies every near-collinear triple as a left turn
/// in both directions, so divide-and-conquer tangent walks never settle.
fn inverted_tolerance(algorithm: HullAlgorithm) -> LayerEngine {
    LayerEngine::new(EngineCfg {
        algorithm,
        geom: GeomCfg { eps_orient: -1.0 },
    })
}

#[test]
fn failed_add_point_leaves_state_untouched() {
    let mut e = inverted_tolerance(HullAlgorithm::DivideAndConquer);
    e.initialize(pts(&[(0.0, 0.0), (2.0, 0.0)])).unwrap();
    let before = e.clone();

    let err = e.add_point(vector![1.0, 0.0]).unwrap_err();
    assert!(matches!(
        err,
        HullError::TangentSearchDiverged {
            tangent: Tangent::Upper,
            left: 1,
            right: 2,
            ..
        }
    ));
    assert_eq!(e.all_points(), before.all_points());
    assert_eq!(e.layers(), before.layers());
    assert_eq!(e.computation_steps(), before.computation_steps());
    assert_eq!(e.performance_info(), before.performance_info());
    assert_eq!(e.peeled(), before.peeled());
}

#[test]
fn failed_algorithm_switch_keeps_previous() {
    let mut e = inverted_tolerance(HullAlgorithm::GrahamScan);
    e.initialize(pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])).unwrap();
    let layers = e.layers().to_vec();
    let steps = e.computation_steps().clone();

    let err = e.set_algorithm(HullAlgorithm::DivideAndConquer).unwrap_err();
    assert!(matches!(err, HullError::TangentSearchDiverged { .. }));
    assert_eq!(e.algorithm(), HullAlgorithm::GrahamScan);
    assert_eq!(e.layers(), layers.as_slice());
    assert_eq!(e.computation_steps(), &steps);

    let err = e.set_algorithm_by_name("divide").unwrap_err();
    assert!(matches!(err, SetAlgorithmError::Hull(_)));
    assert_eq!(e.algorithm(), HullAlgorithm::GrahamScan);
}

#[test]
fn non_finite_point_is_rejected_without_side_effects() {
    for algo in HullAlgorithm::ALL {
        let mut e = engine_with(algo, nested_squares());
        e.peel_one_layer().unwrap();
        let before = e.clone();

        for bad in [vector![f64::NAN, 0.0], vector![1.0, f64::INFINITY]] {
            let err = e.add_point(bad).unwrap_err();
            assert_eq!(err, HullError::NonFinitePoint { index: 4 }, "{algo}");
        }
        assert_eq!(e.all_points(), before.all_points());
        assert_eq!(e.layers(), before.layers());
        assert_eq!(e.computation_steps(), before.computation_steps());
        assert_eq!(e.peeled(), before.peeled());

        let err = e.initialize(pts(&[(0.0, 0.0), (f64::NEG_INFINITY, 1.0)])).unwrap_err();
        assert_eq!(err, HullError::NonFinitePoint { index: 1 });
        assert_eq!(e.peeled_count(), 1);
    }
}

#[test]
fn tail_step_keeps_storage_order() {
    for algo in HullAlgorithm::ALL {
        let e = engine_with(algo, pts(&[(5.0, 5.0), (0.0, 0.0)]));
        let steps = e.computation_steps();
        assert_eq!(steps.len(), 1);
        let step = &steps.as_slice()[0];
        assert_eq!(step.remaining, pts(&[(5.0, 5.0), (0.0, 0.0)]));
        assert_eq!(step.hull.vertices(), &pts(&[(0.0, 0.0), (5.0, 5.0)])[..]);
        assert_eq!(e.layers()[0], step.hull);
    }
}

#[test]
fn telemetry_is_overwritten() {
    let mut e = engine_with(HullAlgorithm::GrahamScan, nested_squares());
    assert_eq!(e.performance_info().layer_count, 2);
    e.peel_one_layer().unwrap();
    assert_eq!(e.performance_info().layer_count, 1);
}

#[test]
fn steps_snapshot_survives_mutation() {
    let mut e = engine_with(HullAlgorithm::GrahamScan, nested_squares());
    let snapshot = e.computation_steps().clone();
    e.add_point(vector![10.0, 10.0]).unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.as_slice()[0].remaining.len(), 8);
    assert_eq!(e.computation_steps().as_slice()[0].remaining.len(), 9);
}

fn cloud() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..50)
        .prop_map(|raw| raw.into_iter().map(|(x, y)| vector![x, y]).collect())
}

fn grid() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0i32..6, 0i32..6), 0..40).prop_map(|raw| {
        raw.into_iter()
            .map(|(x, y)| vector![x as f64, y as f64])
            .collect()
    })
}

fn algorithm() -> impl Strategy<Value = HullAlgorithm> {
    prop::sample::select(HullAlgorithm::ALL.to_vec())
}

proptest! {
    #[test]
    fn layers_conserve_points(points in grid(), algo in algorithm()) {
        let (layers, steps) = compute_layers(&points, algo, &GeomCfg::default()).unwrap();
        prop_assert_eq!(sorted(union(&layers)), sorted(points.clone()));
        prop_assert_eq!(steps.len(), layers.len());
    }

    #[test]
    fn layers_are_strictly_convex(points in cloud(), algo in algorithm()) {
        let cfg = GeomCfg::default();
        let (layers, _) = compute_layers(&points, algo, &cfg).unwrap();
        for layer in &layers {
            prop_assert!(layer.is_strictly_convex(&cfg));
        }
    }

    #[test]
    fn grid_layers_agree_across_algorithms(points in grid()) {
        let cfg = GeomCfg::default();
        let (graham, _) = compute_layers(&points, HullAlgorithm::GrahamScan, &cfg).unwrap();
        let (jarvis, _) = compute_layers(&points, HullAlgorithm::JarvisMarch, &cfg).unwrap();
        let (divide, _) = compute_layers(&points, HullAlgorithm::DivideAndConquer, &cfg).unwrap();
        prop_assert_eq!(&graham, &jarvis);
        prop_assert_eq!(&graham, &divide);
    }

    #[test]
    fn recompute_is_idempotent(points in cloud(), algo in algorithm()) {
        let mut e = engine_with(algo, points);
        let layers = e.layers().to_vec();
        let steps = e.computation_steps().clone();
        e.recompute().unwrap();
        prop_assert_eq!(e.layers(), layers.as_slice());
        prop_assert_eq!(e.computation_steps(), &steps);
    }

    #[test]
    fn peel_then_re_add_round_trips(points in cloud(), algo in algorithm()) {
        let mut e = engine_with(algo, points.clone());
        let layers = e.layers().to_vec();
        let peeled = e.peel_one_layer().unwrap();
        prop_assert_eq!(peeled, !layers.is_empty());
        if peeled {
            prop_assert_eq!(e.layers(), &layers[1..]);
        }
        e.re_add_layer().unwrap();
        prop_assert_eq!(e.layers(), layers.as_slice());
        prop_assert_eq!(sorted(e.all_points().to_vec()), sorted(points));
    }
}
