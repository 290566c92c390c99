//! Property-based tests for Delaunay triangulations.
//!
//! - Empty circumcircle/circumsphere condition over the output mesh
//! - Output indices are valid and cover every input point
//! - Output is independent of input order

use bowyer_watson::core::triangulation::Triangulation;
use bowyer_watson::geometry::point::Point;
use proptest::prelude::*;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

fn finite_coordinate() -> impl Strategy<Value = f64> {
    (-100.0..100.0).prop_filter("must be finite", |x: &f64| x.is_finite())
}

/// Drops exact coordinate duplicates, which are rejected up front.
fn dedup_points<const D: usize>(points: Vec<Point<f64, D>>) -> Vec<Point<f64, D>> {
    let mut unique: Vec<Point<f64, D>> = Vec::with_capacity(points.len());
    'outer: for p in points {
        for q in &unique {
            if p.coords()
                .iter()
                .zip(q.coords())
                .all(|(a, b)| a.to_bits() == b.to_bits())
            {
                continue 'outer;
            }
        }
        unique.push(p);
    }
    unique
}

macro_rules! test_delaunay_properties {
    ($dim:literal, $min_points:literal, $max_points:literal) => {
        pastey::paste! {
            proptest! {
                /// Property: no input point lies strictly inside the circumsphere
                /// of an output simplex that does not use it.
                #[test]
                fn [<prop_empty_circumsphere_ $dim d>](
                    points in prop::collection::vec(
                        prop::array::[<uniform $dim>](finite_coordinate()).prop_map(Point::new),
                        $min_points..=$max_points
                    ).prop_map(dedup_points::<$dim>)
                ) {
                    prop_assume!(points.len() > $dim);
                    let mesh = Triangulation::new(&points).unwrap().extract_mesh();
                    let violations = mesh.find_delaunay_violations(1e-10).unwrap();
                    prop_assert!(violations.is_empty(), "violations: {:?}", violations);
                }

                /// Property: every output index is in range and every input point
                /// is used by some simplex.
                #[test]
                fn [<prop_indices_cover_input_ $dim d>](
                    points in prop::collection::vec(
                        prop::array::[<uniform $dim>](finite_coordinate()).prop_map(Point::new),
                        $min_points..=$max_points
                    ).prop_map(dedup_points::<$dim>)
                ) {
                    prop_assume!(points.len() > $dim);
                    let mesh = Triangulation::new(&points).unwrap().extract_mesh();
                    let mut used = vec![false; points.len()];
                    for simplex in mesh.simplices() {
                        prop_assert_eq!(simplex.len(), $dim + 1);
                        for &v in simplex {
                            prop_assert!(v < points.len());
                            used[v] = true;
                        }
                    }
                    prop_assert!(used.iter().all(|&u| u));
                    for (i, &caller) in mesh.input_indices().iter().enumerate() {
                        prop_assert_eq!(mesh.vertices()[i], points[caller]);
                    }
                }

                /// Property: reversing the input yields the same mesh.
                #[test]
                fn [<prop_permutation_invariant_ $dim d>](
                    points in prop::collection::vec(
                        prop::array::[<uniform $dim>](finite_coordinate()).prop_map(Point::new),
                        $min_points..=$max_points
                    ).prop_map(dedup_points::<$dim>)
                ) {
                    prop_assume!(points.len() > $dim);
                    let forward = Triangulation::new(&points).unwrap().extract_mesh();
                    let reversed: Vec<_> = points.iter().rev().copied().collect();
                    let backward = Triangulation::new(&reversed).unwrap().extract_mesh();
                    prop_assert_eq!(forward.vertices(), backward.vertices());
                    prop_assert_eq!(forward.simplices(), backward.simplices());
                }
            }
        }
    };
}

test_delaunay_properties!(2, 3, 20);
test_delaunay_properties!(3, 4, 12);
