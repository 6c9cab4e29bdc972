//! Cross-checks of the nearest-neighbor search against brute force and against `rstar`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

use crate::{squared_distance, HyperRect, KDTree};

fn random_array<const D: usize>(rng: &mut StdRng) -> [f64; D] {
    std::array::from_fn(|_| rng.gen_range(-50.0..50.0))
}

fn make_tree<const D: usize>(points: &[[f64; D]]) -> KDTree<f64> {
    let bounds = HyperRect::<f64>::new([-50.; D], [50.; D]).unwrap();
    KDTree::build(points.iter().copied(), bounds).unwrap()
}

fn cross_check_rstar<const D: usize>(seed: u64, num_items: usize)
where
    [f64; D]: rstar::Point<Scalar = f64>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<[f64; D]> = (0..num_items).map(|_| random_array(&mut rng)).collect();
    let tree = make_tree(&points);
    let rtree = RTree::bulk_load(points.clone());

    for _ in 0..500 {
        let target: [f64; D] = random_array(&mut rng);
        let result = tree.nearest(&target).unwrap();
        let expected = rtree.nearest_neighbor(&target).unwrap();

        assert_eq!(
            result.distance_squared,
            squared_distance(expected, &target).unwrap(),
            "kd tree and rstar disagree for target {:?}",
            target
        );
        assert_eq!(
            result.neighbor.unwrap().point.coords(),
            points[result.neighbor.unwrap().index].as_slice()
        );
    }
}

#[test]
fn matches_rstar_2d() {
    cross_check_rstar::<2>(1, 2_000);
}

#[test]
fn matches_rstar_3d() {
    cross_check_rstar::<3>(2, 2_000);
}

#[test]
fn no_input_point_is_closer() {
    let mut rng = StdRng::seed_from_u64(5);
    let points: Vec<[f64; 4]> = (0..500).map(|_| random_array(&mut rng)).collect();
    let tree = make_tree(&points);

    for _ in 0..100 {
        let target: [f64; 4] = random_array(&mut rng);
        let result = tree.nearest(&target).unwrap();
        for p in points.iter() {
            assert!(squared_distance(p, &target).unwrap() >= result.distance_squared);
        }
    }
}

#[test]
fn pruning_visits_few_nodes() {
    let mut rng = StdRng::seed_from_u64(9);
    let num_items = 20_000;
    let points: Vec<[f64; 2]> = (0..num_items).map(|_| random_array(&mut rng)).collect();
    let tree = make_tree(&points);

    let num_queries = 1_000;
    let total: usize = (0..num_queries)
        .map(|_| {
            let target: [f64; 2] = random_array(&mut rng);
            tree.nearest(&target).unwrap().nodes_visited
        })
        .sum();

    // a full scan would visit every node
    let mean = total as f64 / num_queries as f64;
    assert!(mean < 100., "mean nodes visited {} for {} items", mean, num_items);
}

#[test]
fn concurrent_queries() {
    let mut rng = StdRng::seed_from_u64(13);
    let points: Vec<[f64; 3]> = (0..1_000).map(|_| random_array(&mut rng)).collect();
    let tree = make_tree(&points);
    let targets: Vec<[f64; 3]> = (0..64).map(|_| random_array(&mut rng)).collect();

    let sequential: Vec<f64> = targets
        .iter()
        .map(|t| tree.nearest(t).unwrap().distance_squared)
        .collect();

    let parallel: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = targets
            .chunks(16)
            .map(|chunk| {
                let tree = &tree;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|t| tree.nearest(t).unwrap().distance_squared)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, parallel);
    assert_eq!(tree.bounds().unwrap().min().coords(), &[-50.; 3]);
}
