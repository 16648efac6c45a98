use cleave::{
    Agglomerative, DistanceMatrix, HealthCheck, Kmeans, KmeansState, Linkage, RandomIndices,
};
use proptest::prelude::*;

fn points(max_n: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), 1..max_n)
}

proptest! {
    #[test]
    fn prop_leaf_count_matches_records(data in points(16)) {
        let tree = Agglomerative::new().fit(&data).unwrap();

        prop_assert_eq!(tree.n_leaves(), data.len());
        prop_assert_eq!(tree.n_merges(), data.len() - 1);
        let root = tree.node(tree.root().unwrap()).unwrap();
        prop_assert_eq!(root.members().len(), data.len());
    }

    #[test]
    fn prop_linkage_is_symmetric(
        data in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 3), 2..12),
        split in 0usize..100,
    ) {
        let m = DistanceMatrix::new(&data);
        let split = 1 + split % (data.len() - 1);
        let a: Vec<usize> = (0..split).collect();
        let b: Vec<usize> = (split..data.len()).collect();

        for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
            let ab = linkage.distance(&m, &a, &b);
            let ba = linkage.distance(&m, &b, &a);
            prop_assert!((ab - ba).abs() <= 1e-9, "{:?}: {} vs {}", linkage, ab, ba);
        }
    }

    #[test]
    fn prop_heights_never_invert(data in points(16)) {
        for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
            let tree = Agglomerative::new().with_linkage(linkage).fit(&data).unwrap();
            let report = tree.health_check();
            prop_assert!(report.is_healthy(), "{}", report);

            for node in tree.iter() {
                for &c in node.children() {
                    let child = tree.node(c).unwrap();
                    prop_assert!(child.height <= node.height + 1e-9);
                }
            }
        }
    }

    #[test]
    fn prop_cut_extremes(data in points(16)) {
        let tree = Agglomerative::new().fit(&data).unwrap();
        let root = tree.root().unwrap();

        prop_assert_eq!(tree.cut(f64::INFINITY), vec![root]);

        let mut leaves = tree.cut(f64::NEG_INFINITY);
        leaves.sort_unstable();
        prop_assert_eq!(leaves, (0..data.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_cut_is_a_partition(data in points(16), threshold in 0.0f64..30.0) {
        let tree = Agglomerative::new().fit(&data).unwrap();
        let mut covered: Vec<usize> = tree
            .cut(threshold)
            .iter()
            .flat_map(|&id| {
                let node = tree.node(id).unwrap();
                assert!(node.height <= threshold || node.is_leaf());
                node.members().to_vec()
            })
            .collect();
        covered.sort_unstable();
        prop_assert_eq!(covered, (0..data.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_kmeans_fixed_point(data in points(30), k in 1usize..5, seed in any::<u64>()) {
        prop_assume!(k <= data.len());
        let fit = Kmeans::new(k).fit_seeded(&data, seed).unwrap();

        prop_assert!(fit.converged);
        prop_assert_eq!(fit.predict(&data), fit.labels.clone());

        let mut members: Vec<usize> = fit.partition.iter().flatten().copied().collect();
        members.sort_unstable();
        prop_assert_eq!(members, (0..data.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_kmeans_sse_non_increasing(data in points(30), k in 1usize..5, seed in any::<u64>()) {
        prop_assume!(k <= data.len());
        let mut run = Kmeans::new(k).start(&data, RandomIndices::seeded(seed)).unwrap();

        let mut last = f64::INFINITY;
        while run.iterations() < 300 && run.step() == KmeansState::Iterating {
            let sse = run.sse();
            prop_assert!(sse <= last + 1e-9, "sse rose from {} to {}", last, sse);
            last = sse;
        }
    }
}
