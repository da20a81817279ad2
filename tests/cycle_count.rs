use simple_cycles::{
    count_cycles, count_cycles_bounded, Accumulation, CsrDigraph, CycleConfig, CycleEnumerator,
    SpawnPolicy,
};

fn configs() -> Vec<CycleConfig> {
    let aggressive = SpawnPolicy {
        max_fork_depth: 6,
        min_branch_to_fork: 2,
        max_branch_to_fork: usize::MAX,
        sequential_fallback_ratio: 0.0,
        accumulation: Accumulation::PerTask,
    };
    let mut out = Vec::new();
    for policy in [
        SpawnPolicy::sequential(),
        SpawnPolicy::nested(),
        SpawnPolicy::root_only(),
        SpawnPolicy::root_unbounded(),
        aggressive,
    ] {
        out.push(CycleConfig::parallel(policy).with_threads(4));
        out.push(CycleConfig::parallel(policy).with_threads(4).with_pipeline(true));
    }
    out.push(CycleConfig::sequential());
    out
}

fn assert_count_everywhere(graph: &CsrDigraph, expected: u64) {
    assert_eq!(count_cycles(graph), expected, "sequential");
    for config in configs() {
        let report = CycleEnumerator::new(config).run(graph).unwrap();
        assert_eq!(report.cycles, expected, "{config:?}");
    }
}

fn complete(n: usize) -> CsrDigraph {
    let edges: Vec<_> = (0..n)
        .flat_map(|u| (0..n).filter(move |&v| v != u).map(move |v| (u, v)))
        .collect();
    CsrDigraph::from_edges(n, &edges)
}

/// Number of simple cycles of the complete digraph on `n` vertices:
/// sum over k of C(n, k + 1) * k!.
fn complete_cycle_count(n: u64) -> u64 {
    let mut total = 0;
    for len in 2..=n {
        // C(n, len) * (len - 1)!
        let mut arrangements = 1u64;
        for i in 0..len {
            arrangements *= n - i;
        }
        total += arrangements / len;
    }
    total
}

#[test]
fn no_edges_means_no_cycles() {
    assert_count_everywhere(&CsrDigraph::from_edges(5, &[]), 0);
    assert_count_everywhere(&CsrDigraph::from_edges(0, &[]), 0);
}

#[test]
fn single_self_loop() {
    assert_count_everywhere(&CsrDigraph::from_edges(1, &[(0, 0)]), 1);
}

#[test]
fn directed_ring_has_one_cycle() {
    for k in [2usize, 3, 10, 257] {
        let edges: Vec<_> = (0..k).map(|u| (u, (u + 1) % k)).collect();
        assert_count_everywhere(&CsrDigraph::from_edges(k, &edges), 1);
    }
}

#[test]
fn triangle_with_back_edge() {
    let g = CsrDigraph::from_edges(3, &[(0, 1), (1, 2), (2, 0), (1, 0)]);
    assert_count_everywhere(&g, 2);
}

#[test]
fn two_disjoint_triangles() {
    let g = CsrDigraph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
    assert_count_everywhere(&g, 2);
    let report = CycleEnumerator::default().run(&g).unwrap();
    assert_eq!(report.pivots_searched, 2);
}

#[test]
fn complete_digraphs() {
    assert_eq!(complete_cycle_count(4), 20);
    assert_eq!(complete_cycle_count(5), 84);
    for n in 2..=7 {
        assert_count_everywhere(&complete(n), complete_cycle_count(n as u64));
    }
}

#[test]
fn parallel_edges_are_distinct_cycles() {
    let g = CsrDigraph::from_edges(2, &[(0, 1), (0, 1), (1, 0)]);
    assert_count_everywhere(&g, 2);
}

#[test]
fn dag_has_no_cycles() {
    let edges: Vec<_> = (0..30)
        .flat_map(|u| (u + 1..30).map(move |v| (u, v)))
        .collect();
    assert_count_everywhere(&CsrDigraph::from_edges(30, &edges), 0);
}

#[test]
fn bounded_with_large_limit_is_exact() {
    let g = complete(6);
    let exact = count_cycles(&g);
    assert_eq!(count_cycles_bounded(&g, 6), exact);
    assert_eq!(count_cycles_bounded(&g, 100), exact);
    let config = CycleConfig::parallel(SpawnPolicy::nested()).with_max_len(6);
    assert_eq!(CycleEnumerator::new(config).run(&g).unwrap().cycles, exact);
}

#[test]
fn bounded_counts_short_cycles() {
    // Every 2-cycle of K5 is found with max_len 2.
    assert_eq!(count_cycles_bounded(&complete(5), 2), 10);
    assert_eq!(count_cycles_bounded(&complete(5), 1), 0);
    let report = CycleEnumerator::new(CycleConfig::sequential().with_max_len(2))
        .run(&complete(5))
        .unwrap();
    assert_eq!(report.max_len, Some(2));
}

#[test]
fn report_serializes_to_json() {
    let g = CsrDigraph::from_edges(3, &[(0, 1), (1, 2), (2, 0), (1, 0)]);
    let report = CycleEnumerator::default().run(&g).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["cycles"], 2);
    assert_eq!(json["nodes"], 3);
    assert_eq!(json["edges"], 4);
}
