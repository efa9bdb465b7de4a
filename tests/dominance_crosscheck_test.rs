use ssit::dominance::{Point, count_dominators};
use ssit::{ScanConfig, run_scan};

fn brute_force(points: &[Point]) -> Vec<u64> {
    points
        .iter()
        .map(|a| {
            points
                .iter()
                .filter(|o| o.lane < a.lane && o.depth <= a.depth)
                .count() as u64
        })
        .collect()
}

#[test]
fn test_table_counts_match_quadratic_scan() {
    let table = run_scan(&ScanConfig::with_n_max(4_000)).unwrap();
    let points: Vec<Point> = table
        .finite()
        .map(|r| Point { lane: r.lane, depth: r.depth, n: r.n })
        .collect();
    let stored: Vec<u64> = table.finite().map(|r| r.dominators.unwrap()).collect();

    assert_eq!(stored, brute_force(&points));
}

#[test]
fn test_input_order_does_not_matter() {
    let table = run_scan(&ScanConfig::with_n_max(1_500)).unwrap();
    let points: Vec<Point> = table
        .finite()
        .map(|r| Point { lane: r.lane, depth: r.depth, n: r.n })
        .collect();

    let forward = count_dominators(&points);
    let reversed_points: Vec<Point> = points.iter().rev().copied().collect();
    let mut reversed = count_dominators(&reversed_points);
    reversed.reverse();

    assert_eq!(forward, reversed);
}

#[test]
fn test_many_shared_lanes() {
    // every prime-times-two shares the lowest lane; none may count another
    let table = run_scan(&ScanConfig::with_n_max(2_000)).unwrap();
    let lowest = table
        .finite()
        .map(|r| r.lane)
        .fold(f64::INFINITY, f64::min);
    let shared = table.finite().filter(|r| r.lane == lowest).count();

    assert!(shared > 10, "expected many entries on the lowest lane, got {}", shared);
    assert!(
        table
            .finite()
            .filter(|r| r.lane == lowest)
            .all(|r| r.dominators == Some(0))
    );
}
