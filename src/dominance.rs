use crate::fenwick::Fenwick;
use crate::record::Record;
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lane: f64,
    pub depth: f64,
    pub n: u64,
}

fn sweep_order(a: &Point, b: &Point) -> Ordering {
    a.lane
        .total_cmp(&b.lane)
        .then(a.depth.total_cmp(&b.depth))
        .then(a.n.cmp(&b.n))
}

/// For every point, the number of other points with a strictly smaller lane
/// and a depth no greater than its own. Output is aligned with `points`.
///
/// Points are swept in ascending lane order one equal-lane group at a time.
/// Each group queries the tree before any of its members is inserted, so
/// points sharing a lane never count each other.
pub fn count_dominators(points: &[Point]) -> Vec<u64> {
    // Fenwick ranks are 1-based positions in the sorted distinct depths
    let depths = points
        .iter()
        .map(|p| p.depth)
        .sorted_by(f64::total_cmp)
        .dedup()
        .collect_vec();

    let rank_of = |depth: f64| -> usize {
        let idx = depths.partition_point(|&d| d < depth);
        if depths.get(idx) != Some(&depth) {
            unreachable!("depth {} missing from the compressed coordinates", depth);
        }
        idx + 1
    };

    let order = (0..points.len())
        .sorted_by(|&a, &b| sweep_order(&points[a], &points[b]))
        .collect_vec();

    let mut tree = Fenwick::new(depths.len());
    let mut counts = vec![0u64; points.len()];
    let mut groups = 0usize;

    for group in order.chunk_by(|&a, &b| points[a].lane == points[b].lane) {
        // tree holds only strictly smaller lanes at this point
        for &i in group {
            counts[i] = tree.prefix_sum(rank_of(points[i].depth));
        }
        // insert the whole group only after every member has queried
        for &i in group {
            tree.add(rank_of(points[i].depth), 1);
        }
        groups += 1;
    }

    debug!(
        points = points.len(),
        distinct_depths = depths.len(),
        lane_groups = groups,
        "dominance sweep done"
    );
    counts
}

/// Fill `dominators` on every FINITE record; INFINITE records keep `None`.
pub fn assign_dominators(records: &mut [Record]) {
    let (indices, points): (Vec<usize>, Vec<Point>) = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_finite())
        .map(|(i, r)| (i, Point { lane: r.lane, depth: r.depth, n: r.n }))
        .unzip();

    let counts = count_dominators(&points);
    for (i, count) in indices.into_iter().zip(counts) {
        records[i].dominators = Some(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lane: f64, depth: f64, n: u64) -> Point {
        Point { lane, depth, n }
    }

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
    fn test_empty_input() {
        assert!(count_dominators(&[]).is_empty());
    }

    #[test]
    fn test_equal_lane_never_dominates() {
        let points = vec![p(0.1, 0.5, 1), p(0.1, 0.2, 2), p(0.1, 0.9, 3)];
        assert_eq!(count_dominators(&points), vec![0, 0, 0]);
    }

    #[test]
    fn test_depth_is_non_strict() {
        let points = vec![p(-0.5, 0.4, 1), p(0.0, 0.4, 2), p(0.5, 0.3, 3)];
        assert_eq!(count_dominators(&points), vec![0, 1, 0]);
    }

    #[test]
    fn test_mixed_groups() {
        let points = vec![
            p(-1.0, 1.0, 6),
            p(-1.0, 1.0, 8),
            p(-1.0, 0.396, 10),
            p(-0.333, 0.896, 12),
            p(0.2, 0.9, 20),
        ];
        let counts = count_dominators(&points);
        assert_eq!(counts, vec![0, 0, 0, 1, 2]);
        assert_eq!(counts, brute_force(&points));
    }

    #[test]
    fn test_matches_brute_force_on_grid() {
        // small lattice with many ties on both axes
        let mut points = Vec::new();
        let mut n = 0;
        for i in 0..12u64 {
            for j in 0..9u64 {
                n += 1;
                let lane = ((i * 7 + j * 3) % 5) as f64 / 5.0 - 0.5;
                let depth = ((i * 5 + j * 11) % 7) as f64 / 7.0;
                points.push(p(lane, depth, n));
            }
        }
        assert_eq!(count_dominators(&points), brute_force(&points));
    }

    #[test]
    fn test_output_aligned_with_input_order() {
        let points = vec![p(0.9, 0.9, 3), p(-0.9, 0.1, 1), p(0.0, 0.5, 2)];
        assert_eq!(count_dominators(&points), vec![2, 0, 1]);
    }
}
