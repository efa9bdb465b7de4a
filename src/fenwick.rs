/// Binary indexed tree over ranks `1..=len` with point add and prefix sum.
#[derive(Debug, Clone)]
pub struct Fenwick {
    tree: Vec<u64>,
}

impl Fenwick {
    pub fn new(len: usize) -> Self {
        Fenwick { tree: vec![0; len + 1] }
    }

    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add(&mut self, rank: usize, delta: u64) {
        assert!(rank >= 1 && rank <= self.len(), "rank {} outside 1..={}", rank, self.len());
        let mut i = rank;
        while i < self.tree.len() {
            self.tree[i] += delta;
            // step to the next node covering this rank
            i += i & i.wrapping_neg();
        }
    }

    /// Sum of ranks `1..=rank`. Rank 0 sums nothing.
    pub fn prefix_sum(&self, rank: usize) -> u64 {
        let mut i = rank.min(self.len());
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            // drop the lowest set bit
            i -= i & i.wrapping_neg();
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree = Fenwick::new(0);
        assert!(tree.is_empty());
        assert_eq!(tree.prefix_sum(0), 0);
        assert_eq!(tree.prefix_sum(5), 0);
    }

    #[test]
    fn test_prefix_sums_match_naive() {
        let len = 37;
        let mut tree = Fenwick::new(len);
        let mut naive = vec![0u64; len + 1];
        for step in 0..200usize {
            let rank = (step * 7919) % len + 1;
            tree.add(rank, 1);
            naive[rank] += 1;
        }
        for rank in 0..=len {
            let expected: u64 = naive[1..=rank].iter().sum();
            assert_eq!(tree.prefix_sum(rank), expected, "rank {}", rank);
        }
    }

    #[test]
    fn test_add_with_delta() {
        let mut tree = Fenwick::new(4);
        tree.add(2, 5);
        tree.add(4, 3);
        assert_eq!(tree.prefix_sum(1), 0);
        assert_eq!(tree.prefix_sum(2), 5);
        assert_eq!(tree.prefix_sum(3), 5);
        assert_eq!(tree.prefix_sum(4), 8);
    }

    #[test]
    #[should_panic]
    fn test_rank_zero_panics() {
        let mut tree = Fenwick::new(3);
        tree.add(0, 1);
    }
}
