use std::ops::RangeInclusive;

/// Contiguous, inclusive range of entry ids scanned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRange {
    pub start: usize,
    pub end: usize,
}

impl PartitionRange {
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn ids(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Split `num_entries` ids into at most `workers` contiguous ranges.
///
/// Every range gets `num_entries / workers` ids (at least one) and the last
/// range absorbs the remainder, so ranges cover `0..num_entries` exactly once
/// and in order. Fewer ranges than workers are produced when there are fewer
/// entries than workers.
pub fn partition(num_entries: usize, workers: usize) -> Vec<PartitionRange> {
    if num_entries == 0 || workers == 0 {
        return Vec::new();
    }

    let count = workers.min(num_entries);
    let per_worker = num_entries / count;

    (0..count)
        .map(|i| {
            let start = i * per_worker;
            let end = if i + 1 == count {
                num_entries - 1
            } else {
                start + per_worker - 1
            };
            PartitionRange { start, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(ranges: &[PartitionRange], n: usize) {
        let mut expected = 0;
        for range in ranges {
            assert_eq!(range.start, expected);
            assert!(range.end >= range.start);
            expected = range.end + 1;
        }
        assert_eq!(expected, n);
    }

    #[test]
    fn test_even_split() {
        let ranges = partition(100, 4);
        assert_eq!(ranges.len(), 4);
        assert!(ranges.iter().all(|r| r.len() == 25));
        assert_covers(&ranges, 100);
    }

    #[test]
    fn test_remainder_goes_to_last() {
        let ranges = partition(10, 3);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], PartitionRange { start: 0, end: 2 });
        assert_eq!(ranges[1], PartitionRange { start: 3, end: 5 });
        assert_eq!(ranges[2], PartitionRange { start: 6, end: 9 });
    }

    #[test]
    fn test_fewer_entries_than_workers() {
        let ranges = partition(3, 8);
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(|r| r.len() == 1));
        assert_covers(&ranges, 3);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(partition(0, 4).is_empty());
        assert!(partition(10, 0).is_empty());
        assert_eq!(partition(1, 1), vec![PartitionRange { start: 0, end: 0 }]);
    }

    #[test]
    fn test_coverage_many_shapes() {
        for n in 1..64 {
            for workers in 1..12 {
                assert_covers(&partition(n, workers), n);
            }
        }
    }
}
