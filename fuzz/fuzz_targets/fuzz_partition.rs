#![no_main]

use fsearch::search::partition;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u32, u8)| {
    let (entries, workers) = (data.0 as usize % 1_000_000, data.1 as usize);
    let ranges = partition(entries, workers);
    if entries == 0 || workers == 0 {
        assert!(ranges.is_empty());
        return;
    }

    // Ranges must tile 0..entries exactly, in order
    let mut next = 0;
    for range in &ranges {
        assert_eq!(range.start, next);
        assert!(range.end >= range.start);
        next = range.end + 1;
    }
    assert_eq!(next, entries);
    assert!(ranges.len() <= workers);
});
