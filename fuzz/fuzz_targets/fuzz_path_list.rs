#![no_main]

use fsearch::index::{EntryIndex, IndexEntry, MemoryIndex};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary path lists either parse or error; rebuilt paths never panic
    if let Ok(index) = MemoryIndex::parse_path_list(data) {
        let mut buf = String::new();
        for id in 0..index.len() {
            if let Some(entry) = index.get(id) {
                let _ = entry.write_full_path(&mut buf);
            }
        }
    }
});
