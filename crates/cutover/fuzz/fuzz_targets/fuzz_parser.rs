//! Fuzz target for the extract loader.
//!
//! Arbitrary bytes must never panic the loader, and any table it returns must
//! be rectangular.

#![no_main]

use cutover::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok(table) = parser.parse_bytes("fuzz", data) {
        let width = table.column_count();
        assert!(table.rows().all(|r| r.values().len() == width));
    }
});
