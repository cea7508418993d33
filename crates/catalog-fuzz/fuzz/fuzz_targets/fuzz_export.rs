#![no_main]

use libfuzzer_sys::fuzz_target;
use openalex_search::export::{escape_csv, escape_xml};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let xml = escape_xml(text);
        assert!(!xml.contains('<') && !xml.contains('>'));

        let csv = escape_csv(text);
        if text.contains([',', '\n', '"']) {
            assert!(csv.starts_with('"') && csv.ends_with('"'));
        }
    }
});
