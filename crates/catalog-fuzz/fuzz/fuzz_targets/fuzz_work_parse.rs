#![no_main]

use libfuzzer_sys::fuzz_target;
use openalex_search::models::{SearchResponse, TopicSuggestionResponse, Work};

fuzz_target!(|data: &[u8]| {
    // Parsing may fail but must never panic; parsed works must render.
    if let Ok(work) = serde_json::from_slice::<Work>(data) {
        let _ = work.abstract_text();
        let _ = openalex_search::export::work_to_xml(&work);
    }
    let _ = serde_json::from_slice::<SearchResponse>(data);
    let _ = serde_json::from_slice::<TopicSuggestionResponse>(data);
});
