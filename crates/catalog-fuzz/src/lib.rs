//! Fuzzing library for openalex-search.
//!
//! Targets cover deserialization of catalog responses and the export
//! encoders fed with arbitrary text.
//!
//! # Usage
//!
//! ```bash
//! cd crates/catalog-fuzz
//! cargo +nightly fuzz run fuzz_work_parse -- -max_total_time=60
//! ```

pub use openalex_search::{export, models};
