//! Export encoders: XML, CSV and summary documents.
//!
//! The encoders are pure string builders. [`Artifact`] pairs their output
//! with a suggested file name, and an [`ArtifactSink`] saves it.

mod artifact;
mod csv;
mod summary;
mod xml;

pub use artifact::{Artifact, ArtifactSink, DirectorySink};
pub use csv::{CSV_HEADERS, escape_csv, works_to_csv};
pub use summary::{SUMMARY_WIDTH, work_summary};
pub use xml::{escape_xml, work_to_xml};
