//! Export artifacts and the sinks that save them.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::{work_summary, work_to_xml, works_to_csv};
use crate::error::{ExportError, ExportResult};
use crate::models::Work;

/// A byte payload with a suggested file name, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name (no directory components).
    pub file_name: String,

    /// MIME type of the payload.
    pub content_type: &'static str,

    /// Payload.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// XML export of one work: `work-{key}.xml`.
    #[must_use]
    pub fn xml(work: &Work) -> Self {
        Self {
            file_name: format!("work-{}.xml", file_stem(work.key())),
            content_type: "application/xml",
            bytes: work_to_xml(work).into_bytes(),
        }
    }

    /// CSV export of a result page, stamped with `date`.
    #[must_use]
    pub fn csv(works: &[Work], date: NaiveDate) -> Self {
        Self {
            file_name: format!("openalex-results-{}.csv", date.format("%Y-%m-%d")),
            content_type: "text/csv;charset=utf-8",
            bytes: works_to_csv(works).into_bytes(),
        }
    }

    /// Summary document of one work: `work-{key}-summary.txt`.
    #[must_use]
    pub fn summary(work: &Work) -> Self {
        Self {
            file_name: format!("work-{}-summary.txt", file_stem(work.key())),
            content_type: "text/plain;charset=utf-8",
            bytes: work_summary(work).into_bytes(),
        }
    }

    /// Downloaded open access file of one work: `work-{key}.pdf`.
    #[must_use]
    pub fn open_access(work: &Work, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("work-{}.pdf", file_stem(work.key())),
            content_type: "application/pdf",
            bytes,
        }
    }
}

/// Replace characters that do not belong in a file name.
fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.trim_matches('.').is_empty() {
        "unknown".to_string()
    } else {
        stem
    }
}

/// Platform save primitive for artifacts.
pub trait ArtifactSink {
    /// Save the artifact and return where it went.
    fn save(&self, artifact: &Artifact) -> ExportResult<PathBuf>;
}

/// Saves artifacts as files in a directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&self, artifact: &Artifact) -> ExportResult<PathBuf> {
        let name = artifact.file_name.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ExportError::InvalidFileName(name.to_string()));
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(name);
        std::fs::write(&path, &artifact.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            bytes = artifact.bytes.len(),
            "Saved artifact"
        );
        Ok(path)
    }
}
