//! The provenance sidecar written next to each generated XML file.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::DateTime;
use chrono::Utc;
use tokio::fs;

/// Recorded in place of a snapshot path when no snapshot was taken.
pub const NOT_COPIED: &str = "<not-copied>";

/// Provenance of one generated XML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// When the XML was generated.
    pub generated: DateTime<Utc>,
    /// The commit of the source tree, or `UNKNOWN`.
    pub git_commit: String,
    /// Where the steering macro was copied, if it was.
    pub steering_snapshot: Option<PathBuf>,
    /// The generated XML file.
    pub xml: PathBuf,
    /// The rendered `<input>` element.
    pub input_element: String,
}

impl Metadata {
    /// Writes the metadata to `path`, replacing any existing file.
    pub async fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())
            .await
            .with_context(|| format!("failed to write metadata file `{path}`", path = path.display()))
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "generated: {}",
            self.generated.format("%Y-%m-%dT%H:%M:%S%.6fZ")
        )?;
        writeln!(f, "git_commit: {}", self.git_commit)?;
        match &self.steering_snapshot {
            Some(path) => writeln!(f, "steering_snapshot: {}", path.display())?,
            None => writeln!(f, "steering_snapshot: {NOT_COPIED}")?,
        }
        writeln!(f, "xml: {}", self.xml.display())?;
        writeln!(f, "input_element: {}", self.input_element)
    }
}
