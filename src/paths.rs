//! Derivation of the submission and production directories.

use std::path::PathBuf;
use std::path::absolute;

use anyhow::Context;
use anyhow::Result;
use path_clean::PathClean;
use tokio::fs;
use tracing::debug;

use crate::config::Config;

/// The directories a generator run writes to or refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Where the XML and metadata files are written.
    pub submission_dir: PathBuf,
    /// Where the jobs write their production output.
    ///
    /// This is always `<gpfs_base>/production/<daytag>`, even when
    /// `--output-dir` is given.
    pub output_dir: PathBuf,
    /// The GPFS destination; the same directory as
    /// [`output_dir`][Self::output_dir].
    pub gpfs_dest: PathBuf,
    /// The base directory substituted into the XML.
    pub basedir: String,
}

impl Paths {
    /// Derives the directories for a configuration without touching the
    /// filesystem.
    pub fn derive(config: &Config) -> Result<Self> {
        let submission_dir = match &config.output_dir {
            Some(dir) => absolute(dir)
                .with_context(|| format!("failed to make `{dir}` absolute", dir = dir.display()))?
                .clean(),
            None => config
                .gpfs_base
                .join("submission")
                .join(&config.daytag),
        };

        let output_dir = config.gpfs_base.join("production").join(&config.daytag);
        let gpfs_dest = output_dir.clone();
        let basedir = config
            .basedir
            .clone()
            .filter(|basedir| !basedir.is_empty())
            .unwrap_or_else(|| submission_dir.display().to_string());

        Ok(Self {
            submission_dir,
            output_dir,
            gpfs_dest,
            basedir,
        })
    }

    /// Creates the submission and production directories if they are
    /// missing.
    pub async fn create(&self) -> Result<()> {
        for dir in [&self.submission_dir, &self.output_dir] {
            debug!("creating directory `{dir}`", dir = dir.display());
            fs::create_dir_all(dir).await.with_context(|| {
                format!("failed to create directory `{dir}`", dir = dir.display())
            })?;
        }

        Ok(())
    }
}
