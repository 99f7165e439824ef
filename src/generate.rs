//! Generation of a job XML file and its metadata sidecar.

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::Utc;
use tokio::fs;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::git;
use crate::input::input_element;
use crate::metadata::Metadata;
use crate::paths::Paths;
use crate::snapshot::SNAPSHOT_DIR;
use crate::snapshot::write_snapshot;
use crate::template;

/// The files written by a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The filled job XML.
    pub xml: PathBuf,
    /// The metadata sidecar.
    pub metadata: PathBuf,
    /// The steering macro snapshot, if one was taken.
    pub snapshot: Option<PathBuf>,
}

/// Generates the job XML and metadata for a configuration.
///
/// Existing XML and metadata files are overwritten.
pub async fn generate(config: &Config) -> Result<Generated> {
    let paths = Paths::derive(config)?;
    debug!(?paths, "derived directories");
    paths.create().await?;

    let template = fs::read_to_string(&config.template).await.with_context(|| {
        format!(
            "failed to read template `{path}`",
            path = config.template.display()
        )
    })?;

    let input = input_element(&config.input)?;
    let commit = git::commit_hash(&config.srcdir, config.git_timeout).await;

    // The snapshot goes under the `--output-dir` value as given, not under the
    // derived production directory.
    let snapshot = match &config.output_dir {
        Some(dir) => write_snapshot(&config.steering_macro(), &dir.join(SNAPSHOT_DIR)).await?,
        None => {
            warn!("no `--output-dir` was given; the steering macro was not copied");
            None
        }
    };

    let subs = template::substitutions(config, &paths, &input);
    let xml = template::fill(&template, &subs);

    let xml_path = paths.submission_dir.join(config.xml_name());
    fs::write(&xml_path, xml)
        .await
        .with_context(|| format!("failed to write `{path}`", path = xml_path.display()))?;
    info!("wrote job XML `{path}`", path = xml_path.display());

    let metadata_path = paths.submission_dir.join(config.metadata_name());
    Metadata {
        generated: Utc::now(),
        git_commit: commit,
        steering_snapshot: snapshot.clone(),
        xml: xml_path.clone(),
        input_element: input,
    }
    .write(&metadata_path)
    .await?;
    info!("wrote metadata `{path}`", path = metadata_path.display());

    Ok(Generated {
        xml: xml_path,
        metadata: metadata_path,
        snapshot,
    })
}
