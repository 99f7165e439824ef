//! Command line arguments and the immutable configuration record built from
//! them.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use clap::ArgGroup;
use clap::Parser;
use thiserror::Error;

/// The project area used when `--gpfs-base` is not given.
pub const DEFAULT_GPFS_BASE: &str = "/gpfs/mnt/gpfs01/star/pwg/matonoli/ea-trees-2017-pp500";

/// The output file prefix used when `--out-prefix` is not given.
pub const DEFAULT_OUT_PREFIX: &str = "eaTree";

/// The template location, relative to the source tree.
pub const DEFAULT_TEMPLATE: &str = "templates/job_template.xml";

/// How long to wait for `git` when `--git-timeout` is not given.
const DEFAULT_GIT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while assembling a [`Config`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither input flag was supplied.
    #[error("either `--input-catalog` or `--input-list` must be provided")]
    MissingInput,

    /// Both input flags were supplied.
    #[error("`--input-catalog` and `--input-list` cannot be used together")]
    ConflictingInputs,
}

/// Where the job's input files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file catalog query, without the `catalog:star.bnl.gov?` prefix.
    Catalog(String),

    /// A local filelist (xrootd syntax).
    FileList(PathBuf),
}

impl InputSource {
    /// Selects the input source from the two mutually exclusive flags.
    ///
    /// The argument parser already enforces that exactly one is present; this
    /// guard is for callers that build a [`Config`] by hand.
    pub fn from_flags(
        catalog: Option<String>,
        list: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        match (catalog, list) {
            (Some(query), None) => Ok(Self::Catalog(query)),
            (None, Some(path)) => Ok(Self::FileList(path)),
            (None, None) => Err(ConfigError::MissingInput),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingInputs),
        }
    }
}

/// Arguments accepted by `pico-ea-submit`.
#[derive(Parser, Debug, Clone)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["input_catalog", "input_list"])
))]
pub struct Args {
    /// Explicit submission directory; derived from `--gpfs-base` and
    /// `--daytag` when omitted or empty.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Base working directory for logs and lists inside the XML (defaults to
    /// the submission directory).
    #[arg(long, value_name = "DIR")]
    pub basedir: Option<String>,

    /// Path to the source tree to include in the sandbox (defaults to the
    /// current directory).
    #[arg(long, value_name = "DIR")]
    pub srcdir: Option<PathBuf>,

    /// Base GPFS directory under which day-tagged subdirectories are
    /// created.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_GPFS_BASE)]
    pub gpfs_base: PathBuf,

    /// Day tag (YYMMDD) included in output names.
    #[arg(long, required = true)]
    pub daytag: String,

    /// Prefix for the output ROOT files.
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_OUT_PREFIX)]
    pub out_prefix: String,

    /// Catalog query string (without `catalog:star.bnl.gov?`).
    #[arg(long, value_name = "QUERY")]
    pub input_catalog: Option<String>,

    /// Path to a local filelist (xrootd syntax).
    #[arg(long, value_name = "PATH")]
    pub input_list: Option<PathBuf>,

    /// Sets `simulateSubmission="true"` for a dry run.
    #[arg(long)]
    pub simulate: bool,

    /// Explicit XML file name (defaults to `pico_ea_<daytag>.xml`).
    #[arg(long, value_name = "NAME")]
    pub xml_name: Option<String>,

    /// The job template to fill (defaults to
    /// `<srcdir>/templates/job_template.xml`).
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Seconds to wait for `git` before giving up on the commit hash.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_GIT_TIMEOUT_SECS)]
    pub git_timeout: u64,
}

/// The resolved configuration for one generator run.
///
/// Built once from [`Args`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// The `--output-dir` value exactly as given.
    pub output_dir: Option<PathBuf>,
    /// The `--basedir` override.
    pub basedir: Option<String>,
    /// The source tree holding `StRoot/` and the steering macro.
    pub srcdir: PathBuf,
    /// The base GPFS directory.
    pub gpfs_base: PathBuf,
    /// The day tag.
    pub daytag: String,
    /// The output file prefix.
    pub out_prefix: String,
    /// Where the job's input comes from.
    pub input: InputSource,
    /// Whether the scheduler should only simulate the submission.
    pub simulate: bool,
    /// The explicit XML file name, if any.
    pub xml_name: Option<String>,
    /// The job template to fill.
    pub template: PathBuf,
    /// The commit lookup timeout.
    pub git_timeout: Duration,
}

impl Config {
    /// Resolves the configuration from parsed arguments.
    ///
    /// A missing `--srcdir` falls back to the current directory.
    pub fn from_args(args: Args) -> Result<Self> {
        let srcdir = match args.srcdir {
            Some(dir) => dir,
            None => std::env::current_dir().context("failed to resolve the current directory")?,
        };

        let input = InputSource::from_flags(args.input_catalog, args.input_list)?;
        let template = args
            .template
            .unwrap_or_else(|| srcdir.join(DEFAULT_TEMPLATE));

        Ok(Self {
            output_dir: args
                .output_dir
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            basedir: args.basedir,
            srcdir,
            gpfs_base: args.gpfs_base,
            daytag: args.daytag,
            out_prefix: args.out_prefix,
            input,
            simulate: args.simulate,
            xml_name: args.xml_name,
            template,
            git_timeout: Duration::from_secs(args.git_timeout),
        })
    }

    /// Gets the name of the XML file to write.
    pub fn xml_name(&self) -> String {
        self.xml_name
            .clone()
            .unwrap_or_else(|| format!("pico_ea_{daytag}.xml", daytag = self.daytag))
    }

    /// Gets the name of the metadata sidecar file.
    pub fn metadata_name(&self) -> String {
        format!("METADATA_{daytag}.txt", daytag = self.daytag)
    }

    /// Gets the value substituted for `__SIMULATE__`.
    pub fn simulate_value(&self) -> &'static str {
        if self.simulate { "true" } else { "false" }
    }

    /// Gets the path of the steering macro inside the source tree.
    pub fn steering_macro(&self) -> PathBuf {
        self.srcdir.join(crate::STEERING_MACRO)
    }
}

#[cfg(test)]
impl Config {
    /// Builds a catalog-driven configuration for the given directories.
    pub(crate) fn for_tests(srcdir: impl Into<PathBuf>, gpfs_base: impl Into<PathBuf>) -> Self {
        let srcdir = srcdir.into();
        Self {
            output_dir: None,
            basedir: None,
            template: srcdir.join(DEFAULT_TEMPLATE),
            srcdir,
            gpfs_base: gpfs_base.into(),
            daytag: "240101".into(),
            out_prefix: DEFAULT_OUT_PREFIX.into(),
            input: InputSource::Catalog("production=P17id".into()),
            simulate: false,
            xml_name: None,
            git_timeout: Duration::from_secs(DEFAULT_GIT_TIMEOUT_SECS),
        }
    }
}
