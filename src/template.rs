//! Filling of the job template.
//!
//! The template is plain text containing placeholder tokens such as
//! `__DAYTAG__`. Each token is replaced literally; tokens that do not appear
//! in the template are ignored.

use std::path::Path;

use indexmap::IndexMap;

use crate::STEERING_MACRO;
use crate::config::Config;
use crate::paths::Paths;

/// The compiled runtime directory staged when present in the source tree.
pub const RUNTIME_DIR: &str = ".sl73_gcc485";

/// Indentation of each `<File>` line in the sandbox block.
const SANDBOX_INDENT: &str = "      ";

/// A placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `__BASEDIR__`
    BaseDir,
    /// `__SRCDIR__`
    SrcDir,
    /// `__SUBMISSION_DIR__`
    SubmissionDir,
    /// `__OUTPUT_DIR__`
    OutputDir,
    /// `__GPFS_DEST__`
    GpfsDest,
    /// `__DAYTAG__`
    DayTag,
    /// `__OUTPREFIX__`
    OutPrefix,
    /// `__INPUT__`
    Input,
    /// `__SIMULATE__`
    Simulate,
    /// `__SANDBOX_FILES__`
    SandboxFiles,
}

impl Placeholder {
    /// Gets the token as it appears in the template.
    pub fn token(&self) -> &'static str {
        match self {
            Self::BaseDir => "__BASEDIR__",
            Self::SrcDir => "__SRCDIR__",
            Self::SubmissionDir => "__SUBMISSION_DIR__",
            Self::OutputDir => "__OUTPUT_DIR__",
            Self::GpfsDest => "__GPFS_DEST__",
            Self::DayTag => "__DAYTAG__",
            Self::OutPrefix => "__OUTPREFIX__",
            Self::Input => "__INPUT__",
            Self::Simulate => "__SIMULATE__",
            Self::SandboxFiles => "__SANDBOX_FILES__",
        }
    }
}

/// Placeholder values, applied in insertion order.
pub type Substitutions = IndexMap<Placeholder, String>;

/// Builds the sandbox file block.
///
/// The block always lists `StRoot/` and the steering macro, plus the compiled
/// runtime directory if it exists right now.
pub fn sandbox_files(srcdir: &Path) -> String {
    let mut files = vec![
        format!("{srcdir}/StRoot/", srcdir = srcdir.display()),
        format!("{srcdir}/{STEERING_MACRO}", srcdir = srcdir.display()),
    ];

    let runtime = srcdir.join(RUNTIME_DIR);
    if runtime.is_dir() {
        files.push(runtime.display().to_string());
    }

    files
        .iter()
        .map(|file| format!("{SANDBOX_INDENT}<File>file:{file}</File>"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the substitutions for a run.
pub fn substitutions(config: &Config, paths: &Paths, input_element: &str) -> Substitutions {
    let mut subs = Substitutions::new();
    subs.insert(Placeholder::BaseDir, paths.basedir.clone());
    subs.insert(Placeholder::SrcDir, config.srcdir.display().to_string());
    subs.insert(
        Placeholder::SubmissionDir,
        paths.submission_dir.display().to_string(),
    );
    subs.insert(Placeholder::OutputDir, paths.output_dir.display().to_string());
    subs.insert(Placeholder::GpfsDest, paths.gpfs_dest.display().to_string());
    subs.insert(Placeholder::DayTag, config.daytag.clone());
    subs.insert(Placeholder::OutPrefix, config.out_prefix.clone());
    subs.insert(Placeholder::Input, input_element.to_string());
    subs.insert(Placeholder::Simulate, config.simulate_value().to_string());
    subs.insert(Placeholder::SandboxFiles, sandbox_files(&config.srcdir));
    subs
}

/// Replaces every placeholder in `template` with its value.
pub fn fill(template: &str, subs: &Substitutions) -> String {
    subs.iter()
        .fold(template.to_string(), |text, (placeholder, value)| {
            text.replace(placeholder.token(), value)
        })
}
