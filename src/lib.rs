//! Generation of STAR scheduler job files for PicoEASkimmer productions.
//!
//! A run fills the job template with the day-tagged production directories,
//! the input description and the sandbox file list, then writes the XML next
//! to a metadata sidecar recording when and from which commit it was made.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod generate;
pub mod git;
pub mod input;
pub mod metadata;
pub mod paths;
pub mod snapshot;
pub mod template;

pub use config::Args;
pub use config::Config;
pub use generate::Generated;
pub use generate::generate;

/// The steering macro run by every job.
pub const STEERING_MACRO: &str = "runPicoEASkim.C";
