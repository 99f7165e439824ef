//! The `pico-ea-submit` command line tool.

use std::io::IsTerminal;
use std::io::stderr;

use clap::Parser;
use clap_verbosity_flag::Verbosity;
use clap_verbosity_flag::WarnLevel;
use colored::Colorize;
use git_testament::git_testament;
use git_testament::render_testament;
use pico_ea_submit::Args;
use pico_ea_submit::Config;
use pico_ea_submit::generate;

git_testament!(TESTAMENT);

/// Generates STAR scheduler XML files for PicoEASkimmer.
#[derive(Parser)]
#[command(author, version = render_testament!(TESTAMENT), about, long_about = None)]
struct Cli {
    /// The generator arguments.
    #[command(flatten)]
    args: Args,

    /// The logging verbosity.
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// Runs the tool, returning any fatal error.
async fn inner() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .with_ansi(stderr().is_terminal())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_args(cli.args)?;
    let generated = generate(&config).await?;

    println!("Wrote: {}", generated.xml.display());
    println!("Metadata: {}", generated.metadata.display());
    if let Some(snapshot) = &generated.snapshot {
        println!("Steering copied to: {}", snapshot.display());
    }
    println!("Done");

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = inner().await {
        eprintln!(
            "{error}: {e:?}",
            error = if std::io::stderr().is_terminal() {
                "error".red().bold()
            } else {
                "error".normal()
            }
        );
        std::process::exit(1);
    }
}
