pub mod config;
pub mod report;

pub use config::handle_config;
pub use report::{handle_report, ReportArgs};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sentinel")]
#[command(about = "turn project activity into an LLM-written progress report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (.toml, .yml, .yaml or .json)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a progress report from activity markdown
    Report(ReportArgs),
    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_flags() {
        let cli = Cli::try_parse_from([
            "sentinel",
            "report",
            "activity.md",
            "--dry-run",
            "--output",
            "out.md",
            "--model",
            "gpt-4o",
        ])
        .unwrap();

        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert!(args.dry_run);
        assert_eq!(args.input, Some(PathBuf::from("activity.md")));
        assert_eq!(args.output, Some(PathBuf::from("out.md")));
        assert_eq!(args.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sentinel", "config", "--config", "a.toml", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
    }
}
