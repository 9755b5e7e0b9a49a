use anyhow::{Context, Result};
use clap::Args;
use sentinel_config::Config;
use sentinel_core::ReportGenerator;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Activity markdown to summarize; reads stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Save the prompt instead of calling the model
    #[arg(long)]
    pub dry_run: bool,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override the configured model (applied while loading configuration)
    #[arg(long)]
    pub model: Option<String>,
}

pub fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let activity = read_activity(args.input.as_deref())?;

    let generator = ReportGenerator::new(&config.llm, &config.report)?;
    let report = generator.generate_daily_report(&activity, args.dry_run)?;

    if args.dry_run {
        println!(
            "{}: prompt written to {}",
            report,
            generator.prompt_path().display()
        );
        return Ok(());
    }

    match args.output {
        Some(path) => {
            write_report(&path, &report)?;
            info!(path = %path.display(), "Report saved");
        }
        None => println!("{}", report),
    }

    Ok(())
}

fn read_activity(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read activity file {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read activity from stdin")?;
            Ok(buffer)
        }
    }
}

fn write_report(path: &Path, report: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, report).with_context(|| format!("Failed to write report to {}", path.display()))
}
