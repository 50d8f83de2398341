use anyhow::{Context, Result};
use clap::Parser;
use lineup_tool::{
    DEFAULT_TIMEZONE, ScheduleMerger, load_day_schedule_from_json, logging,
    save_merged_schedule_to_json,
};
use std::path::PathBuf;

/// Merge normalized day schedules into one multi-day lineup document.
#[derive(Debug, Parser)]
#[command(name = "merge-days", version)]
struct Args {
    /// Normalized day schedules, in the order the days should appear
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,
    #[arg(short, long, value_name = "PATH", default_value = "all-days.schedule.json")]
    output: PathBuf,
    /// Zone used for days whose metadata does not name one
    #[arg(long, env = "LINEUP_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let days = args
        .inputs
        .iter()
        .map(|path| {
            load_day_schedule_from_json(path)
                .with_context(|| format!("failed to load {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let merged = ScheduleMerger::new(args.timezone.as_str())
        .merge(&days)
        .context("failed to format set times")?;
    save_merged_schedule_to_json(&merged, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Wrote {}", args.output.display());
    Ok(())
}
