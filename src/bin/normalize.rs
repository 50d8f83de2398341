use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Timelike};
use clap::Parser;
use lineup_tool::{
    LineupConfig, TzDatabase, day_schedule_to_json_string, logging, normalize_csv,
    save_day_schedule_to_json, weekday_name,
};
use std::path::PathBuf;
use tracing::info;

/// Convert one day's set-time CSV export into a normalized day schedule.
#[derive(Debug, Parser)]
#[command(name = "normalize", version)]
struct Args {
    /// CSV export of the day's grid
    csv: PathBuf,
    /// Session date, YYYY-MM-DD
    date: NaiveDate,
    /// JSON config with startHour, startMinute, slotMinutes, timezone, ignoredHeaders
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Local time of the first grid row
    #[arg(long, value_name = "HH:MM", value_parser = parse_start)]
    start: Option<NaiveTime>,
    /// Minutes covered by each grid row
    #[arg(long, value_name = "N")]
    slot_minutes: Option<u32>,
    /// IANA zone of the grid's wall clock
    #[arg(long, env = "LINEUP_TIMEZONE")]
    timezone: Option<String>,
    /// Header label that is not a stage (repeatable)
    #[arg(long = "ignore-header", value_name = "LABEL")]
    ignored_headers: Vec<String>,
    /// Day label stored in the output, defaults to the weekday of DATE
    #[arg(long)]
    day: Option<String>,
    /// Write here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Print detected headers, stages and row times to stderr
    #[arg(long)]
    debug: bool,
}

fn parse_start(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|err| format!("expected HH:MM: {err}"))
}

fn load_config(args: &Args) -> Result<LineupConfig> {
    let mut config = match &args.config {
        Some(path) => LineupConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LineupConfig::default(),
    };
    if let Some(start) = args.start {
        config.start_hour = start.hour();
        config.start_minute = start.minute();
    }
    if let Some(slot) = args.slot_minutes {
        config.slot_minutes = slot;
    }
    if let Some(zone) = &args.timezone {
        config.timezone = zone.clone();
    }
    config
        .ignored_headers
        .extend(args.ignored_headers.iter().cloned());
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let config = load_config(&args)?;
    let day = args.day.clone().unwrap_or_else(|| weekday_name(args.date));
    let schedule = normalize_csv(&args.csv, args.date, &day, &config, &TzDatabase)
        .with_context(|| format!("failed to normalize {}", args.csv.display()))?;

    match &args.output {
        Some(path) => {
            save_day_schedule_to_json(&schedule, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                "wrote {} sets for {} to {}",
                schedule.meta.set_count,
                schedule.day,
                path.display()
            );
        }
        None => println!("{}", day_schedule_to_json_string(&schedule)?),
    }
    Ok(())
}
