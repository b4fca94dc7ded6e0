use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kanadia", version, about = "Screen traveller entry records for Kanadia")]
pub struct Cli {
    /// Path to the JSON file of entry records to decide
    pub entries: PathBuf,

    /// Path to the configuration file
    #[arg(short, long, default_value = "kanadia.yaml")]
    pub config: PathBuf,

    /// Path to the watchlist file (overrides config file setting)
    #[arg(short, long)]
    pub watchlist: Option<PathBuf>,

    /// Path to the country table (overrides config file setting)
    #[arg(long)]
    pub countries: Option<PathBuf>,

    /// Measure visa ages against this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Print the matched rule and reason next to each decision
    #[arg(short, long)]
    pub explain: bool,

    /// Print decisions as JSON (overrides config file setting)
    #[arg(long)]
    pub json: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    if !entry_engine::valid_date_format(s) {
        return Err(format!("'{s}' is not a YYYY-MM-DD calendar date"));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())
}
