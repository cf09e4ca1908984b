// src/cli.rs

use clap::{Parser, ValueEnum};
use vanguard_scan_engine::ScanMode;

#[derive(Parser, Debug)]
#[command(name = "vanguard-scan-engine")]
#[command(about = "Runs a web vulnerability assessment against a target you are authorized to test", long_about = None)]
pub struct Cli {
    /// Target URL or host (an https:// scheme is assumed when missing)
    #[arg(long, short, required_unless_present = "list_categories")]
    pub target: Option<String>,

    /// Scan mode (full, selective)
    #[arg(long, short, default_value = "full")]
    pub mode: ScanMode,

    /// Category to check in selective mode; repeat for several
    #[arg(long = "category", short = 'c', value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Confirm that you own the target or have permission to test it
    #[arg(long)]
    pub authorized: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Duration of the simulated probe, in milliseconds
    #[arg(long, env = "VANGUARD_SCAN_DELAY_MS", default_value_t = 3000)]
    pub scan_delay_ms: u64,

    /// Fail the scan if it runs longer than this many milliseconds
    #[arg(long, env = "VANGUARD_SCAN_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Print the categories available for selective scans and exit
    #[arg(long)]
    pub list_categories: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
