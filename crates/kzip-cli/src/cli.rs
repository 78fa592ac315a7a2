//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kzipinfo")]
#[command(author, version, long_about = None)]
#[command(about = "Inspect KZIP archives and verify the checksums of every file")]
pub struct Cli {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show TOC offsets, raw length fields and layout issues
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the report; only errors and the exit status remain
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Exit with a failure status when any checksum does not match
    #[arg(long)]
    pub strict: bool,

    /// Print timestamps in UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Refuse archives larger than this many bytes (K, M, G, T suffixes)
    #[arg(long, value_name = "BYTES", value_parser = parse_byte_size)]
    pub max_size: Option<u64>,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
