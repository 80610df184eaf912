use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(author, version, about = "Profile CSV columns: types, extrema, frequencies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Produce a per-column synopsis: inferred type, missing accounting,
    /// extrema, and most frequent values
    Report(ReportArgs),
    /// Infer and print the scalar type of each column
    Types(TypesArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Input CSV/TSV file to profile ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Columns to include (defaults to every column)
    #[arg(short = 'C', long = "columns", action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Maximum frequent values to display per column in table output (0 = all)
    #[arg(long, default_value_t = 10)]
    pub top: usize,
    /// Maximum rows to scan (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Output format for the report
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Input CSV/TSV file to inspect ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Columns to include (defaults to every column)
    #[arg(short = 'C', long = "columns", action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Maximum rows to scan (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DelimiterError {
    #[error("Delimiter cannot be empty")]
    Empty,
    #[error("Delimiter must be a single character")]
    TooLong,
    #[error("Delimiter must be ASCII")]
    NotAscii,
}

pub fn parse_delimiter(value: &str) -> Result<u8, DelimiterError> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars.next().ok_or(DelimiterError::Empty)?;
            if chars.next().is_some() {
                return Err(DelimiterError::TooLong);
            }
            if !first.is_ascii() {
                return Err(DelimiterError::NotAscii);
            }
            Ok(first as u8)
        }
    }
}
