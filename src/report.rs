//! The `report` and `types` commands: materialize columns from the input,
//! run the synopsis core over each selected column, and render the result.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use encoding_rs::Encoding;
use itertools::Itertools;
use log::info;

use crate::{
    cli::{OutputFormat, ReportArgs, TypesArgs},
    column::{classify, is_missing},
    io_utils, printable_delimiter,
    synopsis::{ColumnSynopsis, synopsize},
    table,
};

pub fn execute(args: &ReportArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Profiling '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(delimiter)
    );

    let column_set = materialize_columns(&args.input, delimiter, encoding, args.limit)
        .with_context(|| format!("Reading columns from {:?}", args.input))?;
    let selection = resolve_selection(&column_set.headers, &args.columns)?;

    let ColumnSet { headers, mut columns } = column_set;
    let synopses = selection
        .into_iter()
        .map(|idx| synopsize(&headers[idx], std::mem::take(&mut columns[idx])))
        .collect::<Vec<_>>();

    let rendered = match args.format {
        OutputFormat::Table => render_report(&synopses, args.top),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&synopses)
                .context("Serializing report to JSON")?;
            text.push('\n');
            text
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&synopses).context("Serializing report to YAML")?
        }
    };
    write_output(args.output.as_deref(), &rendered)?;

    info!("Profiled {} column(s)", synopses.len());
    Ok(())
}

pub fn execute_types(args: &TypesArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Inferring column types for '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(delimiter)
    );

    let column_set = materialize_columns(&args.input, delimiter, encoding, args.limit)
        .with_context(|| format!("Reading columns from {:?}", args.input))?;
    let selection = resolve_selection(&column_set.headers, &args.columns)?;

    let rows = selection
        .into_iter()
        .map(|idx| {
            let present = column_set.columns[idx]
                .iter()
                .filter(|value| !is_missing(value.as_deref()))
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>();
            vec![
                column_set.headers[idx].clone(),
                classify(&present).to_string(),
            ]
        })
        .collect::<Vec<_>>();

    let headers = vec!["column".to_string(), "type".to_string()];
    table::print_table(&headers, &rows);
    info!("Inferred types for {} column(s)", rows.len());
    Ok(())
}

/// Headers plus one materialized value vector per column. A record shorter
/// than the header row contributes `None` for its absent trailing fields;
/// fields beyond the header row have no column name and are dropped.
pub struct ColumnSet {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<Option<String>>>,
}

pub fn materialize_columns(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    limit: usize,
) -> Result<ColumnSet> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (row_idx, record) in reader.byte_records().enumerate() {
        if limit > 0 && row_idx >= limit {
            break;
        }
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(decoded.get(idx).cloned());
        }
    }

    Ok(ColumnSet { headers, columns })
}

fn resolve_selection(headers: &[String], requested: &[String]) -> Result<Vec<usize>> {
    if requested.is_empty() {
        return Ok((0..headers.len()).collect());
    }
    requested
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .unique()
        .map(|name| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| anyhow!("Column '{name}' not found in input"))
        })
        .collect()
}

fn render_report(synopses: &[ColumnSynopsis], top: usize) -> String {
    let summary_headers = vec![
        "column".to_string(),
        "type".to_string(),
        "rows".to_string(),
        "missing".to_string(),
        "distinct".to_string(),
        "minimum".to_string(),
        "maximum".to_string(),
    ];
    let summary_rows = synopses.iter().map(summary_row).collect::<Vec<_>>();
    let mut rendered = table::render_table(&summary_headers, &summary_rows);

    let frequency_rows = synopses
        .iter()
        .flat_map(|synopsis| top_value_rows(synopsis, top))
        .collect::<Vec<_>>();
    if !frequency_rows.is_empty() {
        let frequency_headers = vec![
            "column".to_string(),
            "value".to_string(),
            "count".to_string(),
            "percent".to_string(),
        ];
        rendered.push('\n');
        rendered.push_str(&table::render_table(&frequency_headers, &frequency_rows));
    }
    rendered
}

fn summary_row(synopsis: &ColumnSynopsis) -> Vec<String> {
    vec![
        synopsis.name.clone(),
        synopsis.scalar_type.to_string(),
        synopsis.row_count().to_string(),
        synopsis.missing_count().to_string(),
        synopsis.distinct_count().to_string(),
        synopsis.minimum.clone().unwrap_or_default(),
        synopsis.maximum.clone().unwrap_or_default(),
    ]
}

/// Most frequent values for one column, highest count first with ties broken
/// by value, capped at `top` entries (0 = uncapped). Display-only: the
/// synopsis record itself always carries the full counts map.
fn top_value_rows(synopsis: &ColumnSynopsis, top: usize) -> Vec<Vec<String>> {
    let total = synopsis.non_empty_values.len();
    if total == 0 {
        return Vec::new();
    }
    let mut items = synopsis.counts.iter().collect::<Vec<_>>();
    items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    if top > 0 && items.len() > top {
        items.truncate(top);
    }
    items
        .into_iter()
        .map(|(value, count)| {
            let percent = (*count as f64 / total as f64) * 100.0;
            vec![
                synopsis.name.clone(),
                value.clone(),
                count.to_string(),
                format!("{percent:.2}%"),
            ]
        })
        .collect()
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) if !io_utils::is_dash(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Writing report to {path:?}")),
        _ => {
            print!("{rendered}");
            Ok(())
        }
    }
}
