//! tablekit-demo - render a JSON dataset through the table engine
//!
//! Loads an array of objects, applies sort/filter/page/selection from the
//! command line and prints the resulting text table.

mod paths;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use tablekit::prelude::*;

/// Render a JSON dataset as a paginated text table
#[derive(Parser)]
#[command(name = "tablekit-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON array of objects, each with an `id` field
    #[arg(short, long, default_value = "tablekit-demo/data/people.json")]
    data: PathBuf,
    /// Columns to show, in order (defaults to `id` then every field of the first row)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,
    /// Sort as `key` or `key:desc`
    #[arg(short, long)]
    sort: Option<String>,
    /// Filter as `key=value`; may be repeated
    #[arg(short, long = "filter")]
    filters: Vec<String>,
    /// 1-based page to show
    #[arg(short, long, default_value = "1")]
    page: usize,
    /// Rows per page
    #[arg(long, default_value = "10")]
    page_size: usize,
    /// Viewport width in pixels; below 768 renders mobile cards
    #[arg(short, long, default_value = "1200")]
    width: u32,
    /// Selection mode
    #[arg(long, value_enum, default_value = "multiple")]
    select_mode: SelectMode,
    /// Row ids to select; may be repeated
    #[arg(long = "select")]
    selected: Vec<String>,
    /// Select every selectable row on the shown page
    #[arg(long)]
    select_all: bool,
    /// Log level written to the log file
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum SelectMode {
    None,
    Single,
    Multiple,
}

impl From<SelectMode> for SelectionMode {
    fn from(mode: SelectMode) -> Self {
        match mode {
            SelectMode::None => SelectionMode::None,
            SelectMode::Single => SelectionMode::Single,
            SelectMode::Multiple => SelectionMode::Multiple,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LevelFilter) {
    if let Err(e) = paths::rotate_logs() {
        eprintln!("Failed to rotate logs: {e}");
    }
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {e}", path.display()),
    }
}

fn run(cli: &Cli) -> Result<String, DemoError> {
    let json = std::fs::read_to_string(&cli.data).map_err(|source| DemoError::Read {
        path: cli.data.clone(),
        source,
    })?;
    let records = records_from_json(&json)?;
    info!("Loaded {} records from {}", records.len(), cli.data.display());

    let columns = if cli.columns.is_empty() {
        default_columns(&records)
    } else {
        cli.columns.clone()
    };

    let config = build_config(cli, &records, &columns);
    let viewport = Viewport::new(cli.width);
    let mut table = Table::with_viewport(records, config, &viewport);
    for warning in table.warnings() {
        warn!("{warning}");
    }

    if let Some(sort) = &cli.sort {
        table.set_sort(Some(parse_sort(sort)?));
    }

    for filter in &cli.filters {
        let (key, value) = filter
            .split_once('=')
            .ok_or_else(|| DemoError::Argument(format!("filter '{filter}' is not key=value")))?;
        table.set_filter(key.trim(), value.trim());
    }
    for (key, error) in table.validation_errors() {
        warn!("Filter {key}: {error}");
    }

    if !table.go_to_page(cli.page) && cli.page != table.pagination().page() {
        warn!("Page {} is out of range, showing page {}", cli.page, table.pagination().page());
    }

    for id in &cli.selected {
        table.toggle_row_selection(parse_row_id(id));
    }
    if cli.select_all {
        table.toggle_all_selection();
    }
    debug!("Selected: {:?}", table.selected_ids());

    Ok(render_text(&table.view()))
}

/// `id` followed by the remaining fields of the first record.
fn default_columns(records: &[Record]) -> Vec<String> {
    let mut columns = vec!["id".to_string()];
    if let Some(first) = records.first() {
        columns.extend(first.keys().map(str::to_string));
    }
    columns
}

fn build_config(cli: &Cli, records: &[Record], columns: &[String]) -> TableConfig<Record> {
    let mut builder = TableBuilder::new()
        .enable_sorting()
        .enable_selection(cli.select_mode.into())
        .enable_pagination(PaginationConfig::default().with_page_size(cli.page_size))
        .on_selection_change(|ids| debug!("Selection changed: {} rows", ids.len()));

    for key in columns {
        let sample = records.first().map(|r| r.field(key)).unwrap_or_default();
        let label = title_case(key);
        let numeric = matches!(sample, Value::Number(_));
        builder = builder.add_column_with(key.clone(), label.clone(), |c| {
            let c = c.sortable();
            if numeric { c.align(Alignment::Right) } else { c }
        });
        builder = builder.add_filter(filter_for(key, &label, &sample));
    }

    if let Some(primary) = columns.iter().find(|k| k.as_str() != "id") {
        let mut mobile = MobileConfig::new(primary.clone());
        if let Some(secondary) = columns.iter().filter(|k| k.as_str() != "id").nth(1) {
            mobile = mobile.secondary(secondary.clone());
        }
        builder = builder.configure_mobile(mobile);
    }

    builder.build()
}

fn filter_for(key: &str, label: &str, sample: &Value) -> FilterDef {
    match sample {
        Value::Number(_) => FilterDef::number(key, label),
        Value::Bool(_) => FilterDef::boolean(key, label),
        Value::Date(_) => FilterDef::date(key, label),
        Value::Text(_) | Value::Null => FilterDef::text(key, label),
    }
}

fn parse_sort(arg: &str) -> Result<SortConfig, DemoError> {
    let (key, direction) = match arg.split_once(':') {
        Some((key, "asc")) => (key, Direction::Asc),
        Some((key, "desc")) => (key, Direction::Desc),
        Some((_, other)) => {
            return Err(DemoError::Argument(format!(
                "sort direction must be asc or desc, got '{other}'"
            )));
        }
        None => (arg, Direction::Asc),
    };
    Ok(SortConfig::new(key, direction))
}

fn parse_row_id(s: &str) -> RowId {
    s.parse::<i64>().map(RowId::Number).unwrap_or_else(|_| RowId::from(s))
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
