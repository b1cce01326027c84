use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ArgAction;
use clap::{Args, Parser, Subcommand, ValueEnum};
use medama_core::{category_for, render_plan, FileRecord, Strategy};
use medama_service::{
    collect_records, load_request, run_request, CollectOptions, OrganizeRequest, Session,
    DEFAULT_PLAN_FILE,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "medama",
    version,
    about = "Group files into categories and export a non-destructive organization plan."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Organize the given files/directories and print (or export) the plan.
    Organize(OrganizeArgs),
    /// List selected files with size and modification time.
    List(ListArgs),
    /// Show the category a file name resolves to under every strategy.
    Categorize(CategorizeArgs),
    /// List the available strategies.
    Strategies,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum CliStrategy {
    #[value(alias = "by-type")]
    Type,
    #[value(alias = "by-date")]
    Date,
    #[value(alias = "by-size")]
    Size,
    #[value(alias = "by-extension", alias = "ext")]
    Extension,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::Type => Strategy::ByType,
            CliStrategy::Date => Strategy::ByDate,
            CliStrategy::Size => Strategy::BySize,
            CliStrategy::Extension => Strategy::ByExtension,
        }
    }
}

#[derive(Debug, Args)]
struct OrganizeArgs {
    /// Files or directories to organize.
    #[arg(long = "paths", value_name = "PATH", num_args = 1.., action = ArgAction::Append)]
    paths: Vec<PathBuf>,

    /// Organizing strategy. Defaults to `type`, or the request file's value.
    #[arg(long)]
    strategy: Option<CliStrategy>,

    /// Descend into subdirectories.
    #[arg(long)]
    recursive: bool,

    /// Maximum traversal depth when recursive (directory children are depth 1).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Exclude glob patterns (repeatable).
    #[arg(long = "exclude", value_name = "GLOB", num_args = 1.., action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Write the text plan. Without a value writes `organization-plan.txt`.
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_PLAN_FILE)]
    output: Option<PathBuf>,

    /// Optional JSON plan output file.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Optional markdown summary output file.
    #[arg(long, value_name = "FILE")]
    md: Option<PathBuf>,

    /// JSON request file; command-line flags override its values.
    #[arg(long, value_name = "FILE")]
    request: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Files or directories to list.
    #[arg(long = "paths", value_name = "PATH", num_args = 1.., action = ArgAction::Append, required = true)]
    paths: Vec<PathBuf>,

    /// Descend into subdirectories.
    #[arg(long)]
    recursive: bool,
}

#[derive(Debug, Args)]
struct CategorizeArgs {
    /// File name, e.g. `photo.JPG`.
    name: String,

    /// Size in bytes used for the size strategy.
    #[arg(long, default_value_t = 0, value_name = "BYTES")]
    size: u64,

    /// RFC 3339 modification time used for the date strategy. Defaults to now.
    #[arg(long, value_name = "RFC3339")]
    modified: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Organize(args) => run_organize_command(args),
        Commands::List(args) => run_list_command(args),
        Commands::Categorize(args) => run_categorize_command(args),
        Commands::Strategies => {
            run_strategies_command();
            Ok(())
        }
    }
}

fn run_organize_command(args: OrganizeArgs) -> Result<()> {
    let mut request = match &args.request {
        Some(path) => load_request(path)?,
        None => OrganizeRequest::default(),
    };
    merge_args(&mut request, args);
    debug!(?request, "resolved organize request");

    let outcome = run_request(&request, Utc::now())?;

    println!("{}", outcome.result.summary_line());
    println!();
    print!("{}", render_plan(&outcome.result));

    for warning in &outcome.warnings {
        println!("Warning: {}", warning);
    }
    for path in &outcome.written {
        println!("Plan written to {}", path.display());
    }
    println!("Read-only: no files were moved or copied.");

    Ok(())
}

fn merge_args(request: &mut OrganizeRequest, args: OrganizeArgs) {
    let OrganizeArgs {
        paths,
        strategy,
        recursive,
        max_depth,
        exclude,
        output,
        json,
        md,
        request: _,
    } = args;

    request.paths.extend(paths);
    if let Some(strategy) = strategy {
        request.strategy = strategy.into();
    }
    request.recursive |= recursive;
    if max_depth.is_some() {
        request.max_depth = max_depth;
    }
    request.excludes.extend(exclude);
    if output.is_some() {
        request.output = output;
    }
    if json.is_some() {
        request.json_output = json;
    }
    if md.is_some() {
        request.markdown_output = md;
    }
}

fn run_list_command(args: ListArgs) -> Result<()> {
    let collected = collect_records(
        &CollectOptions {
            paths: args.paths,
            recursive: args.recursive,
            ..CollectOptions::default()
        },
        Utc::now(),
    );

    let mut session = Session::default();
    session.select_files(collected.records);
    let rows = session.selected_rows();

    if rows.is_empty() {
        println!("No files selected.");
    } else {
        let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(4).max(4);
        println!("{:<width$}  {:>10}  {}", "Name", "Size", "Modified");
        for row in &rows {
            println!("{:<width$}  {:>10}  {}", row.name, row.size, row.modified);
        }
        println!("{} file(s) selected.", rows.len());
    }

    for warning in &collected.warnings {
        println!("Warning: {}", warning);
    }

    Ok(())
}

fn run_categorize_command(args: CategorizeArgs) -> Result<()> {
    let now = Utc::now();
    let modified_at = match &args.modified {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .with_context(|| format!("invalid --modified timestamp '{value}'"))?
            .with_timezone(&Utc),
        None => now,
    };
    let record = FileRecord::new(args.name.clone(), args.name, args.size, modified_at);

    for strategy in Strategy::ALL {
        println!(
            "{:<18} {}",
            strategy.label(),
            category_for(&record, strategy, now)
        );
    }

    Ok(())
}

fn run_strategies_command() {
    for strategy in Strategy::ALL {
        println!("{}: {}", strategy.index(), strategy.label());
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
