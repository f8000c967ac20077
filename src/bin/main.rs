//! Surplus CLI - run food-donation reports
//!
//! Usage:
//!   surplus list
//!   surplus fields <report>
//!   surplus sql <report> [--dialect <dialect>]
//!   surplus run <report> [--location ..] [--provider-type ..] [--food-type ..] [--meal-type ..]
//!   surplus schema
//!
//! Examples:
//!   surplus run "Most Common Food Types" --location Austin
//!   surplus run claim-status-share --format json --db ./data/food_wastage.db
//!   surplus sql provider-type-most-food --dialect postgres

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use surplus::config::Settings;
use surplus::report::{
    render, FilterCriteria, MatchMode, OutputFormat, ReportEngine, CATALOG,
};
use surplus::sql::Dialect;
use surplus::store::{schema, DatasetStore};

#[derive(Parser)]
#[command(name = "surplus")]
#[command(about = "Surplus - parameterized reports over a food donation dataset")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $SURPLUS_CONFIG, ./surplus.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all reports with the filters each accepts
    List,

    /// Show the filter fields a report accepts
    Fields {
        /// Report id, alias or key
        report: String,
    },

    /// Print the SQL a report compiles to
    Sql {
        /// Report id, alias or key
        report: String,

        /// SQL dialect to render
        #[arg(short, long, default_value = "sqlite")]
        dialect: DialectArg,

        /// Escape % and _ in filter values
        #[arg(long)]
        escape_wildcards: bool,
    },

    /// Run a report against the dataset
    Run {
        /// Report id, alias or key
        report: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// SQLite dataset (overrides store.path)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output format (overrides output.format)
        #[arg(short, long)]
        format: Option<FormatArg>,

        /// Escape % and _ in filter values
        #[arg(long)]
        escape_wildcards: bool,
    },

    /// Print the DDL of the tables reports read
    Schema,
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Substring of the city / location
    #[arg(long)]
    location: Option<String>,

    /// Substring of the provider type
    #[arg(long)]
    provider_type: Option<String>,

    /// Substring of the food type
    #[arg(long)]
    food_type: Option<String>,

    /// Substring of the meal type
    #[arg(long)]
    meal_type: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria::from_options(
            args.location,
            args.provider_type,
            args.food_type,
            args.meal_type,
        )
    }
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Sqlite,
    Postgres,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Postgres => Dialect::Postgres,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    Table,
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging.level);

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Fields { report } => cmd_fields(&report),
        Commands::Sql {
            report,
            dialect,
            escape_wildcards,
        } => cmd_sql(&settings, &report, dialect.into(), escape_wildcards),
        Commands::Run {
            report,
            filters,
            db,
            format,
            escape_wildcards,
        } => cmd_run(
            &settings,
            &report,
            filters.into(),
            db,
            format.map(Into::into),
            escape_wildcards,
        ),
        Commands::Schema => {
            print!("{}", schema::CREATE_TABLES);
            ExitCode::SUCCESS
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn match_mode(settings: &Settings, escape_wildcards: bool) -> MatchMode {
    if escape_wildcards {
        MatchMode::Escaped
    } else {
        settings.match_mode()
    }
}

fn cmd_list() -> ExitCode {
    let width = CATALOG.iter().map(|d| d.key.len()).max().unwrap_or(0);

    println!("Reports:");
    for descriptor in CATALOG.iter() {
        let fields: Vec<_> = descriptor
            .filter_fields()
            .iter()
            .map(|f| f.as_str())
            .collect();
        println!(
            "  {:<width$}  {} [{}]",
            descriptor.key,
            descriptor.id,
            fields.join(", "),
            width = width
        );
    }

    ExitCode::SUCCESS
}

fn cmd_fields(report: &str) -> ExitCode {
    let descriptor = match surplus::report::catalog::lookup(report) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", descriptor.id);
    println!("  {}", descriptor.description);
    if descriptor.filter_fields().is_empty() {
        println!("  (no filters)");
    }
    for field in descriptor.filter_fields() {
        println!("  --{:<14} {}", field.as_str().replace('_', "-"), field.label());
    }

    ExitCode::SUCCESS
}

fn cmd_sql(settings: &Settings, report: &str, dialect: Dialect, escape_wildcards: bool) -> ExitCode {
    // The store is never opened for rendering.
    let engine = ReportEngine::new(DatasetStore::new(&settings.store.path))
        .with_match_mode(match_mode(settings, escape_wildcards));

    match engine.compile(report, &FilterCriteria::new()) {
        Ok(compiled) => {
            println!("-- Surplus Compiled SQL");
            println!("-- Report: {}", compiled.descriptor.id);
            println!("-- Dialect: {:?}", dialect);
            println!("-- Parameters: {}", compiled.placeholder_count());
            println!();
            println!("{}", compiled.sql(dialect));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_run(
    settings: &Settings,
    report: &str,
    criteria: FilterCriteria,
    db: Option<PathBuf>,
    format: Option<OutputFormat>,
    escape_wildcards: bool,
) -> ExitCode {
    let path = match db {
        Some(path) => path,
        None => match settings.store_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let engine = ReportEngine::new(DatasetStore::new(path))
        .with_match_mode(match_mode(settings, escape_wildcards));

    let result = match engine.run_report(report, &criteria) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match render(&result, format.unwrap_or(settings.output.format)) {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering result: {}", e);
            ExitCode::FAILURE
        }
    }
}
