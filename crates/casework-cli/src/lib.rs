//! Casework CLI
//!
//! Runs the filter, pagination and taxonomy generators from the command line
//! and prints their output as JSON.
//!
//! ```text
//! casework filter --query 'area=planning&q=mill' --search-field reference
//! casework paginate --url '/cases?page=5' --total-pages 10
//! casework taxonomy --taxonomy taxonomy.yaml
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use casework_filter::{
    combine_where_clauses, create_search_where_clause, FieldPath, FilterConfig, FilterGenerator,
    FilterView, WhereClause,
};
use casework_query::{get_pagination_model, PageRequest, QueryParams, RequestContext};
use casework_taxonomy::{reference, Taxonomy};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Listing URL used when `--base-url` is not given
pub const DEFAULT_BASE_URL: &str = "/cases";

/// Page size used when `--page-size` is not given
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query key read as search text when `--search` is not given
pub const SEARCH_KEY: &str = "q";

/// Command-line definition
#[must_use]
pub fn command() -> Command {
    Command::new("casework")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Casework listing filters, pagination and taxonomy")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Write logs to stderr as JSON lines"),
        )
        .subcommand(
            Command::new("filter")
                .about("Build the where-clause and filter panel for a query")
                .arg(
                    Arg::new("query")
                        .long("query")
                        .default_value("")
                        .help("Request query string, e.g. 'area=planning&type=planning-appeals'"),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .default_value(DEFAULT_BASE_URL)
                        .help("Listing URL that tag removal links point at"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Filter configuration (.toml, .yaml or .yml)"),
                )
                .arg(taxonomy_arg())
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Free-text search; defaults to the 'q' query value"),
                )
                .arg(
                    Arg::new("search-field")
                        .long("search-field")
                        .action(ArgAction::Append)
                        .value_parser(|raw: &str| raw.parse::<FieldPath>())
                        .help("Field searched by the free text (repeatable), e.g. 'Applicant.name'"),
                ),
        )
        .subcommand(
            Command::new("paginate")
                .about("Build the pagination model for a listing URL")
                .arg(
                    Arg::new("url")
                        .long("url")
                        .required(true)
                        .help("Request path and query, e.g. '/cases?area=planning&page=3'"),
                )
                .arg(
                    Arg::new("total-pages")
                        .long("total-pages")
                        .value_parser(value_parser!(u32))
                        .required_unless_present("total-items")
                        .conflicts_with("total-items")
                        .help("Number of pages in the listing"),
                )
                .arg(
                    Arg::new("total-items")
                        .long("total-items")
                        .value_parser(value_parser!(u64))
                        .help("Number of records; pages are derived from --page-size"),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .default_value("20")
                        .value_parser(value_parser!(u32))
                        .help("Records per page"),
                )
                .arg(
                    Arg::new("current-page")
                        .long("current-page")
                        .value_parser(value_parser!(u32))
                        .help("Page being shown; defaults to the 'page' query value"),
                ),
        )
        .subcommand(
            Command::new("taxonomy")
                .about("Validate and print a taxonomy table")
                .arg(taxonomy_arg()),
        )
}

fn taxonomy_arg() -> Arg {
    Arg::new("taxonomy")
        .long("taxonomy")
        .value_parser(value_parser!(PathBuf))
        .help("Taxonomy table (.yaml, .yml or .json); defaults to the built-in reference table")
}

/// Install the stderr tracing subscriber
///
/// Honours `RUST_LOG`, defaulting to `warn`.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(anyhow::Error::msg)
}

/// Run the selected subcommand and return its JSON output
///
/// # Errors
/// Returns error if an input file cannot be loaded or fails validation
pub fn run(matches: &ArgMatches) -> Result<Value> {
    tracing::debug!(subcommand = matches.subcommand_name(), "running");
    match matches.subcommand() {
        Some(("filter", args)) => filter(args),
        Some(("paginate", args)) => paginate(args),
        Some(("taxonomy", args)) => with_taxonomy(args, |taxonomy| {
            serde_json::to_value(taxonomy).context("serializing taxonomy")
        }),
        Some((other, _)) => anyhow::bail!("unknown subcommand '{other}'"),
        None => anyhow::bail!("no subcommand given"),
    }
}

#[derive(Serialize)]
struct FilterOutput {
    #[serde(rename = "where")]
    where_clause: Option<WhereClause>,
    filters: FilterView,
}

fn filter(args: &ArgMatches) -> Result<Value> {
    let raw = args.get_one::<String>("query").map_or("", String::as_str);
    let query = QueryParams::parse(raw.trim_start_matches('?'));
    let base_url = args
        .get_one::<String>("base-url")
        .map_or(DEFAULT_BASE_URL, String::as_str);

    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => FilterConfig::load(path)
            .with_context(|| format!("loading filter config {}", path.display()))?,
        None => FilterConfig::default(),
    };

    let search_fields: Vec<FieldPath> = args
        .get_many::<FieldPath>("search-field")
        .map(|fields| fields.cloned().collect())
        .unwrap_or_default();
    let search_text = args
        .get_one::<String>("search")
        .map(String::as_str)
        .or_else(|| query.first(SEARCH_KEY))
        .unwrap_or("");

    with_taxonomy(args, |taxonomy| {
        let generator = FilterGenerator::new(taxonomy, config)?;
        let output = FilterOutput {
            where_clause: combine_where_clauses([
                generator.create_filter_where_clause(&query),
                create_search_where_clause(search_text, &search_fields),
            ]),
            filters: generator.generate_filters(&query, base_url),
        };
        serde_json::to_value(output).context("serializing filter output")
    })
}

fn paginate(args: &ArgMatches) -> Result<Value> {
    let url = args
        .get_one::<String>("url")
        .context("--url is required")?;
    let request = RequestContext::from_url(url);

    let page_size = args
        .get_one::<u32>("page-size")
        .copied()
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let page = PageRequest::from_query(&request.query, page_size).context("reading page number")?;

    let total_pages = match (
        args.get_one::<u32>("total-pages"),
        args.get_one::<u64>("total-items"),
    ) {
        (Some(&pages), _) => pages,
        (None, Some(&items)) => page.total_pages(items),
        (None, None) => anyhow::bail!("one of --total-pages or --total-items is required"),
    };
    let current_page = args
        .get_one::<u32>("current-page")
        .copied()
        .unwrap_or_else(|| page.clamped(total_pages).page());

    let model = get_pagination_model(&request, total_pages, current_page);
    serde_json::to_value(model).context("serializing pagination model")
}

fn with_taxonomy<T>(args: &ArgMatches, f: impl FnOnce(&Taxonomy) -> Result<T>) -> Result<T> {
    match args.get_one::<PathBuf>("taxonomy") {
        Some(path) => {
            let taxonomy = Taxonomy::from_path(path)
                .with_context(|| format!("loading taxonomy {}", path.display()))?;
            f(&taxonomy)
        }
        None => f(reference().context("loading reference taxonomy")?),
    }
}
