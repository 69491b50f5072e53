//! Command-line interface for the Uniswap v3 subgraph client.
//!
//! # Usage
//!
//! ```bash
//! # List the entities the client knows about
//! unigraph entities
//!
//! # Show the paths a wildcard selection expands to
//! unigraph fields pool --exclude token0.symbol
//!
//! # Print a query without sending it
//! unigraph get pool 0x8ad5... --include id,feeTier,token0.symbol --dry-run
//!
//! # Run a list query against an endpoint
//! UNIGRAPH_ENDPOINT=https://... unigraph list swap --first 5 --order-by timestamp --order-dir desc
//! ```

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::error::Error;
use std::time::Duration;
use tracing::debug;
use unigraph_query::{Expansion, FieldPath, QueryBuilder, QueryDocument, RequestOptions};
use unigraph_schema::Catalog;
use unigraph_sdk::{ClientConfig, UnigraphClient};

#[derive(Parser, Debug)]
#[command(name = "unigraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subgraph endpoint URL
    #[arg(long, env = "UNIGRAPH_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// API key sent as a bearer token
    #[arg(long, env = "UNIGRAPH_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Field selection shared by `get` and `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Fields to include, comma separated (`*`, `id`, `token0.symbol`)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Fields to drop from a wildcard selection, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Query state as of this block number
    #[arg(long)]
    pub block: Option<u64>,
}

impl SelectionArgs {
    fn options(&self) -> RequestOptions {
        let mut options = RequestOptions::new()
            .include(self.include.iter().cloned())
            .exclude(self.exclude.iter().cloned());
        options.block = self.block;
        options
    }
}

/// Paging and ordering for `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Number of results (at most 1000)
    #[arg(long)]
    pub first: Option<u32>,

    /// Number of results to skip
    #[arg(long)]
    pub skip: Option<u32>,

    /// Field to order by
    #[arg(long)]
    pub order_by: Option<String>,

    /// Order direction
    #[arg(long, value_parser = ["asc", "desc"])]
    pub order_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known entities
    Entities,

    /// Print the field paths a wildcard selection resolves to
    Fields {
        entity: String,

        /// Paths to leave out, comma separated
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Only select `ref.id` for reference fields
        #[arg(long)]
        shallow: bool,
    },

    /// Fetch a single entity by id
    Get {
        entity: String,
        id: String,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the query and variables instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// List entities
    List {
        entity: String,

        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        page: PageArgs,

        /// Print the query and variables instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show version information
    Version,
}

/// Runs the CLI with parsed arguments.
pub async fn run(cli: Cli) -> Result<i32, Box<dyn Error>> {
    let builder = QueryBuilder::new(Catalog::uniswap_v3());

    match &cli.command {
        Commands::Entities => {
            list_entities(builder.catalog());
            Ok(0)
        }
        Commands::Fields {
            entity,
            exclude,
            shallow,
        } => {
            let exclude = exclude
                .iter()
                .map(|raw| FieldPath::parse(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let expansion = if *shallow {
                Expansion::Shallow
            } else {
                Expansion::OneHop
            };
            for path in builder.resolve(entity, &exclude, expansion)? {
                println!("{path}");
            }
            Ok(0)
        }
        Commands::Get {
            entity,
            id,
            selection,
            dry_run,
        } => {
            let document = builder.by_id(entity, id, &selection.options())?;
            dispatch(&cli, &document, *dry_run).await
        }
        Commands::List {
            entity,
            selection,
            page,
            dry_run,
        } => {
            let document = builder.list(entity, &list_options(selection, page))?;
            dispatch(&cli, &document, *dry_run).await
        }
        Commands::Version => {
            println!("unigraph {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

fn list_options(selection: &SelectionArgs, page: &PageArgs) -> RequestOptions {
    let mut options = selection.options();
    options.first = page.first;
    options.skip = page.skip;
    options.order_by = page.order_by.clone();
    options.order_dir = page.order_dir.clone();
    options
}

fn list_entities(catalog: &Catalog) {
    for entity in catalog.entities() {
        let references: Vec<String> = entity
            .references()
            .iter()
            .map(|(field, target)| format!("{field} -> {target}"))
            .collect();
        println!(
            "{:<18} {:>3} fields  {}",
            entity.name().green(),
            entity.direct_fields().len(),
            references.join(", ").dimmed()
        );
    }
}

/// Renders a document as query text followed by its variables.
pub fn render_document(document: &QueryDocument) -> Result<String, serde_json::Error> {
    let variables = serde_json::to_string_pretty(&document.variables)?;
    Ok(format!("{}\n\n# variables\n{variables}", document.query))
}

async fn dispatch(cli: &Cli, document: &QueryDocument, dry_run: bool) -> Result<i32, Box<dyn Error>> {
    if dry_run {
        println!("{}", render_document(document)?);
        return Ok(0);
    }

    let client = connect(cli)?;
    if !cli.quiet {
        eprintln!("{} {}", "Querying".blue(), document.operation_name);
    }
    debug!(query = %document.query, "sending query");

    let data = client.execute_raw(document).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(0)
}

fn connect(cli: &Cli) -> Result<UnigraphClient, Box<dyn Error>> {
    let endpoint = cli
        .endpoint
        .as_deref()
        .ok_or("no endpoint configured; pass --endpoint or set UNIGRAPH_ENDPOINT")?;

    let mut config = ClientConfig::new(endpoint).timeout(Duration::from_secs(cli.timeout));
    if let Some(key) = &cli.api_key {
        config = config.api_key(key.as_str());
    }
    Ok(UnigraphClient::with_config(config)?)
}
