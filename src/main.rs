use clap::{Parser, Subcommand};
use script_hub::commands::*;
use script_hub::core::{error::Result, filter::ScriptFilter, print_error};
use std::env;

#[derive(Parser)]
#[command(name = "script-hub")]
#[command(about = "Browse, search and copy scripts from a public script catalog")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List scripts as numbered cards
    List {
        /// Listing to show
        #[arg(short, long, value_enum, default_value_t = ScriptFilter::All)]
        filter: ScriptFilter,
        /// Page to start from
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search scripts by text
    Search {
        /// Search text (e.g., "infinite yield")
        #[arg(required = true)]
        terms: Vec<String>,
        /// Filter that keys the cached result
        #[arg(short, long, value_enum, default_value_t = ScriptFilter::All)]
        filter: ScriptFilter,
    },
    /// Append the next page to the last listing
    More,
    /// Show a script's source by card number or slug
    Show {
        /// Card number from the last listing, or a script slug
        /// (use "slug:<slug>" for slugs made only of digits)
        target: String,
    },
    /// Copy a script's source to the clipboard
    Copy {
        /// Card number from the last listing, or a script slug
        /// (use "slug:<slug>" for slugs made only of digits)
        target: String,
        /// Print the source instead of using the clipboard
        #[arg(long)]
        print: bool,
    },
    /// Interactive browsing session
    Browse,
    /// Inspect or clear the local caches
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show how much is cached
    Stats,
    /// Remove cached entries (both tiers by default)
    Clear {
        /// Only cached listing responses
        #[arg(long, conflicts_with = "bodies")]
        responses: bool,
        /// Only cached script bodies
        #[arg(long)]
        bodies: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let result = match cli.command {
        Commands::List { filter, page } => execute_list(filter, page),
        Commands::Search { terms, filter } => execute_search(terms, filter),
        Commands::More => execute_more(),
        Commands::Show { target } => execute_show(target),
        Commands::Copy { target, print } => execute_copy(target, print),
        Commands::Browse => execute_browse(),
        Commands::Cache { action } => match action {
            CacheAction::Stats => execute_cache_stats(),
            CacheAction::Clear { responses, bodies } => execute_cache_clear(responses, bodies),
        },
        Commands::Config => execute_config(),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
