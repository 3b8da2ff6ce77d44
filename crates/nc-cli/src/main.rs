//! CLI frontend for the Nocturne character engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nocturne",
    about = "Nocturne: character generation and trait costs for World of Darkness games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log generation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate characters and print their sheets
    Generate {
        /// Character class (vampire, werewolf, mage, hunter, ghoul, mortal); rolled when omitted
        #[arg(short, long)]
        class: Option<String>,

        /// Experience level: new, intermediate, advanced, elite
        #[arg(short, long, default_value = "new")]
        level: String,

        /// Ability focus: jack-of-all-trades, balanced, specialist; random when omitted
        #[arg(short, long)]
        focus: Option<String>,

        /// Game version: v4 or v5
        #[arg(long, default_value = "v5")]
        game_version: String,

        /// RNG seed for reproducible characters
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of characters to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Catalog JSON file (default: built-in sample catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show upgrade costs and downgrade refunds for a trait
    Costs {
        /// Trait name (case-insensitive)
        name: String,

        /// Current rating
        #[arg(short = 'r', long, default_value = "0")]
        value: u32,

        /// Catalog JSON file (default: built-in sample catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show the class percentile table
    Classes {
        /// Upper bound of the Mortal bucket
        #[arg(short, long, default_value = "59")]
        mortal: u32,
    },

    /// Print the built-in sample catalog as JSON
    Catalog {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            class,
            level,
            focus,
            game_version,
            seed,
            count,
            catalog,
            json,
        } => {
            let args = commands::generate::Args {
                class: class.as_deref(),
                level: &level,
                focus: focus.as_deref(),
                game_version: &game_version,
                seed,
                count,
                catalog: catalog.as_deref(),
                json,
            };
            commands::generate::run(args).await
        }
        Commands::Costs {
            name,
            value,
            catalog,
        } => commands::costs::run(&name, value, catalog.as_deref()),
        Commands::Classes { mortal } => commands::classes::run(mortal),
        Commands::Catalog { output } => commands::catalog::run(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
