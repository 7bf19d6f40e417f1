//! Command line access to the block query language and the method patcher
//!
//! `bop-worldgen query <spec>` prints the query tree of `spec`.
//! `bop-worldgen patch <input> <output>` patches a BOPC encoded `ChunkProviderGenerate` class.

use std::{fs, path::PathBuf, process};

use bop_worldgen::{
    common::{Config, MissingPatternPolicy, SymbolMode},
    error::BopError,
    WorldgenSetup,
};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[derive(Debug, Parser)]
#[command(name = "bop-worldgen", version, about)]
struct Cli {
    /// Log everything the parser and the patcher do
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parses a block query and prints its tree
    Query {
        spec: String,
        /// Property used by bracket clauses without a property name
        #[arg(long)]
        default_property: Option<String>,
    },
    /// Patches a ChunkProviderGenerate class encoded in the BOPC format
    ///
    /// BOPC is a class container of its own, JVM `.class` files are not accepted.
    Patch {
        /// BOPC encoded class to patch
        input: PathBuf,
        /// Where the patched BOPC class is written
        output: PathBuf,
        /// The class uses the minified names of a production build
        #[arg(long)]
        obfuscated: bool,
        /// Copy the class unmodified if the amplified check is missing
        #[arg(long)]
        pass_through: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(error) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Could not install the logger: {error}");
    }

    process::exit(match run(cli.command) {
        Ok(()) => 0,
        Err(message) => {
            eprintln!("{message}");
            1
        }
    })
}

/// Runs `command`, returning the message to print on failure
fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Query {
            spec,
            default_property,
        } => {
            let mut config = Config::default();
            if let Some(default_property) = default_property {
                config.default_property = default_property;
            }
            let setup = setup(config)?;
            let query = setup
                .parse_query(&spec)
                .map_err(|error| error.format(&spec))?;
            println!("{}", query.display(setup.registry()));
            Ok(())
        }
        Command::Patch {
            input,
            output,
            obfuscated,
            pass_through,
        } => {
            let config = Config::default()
                .with_symbol_mode(SymbolMode::from_host_flag(obfuscated))
                .with_missing_pattern(if pass_through {
                    MissingPatternPolicy::PassThrough
                } else {
                    MissingPatternPolicy::Abort
                });
            let setup = setup(config)?;

            let bytes = fs::read(&input)
                .map_err(|error| format!("Could not read {}: {error}", input.display()))?;
            let (patched, outcome) = setup
                .transformer()
                .patch(&bytes)
                .map_err(|error| BopError::from(error).format(""))?;
            fs::write(&output, patched)
                .map_err(|error| format!("Could not write {}: {error}", output.display()))?;

            println!("{}: {outcome}", input.display());
            Ok(())
        }
    }
}

fn setup(config: Config) -> Result<WorldgenSetup, String> {
    WorldgenSetup::new(config).map_err(|error| error.format(""))
}
