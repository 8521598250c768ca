//! Cache simulator CLI.
//!
//! This binary is the driving collaborator for the cache model. It performs:
//! 1. **Run:** Build a model from flags and/or a JSON config, replay a hex address sequence, print the report.
//! 2. **Step:** The same replay, printing each outcome with running counters and the address breakdown.
//! 3. **Geometry:** Print the tag/index/offset widths and the binary split of given addresses.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cachesim_core::cache::CacheModel;
use cachesim_core::common::SimError;
use cachesim_core::config::{CacheConfig, MappingPolicy};
use cachesim_core::sim::{Simulator, parse_hex_address};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Cache organization simulator",
    long_about = "Replay a sequence of memory addresses through a direct-mapped, set-associative, or fully associative cache and report hits, misses, and evictions.\n\nExamples:\n  cachesim run --addresses \"11, 11, 11, 12, 13, 15, 21, 29, 56, 57\"\n  cachesim run --mapping set --cache-size 64 --addresses 0,8,10 --step\n  cachesim run --config cache.json --addresses 0,4,8 --json\n  cachesim geometry --memory-size 1024 0x3f 0x200"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an address sequence and print the simulation report.
    Run {
        #[command(flatten)]
        cache: CacheArgs,

        /// Comma-separated hexadecimal addresses (e.g. "11, 12, 0x1f").
        #[arg(short, long)]
        addresses: String,

        /// Print every access as it is simulated.
        #[arg(long)]
        step: bool,

        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the tag/index/offset split for the configured geometry.
    Geometry {
        #[command(flatten)]
        cache: CacheArgs,

        /// Hexadecimal addresses to break down.
        #[arg(value_parser = parse_address)]
        addresses: Vec<u64>,
    },
}

/// Cache parameters. Flags override values loaded from `--config`.
#[derive(Args, Debug)]
struct CacheArgs {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Memory size in bytes.
    #[arg(long)]
    memory_size: Option<u64>,

    /// Cache size in bytes (clamped to the memory size).
    #[arg(long)]
    cache_size: Option<u64>,

    /// Block size in bytes.
    #[arg(long)]
    block_size: Option<u64>,

    /// Lines per set for set-associative mapping.
    #[arg(long)]
    associativity: Option<usize>,

    /// Mapping policy: direct, set, or full.
    #[arg(short, long)]
    mapping: Option<MappingPolicy>,
}

impl CacheArgs {
    fn resolve(&self) -> Result<CacheConfig, SimError> {
        let mut config = match &self.config {
            Some(path) => CacheConfig::from_path(path)?,
            None => CacheConfig::default(),
        };
        if let Some(memory_size) = self.memory_size {
            config.memory_size = memory_size;
        }
        if let Some(cache_size) = self.cache_size {
            config.cache_size = cache_size;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(associativity) = self.associativity {
            config.associativity = associativity;
        }
        if let Some(mapping) = self.mapping {
            config.mapping = mapping;
        }
        Ok(config)
    }
}

fn parse_address(token: &str) -> Result<u64, String> {
    parse_hex_address(token).map_err(|e| e.to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            cache,
            addresses,
            step,
            json,
        } => cmd_run(&cache, &addresses, step, json),
        Commands::Geometry { cache, addresses } => cmd_geometry(&cache, &addresses),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Replays the sequence, halting on the first invalid address, then prints the report.
fn cmd_run(cache: &CacheArgs, addresses: &str, step: bool, json: bool) -> Result<(), SimError> {
    let config = cache.resolve()?;
    let mut sim = Simulator::from_config(&config, addresses)?;

    let model = sim.model();
    let widths = model.field_widths();
    if !json {
        println!(
            "Configuration: {}  memory={}B cache={}B block={}B ways={}",
            config.mapping,
            config.memory_size,
            model.config().cache_size,
            config.block_size,
            config.associativity
        );
        println!(
            "  lines={}  tag={} bits  index={} bits  offset={} bits",
            model.geometry().num_lines(),
            widths.tag_bits,
            widths.index_bits,
            widths.offset_bits
        );
        println!();
    }

    if step {
        while let Some(result) = sim.step() {
            let outcome = result?;
            let stats = sim.model().stats();
            let fields = sim.model().decompose(outcome.address)?;
            let label = outcome.to_string();
            println!(
                "{label:<14} [{fields}]{}  hits={} misses={} evictions={}",
                if outcome.evicted { " (evict)" } else { "" },
                stats.hits,
                stats.misses,
                stats.evictions
            );
        }
        println!();
    } else {
        sim.run()?;
    }

    let report = sim.report();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

/// Prints field widths and the binary breakdown of each address.
fn cmd_geometry(cache: &CacheArgs, addresses: &[u64]) -> Result<(), SimError> {
    let config = cache.resolve()?;
    let model = CacheModel::from_config(&config)?;
    let widths = model.field_widths();

    println!(
        "Tag: {} bits  Index: {} bits  Offset: {} bits  (address width {})",
        widths.tag_bits,
        widths.index_bits,
        widths.offset_bits,
        widths.total()
    );
    for &address in addresses {
        let fields = model.decompose(address)?;
        println!(
            "{address:#x}: tag={} index={} offset={}",
            fields.tag_bin, fields.index_bin, fields.offset_bin
        );
    }
    Ok(())
}
