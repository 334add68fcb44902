// crates/libra-sim/src/main.rs
//
// Binary entrypoint for the Libra protocol simulator.
//
// Initializes tracing, parses CLI arguments, loads configuration, deploys
// a protocol instance backed by in-memory collaborators, and walks it
// through the configured price path one treasury epoch at a time.

mod config;
mod output;
mod scenario;

use clap::Parser;
use config::SimConfig;
use output::{render_reports, OutputFormat};
use scenario::Simulation;

use libra_core::math::format_wad;

/// Libra simulator: drives the treasury, LP pool and boardroom along a price path.
#[derive(Parser, Debug)]
#[command(name = "libra-sim", version = "0.1.0", about = "Libra monetary protocol simulator")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "libra-sim.toml")]
    config: String,

    /// Number of epochs to simulate. Defaults to the length of the price path.
    #[arg(long)]
    epochs: Option<u64>,

    /// Output format for the epoch report.
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Print the final treasury state as JSON after the report.
    #[arg(long)]
    dump_state: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration from TOML file, falling back to defaults if the file
    // is not found.
    let sim_config = match SimConfig::load(&args.config) {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", args.config);
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using defaults.",
                args.config,
                e
            );
            SimConfig::default()
        }
    };

    let epochs = args
        .epochs
        .unwrap_or(sim_config.price_path.len() as u64);
    tracing::info!("Libra simulator v0.1.0");
    tracing::info!("Epochs: {}", epochs);
    tracing::info!("Epoch period: {}s", sim_config.epoch_period);
    tracing::info!("Price ceiling: {}", sim_config.price_ceiling);

    let mut sim = Simulation::deploy(sim_config)?;
    let reports = sim.run(epochs)?;
    println!("{}", render_reports(&reports, args.format));

    let treasury = sim.treasury();
    tracing::info!(
        "Finished at epoch {}: reserve {}, fund received {} LIBRA",
        treasury.current_epoch(),
        format_wad(treasury.get_reserve()),
        format_wad(sim.fund().total_deposited("LIBRA"))
    );

    if args.dump_state {
        println!("{}", treasury.state_json()?);
    }

    Ok(())
}
