use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod input;
mod output;

use input::{read_config, read_rides, read_rule_table};
use output::fare_to_json;
use transit_fares::prelude::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DefaultAlgorithm {
    /// Cheapest admitted rule per ride
    Basic,
    /// No fallback, only the specialized path prices
    #[value(name = "none")]
    Disabled,
}

#[derive(Parser, Debug)]
#[command(
    name = "fare-calc",
    author,
    version,
    about = "Compute transit fares for an itinerary",
    long_about = "Prices an itinerary with flat route fares and zone tiers for the \
                  configured feeds, falling back to a generic per-ride algorithm.\n\n\
                  Rule tables, configuration and rides are read from JSON files."
)]
struct Args {
    /// Rule table JSON file
    #[arg(short, long)]
    rules: PathBuf,

    /// Itinerary JSON file (list of rides)
    #[arg(short = 'i', long)]
    rides: PathBuf,

    /// Fare configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fare types to compute (e.g. regular, cash-adult, card-child)
    #[arg(short, long = "fare-type", default_value = "regular")]
    fare_types: Vec<FareType>,

    /// Fallback algorithm for non-specialized rides
    #[arg(long, value_enum, default_value_t = DefaultAlgorithm::Basic)]
    default_algorithm: DefaultAlgorithm,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let config = read_config(args.config.as_deref())?;
    let table = read_rule_table(&args.rules, &config.keywords)?;
    let rides = read_rides(&args.rides)?;

    log::info!("Rules: {} ({})", args.rules.display(), table.len());
    log::info!("Rides: {} ({})", args.rides.display(), rides.len());

    let default: Box<dyn FareAlgorithm> = match args.default_algorithm {
        DefaultAlgorithm::Basic => Box::new(BasicFareService),
        DefaultAlgorithm::Disabled => Box::new(NoDefaultFare),
    };
    let currency = config.currency.clone();
    let service = SpecializedFareService::new(config, default);

    match service.calculate(currency, &rides, &table, &args.fare_types) {
        Some(fare) => {
            let value = fare_to_json(&fare, &args.fare_types);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        None => println!("no fare"),
    }

    Ok(())
}
