//! Builds a synthetic deposit pool and prints the score table of an output.
//!
//! ```bash
//! cargo run --example score_table -- --deposits 5000 --output 2500 --target 40
//! ```

use clap::Parser;
use wormhole_privacy::{DepositPoolStats, ScoreParams, CHAIN_UNIT, DEFAULT_DIST_FRACTIONS};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print privacy scores for a wormhole output")]
struct Cli {
    /// Number of deposits in the synthetic pool.
    #[arg(long, default_value_t = 5000)]
    deposits: u64,

    /// Smallest deposit, in chain units.
    #[arg(long, default_value_t = 1)]
    min: u64,

    /// Largest deposit, in chain units.
    #[arg(long, default_value_t = 1000)]
    max: u64,

    /// Output amount, in chain units.
    #[arg(long, default_value_t = 2500.0)]
    output: f64,

    /// Redemption fee in basis points.
    #[arg(long, default_value_t = 10)]
    fee_bps: u32,

    /// Largest number of deposits combined into one output.
    #[arg(long, default_value_t = 100)]
    k_max: u64,

    /// Target score for calibration, in bits.
    #[arg(long)]
    target: Option<f64>,

    /// Print the pool snapshot as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Warn
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    if args.max <= args.min || args.deposits == 0 {
        color_eyre::eyre::bail!("need --deposits > 0 and --max > --min");
    }

    let mut pool = DepositPoolStats::new();
    let span = (args.max - args.min) * CHAIN_UNIT;
    for i in 0..args.deposits {
        pool.add_deposit(args.min * CHAIN_UNIT + span / args.deposits * i);
    }
    println!(
        "pool: {} deposits in [{}, {}) units over {} buckets",
        args.deposits,
        args.min,
        args.max,
        pool.num_buckets()
    );

    let output = args.output * CHAIN_UNIT as f64;
    let params = ScoreParams::new(args.fee_bps, 1, args.k_max);

    println!("output = {} units", args.output);
    for row in pool.privacy_score_table(output, &params, &DEFAULT_DIST_FRACTIONS) {
        println!("- {}", row);
    }

    if let Some(target) = args.target {
        match pool.find_min_dist(output, &params, target, wormhole_privacy::DEFAULT_MAX_DIST_FRACTION) {
            Some(dist) => println!(
                "{} bits need dist = {} ({:.4} units)",
                target,
                dist,
                dist as f64 / CHAIN_UNIT as f64
            ),
            None => println!("{} bits are out of reach within the allowed dist", target),
        }
    }

    if args.json {
        println!("{}", pool.to_json()?);
    }

    Ok(())
}
