//! Battle balance simulator CLI.
//!
//! Run Monte Carlo battles to analyze XP pacing and the gem economy.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: 1000 battles, 25% PvP
//!   cargo run --bin simulate -- -n 200 --pvp 0  # 200 AI battles
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use creature_battle::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CREATURE BATTLE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Battles:        {}", config.num_battles);
    println!("  Roster Size:    {}", config.roster_size);
    println!("  PvP Share:      {}%", config.pvp_percent);
    println!("  Trainer Level:  {}", config.trainer_level);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "battle_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--battles" => {
                if i + 1 < args.len() {
                    config.num_battles = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-r" | "--roster" => {
                if i + 1 < args.len() {
                    config.roster_size = args[i + 1].parse().unwrap_or(12);
                    i += 1;
                }
            }
            "--pvp" => {
                if i + 1 < args.len() {
                    if let Ok(pct) = args[i + 1].parse::<u32>() {
                        config.pvp_percent = pct.min(100);
                        i += 1;
                    }
                }
            }
            "-t" | "--trainer-level" => {
                if i + 1 < args.len() {
                    config.trainer_level = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Creature Battle Simulator\n");
    println!("Usage: simulate [OPTIONS]\n");
    println!("Options:");
    println!("  -n, --battles <N>        Number of battles (default: 1000)");
    println!("  -s, --seed <SEED>        Random seed for reproducibility");
    println!("  -r, --roster <N>         Roster size (default: 12)");
    println!("      --pvp <PCT>          Share of PvP battles, 0-100 (default: 25)");
    println!("  -t, --trainer-level <L>  Trainer level for gem rewards (default: 1)");
    println!("  -v, --verbose            Print every battle");
    println!("      --json               Also write a JSON report");
    println!("  -h, --help               Show this help message");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=creature_battle=debug) for engine logs.");
}
