//! combat_sim - Headless runner that plays an encounter through combat_core

mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::{default_encounter, load_encounter, CombatEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::{run_encounter, EncounterSummary, RunOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Play an encounter and print its event stream
#[derive(Parser, Debug)]
#[command(name = "combat_sim", version, about)]
struct Cli {
    /// Encounter TOML file (the bundled training yard when omitted)
    #[arg(short, long, value_name = "FILE")]
    encounter: Option<PathBuf>,

    /// Seconds of simulated time
    #[arg(short, long, default_value_t = 30.0)]
    duration: f64,

    /// Nominal frame length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Relative frame-time jitter, e.g. 0.25 for ±25%
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    /// Seed for the jitter generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Lane units per second enemies walk toward the player
    #[arg(long, default_value_t = 1.0)]
    walk_speed: f64,

    /// Print events and the summary as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !cli.frame_dt.is_finite() || cli.frame_dt <= 0.0 {
        anyhow::bail!("--frame-dt must be a positive number, got {}", cli.frame_dt);
    }

    let encounter = match &cli.encounter {
        Some(path) => load_encounter(path)
            .with_context(|| format!("failed to load encounter {}", path.display()))?,
        None => default_encounter(),
    };
    tracing::info!(
        name = %encounter.name,
        enemies = encounter.enemies.len(),
        seed = cli.seed,
        "starting encounter"
    );

    let options = RunOptions {
        duration: cli.duration,
        frame_dt: cli.frame_dt,
        jitter: cli.jitter,
        walk_speed: cli.walk_speed,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);

    let mut write_error = None;
    let summary = run_encounter(&encounter, &options, &mut rng, |event| {
        if write_error.is_none() {
            if let Err(err) = print_event(event, cli.json) {
                write_error = Some(err);
            }
        }
    });
    if let Some(err) = write_error {
        return Err(err);
    }

    print_summary(&summary, cli.json)
}

/// Log to stderr, `info` unless `RUST_LOG` says otherwise
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_event(event: &CombatEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else {
        println!("{}", event.describe());
    }
    Ok(())
}

fn print_summary(summary: &EncounterSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(40));
    println!("  Encounter summary");
    println!("{}", "=".repeat(40));
    println!("  Time:          {:.2}s ({} frames)", summary.elapsed, summary.frames);
    println!("  Damage dealt:  {} ({:.1} dps, {:.1} per hit)", summary.damage_dealt, summary.dps(), summary.avg_damage());
    println!("  Damage taken:  {}", summary.damage_taken);
    println!("  Kills:         {}", summary.kills);
    println!("  Deaths:        {}", summary.deaths);
    println!("  XP gained:     {}", summary.xp_gained);
    println!("  Final level:   {}", summary.final_level);
    println!("  Final hp:      {}", summary.final_hp);
    match summary.last_kill_time {
        Some(t) => println!("  Last kill at:  {:.2}s", t),
        None => println!("  Last kill at:  -"),
    }
    Ok(())
}
