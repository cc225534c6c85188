//! Headless Duel Runner
//!
//! Runs AI vs AI duels and prints the outcome as JSON or text.

use arena_duel::ai::{load_personality, AiPersonality};
use arena_duel::core::error::Result;
use arena_duel::core::types::Vec2;
use arena_duel::duel::{Duel, DuelEvent, DuelOutcome};
use arena_duel::fighter::{load_profile, FighterProfile};
use clap::Parser;

/// Headless Duel Runner - AI vs AI fights for tuning profiles and personalities
#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Run an AI vs AI duel and print the outcome")]
struct Args {
    /// Player fighter profile (loaded from data/profiles/)
    #[arg(long, default_value = "default")]
    player: String,

    /// Opponent fighter profile (loaded from data/profiles/)
    #[arg(long, default_value = "default")]
    opponent: String,

    /// AI personality for both corners (loaded from data/ai_personalities/)
    #[arg(long, default_value = "default")]
    personality: String,

    /// AI personality for the opponent corner only; defaults to --personality
    #[arg(long)]
    opponent_personality: Option<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks before the duel is decided on health
    #[arg(long, default_value_t = 60 * 90)]
    max_ticks: u64,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every duel event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn profile_or_default(name: &str) -> FighterProfile {
    load_profile(name).unwrap_or_else(|e| {
        tracing::warn!(profile = name, error = %e, "failed to load profile, using default");
        FighterProfile::default()
    })
}

fn personality_or_default(name: &str) -> AiPersonality {
    load_personality(name).unwrap_or_else(|e| {
        tracing::warn!(personality = name, error = %e, "failed to load personality, using default");
        AiPersonality::default()
    })
}

fn print_text(outcome: &DuelOutcome) {
    println!("Duel Result");
    println!("===========");
    match outcome.winner {
        Some(side) => println!("Winner: {:?}{}", side, if outcome.knockout { " (KO)" } else { "" }),
        None => println!("Winner: draw"),
    }
    println!("Ticks: {}", outcome.ticks);
    for (label, fighter) in [("Player", &outcome.player), ("Opponent", &outcome.opponent)] {
        println!();
        println!("{} ({})", label, fighter.name);
        println!("  Health: {:.1} ({:.0}%)", fighter.health, fighter.health_pct);
        println!("  Stamina: {:.0}%", fighter.stamina_pct);
        println!("  Final state: {:?}", fighter.state);
        println!(
            "  Hits landed: {}, blocked: {}, parries: {}, evades: {}",
            fighter.stats.hits_landed,
            fighter.stats.hits_blocked,
            fighter.stats.parries,
            fighter.stats.evades
        );
        println!(
            "  Damage dealt: {:.1}, longest combo: {}, knockdowns: {}",
            fighter.stats.damage_dealt, fighter.stats.longest_combo, fighter.stats.knockdowns_scored
        );
    }
    println!();
    println!("Seed: {}", outcome.seed);
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "arena_duel=debug" } else { "arena_duel=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);

    let player = profile_or_default(&args.player);
    let opponent = profile_or_default(&args.opponent);
    let player_personality = personality_or_default(&args.personality);
    let opponent_personality = match &args.opponent_personality {
        Some(name) => personality_or_default(name),
        None => player_personality.clone(),
    };

    let mut duel = Duel::ai_vs_ai(player, player_personality, opponent, opponent_personality, seed);

    while duel.current_tick() < args.max_ticks && !duel.is_over() {
        let events = duel.tick(&[], Vec2::ZERO);
        if args.verbose {
            for event in events.iter().filter(|e| !matches!(e, DuelEvent::StateChanged { .. })) {
                eprintln!("  {}", serde_json::to_string(event)?);
            }
        }
    }

    let outcome = duel.outcome();
    match args.format.as_str() {
        "text" => print_text(&outcome),
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        other => {
            tracing::warn!(format = other, "unknown format, defaulting to json");
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
