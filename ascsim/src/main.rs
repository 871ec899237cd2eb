use anyhow::Result;
use ascsim_core::{Difficulty, FactionId, FeatureSet, GameSession, SimConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod loader;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlayerArg {
    Ai,
    Human,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a scenario JSON file (built-in default if omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Path to a content catalog JSON file (built-in default if omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u32>,

    /// Number of turns to run
    #[arg(short, long, default_value_t = 60)]
    turns: u64,

    /// Use the simplified turn-based ruleset
    #[arg(long)]
    simplified: bool,

    /// Ticks per turn under the elaborated ruleset
    #[arg(long, default_value_t = 1)]
    ticks_per_turn: u32,

    /// Victory-threshold difficulty for the scored side
    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// Which side difficulty scaling applies to (none in pure batch play)
    #[arg(long, value_enum)]
    player: Option<PlayerArg>,

    /// Emit every turn summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let mut scenario = match &args.scenario {
        Some(path) => loader::load_scenario(path)?,
        None => loader::default_scenario(args.seed.unwrap_or(1337), args.turns),
    };
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    scenario.max_turns = scenario.max_turns.min(args.turns);

    let catalogs = match &args.catalog {
        Some(path) => loader::load_catalogs(path)?,
        None => loader::default_catalogs(),
    };

    let config = SimConfig {
        features: if args.simplified {
            FeatureSet::simplified()
        } else {
            FeatureSet::elaborated()
        },
        ticks_per_turn: args.ticks_per_turn,
        difficulty: args.difficulty.into(),
        // Batch runs use the player slot purely for difficulty scaling.
        player: args.player.map(|side| match side {
            PlayerArg::Ai => FactionId::Ai,
            PlayerArg::Human => FactionId::Human,
        }),
        ..Default::default()
    };

    log::info!(
        "starting ascsim: seed {} | {} labs | {} turns",
        scenario.seed,
        scenario.labs.len(),
        scenario.max_turns
    );

    let mut session = GameSession::new(&scenario, catalogs, config)?;
    let summaries = session.run_batch(args.turns);

    for summary in &summaries {
        log::info!(
            "turn {:>3} | fci {:>5.1} | ari {:>5.1} | rsi {:>4.2} | susp {:.2} | auto {:.2}",
            summary.turn,
            summary.snapshot.fci,
            summary.snapshot.ari,
            summary.snapshot.rsi,
            summary.snapshot.suspicion,
            summary.snapshot.autonomy,
        );
        if let Some(event) = &summary.event {
            log::info!("turn {:>3} | event: {}", summary.turn, event.event_id);
        }
        if let Some(news) = &summary.news {
            log::info!("turn {:>3} | news: {news}", summary.turn);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    println!(
        "outcome: {} after {} turns (checksum {:#018x})",
        session.outcome(),
        session.state().turn,
        session.state().checksum()
    );

    Ok(())
}
