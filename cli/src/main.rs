use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;
use voxsweep_core::*;

use player::{AutoPlayer, Move};

mod player;

#[derive(Parser, Debug)]
#[command(version, about = "Plays headless 3D minesweeper sessions", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many sessions to play
    #[arg(short, long, default_value_t = 10)]
    games: u32,

    /// Difficulty preset to start from, wraps around
    #[arg(short, long, default_value_t = 0)]
    difficulty: usize,

    /// Switch to the next difficulty after every session
    #[arg(long)]
    cycle: bool,

    /// Wait the settle delay before each restart, like the headset does
    #[arg(long)]
    settle: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Debug, Serialize)]
struct SessionRecord {
    config: GameConfig,
    outcome: RevealOutcome,
    moves: u32,
    flags: u32,
    revealed: CellCount,
}

#[derive(Clone, Debug, Serialize)]
struct Summary {
    seed: u64,
    won: u32,
    lost: u32,
    sessions: Vec<SessionRecord>,
}

fn init_logging(level: log::LevelFilter) -> Result<()> {
    use tracing_subscriber::filter::LevelFilter;

    let level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Error initializing logger: {err}"))
}

fn play_session<G: MineGenerator>(
    game: &mut GameController<G>,
    player: &mut AutoPlayer,
) -> Result<SessionRecord> {
    let mut moves = 0;
    let mut flags = 0;

    loop {
        let Some(next) = player.next_move(game) else {
            bail!("No move left on an unfinished board");
        };
        moves += 1;

        match next {
            Move::Reveal(coords) => {
                let report = game.reveal(coords)?;
                log::trace!("Reveal {:?}: {:?}", coords, report.outcome);
                if report.outcome.is_terminal() {
                    return Ok(SessionRecord {
                        config: game.difficulty(),
                        outcome: report.outcome,
                        moves,
                        flags,
                        revealed: game.grid().revealed_count(),
                    });
                }
            }
            Move::Flag(coords) => {
                if game.toggle_flag(coords).changed {
                    flags += 1;
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut game = GameController::with_difficulty(RandomMineGenerator::new(seed), args.difficulty);
    let mut player = AutoPlayer::new(seed.wrapping_add(1));
    let mut sessions = Vec::new();

    for index in 0..args.games {
        let record = play_session(&mut game, &mut player)?;
        log::info!(
            "Session {}: {:?} on {}³ with {} mines after {} moves",
            index,
            record.outcome,
            record.config.grid_size,
            record.config.mines,
            record.moves
        );
        sessions.push(record);

        if args.settle {
            std::thread::sleep(SETTLE_DELAY);
        }
        if args.cycle {
            game.change_difficulty();
        } else {
            game.restart();
        }
    }

    let won = sessions
        .iter()
        .filter(|record| record.outcome == RevealOutcome::Won)
        .count() as u32;
    let summary = Summary {
        seed,
        won,
        lost: sessions.len() as u32 - won,
        sessions,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("seed {}: won {}, lost {}", summary.seed, summary.won, summary.lost);
        for (index, record) in summary.sessions.iter().enumerate() {
            println!(
                "{:>4}  {}³/{:<3} {:<5} moves {:>3} flags {:>3} revealed {:>3}",
                index,
                record.config.grid_size,
                record.config.mines,
                format!("{:?}", record.outcome),
                record.moves,
                record.flags,
                record.revealed
            );
        }
    }

    Ok(())
}
