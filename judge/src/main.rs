use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use judge::{load_game_config, play_game, Config, GameResult, Player, PlayerConfig, Recorder};
use perdurak::{DeckVariant, GameConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// 36 cards, six to ace
    Short,
    /// 52 cards, two to ace
    Full,
}

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players, one per seat
    #[clap(num_args(2..=6), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON file with game rules. Other options override it.
    #[arg(short, long)]
    game_config: Option<PathBuf>,

    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Number of cards each hand is filled up to
    #[arg(long)]
    hand_size: Option<usize>,

    /// Play without passing the attack on
    #[arg(long, default_value_t = false)]
    no_switch: bool,

    /// Illegal moves a player may make per game before forfeiting it
    #[arg(long, default_value_t = 0)]
    max_illegal_moves: usize,

    /// Stop the tournament as soon as one player forfeits a game
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the game's interactions as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Score {
    wins: usize,
    durak: usize,
    draws: usize,
    forfeits: usize,
}

fn game_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut config = match &args.game_config {
        Some(path) => load_game_config(path)?,
        None => GameConfig::default(),
    };
    config.num_seats = args.player_configs.len();
    if let Some(variant) = args.variant {
        config.variant = match variant {
            Variant::Short => DeckVariant::Short,
            Variant::Full => DeckVariant::Full,
        };
    }
    if let Some(hand_size) = args.hand_size {
        config.hand_size = hand_size;
    }
    if args.no_switch {
        config.allow_switch = false;
    }
    config.validate()?;
    Ok(config)
}

fn print_results(players: &[Player], scores: &[Score], num_games: usize) {
    println!("\nResults after {} games:\n", num_games);
    println!(
        " {:19} | {:>6} | {:>6} | {:>6} | {:>8}",
        "player", "wins", "durak", "draws", "forfeits"
    );
    println!("---------------------|--------|--------|--------|---------");
    for (player, score) in players.iter().zip(scores) {
        println!(
            " {:19} | {:>6} | {:>6} | {:>6} | {:>8}",
            player.name, score.wins, score.durak, score.draws, score.forfeits
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = Config {
        game: game_config(&args)?,
        max_illegal_moves: args.max_illegal_moves,
    };
    debug!(?config, "Game rules");

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;
    let mut players = player_configs
        .iter()
        .map(|player_config| Player::from_config(player_config, &mut rng))
        .collect::<Result<Vec<Player>, anyhow::Error>>()?;

    let mut scores: Vec<Score> = players.iter().map(|_| Score::default()).collect();
    let mut games_played = 0;
    for game_idx in 0..args.num_games {
        games_played += 1;
        match play_game(&config, &mut rng, &mut players, &mut recorder)? {
            GameResult::Finished {
                finish_order,
                durak: Some(durak),
            } => {
                debug!(game_idx, durak = players[durak].name, "Game over");
                scores[durak].durak += 1;
                for player_idx in finish_order {
                    scores[player_idx].wins += 1;
                }
            }
            GameResult::Finished { durak: None, .. } => {
                debug!(game_idx, "Draw");
                for score in &mut scores {
                    score.draws += 1;
                }
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = players[player_idx].name,
                    game_idx, "Illegal move by player"
                );
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                scores[player_idx].forfeits += 1;
                if args.stop_on_illegal_move {
                    break;
                }
            }
        }
    }

    for player in &mut players {
        player.bye()?;
    }

    print_results(&players, &scores, games_played);

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
