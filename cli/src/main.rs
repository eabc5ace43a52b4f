use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use minelog_core::{
    CellCount, Coord, Difficulty, GameConfig, GameSession, HistoryLine, JsonFileStore,
    RandomMineGenerator, RecordId, RecordStore, ReplayView,
};

mod play;
mod render;

/// Minesweeper in the terminal, with a replayable history of every game.
#[derive(Parser, Debug)]
#[command(name = "minelog", version, about)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity,

    /// Game history file, defaults to `minelog/games.json` in the user data directory
    #[arg(long, env = "MINELOG_STORE", global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game
    Play(PlayArgs),
    /// List saved games
    History,
    /// Show the moves of a saved game
    Replay { id: RecordId },
    /// Delete every saved game
    Clear,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::Beginner,
            Preset::Intermediate => Difficulty::Intermediate,
            Preset::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Player name stored with the game
    #[arg(short, long)]
    name: String,

    #[arg(short, long, value_enum, conflicts_with = "width")]
    difficulty: Option<Preset>,

    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Seed for the mine layout, random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl PlayArgs {
    fn config(&self) -> Result<GameConfig> {
        match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => GameConfig::new(width, height, mines)
                .with_context(|| format!("Invalid board {}x{} with {} mines", width, height, mines)),
            _ => Ok(GameConfig::preset(
                self.difficulty.unwrap_or(Preset::Beginner).into(),
            )),
        }
    }
}

fn init_logging(verbosity: &Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbosity.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn store_path(cli_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path);
    }
    let data_dir = dirs::data_dir().context("Could not determine the user data directory")?;
    Ok(data_dir.join("minelog").join("games.json"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbosity);

    let path = store_path(cli.store)?;
    log::debug!("Using game history at {}", path.display());
    let mut store = JsonFileStore::new(path);

    match cli.command {
        Command::Play(args) => {
            let config = args.config()?;
            let generator = args
                .seed
                .map(RandomMineGenerator::new)
                .unwrap_or_else(RandomMineGenerator::from_entropy);
            log::info!("Mine layout seed: {}", generator.seed());

            let session = GameSession::start(config, &args.name, generator)
                .context("Could not start the game")?;
            play::run(session, &mut store, &mut io::stdin().lock(), &mut io::stdout())?;
        }
        Command::History => {
            let games = store.list_all().context("Could not load game history")?;
            if games.is_empty() {
                println!("No saved games.");
            }
            for game in &games {
                println!("{}", HistoryLine(game));
            }
        }
        Command::Replay { id } => {
            let game = store
                .get_by_id(id)
                .with_context(|| format!("Could not replay game #{}", id))?;
            print!("{}", ReplayView(&game.record));
        }
        Command::Clear => {
            store.clear_all().context("Could not clear game history")?;
            println!("Game history cleared.");
        }
    }
    Ok(())
}
