use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use minsweeper_core::*;
use std::io::{self, BufRead, Write};

mod render;

/// Play minesweeper in the terminal.
///
/// Commands, one per line: `r <row> <col>` reveals a tile, `f <row> <col>` toggles a flag,
/// `n` starts a new game and `q` quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Board preset, ignored when a custom size is given
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Custom board width
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom board height
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Seed for a reproducible layout; each new game bumps it by one
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        Ok(match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => GameConfig::new(width, height, mines)?,
            _ => self.difficulty.config(),
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_ascii_whitespace();
    let Some(verb) = parts.next() else {
        bail!("empty command");
    };

    let mut coords = || -> Result<Coord2> {
        let mut next = |name: &str| -> Result<Coord> {
            let part = parts.next().with_context(|| format!("missing {}", name))?;
            part.parse()
                .with_context(|| format!("invalid {} {:?}", name, part))
        };
        Ok((next("row")?, next("column")?))
    };

    let command = match verb {
        "r" | "reveal" => Command::Reveal(coords()?),
        "f" | "flag" => Command::Flag(coords()?),
        "n" | "new" => Command::New,
        "q" | "quit" => Command::Quit,
        other => bail!("unknown command {:?}", other),
    };
    Ok(command)
}

struct Session {
    config: GameConfig,
    seed: Option<u64>,
    board: Board,
}

impl Session {
    fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let board = Self::build(config, seed)?;
        Ok(Self {
            config,
            seed,
            board,
        })
    }

    fn build(config: GameConfig, seed: Option<u64>) -> Result<Board> {
        Ok(match seed {
            Some(seed) => Board::with_seed(config, seed),
            None => Board::new(config.width(), config.height(), config.mines())?,
        })
    }

    fn restart(&mut self) -> Result<()> {
        self.seed = self.seed.map(|seed| seed.wrapping_add(1));
        self.board = Self::build(self.config, self.seed)?;
        log::info!("New game, seed: {:?}", self.seed);
        Ok(())
    }

    fn click(&mut self, (row, col): Coord2, is_primary: bool) -> Result<ClickOutcome> {
        if row >= self.board.height() || col >= self.board.width() {
            bail!(
                "({}, {}) is outside the {}x{} board",
                row,
                col,
                self.board.width(),
                self.board.height()
            );
        }
        let index = index_of((row, col), self.board.width());
        Ok(self.board.on_click(index, is_primary)?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let config = cli.game_config()?;
    log::info!(
        "Starting a {}x{} game with {} mines",
        config.width(),
        config.height(),
        config.mines()
    );
    let mut session = Session::new(config, cli.seed)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("{}", render::render(&session.board));
    write!(stdout, "> ").context("writing prompt")?;
    stdout.flush().context("flushing stdout")?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{:#}", err);
                write!(stdout, "> ").context("writing prompt")?;
                stdout.flush().context("flushing stdout")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let redraw = match command {
            Command::Quit => break,
            Command::New => session.restart().map(|()| true),
            Command::Reveal(coords) => session.click(coords, true).map(ClickOutcome::has_update),
            Command::Flag(coords) => session.click(coords, false).map(ClickOutcome::has_update),
        };

        match redraw {
            Ok(true) => print!("{}", render::render(&session.board)),
            Ok(false) => println!("nothing to do there"),
            Err(err) => println!("{:#}", err),
        }
        match session.board.state() {
            GameState::Won => println!("You won! Type n for a new game or q to quit."),
            GameState::Lost => println!("Boom. Type n for a new game or q to quit."),
            GameState::Ready | GameState::Playing => {}
        }
        write!(stdout, "> ").context("writing prompt")?;
        stdout.flush().context("flushing stdout")?;
    }

    Ok(())
}
