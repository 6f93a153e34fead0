use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Playing (first reveal)
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Board built, nothing revealed yet
    Ready,
    /// At least one reveal happened and the game is undecided
    Playing,
    /// Every safe tile is revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// A single game of minesweeper: the grid, the mine layout baked into it, and the game state.
///
/// Mines are placed when the board is built, so the first reveal can hit one. Adjacent mine
/// counts are computed once at that point and never change. Flagging does not start the game,
/// only a reveal moves it out of [`GameState::Ready`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    config: GameConfig,
    tiles: Array2<Tile>,
    state: GameState,
    revealed_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<usize>,
}

impl Board {
    /// Board with a random layout seeded from the thread RNG.
    #[cfg(feature = "std")]
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new(width, height, mines)?;
        Ok(Self::with_seed(config, rand::random()))
    }

    #[cfg(feature = "std")]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty.config(), rand::random())
    }

    /// Reproducible board: the same config and seed always give the same layout.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_layout(RandomLayoutGenerator::new(seed).generate(config))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        let tiles = Array2::from_shape_fn(config.bounds().to_nd_index(), |(row, col)| {
            // shape comes from Coord-sized bounds
            let coords = (row as Coord, col as Coord);
            Tile::new(
                index_of(coords, config.width()),
                layout.contains_mine(coords),
                layout.adjacent_mine_count(coords),
            )
        });

        Self {
            config,
            tiles,
            state: GameState::default(),
            revealed_count: 0,
            flagged_count: 0,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags. Negative when the player placed more flags than there are mines.
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged_count as isize)
    }

    /// Index of the mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<usize> {
        self.triggered_mine
    }

    /// Snapshot of every tile, ordered by index.
    pub fn tiles(&self) -> Vec<Tile> {
        self.tiles.iter().copied().collect()
    }

    pub fn tile(&self, index: usize) -> Result<Tile> {
        let coords = self.config.validate_index(index)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    /// Dispatches a click: primary reveals, secondary toggles a flag.
    pub fn on_click(&mut self, index: usize, is_primary: bool) -> Result<ClickOutcome> {
        if is_primary {
            self.reveal(index)
        } else {
            self.toggle_flag(index)
        }
    }

    pub fn toggle_flag(&mut self, index: usize) -> Result<ClickOutcome> {
        let coords = self.config.validate_index(index)?;
        if self.state.is_finished() {
            return Ok(ClickOutcome::NoChange);
        }

        let tile = &mut self.tiles[coords.to_nd_index()];
        Ok(if tile.is_revealed() {
            ClickOutcome::NoChange
        } else if tile.is_flagged() {
            tile.set_flagged(false);
            self.flagged_count -= 1;
            log::debug!("Unflagged tile {}", index);
            ClickOutcome::Unflagged
        } else {
            tile.set_flagged(true);
            self.flagged_count += 1;
            log::debug!("Flagged tile {}", index);
            ClickOutcome::Flagged
        })
    }

    pub fn reveal(&mut self, index: usize) -> Result<ClickOutcome> {
        let coords = self.config.validate_index(index)?;
        if self.state.is_finished() {
            return Ok(ClickOutcome::NoChange);
        }

        let tile = self.tiles[coords.to_nd_index()];
        if tile.is_revealed() || tile.is_flagged() {
            return Ok(ClickOutcome::NoChange);
        }

        self.mark_started();

        if tile.is_mine() {
            self.tiles[coords.to_nd_index()].explode();
            self.triggered_mine = Some(index);
            log::debug!("Hit mine at tile {}", index);
            self.end_game(false);
            return Ok(ClickOutcome::HitMine);
        }

        self.flood_reveal(coords);

        if self.revealed_count == self.config.safe_tiles() {
            self.end_game(true);
            Ok(ClickOutcome::Won)
        } else {
            Ok(ClickOutcome::Revealed)
        }
    }

    /// Breadth-first reveal from a safe tile. Zero tiles spread to their neighbors, numbered
    /// tiles stop the spread, and flagged tiles are never opened.
    fn flood_reveal(&mut self, start: Coord2) {
        let width = self.config.width();
        let mut visited = BTreeSet::from([index_of(start, width)]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let tile = &mut self.tiles[coords.to_nd_index()];
            if tile.is_revealed() || tile.is_flagged() {
                continue;
            }

            tile.reveal();
            self.revealed_count += 1;
            let adjacent_mines = tile.adjacent_mines();
            log::trace!(
                "Revealed tile {} with {} adjacent mines",
                tile.index(),
                adjacent_mines
            );

            if adjacent_mines == 0 {
                for pos in NeighborIter::new(coords, self.config.bounds()) {
                    let neighbor = self.tiles[pos.to_nd_index()];
                    if neighbor.is_unrevealed()
                        && !neighbor.is_flagged()
                        && visited.insert(neighbor.index())
                    {
                        to_visit.push_back(pos);
                    }
                }
            }
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            log::debug!("Game started");
            self.state = GameState::Playing;
        }
    }

    /// Moves to a terminal state and settles the mines for display: on a win every mine gets a
    /// flag, on a loss every unflagged mine is revealed.
    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("Game ended: {:?}", self.state);

        for tile in self.tiles.iter_mut() {
            if !tile.is_mine() || tile.is_flagged() || tile.is_revealed() {
                continue;
            }
            if won {
                tile.set_flagged(true);
                self.flagged_count += 1;
            } else {
                tile.reveal();
            }
        }
    }
}
