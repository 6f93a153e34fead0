use minsweeper_core::*;
use proptest::prelude::*;
use proptest::sample::Index;

fn configs() -> impl Strategy<Value = GameConfig> {
    (1u8..=12, 1u8..=12)
        .prop_filter("board needs room for a safe tile", |&(w, h)| w as u16 * h as u16 >= 2)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), 1..(w as u16 * h as u16)))
        .prop_map(|(w, h, mines)| GameConfig::new(w, h, mines).unwrap())
}

fn clicks() -> impl Strategy<Value = Vec<(Index, bool)>> {
    prop::collection::vec((any::<Index>(), any::<bool>()), 0..60)
}

fn neighbors(board: &Board, index: usize) -> impl Iterator<Item = usize> {
    let width = board.width();
    NeighborIter::new(coords_of(index, width), board.config().bounds())
        .map(move |coords| index_of(coords, width))
}

fn state_rank(state: GameState) -> u8 {
    match state {
        GameState::Ready => 0,
        GameState::Playing => 1,
        GameState::Won | GameState::Lost => 2,
    }
}

proptest! {
    #[test]
    fn mines_and_adjacency_match_layout(config in configs(), seed in any::<u64>()) {
        let board = Board::with_seed(config, seed);
        let tiles = board.tiles();

        prop_assert_eq!(tiles.len(), usize::from(config.total_tiles()));
        prop_assert_eq!(tiles.iter().filter(|t| t.is_mine()).count(), usize::from(config.mines()));

        for tile in &tiles {
            let expected = neighbors(&board, tile.index())
                .filter(|&n| tiles[n].is_mine())
                .count();
            prop_assert_eq!(usize::from(tile.adjacent_mines()), expected);
        }
    }

    #[test]
    fn state_only_moves_forward(config in configs(), seed in any::<u64>(), clicks in clicks()) {
        let mut board = Board::with_seed(config, seed);
        let total = usize::from(config.total_tiles());

        for (index, is_primary) in clicks {
            let before = board.clone();
            let outcome = board.on_click(index.index(total), is_primary).unwrap();

            prop_assert!(state_rank(board.state()) >= state_rank(before.state()));
            if before.is_finished() {
                prop_assert_eq!(outcome, ClickOutcome::NoChange);
                prop_assert_eq!(&board, &before);
            }
            if !outcome.has_update() {
                prop_assert_eq!(&board, &before);
            }
            for tile in board.tiles() {
                prop_assert!(!(tile.is_flagged() && tile.is_revealed()));
            }
        }
    }

    #[test]
    fn win_and_loss_are_consistent(config in configs(), seed in any::<u64>(), clicks in clicks()) {
        let mut board = Board::with_seed(config, seed);
        let total = usize::from(config.total_tiles());

        for (index, is_primary) in clicks {
            board.on_click(index.index(total), is_primary).unwrap();
        }

        let tiles = board.tiles();
        let revealed_safe = tiles.iter().filter(|t| t.is_revealed() && !t.is_mine()).count();
        prop_assert_eq!(revealed_safe, usize::from(board.revealed_count()));

        match board.state() {
            GameState::Won => {
                prop_assert_eq!(revealed_safe, usize::from(config.safe_tiles()));
                prop_assert!(tiles.iter().filter(|t| t.is_mine()).all(|t| t.is_flagged()));
            }
            GameState::Lost => {
                let exploded: Vec<_> = tiles.iter().filter(|t| t.is_exploded()).collect();
                prop_assert_eq!(exploded.len(), 1);
                prop_assert!(exploded[0].is_mine());
                prop_assert_eq!(board.triggered_mine(), Some(exploded[0].index()));
            }
            GameState::Ready => {
                prop_assert_eq!(revealed_safe, 0);
                prop_assert!(tiles.iter().all(|t| !t.is_revealed()));
            }
            GameState::Playing => {
                prop_assert!(revealed_safe > 0);
                prop_assert!(revealed_safe < usize::from(config.safe_tiles()));
                prop_assert!(tiles.iter().all(|t| !(t.is_mine() && t.is_revealed())));
            }
        }
    }

    #[test]
    fn cascade_reaches_its_fixed_point(
        config in configs(),
        seed in any::<u64>(),
        flags in prop::collection::vec(any::<Index>(), 0..6),
        start in any::<Index>(),
    ) {
        let mut board = Board::with_seed(config, seed);
        let total = usize::from(config.total_tiles());
        for flag in &flags {
            board.toggle_flag(flag.index(total)).unwrap();
        }
        let flagged_before: Vec<bool> = board.tiles().iter().map(Tile::is_flagged).collect();

        let start = start.index(total);
        let outcome = board.reveal(start).unwrap();
        prop_assume!(matches!(outcome, ClickOutcome::Revealed | ClickOutcome::Won));

        let tiles = board.tiles();
        for tile in &tiles {
            if board.state() != GameState::Won {
                // flags are barriers, never opened
                prop_assert_eq!(tile.is_flagged(), flagged_before[tile.index()]);
            }
            if !tile.is_revealed() {
                continue;
            }
            prop_assert!(!tile.is_mine());
            if tile.adjacent_mines() == 0 {
                for n in neighbors(&board, tile.index()) {
                    prop_assert!(tiles[n].is_revealed() || flagged_before[n]);
                }
            }
            if tile.index() != start {
                let reached = neighbors(&board, tile.index())
                    .any(|n| tiles[n].is_revealed() && tiles[n].adjacent_mines() == 0);
                prop_assert!(reached);
            }
        }
    }
}

#[test]
fn three_by_three_is_won_once_every_safe_tile_is_open() {
    for mine in 0..9 {
        let mut board = Board::from_layout(MineLayout::from_mine_indices(3, 3, &[mine]).unwrap());

        // a cascade may open several tiles at once, later clicks on them are no-ops
        for index in (0..9).filter(|&index| index != mine) {
            board.on_click(index, true).unwrap();
            let expected = if board.revealed_count() < 8 {
                GameState::Playing
            } else {
                GameState::Won
            };
            assert_eq!(board.state(), expected);
        }
        assert_eq!(board.state(), GameState::Won);
    }
}

#[test]
fn center_mine_wins_exactly_on_eighth_reveal() {
    let mut board = Board::from_layout(MineLayout::from_mine_indices(3, 3, &[4]).unwrap());

    for (step, index) in [0, 1, 2, 3, 5, 6, 7, 8].into_iter().enumerate() {
        assert_eq!(board.state(), if step == 0 { GameState::Ready } else { GameState::Playing });
        board.on_click(index, true).unwrap();
    }
    assert_eq!(board.state(), GameState::Won);
}

#[test]
fn loss_freezes_the_board() {
    let mut board = Board::from_layout(MineLayout::from_mine_indices(4, 4, &[5, 10]).unwrap());

    assert_eq!(board.on_click(5, true), Ok(ClickOutcome::HitMine));
    assert_eq!(board.state(), GameState::Lost);
    assert_eq!(board.on_click(0, true), Ok(ClickOutcome::NoChange));
    assert!(!board.tile(0).unwrap().is_revealed());
    assert_eq!(board.state(), GameState::Lost);
}

#[test]
fn construction_and_click_errors() {
    assert!(matches!(Board::new(4, 4, 16), Err(GameError::InvalidConfiguration { .. })));
    assert!(matches!(Board::new(4, 4, 0), Err(GameError::InvalidConfiguration { .. })));

    let mut board = Board::new(4, 4, 3).unwrap();
    assert_eq!(
        board.on_click(16, true),
        Err(GameError::IndexOutOfBounds { index: 16, len: 16 })
    );
    assert_eq!(
        board.on_click(usize::MAX, false),
        Err(GameError::IndexOutOfBounds { index: usize::MAX, len: 16 })
    );
}
