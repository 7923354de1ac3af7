//! Full matches driven by scripted players.

use codenames::{
    board::{AgentPlacements, Board, CellIdentity, Coordinate, Team},
    game::{
        runner::{self, Seat},
        Clue, EndStatus, Game, GameConfig,
    },
    player::{ScriptedOperative, ScriptedSpymaster},
    store::{DirectoryStore, GameStore, MemoryStore},
};

/// 3x3 board: red at (0, 0) and (0, 1), blue at (1, 0) and (1, 1), assassin at (2, 2).
/// Red starts.
fn small_game() -> Game {
    let placements = AgentPlacements::new(
        3,
        vec![
            (CellIdentity::Red, vec![Coordinate::new(0, 0), Coordinate::new(0, 1)]),
            (CellIdentity::Blue, vec![Coordinate::new(1, 0), Coordinate::new(1, 1)]),
            (CellIdentity::Assassin, vec![Coordinate::new(2, 2)]),
        ],
        Team::Red,
    )
    .unwrap();
    let words = vec![
        vec!["apple".to_string(), "bank".to_string(), "crane".to_string()],
        vec!["dance".to_string(), "eagle".to_string(), "frost".to_string()],
        vec!["grape".to_string(), "harbor".to_string(), "iron".to_string()],
    ];
    Game::with_board(Board::new(words, placements).unwrap())
}

fn seat(team: Team, clues: Vec<Clue>, guesses: Vec<Option<Coordinate>>) -> Seat {
    Seat::new(
        ScriptedSpymaster::new(team, clues),
        ScriptedOperative::new(team, guesses),
    )
}

#[test]
fn test_blue_finds_all_agents() {
    let mut game = small_game();
    let mut red = seat(
        Team::Red,
        vec![Clue::new("fruit", 1)],
        vec![Some(Coordinate::new(0, 0)), Some(Coordinate::new(1, 0))],
    );
    let mut blue = seat(
        Team::Blue,
        vec![Clue::new("bird", 1)],
        vec![Some(Coordinate::new(1, 1))],
    );

    let winner = runner::play(&mut game, &mut red, &mut blue).unwrap();

    assert_eq!(winner, Team::Blue);
    assert_eq!(game.end_status(), EndStatus::BlueVictory);
    assert_eq!(
        game.board().discovered(),
        &[
            Coordinate::new(0, 0),
            Coordinate::new(1, 0),
            Coordinate::new(1, 1)
        ]
    );
}

#[test]
fn test_own_agents_exhausted_is_own_victory() {
    let mut game = small_game();
    let mut red = seat(
        Team::Red,
        vec![Clue::new("tree", 1)],
        vec![Some(Coordinate::new(0, 0)), Some(Coordinate::new(0, 1))],
    );
    let mut blue = seat(Team::Blue, vec![], vec![]);

    assert_eq!(runner::play(&mut game, &mut red, &mut blue).unwrap(), Team::Red);
    assert_eq!(game.end_status(), EndStatus::RedVictory);
    assert_eq!(game.board().remaining(Team::Red), 0);
    assert_eq!(game.board().remaining(Team::Blue), 2);
}

#[test]
fn test_forfeits_alternate_turns() {
    let mut game = small_game();
    let mut red = seat(
        Team::Red,
        vec![Clue::new("skip", 1), Clue::new("now", 0)],
        vec![None, Some(Coordinate::new(2, 2))],
    );
    let mut blue = seat(Team::Blue, vec![Clue::new("skip", 1)], vec![None]);

    assert_eq!(runner::play(&mut game, &mut red, &mut blue).unwrap(), Team::Blue);
    assert_eq!(game.end_status(), EndStatus::AssassinRevealed);
}

#[test]
fn test_resume_from_directory_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::open(dir.path()).unwrap();

    let mut game = small_game();
    let mut red = seat(
        Team::Red,
        vec![Clue::new("fruit", 1)],
        vec![Some(Coordinate::new(0, 0)), Some(Coordinate::new(2, 0))],
    );
    runner::play_turn(&mut game, &mut red).unwrap();
    assert_eq!(game.current_turn().team(), Team::Blue);
    store.save(game.id(), &game).unwrap();

    let mut resumed = store.get_by_id(game.id()).unwrap();
    assert_eq!(resumed, game);

    let mut red = seat(Team::Red, vec![], vec![]);
    let mut blue = seat(
        Team::Blue,
        vec![Clue::new("water", 2)],
        vec![Some(Coordinate::new(1, 0)), Some(Coordinate::new(1, 1))],
    );
    assert_eq!(
        runner::play(&mut resumed, &mut red, &mut blue).unwrap(),
        Team::Blue
    );
    store.save(resumed.id(), &resumed).unwrap();
    assert_eq!(
        store.get_by_id(game.id()).unwrap().end_status(),
        EndStatus::BlueVictory
    );
}

#[test]
fn test_resume_mid_turn_from_memory_store() {
    let mut store = MemoryStore::new();
    let mut game = small_game();
    game.set_clue(Clue::new("tree", 2)).unwrap();
    game.make_move(Coordinate::new(0, 0)).unwrap();
    store.save(game.id(), &game).unwrap();

    let mut resumed = store.get_by_id(game.id()).unwrap();
    assert_eq!(resumed.current_turn().guesses_made(), 1);

    // Red's spymaster has no clues left: the stored clue must be reused.
    let mut red = seat(Team::Red, vec![], vec![Some(Coordinate::new(0, 1))]);
    let mut blue = seat(Team::Blue, vec![], vec![]);
    assert_eq!(
        runner::play(&mut resumed, &mut red, &mut blue).unwrap(),
        Team::Red
    );
    assert_eq!(resumed.end_status(), EndStatus::RedVictory);
}

#[test]
fn test_random_game_in_memory_store() {
    let pool: Vec<String> = (0..100).map(|i| format!("word{}", i)).collect();
    let config = GameConfig {
        board_side: 5,
        seed: Some(2024),
    };
    let game = Game::new(&pool, &config).unwrap();
    let mut store = MemoryStore::new();
    store.save(game.id(), &game).unwrap();

    let loaded = store.get_by_id(game.id()).unwrap();
    let starting = loaded.board().placements().starting_team();
    assert_eq!(loaded.current_turn().team(), starting);
    assert_eq!(loaded.board().remaining(starting), 9);
    assert_eq!(loaded.board().remaining(starting.opponent()), 8);
    assert!(loaded
        .operative_view()
        .words
        .iter()
        .all(|(_, card)| card.identity() == CellIdentity::Unrevealed));
}
