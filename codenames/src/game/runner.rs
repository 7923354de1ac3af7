//! Drives a game with a spymaster and an operative for each team.
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    board::Team,
    game::{ClueError, EndStatus, Game, MoveError},
    player::{Operative, PlayerError, Spymaster},
};

/// The two players of one team.
pub struct Seat {
    /// Gives the team's clues.
    pub spymaster: Box<dyn Spymaster>,
    /// Makes the team's guesses.
    pub operative: Box<dyn Operative>,
}

impl Seat {
    /// Seat the given players together.
    pub fn new(spymaster: impl Spymaster + 'static, operative: impl Operative + 'static) -> Self {
        Self {
            spymaster: Box::new(spymaster),
            operative: Box::new(operative),
        }
    }

    /// Check that both players belong to the given team.
    fn check(&self, team: Team) -> Result<(), RunError> {
        for found in [self.spymaster.team(), self.operative.team()].iter().copied() {
            if found != team {
                return Err(RunError::WrongSeat {
                    expected: team,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Error that stops a match.
#[derive(Debug, Error)]
pub enum RunError {
    /// A player failed to produce a move.
    #[error(transparent)]
    Player(#[from] PlayerError),

    /// The spymaster's clue was rejected.
    #[error(transparent)]
    Clue(#[from] ClueError),

    /// The game rejected a move for a reason other than a bad guess.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// A player was seated with the wrong team.
    #[error("a {found:?} player was seated for team {expected:?}")]
    WrongSeat { expected: Team, found: Team },

    /// The game was already finished.
    #[error("the game is already over: {0:?}")]
    AlreadyOver(EndStatus),
}

/// Play the game to the end and return the winning team.
pub fn play(game: &mut Game, red: &mut Seat, blue: &mut Seat) -> Result<Team, RunError> {
    red.check(Team::Red)?;
    blue.check(Team::Blue)?;
    if game.end_status().is_over() {
        return Err(RunError::AlreadyOver(game.end_status()));
    }
    loop {
        let team = game.current_turn().team();
        let seat = match team {
            Team::Red => &mut *red,
            Team::Blue => &mut *blue,
        };
        play_turn(game, seat)?;
        if let Some(winner) = game.end_status().winner(team) {
            info!(id = %game.id(), ?winner, status = ?game.end_status(), "match finished");
            return Ok(winner);
        }
    }
}

/// Play one turn for the team whose turn it is: ask the spymaster for a clue, then let
/// the operative guess until the turn passes, the game ends or the operative gives up.
///
/// If the turn already has a clue, as in a game restored mid-turn, the spymaster is
/// skipped. Rejected guesses are logged and the operative is asked again.
pub fn play_turn(game: &mut Game, seat: &mut Seat) -> Result<(), RunError> {
    if game.current_turn().clue().is_none() {
        seat.spymaster.prefix_turn(game)?;
        let clue = seat.spymaster.offer_clue()?;
        game.set_clue(clue)?;
    }

    seat.operative.prefix_turn(&game.operative_view())?;
    loop {
        let coord = match seat.operative.guess_word(&game.operative_view())? {
            Some(coord) => coord,
            None => {
                info!(id = %game.id(), team = ?game.current_turn().team(), "operative forfeited");
                game.end_turn()?;
                return Ok(());
            }
        };
        match game.make_move(coord) {
            Ok(outcome) if outcome.turn_ended || outcome.end_status.is_over() => return Ok(()),
            Ok(_) => {}
            Err(MoveError::InvalidGuess(err)) => warn!(%err, "guess rejected"),
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        board::{AgentPlacements, Board, CellIdentity, Coordinate},
        game::Clue,
        player::{ScriptedOperative, ScriptedSpymaster},
    };

    /// 3x3 board: red at (0, 0) and (0, 1), blue at (1, 0) and (1, 1), assassin at (2, 2).
    fn small_game(starting_team: Team) -> Game {
        let placements = AgentPlacements::new(
            3,
            vec![
                (CellIdentity::Red, vec![Coordinate::new(0, 0), Coordinate::new(0, 1)]),
                (CellIdentity::Blue, vec![Coordinate::new(1, 0), Coordinate::new(1, 1)]),
                (CellIdentity::Assassin, vec![Coordinate::new(2, 2)]),
            ],
            starting_team,
        )
        .unwrap();
        let words = (0..3)
            .map(|x| (0..3).map(|y| format!("{}{}", x, y)).collect())
            .collect();
        Game::with_board(Board::new(words, placements).unwrap())
    }

    fn seat(team: Team, clues: Vec<Clue>, guesses: Vec<Option<Coordinate>>) -> Seat {
        Seat::new(
            ScriptedSpymaster::new(team, clues),
            ScriptedOperative::new(team, guesses),
        )
    }

    #[test]
    fn test_forfeit_passes_turn() {
        let mut game = small_game(Team::Red);
        let mut red = seat(Team::Red, vec![Clue::new("pass", 1)], vec![None]);

        play_turn(&mut game, &mut red).unwrap();

        assert_eq!(game.current_turn().team(), Team::Blue);
        assert!(game.board().discovered().is_empty());
    }

    #[test]
    fn test_rejected_guess_is_retried() {
        let mut game = small_game(Team::Red);
        let mut red = seat(
            Team::Red,
            vec![Clue::new("retry", 0)],
            vec![Some(Coordinate::new(3, 3)), Some(Coordinate::new(0, 0))],
        );

        play_turn(&mut game, &mut red).unwrap();

        assert_eq!(game.board().discovered(), &[Coordinate::new(0, 0)]);
        assert_eq!(game.current_turn().team(), Team::Blue);
    }

    #[test]
    fn test_assassin_loses_for_guessing_team() {
        let mut game = small_game(Team::Blue);
        let mut red = seat(Team::Red, vec![], vec![]);
        let mut blue = seat(
            Team::Blue,
            vec![Clue::new("oops", 1)],
            vec![Some(Coordinate::new(2, 2))],
        );

        assert_eq!(play(&mut game, &mut red, &mut blue).unwrap(), Team::Red);
        assert_eq!(game.end_status(), EndStatus::AssassinRevealed);
    }

    #[test]
    fn test_turn_with_clue_skips_spymaster() {
        let mut game = small_game(Team::Red);
        game.set_clue(Clue::new("given", 1)).unwrap();
        let mut red = seat(
            Team::Red,
            vec![],
            vec![Some(Coordinate::new(0, 0)), Some(Coordinate::new(2, 0))],
        );

        play_turn(&mut game, &mut red).unwrap();

        assert_eq!(
            game.board().discovered(),
            &[Coordinate::new(0, 0), Coordinate::new(2, 0)]
        );
        assert_eq!(game.current_turn().team(), Team::Blue);
    }

    #[test]
    fn test_wrong_seat_rejected() {
        let mut game = small_game(Team::Red);
        let mut red = seat(Team::Blue, vec![], vec![]);
        let mut blue = seat(Team::Blue, vec![], vec![]);

        match play(&mut game, &mut red, &mut blue) {
            Err(RunError::WrongSeat { expected, found }) => {
                assert_eq!((expected, found), (Team::Red, Team::Blue))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
