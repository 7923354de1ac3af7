//! Rules engine for Codenames, the two-team word-guessing party game.
//!
//! Each team has a spymaster, who can see which words on the board belong to which team,
//! and operatives, who only see the words. Spymasters give one-word [`Clue`]s and their
//! operatives guess cells on the [`Board`] until they miss, run out of guesses, or reveal
//! the assassin.
//!
//! [`board`] contains the board model: the grid of word cards, the hidden
//! [`AgentPlacements`] and the win condition. [`game`] wraps a board in the turn state
//! machine. [`player`] defines the spymaster and operative roles that drive a match and
//! [`store`] the collaborators that supply words and persist games.
//!
//! [`AgentPlacements`]: board::AgentPlacements
//! [`Board`]: board::Board
//! [`Clue`]: game::Clue

pub mod board;
pub mod game;
pub mod player;
pub mod store;

pub use crate::{
    board::{Board, Card, CellIdentity, Coordinate, Team},
    game::{Clue, CurrentTurnState, EndStatus, Game, GameConfig, GameId, MoveOutcome},
};
