use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two competing teams. Also used as the color of the team whose turn it is.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Get the opponent of this team.
    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// The identity of a cell on the board.
///
/// Every card starts out [`Unrevealed`][CellIdentity::Unrevealed] and is overwritten with
/// its true identity exactly once, when it is guessed.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum CellIdentity {
    /// An agent of the red team.
    Red,
    /// An agent of the blue team.
    Blue,
    /// The assassin. Revealing it ends the game.
    Assassin,
    /// An innocent bystander.
    Neutral,
    /// The identity has not been revealed yet.
    Unrevealed,
}

impl From<Team> for CellIdentity {
    fn from(team: Team) -> Self {
        match team {
            Team::Red => CellIdentity::Red,
            Team::Blue => CellIdentity::Blue,
        }
    }
}

/// Error returned when an identity that isn't a team is used where a team is required.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("{0:?} is not a team")]
pub struct NotATeam(pub CellIdentity);

impl TryFrom<CellIdentity> for Team {
    type Error = NotATeam;

    fn try_from(identity: CellIdentity) -> Result<Self, Self::Error> {
        match identity {
            CellIdentity::Red => Ok(Team::Red),
            CellIdentity::Blue => Ok(Team::Blue),
            other => Err(NotATeam(other)),
        }
    }
}
