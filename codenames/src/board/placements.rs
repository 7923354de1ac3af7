//! The hidden assignment of identities to cells.
use std::{
    collections::{BTreeMap, BTreeSet},
    convert::TryFrom,
};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::board::{grid::Grid, seeded_rng, CellIdentity, Coordinate, PlacementError, Team};

/// Records which cells hold which team's agents, the assassin and the bystanders, plus
/// the team that moves first.
///
/// The placements are fixed at construction. A dense key grid is derived from them once
/// so that looking up a single cell does not need to search the buckets.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlacementsRepr", into = "PlacementsRepr")]
pub struct AgentPlacements {
    /// Coordinates assigned to each identity.
    positions: BTreeMap<CellIdentity, BTreeSet<Coordinate>>,

    /// Team that takes the first turn. It is given one extra agent.
    starting_team: Team,

    /// Identity of every cell. Cells missing from `positions` are neutral.
    key: Grid<CellIdentity>,
}

impl AgentPlacements {
    /// Build placements from explicit identity buckets. Any cell not listed in a bucket
    /// is a neutral bystander.
    pub fn new<P, C>(side: usize, positions: P, starting_team: Team) -> Result<Self, PlacementError>
    where
        P: IntoIterator<Item = (CellIdentity, C)>,
        C: IntoIterator<Item = Coordinate>,
    {
        let mut key =
            Grid::from_fn(side, |_| CellIdentity::Neutral).ok_or(PlacementError::EmptyBoard)?;
        let mut seen = BTreeSet::new();
        let mut buckets: BTreeMap<CellIdentity, BTreeSet<Coordinate>> = BTreeMap::new();
        for (identity, coords) in positions {
            if identity == CellIdentity::Unrevealed {
                return Err(PlacementError::HiddenIdentity(identity));
            }
            let bucket = buckets.entry(identity).or_default();
            for coord in coords {
                match key.get_mut(&coord) {
                    None => return Err(PlacementError::OutOfBounds(coord)),
                    Some(_) if !seen.insert(coord) => {
                        return Err(PlacementError::DuplicateCoordinate(coord))
                    }
                    Some(cell) => *cell = identity,
                }
                bucket.insert(coord);
            }
        }
        Ok(Self {
            positions: buckets,
            starting_team,
            key,
        })
    }

    /// Randomly place agents on a board with the given side. Passing a seed makes the
    /// result reproducible.
    pub fn random(side: usize, seed: Option<u64>) -> Result<Self, PlacementError> {
        Self::random_with_rng(side, &mut seeded_rng(seed))
    }

    /// Randomly place agents using the given source of randomness.
    ///
    /// The starting team is chosen uniformly. Every coordinate is shuffled and the
    /// shuffled list is cut into consecutive buckets: the starting team's agents, the
    /// other team's agents, the assassin and finally the bystanders.
    pub fn random_with_rng<R: Rng + ?Sized>(
        side: usize,
        rng: &mut R,
    ) -> Result<Self, PlacementError> {
        let starting_team = if rng.gen() { Team::Red } else { Team::Blue };
        let counts = allocation(side, starting_team)?;

        let mut coords: Vec<_> = Coordinate::all(side).collect();
        coords.shuffle(rng);
        let mut coords = coords.into_iter();
        let buckets: Vec<_> = counts
            .iter()
            .map(|&(identity, count)| (identity, coords.by_ref().take(count).collect::<Vec<_>>()))
            .collect();
        Self::new(side, buckets, starting_team)
    }

    /// Length of one side of the board these placements cover.
    pub fn side(&self) -> usize {
        self.key.side()
    }

    /// Team that takes the first turn.
    pub fn starting_team(&self) -> Team {
        self.starting_team
    }

    /// Get an iterator over the coordinates explicitly assigned to the given identity.
    pub fn positions(&self, identity: CellIdentity) -> impl Iterator<Item = &Coordinate> {
        self.positions.get(&identity).into_iter().flatten()
    }

    /// Get the true identity of the given cell, or `None` if it lies outside the board.
    pub fn identity_at(&self, coord: &Coordinate) -> Option<CellIdentity> {
        self.key.get(coord).copied()
    }

    /// The full key card: the true identity of every cell.
    pub fn key(&self) -> &Grid<CellIdentity> {
        &self.key
    }
}

/// Number of cells given to each identity on a board of the given side, in the order the
/// shuffled coordinates are handed out.
///
/// The second team gets a third of the board, the starting team one more, the assassin a
/// single cell and the remaining cells are bystanders. That is 9/8/1/7 on the standard
/// 5x5 board.
fn allocation(side: usize, starting_team: Team) -> Result<[(CellIdentity, usize); 4], PlacementError> {
    let cells = side
        .checked_mul(side)
        .filter(|&cells| cells > 0)
        .ok_or(PlacementError::EmptyBoard)?;
    let second = cells / 3;
    let first = second + 1;
    let agents = first + second;
    if agents + 1 > cells {
        return Err(PlacementError::InvalidCounts { agents, cells });
    }
    Ok([
        (starting_team.into(), first),
        (starting_team.opponent().into(), second),
        (CellIdentity::Assassin, 1),
        (CellIdentity::Neutral, cells - agents - 1),
    ])
}

/// Serialized form of [`AgentPlacements`]. The key grid is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct PlacementsRepr {
    side: usize,
    starting_team: Team,
    positions: BTreeMap<CellIdentity, BTreeSet<Coordinate>>,
}

impl TryFrom<PlacementsRepr> for AgentPlacements {
    type Error = PlacementError;

    fn try_from(repr: PlacementsRepr) -> Result<Self, Self::Error> {
        Self::new(repr.side, repr.positions, repr.starting_team)
    }
}

impl From<AgentPlacements> for PlacementsRepr {
    fn from(placements: AgentPlacements) -> Self {
        Self {
            side: placements.side(),
            starting_team: placements.starting_team,
            positions: placements.positions,
        }
    }
}
