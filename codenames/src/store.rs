//! Collaborators that supply card words and persist games.
//!
//! The engine never holds on to a store. Whoever runs the games owns one and passes it
//! where it is needed, and is responsible for making sure only one caller at a time
//! loads, mutates and saves a given game.
use std::{
    collections::HashMap,
    fs,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::game::{Game, GameId};

/// Error returned by word providers and game stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested word list or game does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Reading or writing the underlying storage failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A stored game could not be encoded or decoded.
    #[error("malformed game data: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Source of the words printed on the cards.
pub trait WordProvider {
    /// Load every available card word.
    fn load_card_words(&self) -> Result<Vec<String>, StoreError>;
}

impl WordProvider for Vec<String> {
    fn load_card_words(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.clone())
    }
}

/// Word list stored in a text file, one word per line.
#[derive(Debug, Clone)]
pub struct WordFile {
    path: PathBuf,
}

impl WordFile {
    /// Read words from the file at the given path. The file is opened on each load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordProvider for WordFile {
    /// Read the file, trimming every line and skipping blank ones.
    fn load_card_words(&self) -> Result<Vec<String>, StoreError> {
        let file = fs::File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => {
                StoreError::NotFound(format!("card words file {}", self.path.display()))
            }
            _ => err.into(),
        })?;
        let mut words = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_owned());
            }
        }
        debug!(path = %self.path.display(), count = words.len(), "loaded card words");
        Ok(words)
    }
}

/// Persistence for games, keyed by their id.
pub trait GameStore {
    /// Load the game with the given id.
    fn get_by_id(&self, id: GameId) -> Result<Game, StoreError>;

    /// Save the game under the given id, replacing any earlier save.
    fn save(&mut self, id: GameId, game: &Game) -> Result<(), StoreError>;

    /// Delete the game with the given id.
    fn delete(&mut self, id: GameId) -> Result<(), StoreError>;
}

fn game_not_found(id: GameId) -> StoreError {
    StoreError::NotFound(format!("game {}", id))
}

/// Store that keeps games in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: HashMap<GameId, Game>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn get_by_id(&self, id: GameId) -> Result<Game, StoreError> {
        self.games.get(&id).cloned().ok_or_else(|| game_not_found(id))
    }

    fn save(&mut self, id: GameId, game: &Game) -> Result<(), StoreError> {
        self.games.insert(id, game.clone());
        Ok(())
    }

    fn delete(&mut self, id: GameId) -> Result<(), StoreError> {
        self.games
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| game_not_found(id))
    }
}

/// Store that writes each game as `games/<id>.json` under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::NotFound(format!("directory {}", root.display())));
        }
        Ok(Self { root })
    }

    fn games_dir(&self) -> PathBuf {
        self.root.join("games")
    }

    fn game_path(&self, id: GameId) -> PathBuf {
        self.games_dir().join(format!("{}.json", id))
    }

    /// The root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl GameStore for DirectoryStore {
    fn get_by_id(&self, id: GameId) -> Result<Game, StoreError> {
        let path = self.game_path(id);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(game_not_found(id)),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&mut self, id: GameId, game: &Game) -> Result<(), StoreError> {
        fs::create_dir_all(self.games_dir())?;
        let path = self.game_path(id);
        fs::write(&path, serde_json::to_string(game)?)?;
        debug!(%id, path = %path.display(), "saved game");
        Ok(())
    }

    fn delete(&mut self, id: GameId) -> Result<(), StoreError> {
        match fs::remove_file(self.game_path(id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(game_not_found(id)),
            Err(err) => Err(err.into()),
        }
    }
}
