//! Saved-game records and the directory-backed store.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use chess_core::{Color, MoveRecord, Round};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when working with the game store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No saved game exists under the given name.
    #[error("no saved game named {0:?}")]
    NotFound(String),

    /// The file exists but its contents cannot be decoded. The caller
    /// decides what to do with the damaged file; the store never deletes
    /// on its own.
    #[error("saved game {name:?} is corrupted: {source}")]
    Corrupt {
        name: String,
        source: serde_json::Error,
    },

    /// An underlying filesystem error.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The durable record of one game: its name and its move log.
///
/// Records reference pieces and squares by their stable codes only, so a
/// saved game is replayable regardless of how the engine represents
/// things internally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub name: String,
    pub rounds: Vec<Round>,
    /// White's move of an unfinished round, if the game was saved
    /// mid-round.
    pub pending: Option<MoveRecord>,
}

impl SavedGame {
    /// Creates a saved game from a move log.
    pub fn new(name: impl Into<String>, rounds: Vec<Round>, pending: Option<MoveRecord>) -> Self {
        SavedGame {
            name: name.into(),
            rounds,
            pending,
        }
    }

    /// The number of half-moves recorded.
    pub fn half_moves(&self) -> usize {
        self.rounds.len() * 2 + usize::from(self.pending.is_some())
    }

    /// The side to move, derived from the log length.
    pub fn side_to_move(&self) -> Color {
        if self.half_moves() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// How [`GameStore::list`] orders saved games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Numeric-prefix-aware name order.
    #[default]
    ByName,
    /// Most recently modified first.
    ByDate,
}

/// A directory of saved games, addressed by name.
#[derive(Debug, Clone)]
pub struct GameStore {
    root: PathBuf,
    sort: SortOrder,
}

impl GameStore {
    /// The file extension used for saved games.
    pub const EXTENSION: &'static str = "json";

    /// The prefix of generated default names.
    pub const DEFAULT_PREFIX: &'static str = "Game No. ";

    /// Creates a store rooted at the given directory. The directory is
    /// created on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GameStore {
            root: root.into(),
            sort: SortOrder::default(),
        }
    }

    /// Changes the listing order.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Writes a saved game under its name, overwriting any previous save.
    pub fn save(&self, game: &SavedGame) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(game).map_err(|source| StoreError::Corrupt {
            name: game.name.clone(),
            source,
        })?;
        fs::write(self.path(&game.name), json)?;
        Ok(())
    }

    /// Reads a saved game back by name.
    pub fn load(&self, name: &str) -> Result<SavedGame, StoreError> {
        let path = self.path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(error) => return Err(error.into()),
        };
        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            name: name.to_string(),
            source,
        })
    }

    /// Lists the names of all saved games, in the configured order.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut games: Vec<(String, SystemTime)> = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(Self::EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()?
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH);
            games.push((name.to_string(), modified));
        }

        match self.sort {
            SortOrder::ByName => games.sort_by(|(a, _), (b, _)| name_tokens(a).cmp(&name_tokens(b))),
            SortOrder::ByDate => games.sort_by(|(_, a), (_, b)| b.cmp(a)),
        }
        Ok(games.into_iter().map(|(name, _)| name).collect())
    }

    /// Renames a saved game.
    pub fn rename(&self, name: &str, new_name: &str) -> Result<(), StoreError> {
        let from = self.path(name);
        if !from.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::rename(from, self.path(new_name))?;
        Ok(())
    }

    /// Deletes a saved game.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Generates the next free default name ("Game No. 4").
    pub fn generate_name(&self) -> Result<String, StoreError> {
        let highest = self
            .list()?
            .iter()
            .filter(|name| name.contains(Self::DEFAULT_PREFIX.trim_end()))
            .filter_map(|name| suffix_number(name))
            .max()
            .unwrap_or(0);
        Ok(format!("{}{}", Self::DEFAULT_PREFIX, highest + 1))
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, Self::EXTENSION))
    }
}

/// One segment of a name's sort key. Digit runs compare as numbers, so
/// "Game No. 2" sorts before "Game No. 10".
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NameToken {
    Number(u64),
    Text(String),
}

fn name_tokens(name: &str) -> Vec<NameToken> {
    let mut tokens = Vec::new();
    let mut chars = name.chars().peekable();
    while let Some(&next) = chars.peek() {
        let digits = next.is_ascii_digit();
        let mut run = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() != digits {
                break;
            }
            run.push(c);
            chars.next();
        }
        tokens.push(match run.parse() {
            Ok(number) if digits => NameToken::Number(number),
            _ => NameToken::Text(run.to_lowercase()),
        });
    }
    tokens
}

fn suffix_number(name: &str) -> Option<u64> {
    let digits: String = name
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.chars().rev().collect::<String>().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn record(piece: &str, target: &str) -> MoveRecord {
        MoveRecord::simple(piece.parse().unwrap(), Square::from_code(target).unwrap())
    }

    fn sample(name: &str) -> SavedGame {
        SavedGame::new(
            name,
            vec![Round::new(0, record("WPE", "e4"), record("BPE", "e5"))],
            Some(record("WNG", "f3")),
        )
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path());

        let game = sample("test");
        store.save(&game).unwrap();
        let loaded = store.load("test").unwrap();
        assert_eq!(loaded, game);
        assert_eq!(loaded.half_moves(), 3);
        assert_eq!(loaded.side_to_move(), Color::Black);
    }

    #[test]
    fn load_missing_game() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path());
        assert!(matches!(
            store.load("nope"),
            Err(StoreError::NotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn corrupted_file_is_surfaced_not_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        assert!(matches!(
            store.load("bad"),
            Err(StoreError::Corrupt { name, .. }) if name == "bad"
        ));
        assert!(dir.path().join("bad.json").exists());
    }

    #[test]
    fn list_sorts_by_numeric_prefix_aware_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path());
        for name in ["Game No. 10", "Game No. 2", "alpha"] {
            store.save(&sample(name)).unwrap();
        }
        assert_eq!(
            store.list().unwrap(),
            vec!["alpha", "Game No. 2", "Game No. 10"]
        );
    }

    #[test]
    fn rename_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path());
        store.save(&sample("old")).unwrap();

        store.rename("old", "new").unwrap();
        assert!(store.load("old").is_err());
        assert!(store.load("new").is_ok());

        store.delete("new").unwrap();
        assert!(matches!(store.delete("new"), Err(StoreError::NotFound(_))));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn generated_names_count_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(dir.path());
        assert_eq!(store.generate_name().unwrap(), "Game No. 1");

        store.save(&sample("Game No. 1")).unwrap();
        store.save(&sample("Game No. 7")).unwrap();
        assert_eq!(store.generate_name().unwrap(), "Game No. 8");
    }
}
