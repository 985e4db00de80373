use std::{io::Read, path::Path};

use ndarray::Array2;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{normalize_title, Game, GameDetails, Genre, GenreFlags};

/// Smallest dataset the scorer can serve: the top-ranked match is dropped
/// and three more are returned
pub const MIN_ROWS: usize = 4;

/// Errors raised while loading the game dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid value {value:?} for genre {genre} on line {line}")]
    InvalidGenreFlag {
        line: u64,
        genre: Genre,
        value: String,
    },

    #[error("Dataset has {rows} rows, at least {} are required", MIN_ROWS)]
    TooFewRows { rows: usize },
}

/// One CSV row as stored on disk. Columns not named here are ignored.
#[derive(Debug, Deserialize)]
struct RawGameRow {
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    certificate: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    rating: Option<f64>,
    #[serde(default)]
    votes: Option<String>,
    #[serde(default)]
    plot: Option<String>,
    #[serde(rename = "Action")]
    action: String,
    #[serde(rename = "Adventure")]
    adventure: String,
    #[serde(rename = "Comedy")]
    comedy: String,
    #[serde(rename = "Crime")]
    crime: String,
    #[serde(rename = "Family")]
    family: String,
    #[serde(rename = "Fantasy")]
    fantasy: String,
    #[serde(rename = "Mystery")]
    mystery: String,
    #[serde(rename = "Sci-Fi")]
    sci_fi: String,
    #[serde(rename = "Thriller")]
    thriller: String,
}

impl RawGameRow {
    fn genre_cells(&self) -> [(Genre, &str); Genre::COUNT] {
        [
            (Genre::Action, self.action.as_str()),
            (Genre::Adventure, self.adventure.as_str()),
            (Genre::Comedy, self.comedy.as_str()),
            (Genre::Crime, self.crime.as_str()),
            (Genre::Family, self.family.as_str()),
            (Genre::Fantasy, self.fantasy.as_str()),
            (Genre::Mystery, self.mystery.as_str()),
            (Genre::SciFi, self.sci_fi.as_str()),
            (Genre::Thriller, self.thriller.as_str()),
        ]
    }

    fn into_game(self, line: u64) -> Result<Game, DatasetError> {
        let mut genres = GenreFlags::default();
        for (genre, cell) in self.genre_cells() {
            let flag = parse_flag(cell).ok_or_else(|| DatasetError::InvalidGenreFlag {
                line,
                genre,
                value: cell.to_string(),
            })?;
            genres.set(genre, flag);
        }

        let details = GameDetails {
            url: self.url,
            year: self.year,
            certificate: self.certificate,
            rating: self.rating,
            votes: self.votes,
            plot: self.plot,
        };

        Ok(Game::new(self.name, genres, details))
    }
}

/// Coerces a genre cell to a boolean. Empty cells are false.
fn parse_flag(raw: &str) -> Option<bool> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(false);
    }

    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        other => other.parse::<f64>().ok().map(|n| n != 0.0),
    }
}

/// The in-memory game table, loaded once and never mutated
#[derive(Debug, Clone)]
pub struct Dataset {
    games: Vec<Game>,
}

impl Dataset {
    /// Loads the dataset from a CSV file with a header row
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading game dataset");

        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    /// Loads the dataset from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let headers = reader.headers()?.clone();
        let mut games = Vec::new();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: RawGameRow = record.deserialize(Some(&headers))?;
            games.push(row.into_game(line)?);
        }

        Self::from_games(games)
    }

    /// Builds a dataset from already-parsed records
    pub fn from_games(games: Vec<Game>) -> Result<Self, DatasetError> {
        if games.len() < MIN_ROWS {
            return Err(DatasetError::TooFewRows { rows: games.len() });
        }

        tracing::info!(rows = games.len(), "Game dataset loaded");
        Ok(Self { games })
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Game> {
        self.games.get(index)
    }

    /// Raw 0/1 genre matrix: one row per game, one column per [`Genre`]
    pub fn genre_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.games.len(), Genre::COUNT), |(row, col)| {
            self.games[row].genres.as_features()[col]
        })
    }

    /// Every row whose normalized name is one of `names`, in row order
    pub fn rows_named(&self, names: &[&str]) -> Vec<usize> {
        self.games
            .iter()
            .enumerate()
            .filter(|(_, g)| names.contains(&g.name_normalized.as_str()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Exact lookup by normalized name; the first matching row wins
    pub fn find_by_name(&self, name: &str) -> Option<&Game> {
        let key = normalize_title(name);
        self.games.iter().find(|g| g.name_normalized == key)
    }
}
