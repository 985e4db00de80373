use serde::{ser::SerializeMap, Serialize, Serializer};
use std::fmt::Display;

/// Genre categories carried by every game in the dataset, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Crime,
    Family,
    Fantasy,
    Mystery,
    SciFi,
    Thriller,
}

impl Genre {
    /// All genres in dataset column order
    pub const ALL: [Genre; 9] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Comedy,
        Genre::Crime,
        Genre::Family,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::SciFi,
        Genre::Thriller,
    ];

    /// Number of genre columns
    pub const COUNT: usize = Self::ALL.len();

    /// Column header used by the dataset and the JSON responses
    pub fn column_name(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
        }
    }

    /// Position of this genre in the feature matrix
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Boolean genre flags for one game, indexed by [`Genre`]
///
/// Serializes as a JSON object keyed by the genre column names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenreFlags([bool; Genre::COUNT]);

impl GenreFlags {
    pub fn new(flags: [bool; Genre::COUNT]) -> Self {
        Self(flags)
    }

    pub fn get(&self, genre: Genre) -> bool {
        self.0[genre.index()]
    }

    pub fn set(&mut self, genre: Genre, value: bool) {
        self.0[genre.index()] = value;
    }

    /// Flags as 0.0 / 1.0 features, in column order
    pub fn as_features(&self) -> [f64; Genre::COUNT] {
        self.0.map(|flag| if flag { 1.0 } else { 0.0 })
    }
}

impl Serialize for GenreFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Genre::COUNT))?;
        for genre in Genre::ALL {
            map.serialize_entry(genre.column_name(), &self.get(genre))?;
        }
        map.end()
    }
}

/// Descriptive columns of the dataset that take no part in scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameDetails {
    pub url: Option<String>,
    pub year: Option<String>,
    pub certificate: Option<String>,
    pub rating: Option<f64>,
    pub votes: Option<String>,
    pub plot: Option<String>,
}

/// One row of the game dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub name: String,
    pub name_normalized: String,
    #[serde(flatten)]
    pub details: GameDetails,
    #[serde(flatten)]
    pub genres: GenreFlags,
}

impl Game {
    pub fn new(name: impl Into<String>, genres: GenreFlags, details: GameDetails) -> Self {
        let name = name.into();
        Self {
            name_normalized: normalize_title(&name),
            name,
            details,
            genres,
        }
    }
}

/// Lookup key for a title: lowercased and whitespace-trimmed
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
