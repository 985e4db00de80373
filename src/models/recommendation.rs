use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

use super::GenreFlags;

/// Similarity metric used to rank games against the combined profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SimilarityMethod {
    #[serde(rename = "coseno")]
    Cosine,
    #[serde(rename = "pearson")]
    Pearson,
    #[serde(rename = "euclidea")]
    Euclidean,
}

impl SimilarityMethod {
    /// All methods, in response order
    pub const ALL: [SimilarityMethod; 3] = [
        SimilarityMethod::Cosine,
        SimilarityMethod::Pearson,
        SimilarityMethod::Euclidean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMethod::Cosine => "coseno",
            SimilarityMethod::Pearson => "pearson",
            SimilarityMethod::Euclidean => "euclidea",
        }
    }
}

impl Display for SimilarityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body of `POST /recomendar`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub juegos: Vec<String>,
}

/// A single recommended game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarGame {
    /// Display name of the recommended game
    pub juego_similar: String,
    /// Similarity score rounded to 3 decimal places
    pub similitud: f64,
    /// Raw genre flags of the recommended game
    pub generos: GenreFlags,
}

/// Ranked recommendations for every similarity method
pub type Recommendations = BTreeMap<SimilarityMethod, Vec<SimilarGame>>;

/// Body of a successful `POST /recomendar`
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recomendaciones: Recommendations,
}
