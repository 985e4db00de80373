pub mod game;
pub mod recommendation;

pub use game::{normalize_title, Game, GameDetails, Genre, GenreFlags};
pub use recommendation::{
    RecommendationRequest, RecommendationResponse, Recommendations, SimilarGame,
    SimilarityMethod,
};
