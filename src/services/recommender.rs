use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

use crate::models::{Game, Recommendations, SimilarGame, SimilarityMethod};

use super::{
    dataset::{Dataset, DatasetError},
    normalizer::Standardizer,
    similarity,
    title_matcher::{TitleMatch, TitleMatcher},
};

/// Number of titles a recommendation request must name
pub const REQUIRED_TITLES: usize = 3;

/// Number of games returned per similarity method
pub const RESULTS_PER_METHOD: usize = 3;

/// Client-facing failures of a recommendation request
#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    #[error("Se deben ingresar exactamente 3 juegos.")]
    WrongTitleCount { got: usize },

    #[error("No se encontraron coincidencias suficientes.")]
    InsufficientMatches { resolved: usize },
}

/// Genre-similarity recommendation engine
///
/// Holds the dataset together with its standardized feature matrix and the
/// title matcher. Built once at startup and read-only afterwards.
#[derive(Debug)]
pub struct Recommender {
    dataset: Dataset,
    standardizer: Standardizer,
    features: Array2<f64>,
    matcher: TitleMatcher,
}

impl Recommender {
    /// Fits the standardizer over the dataset and indexes its titles
    pub fn new(dataset: Dataset, cutoff: f64) -> Result<Self, DatasetError> {
        let raw = dataset.genre_matrix();
        let standardizer = Standardizer::fit(&raw).ok_or(DatasetError::TooFewRows {
            rows: dataset.len(),
        })?;
        let features = standardizer.transform(&raw);

        let titles = dataset
            .games()
            .iter()
            .map(|g| g.name_normalized.clone())
            .collect();
        let matcher = TitleMatcher::new(titles, cutoff);

        tracing::info!(
            games = dataset.len(),
            cutoff = matcher.cutoff(),
            "Recommender ready"
        );

        Ok(Self {
            dataset,
            standardizer,
            features,
            matcher,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn standardizer(&self) -> &Standardizer {
        &self.standardizer
    }

    /// Standardized genre matrix, in dataset row order
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    /// Closest known title for free text, if any clears the cutoff
    pub fn resolve_title(&self, query: &str) -> Option<TitleMatch> {
        self.matcher.best_match(query)
    }

    /// Exact lookup by normalized name
    pub fn find_game(&self, name: &str) -> Option<&Game> {
        self.dataset.find_by_name(name)
    }

    /// Column-wise mean of the standardized rows at `indices`
    pub fn combined_profile(&self, indices: &[usize]) -> Option<Array1<f64>> {
        self.features.select(Axis(0), indices).mean_axis(Axis(0))
    }

    /// Recommends games similar to exactly three free-text titles
    pub fn recommend(&self, titles: &[String]) -> Result<Recommendations, RecommendError> {
        if titles.len() != REQUIRED_TITLES {
            tracing::info!(got = titles.len(), "Rejected request with wrong title count");
            return Err(RecommendError::WrongTitleCount { got: titles.len() });
        }

        let matched: Vec<TitleMatch> = titles
            .iter()
            .filter_map(|title| self.resolve_title(title))
            .collect();

        if matched.len() < REQUIRED_TITLES {
            tracing::info!(
                resolved = matched.len(),
                "Not enough titles matched the dataset"
            );
            return Err(RecommendError::InsufficientMatches {
                resolved: matched.len(),
            });
        }

        // one entry per distinct title, covering every row that carries it
        let mut distinct: Vec<&str> = Vec::new();
        for m in &matched {
            if !distinct.contains(&m.title.as_str()) {
                distinct.push(m.title.as_str());
            }
        }
        let indices = self.dataset.rows_named(&distinct);
        tracing::debug!(titles = ?distinct, rows = indices.len(), "Resolved input titles");

        let Some(profile) = self.combined_profile(&indices) else {
            return Err(RecommendError::InsufficientMatches {
                resolved: indices.len(),
            });
        };

        let recommendations: Recommendations = SimilarityMethod::ALL
            .into_iter()
            .map(|method| (method, self.rank(method, &profile)))
            .collect();

        tracing::info!(
            methods = recommendations.len(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }

    fn rank(&self, method: SimilarityMethod, profile: &Array1<f64>) -> Vec<SimilarGame> {
        similarity::top_matches(method, profile.view(), &self.features, RESULTS_PER_METHOD)
            .into_iter()
            .filter_map(|(index, score)| {
                self.dataset.get(index).map(|game| SimilarGame {
                    juego_similar: game.name.clone(),
                    similitud: similarity::round_score(score),
                    generos: game.genres,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameDetails, Genre, GenreFlags};

    fn game(name: &str, genres: &[Genre]) -> Game {
        let mut flags = GenreFlags::default();
        for genre in genres {
            flags.set(*genre, true);
        }
        Game::new(name, flags, GameDetails::default())
    }

    fn recommender() -> Recommender {
        use Genre::*;
        let games = vec![
            game("Minecraft", &[Adventure, Family, Fantasy]),
            game("Halo: Combat Evolved", &[Action, SciFi]),
            game("Portal 2", &[Adventure, Comedy, SciFi]),
            game("Grand Theft Auto V", &[Action, Crime, Thriller]),
            game("LEGO Star Wars", &[Action, Adventure, Comedy, Family, SciFi]),
            game("The Wolf Among Us", &[Crime, Fantasy, Mystery]),
            game("Alan Wake", &[Action, Mystery, Thriller]),
            game("Mass Effect", &[Action, Adventure, SciFi]),
        ];
        Recommender::new(Dataset::from_games(games).unwrap(), 0.4).unwrap()
    }

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_recommend_returns_three_per_method() {
        let recommender = recommender();
        let result = recommender
            .recommend(&titles(&["Minecraft", "Portal 2", "Mass Effect"]))
            .unwrap();

        assert_eq!(result.len(), 3);
        for method in SimilarityMethod::ALL {
            let games = &result[&method];
            assert_eq!(games.len(), RESULTS_PER_METHOD);
            assert!(games.windows(2).all(|w| w[0].similitud >= w[1].similitud));
            for game in games {
                match method {
                    SimilarityMethod::Euclidean => {
                        assert!(game.similitud > 0.0 && game.similitud <= 1.0)
                    }
                    _ => assert!((-1.0..=1.0).contains(&game.similitud)),
                }
            }
        }
    }

    #[test]
    fn test_recommendation_carries_raw_genres() {
        let recommender = recommender();
        let result = recommender
            .recommend(&titles(&["Halo: Combat Evolved", "mass effect", "portal 2"]))
            .unwrap();

        for entry in &result[&SimilarityMethod::Cosine] {
            let game = recommender.find_game(&entry.juego_similar).unwrap();
            assert_eq!(entry.generos, game.genres);
        }
    }

    #[test]
    fn test_wrong_title_count() {
        let recommender = recommender();
        assert_eq!(
            recommender.recommend(&titles(&["Minecraft", "Portal 2"])),
            Err(RecommendError::WrongTitleCount { got: 2 })
        );
        assert_eq!(
            recommender.recommend(&titles(&["a", "b", "c", "d"])),
            Err(RecommendError::WrongTitleCount { got: 4 })
        );
        assert_eq!(
            RecommendError::WrongTitleCount { got: 0 }.to_string(),
            "Se deben ingresar exactamente 3 juegos."
        );
    }

    #[test]
    fn test_unmatched_title_fails_request() {
        let recommender = recommender();
        let err = recommender
            .recommend(&titles(&["Minecraft", "Portal 2", "zzzzznotagame"]))
            .unwrap_err();

        assert_eq!(err, RecommendError::InsufficientMatches { resolved: 2 });
        assert_eq!(err.to_string(), "No se encontraron coincidencias suficientes.");
    }

    #[test]
    fn test_case_variants_resolve_to_same_row() {
        let recommender = recommender();
        let rows: Vec<usize> = ["Minecraft", "minecraft ", "MINECRAFT"]
            .iter()
            .map(|t| recommender.resolve_title(t).unwrap().index)
            .collect();
        assert_eq!(rows, vec![0, 0, 0]);

        let result = recommender
            .recommend(&titles(&["Minecraft", "minecraft ", "MINECRAFT"]))
            .unwrap();
        assert_eq!(result[&SimilarityMethod::Euclidean].len(), 3);
    }

    #[test]
    fn test_repeated_title_counts_once_in_profile() {
        let recommender = recommender();
        let result = recommender
            .recommend(&titles(&["Minecraft", "minecraft", "Halo: Combat Evolved"]))
            .unwrap();

        let profile = recommender.combined_profile(&[0, 1]).unwrap();
        for method in SimilarityMethod::ALL {
            assert_eq!(result[&method], recommender.rank(method, &profile), "{}", method);
        }
    }

    #[test]
    fn test_profile_covers_rows_sharing_a_title() {
        use Genre::*;
        let games = vec![
            game("Minecraft", &[Adventure, Family]),
            game("Halo", &[Action, SciFi]),
            game("Portal 2", &[Comedy, SciFi]),
            game("minecraft ", &[Fantasy]),
            game("Alan Wake", &[Mystery, Thriller]),
        ];
        let recommender = Recommender::new(Dataset::from_games(games).unwrap(), 0.4).unwrap();

        let result = recommender
            .recommend(&titles(&["Minecraft", "Halo", "Portal 2"]))
            .unwrap();

        let profile = recommender.combined_profile(&[0, 1, 2, 3]).unwrap();
        for method in SimilarityMethod::ALL {
            assert_eq!(result[&method], recommender.rank(method, &profile), "{}", method);
        }
    }

    #[test]
    fn test_combined_profile_is_row_mean() {
        let recommender = recommender();
        let profile = recommender.combined_profile(&[0, 2, 7]).unwrap();
        let features = recommender.features();

        for col in 0..Genre::COUNT {
            let expected = (features[[0, col]] + features[[2, col]] + features[[7, col]]) / 3.0;
            assert!((profile[col] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_features_follow_dataset_order() {
        let recommender = recommender();
        let raw = recommender.dataset().genre_matrix();
        assert_eq!(
            recommender.features(),
            &recommender.standardizer().transform(&raw)
        );
        assert_eq!(recommender.features().nrows(), recommender.dataset().len());
    }
}
