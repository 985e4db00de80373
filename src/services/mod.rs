pub mod dataset;
pub mod normalizer;
pub mod recommender;
pub mod similarity;
pub mod title_matcher;

pub use dataset::{Dataset, DatasetError};
pub use normalizer::Standardizer;
pub use recommender::{RecommendError, Recommender};
pub use title_matcher::{TitleMatch, TitleMatcher};
