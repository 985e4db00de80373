use ndarray::{Array1, Array2, ArrayView1};

use crate::models::SimilarityMethod;

/// Cosine similarity. Zero when either vector has zero norm.
pub fn cosine(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    a.dot(&b) / (norm_a * norm_b)
}

/// Pearson correlation, i.e. one minus the correlation distance.
/// Zero when either vector is constant and the correlation is undefined.
pub fn pearson(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let (Some(mean_a), Some(mean_b)) = (a.mean(), b.mean()) else {
        return 0.0;
    };

    let centered_a = a.mapv(|x| x - mean_a);
    let centered_b = b.mapv(|x| x - mean_b);

    cosine(centered_a.view(), centered_b.view())
}

/// Inverse-distance similarity `1 / (1 + |a - b|)`, in (0, 1]
pub fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let distance = (&a - &b).mapv(|d| d * d).sum().sqrt();
    1.0 / (1.0 + distance)
}

/// Scores one pair of vectors with the given method
pub fn similarity(method: SimilarityMethod, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    match method {
        SimilarityMethod::Cosine => cosine(a, b),
        SimilarityMethod::Pearson => pearson(a, b),
        SimilarityMethod::Euclidean => euclidean(a, b),
    }
}

/// Scores the query against every row of the matrix, in row order
pub fn score_all(
    method: SimilarityMethod,
    query: ArrayView1<f64>,
    matrix: &Array2<f64>,
) -> Array1<f64> {
    matrix
        .outer_iter()
        .map(|row| similarity(method, query, row))
        .collect()
}

/// Ranks every row by similarity to the query and returns `count` entries
/// after the top-ranked one, as `(row index, score)`
///
/// The query is expected to be the mean of a few dataset rows, so the best
/// hit is treated as the query itself and skipped. Equal scores keep row
/// order. Returns fewer entries when the matrix is too small.
pub fn top_matches(
    method: SimilarityMethod,
    query: ArrayView1<f64>,
    matrix: &Array2<f64>,
    count: usize,
) -> Vec<(usize, f64)> {
    let scores = score_all(method, query, matrix);

    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked.into_iter().skip(1).take(count).collect()
}

/// Rounds a score to 3 decimal places for presentation
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
