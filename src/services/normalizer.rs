use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Per-column z-score standardization fitted once over the dataset
///
/// Uses the population standard deviation. Columns with zero variance keep a
/// scale of 1, so every value in them maps to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl Standardizer {
    /// Computes column statistics. Returns `None` for a matrix with no rows.
    pub fn fit(matrix: &Array2<f64>) -> Option<Self> {
        let mean = matrix.mean_axis(Axis(0))?;
        let scale = matrix
            .var_axis(Axis(0), 0.0)
            .mapv(|var| if var > 0.0 { var.sqrt() } else { 1.0 });

        Some(Self { mean, scale })
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }

    /// Standardizes a single feature vector
    pub fn transform_row(&self, row: ArrayView1<f64>) -> Array1<f64> {
        (&row - &self.mean) / &self.scale
    }

    /// Standardizes every row of a matrix
    pub fn transform(&self, matrix: &Array2<f64>) -> Array2<f64> {
        (matrix - &self.mean) / &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_population_statistics() {
        let matrix = array![[1.0, 0.0], [0.0, 0.0], [1.0, 0.0], [0.0, 0.0]];
        let scaler = Standardizer::fit(&matrix).unwrap();

        assert_eq!(scaler.mean(), &array![0.5, 0.0]);
        // zero-variance column keeps unit scale
        assert_eq!(scaler.scale(), &array![0.5, 1.0]);
    }

    #[test]
    fn test_transform_zero_mean_unit_variance() {
        let matrix = array![[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [0.0, 1.0]];
        let scaler = Standardizer::fit(&matrix).unwrap();
        let normalized = scaler.transform(&matrix);

        for column in normalized.axis_iter(Axis(1)) {
            let mean = column.mean().unwrap();
            let var = column.var(0.0);
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_transform_row_matches_matrix_transform() {
        let matrix = array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 0.0]];
        let scaler = Standardizer::fit(&matrix).unwrap();
        let full = scaler.transform(&matrix);

        for (i, row) in matrix.outer_iter().enumerate() {
            assert_eq!(scaler.transform_row(row), full.row(i));
        }
    }

    #[test]
    fn test_fit_empty_matrix() {
        let matrix = Array2::<f64>::zeros((0, 3));
        assert!(Standardizer::fit(&matrix).is_none());
    }
}
