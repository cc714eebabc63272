use serde::{Deserialize, Serialize};

use crate::ml::{ModelError, QualityModel, SparseVector};

/// Linear quality regressor: `intercept + coefficients · x`, clamped to [0, 1].
///
/// Artifact format (JSON): `{"intercept": 0.62, "coefficients": [0.01, -0.03, ...]}`.
/// The coefficient count must match the quality vectorizer's dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearQualityModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearQualityModel {
    pub fn validate(&self, expected_dimension: usize) -> Result<(), ModelError> {
        if self.coefficients.len() != expected_dimension {
            return Err(ModelError::Artifact(format!(
                "quality model has {} coefficients, vectorizer produces {} features",
                self.coefficients.len(),
                expected_dimension
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Artifact(
                "quality model contains non-finite weights".to_string(),
            ));
        }
        Ok(())
    }
}

impl QualityModel for LinearQualityModel {
    fn predict(&self, features: &SparseVector) -> Result<f64, ModelError> {
        if let Some(max) = features.max_index() {
            if max >= self.coefficients.len() {
                return Err(ModelError::DimensionMismatch {
                    expected: self.coefficients.len(),
                    actual: max,
                });
            }
        }

        let raw = features
            .entries()
            .iter()
            .fold(self.intercept, |acc, &(i, x)| acc + self.coefficients[i] * x);

        if !raw.is_finite() {
            return Err(ModelError::Predict(format!("non-finite prediction {raw}")));
        }
        Ok(raw.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LinearQualityModel {
        LinearQualityModel {
            intercept: 0.5,
            coefficients: vec![0.2, -0.1, 0.4],
        }
    }

    #[test]
    fn test_predict_linear_combination() {
        let x = SparseVector::from_pairs(vec![(0, 0.5), (2, 0.5)]);
        let y = model().predict(&x).unwrap();
        assert!((y - 0.8).abs() < 1e-12, "got {y}");
    }

    #[test]
    fn test_predict_zero_vector_is_intercept() {
        assert_eq!(model().predict(&SparseVector::default()).unwrap(), 0.5);
    }

    #[test]
    fn test_predict_clamped() {
        let m = LinearQualityModel {
            intercept: 0.9,
            coefficients: vec![5.0],
        };
        let x = SparseVector::from_pairs(vec![(0, 1.0)]);
        assert_eq!(m.predict(&x).unwrap(), 1.0);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let x = SparseVector::from_pairs(vec![(7, 1.0)]);
        assert!(matches!(
            model().predict(&x),
            Err(ModelError::DimensionMismatch { expected: 3, actual: 7 })
        ));
    }

    #[test]
    fn test_validate_checks_dimension() {
        assert!(model().validate(3).is_ok());
        assert!(model().validate(4).is_err());
    }
}
