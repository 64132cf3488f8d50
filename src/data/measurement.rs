use serde::Serialize;

/// A sample as classified by a PASW/SPSS discriminant analysis.
///
/// Only the validator creates these, and only from complete, numeric records.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Measurement {
    sample_id: String,
    predicted_group: String,
    probabilities: Vec<f64>,
    snp_values: Vec<f64>,
}

impl Measurement {
    pub(crate) fn new(
        sample_id: String,
        predicted_group: String,
        probabilities: Vec<f64>,
        snp_values: Vec<f64>,
    ) -> Self {
        Self {
            sample_id,
            predicted_group,
            probabilities,
            snp_values,
        }
    }

    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    pub fn predicted_group(&self) -> &str {
        &self.predicted_group
    }

    /// Group membership probabilities, in group order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn snp_values(&self) -> &[f64] {
        &self.snp_values
    }

    pub fn highest_probability(&self) -> f64 {
        highest(&self.probabilities)
    }
}

pub(crate) fn highest(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
}
