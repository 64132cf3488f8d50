use crate::data::measurement::{highest, Measurement};
use crate::data::normalize::normalize;
use crate::error::Error;
use crate::io::record::CandidateMeasurement;
use crate::io::schema::SNP_REGION_START;
use log::{info, warn};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::Path;
use strum_macros::{Display as StrumDisplay, EnumString};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RejectionKind {
    /// group label, a probability or a SNP value is missing
    Incomplete,
    /// a value is not a number
    Format,
    /// highest group probability is below the cutoff
    BelowCutoff,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Rejection {
    pub line: usize,
    pub sample_id: String,
    #[serde(rename = "reason")]
    pub kind: RejectionKind,
    pub detail: String,
}

impl Rejection {
    fn new(candidate: &CandidateMeasurement, kind: RejectionKind, detail: String) -> Self {
        Self {
            line: candidate.line,
            sample_id: candidate.sample_id.clone(),
            kind,
            detail,
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Sample-ID {} (line {}) is not going to be included, {}: {}",
            self.sample_id, self.line, self.kind, self.detail
        )
    }
}

/// Accepted and rejected records of one run, both in input order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Partition {
    pub accepted: Vec<Measurement>,
    pub rejected: Vec<Rejection>,
}

impl Partition {
    pub fn num_rejected(&self, kind: RejectionKind) -> usize {
        self.rejected.iter().filter(|r| r.kind == kind).count()
    }

    pub fn rejections_to_csv(&self, path: &Path) -> Result<(), Error> {
        info!("Creating: {:?}", path);
        let mut wtr = csv::Writer::from_path(path)?;
        if self.rejected.is_empty() {
            wtr.write_record(["line", "sample_id", "reason", "detail"])?;
        }
        for rejection in &self.rejected {
            wtr.serialize(rejection)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn missing_field(candidate: &CandidateMeasurement) -> Option<String> {
    if let Some(ix) = candidate.probabilities.iter().position(Option::is_none) {
        return Some(format!("missing probability for group {}", ix + 1));
    }
    if let Some(ix) = candidate.snp_values.iter().position(Option::is_none) {
        return Some(format!("missing SNP value in column {}", ix + SNP_REGION_START));
    }
    None
}

fn normalize_all(values: &[Option<String>]) -> Result<Vec<f64>, Error> {
    values.iter().flatten().map(|v| normalize(v)).collect()
}

/// Decides per record, in order: completeness, numeric normalization, cutoff.
/// The first failing rule rejects the record.
pub struct Validator {
    cutoff: f64,
}

impl Validator {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn validate(&self, candidate: CandidateMeasurement) -> Result<Measurement, Rejection> {
        let predicted_group = match &candidate.predicted_group {
            Some(group) => group.clone(),
            None => {
                return Err(Rejection::new(
                    &candidate,
                    RejectionKind::Incomplete,
                    "missing predicted group".to_owned(),
                ))
            }
        };
        if let Some(detail) = missing_field(&candidate) {
            return Err(Rejection::new(&candidate, RejectionKind::Incomplete, detail));
        }

        let normalized = normalize_all(&candidate.probabilities)
            .and_then(|p| Ok((p, normalize_all(&candidate.snp_values)?)));
        let (probabilities, snp_values) = match normalized {
            Ok(values) => values,
            Err(e) => {
                return Err(Rejection::new(
                    &candidate,
                    RejectionKind::Format,
                    e.to_string(),
                ))
            }
        };

        let highest_probability = highest(&probabilities);
        if highest_probability < self.cutoff {
            return Err(Rejection::new(
                &candidate,
                RejectionKind::BelowCutoff,
                format!(
                    "highest probability {} is below cutoff {}",
                    highest_probability, self.cutoff
                ),
            ));
        }

        Ok(Measurement::new(
            candidate.sample_id,
            predicted_group,
            probabilities,
            snp_values,
        ))
    }

    /// Validates all candidates. Rejections are logged and collected, never fatal.
    pub fn partition<I>(&self, candidates: I) -> Partition
    where
        I: IntoIterator<Item = CandidateMeasurement>,
    {
        let mut partition = Partition::default();
        for candidate in candidates {
            match self.validate(candidate) {
                Ok(m) => partition.accepted.push(m),
                Err(rejection) => {
                    warn!("{}", rejection);
                    partition.rejected.push(rejection);
                }
            }
        }
        info!(
            "Accepted {} measurements, rejected {} (cutoff: {})",
            partition.accepted.len(),
            partition.rejected.len(),
            self.cutoff
        );
        partition
    }
}
