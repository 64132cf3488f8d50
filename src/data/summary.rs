use crate::data::validate::{Partition, RejectionKind};
use crate::error::Error;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;
use statrs::statistics::Statistics;
use std::{fs::File, path::Path};

/// Distribution of the highest group probability over the accepted samples.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ProbabilityStats {
    mean: f64,
    variance: f64,
    min: f64,
    max: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct PartitionSummary {
    num_accepted: usize,
    num_rejected: usize,
    num_incomplete: usize,
    num_format_errors: usize,
    num_below_cutoff: usize,
    // None if nothing was accepted
    highest_probability: Option<ProbabilityStats>,
}

impl PartitionSummary {
    pub fn from_partition(partition: &Partition) -> Self {
        let highest = partition
            .accepted
            .iter()
            .map(|m| m.highest_probability())
            .collect::<Vec<f64>>();
        let highest_probability = if highest.is_empty() {
            None
        } else {
            Some(ProbabilityStats {
                mean: (&highest).mean(),
                variance: (&highest).population_variance(),
                min: (&highest).min(),
                max: (&highest).max(),
            })
        };
        Self {
            num_accepted: partition.accepted.len(),
            num_rejected: partition.rejected.len(),
            num_incomplete: partition.num_rejected(RejectionKind::Incomplete),
            num_format_errors: partition.num_rejected(RejectionKind::Format),
            num_below_cutoff: partition.num_rejected(RejectionKind::BelowCutoff),
            highest_probability,
        }
    }

    pub fn num_accepted(&self) -> usize {
        self.num_accepted
    }

    pub fn num_rejected(&self) -> usize {
        self.num_rejected
    }

    pub fn to_file(&self, path: &Path) -> Result<(), Error> {
        info!("Creating: {:?}", path);
        to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }
}
