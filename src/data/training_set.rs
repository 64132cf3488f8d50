use crate::data::measurement::Measurement;
use crate::error::Error;
use bincode::{deserialize_from, serialize_into};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::to_writer;
use statrs::statistics::Statistics;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Input matrix and targets handed to a trainer.
/// One row per accepted measurement, one column per SNP, stored row major.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct TrainingSet {
    x: Vec<f64>,
    num_samples: usize,
    num_snps: usize,
    snp_names: Vec<String>,
    sample_ids: Vec<String>,
    labels: Vec<String>,
    means: Vec<f64>,
    stds: Vec<f64>,
    standardized: bool,
}

impl TrainingSet {
    /// Fails if any measurement has a different number of SNP values than there are SNP columns.
    pub fn from_measurements(
        measurements: &[Measurement],
        snp_names: &[String],
    ) -> Result<Self, Error> {
        if measurements.is_empty() {
            return Err(Error::NoAcceptedMeasurements);
        }
        let num_snps = snp_names.len();
        let num_samples = measurements.len();
        let mut x = Vec::with_capacity(num_samples * num_snps);
        for m in measurements {
            if m.snp_values().len() != num_snps {
                return Err(Error::Shape {
                    sample_id: m.sample_id().to_owned(),
                    expected: num_snps,
                    found: m.snp_values().len(),
                });
            }
            x.extend_from_slice(m.snp_values());
        }

        let mut means = Vec::with_capacity(num_snps);
        let mut stds = Vec::with_capacity(num_snps);
        for col_ix in 0..num_snps {
            let col = (0..num_samples)
                .map(|row_ix| x[row_ix * num_snps + col_ix])
                .collect::<Vec<f64>>();
            means.push((&col).mean());
            stds.push((&col).population_std_dev());
        }

        info!(
            "Built training set: {} samples x {} SNPs",
            num_samples, num_snps
        );

        Ok(Self {
            x,
            num_samples,
            num_snps,
            snp_names: snp_names.to_vec(),
            sample_ids: measurements
                .iter()
                .map(|m| m.sample_id().to_owned())
                .collect(),
            labels: measurements
                .iter()
                .map(|m| m.predicted_group().to_owned())
                .collect(),
            means,
            stds,
            standardized: false,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let mut r = BufReader::new(File::open(path)?);
        Ok(deserialize_from(&mut r)?)
    }

    pub fn to_file(&self, path: &Path) -> Result<(), Error> {
        info!("Creating: {:?}", path);
        let mut f = BufWriter::new(File::create(path)?);
        serialize_into(&mut f, self)?;
        f.flush()?;
        Ok(())
    }

    pub fn to_json(&self, path: &Path) -> Result<(), Error> {
        info!("Creating: {:?}", path);
        to_writer(File::create(path)?, self)?;
        Ok(())
    }

    /// Writes sample ids, the SNP matrix and the group labels as csv.
    pub fn write_csv(&self, path: &Path) -> Result<(), Error> {
        info!("Creating: {:?}", path);
        let mut wtr = csv::Writer::from_path(path)?;
        let mut header = vec!["sample_id".to_owned()];
        header.extend(self.snp_names.iter().cloned());
        header.push("group".to_owned());
        wtr.write_record(&header)?;
        for row_ix in 0..self.num_samples {
            let mut record = vec![self.sample_ids[row_ix].clone()];
            record.extend(self.row(row_ix).iter().map(|e| e.to_string()));
            record.push(self.labels[row_ix].clone());
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_snps(&self) -> usize {
        self.num_snps
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn row(&self, row_ix: usize) -> &[f64] {
        &self.x[row_ix * self.num_snps..(row_ix + 1) * self.num_snps]
    }

    pub fn snp_names(&self) -> &[String] {
        &self.snp_names
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Group labels as numbers, in row order.
    pub fn targets(&self) -> Result<Vec<f64>, Error> {
        self.labels
            .iter()
            .map(|l| {
                l.parse::<f64>()
                    .map_err(|_| Error::NonNumericTarget(l.to_owned()))
            })
            .collect()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    pub fn is_standardized(&self) -> bool {
        self.standardized
    }

    /// Centers every SNP column and scales it to unit variance.
    /// Columns without variance are only centered.
    pub fn standardize(&mut self) {
        if self.standardized {
            return;
        }
        for row_ix in 0..self.num_samples {
            for col_ix in 0..self.num_snps {
                let val = &mut self.x[row_ix * self.num_snps + col_ix];
                *val -= self.means[col_ix];
                if self.stds[col_ix] > 0.0 {
                    *val /= self.stds[col_ix];
                }
            }
        }
        debug!(
            "Standardized {} SNP columns, {} without variance",
            self.num_snps,
            self.stds.iter().filter(|s| **s == 0.0).count()
        );
        self.standardized = true;
    }
}
