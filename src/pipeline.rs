use crate::data::{
    training_set::TrainingSet,
    validate::{Partition, Validator},
};
use crate::error::Error;
use crate::io::{
    loader::load_lines,
    record::build_candidates,
    schema::{ColumnSchema, DEFAULT_END_MARKER},
};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PipelineCfg {
    end_marker: String,
    cutoff: f64,
}

impl PipelineCfg {
    /// Name of the header column that ends the SNP region.
    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    /// Minimal acceptable highest group probability.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            end_marker: DEFAULT_END_MARKER.to_owned(),
            cutoff: 0.0,
        }
    }
}

pub struct PipelineCfgBuilder {
    end_marker: String,
    cutoff: f64,
}

impl Default for PipelineCfgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineCfgBuilder {
    pub fn new() -> Self {
        Self {
            end_marker: DEFAULT_END_MARKER.to_owned(),
            cutoff: 0.0,
        }
    }

    pub fn with_end_marker(mut self, end_marker: &str) -> Self {
        self.end_marker = end_marker.to_owned();
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Fails on a NaN or infinite cutoff, which no probability could be compared against.
    pub fn build(self) -> Result<PipelineCfg, Error> {
        if !self.cutoff.is_finite() {
            return Err(Error::InvalidCutoff(self.cutoff));
        }
        Ok(PipelineCfg {
            end_marker: self.end_marker,
            cutoff: self.cutoff,
        })
    }
}

/// Result of one pipeline run over a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub schema: ColumnSchema,
    pub partition: Partition,
}

impl ParsedFile {
    /// Matrix and targets for the trainer. Fails on ragged rows.
    pub fn training_set(&self) -> Result<TrainingSet, Error> {
        TrainingSet::from_measurements(&self.partition.accepted, self.schema.snp_names())
    }
}

/// Runs the pipeline over lines already in memory. The first line is the header.
pub fn run_lines(lines: &[String], cfg: &PipelineCfg) -> Result<ParsedFile, Error> {
    let header = lines.first().ok_or(Error::EmptyInput)?;
    let schema = ColumnSchema::resolve(header, cfg.end_marker())?;
    let candidates = build_candidates(lines, &schema);
    info!("Built {} candidate measurements", candidates.len());
    let partition = Validator::new(cfg.cutoff()).partition(candidates);
    Ok(ParsedFile { schema, partition })
}

/// Loads and parses a SPSS/PASW export.
pub fn run(path: &Path, cfg: &PipelineCfg) -> Result<ParsedFile, Error> {
    info!("Parsing: {:?}", path);
    run_lines(&load_lines(path)?, cfg)
}
