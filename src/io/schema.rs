use crate::error::Error;
use crate::io::loader::strip_line_terminator;
use log::{debug, info};
use serde::Serialize;

pub const DELIMITER: char = '\t';
pub const SAMPLE_ID_COLUMN: usize = 0;
pub const SNP_REGION_START: usize = 1;
/// Name of the column that closes the SNP region in SPSS/PASW exports.
pub const DEFAULT_END_MARKER: &str = "Skincolour";
pub const GROUP_COLUMN: &str = "Dis_1";
pub const PROBABILITY_COLUMNS: [&str; 4] = ["Dis1_1", "Dis2_1", "Dis3_1", "Dis4_1"];
pub const OPTIONAL_PROBABILITY_COLUMN: &str = "Dis5_1";

/// Positions of the semantic columns of an SPSS/PASW discriminant analysis export.
///
/// Resolved once per file from its header line and used for every data line.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    snp_region_start: usize,
    snp_region_end: usize,
    predicted_group: usize,
    probabilities: Vec<usize>,
    snp_names: Vec<String>,
}

fn column_ix(fields: &[&str], name: &str) -> Result<usize, Error> {
    fields
        .iter()
        .position(|f| *f == name)
        .ok_or_else(|| Error::MissingColumn(name.to_owned()))
}

impl ColumnSchema {
    pub fn resolve(header: &str, end_marker: &str) -> Result<Self, Error> {
        let fields = strip_line_terminator(header)
            .split(DELIMITER)
            .collect::<Vec<&str>>();

        let snp_region_end = column_ix(&fields, end_marker)?;
        if snp_region_end < SNP_REGION_START {
            return Err(Error::InvalidEndMarker(end_marker.to_owned()));
        }
        let predicted_group = column_ix(&fields, GROUP_COLUMN)?;
        let mut probabilities = PROBABILITY_COLUMNS
            .iter()
            .map(|name| column_ix(&fields, name))
            .collect::<Result<Vec<usize>, Error>>()?;
        if let Ok(ix) = column_ix(&fields, OPTIONAL_PROBABILITY_COLUMN) {
            debug!("Found fifth probability column at {}", ix);
            probabilities.push(ix);
        }

        let snp_names = fields[SNP_REGION_START..snp_region_end]
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<String>>();

        info!(
            "Resolved header: {} SNP columns, {} probability columns",
            snp_names.len(),
            probabilities.len()
        );

        Ok(Self {
            snp_region_start: SNP_REGION_START,
            snp_region_end,
            predicted_group,
            probabilities,
            snp_names,
        })
    }

    pub fn snp_region_start(&self) -> usize {
        self.snp_region_start
    }

    /// Index of the end marker column, exclusive bound of the SNP region.
    pub fn snp_region_end(&self) -> usize {
        self.snp_region_end
    }

    pub fn predicted_group(&self) -> usize {
        self.predicted_group
    }

    pub fn probabilities(&self) -> &[usize] {
        &self.probabilities
    }

    pub fn num_probabilities(&self) -> usize {
        self.probabilities.len()
    }

    pub fn snp_names(&self) -> &[String] {
        &self.snp_names
    }

    pub fn num_snps(&self) -> usize {
        self.snp_region_end - self.snp_region_start
    }
}
