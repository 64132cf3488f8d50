use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Can't seem to find the file: {0:?}")]
    ResourceNotFound(PathBuf),
    #[error("Failed to open or read the file: {path:?}")]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Input file is empty, no header line found")]
    EmptyInput,
    #[error("Header is missing required column '{0}'")]
    MissingColumn(String),
    #[error("End-of-region marker '{0}' must come after the sample id column")]
    InvalidEndMarker(String),
    #[error("Failed to convert '{0}' to a number")]
    Format(String),
    #[error("Sample {sample_id} has {found} SNP values, expected {expected}")]
    Shape {
        sample_id: String,
        expected: usize,
        found: usize,
    },
    #[error("Cut-off probability must be a finite number, got {0}")]
    InvalidCutoff(f64),
    #[error("No measurements were accepted, nothing to hand off")]
    NoAcceptedMeasurements,
    #[error("Group label '{0}' is not numeric and can't be used as a target")]
    NonNumericTarget(String),
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("Failed to (de)serialize binary data")]
    Bincode(#[from] bincode::Error),
    #[error("Failed to (de)serialize json data")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write csv data")]
    Csv(#[from] csv::Error),
}
