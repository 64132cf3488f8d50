use clap::{Args, Parser, Subcommand};
use log::info;
use pasw_ann::error::Error;
use pasw_ann::io::schema::DEFAULT_END_MARKER;
use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;
use std::{fs::File, path::Path};

/// Parse SPSS/PASW tab-delimited output and prepare it for ANN training.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub(crate) cmd: SubCmd,
}

#[derive(Subcommand)]
pub(crate) enum SubCmd {
    /// Parse, validate and filter measurements, write the training set
    Prepare(PrepareArgs),
    /// Print the column layout resolved from a file's header as json
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub(crate) struct PrepareArgs {
    /// name of the SPSS/PASW output-file
    pub trainfile: String,

    /// name of the file with SNPs in unknown groups, same format as the SPSS/PASW output-file.
    /// Only checked for readability.
    pub testfile: Option<String>,

    /// path to output dir. Will be created if it does not exist
    #[clap(short, long)]
    pub outdir: String,

    /// cut-off probability - measurements with highest probability < p will not be included
    #[clap(short, long = "cutoff", default_value_t = 0.0)]
    pub p: f64,

    /// name of the header column that ends the SNP region
    #[clap(short = 'm', long, default_value_t = String::from(DEFAULT_END_MARKER))]
    pub end_marker: String,

    /// standardize SNP columns in the training set
    #[clap(short, long)]
    pub standardize: bool,

    /// also write the training set as json
    #[clap(short, long)]
    pub json_data: bool,

    /// enable debug prints
    #[clap(short, long)]
    pub debug: bool,
}

impl PrepareArgs {
    pub fn to_file(&self, path: &Path) -> Result<(), Error> {
        info!("Creating: {:?}", path);
        to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub(crate) struct SchemaArgs {
    /// name of the SPSS/PASW output-file
    pub file: String,

    /// name of the header column that ends the SNP region
    #[clap(short = 'm', long, default_value_t = String::from(DEFAULT_END_MARKER))]
    pub end_marker: String,

    /// enable debug prints
    #[clap(short, long)]
    pub debug: bool,
}
