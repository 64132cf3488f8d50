mod cli;

use clap::Parser;
use cli::cli::{Cli, PrepareArgs, SchemaArgs, SubCmd};
use log::{error, info};
use pasw_ann::data::summary::PartitionSummary;
use pasw_ann::error::Error;
use pasw_ann::io::{loader, schema::ColumnSchema};
use pasw_ann::pipeline::{self, PipelineCfgBuilder};
use std::path::Path;

fn main() {
    let res = match Cli::parse().cmd {
        SubCmd::Prepare(args) => {
            init_logger(args.debug, log::Level::Info);
            prepare(args)
        }
        SubCmd::Schema(args) => {
            init_logger(args.debug, log::Level::Warn);
            schema(args)
        }
    };
    if let Err(e) = res {
        error!("{}", e);
        if let Some(source) = std::error::Error::source(&e) {
            error!("Caused by: {}", source);
        }
        std::process::exit(exit_code(&e));
    }
}

fn init_logger(debug: bool, default_level: log::Level) {
    let level = if debug {
        log::Level::Debug
    } else {
        default_level
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

fn exit_code(e: &Error) -> exitcode::ExitCode {
    match e {
        Error::ResourceNotFound(_) | Error::Resource { .. } => exitcode::NOINPUT,
        Error::EmptyInput
        | Error::MissingColumn(_)
        | Error::InvalidEndMarker(_)
        | Error::Format(_)
        | Error::Shape { .. }
        | Error::NoAcceptedMeasurements
        | Error::NonNumericTarget(_) => exitcode::DATAERR,
        Error::InvalidCutoff(_) => exitcode::USAGE,
        Error::Io(_) | Error::Csv(_) => exitcode::IOERR,
        // serializers report failed writes through their own error types
        Error::Json(e) if e.is_io() => exitcode::IOERR,
        Error::Bincode(e) if matches!(**e, bincode::ErrorKind::Io(_)) => exitcode::IOERR,
        Error::Bincode(_) | Error::Json(_) => exitcode::SOFTWARE,
    }
}

fn prepare(args: PrepareArgs) -> Result<(), Error> {
    let cfg = PipelineCfgBuilder::new()
        .with_cutoff(args.p)
        .with_end_marker(&args.end_marker)
        .build()?;
    let outdir = Path::new(&args.outdir);
    if !outdir.exists() {
        std::fs::create_dir_all(outdir)?;
    }

    if let Some(testfile) = &args.testfile {
        let n = loader::num_lines(Path::new(testfile))?;
        info!("Test file {:?} has {} lines, not used for training", testfile, n);
    }

    let parsed = pipeline::run(Path::new(&args.trainfile), &cfg)?;

    parsed
        .partition
        .rejections_to_csv(&outdir.join("rejected.csv"))?;
    PartitionSummary::from_partition(&parsed.partition).to_file(&outdir.join("summary.json"))?;

    let mut train_set = parsed.training_set()?;
    if args.standardize {
        train_set.standardize();
    }
    train_set.to_file(&outdir.join("train.bin"))?;
    train_set.write_csv(&outdir.join("train.csv"))?;
    if args.json_data {
        train_set.to_json(&outdir.join("train.json"))?;
    }

    args.to_file(&outdir.join("args.json"))
}

fn schema(args: SchemaArgs) -> Result<(), Error> {
    let lines = loader::load_lines(Path::new(&args.file))?;
    let header = lines.first().ok_or(Error::EmptyInput)?;
    let schema = ColumnSchema::resolve(header, &args.end_marker)?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
