use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use sompro::api::{classify_to_path, train_from_path};
use sompro::io::model::{dump_model, dump_model_to_path, load_model_auto};
use sompro::{InitStrategy, SomParams};

use super::args::{CliArgs, Mode};
use super::errors::AppError;

fn require(path: Option<PathBuf>, arg: &str) -> Result<PathBuf, AppError> {
    path.ok_or(AppError::MissingArgument { arg: arg.to_string() })
}

/// Parses per-axis values such as "8x8" or "4x4x4".
fn parse_axes<T: std::str::FromStr>(value: &str) -> Option<Vec<T>> {
    value.split('x').map(|axis| axis.trim().parse::<T>().ok()).collect()
}

fn parse_init_vector(value: &str) -> Option<Vec<f64>> {
    value.split(',').map(|component| component.trim().parse::<f64>().ok()).collect()
}

fn build_params(args: &CliArgs) -> Result<SomParams, AppError> {
    let map_size: Vec<usize> =
        parse_axes(&args.map_size).ok_or(AppError::InvalidMapSize { value: args.map_size.clone() })?;
    let initial_radius: Vec<u32> =
        parse_axes(&args.radius).ok_or(AppError::InvalidRadius { value: args.radius.clone() })?;

    let init = match &args.init_vector {
        Some(value) => InitStrategy::Constant(
            parse_init_vector(value)
                .ok_or(AppError::InvalidInitVector { value: value.clone() })?,
        ),
        None => InitStrategy::Random { min_weight: args.min_weight, max_weight: args.max_weight },
    };

    Ok(SomParams {
        map_size,
        initial_radius,
        iterations: args.iterations,
        beta_init: args.beta_init,
        beta_end: args.beta_end,
        init,
        seed: args.seed,
        wrap: args.wrap,
        missing: args.missing,
    })
}

fn run_train(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = require(args.input.clone(), "--input")?;
    let output = require(args.output.clone(), "--output")?;
    let params = build_params(&args)?;

    info!("Training SOM {:?} from {:?}", params.map_size, input);
    train_from_path(&input, &output, &params, args.metadata)?;
    info!("Model written to {:?}", output);
    Ok(())
}

fn run_classify(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = require(args.model.clone(), "--model")?;
    let input = require(args.input.clone(), "--input")?;
    let output = require(args.output.clone(), "--output")?;

    let count = classify_to_path(&model, &input, &output, args.missing)?;
    info!("Wrote {} labels to {:?}", count, output);
    Ok(())
}

fn run_dump(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = require(args.model.clone(), "--model")?;
    let map = load_model_auto(&model)?;

    match args.output {
        Some(output) => {
            dump_model_to_path(&map, &output)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            dump_model(&map, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    match args.mode {
        Mode::Train => run_train(args),
        Mode::Classify => run_classify(args),
        Mode::Dump => run_dump(args),
    }
}
