use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;
use log::{LevelFilter, info};

use sensor_gen_core::io::write_csv;
use sensor_gen_core::model::generation_input::{
    DEFAULT_ABNORMAL_PROB, DEFAULT_NORMAL_LABEL_PROB, DEFAULT_NORMAL_PROB, DEFAULT_NULL_PROB, DEFAULT_NUM_ROWS,
    GenerationInput,
};
use sensor_gen_core::model::generator::{Generator, generate_dataset_parallel};
use sensor_gen_core::model::row::TIMESTAMP_FORMAT;
use sensor_gen_core::model::sensor::SensorTable;
use sensor_gen_core::model::statistics::compute_statistics;

/// Sensor dataset generator: writes labeled temperature, pressure and
/// vibration readings to a CSV file
#[derive(Parser, Debug)]
#[command(name = "sensor-gen", version, about, long_about = None)]
struct Cli {
    /// Number of rows to generate
    #[arg(short = 'n', long = "num_rows", default_value_t = DEFAULT_NUM_ROWS)]
    num_rows: usize,

    /// Output CSV file
    #[arg(short, long, default_value = "testing.csv")]
    output: PathBuf,

    /// Probability that each sensor of a normal row is in its normal range
    #[arg(long = "normal_prob", default_value_t = DEFAULT_NORMAL_PROB)]
    normal_prob: f64,

    /// Probability that each sensor of an abnormal row is in its normal range
    #[arg(long = "abnormal_prob", default_value_t = DEFAULT_ABNORMAL_PROB)]
    abnormal_prob: f64,

    /// Probability that a sensor value is left empty
    #[arg(long = "null_prob", default_value_t = DEFAULT_NULL_PROB)]
    null_prob: f64,

    /// Probability that a row is labeled normal
    #[arg(long = "normal_label_prob", default_value_t = DEFAULT_NORMAL_LABEL_PROB)]
    normal_label_prob: f64,

    /// Timestamp of the first row (YYYY-MM-DD HH:MM:SS)
    #[arg(long = "start_time", value_parser = parse_timestamp)]
    start_time: Option<NaiveDateTime>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Generate rows on all CPU cores
    #[arg(long)]
    parallel: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD HH:MM:SS: {}", e))
}

impl Cli {
    /// Builds the generation input, validating every probability.
    fn generation_input(&self) -> Result<GenerationInput, String> {
        let mut input = GenerationInput::new(self.num_rows);
        input.set_probabilities(self.normal_prob, self.abnormal_prob, self.null_prob)?;
        input.set_normal_label_prob(self.normal_label_prob)?;
        if let Some(start_time) = self.start_time {
            input.start_time = start_time;
        }
        input.seed = self.seed;
        Ok(input)
    }

    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over the command line flags
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let input = cli.generation_input()?;
    let table = SensorTable::default();

    println!("Generating {} sensor rows...", input.num_rows);
    let dataset = if cli.parallel {
        generate_dataset_parallel(&table, &input)
    } else {
        Generator::from_seed(table, input.seed).generate_dataset(&input)
    };
    info!("Generated {} rows", dataset.len());

    write_csv(&cli.output, &dataset)?;
    println!("Data saved to: {}", cli.output.display());

    print!("{}", compute_statistics(&dataset, &input));

    Ok(())
}
