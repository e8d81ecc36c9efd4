use std::cmp::min;
use std::sync::mpsc;
use std::thread;

use chrono::Duration;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::generation_input::GenerationInput;
use crate::model::row::{Dataset, Label, Row};
use crate::model::sensor::{SensorKind, SensorTable};

/// Number of rows generated from one random stream by the parallel path.
///
/// Fixed so that a seeded run produces the same rows on every machine,
/// whatever its CPU count.
pub const CHUNK_ROWS: usize = 1024;

/// Dataset generator driven by a sensor table and an injected random source.
///
/// # Responsibilities
/// - Sample sensor values from the normal or abnormal ranges of the table
/// - Draw row labels and missing-value decisions
/// - Build whole datasets, sequentially or across worker threads
///
/// Every row is independent of the others; the only state carried between
/// calls is the random source.
#[derive(Debug)]
pub struct Generator<R: Rng> {
	table: SensorTable,
	rng: R,
}

impl Generator<StdRng> {
	/// Creates a generator backed by `StdRng`.
	///
	/// With `Some(seed)` the output is reproducible; with `None` the
	/// random source is seeded from the operating system.
	pub fn from_seed(table: SensorTable, seed: Option<u64>) -> Self {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self::new(table, rng)
	}
}

impl<R: Rng> Generator<R> {
	/// Creates a generator from a sensor table and a random source.
	pub fn new(table: SensorTable, rng: R) -> Self {
		Self { table, rng }
	}

	/// Samples one reading for `kind`.
	///
	/// # Parameters
	/// - `label`: label of the row the reading belongs to
	/// - `normal_prob`: in-normal-range probability when `label` is `normal`
	/// - `abnormal_prob`: in-normal-range probability when `label` is `abnormal`
	///
	/// # Behavior
	/// - With the selected probability, samples uniformly from the normal range.
	/// - Otherwise a fair coin picks the abnormal-high or abnormal-low range,
	///   which is then sampled uniformly.
	/// - The result is rounded to the sensor precision.
	pub fn sample_sensor_value(&mut self, kind: SensorKind, label: Label, normal_prob: f64, abnormal_prob: f64) -> f64 {
		let spec = self.table.get(kind);

		let prob_in_normal = match label {
			Label::Normal => normal_prob,
			Label::Abnormal => abnormal_prob,
		};

		let range = if self.rng.random::<f64>() < prob_in_normal {
			spec.normal
		} else if self.rng.random_bool(0.5) {
			spec.abnormal_high
		} else {
			spec.abnormal_low
		};

		let value = self.rng.random_range(range.min..=range.max);
		spec.round(value)
	}

	/// Generates the row at `index`.
	///
	/// # Behavior
	/// - Timestamp is `input.start_time` plus `index` minutes.
	/// - Label is `normal` with probability `input.normal_label_prob()`.
	/// - Each sensor, in column order, is missing with probability
	///   `input.null_prob()`, sampled otherwise.
	pub fn generate_row(&mut self, index: usize, input: &GenerationInput) -> Row {
		let timestamp = input.start_time + Duration::minutes(index as i64);

		let label = if self.rng.random::<f64>() < input.normal_label_prob() {
			Label::Normal
		} else {
			Label::Abnormal
		};

		let mut values = [None; 3];
		for (slot, kind) in values.iter_mut().zip(SensorKind::ALL) {
			if self.rng.random::<f64>() >= input.null_prob() {
				*slot = Some(self.sample_sensor_value(kind, label, input.normal_prob(), input.abnormal_prob()));
			}
		}
		let [temp, pressure, vibration] = values;

		Row { timestamp, label, temp, pressure, vibration }
	}

	/// Generates `input.num_rows` rows, in index order.
	pub fn generate_dataset(&mut self, input: &GenerationInput) -> Dataset {
		debug!(
			"Generating {} rows (normal_prob={}, abnormal_prob={}, null_prob={})",
			input.num_rows,
			input.normal_prob(),
			input.abnormal_prob(),
			input.null_prob()
		);
		(0..input.num_rows).map(|index| self.generate_row(index, input)).collect()
	}
}

/// Generates `input.num_rows` rows across worker threads.
///
/// # Behavior
/// - Indices are split into chunks of `CHUNK_ROWS` rows.
/// - Chunk `c` is generated from its own `StdRng`, seeded with the `c`-th
///   value drawn from a `StdRng` seeded with `base_seed` (`input.seed` or a
///   random value). Different base seeds share no chunk stream.
/// - Chunks are distributed over `num_cpus` workers and reassembled in
///   index order.
///
/// # Notes
/// - For a given seed the output does not depend on the worker count, but it
///   differs from the sequential `Generator::generate_dataset` output.
pub fn generate_dataset_parallel(table: &SensorTable, input: &GenerationInput) -> Dataset {
	let base_seed = input.seed.unwrap_or_else(|| rand::rng().random());
	let chunks = input.num_rows.div_ceil(CHUNK_ROWS);
	let workers = num_cpus::get().clamp(1, chunks.max(1));

	let mut seeder = StdRng::seed_from_u64(base_seed);
	let chunk_seeds: Vec<u64> = (0..chunks).map(|_| seeder.random()).collect();
	let chunk_seeds = &chunk_seeds;

	debug!("Generating {} rows in {} chunks on {} workers", input.num_rows, chunks, workers);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for worker in 0..workers {
			let tx = tx.clone();
			scope.spawn(move || {
				for chunk in (worker..chunks).step_by(workers) {
					let start = chunk * CHUNK_ROWS;
					let end = min(start + CHUNK_ROWS, input.num_rows);
					let rng = StdRng::seed_from_u64(chunk_seeds[chunk]);
					let mut generator = Generator::new(table.clone(), rng);
					let rows: Vec<Row> = (start..end).map(|index| generator.generate_row(index, input)).collect();
					if tx.send((chunk, rows)).is_err() {
						break;
					}
				}
			});
		}
	});
	drop(tx);

	let mut parts: Vec<(usize, Vec<Row>)> = rx.iter().collect();
	parts.sort_by_key(|(chunk, _)| *chunk);
	parts.into_iter().flat_map(|(_, rows)| rows).collect()
}
