use chrono::{NaiveDate, NaiveDateTime};

/// Default number of generated rows.
pub const DEFAULT_NUM_ROWS: usize = 300;

/// Default in-normal-range probability for rows labeled `normal`.
pub const DEFAULT_NORMAL_PROB: f64 = 0.95;

/// Default in-normal-range probability for rows labeled `abnormal`.
pub const DEFAULT_ABNORMAL_PROB: f64 = 0.3;

/// Default probability of leaving a sensor field empty.
pub const DEFAULT_NULL_PROB: f64 = 0.05;

/// Default probability of labeling a row `normal`.
pub const DEFAULT_NORMAL_LABEL_PROB: f64 = 0.7;

/// Timestamp of the first row unless configured otherwise: 2024-06-03 19:00:00.
pub fn default_start_time() -> NaiveDateTime {
	// Constant date, cannot fail
	NaiveDate::from_ymd_opt(2024, 6, 3)
		.and_then(|date| date.and_hms_opt(19, 0, 0))
		.expect("valid default start time")
}

/// Input parameters for generating a dataset.
///
/// `GenerationInput` holds both plain **configuration parameters** (row count,
/// start time, seed) and **validated probabilities** that can only be changed
/// through their setters.
///
/// # Invariants
/// - Every probability lies in `[0.0, 1.0]` (NaN is rejected)
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Number of rows to generate.
	pub num_rows: usize,

	/// Timestamp of row 0; row `i` is stamped `start_time + i` minutes.
	pub start_time: NaiveDateTime,

	/// Seed of the random source. `None` seeds from OS entropy.
	pub seed: Option<u64>,

	/// Probability that a sensor of a `normal` row is drawn from its normal range.
	normal_prob: f64,

	/// Probability that a sensor of an `abnormal` row is drawn from its normal range.
	abnormal_prob: f64,

	/// Probability that a sensor field is left missing.
	null_prob: f64,

	/// Probability that a row is labeled `normal`.
	normal_label_prob: f64,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self::new(DEFAULT_NUM_ROWS)
	}
}

impl GenerationInput {
	/// Creates an input for `num_rows` rows with default probabilities.
	pub fn new(num_rows: usize) -> Self {
		Self {
			num_rows,
			start_time: default_start_time(),
			seed: None,
			normal_prob: DEFAULT_NORMAL_PROB,
			abnormal_prob: DEFAULT_ABNORMAL_PROB,
			null_prob: DEFAULT_NULL_PROB,
			normal_label_prob: DEFAULT_NORMAL_LABEL_PROB,
		}
	}

	/// Checks that `value` is a probability.
	fn check_probability(name: &str, value: f64) -> Result<f64, String> {
		if !(0.0..=1.0).contains(&value) {
			return Err(format!("{} must be between 0.0 and 1.0, got {}", name, value));
		}
		Ok(value)
	}

	pub fn normal_prob(&self) -> f64 {
		self.normal_prob
	}

	pub fn abnormal_prob(&self) -> f64 {
		self.abnormal_prob
	}

	pub fn null_prob(&self) -> f64 {
		self.null_prob
	}

	pub fn normal_label_prob(&self) -> f64 {
		self.normal_label_prob
	}

	/// Sets the in-normal-range probability used for `normal` rows.
	///
	/// # Errors
	/// Returns an error if the value is outside `[0.0, 1.0]`.
	pub fn set_normal_prob(&mut self, normal_prob: f64) -> Result<(), String> {
		self.normal_prob = Self::check_probability("normal_prob", normal_prob)?;
		Ok(())
	}

	/// Sets the in-normal-range probability used for `abnormal` rows.
	///
	/// # Errors
	/// Returns an error if the value is outside `[0.0, 1.0]`.
	pub fn set_abnormal_prob(&mut self, abnormal_prob: f64) -> Result<(), String> {
		self.abnormal_prob = Self::check_probability("abnormal_prob", abnormal_prob)?;
		Ok(())
	}

	/// Sets the missing-value probability.
	///
	/// # Errors
	/// Returns an error if the value is outside `[0.0, 1.0]`.
	pub fn set_null_prob(&mut self, null_prob: f64) -> Result<(), String> {
		self.null_prob = Self::check_probability("null_prob", null_prob)?;
		Ok(())
	}

	/// Sets the probability of labeling a row `normal`.
	///
	/// # Errors
	/// Returns an error if the value is outside `[0.0, 1.0]`.
	pub fn set_normal_label_prob(&mut self, normal_label_prob: f64) -> Result<(), String> {
		self.normal_label_prob = Self::check_probability("normal_label_prob", normal_label_prob)?;
		Ok(())
	}

	/// Sets the three sensor probabilities at once.
	///
	/// Nothing is changed if any of them is invalid.
	pub fn set_probabilities(&mut self, normal_prob: f64, abnormal_prob: f64, null_prob: f64) -> Result<(), String> {
		let normal_prob = Self::check_probability("normal_prob", normal_prob)?;
		let abnormal_prob = Self::check_probability("abnormal_prob", abnormal_prob)?;
		let null_prob = Self::check_probability("null_prob", null_prob)?;
		self.normal_prob = normal_prob;
		self.abnormal_prob = abnormal_prob;
		self.null_prob = null_prob;
		Ok(())
	}
}
