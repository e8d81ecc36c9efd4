use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a simulated sensor.
///
/// The declaration order is the column order used in generated rows
/// and in the CSV output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensorKind {
	Temp,
	Pressure,
	Vibration,
}

impl SensorKind {
	/// All sensors, in column order.
	pub const ALL: [SensorKind; 3] = [SensorKind::Temp, SensorKind::Pressure, SensorKind::Vibration];

	/// Column name of the sensor (`temp`, `pressure`, `vibration`).
	pub fn name(&self) -> &'static str {
		match self {
			SensorKind::Temp => "temp",
			SensorKind::Pressure => "pressure",
			SensorKind::Vibration => "vibration",
		}
	}
}

impl fmt::Display for SensorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for SensorKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"temp" => Ok(SensorKind::Temp),
			"pressure" => Ok(SensorKind::Pressure),
			"vibration" => Ok(SensorKind::Vibration),
			other => Err(format!("Unknown sensor: {}", other)),
		}
	}
}

/// Inclusive value interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
	pub min: f64,
	pub max: f64,
}

impl ValueRange {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Returns `true` if `value` lies within the interval, bounds included.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value <= self.max
	}
}

/// Value ranges and formatting of a single sensor.
///
/// # Invariants
/// Checked by `SensorTable::new`:
/// - Every bound is finite and every range satisfies `min <= max`
/// - Every bound is unchanged by rounding to `precision` decimals, so a
///   rounded sample never leaves the range it was drawn from
#[derive(Clone, Debug, PartialEq)]
pub struct SensorSpec {
	/// Healthy operating interval.
	pub normal: ValueRange,

	/// High-side fault interval.
	pub abnormal_high: ValueRange,

	/// Low-side fault interval.
	pub abnormal_low: ValueRange,

	/// Number of decimals kept after sampling.
	pub precision: u32,
}

impl SensorSpec {
	/// Rounds `value` to the sensor precision.
	pub fn round(&self, value: f64) -> f64 {
		let factor = 10f64.powi(self.precision as i32);
		(value * factor).round() / factor
	}

	/// Returns `true` if `value` falls in either abnormal interval.
	pub fn is_abnormal(&self, value: f64) -> bool {
		self.abnormal_high.contains(value) || self.abnormal_low.contains(value)
	}
}

/// Immutable lookup table from sensor to its specification.
///
/// Built once at startup; the generator only ever reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorTable {
	specs: BTreeMap<SensorKind, SensorSpec>,
}

impl SensorTable {
	/// Builds a table from explicit specifications.
	///
	/// # Errors
	/// Returns an error if a sensor is missing, a bound is not finite, a
	/// range is inverted, or a bound has more decimals than the precision.
	pub fn new(specs: BTreeMap<SensorKind, SensorSpec>) -> Result<Self, String> {
		for kind in SensorKind::ALL {
			let spec = specs.get(&kind).ok_or_else(|| format!("Missing specification for sensor {}", kind))?;
			for range in [spec.normal, spec.abnormal_high, spec.abnormal_low] {
				if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
					return Err(format!("Invalid range [{}, {}] for sensor {}", range.min, range.max, kind));
				}
				for bound in [range.min, range.max] {
					if spec.round(bound) != bound {
						return Err(format!(
							"Bound {} of sensor {} has more than {} decimals",
							bound, kind, spec.precision
						));
					}
				}
			}
		}
		Ok(Self { specs })
	}

	/// Returns the specification of `kind`.
	pub fn get(&self, kind: SensorKind) -> &SensorSpec {
		// Every kind is checked in `new` and present in `default`
		&self.specs[&kind]
	}
}

impl Default for SensorTable {
	fn default() -> Self {
		let mut specs = BTreeMap::new();
		specs.insert(SensorKind::Temp, SensorSpec {
			normal: ValueRange::new(45.0, 50.0),
			abnormal_high: ValueRange::new(52.0, 60.0),
			abnormal_low: ValueRange::new(35.0, 43.0),
			precision: 1,
		});
		specs.insert(SensorKind::Pressure, SensorSpec {
			normal: ValueRange::new(1.00, 1.05),
			abnormal_high: ValueRange::new(1.08, 1.15),
			abnormal_low: ValueRange::new(0.90, 0.97),
			precision: 2,
		});
		specs.insert(SensorKind::Vibration, SensorSpec {
			normal: ValueRange::new(0.02, 0.04),
			abnormal_high: ValueRange::new(0.07, 0.12),
			abnormal_low: ValueRange::new(0.001, 0.015),
			precision: 3,
		});
		Self { specs }
	}
}
