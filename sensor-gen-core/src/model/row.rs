use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::sensor::SensorKind;

/// Timestamp layout used in generated files and reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ground-truth tag of a row.
///
/// The label is drawn independently of the values sampled for the row.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Label {
	Normal,
	Abnormal,
}

impl Label {
	pub const ALL: [Label; 2] = [Label::Normal, Label::Abnormal];

	pub fn as_str(&self) -> &'static str {
		match self {
			Label::Normal => "normal",
			Label::Abnormal => "abnormal",
		}
	}
}

impl fmt::Display for Label {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One generated record.
///
/// Field order matches the CSV columns. A `None` sensor value is a
/// missing reading and is written as an empty field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Row {
	#[serde(with = "timestamp_format")]
	pub timestamp: NaiveDateTime,
	pub label: Label,
	pub temp: Option<f64>,
	pub pressure: Option<f64>,
	pub vibration: Option<f64>,
}

impl Row {
	/// Returns the reading of `kind`, `None` when missing.
	pub fn value(&self, kind: SensorKind) -> Option<f64> {
		match kind {
			SensorKind::Temp => self.temp,
			SensorKind::Pressure => self.pressure,
			SensorKind::Vibration => self.vibration,
		}
	}

	/// Iterates over `(kind, value)` pairs in column order.
	pub fn values(&self) -> impl Iterator<Item = (SensorKind, Option<f64>)> + '_ {
		SensorKind::ALL.into_iter().map(|kind| (kind, self.value(kind)))
	}
}

/// Ordered sequence of rows, index `i` holding the row generated for index `i`.
pub type Dataset = Vec<Row>;

/// (De)serializes a `NaiveDateTime` as `YYYY-MM-DD HH:MM:SS`.
mod timestamp_format {
	use chrono::NaiveDateTime;
	use serde::{Deserialize, Deserializer, Serializer};

	use super::TIMESTAMP_FORMAT;

	pub fn serialize<S: Serializer>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
		let s = String::deserialize(deserializer)?;
		NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn sample_row() -> Row {
		Row {
			timestamp: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(19, 0, 0).unwrap(),
			label: Label::Abnormal,
			temp: Some(47.3),
			pressure: None,
			vibration: Some(0.031),
		}
	}

	#[test]
	fn value_reads_each_column() {
		let row = sample_row();
		assert_eq!(row.value(SensorKind::Temp), Some(47.3));
		assert_eq!(row.value(SensorKind::Pressure), None);
		assert_eq!(row.value(SensorKind::Vibration), Some(0.031));
	}

	#[test]
	fn values_follow_column_order() {
		let kinds: Vec<SensorKind> = sample_row().values().map(|(k, _)| k).collect();
		assert_eq!(kinds, SensorKind::ALL.to_vec());
	}

	#[test]
	fn label_displays_lowercase() {
		assert_eq!(Label::Normal.to_string(), "normal");
		assert_eq!(Label::Abnormal.to_string(), "abnormal");
	}
}
