use std::fmt;

use super::generation_input::GenerationInput;
use super::row::{Label, Row, TIMESTAMP_FORMAT};
use super::sensor::SensorKind;

/// Number of rows shown at each end of the preview.
pub const PREVIEW_ROWS: usize = 10;

/// Occurrences of a label in a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelCount {
	pub label: Label,
	pub count: usize,
	pub percentage: f64,
}

/// Missing readings of a sensor in a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct MissingCount {
	pub sensor: SensorKind,
	pub count: usize,
	pub percentage: f64,
}

/// Summary of a generated dataset.
///
/// Produced by [`compute_statistics`]; `Display` renders the console report.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSummary {
	pub total_rows: usize,

	/// Present labels, most frequent first.
	pub labels: Vec<LabelCount>,

	pub normal_prob: f64,
	pub abnormal_prob: f64,
	pub null_prob: f64,

	/// One entry per sensor, in column order.
	pub missing: Vec<MissingCount>,

	/// First rows of the dataset.
	pub head: Vec<Row>,

	/// Last rows of the dataset.
	pub tail: Vec<Row>,
}

impl DatasetSummary {
	/// Count of rows with `label`, zero if absent.
	pub fn label_count(&self, label: Label) -> usize {
		self.labels.iter().find(|l| l.label == label).map_or(0, |l| l.count)
	}

	/// Count of missing readings for `sensor`.
	pub fn missing_count(&self, sensor: SensorKind) -> usize {
		self.missing.iter().find(|m| m.sensor == sensor).map_or(0, |m| m.count)
	}
}

fn percentage(count: usize, total: usize) -> f64 {
	if total == 0 {
		0.0
	} else {
		count as f64 / total as f64 * 100.0
	}
}

/// Computes the summary of `dataset`.
///
/// # Behavior
/// - Labels that never occur are left out of the distribution.
/// - Label ties keep the `normal`, `abnormal` order.
/// - The probabilities of `input` are echoed unchanged.
/// - Percentages of an empty dataset are 0.
pub fn compute_statistics(dataset: &[Row], input: &GenerationInput) -> DatasetSummary {
	let total_rows = dataset.len();

	let mut labels: Vec<LabelCount> = Label::ALL
		.into_iter()
		.map(|label| {
			let count = dataset.iter().filter(|row| row.label == label).count();
			LabelCount { label, count, percentage: percentage(count, total_rows) }
		})
		.filter(|l| l.count > 0)
		.collect();
	// Stable sort, ties keep declaration order
	labels.sort_by(|a, b| b.count.cmp(&a.count));

	let missing = SensorKind::ALL
		.into_iter()
		.map(|sensor| {
			let count = dataset.iter().filter(|row| row.value(sensor).is_none()).count();
			MissingCount { sensor, count, percentage: percentage(count, total_rows) }
		})
		.collect();

	let head = dataset.iter().take(PREVIEW_ROWS).cloned().collect();
	let tail = dataset[total_rows.saturating_sub(PREVIEW_ROWS)..].to_vec();

	DatasetSummary {
		total_rows,
		labels,
		normal_prob: input.normal_prob(),
		abnormal_prob: input.abnormal_prob(),
		null_prob: input.null_prob(),
		missing,
		head,
		tail,
	}
}

/// Writes a fixed-width preview table; missing readings are left blank.
fn write_preview(f: &mut fmt::Formatter<'_>, rows: &[Row]) -> fmt::Result {
	writeln!(f, "{:<19}  {:>8}  {:>6}  {:>8}  {:>9}", "timestamp", "label", "temp", "pressure", "vibration")?;
	for row in rows {
		write!(f, "{:<19}  {:>8}", row.timestamp.format(TIMESTAMP_FORMAT).to_string(), row.label.as_str())?;
		for (kind, value) in row.values() {
			let width = kind.name().len().max(6);
			let text = value.map(|v| v.to_string()).unwrap_or_default();
			write!(f, "  {:>width$}", text, width = width)?;
		}
		writeln!(f)?;
	}
	Ok(())
}

impl fmt::Display for DatasetSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let rule = "=".repeat(60);

		writeln!(f, "{}", rule)?;
		writeln!(f, "Dataset statistics")?;
		writeln!(f, "{}", rule)?;

		writeln!(f, "Total rows: {}", self.total_rows)?;
		writeln!(f, "Label distribution:")?;
		for l in &self.labels {
			writeln!(f, "   {}: {} rows ({:.1}%)", l.label, l.count, l.percentage)?;
		}

		writeln!(f)?;
		writeln!(f, "Parameters:")?;
		writeln!(f, "   normal_prob: {} (in-normal-range probability per sensor for normal rows)", self.normal_prob)?;
		writeln!(f, "   abnormal_prob: {} (in-normal-range probability per sensor for abnormal rows)", self.abnormal_prob)?;
		writeln!(f, "   null_prob: {} (missing-value probability)", self.null_prob)?;

		writeln!(f)?;
		writeln!(f, "Missing values per column:")?;
		for m in &self.missing {
			writeln!(f, "   {}: {} missing ({:.1}%)", m.sensor, m.count, m.percentage)?;
		}

		writeln!(f)?;
		writeln!(f, "Preview (first {} rows):", self.head.len())?;
		write_preview(f, &self.head)?;

		writeln!(f)?;
		writeln!(f, "Preview (last {} rows):", self.tail.len())?;
		write_preview(f, &self.tail)?;

		writeln!(f, "{}", rule)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::generation_input::default_start_time;
	use chrono::Duration;

	fn row(index: i64, label: Label, temp: Option<f64>, pressure: Option<f64>, vibration: Option<f64>) -> Row {
		Row { timestamp: default_start_time() + Duration::minutes(index), label, temp, pressure, vibration }
	}

	fn dataset() -> Vec<Row> {
		vec![
			row(0, Label::Normal, Some(46.1), Some(1.02), Some(0.031)),
			row(1, Label::Abnormal, None, Some(1.12), Some(0.09)),
			row(2, Label::Normal, Some(48.0), None, None),
			row(3, Label::Normal, None, Some(1.01), Some(0.025)),
		]
	}

	#[test]
	fn counts_labels_and_missing_values() {
		let summary = compute_statistics(&dataset(), &GenerationInput::new(4));
		assert_eq!(summary.total_rows, 4);
		assert_eq!(summary.labels, vec![
			LabelCount { label: Label::Normal, count: 3, percentage: 75.0 },
			LabelCount { label: Label::Abnormal, count: 1, percentage: 25.0 },
		]);
		assert_eq!(summary.missing_count(SensorKind::Temp), 2);
		assert_eq!(summary.missing_count(SensorKind::Pressure), 1);
		assert_eq!(summary.missing_count(SensorKind::Vibration), 1);
		assert_eq!(summary.missing[0].percentage, 50.0);
	}

	#[test]
	fn most_frequent_label_comes_first() {
		let mut rows = dataset();
		for r in rows.iter_mut() {
			r.label = Label::Abnormal;
		}
		rows[0].label = Label::Normal;
		let summary = compute_statistics(&rows, &GenerationInput::new(4));
		assert_eq!(summary.labels[0].label, Label::Abnormal);
		assert_eq!(summary.label_count(Label::Normal), 1);
	}

	#[test]
	fn echoes_probabilities() {
		let mut input = GenerationInput::new(4);
		input.set_probabilities(0.8, 0.1, 0.2).unwrap();
		let summary = compute_statistics(&dataset(), &input);
		assert_eq!((summary.normal_prob, summary.abnormal_prob, summary.null_prob), (0.8, 0.1, 0.2));
	}

	#[test]
	fn empty_dataset_has_zero_percentages() {
		let summary = compute_statistics(&[], &GenerationInput::new(0));
		assert_eq!(summary.total_rows, 0);
		assert!(summary.labels.is_empty());
		assert!(summary.missing.iter().all(|m| m.count == 0 && m.percentage == 0.0));
		assert!(summary.head.is_empty() && summary.tail.is_empty());
	}

	#[test]
	fn preview_takes_first_and_last_rows() {
		let rows: Vec<Row> = (0..25).map(|i| row(i, Label::Normal, Some(47.0), Some(1.03), Some(0.03))).collect();
		let summary = compute_statistics(&rows, &GenerationInput::new(25));
		assert_eq!(summary.head.len(), PREVIEW_ROWS);
		assert_eq!(summary.tail.len(), PREVIEW_ROWS);
		assert_eq!(summary.head[0], rows[0]);
		assert_eq!(summary.tail[0], rows[15]);
		assert_eq!(summary.tail[9], rows[24]);
	}

	#[test]
	fn short_dataset_preview_overlaps() {
		let summary = compute_statistics(&dataset(), &GenerationInput::new(4));
		assert_eq!(summary.head, dataset());
		assert_eq!(summary.tail, dataset());
	}

	#[test]
	fn report_lists_everything() {
		let report = compute_statistics(&dataset(), &GenerationInput::new(4)).to_string();
		assert!(report.contains("Total rows: 4"));
		assert!(report.contains("normal: 3 rows (75.0%)"));
		assert!(report.contains("abnormal: 1 rows (25.0%)"));
		assert!(report.contains("temp: 2 missing (50.0%)"));
		assert!(report.contains("null_prob: 0.05"));
		assert!(report.contains("2024-06-03 19:03:00"));
		assert!(report.contains("0.025"));
	}
}
