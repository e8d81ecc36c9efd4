use std::fs;

use sensor_gen_core::io::{read_csv, write_csv};
use sensor_gen_core::model::generation_input::GenerationInput;
use sensor_gen_core::model::generator::Generator;
use sensor_gen_core::model::row::Label;
use sensor_gen_core::model::sensor::{SensorKind, SensorTable};
use sensor_gen_core::model::statistics::compute_statistics;

#[test]
fn file_round_trip_preserves_statistics() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("testing.csv");

	let mut input = GenerationInput::new(1_000);
	input.set_null_prob(0.2).unwrap();
	let dataset = Generator::from_seed(SensorTable::default(), Some(21)).generate_dataset(&input);

	write_csv(&path, &dataset).unwrap();
	let restored = read_csv(&path).unwrap();

	let before = compute_statistics(&dataset, &input);
	let after = compute_statistics(&restored, &input);
	assert_eq!(after.total_rows, before.total_rows);
	for label in Label::ALL {
		assert_eq!(after.label_count(label), before.label_count(label));
	}
	for sensor in SensorKind::ALL {
		assert_eq!(after.missing_count(sensor), before.missing_count(sensor));
	}
	assert_eq!(restored, dataset);
}

#[test]
fn written_file_starts_with_header() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("out.csv");

	let input = GenerationInput::new(3);
	let dataset = Generator::from_seed(SensorTable::default(), Some(22)).generate_dataset(&input);
	write_csv(&path, &dataset).unwrap();

	let text = fs::read_to_string(&path).unwrap();
	let lines: Vec<&str> = text.lines().collect();
	assert_eq!(lines.len(), 4);
	assert_eq!(lines[0], "timestamp,label,temp,pressure,vibration");
	assert!(lines[1].starts_with("2024-06-03 19:00:00,"));
	assert!(lines.iter().skip(1).all(|line| line.split(',').count() == 5));
}

#[test]
fn write_to_missing_directory_fails() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing").join("out.csv");
	assert!(write_csv(&path, &[]).is_err());
}
