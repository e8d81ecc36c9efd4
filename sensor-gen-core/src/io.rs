use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info};

use crate::model::row::Row;
use crate::model::sensor::SensorKind;

/// Column names of the generated file, in order.
pub fn header() -> Vec<&'static str> {
	let mut columns = vec!["timestamp", "label"];
	columns.extend(SensorKind::ALL.iter().map(SensorKind::name));
	columns
}

/// Writes `rows` as CSV to any writer.
///
/// - The header is always written, also for an empty dataset
/// - Missing readings become empty fields
pub fn write_rows<W: Write>(writer: W, rows: &[Row]) -> Result<(), Box<dyn std::error::Error>> {
	let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
	writer.write_record(header())?;
	for row in rows {
		writer.serialize(row)?;
	}
	writer.flush()?;
	Ok(())
}

/// Writes `rows` to a CSV file, replacing any existing file.
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[Row]) -> Result<(), Box<dyn std::error::Error>> {
	let path = path.as_ref();
	let file = File::create(path)?;
	write_rows(BufWriter::new(file), rows)?;
	info!("Wrote {} rows to {}", rows.len(), path.display());
	Ok(())
}

/// Parses CSV rows written by [`write_rows`].
///
/// # Errors
/// Returns an error if the header differs from [`header`] or a record
/// cannot be parsed.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>, Box<dyn std::error::Error>> {
	let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

	let found: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
	if found != header() {
		return Err(Box::new(io::Error::new(
			io::ErrorKind::InvalidData,
			format!("Unexpected header: {}", found.join(",")),
		)));
	}

	let mut rows = Vec::new();
	for record in reader.deserialize() {
		rows.push(record?);
	}
	Ok(rows)
}

/// Reads a CSV file written by [`write_csv`].
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Row>, Box<dyn std::error::Error>> {
	let path = path.as_ref();
	let rows = read_rows(BufReader::new(File::open(path)?))?;
	debug!("Read {} rows from {}", rows.len(), path.display());
	Ok(rows)
}
