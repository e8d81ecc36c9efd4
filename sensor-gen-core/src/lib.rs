//! Synthetic sensor dataset generation library.
//!
//! This crate produces labeled tabular data for testing anomaly detectors:
//! - A static table of sensor ranges (temperature, pressure, vibration)
//! - Row generation with per-label range selection and missing values
//! - Sequential or multi-threaded dataset generation from a seedable source
//! - Dataset statistics and CSV serialization

/// Sensor table, rows, generation input, generator and statistics.
pub mod model;

/// CSV reading and writing of generated rows.
pub mod io;
