//! Top-level module for dataset generation.
//!
//! This module provides:
//! - Sensor specifications and their lookup table (`SensorTable`)
//! - The generated record type (`Row`) and its label (`Label`)
//! - Generation parameters (`GenerationInput`)
//! - The sampling interface (`Generator`)
//! - Dataset summaries (`DatasetSummary`)

/// Dataset generator, sequential and parallel.
///
/// Samples labels, missing-value decisions and sensor readings from an
/// injected random source.
pub mod generator;

/// Generation parameters: row count, start time, seed and probabilities.
///
/// Probabilities are validated on assignment.
pub mod generation_input;

/// Generated record and label types.
pub mod row;

/// Sensor identifiers, value ranges and the immutable sensor table.
pub mod sensor;

/// Label distribution, missing-value counts and report rendering.
pub mod statistics;
