//! Normalization of one region's raw table into the canonical schema.
//!
//! The pipeline runs in a fixed order:
//! 1. Shape checks (station column present, all columns the same length)
//! 2. Unit conversion of every mapped column; unmapped columns are dropped
//! 3. Station resolution of the index column, row by row
//! 4. Assembly into one row per station key (first occurrence wins)
//! 5. Optional network-station filter
//!
//! Steps 1 and 2 are the only places that can fail; everything after works
//! on validated input and only records data-quality observations.

pub mod pipeline;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use pipeline::MeasurementNormalizer;
pub use report::NormalizationReport;
