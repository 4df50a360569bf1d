//! File import for the simulation. The only format read is the plain text measurement dump of a
//! real sensor, see `measurements`.

mod measurements;

pub use measurements::{load_measurements, parse_measurements, MEASUREMENT_DELIMITER, PHI_OFFSET_DEG};
