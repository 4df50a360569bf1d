//! Real sensor measurements stored as delimited text. The first line is a header and is skipped;
//! every following line holds `phi;rho`, the direction in degrees and the measured distance. The
//! dumping tool counts `phi` from the sensor's left side, so 90 degrees is subtracted to bring it
//! to the facing direction used everywhere else.
//!
//! ```text
//! phi;rho
//! 45;120.5
//! 90;98.0
//! ```

use crate::diagnostics::DiagnosticSink;
use crate::errors::SimError;
use crate::geom2::{local_to_global, to_rect, Polar, Pose};
use crate::{Point2, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

pub const MEASUREMENT_DELIMITER: char = ';';

/// Offset, in degrees, between the file's angle origin and the sensor's facing direction
pub const PHI_OFFSET_DEG: f64 = 90.0;

/// Read a measurement file taken from `pose` and return the measured points in the world frame.
///
/// A missing file is reported to `sink` as a warning and gives an empty list. A line that cannot
/// be parsed is reported as well and aborts the import with an error.
pub fn load_measurements(path: &Path, pose: &Pose, sink: &dyn DiagnosticSink) -> Result<Vec<Point2>> {
    if !path.exists() {
        sink.report(&SimError::MissingImportFile(path.to_path_buf()));
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    match parse_measurements(reader, pose) {
        Ok(points) => {
            debug!(path = %path.display(), count = points.len(), "loaded measurements");
            Ok(points)
        }
        Err(e) => {
            if let Some(issue) = e.downcast_ref::<SimError>() {
                sink.report(issue);
            }
            Err(e)
        }
    }
}

/// Parse measurement text from any reader. Blank lines are ignored.
pub fn parse_measurements<R: BufRead>(reader: R, pose: &Pose) -> Result<Vec<Point2>> {
    let frame = pose.to_iso();
    let mut points = Vec::new();

    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (phi, rho) = parse_row(&line).ok_or_else(|| SimError::MalformedMeasurement {
            line: i + 1,
            content: line.clone(),
        })?;

        let local = to_rect(&Polar::new(rho, (phi - PHI_OFFSET_DEG).to_radians()));
        points.push(local_to_global(&local, &frame));
    }

    Ok(points)
}

fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut fields = line.split(MEASUREMENT_DELIMITER).map(|f| f.trim().parse::<f64>());
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(phi)), Some(Ok(rho)), None) => Some((phi, rho)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::AngleUnit;
    use crate::diagnostics::RecordingSink;
    use crate::errors::Severity;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    #[test]
    fn test_rows_placed_with_pose() {
        let text = "phi;rho\n90;10\n\n180;5\n";
        let pose = Pose::new(100.0, 50.0, 90.0, AngleUnit::Degrees);
        let points = parse_measurements(Cursor::new(text), &pose).unwrap();

        assert_eq!(points.len(), 2);
        // Straight ahead of a sensor facing +y
        assert_relative_eq!(points[0], Point2::new(100.0, 60.0), epsilon = 1.0e-9);
        // To the sensor's left, which is -x
        assert_relative_eq!(points[1], Point2::new(95.0, 50.0), epsilon = 1.0e-9);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let text = "phi;rho\n90;10\n90;ten\n";
        let err = parse_measurements(Cursor::new(text), &Pose::origin()).unwrap_err();
        let issue = err.downcast_ref::<SimError>().unwrap();
        assert_eq!(
            issue,
            &SimError::MalformedMeasurement {
                line: 3,
                content: "90;ten".to_string()
            }
        );
    }

    #[test]
    fn test_missing_file_warns_and_returns_empty() {
        let sink = RecordingSink::new();
        let path = std::env::temp_dir().join(format!("flatsense-missing-{}.csv", uuid::Uuid::new_v4()));
        let points = load_measurements(&path, &Pose::origin(), &sink).unwrap();

        assert!(points.is_empty());
        assert_eq!(sink.count(Severity::Warning), 1);
        assert!(matches!(sink.issues()[0], SimError::MissingImportFile(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("flatsense-meas-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, "phi;rho\n90;30\n").unwrap();

        let sink = RecordingSink::new();
        let points = load_measurements(&path, &Pose::from_radians(1.0, 1.0, 0.0), &sink).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(sink.is_empty());
        assert_relative_eq!(points[0], Point2::new(31.0, 1.0), epsilon = 1.0e-9);
    }
}
