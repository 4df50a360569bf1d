use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// How serious a reported issue is. Nothing in the simulation is fatal; an `Error` means the
/// requested operation produced no result, a `Warning` means it went ahead in a degraded form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// The issues the simulation can run into. All of them are recoverable locally: the failing
/// operation returns an empty or sentinel result and the issue is surfaced through a
/// `DiagnosticSink`.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A sensor mount point lies outside the carrier's footprint
    MountOutOfBounds { sensor: String, x: f64, y: f64 },

    /// A scan or ping referenced a sensor name that is not registered
    SensorNotFound(String),

    /// A scan was requested with an angular step below the 1 degree floor
    SubMinimumScanStep { sensor: String, requested: f64 },

    /// A measurement import file does not exist
    MissingImportFile(PathBuf),

    /// A row of a measurement import file could not be parsed
    MalformedMeasurement { line: usize, content: String },

    /// A polygon building command was not recognized
    UnknownBuildCommand(String),

    /// A polygon `skip` command had an argument other than on/off
    UnknownSkipFlag(String),
}

impl SimError {
    pub fn severity(&self) -> Severity {
        match self {
            SimError::MountOutOfBounds { .. } => Severity::Error,
            SimError::SensorNotFound(_) => Severity::Error,
            SimError::MalformedMeasurement { .. } => Severity::Error,
            SimError::SubMinimumScanStep { .. } => Severity::Warning,
            SimError::MissingImportFile(_) => Severity::Warning,
            SimError::UnknownBuildCommand(_) => Severity::Warning,
            SimError::UnknownSkipFlag(_) => Severity::Warning,
        }
    }
}

impl Display for SimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::MountOutOfBounds { sensor, x, y } => write!(
                f,
                "mount point ({x:.3}, {y:.3}) of sensor '{sensor}' is outside the chassis"
            ),
            SimError::SensorNotFound(name) => write!(f, "sensor '{name}' not found"),
            SimError::SubMinimumScanStep { sensor, requested } => write!(
                f,
                "scan step {requested} deg of sensor '{sensor}' is less than 1 deg, forced to 1 deg"
            ),
            SimError::MissingImportFile(path) => {
                write!(f, "measure file '{}' not found", path.display())
            }
            SimError::MalformedMeasurement { line, content } => {
                write!(f, "cannot parse measure at line {line}: '{content}'")
            }
            SimError::UnknownBuildCommand(cmd) => {
                write!(f, "command '{cmd}' unknown, no points will be added")
            }
            SimError::UnknownSkipFlag(flag) => {
                write!(f, "skip flag '{flag}' unknown, skip state unchanged")
            }
        }
    }
}

impl Error for SimError {}
