//! A polygon made only of horizontal and vertical segments, traced by a sequence of commands
//! starting from a reference point. This is the convenient way to lay out the walls of a room,
//! including doorways, which are traced with `skip` turned on.

use crate::common::arange;
use crate::diagnostics::DiagnosticSink;
use crate::errors::SimError;
use crate::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildCommand {
    /// Move the reference point without tracing anything
    Start(Point2),
    Up(f64),
    Down(f64),
    Left(f64),
    Right(f64),
    /// While on, segments move the reference point but add no points
    Skip(bool),
}

impl BuildCommand {
    /// Parse a textual command and its argument. Command names and skip flags are case
    /// insensitive; `start` takes an `x,y` pair, skip takes one of yes/true/on or no/false/off and
    /// the segment commands take a length.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatsense::shapes::BuildCommand;
    /// use flatsense::Point2;
    /// assert_eq!(BuildCommand::parse("Up", "30").unwrap(), BuildCommand::Up(30.0));
    /// assert_eq!(BuildCommand::parse("start", "1, 2").unwrap(),
    ///            BuildCommand::Start(Point2::new(1.0, 2.0)));
    /// assert!(BuildCommand::parse("sideways", "3").is_err());
    /// ```
    pub fn parse(command: &str, arg: &str) -> Result<Self, SimError> {
        let cmd = command.trim().to_lowercase();
        let unknown = || SimError::UnknownBuildCommand(format!("{} {}", command, arg));
        let length = || arg.trim().parse::<f64>().map_err(|_| unknown());

        match cmd.as_str() {
            "start" => {
                let mut parts = arg.split(',').map(|s| s.trim().parse::<f64>());
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(Ok(x)), Some(Ok(y)), None) => Ok(BuildCommand::Start(Point2::new(x, y))),
                    _ => Err(unknown()),
                }
            }
            "up" => Ok(BuildCommand::Up(length()?)),
            "down" => Ok(BuildCommand::Down(length()?)),
            "left" => Ok(BuildCommand::Left(length()?)),
            "right" => Ok(BuildCommand::Right(length()?)),
            "skip" => match arg.trim().to_lowercase().as_str() {
                "yes" | "true" | "on" => Ok(BuildCommand::Skip(true)),
                "no" | "false" | "off" => Ok(BuildCommand::Skip(false)),
                _ => Err(SimError::UnknownSkipFlag(arg.to_string())),
            },
            _ => Err(unknown()),
        }
    }
}

/// Parse a list of textual commands, reporting and dropping any that are not understood. The
/// remaining commands are returned in order.
pub fn parse_commands(commands: &[(&str, &str)], sink: &dyn DiagnosticSink) -> Vec<BuildCommand> {
    commands
        .iter()
        .filter_map(|(cmd, arg)| match BuildCommand::parse(cmd, arg) {
            Ok(c) => Some(c),
            Err(e) => {
                sink.report(&e);
                None
            }
        })
        .collect()
}

/// Trace the commands from the origin and return the generated points. Each segment is sampled
/// every `res` from its start point up to but not including its end point.
pub fn trace_commands(commands: &[BuildCommand], res: f64) -> Vec<Point2> {
    let mut points = Vec::new();
    let mut reference = Point2::origin();
    let mut skip = false;

    for command in commands {
        let end = match *command {
            BuildCommand::Start(p) => {
                reference = p;
                continue;
            }
            BuildCommand::Skip(flag) => {
                skip = flag;
                continue;
            }
            BuildCommand::Up(l) => Point2::new(reference.x, reference.y + l),
            BuildCommand::Down(l) => Point2::new(reference.x, reference.y - l),
            BuildCommand::Left(l) => Point2::new(reference.x - l, reference.y),
            BuildCommand::Right(l) => Point2::new(reference.x + l, reference.y),
        };

        if !skip {
            if end.x == reference.x {
                let step = if end.y >= reference.y { res } else { -res };
                points.extend(
                    arange(reference.y, end.y, step)
                        .into_iter()
                        .map(|y| Point2::new(end.x, y)),
                );
            } else {
                let step = if end.x >= reference.x { res } else { -res };
                points.extend(
                    arange(reference.x, end.x, step)
                        .into_iter()
                        .map(|x| Point2::new(x, end.y)),
                );
            }
        }

        reference = end;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use test_case::test_case;

    #[test_case("UP", "2", BuildCommand::Up(2.0))]
    #[test_case("down", " 4.5", BuildCommand::Down(4.5))]
    #[test_case("left", "1", BuildCommand::Left(1.0))]
    #[test_case("Right", "7", BuildCommand::Right(7.0))]
    #[test_case("skip", "On", BuildCommand::Skip(true))]
    #[test_case("skip", "false", BuildCommand::Skip(false))]
    fn test_parse_command(cmd: &str, arg: &str, expected: BuildCommand) {
        assert_eq!(BuildCommand::parse(cmd, arg).unwrap(), expected);
    }

    #[test]
    fn test_bad_skip_flag() {
        assert_eq!(
            BuildCommand::parse("skip", "maybe"),
            Err(SimError::UnknownSkipFlag("maybe".to_string()))
        );
    }

    #[test]
    fn test_unknown_command_is_skipped() {
        let sink = RecordingSink::new();
        let commands = parse_commands(
            &[("start", "0,0"), ("diagonal", "5"), ("right", "1")],
            &sink,
        );
        assert_eq!(commands.len(), 2);
        assert_eq!(sink.len(), 1);
        assert!(matches!(sink.issues()[0], SimError::UnknownBuildCommand(_)));

        // The remaining geometry is unaffected by the dropped command
        let points = trace_commands(&commands, 0.5);
        assert_eq!(points, vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.0)]);
    }

    #[test]
    fn test_skip_moves_without_points() {
        let commands = [
            BuildCommand::Start(Point2::new(10.0, 0.0)),
            BuildCommand::Up(1.0),
            BuildCommand::Skip(true),
            BuildCommand::Up(5.0),
            BuildCommand::Skip(false),
            BuildCommand::Left(1.0),
        ];
        let points = trace_commands(&commands, 0.5);
        assert_eq!(
            points,
            vec![
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 0.5),
                Point2::new(10.0, 6.0),
                Point2::new(9.5, 6.0),
            ]
        );
    }
}
