//! Scripted clock commands
//!
//! Event scripts drive the clock with one command per line, e.g.
//! `set_time 16` or `tint_black 60`.

use std::str::FromStr;

use thiserror::Error;

use crate::screen::Tone;

/// Duration used by tint commands when none is given
pub const DEFAULT_TINT_DURATION: u32 = 30;

/// Errors from parsing a command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown clock command: {0}")]
    Unknown(String),
    #[error("{command} expects a {expected}")]
    MissingArgument { command: String, expected: &'static str },
    #[error("{command}: invalid argument {value:?}")]
    InvalidArgument { command: String, value: String },
    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<CommandError>,
    },
}

/// Everything a script can ask of the clock
#[derive(Debug, Clone, PartialEq)]
pub enum ClockCommand {
    Setup { visible: bool },
    Show,
    Hide,
    Toggle,
    Stop,
    Resume,
    ToggleTimeflow,
    SetIndoor(bool),
    ToggleIndoor,
    /// Jump to a phase; `None` means the starting phase
    SetTime(Option<i64>),
    ForceRefresh,
    TintClear(u32),
    TintNormal(u32),
    TintBlack(u32),
    TintWhite(u32),
    /// Generic screen tone change
    ChangeTone { tone: Tone, duration: u32 },
}

fn parse_arg<T: FromStr>(command: &str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command: command.to_string(),
        value: value.to_string(),
    })
}

fn optional_arg<T: FromStr>(command: &str, value: Option<&str>, default: T) -> Result<T, CommandError> {
    value.map_or(Ok(default), |v| parse_arg(command, v))
}

impl FromStr for ClockCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();
        let first = args.first().copied();

        let command = match name {
            "setup" => ClockCommand::Setup {
                visible: optional_arg(name, first, true)?,
            },
            "show" => ClockCommand::Show,
            "hide" => ClockCommand::Hide,
            "toggle" => ClockCommand::Toggle,
            "stop" => ClockCommand::Stop,
            "resume" => ClockCommand::Resume,
            "toggle_timeflow" => ClockCommand::ToggleTimeflow,
            "set_indoor" => ClockCommand::SetIndoor(optional_arg(name, first, true)?),
            "toggle_indoor" => ClockCommand::ToggleIndoor,
            "set_time" => ClockCommand::SetTime(first.map(|v| parse_arg(name, v)).transpose()?),
            "force_refresh" => ClockCommand::ForceRefresh,
            "tint_clear" => ClockCommand::TintClear(optional_arg(name, first, DEFAULT_TINT_DURATION)?),
            "tint_normal" => ClockCommand::TintNormal(optional_arg(name, first, DEFAULT_TINT_DURATION)?),
            "tint_black" => ClockCommand::TintBlack(optional_arg(name, first, DEFAULT_TINT_DURATION)?),
            "tint_white" => ClockCommand::TintWhite(optional_arg(name, first, DEFAULT_TINT_DURATION)?),
            "tone" => {
                let [red, green, blue, gray, duration] = args[..] else {
                    return Err(CommandError::MissingArgument {
                        command: name.to_string(),
                        expected: "red green blue gray duration",
                    });
                };
                ClockCommand::ChangeTone {
                    tone: Tone::new(
                        parse_arg(name, red)?,
                        parse_arg(name, green)?,
                        parse_arg(name, blue)?,
                        parse_arg(name, gray)?,
                    ),
                    duration: parse_arg(name, duration)?,
                }
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Parse a script, skipping blank lines and `#` comments
pub fn parse_script(script: &str) -> Result<Vec<ClockCommand>, CommandError> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            line.parse::<ClockCommand>().map_err(|e| CommandError::Script {
                line: line_no,
                source: Box::new(e),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("show".parse::<ClockCommand>(), Ok(ClockCommand::Show));
        assert_eq!("toggle_timeflow".parse::<ClockCommand>(), Ok(ClockCommand::ToggleTimeflow));
        assert_eq!("setup false".parse::<ClockCommand>(), Ok(ClockCommand::Setup { visible: false }));
        assert_eq!("set_indoor".parse::<ClockCommand>(), Ok(ClockCommand::SetIndoor(true)));
        assert_eq!("set_time 51".parse::<ClockCommand>(), Ok(ClockCommand::SetTime(Some(51))));
        assert_eq!("set_time".parse::<ClockCommand>(), Ok(ClockCommand::SetTime(None)));
        assert_eq!("tint_black".parse::<ClockCommand>(), Ok(ClockCommand::TintBlack(30)));
        assert_eq!("tint_white 90".parse::<ClockCommand>(), Ok(ClockCommand::TintWhite(90)));
    }

    #[test]
    fn test_parse_tone() {
        let cmd: ClockCommand = "tone -68 -68 0 68 120".parse().unwrap();
        assert_eq!(
            cmd,
            ClockCommand::ChangeTone {
                tone: Tone::new(-68.0, -68.0, 0.0, 68.0),
                duration: 120,
            }
        );
        assert!(matches!(
            "tone 1 2 3".parse::<ClockCommand>(),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ClockCommand>(), Err(CommandError::Empty));
        assert!(matches!("dance".parse::<ClockCommand>(), Err(CommandError::Unknown(_))));
        assert!(matches!(
            "set_time 2.5".parse::<ClockCommand>(),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "tint_clear -3".parse::<ClockCommand>(),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_parse_script() {
        let script = "# morning routine\nsetup\n\nset_time 12\n  tint_normal 60  \n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                ClockCommand::Setup { visible: true },
                ClockCommand::SetTime(Some(12)),
                ClockCommand::TintNormal(60),
            ]
        );

        let err = parse_script("show\nfly away").unwrap_err();
        assert!(matches!(err, CommandError::Script { line: 2, .. }));
    }
}
