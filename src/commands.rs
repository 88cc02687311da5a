//! Line commands accepted by the terminal front end

use std::str::FromStr;

use crate::{controller::TimerController, error::TimerError};

/// A single stdin command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Set(i64),
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(word) => word.to_lowercase(),
            None => return Err("Empty command".to_string()),
        };

        let parsed = match command.as_str() {
            "start" | "s" => Command::Start,
            "pause" | "p" => Command::Pause,
            "status" => Command::Status,
            "quit" | "q" | "exit" => Command::Quit,
            "set" => {
                let value = parts
                    .next()
                    .ok_or_else(|| "Usage: set <seconds>".to_string())?;
                let seconds = value
                    .parse::<i64>()
                    .map_err(|e| format!("Invalid seconds '{}': {}", value, e))?;
                Command::Set(seconds)
            }
            other => return Err(format!("Unknown command: {}", other)),
        };

        if parts.next().is_some() {
            return Err(format!("Unexpected arguments after '{}'", command));
        }
        Ok(parsed)
    }
}

impl Command {
    /// Apply a mutating command. `Status` and `Quit` are handled by the caller.
    pub fn apply(self, timer: &TimerController) -> Result<(), TimerError> {
        match self {
            Command::Start => timer.start(),
            Command::Pause => timer.pause(),
            Command::Set(seconds) => timer.set_remaining_seconds(seconds)?,
            Command::Status | Command::Quit => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!("  P ".parse::<Command>(), Ok(Command::Pause));
        assert_eq!("set 90".parse::<Command>(), Ok(Command::Set(90)));
        assert_eq!("set -4".parse::<Command>(), Ok(Command::Set(-4)));
        assert_eq!("status".parse::<Command>(), Ok(Command::Status));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!("".parse::<Command>().is_err());
        assert!("set".parse::<Command>().is_err());
        assert!("set ten".parse::<Command>().is_err());
        assert!("start now".parse::<Command>().is_err());
        assert!("reset".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn applies_to_controller() {
        let timer = TimerController::new(1).unwrap();
        Command::Set(90).apply(&timer).unwrap();
        Command::Start.apply(&timer).unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.formatted_time(), "01:30");

        Command::Pause.apply(&timer).unwrap();
        assert!(!timer.is_running());
        assert_eq!(Command::Set(-1).apply(&timer), Err(TimerError::InvalidDuration(-1)));
    }
}
