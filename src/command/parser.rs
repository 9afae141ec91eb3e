//! Console line parser - splits raw input into a command name and integer arguments

use thiserror::Error;

/// Most arguments any drone command takes
pub const MAX_ARGS: usize = 2;

/// One line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Blank line
    Empty,
    /// `?` or `HELP`
    Help,
    /// `Q`, `QUIT` or `EXIT`
    Quit,
    /// Anything else: forwarded to the drone
    Command { name: String, args: Vec<i32> },
}

/// Errors that can occur while parsing a line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Argument {position} is not a whole number: {value:?}")]
    InvalidArgument { position: usize, value: String },

    #[error("Too many arguments: {0} given (max: {MAX_ARGS})")]
    TooManyArguments(usize),
}

/// Parse one line. The name is upper-cased; unknown names are left for the drone to reject.
pub fn parse_line(line: &str) -> Result<ConsoleInput, ParseError> {
    let mut tokens = line.split_whitespace();

    let name = match tokens.next() {
        Some(token) => token.to_uppercase(),
        None => return Ok(ConsoleInput::Empty),
    };

    let raw_args: Vec<&str> = tokens.collect();

    match name.as_str() {
        "?" | "HELP" if raw_args.is_empty() => return Ok(ConsoleInput::Help),
        "Q" | "QUIT" | "EXIT" if raw_args.is_empty() => return Ok(ConsoleInput::Quit),
        _ => {}
    }

    if raw_args.len() > MAX_ARGS {
        return Err(ParseError::TooManyArguments(raw_args.len()));
    }

    let args = raw_args
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            raw.parse::<i32>().map_err(|_| ParseError::InvalidArgument {
                position: i + 1,
                value: raw.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConsoleInput::Command { name, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str, args: &[i32]) -> ConsoleInput {
        ConsoleInput::Command {
            name: name.into(),
            args: args.to_vec(),
        }
    }

    #[test]
    fn test_names_and_args() {
        assert_eq!(parse_line("S"), Ok(command("S", &[])));
        assert_eq!(parse_line("a 5"), Ok(command("A", &[5])));
        assert_eq!(parse_line("  m   3  270 "), Ok(command("M", &[3, 270])));
        assert_eq!(parse_line("B -4 10"), Ok(command("B", &[-4, 10])));
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(parse_line("z"), Ok(command("Z", &[])));
    }

    #[test]
    fn test_session_keywords() {
        assert_eq!(parse_line(""), Ok(ConsoleInput::Empty));
        assert_eq!(parse_line("   \t"), Ok(ConsoleInput::Empty));
        assert_eq!(parse_line("?"), Ok(ConsoleInput::Help));
        assert_eq!(parse_line("help"), Ok(ConsoleInput::Help));
        assert_eq!(parse_line("q"), Ok(ConsoleInput::Quit));
        assert_eq!(parse_line("Exit"), Ok(ConsoleInput::Quit));
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            parse_line("M 3 north"),
            Err(ParseError::InvalidArgument {
                position: 2,
                value: "north".into()
            })
        );
        assert!(parse_line("A 1.5").is_err());
        assert!(parse_line("A 99999999999").is_err());
        assert_eq!(parse_line("B 1 2 3"), Err(ParseError::TooManyArguments(3)));
    }
}
