use std::fmt;
use std::io::{BufRead, Write};

use clap::ValueEnum;

use crate::error::{BuildError, Result};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Reset the build directory and run cmake
    Configure,
    /// Run the build tool
    Compile,
    /// Run ctest
    Test,
    /// Run the produced executable
    Run,
    /// Configure, compile, test and run
    All,
}

impl Action {
    pub const MENU: [Action; 5] = [
        Action::Configure,
        Action::Compile,
        Action::Test,
        Action::Run,
        Action::All,
    ];

    /// Maps a menu entry (`"1"`..`"5"`) to its action.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Configure),
            "2" => Some(Self::Compile),
            "3" => Some(Self::Test),
            "4" => Some(Self::Run),
            "5" => Some(Self::All),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Configure => "Configure Cmake",
            Self::Compile => "Compile Code",
            Self::Test => "Run Unit Tests",
            Self::Run => "Run executable",
            Self::All => "Entire Process",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shows the menu on `output` and reads lines from `input` until one of them
/// is a valid choice.
pub fn prompt<R, W>(input: &mut R, output: &mut W) -> Result<Action>
where
    R: BufRead,
    W: Write,
{
    let io_err = BuildError::Terminal;

    writeln!(output, "Choose a build option: ").map_err(io_err)?;
    for (i, action) in Action::MENU.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, action).map_err(io_err)?;
    }

    // raw bytes: undecodable input is just another invalid choice
    let mut buf = Vec::new();
    loop {
        write!(output, "Enter your choice (1-5) : ").map_err(io_err)?;
        output.flush().map_err(io_err)?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).map_err(io_err)? == 0 {
            return Err(BuildError::InputClosed);
        }
        let line = String::from_utf8_lossy(&buf);

        match Action::from_choice(&line) {
            Some(action) => return Ok(action),
            None => {
                tracing::debug!(input = line.trim(), "rejected menu choice");
                writeln!(output, "Invalid choice. Try again").map_err(io_err)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (Result<Action>, String) {
        let mut out = Vec::new();
        let res = prompt(&mut input.as_bytes(), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn choices_map_in_menu_order() {
        for (i, expected) in Action::MENU.iter().enumerate() {
            assert_eq!(Action::from_choice(&(i + 1).to_string()), Some(*expected));
        }
    }

    #[test]
    fn out_of_range_choices_are_rejected() {
        for bad in ["0", "6", "", "a", "1.0", "12", "-1"] {
            assert_eq!(Action::from_choice(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn valid_choice_returns_immediately() {
        let (res, out) = run("2\n");
        assert_eq!(res.unwrap(), Action::Compile);
        assert!(out.contains("1. Configure Cmake"));
        assert!(out.contains("5. Entire Process"));
        assert!(!out.contains("Invalid choice"));
    }

    #[test]
    fn invalid_input_reprompts() {
        let (res, out) = run("9\nfoo\n\n5\n");
        assert_eq!(res.unwrap(), Action::All);
        assert_eq!(out.matches("Invalid choice. Try again").count(), 3);
        assert_eq!(out.matches("Enter your choice (1-5) : ").count(), 4);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let (res, _) = run("  3 \r\n");
        assert_eq!(res.unwrap(), Action::Test);
    }

    #[test]
    fn non_utf8_input_reprompts() {
        let mut out = Vec::new();
        let res = prompt(&mut &b"\xff\xfe\n1\n"[..], &mut out);
        assert_eq!(res.unwrap(), Action::Configure);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Invalid choice. Try again").count(), 1);
    }

    #[test]
    fn write_failure_is_a_terminal_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let res = prompt(&mut "1\n".as_bytes(), &mut Closed);
        assert!(matches!(res, Err(BuildError::Terminal(_))));
    }

    #[test]
    fn eof_without_choice_is_an_error() {
        let (res, _) = run("7\n");
        assert!(matches!(res, Err(BuildError::InputClosed)));
    }
}
