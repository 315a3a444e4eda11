//! Errors that can occur during the lifetime of the tool.
use std::io::Error as IOError;
use std::process::ExitCode;

use thiserror::Error;

use crate::minilang::environment::SemanticError;
use crate::minilang::token::lexer::LexingError;
use crate::minilang::types::Located;

/// An error that stopped the engine.
///
/// To support the [`std::process::Termination`] trait, a
/// `From<EngineError> for ExitCode` implementation maps each error onto an
/// exit code from the [`<sysexits.h>`](https://man.freebsd.org/cgi/man.cgi?query=sysexits)
/// header.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Errors that happened when trying to load the file
    /// or read the REPL line.
    #[error("Error reading source file: {0}")]
    FileError(#[from] IOError),
    /// Printing results failed, e.g. because standard output was closed.
    #[error("Error writing output: {0}")]
    OutputError(#[source] IOError),
    /// A syntax error found while lexing.
    #[error(transparent)]
    Lexing(#[from] LexingError),
    /// A variable could not be resolved or bound.
    #[error(transparent)]
    Semantic(#[from] Located<SemanticError>),
}

impl EngineError {
    /// The `<sysexits.h>` status to exit with.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match *self {
            // Technically, 66 only specifies missing or unreadable files
            // any other errors during I/O for both the file, and the REPL command,
            // should be presented as 74, EX_IOERR
            EngineError::FileError(_) => 66, // EX_NOINPUT
            EngineError::OutputError(_) => 74, // EX_IOERR
            EngineError::Lexing(_) | EngineError::Semantic(_) => 65, // EX_DATAERR
        }
    }
}

impl From<EngineError> for ExitCode {
    fn from(value: EngineError) -> Self {
        ExitCode::from(value.exit_status())
    }
}

#[cfg(test)]
mod test {
    use std::io::{Error as IOError, ErrorKind};

    use super::EngineError;
    use crate::minilang::environment::SemanticError;
    use crate::minilang::token::lexer::tokenize;
    use crate::minilang::types::Location;

    #[test]
    fn errors_map_to_sysexits_codes() {
        let missing = EngineError::from(IOError::from(ErrorKind::NotFound));
        assert_eq!(missing.exit_status(), 66);

        let closed = EngineError::OutputError(IOError::from(ErrorKind::BrokenPipe));
        assert_eq!(closed.exit_status(), 74);
        assert!(closed.to_string().starts_with("Error writing output"));

        let lexing = tokenize("&", "bad.ml").expect_err("lone &");
        assert_eq!(EngineError::from(lexing).exit_status(), 65);

        let semantic = SemanticError::UndefinedVariable("v".to_owned())
            .at(&Location::new("bad.ml".into(), 1, 1));
        assert_eq!(EngineError::from(semantic).exit_status(), 65);
    }

    #[test]
    fn lexing_errors_display_unchanged() {
        let lexing = tokenize("  $", "bad.ml").expect_err("$ is not a token");
        assert_eq!(
            EngineError::from(lexing).to_string(),
            "bad.ml:1:3: Syntax error: Unrecognized character '$'"
        );
    }
}
