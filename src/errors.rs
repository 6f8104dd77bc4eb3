use std::{io, path::PathBuf};
use thiserror::Error;

use crate::quiz_session::SessionPhase;

/// Raised while building the question store. Fatal at startup.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("failed to read question bank at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse question bank{}: {source}", origin_suffix(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("question bank has no top-level \"data\" array")]
    MissingDataKey,

    #[error("record #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record #{index} has an invalid value for `{field}`")]
    InvalidField { index: usize, field: &'static str },
}

fn origin_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}

/// Recoverable conditions surfaced by [`crate::quiz_session::QuizSession`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No questions available for the selected tags.")]
    NoQuestionsForTags,

    #[error("{letter} is not one of this question's choices")]
    UnknownChoice { letter: String },

    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
}
