use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::result::Result as StdResult;

use thiserror::Error;

/// Shorthand alias for `Result<T, Error>` using the `ffmpeg_bar` error type.
pub type Result<T> = StdResult<T, Error>;

/// Top-level error for a single run. Every variant is fatal and maps to exit
/// code 1. Display strings do not repeat their source; print with `{:#}`
/// through `anyhow` to get the whole chain.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Argument(#[from] ArgumentError),

  #[error(transparent)]
  Precondition(#[from] PreconditionError),

  #[error("failed to probe {}", path.display())]
  Probe {
    path: PathBuf,
    #[source]
    source: ProbeError,
  },

  #[error("failed to launch ffmpeg")]
  Launch(#[source] io::Error),

  #[error(transparent)]
  Io(#[from] io::Error),
}

impl Error {
  pub(crate) fn probe<P: Into<PathBuf>>(path: P, source: ProbeError) -> Self {
    Error::Probe {
      path: path.into(),
      source,
    }
  }
}

/// The invocation does not have the shape of an ffmpeg command line.
#[derive(Debug, Error)]
pub enum ArgumentError {
  #[error("no arguments given")]
  NoArguments,

  #[error("no input file given (expected `-i <path>`)")]
  MissingInput,
}

#[derive(Debug, Error)]
pub enum PreconditionError {
  #[error("output file already exists: {}", .0.display())]
  OutputExists(PathBuf),

  #[error("input file does not exist: {}", .0.display())]
  InputMissing(PathBuf),
}

/// Failure of a single ffprobe invocation or of decoding its report.
#[derive(Debug, Error)]
pub enum ProbeError {
  #[error("failed to run ffprobe")]
  Spawn(#[source] io::Error),

  #[error("ffprobe exited with {0}")]
  Exit(ExitStatus),

  #[error("failed to decode ffprobe report")]
  Decode(#[from] serde_json::Error),

  #[error("ffprobe reported no video stream")]
  NoStreams,

  #[error("malformed `{field}` field: {value:?}")]
  Field { field: &'static str, value: String },
}

impl ProbeError {
  pub(crate) fn field<S: Into<String>>(field: &'static str, value: S) -> Self {
    ProbeError::Field {
      field,
      value: value.into(),
    }
  }
}
