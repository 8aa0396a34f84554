//! Locating the input and output paths in an ffmpeg command line.

use std::path::{Path, PathBuf};

use crate::error::{ArgumentError, PreconditionError};

/// The argument that precedes the input path.
pub const INPUT_MARKER: &str = "-i";

/// An ffmpeg command line, with the paths the run cares about picked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  /// Every argument, forwarded to ffmpeg as given.
  pub args: Vec<String>,
  /// The argument following the first `-i`.
  pub input: PathBuf,
  /// The last argument.
  pub output: PathBuf,
}

impl Invocation {
  /// Scan `args` (without the program name) for the input and output paths.
  ///
  /// ```rust
  /// use ffmpeg_bar::invocation::Invocation;
  /// let invocation = Invocation::from_args(["-y", "-i", "in.mkv", "-c:v", "libx265", "out.mkv"]).unwrap();
  /// assert_eq!(invocation.input.to_str(), Some("in.mkv"));
  /// assert_eq!(invocation.output.to_str(), Some("out.mkv"));
  /// ```
  pub fn from_args<I, S>(args: I) -> Result<Self, ArgumentError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let output = args.last().ok_or(ArgumentError::NoArguments)?;
    let input = args
      .iter()
      .position(|arg| arg == INPUT_MARKER)
      .and_then(|i| args.get(i + 1))
      .ok_or(ArgumentError::MissingInput)?;

    Ok(Self {
      input: PathBuf::from(input),
      output: PathBuf::from(output),
      args,
    })
  }

  /// Refuse to run when the output already exists or the input does not.
  ///
  /// The output is checked first. Null sinks always exist and are exempt.
  pub fn check_preconditions(&self) -> Result<(), PreconditionError> {
    if !self.output_is_null_sink() && self.output.exists() {
      return Err(PreconditionError::OutputExists(self.output.clone()));
    }
    if !self.input.exists() {
      return Err(PreconditionError::InputMissing(self.input.clone()));
    }
    Ok(())
  }

  pub fn output_is_null_sink(&self) -> bool {
    is_null_sink(&self.output)
  }
}

/// Whether `path` names a device that discards everything written to it
/// (`/dev/null`, or `NUL` on Windows). ffmpeg's stdout outputs (`-`, `pipe`,
/// `pipe:`, `pipe:1`) count too, since the child's stdout is the null device.
/// Nothing is probed or reported for these.
///
/// ```rust
/// use ffmpeg_bar::invocation::is_null_sink;
/// assert!(is_null_sink("/dev/null"));
/// assert!(is_null_sink("nul"));
/// assert!(is_null_sink("-"));
/// assert!(is_null_sink("pipe:1"));
/// assert!(!is_null_sink("out.mp4"));
/// ```
pub fn is_null_sink<P: AsRef<Path>>(path: P) -> bool {
  match path.as_ref().to_str() {
    Some(path) => {
      path == "/dev/null"
        || path.eq_ignore_ascii_case("NUL")
        || ["-", "pipe", "pipe:", "pipe:1"].contains(&path)
    }
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs::File;

  #[test]
  fn test_no_arguments() {
    let err = Invocation::from_args(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ArgumentError::NoArguments));
  }

  #[test]
  fn test_missing_input_marker() {
    let err = Invocation::from_args(["in.mp4", "out.mp4"]).unwrap_err();
    assert!(matches!(err, ArgumentError::MissingInput));
  }

  #[test]
  fn test_input_marker_is_last() {
    let err = Invocation::from_args(["-y", "-i"]).unwrap_err();
    assert!(matches!(err, ArgumentError::MissingInput));
  }

  #[test]
  fn test_first_input_wins() {
    let invocation =
      Invocation::from_args(["-i", "video.mp4", "-i", "audio.m4a", "-map", "0:v", "out.mkv"])
        .unwrap();
    assert_eq!(invocation.input, PathBuf::from("video.mp4"));
    assert_eq!(invocation.output, PathBuf::from("out.mkv"));
    assert_eq!(invocation.args.len(), 7);
  }

  #[test]
  fn test_output_exists() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("out.mp4");
    File::create(&input).unwrap();
    File::create(&output).unwrap();

    let invocation = Invocation::from_args([
      "-i".to_string(),
      input.display().to_string(),
      output.display().to_string(),
    ])
    .unwrap();
    let err = invocation.check_preconditions().unwrap_err();
    assert!(matches!(err, PreconditionError::OutputExists(path) if path == output));
  }

  #[test]
  fn test_input_missing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("out.mp4");

    let invocation = Invocation::from_args([
      "-i".to_string(),
      input.display().to_string(),
      output.display().to_string(),
    ])
    .unwrap();
    let err = invocation.check_preconditions().unwrap_err();
    assert!(matches!(err, PreconditionError::InputMissing(path) if path == input));
  }

  #[test]
  fn test_null_sink_output_is_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mp4");
    File::create(&input).unwrap();

    let invocation = Invocation::from_args([
      "-i".to_string(),
      input.display().to_string(),
      "-f".to_string(),
      "null".to_string(),
      "/dev/null".to_string(),
    ])
    .unwrap();
    assert!(invocation.output_is_null_sink());
    assert!(invocation.check_preconditions().is_ok());
  }

  #[test]
  fn test_stdout_output_is_a_sink() {
    for output in ["-", "pipe", "pipe:", "pipe:1"] {
      let invocation = Invocation::from_args(["-i", "in.mp4", "-f", "null", output]).unwrap();
      assert!(invocation.output_is_null_sink(), "{output}");
    }
    assert!(!is_null_sink("pipe:3"));
    assert!(!is_null_sink("./-"));
  }
}
