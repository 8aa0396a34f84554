use std::{
  io,
  process::{Child, ChildStderr, ExitStatus},
};

/// A wrapper around [`std::process::Child`] containing a spawned FFmpeg
/// command whose stderr carries the status stream.
pub struct FfmpegChild {
  inner: Child,
}

impl FfmpegChild {
  /// Take ownership of the stderr pipe. Returns `None` if it was already taken
  /// or the command was not configured with a piped stderr.
  pub fn take_stderr(&mut self) -> Option<ChildStderr> {
    self.inner.stderr.take()
  }

  /// Block until the process exits.
  ///
  /// Identical to `wait` in [`std::process::Child`].
  pub fn wait(&mut self) -> io::Result<ExitStatus> {
    self.inner.wait()
  }

  /// Identical to `kill` in [`std::process::Child`].
  pub fn kill(&mut self) -> io::Result<()> {
    self.inner.kill()
  }

  pub(crate) fn from_inner(inner: Child) -> Self {
    Self { inner }
  }
}
