use std::{
  ffi::OsStr,
  fmt, io,
  process::{Command, CommandArgs, Stdio},
};

use log::debug;

use crate::child::FfmpegChild;

/// A wrapper around [`std::process::Command`] for the transcode child.
///
/// Arguments are passed through untouched: no log level or other flags are
/// added, since the caller's command line is forwarded verbatim. stderr is
/// piped so the status stream can be read; stdin and stdout go to the null
/// device so FFmpeg neither waits on keyboard input nor scribbles over the
/// progress line.
pub struct FfmpegCommand {
  inner: Command,
}

impl FfmpegCommand {
  /// Adds an argument to pass to the program.
  ///
  /// Identical to `arg` in [`std::process::Command`].
  pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
    self.inner.arg(arg.as_ref());
    self
  }

  /// Adds multiple arguments to pass to the program.
  ///
  /// Identical to `args` in [`std::process::Command`].
  pub fn args<I, S>(&mut self, args: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    for arg in args {
      self.arg(arg.as_ref());
    }
    self
  }

  /// Returns an iterator of the arguments that will be passed to the program.
  ///
  /// Identical to `get_args` in [`std::process::Command`].
  pub fn get_args(&self) -> CommandArgs<'_> {
    self.inner.get_args()
  }

  /// Spawn the ffmpeg command as a child process, wrapping it in a
  /// `FfmpegChild` interface.
  pub fn spawn(&mut self) -> io::Result<FfmpegChild> {
    debug!("spawning {:?}", self.inner);
    self.inner.spawn().map(FfmpegChild::from_inner)
  }

  //// Constructors
  pub fn new_with_exe<S: AsRef<OsStr>>(exe: S) -> Self {
    let mut inner = Command::new(&exe);
    inner.stdin(Stdio::null());
    inner.stdout(Stdio::null());
    inner.stderr(Stdio::piped());
    Self { inner }
  }
}

impl fmt::Debug for FfmpegCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.inner.fmt(f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_args_forwarded_verbatim() {
    let mut cmd = FfmpegCommand::new_with_exe("ffmpeg");
    cmd.args(["-i", "in.mp4"]).arg("-c:v").arg("libx264").arg("out.mp4");
    let args: Vec<&OsStr> = cmd.get_args().collect();
    assert_eq!(args, ["-i", "in.mp4", "-c:v", "libx264", "out.mp4"]);
  }
}
