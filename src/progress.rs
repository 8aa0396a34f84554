//! Parsing of FFmpeg's in-place status updates.
//!
//! While transcoding, FFmpeg redraws a status line on stderr by ending each
//! update with `\r` instead of `\n`:
//!
//! ```text
//! frame=  120 fps= 29.97 q=-1.0 size=    1024kB time=00:00:04.00 bitrate=2097.2kbits/s speed=1.2x
//! ```
//!
//! [`StatusReader`] splits the stream on carriage returns, and
//! [`parse_progress_line`] pulls the frame index and instantaneous fps out of
//! each chunk.

use std::io::{BufRead, BufReader, ErrorKind, Read};

use once_cell::sync::Lazy;
use regex::Regex;

/// `frame=<frame> fps=<fps> q=...`, anchored at the start of the line.
/// `q=` is optional so a truncated final update still yields its fps.
static PROGRESS_LINE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?s)\Aframe=(?P<frame>.*?)fps=(?P<fps>.*?)(?:q=|\z)")
    .expect("progress pattern is valid")
});

/// Frame index and instantaneous frame rate from one status update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressSample {
  /// index of the current output frame
  pub frame: u64,

  /// frames per second
  pub fps: f64,
}

/// Parse a status update, or `None` if `line` is not one.
///
/// A line is a status update when it starts with `frame=` and carries an
/// `fps=` marker after it. The fields themselves are parsed leniently: a value
/// that is not a number becomes `0`.
///
/// ```rust
/// use ffmpeg_bar::progress::try_parse_progress;
/// let line = "frame= 1996 fps=1984 q=-1.0 Lsize=     372kB time=00:01:19.72 bitrate=  38.2kbits/s speed=79.2x\r";
/// let progress = try_parse_progress(line).unwrap();
/// assert_eq!(progress.frame, 1996);
/// assert_eq!(progress.fps, 1984.0);
///
/// assert!(try_parse_progress("[info] Press [q] to stop").is_none());
/// ```
pub fn try_parse_progress(line: &str) -> Option<ProgressSample> {
  let captures = PROGRESS_LINE.captures(line)?;
  let frame = captures["frame"].trim().parse::<u64>().unwrap_or(0);
  let fps = captures["fps"].trim().parse::<f64>().unwrap_or(0.0);
  Some(ProgressSample { frame, fps })
}

/// Parse a status update, yielding the zero sample for anything that is not
/// one. Never fails, since the stream interleaves status updates with ordinary
/// log output.
///
/// ```rust
/// use ffmpeg_bar::progress::{parse_progress_line, ProgressSample};
/// let sample = parse_progress_line("frame=  120 fps= 29.97 q=-1.0");
/// assert_eq!(sample, ProgressSample { frame: 120, fps: 29.97 });
/// assert_eq!(parse_progress_line("not progress"), ProgressSample::default());
/// ```
pub fn parse_progress_line(line: &str) -> ProgressSample {
  try_parse_progress(line).unwrap_or_default()
}

/// Reads carriage-return delimited chunks from FFmpeg's stderr.
///
/// A chunk is the text between two consecutive `\r`. Log lines ending in `\n`
/// are not split out; they stay attached to whatever chunk they fall into.
pub struct StatusReader<R: Read> {
  reader: BufReader<R>,
}

impl<R: Read> StatusReader<R> {
  pub fn new(inner: R) -> Self {
    Self {
      reader: BufReader::new(inner),
    }
  }

  /// Read the next chunk, without its trailing `\r`. Returns `None` once a
  /// read comes back empty.
  ///
  /// Bytes that are not valid UTF-8 are replaced rather than treated as an
  /// error, so a stray byte in a filename cannot stop the read loop.
  pub fn read_status_line(&mut self) -> std::io::Result<Option<String>> {
    let mut buf = Vec::<u8>::new();
    loop {
      match self.reader.read_until(b'\r', &mut buf) {
        Ok(0) => return Ok(None),
        Ok(_) => break,
        Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
        Err(e) => return Err(e),
      }
    }
    if buf.last() == Some(&b'\r') {
      buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
  }
}

impl<R: Read> Iterator for StatusReader<R> {
  type Item = std::io::Result<String>;

  fn next(&mut self) -> Option<Self::Item> {
    self.read_status_line().transpose()
  }
}
