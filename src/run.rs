//! The probe → transcode → probe → report pipeline.

use std::{
  io::{Read, Write},
  path::{Path, PathBuf},
  process::ExitStatus,
};

use log::{debug, info, warn};

use crate::{
  clock::Clock,
  command::FfmpegCommand,
  error::{Error, Result},
  ffprobe::{probe, MediaProperties},
  format::{format_elapsed, format_size},
  invocation::Invocation,
  paths::{ffmpeg_path, ffprobe_path},
  progress::{try_parse_progress, ProgressSample, StatusReader},
  progress_bar::render_progress,
};

/// Bar width used by the command-line front end.
pub const BAR_WIDTH: usize = 20;

/// Executables and layout for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
  pub ffmpeg_exe: PathBuf,
  pub ffprobe_exe: PathBuf,
  pub bar_width: usize,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      ffmpeg_exe: ffmpeg_path(),
      ffprobe_exe: ffprobe_path(),
      bar_width: BAR_WIDTH,
    }
  }
}

/// Run ffmpeg with `invocation.args`, drawing progress to `out`.
///
/// Returns the exit status of the ffmpeg process. Preconditions, the input
/// probe and, for a successful run into a real file, the output probe must all
/// succeed; any failure among them is returned as an error before or after
/// ffmpeg runs. ffmpeg is never launched if the preconditions or the input
/// probe fail, and it is killed and reaped if reading its status stream or
/// drawing to `out` fails.
pub fn run<C: Clock, W: Write>(
  invocation: &Invocation,
  options: &Options,
  clock: &C,
  out: &mut W,
) -> Result<ExitStatus> {
  invocation.check_preconditions()?;

  info!("probing input {}", invocation.input.display());
  let input = probe(&options.ffprobe_exe, &invocation.input)
    .map_err(|e| Error::probe(&invocation.input, e))?;
  debug!("input properties: {input:?}");

  let start = clock.now();
  let mut child = FfmpegCommand::new_with_exe(&options.ffmpeg_exe)
    .args(&invocation.args)
    .spawn()
    .map_err(Error::Launch)?;
  let stderr = child
    .take_stderr()
    .ok_or_else(|| Error::Launch(std::io::Error::other("ffmpeg stderr was not piped")))?;

  if let Err(e) = stream_progress(stderr, &input, start, options, clock, out) {
    warn!("stopping ffmpeg: {e}");
    let _ = child.kill();
    let _ = child.wait();
    return Err(e);
  }

  let status = child.wait()?;
  if !status.success() {
    warn!("ffmpeg exited with {status}");
    return Ok(status);
  }
  if invocation.output_is_null_sink() {
    info!("output is a null sink, skipping report");
    return Ok(status);
  }

  info!("probing output {}", invocation.output.display());
  let output = probe(&options.ffprobe_exe, &invocation.output)
    .map_err(|e| Error::probe(&invocation.output, e))?;
  write_report(out, &invocation.output, &output)?;
  Ok(status)
}

/// Redraw the bar for every status line until ffmpeg closes stderr, then draw
/// it full and end the line.
fn stream_progress<R: Read, C: Clock, W: Write>(
  stderr: R,
  input: &MediaProperties,
  start: i64,
  options: &Options,
  clock: &C,
  out: &mut W,
) -> Result<()> {
  let mut last = ProgressSample::default();
  for line in StatusReader::new(stderr) {
    let line = line?;
    let Some(sample) = try_parse_progress(&line) else {
      debug!("ffmpeg: {}", line.trim_end());
      continue;
    };
    last = sample;
    draw(out, sample.fps, sample.frame, input.frames, start, options, clock)?;
  }
  draw(out, last.fps, input.frames, input.frames, start, options, clock)?;
  writeln!(out)?;
  Ok(())
}

fn draw<C: Clock, W: Write>(
  out: &mut W,
  fps: f64,
  frame: u64,
  total: u64,
  start: i64,
  options: &Options,
  clock: &C,
) -> Result<()> {
  let bar = render_progress(frame, total, start, options.bar_width, clock);
  write!(out, "\r{fps:.2} fps {bar}")?;
  out.flush()?;
  Ok(())
}

/// Print the summary block for a finished output file.
pub fn write_report<W: Write>(out: &mut W, path: &Path, props: &MediaProperties) -> Result<()> {
  writeln!(out, "==> Output file: {}", path.display())?;
  writeln!(out, "- Resolution: {} x {}", props.width, props.height)?;
  writeln!(out, "- Framerate: {:.2}fps", props.frame_rate)?;
  writeln!(out, "- Duration: {}", format_elapsed(props.duration as i64))?;
  writeln!(out, "- Bitrate: {}", format_size(props.bit_rate, "b", 2))?;
  writeln!(out, "- Size: {}", format_size(props.size, "B", 2))?;
  Ok(())
}
