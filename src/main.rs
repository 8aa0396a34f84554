use std::{io, process::ExitCode};

use anyhow::Context;
use ffmpeg_bar::{
  clock::SystemClock,
  invocation::Invocation,
  run::{run, Options},
};

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  match try_main() {
    Ok(code) => ExitCode::from(code),
    Err(e) => {
      eprintln!("\nError: {e:#}");
      ExitCode::FAILURE
    }
  }
}

fn try_main() -> anyhow::Result<u8> {
  let invocation = Invocation::from_args(std::env::args().skip(1))
    .context("usage: ffmpegbar <ffmpeg arguments> -i <input> ... <output>")?;
  let status = run(
    &invocation,
    &Options::default(),
    &SystemClock,
    &mut io::stdout().lock(),
  )?;
  Ok(exit_code(status.code()))
}

/// A child killed by a signal has no code; codes that do not fit a `u8` (as on
/// Windows) must not wrap around to success.
fn exit_code(code: Option<i32>) -> u8 {
  code.and_then(|code| u8::try_from(code).ok()).unwrap_or(1)
}
