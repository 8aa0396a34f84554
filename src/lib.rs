//! Run an FFmpeg transcode behind a live progress bar.
//!
//! The input is probed with ffprobe for its frame count, ffmpeg is launched
//! with the caller's arguments, and every status update on its stderr is
//! redrawn in place as a bar with throughput, elapsed and remaining time and an
//! ETA. Afterwards the output is probed and summarised.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ffmpeg_bar::{clock::SystemClock, invocation::Invocation, run::{run, Options}};
//!
//! fn main() -> ffmpeg_bar::error::Result<()> {
//!   let invocation = Invocation::from_args(["-i", "in.mkv", "-c:v", "libx265", "out.mkv"])?;
//!   let status = run(&invocation, &Options::default(), &SystemClock, &mut std::io::stdout())?;
//!   println!("ffmpeg exited with {status}");
//!   Ok(())
//! }
//! ```
//!


pub mod child;
pub mod clock;
pub mod command;
pub mod error;
pub mod ffprobe;
pub mod format;
pub mod invocation;
pub mod paths;
pub mod progress;
pub mod progress_bar;
pub mod run;
