//! Media properties via `ffprobe -print_format json`.

use std::{
  ffi::OsStr,
  path::Path,
  process::{Command, Stdio},
};

use log::debug;
use serde::Deserialize;

use crate::error::ProbeError;

/// Properties of the first video stream of a media file, plus the size of the
/// whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaProperties {
  /// Frames per second, from `r_frame_rate`.
  pub frame_rate: f64,
  /// Total frame count, from `nb_frames`.
  pub frames: u64,
  pub width: f64,
  pub height: f64,
  /// Stream duration in whole seconds, truncated.
  pub duration: u64,
  /// Bits per second.
  pub bit_rate: u64,
  /// File size in bytes.
  pub size: u64,
}

/// The subset of ffprobe's JSON report that is read. ffprobe encodes most
/// numbers as strings; `width` and `height` are plain numbers.
#[derive(Debug, Deserialize)]
struct ProbeReport {
  streams: Vec<ProbeStream>,
  format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
  r_frame_rate: String,
  nb_frames: String,
  width: f64,
  height: f64,
  duration: String,
  bit_rate: String,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
  size: String,
}

impl MediaProperties {
  /// Decode a report produced by `ffprobe -print_format json -show_format
  /// -show_streams`. Only the first stream is consulted.
  pub fn from_json(json: &[u8]) -> Result<Self, ProbeError> {
    let report: ProbeReport = serde_json::from_slice(json)?;
    let stream = report.streams.first().ok_or(ProbeError::NoStreams)?;

    Ok(Self {
      frame_rate: parse_frame_rate(&stream.r_frame_rate)?,
      frames: parse_field("nb_frames", &stream.nb_frames)?,
      width: stream.width,
      height: stream.height,
      duration: parse_seconds("duration", &stream.duration)?,
      bit_rate: parse_field("bit_rate", &stream.bit_rate)?,
      size: parse_field("size", &report.format.size)?,
    })
  }
}

/// Run ffprobe against `path` and decode its report.
///
/// ffprobe's own stderr is passed through to ours.
pub fn probe<S: AsRef<OsStr>, P: AsRef<Path>>(
  ffprobe_exe: S,
  path: P,
) -> Result<MediaProperties, ProbeError> {
  let mut cmd = Command::new(ffprobe_exe.as_ref());
  cmd
    .args(["-v", "quiet"])
    .args(["-print_format", "json"])
    .arg("-show_format")
    .arg("-show_streams")
    .args(["-select_streams", "v:0"])
    .arg(path.as_ref())
    .stdin(Stdio::null())
    .stderr(Stdio::inherit());
  debug!("running {cmd:?}");

  let output = cmd.output().map_err(ProbeError::Spawn)?;
  if !output.status.success() {
    return Err(ProbeError::Exit(output.status));
  }
  MediaProperties::from_json(&output.stdout)
}

/// Parse an ffprobe rate, either rational like `30000/1001` or decimal like
/// `29.97`.
///
/// ```rust
/// use ffmpeg_bar::ffprobe::parse_frame_rate;
/// assert_eq!(parse_frame_rate("25/1").unwrap(), 25.0);
/// assert_eq!(parse_frame_rate("29.97").unwrap(), 29.97);
/// assert!(parse_frame_rate("0/0").is_err());
/// ```
pub fn parse_frame_rate(rate: &str) -> Result<f64, ProbeError> {
  let malformed = || ProbeError::field("r_frame_rate", rate);
  let value = match rate.split_once('/') {
    Some((num, den)) => {
      let num = num.trim().parse::<f64>().map_err(|_| malformed())?;
      let den = den.trim().parse::<f64>().map_err(|_| malformed())?;
      num / den
    }
    None => rate.trim().parse::<f64>().map_err(|_| malformed())?,
  };
  match value.is_finite() && value >= 0.0 {
    true => Ok(value),
    false => Err(malformed()),
  }
}

fn parse_field(field: &'static str, value: &str) -> Result<u64, ProbeError> {
  value
    .trim()
    .parse::<u64>()
    .map_err(|_| ProbeError::field(field, value))
}

fn parse_seconds(field: &'static str, value: &str) -> Result<u64, ProbeError> {
  match value.trim().parse::<f64>() {
    Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds as u64),
    _ => Err(ProbeError::field(field, value)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const REPORT: &str = r#"{
    "streams": [
      {
        "index": 0,
        "codec_name": "h264",
        "codec_type": "video",
        "width": 1920,
        "height": 1080,
        "r_frame_rate": "30000/1001",
        "duration": "60.060000",
        "bit_rate": "4500000",
        "nb_frames": "1800"
      }
    ],
    "format": {
      "filename": "in.mp4",
      "duration": "60.085333",
      "size": "34125312",
      "bit_rate": "4543590"
    }
  }"#;

  #[test]
  fn test_from_json() {
    let props = MediaProperties::from_json(REPORT.as_bytes()).unwrap();
    assert!((props.frame_rate - 29.97).abs() < 0.001);
    assert_eq!(props.frames, 1800);
    assert_eq!(props.width, 1920.0);
    assert_eq!(props.height, 1080.0);
    assert_eq!(props.duration, 60);
    assert_eq!(props.bit_rate, 4_500_000);
    assert_eq!(props.size, 34_125_312);
  }

  #[test]
  fn test_missing_field_is_decode_error() {
    let json = REPORT.replace(r#""nb_frames": "1800""#, r#""tags": {}"#);
    let err = MediaProperties::from_json(json.as_bytes()).unwrap_err();
    assert!(matches!(err, ProbeError::Decode(_)), "{err:?}");
  }

  #[test]
  fn test_wrong_type_is_decode_error() {
    let json = REPORT.replace(r#""width": 1920"#, r#""width": "1920""#);
    let err = MediaProperties::from_json(json.as_bytes()).unwrap_err();
    assert!(matches!(err, ProbeError::Decode(_)), "{err:?}");
  }

  #[test]
  fn test_not_json() {
    let err = MediaProperties::from_json(b"").unwrap_err();
    assert!(matches!(err, ProbeError::Decode(_)));
  }

  #[test]
  fn test_no_streams() {
    let json = r#"{ "streams": [], "format": { "size": "10" } }"#;
    let err = MediaProperties::from_json(json.as_bytes()).unwrap_err();
    assert!(matches!(err, ProbeError::NoStreams));
  }

  #[test]
  fn test_malformed_number() {
    let json = REPORT.replace(r#""bit_rate": "4500000""#, r#""bit_rate": "N/A""#);
    let err = MediaProperties::from_json(json.as_bytes()).unwrap_err();
    assert!(
      matches!(err, ProbeError::Field { field: "bit_rate", ref value } if value == "N/A"),
      "{err:?}"
    );
  }

  #[test]
  fn test_frame_rate_forms() {
    assert_eq!(parse_frame_rate("30/1").unwrap(), 30.0);
    assert_eq!(parse_frame_rate("25").unwrap(), 25.0);
    assert_eq!(parse_frame_rate("24000/1001").unwrap(), 24000.0 / 1001.0);
    assert!(parse_frame_rate("0/0").is_err());
    assert!(parse_frame_rate("1/0").is_err());
    assert!(parse_frame_rate("-25").is_err());
    assert!(parse_frame_rate("abc/1").is_err());
    assert!(parse_frame_rate("").is_err());
  }

  #[test]
  fn test_duration_truncates() {
    assert_eq!(parse_seconds("duration", "10.999").unwrap(), 10);
    assert!(parse_seconds("duration", "-1.0").is_err());
  }
}
