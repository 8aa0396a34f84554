use std::{
  env::current_exe,
  io,
  path::{Path, PathBuf},
};

/// Path of the `ffmpeg` executable to launch: a binary adjacent to our own
/// executable if there is one, otherwise plain `ffmpeg` to be resolved through
/// the system `PATH`.
pub fn ffmpeg_path() -> PathBuf {
  sidecar_or_path("ffmpeg")
}

/// Same lookup as [`ffmpeg_path`], for `ffprobe`. Note that not all FFmpeg
/// distributions include ffprobe.
pub fn ffprobe_path() -> PathBuf {
  sidecar_or_path("ffprobe")
}

fn sidecar_or_path(name: &str) -> PathBuf {
  match sidecar_path(name) {
    Ok(path) if path.exists() => path,
    _ => Path::new(name).to_path_buf(),
  }
}

/// The (expected) path to a tool binary adjacent to the Rust binary, with
/// `.exe` appended on Windows.
pub fn sidecar_path(name: &str) -> io::Result<PathBuf> {
  let mut path = current_exe()?
    .parent()
    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "current exe has no parent"))?
    .join(name);
  if cfg!(windows) {
    path.set_extension("exe");
  }
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sidecar_next_to_current_exe() {
    let exe_dir = current_exe().unwrap().parent().unwrap().to_path_buf();
    let path = sidecar_path("ffprobe").unwrap();
    assert_eq!(path.parent().unwrap(), exe_dir);
    assert_eq!(path.file_stem().unwrap(), "ffprobe");
  }

  #[test]
  fn test_falls_back_to_bare_name() {
    assert_eq!(
      sidecar_or_path("no-such-sidecar-tool"),
      PathBuf::from("no-such-sidecar-tool")
    );
  }
}
