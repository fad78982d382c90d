//! Output file naming and atomic writes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, TimeZone};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::MergeError;
use crate::options::{ResolvedOptions, Target};
use crate::ports::Destination;

/// Upper bound on `-N` suffixes tried for a generated file name.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Directories used for engine-generated output names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Directory for [`Target::Temp`].
    pub temp_dir: PathBuf,
    /// Directory for [`Target::Disk`].
    pub output_dir: PathBuf,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self { temp_dir: std::env::temp_dir(), output_dir: PathBuf::from(".") }
    }
}

impl OutputDirs {
    /// The directory a target maps to.
    #[must_use]
    pub fn for_target(&self, target: Target) -> &Path {
        match target {
            Target::Temp => &self.temp_dir,
            Target::Disk => &self.output_dir,
        }
    }
}

/// File stem for a generated output: `IMG_<yyyyMMdd_HHmmss>`.
#[must_use]
pub fn generated_stem<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("IMG_{}", now.format("%Y%m%d_%H%M%S"))
}

/// File name for the `attempt`-th candidate: `stem.ext`, then `stem-1.ext`, ...
#[must_use]
pub fn candidate_name(stem: &str, extension: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{stem}.{extension}")
    } else {
        format!("{stem}-{attempt}.{extension}")
    }
}

/// Pick the destination for a merge: the explicit path when one was given,
/// otherwise a generated name in the target's directory.
#[must_use]
pub fn resolve_destination<Tz: TimeZone>(
    options: &ResolvedOptions,
    dirs: &OutputDirs,
    now: &DateTime<Tz>,
) -> Destination
where
    Tz::Offset: std::fmt::Display,
{
    match options.destination {
        Some(ref path) => Destination::Exact(path.clone()),
        None => Destination::Generated {
            dir: dirs.for_target(options.target).to_path_buf(),
            stem: generated_stem(now),
            extension: options.format.extension(),
        },
    }
}

fn interrupted(path: &Path) -> MergeError {
    MergeError::write(path, io::Error::new(io::ErrorKind::Interrupted, "merge was cancelled"))
}

/// Write `bytes` to `destination` via a temporary file in the same
/// directory that is renamed into place.
///
/// `cancelled` is checked once the bytes are synced, immediately before the
/// rename. If it is set, the temp file is discarded and nothing at the
/// destination is touched. A rename that has already happened is never
/// undone: the file in place is complete.
///
/// # Errors
///
/// Returns [`MergeError::Write`] on any I/O failure or on cancellation.
pub fn write_atomic(
    destination: &Destination,
    bytes: &[u8],
    cancelled: &AtomicBool,
) -> Result<PathBuf, MergeError> {
    let dir = destination.dir();
    let shown = destination.display_path();

    fs::create_dir_all(dir).map_err(|e| MergeError::write(&shown, e))?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".merge-images-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| MergeError::write(&shown, e))?;
    tmp.write_all(bytes).map_err(|e| MergeError::write(&shown, e))?;
    tmp.as_file().sync_all().map_err(|e| MergeError::write(&shown, e))?;

    if cancelled.load(Ordering::SeqCst) {
        debug!(destination = %shown.display(), "write cancelled, discarding temp file");
        if let Err(e) = tmp.close() {
            warn!(destination = %shown.display(), error = %e, "failed to remove temp file");
        }
        return Err(interrupted(&shown));
    }

    match destination {
        Destination::Exact(path) => {
            tmp.persist(path).map_err(|e| MergeError::write(path, e.error))?;
            Ok(path.clone())
        }
        Destination::Generated { dir, stem, extension } => persist_unique(tmp, dir, stem, extension),
    }
}

fn persist_unique(
    mut tmp: NamedTempFile,
    dir: &Path,
    stem: &str,
    extension: &str,
) -> Result<PathBuf, MergeError> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(candidate_name(stem, extension, attempt));
        match tmp.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => tmp = e.file,
            Err(e) => return Err(MergeError::write(path, e.error)),
        }
    }
    Err(MergeError::write(
        dir.join(candidate_name(stem, extension, 0)),
        io::Error::new(io::ErrorKind::AlreadyExists, "no free output file name"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::options::{MergeOptions, OutputFormat};
    use chrono::Utc;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn stem_format() {
        assert_eq!(generated_stem(&fixed_time()), "IMG_20260304_050607");
    }

    #[test]
    fn candidate_names() {
        assert_eq!(candidate_name("IMG_x", "jpg", 0), "IMG_x.jpg");
        assert_eq!(candidate_name("IMG_x", "jpg", 2), "IMG_x-2.jpg");
    }

    #[test]
    fn resolve_explicit() {
        let options = MergeOptions {
            destination: Some(PathBuf::from("merged.png")),
            ..MergeOptions::default()
        }
        .resolve()
        .unwrap();
        let dest = resolve_destination(&options, &OutputDirs::default(), &fixed_time());
        assert_eq!(dest, Destination::Exact(PathBuf::from("merged.png")));
    }

    #[test]
    fn resolve_generated_per_target() {
        let dirs = OutputDirs { temp_dir: "/cache".into(), output_dir: "/files".into() };
        let temp = MergeOptions::default().resolve().unwrap();
        let disk = MergeOptions { target: Target::Disk, format: OutputFormat::Png, ..MergeOptions::default() }
            .resolve()
            .unwrap();

        assert_eq!(
            resolve_destination(&temp, &dirs, &fixed_time()),
            Destination::Generated {
                dir: "/cache".into(),
                stem: "IMG_20260304_050607".into(),
                extension: "jpg"
            }
        );
        assert_eq!(
            resolve_destination(&disk, &dirs, &fixed_time()),
            Destination::Generated {
                dir: "/files".into(),
                stem: "IMG_20260304_050607".into(),
                extension: "png"
            }
        );
    }

    #[test]
    fn writes_exact_path_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        fs::write(&path, b"old").unwrap();

        let written =
            write_atomic(&Destination::Exact(path.clone()), b"new", &AtomicBool::new(false)).unwrap();

        assert_eq!(written, path);
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(entries(dir.path()), vec!["out.jpg"]);
    }

    #[test]
    fn generated_names_never_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let dest = Destination::Generated {
            dir: dir.path().to_path_buf(),
            stem: "IMG_20260304_050607".into(),
            extension: "jpg",
        };

        let first = write_atomic(&dest, b"one", &AtomicBool::new(false)).unwrap();
        let second = write_atomic(&dest, b"two", &AtomicBool::new(false)).unwrap();

        assert_eq!(first, dir.path().join("IMG_20260304_050607.jpg"));
        assert_eq!(second, dir.path().join("IMG_20260304_050607-1.jpg"));
        assert_eq!(fs::read(&first).unwrap(), b"one");
        assert_eq!(fs::read(&second).unwrap(), b"two");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let dest = Destination::Generated { dir: nested.clone(), stem: "IMG_1".into(), extension: "png" };

        let path = write_atomic(&dest, b"x", &AtomicBool::new(false)).unwrap();

        assert_eq!(path, nested.join("IMG_1.png"));
    }

    #[test]
    fn cancelled_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");

        let err = write_atomic(&Destination::Exact(path.clone()), b"data", &AtomicBool::new(true))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(!path.exists());
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn cancelled_write_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        fs::write(&path, b"old").unwrap();

        let err = write_atomic(&Destination::Exact(path.clone()), b"new", &AtomicBool::new(true))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(fs::read(&path).unwrap(), b"old");
        assert_eq!(entries(dir.path()), vec!["out.jpg"]);
    }

    #[test]
    fn cancelled_generated_write_claims_no_name() {
        let dir = tempfile::tempdir().unwrap();
        let dest = Destination::Generated { dir: dir.path().to_path_buf(), stem: "IMG_1".into(), extension: "png" };

        write_atomic(&dest, b"x", &AtomicBool::new(true)).unwrap_err();
        let path = write_atomic(&dest, b"y", &AtomicBool::new(false)).unwrap();

        assert_eq!(path, dir.path().join("IMG_1.png"));
        assert_eq!(entries(dir.path()), vec!["IMG_1.png"]);
    }

    #[test]
    fn unwritable_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();
        // A regular file where a directory is expected.
        let dest = Destination::Exact(blocker.join("out.jpg"));

        let err = write_atomic(&dest, b"data", &AtomicBool::new(false)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
    }
}
