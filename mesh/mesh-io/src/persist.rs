//! Atomic file output.
//!
//! Encoders write into a staging file created in the destination's
//! directory. The staging file is renamed over the destination only after
//! the encoder returns successfully; on any failure it is removed and the
//! destination is left untouched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Run `encode` against a staging file and move the result to `path`.
///
/// # Errors
///
/// Returns the encoder's error, an [`IoError::Io`] if the staging file
/// cannot be created or flushed, or [`IoError::Persist`] if the final
/// rename fails.
pub(crate) fn write_atomic<P, F>(path: P, encode: F) -> IoResult<u64>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<&mut File>) -> IoResult<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        encode(&mut writer)?;
        writer.flush()?;
    }

    let size = staging.as_file().metadata()?.len();
    staging.persist(path).map_err(|e| IoError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), bytes = size, "Persisted mesh file");
    Ok(size)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn successful_encode_lands_at_destination() {
        let temp_dir = tempfile::tempdir().ok();
        if let Some(dir) = temp_dir.as_ref() {
            let path = dir.path().join("out.bin");
            let size = write_atomic(&path, |w| {
                w.write_all(b"voxels")?;
                Ok(())
            })
            .unwrap();

            assert_eq!(size, 6);
            assert_eq!(std::fs::read(&path).unwrap(), b"voxels");
        }
    }

    #[test]
    fn failed_encode_leaves_nothing_behind() {
        let temp_dir = tempfile::tempdir().ok();
        if let Some(dir) = temp_dir.as_ref() {
            let path = dir.path().join("out.bin");
            let result = write_atomic(&path, |w| {
                w.write_all(b"partial")?;
                Err(IoError::invalid_content("encoder gave up"))
            });

            assert!(result.is_err());
            assert!(!path.exists());
            assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        }
    }

    #[test]
    fn failed_encode_keeps_previous_file() {
        let temp_dir = tempfile::tempdir().ok();
        if let Some(dir) = temp_dir.as_ref() {
            let path = dir.path().join("out.bin");
            std::fs::write(&path, b"old").unwrap();

            let result = write_atomic(&path, |_| Err(IoError::invalid_content("nope")));
            assert!(result.is_err());
            assert_eq!(std::fs::read(&path).unwrap(), b"old");
        }
    }
}
