//! Writing a byte stream to a file on disk.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Copy all of `content` into `path`, creating missing parent directories
/// and truncating an existing file. Returns the number of bytes written.
pub fn download(mut content: impl Read, path: &Path) -> Result<u64> {
    let mut file = create_output_file(path)?;
    let written = io::copy(&mut content, &mut file).map_err(Error::io("failed to write to file"))?;
    debug!("wrote {written} bytes to {}", path.display());
    Ok(written)
}

/// Create (or truncate) `path` after creating its parent directories.
pub fn create_output_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(Error::io("failed to create directory"))?;
    }
    File::create(path).map_err(Error::io("failed to create file"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories_and_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/data.bin");
        let bytes: Vec<u8> = (0..=255).collect();

        let written = download(&bytes[..], &path).unwrap();
        assert_eq!(written, 256);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, "a much longer previous content").unwrap();

        download(&b"short"[..], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        assert!(create_output_file(&path).is_ok());
    }

    #[test]
    fn parent_that_is_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = download(&b"x"[..], &blocker.join("data.bin")).unwrap_err();
        match err {
            Error::Io { context, .. } => assert_eq!(context, "failed to create directory"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
