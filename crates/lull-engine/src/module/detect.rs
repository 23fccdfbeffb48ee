use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Reports whether the watched module has changed since the last poll.
pub trait ChangeDetector {
    /// Returns `true` once per observed change.
    fn poll(&mut self) -> bool;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

/// Detects changes by modification time and length.
///
/// A missing file has no stamp; its appearance counts as a change.
#[derive(Debug, Clone)]
pub struct FileStamp {
    path: PathBuf,
    stamp: Option<Stamp>,
}

impl FileStamp {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stamp = read_stamp(&path);
        Self { path, stamp }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChangeDetector for FileStamp {
    fn poll(&mut self) -> bool {
        let current = read_stamp(&self.path);
        if current == self.stamp {
            return false;
        }
        self.stamp = current;
        // A deletion alone is not worth a reload; wait for the new file.
        current.is_some()
    }
}

fn read_stamp(path: &Path) -> Option<Stamp> {
    let meta = fs::metadata(path).ok()?;
    if !meta.is_file() {
        return None;
    }
    Some(Stamp {
        modified: meta.modified().ok(),
        len: meta.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_file_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.so");
        fs::write(&path, b"one").unwrap();
        let mut d = FileStamp::new(&path);
        assert!(!d.poll());
        assert!(!d.poll());
    }

    #[test]
    fn rewrite_with_new_length_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.so");
        fs::write(&path, b"one").unwrap();
        let mut d = FileStamp::new(&path);
        fs::write(&path, b"one two").unwrap();
        assert!(d.poll());
        assert!(!d.poll());
    }

    #[test]
    fn appearing_file_is_a_change_and_deletion_is_not() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.so");
        let mut d = FileStamp::new(&path);
        assert!(!d.poll());
        fs::write(&path, b"lib").unwrap();
        assert!(d.poll());
        fs::remove_file(&path).unwrap();
        assert!(!d.poll());
    }
}
