//! # File Boundary
//!
//! Deck files come from and go to places the library does not own: a file picker,
//! a sandboxed document folder, a share sheet. This module is the seam.
//!
//! - [`FileSource`] reads user-chosen files. Some platforms hand out a transient
//!   read grant per file; [`ScopedAccess`] takes the grant and gives it back on drop,
//!   so a failed read never leaks it.
//! - [`FileSink`] receives finished export payloads. The library produces bytes and
//!   a suggested name, never a final location.
//!
//! [`LocalFiles`] and [`DirectorySink`] are the plain filesystem versions.

use crate::error::{DeckError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Where imported deck files are read from.
pub trait FileSource {
    /// Asks for read access to `path`. Returns false when access is refused.
    fn start_access(&self, path: &Path) -> bool;

    /// Gives back access taken with [`FileSource::start_access`].
    fn stop_access(&self, path: &Path);

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Read access to one file, released when dropped.
pub struct ScopedAccess<'a, S: FileSource + ?Sized> {
    source: &'a S,
    path: &'a Path,
}

impl<'a, S: FileSource + ?Sized> ScopedAccess<'a, S> {
    pub fn acquire(source: &'a S, path: &'a Path) -> Result<Self> {
        if !source.start_access(path) {
            return Err(DeckError::FileAccess(path.to_path_buf()));
        }
        Ok(Self { source, path })
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        self.source.read(self.path).map_err(|source| DeckError::FileIo {
            path: self.path.to_path_buf(),
            source,
        })
    }
}

impl<S: FileSource + ?Sized> Drop for ScopedAccess<'_, S> {
    fn drop(&mut self) {
        self.source.stop_access(self.path);
    }
}

/// Plain filesystem reads; access is always granted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFiles;

impl FileSource for LocalFiles {
    fn start_access(&self, _path: &Path) -> bool {
        true
    }

    fn stop_access(&self, _path: &Path) {}

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// A finished export, ready to be handed to a save dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

/// Where export payloads are delivered.
pub trait FileSink {
    /// Stores the file, returning where it ended up.
    fn save(&mut self, file: &ExportFile) -> io::Result<PathBuf>;
}

/// Writes exports into a directory, replacing files of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, file: &ExportFile) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(&file.file_name);

        // Atomic write: a reader never sees half an export.
        let tmp = self.dir.join(format!(".export-{}.tmp", Uuid::new_v4()));
        let written = fs::write(&tmp, &file.data).and_then(|_| fs::rename(&tmp, &target));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(target)
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    /// In-memory files with per-path access control. Tracks outstanding grants.
    #[derive(Default)]
    pub struct MemoryFiles {
        files: HashMap<PathBuf, Vec<u8>>,
        denied: HashSet<PathBuf>,
        granted: RefCell<Vec<PathBuf>>,
        released: RefCell<Vec<PathBuf>>,
    }

    impl MemoryFiles {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
            self.files.insert(path.into(), data.into());
            self
        }

        pub fn with_denied(mut self, path: impl Into<PathBuf>) -> Self {
            self.denied.insert(path.into());
            self
        }

        /// Grants taken but not yet given back.
        pub fn outstanding(&self) -> usize {
            self.granted.borrow().len() - self.released.borrow().len()
        }
    }

    impl FileSource for MemoryFiles {
        fn start_access(&self, path: &Path) -> bool {
            if self.denied.contains(path) {
                return false;
            }
            self.granted.borrow_mut().push(path.to_path_buf());
            true
        }

        fn stop_access(&self, path: &Path) {
            self.released.borrow_mut().push(path.to_path_buf());
        }

        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    /// Collects exports instead of writing them anywhere.
    #[derive(Default)]
    pub struct MemorySink {
        pub saved: Vec<ExportFile>,
        pub fail: bool,
    }

    impl FileSink for MemorySink {
        fn save(&mut self, file: &ExportFile) -> io::Result<PathBuf> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.saved.push(file.clone());
            Ok(PathBuf::from(format!("memory://{}", file.file_name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryFiles;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scoped_access_releases_on_drop() {
        let files = MemoryFiles::new().with_file("/a.flexideck", b"data".to_vec());
        {
            let access = ScopedAccess::acquire(&files, Path::new("/a.flexideck")).unwrap();
            assert_eq!(files.outstanding(), 1);
            assert_eq!(access.read().unwrap(), b"data");
        }
        assert_eq!(files.outstanding(), 0);
    }

    #[test]
    fn scoped_access_releases_after_failed_read() {
        let files = MemoryFiles::new();
        {
            let access = ScopedAccess::acquire(&files, Path::new("/missing")).unwrap();
            match access.read() {
                Err(DeckError::FileIo { path, .. }) => assert_eq!(path, Path::new("/missing")),
                _ => panic!("expected FileIo"),
            }
        }
        assert_eq!(files.outstanding(), 0);
    }

    #[test]
    fn refused_access_is_file_access_error() {
        let files = MemoryFiles::new()
            .with_file("/locked", b"x".to_vec())
            .with_denied("/locked");
        match ScopedAccess::acquire(&files, Path::new("/locked")) {
            Err(DeckError::FileAccess(path)) => assert_eq!(path, Path::new("/locked")),
            _ => panic!("expected FileAccess"),
        }
        assert_eq!(files.outstanding(), 0);
    }

    #[test]
    fn local_files_read_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.flexideck");
        fs::write(&path, b"{}").unwrap();

        let access = ScopedAccess::acquire(&LocalFiles, &path).unwrap();
        assert_eq!(access.read().unwrap(), b"{}");
    }

    #[test]
    fn directory_sink_writes_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("exports"));
        let file = ExportFile {
            file_name: "Spanish.flexideck".into(),
            content_type: "application/json",
            data: b"payload".to_vec(),
        };

        let saved = sink.save(&file).unwrap();
        assert_eq!(saved, sink.dir().join("Spanish.flexideck"));
        assert_eq!(fs::read(&saved).unwrap(), b"payload");

        let names: Vec<String> = fs::read_dir(sink.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Spanish.flexideck"]);
    }

    #[test]
    fn directory_sink_cleans_up_after_failed_save() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("Spanish.flexideck");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), b"x").unwrap();

        let mut sink = DirectorySink::new(dir.path());
        let file = ExportFile {
            file_name: "Spanish.flexideck".into(),
            content_type: "application/json",
            data: b"payload".to_vec(),
        };
        assert!(sink.save(&file).is_err());

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Spanish.flexideck"]);
    }
}
