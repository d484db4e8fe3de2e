//! Uploaded learning-material files
//!
//! Only file metadata (name, path, size) is kept. Files are checked against
//! the [`UploadPolicy`] when added.

use crate::config::UploadPolicy;
use crate::quiz::{UploadedFile, format_size_mb};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Reasons an upload is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("{name}: unsupported file type (allowed: {allowed})")]
    UnsupportedExtension { name: String, allowed: String },

    #[error("{name}: file is {size}, limit is {limit}")]
    TooLarge {
        name: String,
        size: String,
        limit: String,
    },

    #[error("at most {limit} files can be uploaded")]
    TooManyFiles { limit: usize },

    #[error("{name} is already uploaded")]
    Duplicate { name: String },

    #[error("cannot read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
}

/// Ordered list of uploaded files
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadList {
    files: Vec<UploadedFile>,
    policy: UploadPolicy,
}

impl UploadList {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            files: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Check a file against the policy without adding it
    pub fn check(&self, file: &UploadedFile) -> Result<(), UploadError> {
        let allowed = file
            .extension()
            .map(|ext| self.policy.allows_extension(&ext))
            .unwrap_or(false);
        if !allowed {
            return Err(UploadError::UnsupportedExtension {
                name: file.name.clone(),
                allowed: self.policy.extensions_label(),
            });
        }

        if file.size_bytes > self.policy.max_file_bytes {
            return Err(UploadError::TooLarge {
                name: file.name.clone(),
                size: file.size_label(),
                limit: format_size_mb(self.policy.max_file_bytes),
            });
        }

        if self.files.len() >= self.policy.max_files {
            return Err(UploadError::TooManyFiles {
                limit: self.policy.max_files,
            });
        }

        if self.files.iter().any(|f| f.path == file.path) {
            return Err(UploadError::Duplicate {
                name: file.name.clone(),
            });
        }

        Ok(())
    }

    /// Append a file after checking it
    pub fn add(&mut self, file: UploadedFile) -> Result<(), UploadError> {
        self.check(&file)?;
        debug!(name = %file.name, size_bytes = file.size_bytes, "Upload accepted");
        self.files.push(file);
        Ok(())
    }

    /// Remove the file at `index`
    pub fn remove(&mut self, index: usize) -> Option<UploadedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Read the metadata of a file on disk into an [`UploadedFile`]
pub fn read_upload(path: &Path) -> Result<UploadedFile, UploadError> {
    let unreadable = |message: String| UploadError::Unreadable {
        path: path.to_path_buf(),
        message,
    };

    let metadata = fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(unreadable("not a regular file".into()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| unreadable("missing file name".into()))?;

    Ok(UploadedFile::new(name, path, metadata.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn file(name: &str, size: u64) -> UploadedFile {
        UploadedFile::new(name, format!("/materials/{}", name), size)
    }

    #[test]
    fn test_add_and_remove() {
        let mut list = UploadList::new(UploadPolicy::default());
        list.add(file("notes.pdf", 2_097_152)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.files()[0].size_label(), "2.00 MB");

        let removed = list.remove(0).unwrap();
        assert_eq!(removed.name, "notes.pdf");
        assert!(list.is_empty());
        assert!(list.remove(0).is_none());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let mut list = UploadList::new(UploadPolicy::default());
        let err = list.add(file("virus.exe", 10)).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedExtension { .. }));
        assert!(list.add(file("no_extension", 10)).is_err());
        assert!(list.add(file("SLIDES.PPTX", 10)).is_ok());
    }

    #[test]
    fn test_rejects_oversize_file() {
        let mut list = UploadList::new(UploadPolicy::default());
        let limit = list.policy().max_file_bytes;
        assert!(list.add(file("exact.pdf", limit)).is_ok());
        let err = list.add(file("big.pdf", limit + 1)).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }

    #[test]
    fn test_rejects_file_past_count_limit() {
        let policy = UploadPolicy {
            max_files: 2,
            ..UploadPolicy::default()
        };
        let mut list = UploadList::new(policy);
        list.add(file("a.txt", 1)).unwrap();
        list.add(file("b.txt", 1)).unwrap();
        assert_eq!(
            list.add(file("c.txt", 1)),
            Err(UploadError::TooManyFiles { limit: 2 })
        );
    }

    #[test]
    fn test_rejects_duplicate_path() {
        let mut list = UploadList::new(UploadPolicy::default());
        list.add(file("notes.pdf", 1)).unwrap();
        let err = list.add(file("notes.pdf", 1)).unwrap_err();
        assert!(matches!(err, UploadError::Duplicate { .. }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_read_upload_uses_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bab1.txt");
        let mut handle = std::fs::File::create(&path).unwrap();
        handle.write_all(b"fotosintesis").unwrap();

        let upload = read_upload(&path).unwrap();
        assert_eq!(upload.name, "bab1.txt");
        assert_eq!(upload.size_bytes, 12);

        assert!(matches!(
            read_upload(dir.path()),
            Err(UploadError::Unreadable { .. })
        ));
        assert!(read_upload(&dir.path().join("missing.pdf")).is_err());
    }
}
