use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::StorageError;

const PDF_EXTENSION: &str = "pdf";

/// A stored license document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Checks that a project or file name is a single plain path component.
pub fn validate_name(name: &str) -> Result<(), StorageError> {
    let invalid = |reason: &str| StorageError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("relative path components are not allowed"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(invalid("path separators are not allowed"));
    }
    if name.starts_with('.') {
        return Err(invalid("hidden names are not allowed"));
    }

    Ok(())
}

pub fn is_pdf_name(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PDF_EXTENSION))
}

/// Directory-per-project document store.
pub struct ProjectStorage {
    root: PathBuf,
}

impl ProjectStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of existing project directories, sorted.
    pub fn list_projects(&self) -> Result<Vec<String>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.root).map_err(|e| StorageError::ReadDirectory {
            path: self.root.clone(),
            source: e,
        })?;

        let mut projects: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| validate_name(name).is_ok())
            .collect();
        projects.sort();

        Ok(projects)
    }

    /// Resolves the project directory, creating it when missing.
    pub fn project_dir(&self, project: &str) -> Result<PathBuf, StorageError> {
        validate_name(project)?;
        let dir = self.root.join(project);
        self.ensure_directory(&dir)?;
        Ok(dir)
    }

    /// PDF files of a project, sorted by filename.
    pub fn list_pdfs(&self, project: &str) -> Result<Vec<StoredFile>, StorageError> {
        let dir = self.project_dir(project)?;

        let entries = std::fs::read_dir(&dir).map_err(|e| StorageError::ReadDirectory {
            path: dir.clone(),
            source: e,
        })?;

        let mut files: Vec<StoredFile> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                if !metadata.is_file() {
                    return None;
                }
                let filename = entry.file_name().to_str()?.to_string();
                if validate_name(&filename).is_err() || !is_pdf_name(&filename) {
                    return None;
                }
                Some(StoredFile {
                    filename,
                    path: entry.path(),
                    size_bytes: metadata.len(),
                    modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                })
            })
            .collect();
        files.sort_by(|a, b| a.filename.cmp(&b.filename));

        Ok(files)
    }

    /// Writes a PDF into the project, replacing any file of the same name.
    ///
    /// Bytes go to a hidden temp file first and are renamed into place, so
    /// readers see either the old file or the complete new one. The temp
    /// name has a fixed length so any name the filesystem accepts can be saved.
    pub fn save(&self, project: &str, filename: &str, content: &[u8]) -> Result<PathBuf, StorageError> {
        validate_name(filename)?;
        if !is_pdf_name(filename) {
            return Err(StorageError::NotPdf(filename.to_string()));
        }

        let dir = self.project_dir(project)?;
        let target = dir.join(filename);
        let temp_path = dir.join(format!(".{}.part", uuid::Uuid::new_v4().simple()));

        let write_result = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .and_then(|mut file| {
                file.write_all(content)?;
                file.sync_all()
            });

        if let Err(e) = write_result {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StorageError::WriteFile {
                path: target,
                source: e,
            });
        }

        if let Err(e) = std::fs::rename(&temp_path, &target) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StorageError::WriteFile {
                path: target,
                source: e,
            });
        }

        tracing::info!(project, filename, bytes = content.len(), "Stored license document");
        Ok(target)
    }

    /// Path of an existing file in the project.
    pub fn path_of(&self, project: &str, filename: &str) -> Result<PathBuf, StorageError> {
        validate_name(project)?;
        validate_name(filename)?;

        let path = self.root.join(project).join(filename);
        if !path.is_file() {
            return Err(StorageError::NotFound(path));
        }
        Ok(path)
    }

    pub fn read(&self, project: &str, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_of(project, filename)?;
        std::fs::read(&path).map_err(|e| StorageError::ReadFile { path, source: e })
    }

    pub fn delete(&self, project: &str, filename: &str) -> Result<(), StorageError> {
        let path = self.path_of(project, filename)?;

        std::fs::remove_file(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path.clone()),
            _ => StorageError::DeleteFile {
                path: path.clone(),
                source: e,
            },
        })?;

        tracing::info!(project, filename, "Deleted license document");
        Ok(())
    }

    fn ensure_directory(&self, path: &Path) -> Result<(), StorageError> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| StorageError::CreateDirectory {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}
