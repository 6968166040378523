use std::fs;
use std::path::{Path, PathBuf};

use crate::lines::{SourceLine, numbered_lines};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid source directory: {0}")]
    InvalidSourceDir(String),
}

/// File extensions considered source files when scanning a directory tree.
pub const SOURCE_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "c", "cc", "cpp", "cxx"];

/// Read a source file into numbered lines.
pub fn read_source_lines(path: &Path) -> Result<Vec<SourceLine>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(IoError::Io)?;
    Ok(numbered_lines(&content))
}

/// Scan for source files under the source root, recursively, sorted.
pub fn scan_source_files(source_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !source_root.exists() {
        return Err(IoError::InvalidSourceDir(
            "source directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(source_root, &mut files)?;
    files.sort();
    tracing::debug!(
        root = %source_root.display(),
        files = files.len(),
        "scanned source tree"
    );
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && SOURCE_EXTENSIONS.iter().any(|e| ext == *e)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_source_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidSourceDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn scan_finds_source_files_recursively() {
        let dir = TempDir::new().unwrap();
        create_test_file(&dir, "car.hpp", "/// a");
        create_test_file(&dir, "nested/engine.h", "/// b");
        create_test_file(&dir, "README.md", "# not source");

        let files = scan_source_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "car.hpp"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "engine.h"));
    }

    #[test]
    fn scan_rejects_missing_directory() {
        let result = scan_source_files(Path::new("/this/path/does/not/exist"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("source directory")
        );
    }

    #[test]
    fn read_source_lines_numbers_from_one() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "engine.hpp", "/// first\nvoid f();\n");

        let lines = read_source_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].text, "void f();");
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let result = read_source_lines(Path::new("/nonexistent/file.hpp"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn validate_source_dir_exists() {
        let dir = TempDir::new().unwrap();
        assert!(validate_source_dir(dir.path()).is_ok());
        assert!(matches!(
            validate_source_dir(Path::new("/nonexistent/path")),
            Err(IoError::InvalidSourceDir(_))
        ));
    }
}
