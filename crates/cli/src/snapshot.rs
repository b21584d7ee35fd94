use refdiff_core::{FileContents, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads the source files of one snapshot.
///
/// A directory is walked for files with one of `extensions`, each keyed by its
/// path relative to `root`. A single file is keyed by its file name.
pub fn load_snapshot(root: &Path, extensions: &[&str]) -> Result<FileContents> {
    let mut files = FileContents::new();

    if root.is_file() {
        let key = root
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| root.to_path_buf());
        files.insert(key, std::fs::read(root)?);
        return Ok(files);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e));
        if !supported {
            continue;
        }
        let key = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        files.insert(key, std::fs::read(path)?);
    }

    tracing::info!("Loaded {} files from {}", files.len(), root.display());
    Ok(files)
}
