//! Zip archives of directories
//!
//! The archive lives in a private temporary directory that is removed when the
//! [`Archive`] is dropped.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// A zip file of a directory. Dropping it deletes the file.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    _workspace: TempDir,
}

impl Archive {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the archive in bytes.
    pub fn size(&self) -> Result<u64> {
        fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| Error::stat(&self.path, e))
    }
}

/// Zip `dir` recursively. Entry names start with the directory's own name.
pub fn create_archive(dir: &Path) -> Result<Archive> {
    let dir = dir
        .canonicalize()
        .map_err(|e| Error::archive(dir, format!("failed to get absolute path: {e}")))?;
    let base = dir
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("folder")
        .to_string();

    let workspace = tempfile::Builder::new()
        .prefix("tell")
        .tempdir()
        .map_err(|e| Error::ArchiveError(format!("failed to create temporary directory: {e}")))?;
    let path = workspace.path().join(format!("{base}.zip"));

    let file = File::create(&path).map_err(|e| Error::archive(&path, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(&dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let failing = e.path().unwrap_or(dir.as_path()).to_path_buf();
            Error::archive(&failing, e)
        })?;

        let relative = entry
            .path()
            .strip_prefix(&dir)
            .map_err(|e| Error::archive(entry.path(), e))?;
        let relative = relative.to_string_lossy().replace('\\', "/");
        let mut name = if relative.is_empty() {
            base.clone()
        } else {
            format!("{base}/{relative}")
        };

        if entry.file_type().is_dir() {
            name.push('/');
            zip.add_directory(name, options)
                .map_err(|e| Error::archive(entry.path(), e))?;
            continue;
        }

        zip.start_file(name, options.unix_permissions(file_mode(entry.path())))
            .map_err(|e| Error::archive(entry.path(), e))?;
        let mut input = File::open(entry.path()).map_err(|e| Error::archive(entry.path(), e))?;
        io::copy(&mut input, &mut zip).map_err(|e| Error::archive(entry.path(), e))?;
    }

    zip.finish().map_err(|e| Error::archive(&path, e))?;
    debug!(source = %dir.display(), archive = %path.display(), "created archive");

    Ok(Archive {
        path,
        _workspace: workspace,
    })
}

#[cfg(unix)]
fn file_mode(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o777)
        .unwrap_or(0o644)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> u32 {
    0o644
}
