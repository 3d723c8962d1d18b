// Export Service
// Packages the current file set into a downloadable zip archive

use std::io::{Cursor, Write};
use std::path::Path;

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::CodeFile;

/// Default archive file name offered for download
pub const DEFAULT_ARCHIVE_NAME: &str = "synth-project.zip";

/// Export Error
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to export
    #[error("No files to export")]
    NoFiles,

    /// Archive construction failed
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Build a zip archive in memory, one entry per file at its declared path
pub fn export_zip(files: &[CodeFile]) -> ExportResult<Vec<u8>> {
    if files.is_empty() {
        return Err(ExportError::NoFiles);
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        writer.start_file(file.name.as_str(), options)?;
        writer.write_all(file.content.as_bytes())?;
    }

    log::info!("exported {} files to archive", files.len());
    Ok(writer.finish()?.into_inner())
}

/// Write the archive to disk
pub fn write_zip_to(files: &[CodeFile], path: &Path) -> ExportResult<()> {
    let bytes = export_zip(files)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
