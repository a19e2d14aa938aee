//! File containers for the JSON payload.

use super::{SaveConfig, SaveError};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Name of the single entry inside a compressed save.
pub const ARCHIVE_ENTRY_NAME: &str = "save";

/// How the payload is wrapped on disk. Chosen purely from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveCompression {
    /// `.json`: the payload as-is.
    None,
    /// `.zip`: the payload as the only archive entry.
    Zip,
}

impl SaveCompression {
    pub fn from_path(path: &Path) -> Result<Self, SaveError> {
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("json") {
            Ok(SaveCompression::None)
        } else if ext.eq_ignore_ascii_case("zip") {
            Ok(SaveCompression::Zip)
        } else {
            Err(SaveError::InvalidFormat(path.to_path_buf()))
        }
    }
}

/// Compression used for the archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveCompression {
    Stored,
    Deflated,
}

impl From<ArchiveCompression> for zip::CompressionMethod {
    fn from(method: ArchiveCompression) -> Self {
        match method {
            ArchiveCompression::Stored => zip::CompressionMethod::Stored,
            ArchiveCompression::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

/// Wraps `payload` for the given container. The archive is built entirely
/// in memory.
pub(crate) fn wrap(
    payload: Vec<u8>,
    compression: SaveCompression,
    config: &SaveConfig,
) -> Result<Vec<u8>, SaveError> {
    match compression {
        SaveCompression::None => Ok(payload),
        SaveCompression::Zip => {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options =
                SimpleFileOptions::default().compression_method(config.compression.into());
            writer.start_file(ARCHIVE_ENTRY_NAME, options)?;
            writer.write_all(&payload)?;
            let archive = writer.finish()?.into_inner();
            log::debug!(
                "Compressed {} byte payload to {} bytes",
                payload.len(),
                archive.len()
            );
            Ok(archive)
        }
    }
}

/// Extracts the payload from container bytes.
pub(crate) fn unwrap(bytes: Vec<u8>, compression: SaveCompression) -> Result<Vec<u8>, SaveError> {
    match compression {
        SaveCompression::None => Ok(bytes),
        SaveCompression::Zip => {
            let mut archive = ZipArchive::new(Cursor::new(bytes))?;
            let mut entry = match archive.by_name(ARCHIVE_ENTRY_NAME) {
                Ok(entry) => entry,
                Err(zip::result::ZipError::FileNotFound) => {
                    return Err(SaveError::MissingEntry(ARCHIVE_ENTRY_NAME));
                }
                Err(e) => return Err(e.into()),
            };
            let mut payload = Vec::new();
            entry.read_to_end(&mut payload)?;
            Ok(payload)
        }
    }
}
