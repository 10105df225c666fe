//! FileDescriptor - An uploaded design file as seen by the estimator.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Recognized file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Stl,
    Obj,
    ThreeMf,
    /// Drawings, PDFs, STEP files and anything else not parsed as a mesh.
    Document,
}

impl FileKind {
    /// Classify a file extension (without the dot) or a MIME type, any case.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim().to_ascii_lowercase();
        // MIME parameters such as "; charset=..." don't affect the format
        let ext = ext.split(';').next().unwrap_or_default().trim();
        match ext {
            "stl" | "model/stl" | "model/x.stl-ascii" | "model/x.stl-binary"
            | "application/sla" | "application/vnd.ms-pki.stl" => FileKind::Stl,
            "obj" | "model/obj" => FileKind::Obj,
            "3mf" | "model/3mf" | "application/vnd.ms-package.3dmanufacturing-3dmodel+xml" => {
                FileKind::ThreeMf
            }
            _ => FileKind::Document,
        }
    }

    /// Check if this is a 3D mesh format the size heuristic applies to.
    pub fn is_model(&self) -> bool {
        !matches!(self, FileKind::Document)
    }
}

/// A file selected for quoting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name as uploaded.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Extension without the dot, or the upload's MIME type; empty when
    /// unknown, in which case the name's extension is used.
    #[serde(default)]
    pub extension: String,
}

impl FileDescriptor {
    /// Create a descriptor, taking the extension from the name.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            size_bytes,
            extension,
        }
    }

    /// Describe a file on disk using its metadata size.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
        Ok(Self::new(name, metadata.len()))
    }

    /// Effective extension: the stored one, or the one derived from the name.
    pub fn extension(&self) -> String {
        if self.extension.is_empty() {
            extension_of(&self.name)
        } else {
            self.extension.trim_start_matches('.').to_ascii_lowercase()
        }
    }

    /// Get the file kind.
    pub fn kind(&self) -> FileKind {
        FileKind::from_extension(&self.extension())
    }

    /// Size in kilobytes.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / crate::config::BYTES_PER_KB
    }
}

/// Trailing dot-segment of a file name, lowercased.
fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}
