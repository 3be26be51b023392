// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Rendered PDF bytes and the metadata handed to share/preview surfaces.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{FlyerError, Result};
use crate::utils::sha256_hex;

/// Immutable, cheaply clonable buffer holding one rendered flyer page.
#[derive(Clone, PartialEq, Eq)]
pub struct PdfDocument {
    bytes: Arc<[u8]>,
}

impl PdfDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex SHA-256 of the document bytes.
    pub fn fingerprint(&self) -> String {
        sha256_hex(&self.bytes)
    }

    /// Number of pages, read back through the PDF parser.
    pub fn page_count(&self) -> Result<usize> {
        let doc = lopdf::Document::load_mem(&self.bytes)?;
        Ok(doc.get_pages().len())
    }

    /// Write the document to `path`, creating parent directories when missing.
    ///
    /// Bytes go to a sibling temp file that is renamed over `path`, so concurrent writers
    /// to the same target never leave a mixed file behind; the last rename wins.
    pub fn write_to(&self, path: &Path) -> Result<PathBuf> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(&self.bytes)?;
        staged.persist(path).map_err(|err| err.error)?;
        Ok(path.to_path_buf())
    }
}

impl fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfDocument")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Document plus descriptive metadata passed to the share surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRequest {
    pub document: PdfDocument,
    /// Text item shared next to the file.
    pub caption: String,
    /// Subject line used by mail-like share targets.
    pub subject: String,
    /// Where the share surface persisted the document, once written.
    pub path: Option<PathBuf>,
}

impl ShareRequest {
    pub fn new(document: PdfDocument, caption: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            document,
            caption: caption.into(),
            subject: subject.into(),
            path: None,
        }
    }

    /// Persist the document to `path` and remember the location.
    pub fn persist(mut self, path: &Path) -> Result<Self> {
        if self.document.is_empty() {
            return Err(FlyerError::Pdf("refusing to write an empty document".into()));
        }
        self.path = Some(self.document.write_to(path)?);
        Ok(self)
    }
}
