/*!
 * Document text acquisition.
 *
 * Resolves an input path to a supported document kind by extension sniffing,
 * extracts the full text (directly for plain text, page by page for PDF), and
 * optionally exports the extracted text to a sibling .txt file.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::DocumentError;

/// Supported document kinds, inferred from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Plain UTF-8 text
    PlainText,
    /// PDF, extracted page by page
    Pdf,
}

/// An input document: a path plus its sniffed kind
#[derive(Debug, Clone)]
pub struct Document {
    /// Path to the source file
    pub path: PathBuf,
    /// Inferred document kind
    pub kind: DocumentKind,
}

impl Document {
    /// Sniff a file's kind from its extension and build a document handle.
    ///
    /// An unsupported extension is fatal for the pipeline: no text file and no
    /// audio file may be produced for it.
    pub fn sniff<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(DocumentError::NotFound(path.display().to_string()));
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "<none>".to_string());

        let kind = match extension.as_str() {
            "txt" | "text" | "md" => DocumentKind::PlainText,
            "pdf" => DocumentKind::Pdf,
            _ => return Err(DocumentError::UnsupportedType { extension }),
        };

        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }

    /// The input file's basename without extension, used for the text export
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string())
    }

    /// Extract the document's full text as a single string.
    ///
    /// Plain text is read whole. PDF pages are extracted independently and
    /// concatenated in page order with no separator, matching the historical
    /// behavior of this tool; a word straddling a page break may merge with
    /// the following page's first word.
    pub fn extract_text(&self) -> Result<String, DocumentError> {
        match self.kind {
            DocumentKind::PlainText => {
                debug!("Detected plain text file: {:?}", self.path);
                fs::read_to_string(&self.path)
                    .map_err(|e| DocumentError::NotFound(format!("{:?}: {}", self.path, e)))
            }
            DocumentKind::Pdf => {
                debug!("Detected PDF: {:?}", self.path);
                let pages = pdf_extract::extract_text_by_pages(&self.path)
                    .map_err(|e| DocumentError::PdfExtraction(e.to_string()))?;
                Ok(join_pages(&pages))
            }
        }
    }

    /// Write the extracted text to a sibling `<stem>.txt` file.
    ///
    /// Independent of the audio pipeline; intended for reusing a converted PDF
    /// without paying the extraction cost again. Returns the written path.
    pub fn export_text(&self, text: &str) -> Result<PathBuf> {
        let output = self
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("{}.txt", self.file_stem()));

        fs::write(&output, text)
            .with_context(|| format!("Failed to write text export: {:?}", output))?;

        info!("Generated raw text file {:?}", output);
        Ok(output)
    }
}

/// Concatenate page texts in page order with no separator.
///
/// Kept separator-free on purpose: the page-merge ambiguity is inherited and
/// documented rather than silently changed.
pub fn join_pages(pages: &[String]) -> String {
    pages.concat()
}
