use crate::error::{ReviewError, ReviewResult};
use crate::models::*;
use lazy_static::lazy_static;
use pdf_extract::extract_text_from_mem;
use regex::Regex;
use std::fs;
use std::path::Path;
use uuid::Uuid;

lazy_static! {
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap();
    static ref INLINE_SPACE: Regex = Regex::new(r"[ \t\u{00A0}]+").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
    Unsupported,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" | "doc" | "odt" | "rtf" => DocumentFormat::Unsupported,
            _ => DocumentFormat::PlainText,
        }
    }
}

pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn load_file(&self, file_path: &Path) -> ReviewResult<Document> {
        let filename = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());

        log::info!("Reading document: {}", filename);

        let bytes = fs::read(file_path).map_err(|e| ReviewError::UnreadableInput {
            filename: filename.clone(),
            reason: e.to_string(),
        })?;

        self.load_bytes(&filename, &bytes)
    }

    /// Decode an uploaded file held fully in memory.
    pub fn load_bytes(&self, filename: &str, bytes: &[u8]) -> ReviewResult<Document> {
        let raw = match DocumentFormat::from_filename(filename) {
            DocumentFormat::Pdf => self.extract_pdf(filename, bytes)?,
            DocumentFormat::PlainText => String::from_utf8(bytes.to_vec()).map_err(|e| {
                ReviewError::UnreadableInput {
                    filename: filename.to_string(),
                    reason: format!("not valid UTF-8 text: {}", e),
                }
            })?,
            DocumentFormat::Unsupported => {
                return Err(ReviewError::UnsupportedFormat(filename.to_string()));
            }
        };

        let content = self.clean_text(&raw);
        if content.trim().is_empty() {
            return Err(ReviewError::UnreadableInput {
                filename: filename.to_string(),
                reason: "no text could be extracted".to_string(),
            });
        }

        log::info!("Loaded {} ({} characters)", filename, content.chars().count());

        Ok(Document {
            id: Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            content,
        })
    }

    fn extract_pdf(&self, filename: &str, bytes: &[u8]) -> ReviewResult<String> {
        // pdf-extract panics on some malformed files instead of returning an error.
        let extracted = std::panic::catch_unwind(|| extract_text_from_mem(bytes));

        match extracted {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ReviewError::UnreadableInput {
                filename: filename.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ReviewError::UnreadableInput {
                filename: filename.to_string(),
                reason: "PDF parser aborted on malformed input".to_string(),
            }),
        }
    }

    /// Normalise line endings and spacing while keeping line structure, which
    /// the heading-based extractors rely on.
    fn clean_text(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");
        let cleaned = CONTROL_CHARS.replace_all(&unified, "");
        let cleaned = INLINE_SPACE.replace_all(&cleaned, " ");

        let trimmed_lines: Vec<&str> = cleaned.lines().map(str::trim).collect();
        let joined = trimmed_lines.join("\n");

        BLANK_LINES.replace_all(&joined, "\n\n").trim().to_string()
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
