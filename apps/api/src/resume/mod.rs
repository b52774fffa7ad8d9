//! Résumé source: extracts the résumé text once at startup.
//!
//! Extraction never fails the process: any error, panic inside the PDF
//! extractor, or whitespace-only result is replaced by the embedded fallback.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

/// Used when the PDF cannot be read or yields no text.
pub const FALLBACK_RESUME: &str = include_str!("fallback_resume.txt");

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Immutable résumé text shared by every request for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText(Arc<str>);

impl ResumeText {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_RESUME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Loads the résumé from `path`, substituting the fallback on any failure.
pub async fn load_resume(path: &Path) -> ResumeText {
    let extracted = extract_pdf_text(path.to_path_buf()).await;
    resolve_resume(path, extracted)
}

/// Chooses between extracted text and the fallback. Whitespace-only text
/// counts as a failed extraction.
fn resolve_resume(path: &Path, extracted: Result<String, ResumeError>) -> ResumeText {
    match extracted {
        Ok(text) if !text.trim().is_empty() => {
            info!(
                "Loaded resume from {} ({} chars)",
                path.display(),
                text.chars().count()
            );
            ResumeText::new(text)
        }
        Ok(_) => {
            warn!(
                "Resume at {} contained no text; using fallback resume",
                path.display()
            );
            ResumeText::fallback()
        }
        Err(e) => {
            warn!(
                "Could not read resume at {}: {e}; using fallback resume",
                path.display()
            );
            ResumeText::fallback()
        }
    }
}

async fn extract_pdf_text(path: PathBuf) -> Result<String, ResumeError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text(&path).map_err(|e| ResumeError::Pdf(e.to_string()))
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_uses_fallback() {
        let resume = load_resume(Path::new("/definitely/not/here/resume.pdf")).await;
        assert_eq!(resume, ResumeText::fallback());
    }

    #[tokio::test]
    async fn test_unparseable_pdf_uses_fallback() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf at all").unwrap();

        let resume = load_resume(file.path()).await;
        assert_eq!(resume.as_str(), FALLBACK_RESUME);
    }

    #[test]
    fn test_whitespace_only_text_uses_fallback() {
        let path = Path::new("resume.pdf");
        for blank in ["", "  \n ", "\t\r\n"] {
            let resume = resolve_resume(path, Ok(blank.to_string()));
            assert_eq!(resume, ResumeText::fallback(), "text: {blank:?}");
        }
    }

    #[test]
    fn test_extracted_text_is_kept_verbatim() {
        let resume = resolve_resume(Path::new("resume.pdf"), Ok("  Jane Doe\nRust\n".to_string()));
        assert_eq!(resume.as_str(), "  Jane Doe\nRust\n");
    }

    #[test]
    fn test_extraction_error_uses_fallback() {
        let extracted = Err(ResumeError::Pdf("no xref table".to_string()));
        let resume = resolve_resume(Path::new("resume.pdf"), extracted);
        assert_eq!(resume.as_str(), FALLBACK_RESUME);
    }

    #[test]
    fn test_fallback_carries_contact_details() {
        assert!(FALLBACK_RESUME.starts_with("YUG VACHHANI"));
        assert!(FALLBACK_RESUME.contains("Email: yug30112005@gmail.com"));
        assert!(FALLBACK_RESUME.contains("Certificates:"));
    }

    #[test]
    fn test_clones_share_the_same_text() {
        let resume = ResumeText::new("custom resume");
        let clone = resume.clone();
        assert_eq!(clone.as_str(), "custom resume");
        assert!(std::ptr::eq(resume.as_str(), clone.as_str()));
    }
}
