//! Reference document loaded once at startup and excerpted into every prompt.

use std::path::Path;

/// Maximum number of characters of the reference document placed in a prompt.
pub const REFERENCE_EXCERPT_CHARS: usize = 6000;

/// Bounded excerpt of the fashion reference document.
///
/// A missing or unreadable file is not fatal: the excerpt is simply empty.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDocument {
    excerpt: String,
}

impl ReferenceDocument {
    /// Read `path` and keep its first [`REFERENCE_EXCERPT_CHARS`] characters.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let doc = Self::from_text(&contents);
                if doc.is_empty() {
                    tracing::warn!(path = %path.display(), "Reference document is empty");
                } else {
                    tracing::info!(
                        path = %path.display(),
                        excerpt_chars = doc.excerpt.chars().count(),
                        "Loaded reference document"
                    );
                }
                doc
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Reference document unavailable, prompts will carry no excerpt"
                );
                Self::default()
            }
        }
    }

    /// The excerpt is cut from the document as written, then trimmed.
    pub fn from_text(text: &str) -> Self {
        let head = match text.char_indices().nth(REFERENCE_EXCERPT_CHARS) {
            Some((cut, _)) => &text[..cut],
            None => text,
        };
        Self {
            excerpt: head.trim().to_string(),
        }
    }

    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    pub fn is_empty(&self) -> bool {
        self.excerpt.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_empty_excerpt() {
        let doc = ReferenceDocument::load("/definitely/not/here/reference.md");
        assert!(doc.is_empty());
        assert_eq!(doc.excerpt(), "");
    }

    #[test]
    fn test_excerpt_counts_leading_whitespace() {
        let text = format!("{}{}", "\n".repeat(10), "b".repeat(REFERENCE_EXCERPT_CHARS));
        let doc = ReferenceDocument::from_text(&text);
        assert_eq!(doc.excerpt().chars().count(), REFERENCE_EXCERPT_CHARS - 10);
        assert!(doc.excerpt().starts_with('b'));
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let long = "a".repeat(REFERENCE_EXCERPT_CHARS + 500);
        let doc = ReferenceDocument::from_text(&long);
        assert_eq!(doc.excerpt().chars().count(), REFERENCE_EXCERPT_CHARS);
    }

    #[test]
    fn test_excerpt_never_splits_multibyte_chars() {
        let long = "é".repeat(REFERENCE_EXCERPT_CHARS + 10);
        let doc = ReferenceDocument::from_text(&long);
        assert_eq!(doc.excerpt().chars().count(), REFERENCE_EXCERPT_CHARS);
        assert!(doc.excerpt().chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  Editorial standards: no plastic skin.  ").unwrap();
        let doc = ReferenceDocument::load(file.path());
        assert_eq!(doc.excerpt(), "Editorial standards: no plastic skin.");
    }

    #[test]
    fn test_whitespace_only_file_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   \n\t  ").unwrap();
        assert!(ReferenceDocument::load(file.path()).is_empty());
    }
}
