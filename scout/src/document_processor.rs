use crate::text_splitter::TextSplitter;
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;

/// Turns document bytes into per-page text.
pub trait TextExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// `pdf-extract` backed extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
            .context("Failed to extract text from PDF")
    }
}

pub struct DocumentProcessor {
    extractor: Arc<dyn TextExtractor>,
    splitter: TextSplitter,
}

impl DocumentProcessor {
    pub fn new(extractor: Arc<dyn TextExtractor>, splitter: TextSplitter) -> Self {
        Self {
            extractor,
            splitter,
        }
    }

    /// Extracts the text of every page, each followed by a newline.
    ///
    /// Parsing runs on the blocking pool; a panic inside the parser is
    /// reported as an error.
    pub async fn extract_text(&self, bytes: Vec<u8>) -> Result<String> {
        let extractor = Arc::clone(&self.extractor);
        let pages = tokio::task::spawn_blocking(move || extractor.extract_pages(&bytes))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    anyhow!("PDF parser panicked: {}", panic_message(e.into_panic()))
                } else {
                    anyhow!("PDF extraction task failed: {}", e)
                }
            })??;

        let content = join_pages(&pages);
        log::info!(
            "Extracted {} pages ({} chars)",
            pages.len(),
            content.chars().count()
        );
        Ok(content)
    }

    /// Chunks the extracted text and rejoins the windows into the paper text
    /// that goes into the prompt.
    pub fn prepare_paper_text(&self, raw_text: &str) -> String {
        self.splitter.split_and_rejoin(raw_text)
    }
}

pub fn join_pages(pages: &[String]) -> String {
    let mut content = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        content.push_str(page);
        content.push('\n');
    }
    content
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPages(Vec<String>);

    impl TextExtractor for FixedPages {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl TextExtractor for Failing {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
            Err(anyhow!("trailer not found"))
        }
    }

    struct Panicking;

    impl TextExtractor for Panicking {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
            panic!("unexpected token in content stream")
        }
    }

    fn processor(extractor: impl TextExtractor + 'static) -> DocumentProcessor {
        DocumentProcessor::new(Arc::new(extractor), TextSplitter::new(1500, 100).unwrap())
    }

    #[tokio::test]
    async fn single_page_text_gets_trailing_newline() {
        let processor = processor(FixedPages(vec!["Known text".to_string()]));
        let text = processor.extract_text(b"%PDF-1.4".to_vec()).await.unwrap();
        assert_eq!(text, "Known text\n");
    }

    #[tokio::test]
    async fn pages_are_newline_terminated_and_concatenated() {
        let processor = processor(FixedPages(vec!["one".to_string(), "two".to_string()]));
        let text = processor.extract_text(Vec::new()).await.unwrap();
        assert_eq!(text, "one\ntwo\n");
    }

    #[tokio::test]
    async fn extractor_errors_propagate() {
        let err = processor(Failing).extract_text(Vec::new()).await.unwrap_err();
        assert!(err.to_string().contains("trailer not found"));
    }

    #[tokio::test]
    async fn extractor_panics_become_errors() {
        let err = processor(Panicking).extract_text(Vec::new()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("panicked"));
        assert!(message.contains("unexpected token in content stream"));
    }

    #[test]
    fn garbage_bytes_fail_pdf_extraction() {
        let result = PdfTextExtractor.extract_pages(b"definitely not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn short_text_survives_preparation() {
        let processor = processor(FixedPages(Vec::new()));
        assert_eq!(processor.prepare_paper_text("abstract\n"), "abstract\n");
    }
}
