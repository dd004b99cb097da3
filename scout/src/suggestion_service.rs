use crate::config::ScoutConfig;
use crate::document_processor::{DocumentProcessor, PdfTextExtractor};
use crate::gemini_service::{GeminiService, SuggestionModel};
use crate::models::*;
use crate::text_splitter::TextSplitter;
use anyhow::Result;
use std::sync::Arc;

/// Upload to suggestion: extract, chunk and rejoin, prompt, ask the model.
pub struct SuggestionService {
    document_processor: DocumentProcessor,
    model: Arc<dyn SuggestionModel>,
    suggestion_count: usize,
}

impl SuggestionService {
    pub fn new(
        document_processor: DocumentProcessor,
        model: Arc<dyn SuggestionModel>,
        suggestion_count: usize,
    ) -> Self {
        Self {
            document_processor,
            model,
            suggestion_count,
        }
    }

    /// Production wiring: `pdf-extract` and Gemini.
    pub fn from_config(config: &ScoutConfig) -> Result<Self> {
        let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap)?;
        let document_processor = DocumentProcessor::new(Arc::new(PdfTextExtractor), splitter);
        let model = Arc::new(GeminiService::new(config.gemini.clone()));

        Ok(Self::new(document_processor, model, config.suggestion_count))
    }

    pub async fn suggest(&self, document: UploadedDocument) -> Result<Suggestion> {
        let start_time = std::time::Instant::now();
        let UploadedDocument { id, filename, bytes } = document;

        log::info!("[{}] Processing PDF: {} ({} bytes)", id, filename, bytes.len());

        let raw_text = self.document_processor.extract_text(bytes).await?;
        let paper_text = self.document_processor.prepare_paper_text(&raw_text);
        let prompt = self.build_prompt(&paper_text);

        let suggestion = self.model.suggest(&prompt).await?;

        log::info!(
            "[{}] {} answered in {} ms",
            id,
            self.model.name(),
            start_time.elapsed().as_millis()
        );

        Ok(suggestion)
    }

    pub fn build_prompt(&self, paper_text: &str) -> String {
        format!(
            "Based on the following paper content, suggest {} suitable journals for submission:\n{}",
            self.suggestion_count, paper_text
        )
    }
}
