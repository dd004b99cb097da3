pub mod config;
pub mod document_processor;
pub mod gemini_service;
pub mod models;
pub mod suggestion_service;
pub mod text_splitter;

pub use config::{GeminiConfig, ScoutConfig};
pub use document_processor::{DocumentProcessor, PdfTextExtractor, TextExtractor};
pub use gemini_service::{GeminiService, SuggestionModel};
pub use models::*;
pub use suggestion_service::SuggestionService;
pub use text_splitter::TextSplitter;
