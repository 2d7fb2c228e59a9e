pub mod local;
pub mod orchestrator;
pub mod result;

use crate::llm::{ExtractionFocus, LlmError, ParsedContent};
use async_trait::async_trait;
use serde_json::Value;

pub use local::TextSummary;
pub use orchestrator::{Orchestrator, ProcessedText};
pub use result::{AnalysisResult, ResultMetadata, Stage};

/// The two model-backed stages the orchestrator sequences
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Extract structured data from free text
    async fn extract_data(&self, text: &str) -> Result<ParsedContent, LlmError>;

    /// Suggest a visualization for previously extracted data
    async fn suggest_visualization(&self, extracted_data: &Value) -> Result<ParsedContent, LlmError>;

    /// Model identifier recorded in results
    fn model(&self) -> &str;

    fn focus(&self) -> ExtractionFocus {
        ExtractionFocus::default()
    }
}
