use super::local::TextSummary;
use crate::llm::{ExtractionFocus, LlmError, ParsedContent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One of the two sequential model calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Extraction,
    Suggestion,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extraction => f.write_str("extraction"),
            Stage::Suggestion => f.write_str("suggestion"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub run_id: String,
    pub tool_version: String,
    pub model: String,
    pub extraction_focus: ExtractionFocus,
    pub processed_at: DateTime<Utc>,
}

impl ResultMetadata {
    pub fn new(model: &str, extraction_focus: ExtractionFocus) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            model: model.to_string(),
            extraction_focus,
            processed_at: Utc::now(),
        }
    }
}

/// Outcome of one invocation: input, both stage outputs and any stage failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub input_text: String,
    pub extracted_data: Option<Value>,
    pub visualization_suggestion: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<Stage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    /// Stages whose completion was not JSON and was stored as a text sentinel
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unstructured_stages: Vec<Stage>,

    pub local_analysis: TextSummary,
    pub metadata: ResultMetadata,
}

impl AnalysisResult {
    pub(crate) fn new(input_text: &str, metadata: ResultMetadata) -> Self {
        Self {
            input_text: input_text.to_string(),
            extracted_data: None,
            visualization_suggestion: None,
            error: None,
            failed_stage: None,
            error_kind: None,
            unstructured_stages: Vec::new(),
            local_analysis: TextSummary::from_text(input_text),
            metadata,
        }
    }

    pub(crate) fn record_failure(&mut self, stage: Stage, error: &LlmError) {
        self.error = Some(error.to_string());
        self.failed_stage = Some(stage);
        self.error_kind = Some(error.kind().to_string());
    }

    pub(crate) fn record_output(&mut self, stage: Stage, content: ParsedContent) -> Value {
        if !content.is_structured() {
            self.unstructured_stages.push(stage);
        }
        content.into_value()
    }

    /// Whether the stage's completion decoded as JSON
    pub fn is_structured(&self, stage: Stage) -> bool {
        !self.unstructured_stages.contains(&stage)
    }

    /// Both stages produced data
    pub fn is_complete(&self) -> bool {
        self.extracted_data.is_some() && self.visualization_suggestion.is_some()
    }

    /// The suggestion's `visualization_type` discriminator, if present
    pub fn visualization_type(&self) -> Option<&str> {
        self.visualization_suggestion
            .as_ref()
            .and_then(|s| s.get("visualization_type"))
            .and_then(|t| t.as_str())
    }
}
