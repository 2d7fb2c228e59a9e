use super::result::{AnalysisResult, ResultMetadata, Stage};
use super::Analyst;
use crate::report::json::ResultWriter;
use crate::report::ReportError;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A finished result and the outcome of writing it
#[derive(Debug)]
pub struct ProcessedText {
    pub result: AnalysisResult,
    pub saved_to: Option<PathBuf>,
    /// Set when a writer was configured and the write failed
    pub save_error: Option<ReportError>,
}

/// Runs extraction then suggestion for one input and assembles the result
pub struct Orchestrator<A: Analyst> {
    analyst: A,
    writer: Option<ResultWriter>,
}

impl<A: Analyst> Orchestrator<A> {
    pub fn new(analyst: A) -> Self {
        Self {
            analyst,
            writer: None,
        }
    }

    pub fn with_writer(mut self, writer: ResultWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn analyst(&self) -> &A {
        &self.analyst
    }

    /// Run both stages. Stage failures end up in the result, never as an `Err`.
    pub async fn process_text(&self, text: &str) -> AnalysisResult {
        let metadata = ResultMetadata::new(self.analyst.model(), self.analyst.focus());
        let mut result = AnalysisResult::new(text, metadata);

        info!("Extracting structured data ({} chars of input)", text.chars().count());
        let extracted = match self.analyst.extract_data(text).await {
            Ok(content) => result.record_output(Stage::Extraction, content),
            Err(e) => {
                warn!("Data extraction failed: {}", e);
                result.record_failure(Stage::Extraction, &e);
                return result;
            }
        };
        if !result.is_structured(Stage::Extraction) {
            debug!("Extraction completion was not JSON, kept as text");
        }

        info!("Requesting visualization suggestion");
        match self.analyst.suggest_visualization(&extracted).await {
            Ok(content) => {
                result.visualization_suggestion = Some(result.record_output(Stage::Suggestion, content));
            }
            Err(e) => {
                warn!("Visualization suggestion failed: {}", e);
                result.record_failure(Stage::Suggestion, &e);
            }
        }
        result.extracted_data = Some(extracted);

        if let Some(kind) = result.visualization_type() {
            info!("Suggested visualization type: {}", kind);
        }

        result
    }

    /// Process the text and hand the result to the configured writer.
    /// The result is returned even when writing it fails.
    pub async fn run(&self, text: &str) -> ProcessedText {
        let result = self.process_text(text).await;

        let (saved_to, save_error) = match &self.writer {
            Some(writer) => match writer.save(&result) {
                Ok(path) => (Some(path), None),
                Err(e) => {
                    warn!("Failed to save analysis result: {}", e);
                    (None, Some(e))
                }
            },
            None => (None, None),
        };

        ProcessedText {
            result,
            saved_to,
            save_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::tests::{completion, test_client, COMPLETIONS_PATH};
    use crate::llm::{LlmError, ParsedContent};
    use async_trait::async_trait;
    use mockito::Matcher;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedAnalyst {
        extraction: Option<ParsedContent>,
        suggestion: Option<ParsedContent>,
        extract_calls: AtomicUsize,
        suggest_calls: AtomicUsize,
    }

    impl ScriptedAnalyst {
        fn new(extraction: Option<Value>, suggestion: Option<Value>) -> Self {
            Self::with_content(
                extraction.map(ParsedContent::Structured),
                suggestion.map(ParsedContent::Structured),
            )
        }

        fn with_content(extraction: Option<ParsedContent>, suggestion: Option<ParsedContent>) -> Self {
            Self {
                extraction,
                suggestion,
                extract_calls: AtomicUsize::new(0),
                suggest_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Analyst for ScriptedAnalyst {
        async fn extract_data(&self, _text: &str) -> Result<ParsedContent, LlmError> {
            self.extract_calls.fetch_add(1, Ordering::SeqCst);
            self.extraction.clone().ok_or(LlmError::HttpStatus {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        async fn suggest_visualization(&self, extracted_data: &Value) -> Result<ParsedContent, LlmError> {
            self.suggest_calls.fetch_add(1, Ordering::SeqCst);
            let expected = self.extraction.clone().map(ParsedContent::into_value);
            assert_eq!(Some(extracted_data), expected.as_ref());
            self.suggestion
                .clone()
                .ok_or_else(|| LlmError::ResponseParse("No response content".to_string()))
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_successful_flow() {
        let analyst = ScriptedAnalyst::new(
            Some(json!({"reserves": [100, 110]})),
            Some(json!({"visualization_type": "chart", "chart_options": {}})),
        );
        let orchestrator = Orchestrator::new(analyst);

        let result = orchestrator.process_text("Reserves rose from 100 to 110").await;

        assert!(result.is_complete());
        assert_eq!(result.error, None);
        assert_eq!(result.visualization_type(), Some("chart"));
        assert_eq!(result.metadata.model, "scripted");
        assert!(result.unstructured_stages.is_empty());
    }

    #[tokio::test]
    async fn test_extraction_failure_skips_suggestion() {
        let analyst = ScriptedAnalyst::new(None, Some(json!({"visualization_type": "ui"})));
        let orchestrator = Orchestrator::new(analyst);

        let result = orchestrator.process_text("some text").await;

        assert_eq!(orchestrator.analyst().extract_calls.load(Ordering::SeqCst), 1);
        assert_eq!(orchestrator.analyst().suggest_calls.load(Ordering::SeqCst), 0);
        assert!(result.extracted_data.is_none());
        assert!(result.visualization_suggestion.is_none());
        assert_eq!(result.failed_stage, Some(Stage::Extraction));
        assert_eq!(result.error_kind.as_deref(), Some("request"));
        assert!(result.error.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_suggestion_failure_keeps_extracted_data() {
        let analyst = ScriptedAnalyst::new(Some(json!({"a": 1})), None);
        let orchestrator = Orchestrator::new(analyst);

        let result = orchestrator.process_text("some text").await;

        assert_eq!(result.extracted_data, Some(json!({"a": 1})));
        assert!(result.visualization_suggestion.is_none());
        assert_eq!(result.failed_stage, Some(Stage::Suggestion));
        assert_eq!(result.error_kind.as_deref(), Some("response_parse"));
    }

    #[tokio::test]
    async fn test_text_completion_marked_unstructured() {
        // JSON that happens to look like the text sentinel is still structured
        let analyst = ScriptedAnalyst::with_content(
            Some(ParsedContent::Structured(json!({"content": "notes", "format": "text"}))),
            Some(ParsedContent::Raw("A table would work best.".to_string())),
        );
        let result = Orchestrator::new(analyst).process_text("some text").await;

        assert!(result.is_structured(Stage::Extraction));
        assert!(!result.is_structured(Stage::Suggestion));
        assert_eq!(result.unstructured_stages, vec![Stage::Suggestion]);
        assert_eq!(
            result.visualization_suggestion,
            Some(json!({"content": "A table would work best.", "format": "text"}))
        );
    }

    #[tokio::test]
    async fn test_run_saves_result() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("output");
        let analyst = ScriptedAnalyst::new(Some(json!({"a": 1})), Some(json!({"visualization_type": "ui"})));
        let orchestrator = Orchestrator::new(analyst).with_writer(ResultWriter::new(&output_dir));

        let processed = orchestrator.run("some text").await;

        assert!(processed.save_error.is_none());
        let path = processed.saved_to.unwrap();
        assert!(path.starts_with(&output_dir));
        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["input_text"], "some text");
        assert_eq!(saved["visualization_suggestion"]["visualization_type"], "ui");
    }

    #[tokio::test]
    async fn test_run_keeps_result_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "occupied").unwrap();

        let analyst = ScriptedAnalyst::new(Some(json!({"a": 1})), Some(json!({"visualization_type": "ui"})));
        let orchestrator = Orchestrator::new(analyst).with_writer(ResultWriter::new(&blocker));

        let processed = orchestrator.run("some text").await;

        assert!(processed.saved_to.is_none());
        assert!(matches!(processed.save_error, Some(ReportError::IoError(_))));
        assert!(processed.result.is_complete());
        assert_eq!(processed.result.extracted_data, Some(json!({"a": 1})));
        assert_eq!(orchestrator.analyst().extract_calls.load(Ordering::SeqCst), 1);
        assert_eq!(orchestrator.analyst().suggest_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_without_writer_does_not_save() {
        let analyst = ScriptedAnalyst::new(Some(json!({"a": 1})), Some(json!({})));
        let processed = Orchestrator::new(analyst).run("some text").await;
        assert!(processed.saved_to.is_none());
        assert!(processed.save_error.is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_against_mock_endpoint() {
        let extraction = "```json\n{\"data_points\": [{\"label\": \"reserves\", \"from\": 100, \"to\": 110}]}\n```";
        let suggestion = "{\"visualization_type\": \"chart\", \"chart_options\": {\"series\": [{\"data\": [100, 110]}]}}";

        let mut server = mockito::Server::new_async().await;
        let extract_mock = server
            .mock("POST", COMPLETIONS_PATH)
            .match_body(Matcher::Regex("data analyst".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(extraction))
            .create_async()
            .await;
        // The second prompt carries the first stage's output
        let suggest_mock = server
            .mock("POST", COMPLETIONS_PATH)
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("Based on the data extracted".to_string()),
                Matcher::Regex("reserves".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(suggestion))
            .create_async()
            .await;

        let orchestrator = Orchestrator::new(test_client(&server.url()));
        let result = orchestrator.process_text("Reserves rose from 100 to 110").await;

        assert!(!result.input_text.is_empty());
        assert_eq!(
            result.extracted_data.as_ref().unwrap()["data_points"][0]["to"],
            110
        );
        assert!(matches!(result.visualization_type(), Some("chart") | Some("ui")));
        assert_eq!(result.metadata.model, "deepseek-chat");
        assert!(result.unstructured_stages.is_empty());

        extract_mock.assert_async().await;
        suggest_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_end_to_end_extraction_http_error() {
        let mut server = mockito::Server::new_async().await;
        let extract_mock = server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(500)
            .with_body("{\"error\": \"boom\"}")
            .expect(1)
            .create_async()
            .await;

        let orchestrator = Orchestrator::new(test_client(&server.url()));
        let result = orchestrator.process_text("Reserves rose from 100 to 110").await;

        assert_eq!(result.failed_stage, Some(Stage::Extraction));
        assert!(result.extracted_data.is_none());
        assert!(result.visualization_suggestion.is_none());
        extract_mock.assert_async().await;
    }
}
