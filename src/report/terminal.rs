use super::ReportResult;
use crate::analysis::{AnalysisResult, Stage};
use colored::Colorize;
use serde_json::Value;
use std::path::Path;

/// Terminal formatting constants
const TERMINAL_WIDTH: usize = 60;
const SEPARATOR_WIDTH: usize = 40;
const PREVIEW_CHARS: usize = 120;

/// Prints a human-readable summary of an analysis result.
///
/// Colors follow `colored`'s own detection (TTY, `NO_COLOR`, `CLICOLOR`)
/// unless forced with [`with_colors`](Self::with_colors).
pub struct TerminalReporter {
    use_colors: Option<bool>,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { use_colors: None }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = Some(use_colors);
        self
    }

    pub fn report(&self, result: &AnalysisResult, saved_to: Option<&Path>) -> ReportResult<()> {
        if let Some(use_colors) = self.use_colors {
            colored::control::set_override(use_colors);
        }

        self.print_header();
        self.print_input(result);
        self.print_stages(result);
        self.print_suggestion(result);
        self.print_footer(saved_to);

        if self.use_colors.is_some() {
            colored::control::unset_override();
        }
        Ok(())
    }

    fn print_header(&self) {
        println!("\n{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
        println!("{}", "ANALYSIS RESULT SUMMARY".bright_white().bold());
        println!("{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
    }

    fn print_input(&self, result: &AnalysisResult) {
        let stats = &result.local_analysis.basic_stats;
        let points = &result.local_analysis.data_points;

        println!("\n{}", "📄 Input".bright_white().bold());
        println!("{}", "─".repeat(SEPARATOR_WIDTH).bright_black());
        println!("  Preview:         {}", preview(&result.input_text).bright_cyan());
        println!("  Characters:      {}", stats.char_count);
        println!("  Words:           {}", stats.word_count);
        println!("  Sentences:       {}", stats.sentence_count);
        println!(
            "  Data points:     {} numbers, {} percentages, {} dates, {} amounts",
            points.numbers, points.percentages, points.dates, points.money
        );
    }

    fn print_stages(&self, result: &AnalysisResult) {
        println!("\n{}", "🤖 Model Stages".bright_white().bold());
        println!("{}", "─".repeat(SEPARATOR_WIDTH).bright_black());
        println!("  Model:           {}", result.metadata.model);
        println!("  Focus:           {}", result.metadata.extraction_focus);

        println!(
            "  Extraction:      {}",
            stage_status(result.extracted_data.is_some(), result.is_structured(Stage::Extraction))
        );
        println!(
            "  Suggestion:      {}",
            stage_status(
                result.visualization_suggestion.is_some(),
                result.is_structured(Stage::Suggestion)
            )
        );

        if let Some(error) = &result.error {
            let stage = result
                .failed_stage
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("  {} {} stage failed: {}", "✗".bright_red(), stage, error.bright_red());
        }
    }

    fn print_suggestion(&self, result: &AnalysisResult) {
        let Some(suggestion) = &result.visualization_suggestion else {
            return;
        };

        println!("\n{}", "📊 Visualization".bright_white().bold());
        println!("{}", "─".repeat(SEPARATOR_WIDTH).bright_black());

        match result.visualization_type() {
            Some("chart") => {
                println!("  Type:            {}", "chart".bright_green());
                if let Some(title) = chart_title(suggestion) {
                    println!("  Title:           {}", title);
                }
            }
            Some(other) => {
                println!("  Type:            {}", other.bright_green());
                if let Some(title) = suggestion.get("title").and_then(Value::as_str) {
                    println!("  Title:           {}", title);
                }
                if let Some(summary) = suggestion.get("summary").and_then(Value::as_str) {
                    println!("  Summary:         {}", preview(summary));
                }
            }
            None => {
                println!("  Type:            {}", "unspecified".bright_yellow());
            }
        }
    }

    fn print_footer(&self, saved_to: Option<&Path>) {
        println!("\n{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
        match saved_to {
            Some(path) => println!("✅ Result saved to: {}", path.display().to_string().bright_green()),
            None => println!("{}", "Result not saved".bright_black()),
        }
    }
}

fn stage_status(present: bool, structured: bool) -> String {
    match (present, structured) {
        (false, _) => "failed / skipped".bright_red().to_string(),
        (true, false) => "ok (unstructured text)".bright_yellow().to_string(),
        (true, true) => "ok".bright_green().to_string(),
    }
}

fn chart_title(suggestion: &Value) -> Option<&str> {
    let title = suggestion.get("chart_options")?.get("title")?;
    title
        .as_str()
        .or_else(|| title.get("text").and_then(Value::as_str))
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        flat
    }
}
