//! Prompt templates for the two model calls
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const EXTRACTION_PROMPT: &str = "You are a data analyst. Read the text below and extract the information \
that could be visualized.

1. Identify every quantifiable data point (numbers, amounts, percentages, dates, counts) together with \
what it measures, its unit and how the data points relate to each other (time series, comparisons, \
parts of a whole, rankings).
2. If the text contains no numeric data, identify the qualitative events, entities and their \
relationships instead.
3. Return strictly JSON and nothing else. You may wrap the JSON in a ```json fenced code block, \
but do not add any explanation outside of it.
{focus}
Text:
{text}";

pub const SUGGESTION_PROMPT: &str = "Based on the data extracted below, decide how it is best presented.

Data:
{data}

Choose exactly one representation:
- If the data is numeric and comparable, return a chart: set \"visualization_type\" to \"chart\" and \
include a \"chart_options\" object (title, axes, series and data) ready to be passed to a charting \
library. Do not include any theme, color or other styling fields.
- Otherwise return a summary card: set \"visualization_type\" to \"ui\" and include a \"title\" and a \
\"summary\" field, optionally with a \"key_points\" list.

Return exactly one JSON object and nothing else.";

/// Emphasis of the extraction prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionFocus {
    #[default]
    Comprehensive,
    Entities,
    Sentiment,
    Keywords,
}

impl ExtractionFocus {
    fn instructions(&self) -> Option<&'static str> {
        match self {
            ExtractionFocus::Comprehensive => None,
            ExtractionFocus::Entities => Some(
                "Pay particular attention to named entities (people, places, organizations, products) \
                 and group them by entity type.",
            ),
            ExtractionFocus::Sentiment => Some(
                "Pay particular attention to sentiment: overall tone (positive/negative/neutral), \
                 intensity on a 1-10 scale, key sentiment words and how the tone changes.",
            ),
            ExtractionFocus::Keywords => Some(
                "Pay particular attention to keywords: frequent terms, key concepts and domain \
                 terminology, each with an approximate frequency.",
            ),
        }
    }
}

impl fmt::Display for ExtractionFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionFocus::Comprehensive => "comprehensive",
            ExtractionFocus::Entities => "entities",
            ExtractionFocus::Sentiment => "sentiment",
            ExtractionFocus::Keywords => "keywords",
        };
        f.write_str(name)
    }
}

/// Build the extraction prompt. The text is inserted as-is.
pub fn extraction_prompt(text: &str, focus: ExtractionFocus) -> String {
    let focus_line = focus
        .instructions()
        .map(|line| format!("{}\n", line))
        .unwrap_or_default();

    EXTRACTION_PROMPT
        .replace("{focus}", &focus_line)
        .replace("{text}", text)
}

pub fn suggestion_prompt(extracted_data: &Value) -> String {
    let data = serde_json::to_string_pretty(extracted_data).unwrap_or_else(|_| extracted_data.to_string());
    SUGGESTION_PROMPT.replace("{data}", &data)
}
