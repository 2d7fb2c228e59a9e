use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

struct Patterns {
    numbers: Regex,
    percentages: Regex,
    dates: Regex,
    money: Regex,
    emails: Regex,
    urls: Regex,
    sentence_end: Regex,
}

static PATTERNS: Lazy<Patterns> = Lazy::new(|| Patterns {
    numbers: Regex::new(r"\d+(?:\.\d+)?").expect("valid number pattern"),
    percentages: Regex::new(r"\d+(?:\.\d+)?%").expect("valid percentage pattern"),
    dates: Regex::new(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}").expect("valid date pattern"),
    money: Regex::new(r"[¥$€£]\d+(?:,\d{3})*(?:\.\d{2})?").expect("valid money pattern"),
    emails: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("valid email pattern"),
    urls: Regex::new(r"https?://[^\s<>()]+").expect("valid url pattern"),
    sentence_end: Regex::new(r"[。！？.!?]").expect("valid sentence pattern"),
});

/// Model-independent statistics about the input text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSummary {
    pub basic_stats: BasicStats,
    pub data_points: DataPointCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPointCounts {
    pub numbers: usize,
    pub percentages: usize,
    pub dates: usize,
    pub money: usize,
    pub emails: usize,
    pub urls: usize,
}

impl DataPointCounts {
    pub fn total(&self) -> usize {
        self.numbers + self.percentages + self.dates + self.money + self.emails + self.urls
    }
}

impl TextSummary {
    pub fn from_text(text: &str) -> Self {
        let p = &*PATTERNS;

        let basic_stats = BasicStats {
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            sentence_count: p
                .sentence_end
                .split(text)
                .filter(|s| !s.trim().is_empty())
                .count(),
            line_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
        };

        let data_points = DataPointCounts {
            numbers: p.numbers.find_iter(text).count(),
            percentages: p.percentages.find_iter(text).count(),
            dates: p.dates.find_iter(text).count(),
            money: p.money.find_iter(text).count(),
            emails: p.emails.find_iter(text).count(),
            urls: p.urls.find_iter(text).count(),
        };

        Self {
            basic_stats,
            data_points,
        }
    }
}
