pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod prompts;

pub use client::LlmClient;
pub use config::LlmConfig;
pub use error::LlmError;
pub use parse::{parse_response, ParsedContent};
pub use prompts::ExtractionFocus;
