//! Send text to a chat-completion model, extract structured data, ask for a
//! visualization suggestion and persist the combined result as JSON.

pub mod analysis;
pub mod cli;
pub mod llm;
pub mod report;
