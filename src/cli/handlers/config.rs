use crate::llm::config::{LlmConfig, API_KEY_ENV};
use anyhow::Result;
use std::env;

pub fn handle_config_command() -> Result<()> {
    // Load .env file if it exists
    let env_file_loaded = dotenv::dotenv().is_ok();
    let config = LlmConfig::resolve(None);

    println!("🔧 infoviz Configuration");
    println!("═══════════════════════════════════════");
    println!();

    println!("📦 Version Information:");
    println!("  • infoviz: v{}", env!("CARGO_PKG_VERSION"));
    println!("  • License: {}", env!("CARGO_PKG_LICENSE"));
    println!();

    println!("🌍 Environment Configuration:");
    if env_file_loaded {
        println!("  • .env file: ✅ Loaded");
    } else {
        println!("  • .env file: ⚠️  Not found (using system environment)");
    }

    match &config.api_key {
        Some(_) => println!("  • {}: ✅ Set (hidden)", API_KEY_ENV),
        None => println!("  • {}: ❌ Not set", API_KEY_ENV),
    }

    match env::var("LLM_DEBUG") {
        Ok(val) => println!("  • LLM_DEBUG: {}", val),
        Err(_) => println!("  • LLM_DEBUG: false (default)"),
    }

    match env::var("RUST_LOG") {
        Ok(val) => println!("  • RUST_LOG: {}", val),
        Err(_) => println!("  • RUST_LOG: info (default)"),
    }
    println!();

    println!("🤖 Model Endpoint:");
    println!("  • API Base: {}", config.api_base);
    println!("  • Model: {}", config.model);
    println!("  • Temperature: {}", config.temperature);
    println!("  • Max Tokens: {}", config.max_tokens);
    println!("  • Timeout: {} seconds", config.timeout_secs);
    println!();

    println!("📁 Output:");
    println!("  • Working Directory: {}", env::current_dir()?.display());
    match env::var("INFOVIZ_OUTPUT_DIR") {
        Ok(dir) => println!("  • Output Directory: {}", dir),
        Err(_) => println!("  • Output Directory: output/ (default)"),
    }
    println!("  • File Name: analysis_result_<timestamp>.json");
    println!();

    println!("💡 Tips:");
    if config.api_key.is_none() {
        println!("  • Set {} or pass --api-key to enable analysis", API_KEY_ENV);
    }
    println!("  • Use -v or RUST_LOG=debug for detailed logging");
    println!("  • Set DEEPSEEK_API_BASE to point at another OpenAI-compatible endpoint");

    Ok(())
}
