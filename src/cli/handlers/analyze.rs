use crate::analysis::Orchestrator;
use crate::cli::utils::load_input;
use crate::llm::{ExtractionFocus, LlmClient, LlmConfig};
use crate::report::{ResultWriter, TerminalReporter};
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Options collected from `infoviz analyze`
#[derive(Debug)]
pub struct AnalyzeOptions {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub api_key: Option<String>,
    pub output_dir: PathBuf,
    pub focus: ExtractionFocus,
    pub timeout: Option<u64>,
    pub llm_debug: bool,
    pub no_save: bool,
    pub json: bool,
    pub no_color: bool,
}

pub async fn handle_analyze_command(options: AnalyzeOptions) -> Result<()> {
    let text = load_input(options.text, options.file.as_deref())?;

    let mut config = LlmConfig::resolve(options.api_key).with_debug(options.llm_debug);
    if let Some(timeout) = options.timeout {
        config = config.with_timeout(timeout);
    }

    let client = LlmClient::new(config)
        .context("Failed to initialize LLM client")?
        .with_focus(options.focus);
    info!(
        "Using model {} at {} (timeout {}s)",
        client.config().model,
        client.config().api_base,
        client.config().timeout_secs
    );

    let mut orchestrator = Orchestrator::new(client);
    if !options.no_save {
        let writer = ResultWriter::new(&options.output_dir);
        info!("Results will be written to {}", writer.output_dir().display());
        orchestrator = orchestrator.with_writer(writer);
    }

    let processed = orchestrator.run(&text).await;

    if let Some(error) = &processed.result.error {
        warn!("Analysis finished with an error: {}", error);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&processed.result)?);
    } else {
        let mut reporter = TerminalReporter::new();
        if options.no_color {
            reporter = reporter.with_colors(false);
        }
        reporter.report(&processed.result, processed.saved_to.as_deref())?;
    }

    // The result has been shown; a failed write still fails the command
    if let Some(e) = processed.save_error {
        return Err(anyhow!(e).context(format!(
            "Failed to save analysis result to {}",
            options.output_dir.display()
        )));
    }

    Ok(())
}
