use crate::cli::commands::LogFormat;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `-v` forces `debug`; otherwise `RUST_LOG` applies, defaulting to `info`
fn build_env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

pub fn init_logging(verbose: bool, log_format: LogFormat) {
    let env_filter = build_env_filter(verbose);

    let fmt_layer = match log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .expect("Failed to initialize tracing subscriber");
}

pub fn print_info() {
    println!("infoviz v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("Authors: {}", env!("CARGO_PKG_AUTHORS"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!();
    println!("For more information, visit: {}", env!("CARGO_PKG_REPOSITORY"));
}

/// Resolve the analysis input from either literal text or a file path
pub fn load_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
            info!("Read {} bytes from {}", content.len(), path.display());
            content
        }
        (None, None) => bail!("Provide text to analyze with --text or a file path with --file"),
    };

    if input.trim().is_empty() {
        bail!("Input text is empty");
    }

    Ok(input)
}
