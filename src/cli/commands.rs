use crate::llm::ExtractionFocus;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "infoviz",
    about = "Extract structured data from text with an LLM and get a visualization suggestion",
    version,
    author
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze text and store the result as JSON
    #[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
    Analyze {
        /// Text content to analyze
        #[arg(short, long)]
        text: Option<String>,

        /// Path to a UTF-8 file to analyze
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// API key (overrides DEEPSEEK_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Directory the result file is written to
        #[arg(short, long, env = "INFOVIZ_OUTPUT_DIR", default_value = "output")]
        output_dir: PathBuf,

        /// What the extraction prompt should emphasize
        #[arg(long, value_enum, default_value = "comprehensive")]
        focus: ExtractionFocus,

        /// Request timeout in seconds for each model call (default: 120)
        #[arg(long)]
        timeout: Option<u64>,

        /// Log prompt and response sizes
        #[arg(long)]
        llm_debug: bool,

        /// Do not write the result file
        #[arg(long)]
        no_save: bool,

        /// Print the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Disable colors in the summary
        #[arg(long)]
        no_color: bool,
    },

    /// Display the current configuration
    Config,

    /// Show information about infoviz
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_requires_input() {
        let result = Cli::try_parse_from(["infoviz", "analyze"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from(["infoviz", "analyze", "--text", "a", "--file", "b.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["infoviz", "analyze", "--text", "Reserves rose"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Text);

        match cli.command {
            Commands::Analyze {
                text,
                focus,
                timeout,
                no_save,
                no_color,
                ..
            } => {
                assert_eq!(text.as_deref(), Some("Reserves rose"));
                assert_eq!(focus, ExtractionFocus::Comprehensive);
                assert_eq!(timeout, None);
                assert!(!no_save);
                assert!(!no_color);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_analyze_options() {
        let cli = Cli::try_parse_from([
            "infoviz",
            "-v",
            "--log-format",
            "json",
            "analyze",
            "--file",
            "report.txt",
            "--focus",
            "keywords",
            "--timeout",
            "30",
            "--api-key",
            "sk-test",
            "--no-color",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Commands::Analyze {
                file,
                focus,
                timeout,
                api_key,
                no_color,
                ..
            } => {
                assert!(no_color);
                assert_eq!(file, Some(PathBuf::from("report.txt")));
                assert_eq!(focus, ExtractionFocus::Keywords);
                assert_eq!(timeout, Some(30));
                assert_eq!(api_key.as_deref(), Some("sk-test"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
