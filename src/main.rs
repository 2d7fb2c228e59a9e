use anyhow::Result;
use clap::Parser;
use infoviz::cli::commands::{Cli, Commands};
use infoviz::cli::handlers::{handle_analyze_command, handle_config_command, AnalyzeOptions};
use infoviz::cli::utils::{init_logging, print_info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format);

    // Execute command
    match cli.command {
        Commands::Analyze {
            text,
            file,
            api_key,
            output_dir,
            focus,
            timeout,
            llm_debug,
            no_save,
            json,
            no_color,
        } => {
            handle_analyze_command(AnalyzeOptions {
                text,
                file,
                api_key,
                output_dir,
                focus,
                timeout,
                llm_debug,
                no_save,
                json,
                no_color,
            })
            .await
        }

        Commands::Config => handle_config_command(),

        Commands::Info => {
            print_info();
            Ok(())
        }
    }
}
