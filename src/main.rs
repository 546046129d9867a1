mod commands;
mod google;
mod pdf;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

const DEFAULT_INPUT_DIR: &str = "input";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Parser)]
#[command(name = "rezept-termine")]
#[command(about = "Turn therapy appointments from prescription PDFs into calendar files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every PDF in the input directory to an .ics file (default)
    Convert(ConvertArgs),
    /// Print the appointments found in a single PDF or text file
    Extract {
        file: PathBuf,

        /// Print appointments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Authenticate with Google Calendar and cache the session
    Auth,
    /// Write the default config file if it does not exist yet
    InitConfig {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Directory containing the prescription PDFs
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Directory the .ics files are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Path of the JSON config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Skip Google Calendar upload even if enabled in the config
    #[arg(long)]
    no_upload: bool,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        ConvertArgs {
            input: PathBuf::from(DEFAULT_INPUT_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            no_upload: false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Convert(ConvertArgs::default())) {
        Commands::Convert(args) => {
            commands::convert::run(commands::convert::ConvertOptions {
                input_dir: args.input,
                output_dir: args.output,
                config_path: args.config,
                upload: !args.no_upload,
            })
            .await
        }
        Commands::Extract { file, json } => commands::extract::run(&file, json),
        Commands::Auth => commands::auth::run().await,
        Commands::InitConfig { config } => commands::init_config::run(&config),
    }
}
