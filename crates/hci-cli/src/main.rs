//! # ha-cluster-info
//!
//! Exports the configuration of a pacemaker cluster node as `ha_cluster_*`
//! variables, either live from pcs or offline from pcs JSON output captured
//! earlier.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use hci_loader::{LoaderConfig, ProcessRunner};
use hci_pipeline::{
    convert_section, export_cluster_info, read_source, ClusterInfo, PipelineError, Section,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ha-cluster-info")]
#[command(about = "Export pacemaker cluster configuration as ha_cluster variables")]
#[command(version)]
struct Cli {
    /// Path to a YAML loader configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging, repeat for debug output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the configuration of the local cluster node
    Export {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert pcs JSON output saved to files
    Convert {
        /// Section the files belong to
        #[arg(short, long)]
        section: Section,

        /// Input files, in the order the section expects them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Serialize)]
struct Output<'a> {
    ha_cluster: &'a ClusterInfo,
}

impl OutputArgs {
    fn render(&self, info: &ClusterInfo) -> anyhow::Result<String> {
        let output = Output { ha_cluster: info };
        Ok(match self.format {
            OutputFormat::Json if self.pretty => serde_json::to_string_pretty(&output)?,
            OutputFormat::Json => serde_json::to_string(&output)?,
            OutputFormat::Yaml => serde_yaml::to_string(&output)?,
        })
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<LoaderConfig, PipelineError> {
    let config = match path {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (info, output) = match cli.command {
        Commands::Export { output } => {
            let config = load_config(cli.config.as_ref())?;
            debug!(?config, "loader configuration");
            let runner = ProcessRunner::new(config.command_timeout());
            (export_cluster_info(&runner, &config).await?, output)
        }
        Commands::Convert {
            section,
            inputs,
            output,
        } => {
            info!(%section, inputs = inputs.len(), "converting captured pcs output");
            let mut sources = Vec::with_capacity(inputs.len());
            for input in &inputs {
                sources.push(read_source(input).await?);
            }
            (convert_section(section, &sources)?, output)
        }
    };

    let rendered = output.render(&info).context("unable to serialize the result")?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<PipelineError>() {
        Some(error) => {
            eprintln!("{}", error.user_message());
            eprintln!("{}", error.details());
        }
        None => eprintln!("Error: {error:#}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}
