//! docpage CLI - static documentation page renderer.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use docpage_static::OutputFormat;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docpage")]
#[command(about = "Render documentation pages to static HTML")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docpage.toml config file
    #[arg(short, long, default_value = "docpage.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and example page
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Render one page
    Render {
        /// Source page (.md or .mdx)
        input: PathBuf,

        /// Output file (defaults to <build.output>/<stem>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the bare fragment without the page layout
        #[arg(long)]
        fragment: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Render {
            input,
            output,
            fragment,
            format,
        } => {
            let args = commands::render::RenderArgs {
                input,
                output,
                fragment,
                format: format.into(),
            };
            commands::render::run(&cli.config, args).await?;
        }
    }

    Ok(())
}
