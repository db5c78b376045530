//! CLI entry point for plume

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "plume")]
#[command(version)]
#[command(about = "A personal site generator with a git-aware blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Serve without watching for changes
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List posts with their resolved timestamps
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "plume=debug,info"
    } else {
        "plume=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate { watch } => {
            let site = plume::Site::new(&base_dir)?;
            site.generate().await?;
            println!("Generated successfully!");

            if watch {
                plume::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let site = plume::Site::new(&base_dir)?;

            site.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            plume::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = plume::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = plume::Site::new(&base_dir)?;
            plume::commands::list::run(&site).await?;
        }

        Commands::Version => {
            println!("plume version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
