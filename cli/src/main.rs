use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use sync_client::prelude::*;
use sync_server::ServerConfig;
use tracing::{error, info};

const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "snippet-sync")]
#[command(about = "Local file server that commits and pushes every write")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sync server
    Serve(ServeArgs),
    /// Print a file through a running server
    Read {
        /// Path relative to the server's base directory
        path: String,
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Write a file through a running server (content from --content, --from-file, or stdin)
    Write {
        /// Path relative to the server's base directory
        path: String,
        /// Inline content
        #[arg(long, conflicts_with = "from_file")]
        content: Option<String>,
        /// Read content from a local file
        #[arg(long)]
        from_file: Option<PathBuf>,
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_SERVER)]
        server: String,
    },
}

#[derive(clap::Args, Default)]
struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory all file operations are confined to (must be a git work tree)
    #[arg(short, long)]
    base_dir: Option<PathBuf>,
    /// Listen host
    #[arg(long)]
    host: Option<String>,
    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,
    /// Remote to push to
    #[arg(long)]
    remote: Option<String>,
    /// Branch to push
    #[arg(long)]
    branch: Option<String>,
    /// Allow write pipelines to run concurrently
    #[arg(long)]
    no_serialize: bool,
    /// Per-command timeout for git, in seconds
    #[arg(long)]
    command_timeout: Option<u64>,
}

impl ServeArgs {
    fn into_config(self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(base_dir) = self.base_dir {
            config = config.with_base_dir(base_dir);
        }
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(remote) = self.remote {
            config = config.with_remote(remote);
        }
        if let Some(branch) = self.branch {
            config = config.with_branch(branch);
        }
        if self.no_serialize {
            config = config.with_serialized_writes(false);
        }
        if let Some(secs) = self.command_timeout {
            config = config.with_command_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let config = args.into_config()?;
            sync_server::run(&config).await?;
        }
        Commands::Read { path, server } => {
            let client = make_client(&server)?;
            read_file(&client, &path).await?;
        }
        Commands::Write {
            path,
            content,
            from_file,
            server,
        } => {
            let content = match (content, from_file) {
                (Some(content), _) => content,
                (None, Some(file)) => tokio::fs::read_to_string(&file).await?,
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let client = make_client(&server)?;
            write_file(&client, &path, &content).await?;
        }
    }

    Ok(())
}

fn make_client(server: &str) -> Result<HttpSyncClient, Box<dyn std::error::Error>> {
    Ok(HttpSyncClient::new(
        SyncClientConfig::new().with_base_url(server),
    )?)
}

async fn read_file(client: &dyn SyncClient, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    match client.read_file(path).await {
        Ok(content) => {
            print!("{}", content);
            Ok(())
        }
        Err(e) => {
            error!("Read of {} failed: {}", path, e);
            Err(e.into())
        }
    }
}

async fn write_file(
    client: &dyn SyncClient,
    path: &str,
    content: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match client.update_file(path, content).await {
        Ok(message) => {
            println!("✓ {}", message);
            info!("Write of {} succeeded", path);
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", e);
            error!("Write of {} failed: {}", path, e);
            Err(e.into())
        }
    }
}
