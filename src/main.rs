use bytes::Bytes;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use drive_adapter::util::path::basename;
use drive_adapter::{AccessToken, DriveAdapterFactory, DriveConfig, FileEntry, Options};

#[derive(Parser, Debug)]
#[command(name = "drive-adapter", about = "Browse a cloud drive through the file-system adapter")]
struct Cli {
    /// Bearer token used for every request
    #[arg(long, env = "DRIVE_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Listing page size
    #[arg(long)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a folder. Without an id, lists the drive root.
    Ls {
        #[arg(long)]
        id: Option<String>,
        /// Logical path used to build child paths
        #[arg(long, default_value = "/")]
        path: String,
        /// Extra filter expression, e.g. "trashed = false"
        #[arg(long)]
        query: Option<String>,
    },
    /// Print a file's content to stdout
    Cat {
        id: String,
        #[arg(long)]
        mime: Option<String>,
    },
    /// Upload a local file. Without --id, a new file is created under --parent.
    Put {
        file: PathBuf,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        mime: Option<String>,
    },
    /// Create a folder
    Mkdir {
        name: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Print a file's download link
    Url { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = DriveConfig::from_env();
    if let Some(page_size) = cli.page_size {
        config = config.with_option("page_size", page_size.to_string());
    }
    let adapter = DriveAdapterFactory::with_token(config, AccessToken::bearer(cli.token))?;
    let options = Options::new();

    match cli.command {
        Command::Ls { id, path, query } => {
            let mut container = FileEntry::directory(path);
            container.id = id;
            let mut options = options;
            if let Some(query) = query {
                options.insert("q".to_string(), query.into());
            }
            for entry in adapter.list(&container, &options).await? {
                let kind = if entry.is_directory() { "d" } else { "-" };
                println!(
                    "{} {:>12} {:<24} {}",
                    kind,
                    entry.size().map(|s| s.to_string()).unwrap_or_default(),
                    entry.id.as_deref().unwrap_or_default(),
                    entry.path
                );
            }
        }
        Command::Cat { id, mime } => {
            let mut entry = FileEntry::file(format!("/{}", id)).with_id(id);
            if let Some(mime) = mime {
                entry = entry.with_mime(mime);
            }
            let download = adapter.read(&entry, &options).await?;
            info!("Downloaded size={} mime={}", download.body.len(), download.mime);
            std::io::stdout().write_all(&download.body)?;
        }
        Command::Put {
            file,
            id,
            parent,
            mime,
        } => {
            let data = Bytes::from(tokio::fs::read(&file).await?);
            let display = file.to_string_lossy().to_string();
            let mut entry = FileEntry::file(format!("/{}", basename(&display)));
            entry.id = id;
            entry.parent_id = parent;
            if let Some(mime) = mime {
                entry = entry.with_mime(mime);
            }
            let written = adapter.write(&entry, data, &options).await?;
            println!("{}", written);
        }
        Command::Mkdir { name, parent } => {
            let mut entry = FileEntry::directory(format!("/{}", name)).with_filename(name);
            entry.parent_id = parent;
            let created = adapter.create_directory(&entry, &options).await?;
            println!("{}", created.id);
        }
        Command::Url { id } => {
            let entry = FileEntry::file(format!("/{}", id)).with_id(id);
            println!("{}", adapter.public_url(&entry, &options).await?);
        }
    }

    Ok(())
}
