//! Command-line interface for bookshelf.
//!
//! Running with no arguments seeds the catalog, connects to the
//! notification listener and starts the interactive menu.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use crate::adapters::{LogNotifier, NotificationClient};
use crate::config::{self, Overrides};
use crate::library::Catalog;

pub mod seed;
pub mod shell;

pub use shell::Shell;

const BANNER: &str = "----------Library Management System----------";

/// bookshelf - Library catalog with change notifications
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Notification listener host
    #[arg(long, env = "BOOKSHELF_HOST")]
    pub host: Option<String>,

    /// Notification listener port
    #[arg(long, env = "BOOKSHELF_PORT")]
    pub port: Option<u16>,

    /// Config file (searched for in .bookshelf/ if not provided)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start with an empty catalog
    #[arg(long)]
    pub no_seed: bool,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub offline: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            config_file: self.config.clone(),
            no_seed: self.no_seed,
        }
    }

    /// Execute the session
    pub async fn execute(self) -> Result<()> {
        let config = config::load_config(self.overrides())?;
        if let Some(path) = &config.config_file {
            info!(config = %path.display(), "Loaded config file");
        }

        println!("{}", BANNER);

        let mut catalog = Catalog::new();
        if config.seed {
            seed::seed_catalog(&mut catalog);
        }
        info!(total = catalog.count(), "Catalog ready");

        let stdin = io::stdin();
        let stdout = io::stdout();

        if self.offline {
            let mut notifier = LogNotifier::new();
            return Shell::new(&mut catalog, &mut notifier, stdin.lock(), stdout.lock())
                .run()
                .await;
        }

        let mut client = NotificationClient::from_settings(&config.notifier);

        if let Err(e) = client.open().await {
            error!(error = %e, address = %client.address(), "Failure to start notification client");
            return Ok(());
        }

        let result = Shell::new(&mut catalog, &mut client, stdin.lock(), stdout.lock())
            .run()
            .await;

        client.close().await;
        result
    }
}
