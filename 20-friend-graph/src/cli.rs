use std::{fs::File, io::BufReader, net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::store::UserStore;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serve user records and friendship distances over HTTP")]
pub struct Cli {
    /// Socket address to bind. Use port 0 for an ephemeral port.
    #[arg(long, default_value = "127.0.0.1:5000", env = "FRIEND_GRAPH_LISTEN")]
    pub listen: SocketAddr,

    /// JSON file of the form {"users": [{"user_id": 1, "friends": [2]}]} to start from.
    #[arg(long, env = "FRIEND_GRAPH_SEED_FILE", conflicts_with = "empty")]
    pub seed_file: Option<PathBuf>,

    /// Start without any users instead of the built-in three-user graph.
    #[arg(long)]
    pub empty: bool,
}

impl Cli {
    /// Builds the store the server starts with.
    pub fn initial_store(&self) -> Result<UserStore> {
        if let Some(path) = &self.seed_file {
            let file = File::open(path)
                .with_context(|| format!("failed to open seed file {}", path.display()))?;
            return UserStore::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to load seed file {}", path.display()));
        }
        if self.empty {
            return Ok(UserStore::new());
        }
        Ok(UserStore::demo())
    }
}
