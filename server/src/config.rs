//! Server configuration
//!
//! Every option can come from the command line or the environment.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "grocery-server", version, about = "Grocery list REST API")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "GROCERY_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// SQLite database file (":memory:" for a throwaway store)
    #[arg(long, env = "GROCERY_DB_PATH", default_value = "grocery_deals.db")]
    pub db_path: PathBuf,

    /// Directory for rotated log files
    #[arg(long, env = "GROCERY_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "GROCERY_LOG", default_value = "info")]
    pub log_level: String,

    /// Owner recorded on lists created without `createdBy`
    #[arg(long, env = "GROCERY_DEFAULT_OWNER", default_value = "anonymous")]
    pub default_owner: String,
}
