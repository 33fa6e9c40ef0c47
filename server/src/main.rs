use clap::Parser;
use grocery_server_lib::ServerConfig;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    if let Err(e) = grocery_server_lib::run(config).await {
        eprintln!("grocery-server: {}", e);
        std::process::exit(1);
    }
}
