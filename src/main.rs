//! Grocery Deals terminal client

mod app;
mod commands;
mod models;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddItemArgs, ClientError, CreateItemArgs, CreateListArgs, GroceryApi};

#[derive(Debug, Parser)]
#[command(name = "grocery-deals", version, about = "Browse and edit grocery lists")]
struct Cli {
    /// API base URL
    #[arg(long, env = "GROCERY_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every grocery list
    Lists,
    /// Show one list's entries
    Show { list_id: String },
    /// Create a list
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        created_by: Option<String>,
    },
    /// Add an item to a list
    Add {
        list_id: String,
        item_id: String,
        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Show every item
    Items,
    /// Create an item
    NewItem {
        name: String,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        store: Option<String>,
    },
}

async fn execute(api: &GroceryApi, command: Command) -> Result<String, ClientError> {
    let out = match command {
        Command::Lists => app::render_lists(&api.list_lists().await?),
        Command::Show { list_id } => app::render_list(&api.get_list(&list_id).await?),
        Command::Create { name, created_by } => {
            let list = api
                .create_list(&CreateListArgs {
                    name: name.as_deref(),
                    created_by: created_by.as_deref(),
                })
                .await?;
            format!("created {} ({})\n", list.list_name, list.id)
        }
        Command::Add {
            list_id,
            item_id,
            quantity,
        } => {
            let response = api
                .add_item(
                    &list_id,
                    &AddItemArgs {
                        item_id: &item_id,
                        quantity,
                    },
                )
                .await?;
            format!("{}\n{}", response.message, app::render_list(&response.list))
        }
        Command::Items => app::render_items(&api.list_items().await?),
        Command::NewItem { name, price, store } => {
            let item = api
                .create_item(&CreateItemArgs {
                    name: &name,
                    price,
                    store: store.as_deref(),
                })
                .await?;
            format!("created {} ({})\n", item.name, item.id)
        }
    };
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = GroceryApi::new(&cli.server);

    match execute(&api, cli.command).await {
        Ok(out) => {
            print!("{out}");
            Ok(())
        }
        Err(ClientError::Api {
            status,
            message,
            detail,
        }) => {
            eprintln!("error: {message}");
            if let Some(detail) = detail {
                eprintln!("  caused by: {detail}");
            }
            anyhow::bail!("server responded with {status}")
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from(["grocery-deals", "add", "l1", "i1", "--quantity", "3"]).unwrap();
        match cli.command {
            Command::Add {
                list_id,
                item_id,
                quantity,
            } => {
                assert_eq!(list_id, "l1");
                assert_eq!(item_id, "i1");
                assert_eq!(quantity, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_create_name_is_optional() {
        let cli = Cli::try_parse_from(["grocery-deals", "create"]).unwrap();
        assert!(matches!(cli.command, Command::Create { name: None, .. }));
    }
}
