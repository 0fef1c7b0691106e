//! Example: Remove a file or folder
//!
//! Usage:
//!   cargo run --example rm -- --token TOKEN PATH

mod cli;

use cli::{connect_args, usage_and_exit};
use onedrivefs::Filesystem;

const USAGE: &str = "Usage: cargo run --example rm -- --token TOKEN [--config FILE] PATH";

#[tokio::main]
async fn main() -> onedrivefs::Result<()> {
    let conn = connect_args(USAGE);
    let Some(path) = conn.positionals.first().cloned() else {
        usage_and_exit(USAGE);
    };
    let fs = conn.filesystem();

    if fs.isdir(&path).await? {
        fs.removedir(&path).await?;
    } else {
        fs.remove(&path).await?;
    }
    println!("🗑️  Removed {}", path);
    Ok(())
}
