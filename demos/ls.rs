//! Example: List a folder
//!
//! Usage:
//!   cargo run --example ls -- --token TOKEN [--config onedrivefs.toml] [PATH]

mod cli;

use cli::{connect_args, format_size};
use futures::TryStreamExt;
use onedrivefs::Filesystem;

const USAGE: &str = "Usage: cargo run --example ls -- --token TOKEN [--config FILE] [PATH]";

#[tokio::main]
async fn main() -> onedrivefs::Result<()> {
    let conn = connect_args(USAGE);
    let path = conn.positionals.first().cloned().unwrap_or_else(|| "/".to_string());
    let fs = conn.filesystem();

    println!("📁 Listing: {}\n", path);

    let mut entries = fs.scandir(&path).await?;
    let mut count = 0;
    while let Some(info) = entries.try_next().await? {
        let type_icon = if info.is_dir() { "📁" } else { "📄" };
        let size_str = if info.is_file() {
            format_size(info.size())
        } else {
            String::new()
        };
        println!("  {} {} {}", type_icon, info.name(), size_str);
        count += 1;
    }
    if count == 0 {
        println!("  (empty)");
    }
    Ok(())
}
