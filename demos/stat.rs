//! Example: Get information about a file or folder
//!
//! Usage:
//!   cargo run --example stat -- --token TOKEN PATH

mod cli;

use chrono::DateTime;
use cli::{connect_args, format_size, usage_and_exit};
use onedrivefs::{Filesystem, FsError};

const USAGE: &str = "Usage: cargo run --example stat -- --token TOKEN [--config FILE] PATH";

fn format_time(secs: Option<i64>) -> String {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

#[tokio::main]
async fn main() -> onedrivefs::Result<()> {
    let conn = connect_args(USAGE);
    let Some(path) = conn.positionals.first().cloned() else {
        usage_and_exit(USAGE);
    };
    let fs = conn.filesystem();

    let info = fs.getinfo(&path).await?;
    println!("\n🔍 Information:");
    println!("  Name:          {}", info.name());
    println!("  Type:          {:?}", info.resource_type());
    println!("  Size:          {}", format_size(info.size()));
    println!("  Created:       {}", format_time(info.created()));
    println!("  Modified:      {}", format_time(info.modified()));

    let raw = info.raw().map_err(|e| FsError::Io {
        path: path.clone(),
        source: e.into(),
    })?;
    for namespace in ["photo", "location", "tags"] {
        if let Some(block) = raw.get(namespace) {
            println!("  {:<14} {}", format!("{namespace}:"), block);
        }
    }
    Ok(())
}
