//! Example: Upload a local file
//!
//! Usage:
//!   cargo run --example put -- --token TOKEN LOCAL_FILE REMOTE_PATH

mod cli;

use std::io::Write;

use cli::{connect_args, format_size, usage_and_exit};
use onedrivefs::{Filesystem, FsError};

const USAGE: &str =
    "Usage: cargo run --example put -- --token TOKEN [--config FILE] LOCAL_FILE REMOTE_PATH";

#[tokio::main]
async fn main() -> onedrivefs::Result<()> {
    let conn = connect_args(USAGE);
    let [local, remote] = conn.positionals.as_slice() else {
        usage_and_exit(USAGE);
    };
    let fs = conn.filesystem();

    let data = tokio::fs::read(local)
        .await
        .map_err(|e| FsError::Io { path: local.clone(), source: e })?;

    println!("Uploading {} ({})...", local, format_size(data.len() as u64));
    let mut file = fs.openbin(remote, "wb").await?;
    file.write_all(&data)
        .map_err(|e| FsError::Io { path: remote.clone(), source: e })?;
    file.close().await?;

    println!("✅ Uploaded to {}", remote);
    Ok(())
}
