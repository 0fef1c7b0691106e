//! Example: Print a remote file to stdout
//!
//! Usage:
//!   cargo run --example cat -- --token TOKEN PATH

mod cli;

use std::io::Write;

use cli::{connect_args, usage_and_exit};
use onedrivefs::{Filesystem, FsError};

const USAGE: &str = "Usage: cargo run --example cat -- --token TOKEN [--config FILE] PATH";

#[tokio::main]
async fn main() -> onedrivefs::Result<()> {
    let conn = connect_args(USAGE);
    let Some(path) = conn.positionals.first().cloned() else {
        usage_and_exit(USAGE);
    };
    let fs = conn.filesystem();

    let data = fs.readbytes(&path).await?;
    std::io::stdout()
        .write_all(&data)
        .map_err(|e| FsError::Io { path, source: e })?;
    Ok(())
}
