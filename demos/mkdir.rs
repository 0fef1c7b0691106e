//! Example: Create a folder
//!
//! Usage:
//!   cargo run --example mkdir -- --token TOKEN [--recreate] PATH

mod cli;

use cli::{connect_args, usage_and_exit};
use onedrivefs::Filesystem;

const USAGE: &str =
    "Usage: cargo run --example mkdir -- --token TOKEN [--config FILE] [--recreate] PATH";

#[tokio::main]
async fn main() -> onedrivefs::Result<()> {
    let conn = connect_args(USAGE);
    let recreate = conn.positionals.iter().any(|a| a == "--recreate");
    let Some(path) = conn.positionals.iter().find(|a| !a.starts_with("--")).cloned() else {
        usage_and_exit(USAGE);
    };
    let fs = conn.filesystem();

    let dir = fs.makedir(&path, recreate).await?;
    println!("✅ Created {}", dir.base());
    Ok(())
}
