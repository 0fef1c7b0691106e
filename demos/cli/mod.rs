use std::env;
use std::process;
use std::sync::Arc;

use onedrivefs::{Config, OneDriveFs, StaticToken};
use tracing_subscriber::EnvFilter;

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                let value = self.args.get(i + 1).cloned();
                if value.is_none() {
                    usage_and_exit(self.usage);
                }
                self.args.drain(i..=i + 1);
                return value;
            }
            i += 1;
        }
        None
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

/// Connection settings shared by every demo.
pub struct Connection {
    pub token: String,
    pub config: Config,
    pub positionals: Vec<String>,
}

/// Parse `--token` (or `ONEDRIVE_TOKEN`) and `--config`, and set up logging.
///
/// Log verbosity follows `RUST_LOG`, e.g. `RUST_LOG=onedrivefs=debug`.
pub fn connect_args(usage: &'static str) -> Connection {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut parser = ArgParser::new(usage);
    let token = parser
        .take_value(&["--token", "-t"])
        .or_else(|| env::var("ONEDRIVE_TOKEN").ok())
        .unwrap_or_else(|| usage_and_exit(usage));
    let config = match parser.take_value(&["--config", "-c"]) {
        Some(path) => Config::load(&path).unwrap_or_else(|e| {
            eprintln!("❌ {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };

    Connection {
        token,
        config,
        positionals: parser.remaining(),
    }
}

impl Connection {
    pub fn filesystem(&self) -> OneDriveFs {
        OneDriveFs::new(self.config.clone(), Arc::new(StaticToken::new(&self.token)))
            .unwrap_or_else(|e| {
                eprintln!("❌ {e}");
                process::exit(1);
            })
    }
}

#[allow(dead_code)] // Only the listing demos print sizes.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1_048_576 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else if bytes < 1_073_741_824 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    }
}
