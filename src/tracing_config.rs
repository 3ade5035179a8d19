//! Tracing setup for the `parcomb` binary.
//!
//! Output format is chosen by `PARCOMB_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` lines
//! - `json`: one JSON object per event
//!
//! ```bash
//! PARCOMB_LOG=debug parcomb brackets '[[]]'
//! PARCOMB_LOG="parcomb=trace" PARCOMB_LOG_FORMAT=json parcomb bf '+[-]'
//! ```
//!
//! Nothing is installed unless `PARCOMB_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("PARCOMB_LOG_FORMAT").unwrap_or_default())
    }
}

/// `PARCOMB_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("PARCOMB_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_tracing() {
    let has_own_log = std::env::var("PARCOMB_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_own_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
