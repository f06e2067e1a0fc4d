// src/cli.rs

use clap::Parser;
use goop_parser::{ParseConfig, ScanConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

/// Print the token stream of a Go source file
#[derive(Debug, Parser)]
#[command(name = "goop-tok", version, long_about = None)]
pub struct TokArgs {
    /// Go source file; stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Emit comments as tokens
    #[arg(long)]
    pub comments: bool,

    /// Keep scanning after lexical errors
    #[arg(long)]
    pub best_effort: bool,
}

impl TokArgs {
    pub fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default();
        if self.comments {
            config = config.with_comments();
        }
        if self.best_effort {
            config = config.best_effort();
        }
        config
    }
}

/// Print the syntax tree of a Go source file
#[derive(Debug, Parser)]
#[command(name = "goop-ast", version, long_about = None)]
pub struct AstArgs {
    /// Go source file; stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Recover from syntax errors and print the partial tree
    #[arg(long)]
    pub resilient: bool,
}

impl AstArgs {
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig {
            resilient: self.resilient,
        }
    }
}

/// Timer that prints nothing, keeping log lines compact.
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(&self, _w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        Ok(())
    }
}

/// Installs a stderr subscriber when `GOOP_LOG` holds a filter.
///
/// Stdout carries the dump, so logging never goes there.
pub fn init_logging() {
    let Ok(filter) = EnvFilter::try_from_env("GOOP_LOG") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(NoTimestamp)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use goop_parser::LexMode;

    #[test]
    fn tok_flags_map_to_scan_config() {
        let args = TokArgs::parse_from(["goop-tok", "--comments", "--best-effort", "a.go"]);
        let config = args.scan_config();
        assert!(config.keep_comments);
        assert_eq!(config.mode, LexMode::BestEffort);
        assert_eq!(args.file, Some(PathBuf::from("a.go")));

        let args = TokArgs::parse_from(["goop-tok"]);
        assert_eq!(args.scan_config(), ScanConfig::default());
        assert!(args.file.is_none());
    }

    #[test]
    fn ast_flags_map_to_parse_config() {
        let args = AstArgs::parse_from(["goop-ast", "--resilient", "-"]);
        assert!(args.parse_config().resilient);
        assert!(!AstArgs::parse_from(["goop-ast"]).parse_config().resilient);
    }
}
