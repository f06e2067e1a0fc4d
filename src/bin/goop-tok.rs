// src/bin/goop-tok.rs

use clap::Parser;
use goop::cli::{TokArgs, init_logging};
use goop::commands::run_tok;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    run_tok(&TokArgs::parse())
}
