// src/bin/goop-ast.rs

use clap::Parser;
use goop::cli::{AstArgs, init_logging};
use goop::commands::run_ast;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    run_ast(&AstArgs::parse())
}
