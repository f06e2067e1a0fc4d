//! Command-line front ends for [`goop_parser`].
//!
//! `goop-tok` prints the token stream of a Go file, `goop-ast` its syntax
//! tree. Argument structs live in [`cli`]; the work itself lives in
//! [`commands`] so it can be driven from tests without spawning processes.

pub mod cli;
pub mod commands;
