// src/commands.rs
//! Shared work behind the `goop-tok` and `goop-ast` binaries.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use goop_parser::{
    Diag, LineIndex, ParseConfig, ParsedFile, ScanConfig, Lexer, render_ast, render_tokens,
};
use thiserror::Error;

use crate::cli::{AstArgs, TokArgs};

/// Name used in diagnostics for input read from stdin.
pub const STDIN_NAME: &str = "<stdin>";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("could not write output: {0}")]
    Write(#[source] io::Error),
}

/// Source text plus the name diagnostics refer to it by.
#[derive(Debug, Clone)]
pub struct Input {
    pub name: String,
    pub text: String,
}

impl Input {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Reads `path`, or stdin when it is `None` or `-`.
    pub fn read(path: Option<&Path>) -> Result<Self, CommandError> {
        match path {
            Some(path) if path != Path::new("-") => {
                let name = path.display().to_string();
                let text = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
                    name: name.clone(),
                    source,
                })?;
                Ok(Self { name, text })
            }
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| CommandError::Read {
                        name: STDIN_NAME.to_string(),
                        source,
                    })?;
                Ok(Self::new(STDIN_NAME, text))
            }
        }
    }

    /// `<name>:<line>:<col>: <message>`
    fn report(&self, index: &LineIndex, diag: &Diag) -> String {
        format!("{}:{}", self.name, diag.render(&self.text, index))
    }
}

/// Result of one dump: text for stdout and error lines for stderr.
#[derive(Debug, Default)]
pub struct Outcome {
    pub dump: String,
    pub errors: Vec<String>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scans `input` and renders every token produced before the stream ended.
///
/// In strict mode the stream ends at the first lexical error; in best-effort
/// mode all errors are reported and scanning continues past them.
pub fn dump_tokens(input: &Input, config: ScanConfig) -> Outcome {
    let index = LineIndex::new(&input.text);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for item in Lexer::with_config(&input.text, config) {
        match item {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(input.report(&index, &err.diag())),
        }
    }

    tracing::info!(
        file = %input.name,
        tokens = tokens.len(),
        errors = errors.len(),
        "scanned"
    );
    Outcome {
        dump: render_tokens(&tokens),
        errors,
    }
}

/// Parses `input` and renders the tree.
///
/// A strict parse renders nothing on error. A resilient parse renders the
/// partial tree, if one survived, alongside every diagnostic.
pub fn dump_ast(input: &Input, config: ParseConfig) -> Outcome {
    let index = LineIndex::new(&input.text);

    let (parsed, diags): (Option<ParsedFile>, Vec<Diag>) = if config.resilient {
        match goop_parser::parse_resilient(&input.text) {
            Ok(parsed) => (Some(parsed), Vec::new()),
            Err(failure) => (failure.partial, failure.diags),
        }
    } else {
        match goop_parser::parse(&input.text) {
            Ok(parsed) => (Some(parsed), Vec::new()),
            Err(err) => (None, vec![err.diag()]),
        }
    };

    tracing::info!(
        file = %input.name,
        nodes = parsed.as_ref().map_or(0, ParsedFile::node_count),
        errors = diags.len(),
        "parsed"
    );
    Outcome {
        dump: parsed.as_ref().map(render_ast).unwrap_or_default(),
        errors: diags.iter().map(|d| input.report(&index, d)).collect(),
    }
}

fn finish(outcome: Result<Outcome, CommandError>) -> ExitCode {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(outcome.dump.as_bytes())
        .and_then(|()| stdout.flush())
    {
        eprintln!("error: {}", CommandError::Write(err));
        return ExitCode::FAILURE;
    }
    for line in &outcome.errors {
        eprintln!("{line}");
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub fn run_tok(args: &TokArgs) -> ExitCode {
    finish(Input::read(args.file.as_deref()).map(|input| dump_tokens(&input, args.scan_config())))
}

pub fn run_ast(args: &AstArgs) -> ExitCode {
    finish(Input::read(args.file.as_deref()).map(|input| dump_ast(&input, args.parse_config())))
}
