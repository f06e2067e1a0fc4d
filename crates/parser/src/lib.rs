//! Go front-end: scanner, parser and canonical dumps.
//!
//! - The scanner is built on Logos and implements Go's automatic semicolon
//!   insertion; see [`lexer`].
//! - The parser is hand-written recursive descent with precedence climbing
//!   and builds an arena AST; see [`parser`] and [`ast`].
//! - [`dump`] renders tokens or trees as deterministic text for golden tests.

pub mod ast;
pub mod dump;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod walk;

pub use dump::{render_ast, render_tokens};
pub use error::{Diag, DiagKind, Error, LexError, LexErrorKind, LineIndex, ParseError, ParseFailure, Span};
pub use lexer::{LexMode, Lexer, ScanConfig, scan, tokenize};
pub use parser::{MAX_NESTING, ParseConfig, ParsedFile, Parser, parse, parse_resilient};
pub use token::{Keyword, Punct, Tok, Token};
