//! Recursive-descent parser producing the arena AST.
//!
//! One method per production, split by area: declarations in `decl.rs`,
//! statements in `stmt.rs`, expressions (precedence climbing) in `expr.rs`
//! and types in `types.rs`.
//!
//! The parser pulls tokens lazily from a [`Lexer`] and keeps the current
//! token plus at most one token of lookahead. Comment tokens are skipped.

mod decl;
mod expr;
mod stmt;
mod types;

use crate::ast::{AstArena, IdentName, Interner, SourceFile, StringLit};
use crate::error::{Diag, Error, LexError, ParseError, ParseFailure, Span};
use crate::lexer::{LexMode, Lexer, ScanConfig};
use crate::token::{Keyword, Punct, Tok, Token};
use crate::walk::{BadNodeCounter, Visitor};

pub(crate) type PResult<T> = Result<T, Error>;

/// How deeply expressions, types and blocks may nest before parsing fails
/// with an error instead of exhausting the stack.
pub const MAX_NESTING: usize = 128;

/// Parser behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseConfig {
    /// Record errors, insert `Bad` nodes and keep going instead of stopping
    /// at the first error.
    pub resilient: bool,
}

impl ParseConfig {
    pub fn resilient() -> Self {
        Self { resilient: true }
    }
}

/// A parsed file: the root node plus the arena and interner it indexes.
#[derive(Debug)]
pub struct ParsedFile {
    pub arena: AstArena,
    pub interner: Interner,
    pub file: SourceFile,
}

impl ParsedFile {
    /// Text of an identifier or literal symbol.
    #[inline]
    pub fn text(&self, sym: crate::ast::Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Number of `Bad` placeholders in the tree; zero unless parsed resiliently
    /// from erroneous input.
    pub fn bad_nodes(&self) -> usize {
        let mut counter = BadNodeCounter::default();
        counter.visit_source_file(&self.arena, &self.file);
        counter.count
    }

    /// Total number of arena-allocated nodes.
    pub fn node_count(&self) -> usize {
        let a = &self.arena;
        a.decls.len()
            + a.stmts.len()
            + a.simple_stmts.len()
            + a.exprs.len()
            + a.types.len()
            + a.signatures.len()
            + a.funcs.len()
            + a.fields.len()
    }
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    config: ParseConfig,
    tok: Token<'src>,
    peek: Option<Token<'src>>,
    /// End offset of the last consumed token.
    prev_end: u32,
    depth: usize,
    arena: AstArena,
    interner: Interner,
    diags: Vec<Diag>,
}

impl<'src> Parser<'src> {
    pub fn new(lexer: Lexer<'src>, config: ParseConfig) -> Self {
        Self {
            lexer,
            config,
            tok: Token::new(Tok::Eof, Span::empty_at(0)),
            peek: None,
            prev_end: 0,
            depth: 0,
            arena: AstArena::new(),
            interner: Interner::new(),
            diags: Vec::new(),
        }
    }

    /// Parser over `src`. In resilient mode the scanner runs best-effort so
    /// lexical errors are reported instead of ending the token stream.
    pub fn for_source(src: &'src str, config: ParseConfig) -> Self {
        let scan = if config.resilient {
            ScanConfig {
                mode: LexMode::BestEffort,
                ..ScanConfig::default()
            }
        } else {
            ScanConfig::default()
        };
        Self::new(Lexer::with_config(src, scan), config)
    }

    /// Parses the whole file, honoring the configured error policy.
    ///
    /// Fails with a partial tree when resilient parsing recorded diagnostics,
    /// and without one when the package clause itself is unusable.
    pub fn parse_file(mut self) -> Result<ParsedFile, ParseFailure> {
        match self.parse_source_file() {
            Ok(file) => {
                let mut diags = std::mem::take(&mut self.diags);
                let parsed = self.finish(file);
                if diags.is_empty() {
                    Ok(parsed)
                } else {
                    diags.sort_by_key(|d| d.span.start);
                    Err(ParseFailure {
                        partial: Some(parsed),
                        diags,
                    })
                }
            }
            Err(err) => {
                let mut diags = std::mem::take(&mut self.diags);
                diags.push(err.diag());
                diags.sort_by_key(|d| d.span.start);
                Err(ParseFailure {
                    partial: None,
                    diags,
                })
            }
        }
    }

    /// Parses the whole file and stops at the first error.
    pub fn parse_strict(mut self) -> Result<ParsedFile, Error> {
        self.config.resilient = false;
        let file = self.parse_source_file()?;
        Ok(self.finish(file))
    }

    fn finish(self, file: SourceFile) -> ParsedFile {
        tracing::debug!(
            exprs = self.arena.exprs.len(),
            stmts = self.arena.stmts.len(),
            symbols = self.interner.len(),
            "parse finished"
        );
        ParsedFile {
            arena: self.arena,
            interner: self.interner,
            file,
        }
    }

    // =========================================================================
    // Token manipulation
    // =========================================================================

    fn pull(&mut self) -> PResult<Token<'src>> {
        loop {
            match self.lexer.next() {
                Some(Ok(token)) if matches!(token.tok, Tok::Comment { .. }) => continue,
                Some(Ok(token)) => return Ok(token),
                Some(Err(err)) if self.config.resilient => self.record_lex(err),
                Some(Err(err)) => return Err(err.into()),
                None => {
                    let end = self.lexer.source().len();
                    return Ok(Token::new(Tok::Eof, Span::empty_at(end)));
                }
            }
        }
    }

    fn record_lex(&mut self, err: LexError) {
        tracing::debug!(error = %err, "lexical error recorded");
        self.diags.push(err.diag());
    }

    pub(crate) fn advance(&mut self) -> PResult<()> {
        self.prev_end = self.tok.span.end;
        self.tok = match self.peek.take() {
            Some(token) => token,
            None => self.pull()?,
        };
        Ok(())
    }

    /// The token after the current one.
    pub(crate) fn peek(&mut self) -> PResult<&Tok<'src>> {
        let token = match self.peek.take() {
            Some(token) => token,
            None => self.pull()?,
        };
        Ok(&self.peek.insert(token).tok)
    }

    #[inline]
    pub(crate) fn at(&self, p: Punct) -> bool {
        self.tok.tok.is_punct(p)
    }

    #[inline]
    pub(crate) fn at_kw(&self, k: Keyword) -> bool {
        self.tok.tok.is_keyword(k)
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.tok.tok, Tok::Eof)
    }

    #[inline]
    pub(crate) fn pos(&self) -> Span {
        self.tok.span
    }

    pub(crate) fn eat(&mut self, p: Punct) -> PResult<bool> {
        if self.at(p) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes `p` and returns its span.
    pub(crate) fn expect(&mut self, p: Punct) -> PResult<Span> {
        if !self.at(p) {
            return Err(self.unexpected(format!("`{p}`")));
        }
        let span = self.tok.span;
        self.advance()?;
        Ok(span)
    }

    pub(crate) fn expect_kw(&mut self, k: Keyword) -> PResult<Span> {
        if !self.at_kw(k) {
            return Err(self.unexpected(format!("`{k}`")));
        }
        let span = self.tok.span;
        self.advance()?;
        Ok(span)
    }

    /// Statement/declaration terminator. It may be omitted before a closing
    /// `)` or `}`.
    pub(crate) fn expect_semi(&mut self) -> PResult<()> {
        if self.at(Punct::RParen) || self.at(Punct::RBrace) || self.at_eof() {
            return Ok(());
        }
        self.expect(Punct::Semi).map(|_| ())
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn span_from(&self, start: Span) -> Span {
        Span {
            start: start.start,
            end: self.prev_end.max(start.end),
        }
    }

    /// Runs `f` one nesting level deeper.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.unexpected(format!("nesting depth below {MAX_NESTING}")));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn ident(&mut self) -> PResult<IdentName> {
        let Tok::Ident(name) = self.tok.tok else {
            return Err(self.unexpected("identifier"));
        };
        let ident = IdentName {
            sym: self.interner.intern(name),
            pos: self.tok.span,
        };
        self.advance()?;
        Ok(ident)
    }

    pub(crate) fn ident_list(&mut self) -> PResult<Vec<IdentName>> {
        let mut names = vec![self.ident()?];
        while self.eat(Punct::Comma)? {
            names.push(self.ident()?);
        }
        Ok(names)
    }

    pub(crate) fn string_lit(&mut self) -> PResult<StringLit> {
        let Tok::Str(raw) = self.tok.tok else {
            return Err(self.unexpected("string literal"));
        };
        let lit = StringLit {
            raw: self.interner.intern(raw),
            pos: self.tok.span,
        };
        self.advance()?;
        Ok(lit)
    }

    // =========================================================================
    // Errors and recovery
    // =========================================================================

    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> Error {
        let found = if self.tok.is_implicit_semi() {
            "newline".to_string()
        } else {
            self.tok.tok.describe()
        };
        ParseError::new(self.tok.span, expected, found).into()
    }

    /// In resilient mode, records `err` and returns the span to cover with a
    /// `Bad` node; otherwise hands the error back.
    pub(crate) fn recover(&mut self, err: Error, sync: Sync) -> PResult<Span> {
        if !self.config.resilient {
            return Err(err);
        }
        tracing::debug!(error = %err, ?sync, "recovering");
        let start = err.span();
        let diag = err.diag();
        if self.diags.last() != Some(&diag) {
            self.diags.push(diag);
        }
        self.synchronize(sync)?;
        Ok(self.span_from(Span::empty_at(start.start as usize)))
    }

    fn synchronize(&mut self, sync: Sync) -> PResult<()> {
        let mut depth = 0usize;
        let mut after_semi = false;
        let mut first = true;
        while !self.at_eof() {
            match sync {
                Sync::Stmt if depth == 0 && self.at(Punct::RBrace) => return Ok(()),
                Sync::Stmt if depth == 0 && self.at(Punct::Semi) => return self.advance(),
                Sync::Decl if !first && after_semi && depth == 0 && self.at_decl_keyword() => {
                    return Ok(());
                }
                _ => {}
            }
            if self.at(Punct::LBrace) {
                depth += 1;
            } else if self.at(Punct::RBrace) {
                depth = depth.saturating_sub(1);
            }
            after_semi = self.at(Punct::Semi);
            first = false;
            self.advance()?;
        }
        Ok(())
    }

    fn at_decl_keyword(&self) -> bool {
        matches!(
            self.tok.tok,
            Tok::Keyword(Keyword::Func | Keyword::Const | Keyword::Var | Keyword::Type | Keyword::Import)
        )
    }
}

/// Where resynchronization stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sync {
    /// After the next `;`, or before the `}` closing the current block.
    Stmt,
    /// Before the next declaration keyword that starts a line.
    Decl,
}

/// Parses `src` and stops at the first lexical or syntax error.
pub fn parse(src: &str) -> Result<ParsedFile, Error> {
    tracing::debug!(len = src.len(), "parse");
    Parser::for_source(src, ParseConfig::default()).parse_strict()
}

/// Parses `src`, recovering from errors.
pub fn parse_resilient(src: &str) -> Result<ParsedFile, ParseFailure> {
    tracing::debug!(len = src.len(), "parse (resilient)");
    Parser::for_source(src, ParseConfig::resilient()).parse_file()
}
