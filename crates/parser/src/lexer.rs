use crate::error::{Diag, LexError, LexErrorKind, Span};
use crate::token::{FloatLit, IntLit, Keyword, Number, Punct, Tok, Token};
use logos::{Lexer as LogosLexer, Logos};
use std::ops::Range;

// =============================================================================
// 0. Shared helpers
// =============================================================================

const HEX_LUT: [u8; 256] = {
    let mut t = [0xFFu8; 256];

    let mut i = b'0';
    while i <= b'9' {
        t[i as usize] = i - b'0';
        i += 1;
    }

    let mut i = b'a';
    while i <= b'f' {
        t[i as usize] = (i - b'a') + 10;
        t[(i - 32) as usize] = (i - b'a') + 10;
        i += 1;
    }

    t
};

/// Digit value of `b` in base 16, or `0xFF`.
#[inline(always)]
const fn digit_value(b: u8) -> u32 {
    HEX_LUT[b as usize] as u32
}

#[inline(always)]
const fn lower_ascii(b: u8) -> u8 {
    b | 0x20
}

#[inline(always)]
const fn is_valid_unicode_scalar(x: u32) -> bool {
    x <= 0x10_FFFF && !(x >= 0xD800 && x <= 0xDFFF)
}

/// Offset of the first line break; a `\r` directly before the `\n` belongs
/// to it. A lone `\r` is whitespace.
#[inline]
fn first_newline_offset(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let at = memchr::memchr(b'\n', bytes)?;
    Some(if at > 0 && bytes[at - 1] == b'\r' { at - 1 } else { at })
}

// =============================================================================
// 1. Block comments
// =============================================================================

fn lex_block_comment(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    let rem = lex.remainder().as_bytes();
    match memchr::memmem::find(rem, b"*/") {
        Some(at) => {
            lex.bump(at + 2);
            Ok(())
        }
        None => {
            lex.bump(rem.len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

// =============================================================================
// 2. String and rune literals (validated, never decoded)
// =============================================================================

mod esc {
    use super::*;

    /// Length of the escape that starts right after a backslash.
    ///
    /// `quote` is the one delimiter that may be escaped (`"` in strings, `'`
    /// in runes).
    pub(super) fn escape_len(rest: &[u8], quote: u8) -> Result<usize, LexErrorKind> {
        let Some(&c) = rest.first() else {
            return Err(LexErrorKind::InvalidEscape);
        };

        let (skip, count, base, max) = match c {
            b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\' => return Ok(1),
            c if c == quote => return Ok(1),
            b'0'..=b'7' => (0, 3, 8, 255),
            b'x' => (1, 2, 16, 255),
            b'u' => (1, 4, 16, 0x10_FFFF),
            b'U' => (1, 8, 16, 0x10_FFFF),
            _ => return Err(LexErrorKind::InvalidEscape),
        };

        let digits = rest
            .get(skip..skip + count)
            .ok_or(LexErrorKind::InvalidEscape)?;

        let mut value = 0u32;
        for &d in digits {
            let dv = digit_value(d);
            if dv >= base {
                return Err(LexErrorKind::InvalidEscape);
            }
            value = value * base + dv;
        }

        let unicode = base == 16 && count >= 4;
        if value > max || (unicode && !is_valid_unicode_scalar(value)) {
            return Err(LexErrorKind::InvalidEscape);
        }

        Ok(skip + count)
    }

    pub(super) fn validate_string(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
        let s = lex.slice().as_bytes();
        let body = &s[1..s.len() - 1];

        let mut i = 0;
        while i < body.len() {
            if body[i] == b'\\' {
                i += 1 + escape_len(&body[i + 1..], b'"')?;
            } else {
                i += 1;
            }
        }
        Ok(())
    }

    pub(super) fn validate_rune(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
        let s = lex.slice();
        let body = &s[1..s.len() - 1];

        if let Some(rest) = body.strip_prefix('\\') {
            let n = escape_len(rest.as_bytes(), b'\'')?;
            return if n == rest.len() {
                Ok(())
            } else {
                Err(LexErrorKind::InvalidRune)
            };
        }

        let mut chars = body.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => Ok(()),
            _ => Err(LexErrorKind::InvalidRune),
        }
    }
}

// =============================================================================
// 3. Numbers: maximal munch + validation in one pass
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumKind {
    Int,
    Float,
    ImagInt,
    ImagFloat,
}

mod num {
    use super::*;

    // bit 0: saw a digit, bit 1: saw a separator
    const DIGIT: u8 = 1;
    const SEP: u8 = 2;

    fn digits(src: &[u8], i: &mut usize, base: u32, invalid: &mut Option<usize>) -> u8 {
        let mut seen = 0;
        while let Some(&c) = src.get(*i) {
            if c == b'_' {
                seen |= SEP;
            } else if base <= 10 && c.is_ascii_digit() {
                if digit_value(c) >= base && invalid.is_none() {
                    *invalid = Some(*i);
                }
                seen |= DIGIT;
            } else if base == 16 && c.is_ascii_hexdigit() {
                seen |= DIGIT;
            } else {
                break;
            }
            *i += 1;
        }
        seen
    }

    /// A `_` must sit between two digits (a radix prefix counts as a digit).
    fn misplaced_separator(lit: &[u8]) -> bool {
        let mut hex = false;
        let mut prev = b'.';
        let mut i = 0;

        if lit.len() >= 2 && lit[0] == b'0' {
            let p = lower_ascii(lit[1]);
            if matches!(p, b'x' | b'o' | b'b') {
                hex = p == b'x';
                prev = b'0';
                i = 2;
            }
        }

        while i < lit.len() {
            let c = lit[i];
            let class = if c == b'_' {
                if prev != b'0' {
                    return true;
                }
                b'_'
            } else if c.is_ascii_digit() || (hex && c.is_ascii_hexdigit()) {
                b'0'
            } else {
                if prev == b'_' {
                    return true;
                }
                b'.'
            };
            prev = class;
            i += 1;
        }

        prev == b'_'
    }

    /// Scans the literal starting at `start`; returns its end and its kind.
    pub(super) fn scan(src: &[u8], start: usize) -> (usize, Result<NumKind, LexErrorKind>) {
        let at = |i: usize| src.get(i).copied().unwrap_or(0);

        let mut i = start;
        let mut base = 10;
        let mut prefix = 0u8;
        let mut seen = 0u8;
        let mut invalid = None;
        let mut float = false;
        let mut ok = true;

        if at(i) != b'.' {
            if at(i) == b'0' {
                i += 1;
                match lower_ascii(at(i)) {
                    b'x' => (base, prefix, i) = (16, b'x', i + 1),
                    b'o' => (base, prefix, i) = (8, b'o', i + 1),
                    b'b' => (base, prefix, i) = (2, b'b', i + 1),
                    _ => (base, prefix, seen) = (8, b'0', DIGIT),
                }
            }
            seen |= digits(src, &mut i, base, &mut invalid);
        }

        // fraction; `1..` never steals the dots
        if at(i) == b'.' && at(i + 1) != b'.' {
            float = true;
            ok &= prefix != b'o' && prefix != b'b';
            i += 1;
            seen |= digits(src, &mut i, base, &mut invalid);
        }
        ok &= seen & DIGIT != 0;

        let e = lower_ascii(at(i));
        if e == b'e' || e == b'p' {
            ok &= !(e == b'e' && prefix != 0 && prefix != b'0');
            ok &= !(e == b'p' && prefix != b'x');
            float = true;
            i += 1;
            if matches!(at(i), b'+' | b'-') {
                i += 1;
            }
            let exp = digits(src, &mut i, 10, &mut None);
            ok &= exp & DIGIT != 0;
            seen |= exp;
        } else if prefix == b'x' && float {
            ok = false;
        }

        let imag = at(i) == b'i';
        if imag {
            i += 1;
        }

        if !imag && !float && invalid.is_some() {
            ok = false;
        }
        if seen & SEP != 0 && misplaced_separator(&src[start..i]) {
            ok = false;
        }

        let kind = match (imag, float) {
            (false, false) => NumKind::Int,
            (false, true) => NumKind::Float,
            (true, false) => NumKind::ImagInt,
            (true, true) => NumKind::ImagFloat,
        };

        (i, if ok { Ok(kind) } else { Err(LexErrorKind::InvalidNumber) })
    }

    pub(super) fn lex_number(lex: &mut LogosLexer<'_, RawTok>) -> Result<NumKind, LexErrorKind> {
        let start = lex.span().start;
        let (end, kind) = scan(lex.source().as_bytes(), start);
        let already = lex.span().end;
        if end > already {
            lex.bump(end - already);
        }
        kind
    }
}

fn number_token(kind: NumKind, raw: &str) -> Result<Tok<'_>, LexErrorKind> {
    Ok(match kind {
        NumKind::Int => Tok::Int(raw, IntLit::parse(raw)?),
        NumKind::Float => Tok::Float(raw, FloatLit::parse(raw)?),
        NumKind::ImagFloat => {
            let inner = &raw[..raw.len() - 1];
            Tok::Imag(raw, Number::Float(FloatLit::parse(inner)?))
        }
        NumKind::ImagInt => {
            let inner = &raw[..raw.len() - 1];
            let decimal = inner.bytes().all(|b| b.is_ascii_digit() || b == b'_');
            let lit = if decimal {
                IntLit::parse_decimal(inner)?
            } else {
                IntLit::parse(inner)?
            };
            Tok::Imag(raw, Number::Int(lit))
        }
    })
}

// =============================================================================
// 4. Raw tokens (logos DFA)
// =============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r]+")]
#[rustfmt::skip]
enum RawTok {
    #[token("\u{FEFF}")] Bom,

    #[regex(r"\r?\n")] Newline,
    #[regex(r"//([^\n\r]|\r[^\n])*", allow_greedy = true)] LineComment,
    #[token("/*", lex_block_comment)] BlockComment,

    // Keywords are resolved against the static table.
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")] Word,

    #[regex(r"[0-9]|\.[0-9]", num::lex_number)] Number(NumKind),

    #[regex(r"`[^`]*`")] RawStr,
    #[regex(r#""([^"\\\n\r]|\\.)*""#, esc::validate_string)] Str,
    #[regex(r"'([^'\\\n\r]|\\.)*'", esc::validate_rune)] Rune,

    #[token("...", |_| Punct::Ellipsis)]
    #[token("<<=", |_| Punct::ShlAssign)]
    #[token(">>=", |_| Punct::ShrAssign)]
    #[token("&^=", |_| Punct::AndNotAssign)]
    #[token("+=", |_| Punct::AddAssign)]
    #[token("-=", |_| Punct::SubAssign)]
    #[token("*=", |_| Punct::MulAssign)]
    #[token("/=", |_| Punct::DivAssign)]
    #[token("%=", |_| Punct::ModAssign)]
    #[token("&=", |_| Punct::AndAssign)]
    #[token("|=", |_| Punct::OrAssign)]
    #[token("^=", |_| Punct::XorAssign)]
    #[token("<<", |_| Punct::Shl)]
    #[token(">>", |_| Punct::Shr)]
    #[token("&^", |_| Punct::AndNot)]
    #[token("&&", |_| Punct::LAnd)]
    #[token("||", |_| Punct::LOr)]
    #[token("==", |_| Punct::EqEq)]
    #[token("!=", |_| Punct::NotEq)]
    #[token("<=", |_| Punct::Le)]
    #[token(">=", |_| Punct::Ge)]
    #[token("++", |_| Punct::Inc)]
    #[token("--", |_| Punct::Dec)]
    #[token(":=", |_| Punct::Define)]
    #[token("<-", |_| Punct::Arrow)]
    #[token("=", |_| Punct::Assign)]
    #[token("+", |_| Punct::Plus)]
    #[token("-", |_| Punct::Minus)]
    #[token("*", |_| Punct::Star)]
    #[token("/", |_| Punct::Slash)]
    #[token("%", |_| Punct::Percent)]
    #[token("&", |_| Punct::Amp)]
    #[token("|", |_| Punct::Pipe)]
    #[token("^", |_| Punct::Caret)]
    #[token("~", |_| Punct::Tilde)]
    #[token("!", |_| Punct::Bang)]
    #[token("<", |_| Punct::Lt)]
    #[token(">", |_| Punct::Gt)]
    #[token("(", |_| Punct::LParen)]
    #[token(")", |_| Punct::RParen)]
    #[token("[", |_| Punct::LBrack)]
    #[token("]", |_| Punct::RBrack)]
    #[token("{", |_| Punct::LBrace)]
    #[token("}", |_| Punct::RBrace)]
    #[token(",", |_| Punct::Comma)]
    #[token(";", |_| Punct::Semi)]
    #[token(":", |_| Punct::Colon)]
    #[token(".", |_| Punct::Dot)]
    Op(Punct),

    // Catch-all (lowest priority)
    #[regex(r".", priority = 0)] Unknown,
}

// =============================================================================
// 5. Scanner: semicolon insertion, comments, error policy
// =============================================================================

/// What the scanner does after a lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    /// Yield the first error, then end the stream.
    #[default]
    Strict,
    /// Record the error, skip to the next whitespace and keep going.
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanConfig {
    pub mode: LexMode,
    /// Emit `Tok::Comment` instead of dropping comments.
    pub keep_comments: bool,
}

impl ScanConfig {
    pub fn best_effort(mut self) -> Self {
        self.mode = LexMode::BestEffort;
        self
    }

    pub fn with_comments(mut self) -> Self {
        self.keep_comments = true;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Resync {
    Whitespace,
    LineEnd,
    Eof,
}

enum Step<'src> {
    Skip,
    Emit(Token<'src>),
    Fail(LexErrorKind, Range<usize>, Resync),
}

/// Pull-based Go scanner.
///
/// Yields `Ok(token)` items ending with a single `Tok::Eof`, or `Err` for
/// each lexical error (only the first one in [`LexMode::Strict`]).
#[derive(Clone)]
pub struct Lexer<'src> {
    src: &'src str,
    config: ScanConfig,
    logos: LogosLexer<'src, RawTok>,
    pending: Option<Token<'src>>,
    diags: Vec<Diag>,
    last_can_insert_semi: bool,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::with_config(src, ScanConfig::default())
    }

    pub fn with_config(src: &'src str, config: ScanConfig) -> Self {
        Self {
            src,
            config,
            logos: RawTok::lexer(src),
            pending: None,
            diags: Vec::new(),
            last_can_insert_semi: false,
            done: false,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.src
    }

    #[inline]
    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Rewinds to the start of the source, dropping collected diagnostics.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.src, self.config);
    }

    /// Drains the errors seen so far.
    pub fn take_diags(&mut self) -> Vec<Diag> {
        std::mem::take(&mut self.diags)
    }

    #[inline]
    fn semi_at(pos: usize) -> Token<'src> {
        Token::new(Tok::Punct(Punct::Semi), Span::empty_at(pos))
    }

    #[inline]
    fn emit(&mut self, tok: Tok<'src>, span: Range<usize>) -> Step<'src> {
        self.last_can_insert_semi = tok.ends_statement();
        Step::Emit(Token::new(tok, Span::from_range(span)))
    }

    fn handle_eof(&mut self) -> Token<'src> {
        self.done = true;
        let end = self.src.len();
        let eof = Token::new(Tok::Eof, Span::empty_at(end));
        if std::mem::take(&mut self.last_can_insert_semi) {
            self.pending = Some(eof);
            return Self::semi_at(end);
        }
        eof
    }

    fn handle_raw_token(&mut self, raw: RawTok, span: Range<usize>) -> Step<'src> {
        let slice = self.logos.slice();

        match raw {
            RawTok::Bom if span.start == 0 => Step::Skip,
            RawTok::Bom => Step::Fail(LexErrorKind::MisplacedBom, span, Resync::Whitespace),

            RawTok::Newline => {
                if std::mem::take(&mut self.last_can_insert_semi) {
                    Step::Emit(Self::semi_at(span.start))
                } else {
                    Step::Skip
                }
            }

            RawTok::LineComment if self.config.keep_comments => Step::Emit(Token::new(
                Tok::Comment {
                    text: slice,
                    multiline: false,
                },
                Span::from_range(span),
            )),
            RawTok::LineComment => Step::Skip,

            RawTok::BlockComment => {
                let mut semi = None;
                if self.last_can_insert_semi {
                    if let Some(off) = first_newline_offset(slice) {
                        self.last_can_insert_semi = false;
                        semi = Some(Self::semi_at(span.start + off));
                    }
                }

                if self.config.keep_comments {
                    self.pending = semi;
                    let comment = Tok::Comment {
                        text: slice,
                        multiline: true,
                    };
                    return Step::Emit(Token::new(comment, Span::from_range(span)));
                }
                semi.map_or(Step::Skip, Step::Emit)
            }

            RawTok::Word => {
                let tok = Keyword::lookup(slice).map_or(Tok::Ident(slice), Tok::Keyword);
                self.emit(tok, span)
            }

            RawTok::Number(kind) => match number_token(kind, slice) {
                Ok(tok) => self.emit(tok, span),
                Err(kind) => Step::Fail(kind, span, Resync::Whitespace),
            },

            RawTok::Str | RawTok::RawStr => self.emit(Tok::Str(slice), span),
            RawTok::Rune => self.emit(Tok::Rune(slice), span),
            RawTok::Op(p) => self.emit(Tok::Punct(p), span),

            RawTok::Unknown => match slice.as_bytes().first() {
                Some(b'"') => Step::Fail(LexErrorKind::UnterminatedString, span, Resync::LineEnd),
                Some(b'`') => Step::Fail(LexErrorKind::UnterminatedString, span, Resync::Eof),
                Some(b'\'') => Step::Fail(LexErrorKind::UnterminatedRune, span, Resync::LineEnd),
                _ => Step::Fail(LexErrorKind::InvalidToken, span, Resync::Whitespace),
            },
        }
    }

    fn fail(&mut self, kind: LexErrorKind, span: Range<usize>, resync: Resync) -> LexError {
        let err = LexError {
            kind,
            span: Span::from_range(span),
        };
        tracing::debug!(error = %err, start = err.span.start, "lexical error");
        self.diags.push(err.diag());
        self.last_can_insert_semi = false;

        match self.config.mode {
            LexMode::Strict => self.done = true,
            LexMode::BestEffort => self.resync(resync),
        }
        err
    }

    fn resync(&mut self, to: Resync) {
        let rem = self.logos.remainder().as_bytes();
        let skip = match to {
            Resync::Whitespace => rem
                .iter()
                .position(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')),
            Resync::LineEnd => memchr::memchr(b'\n', rem),
            Resync::Eof => None,
        }
        .unwrap_or(rem.len());

        if skip > 0 {
            tracing::trace!(skip, "scanner resynchronized");
            self.logos.bump(skip);
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.pending.take() {
                return Some(Ok(tok));
            }
            if self.done {
                return None;
            }

            let Some(raw) = self.logos.next() else {
                return Some(Ok(self.handle_eof()));
            };
            let span = self.logos.span();

            let step = match raw {
                Ok(raw) => self.handle_raw_token(raw, span),
                Err(kind) => Step::Fail(kind, span, Resync::Whitespace),
            };

            match step {
                Step::Skip => continue,
                Step::Emit(tok) => return Some(Ok(tok)),
                Step::Fail(kind, span, resync) => return Some(Err(self.fail(kind, span, resync))),
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Scanner over `src` with the default (strict, comment-free) configuration.
#[inline]
pub fn scan(src: &str) -> Lexer<'_> {
    Lexer::new(src)
}

/// Scans `src` to completion, failing on the first lexical error.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    scan(src).collect()
}
