//! Token vocabulary shared by the scanner, the parser and the dump renderer.
//!
//! Keyword and punctuation spellings live in static tables; literal payloads
//! (`IntLit`, `FloatLit`, `Number`) are reused verbatim by the AST.

use crate::error::{LexErrorKind, Span};
use num_bigint::BigUint;
use num_traits::Num;
use std::fmt;

macro_rules! spelled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $text:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name { $($variant),* }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            #[inline]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),*
                }
            }

            pub fn lookup(s: &str) -> Option<Self> {
                match s {
                    $($text => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

spelled_enum! {
    /// The 25 reserved words of Go.
    pub enum Keyword {
        Break => "break",
        Case => "case",
        Chan => "chan",
        Const => "const",
        Continue => "continue",
        Default => "default",
        Defer => "defer",
        Else => "else",
        Fallthrough => "fallthrough",
        For => "for",
        Func => "func",
        Go => "go",
        Goto => "goto",
        If => "if",
        Import => "import",
        Interface => "interface",
        Map => "map",
        Package => "package",
        Range => "range",
        Return => "return",
        Select => "select",
        Struct => "struct",
        Switch => "switch",
        Type => "type",
        Var => "var",
    }
}

spelled_enum! {
    /// Operators and delimiters.
    pub enum Punct {
        Ellipsis => "...",
        ShlAssign => "<<=",
        ShrAssign => ">>=",
        AndNotAssign => "&^=",
        AddAssign => "+=",
        SubAssign => "-=",
        MulAssign => "*=",
        DivAssign => "/=",
        ModAssign => "%=",
        AndAssign => "&=",
        OrAssign => "|=",
        XorAssign => "^=",
        Shl => "<<",
        Shr => ">>",
        AndNot => "&^",
        LAnd => "&&",
        LOr => "||",
        EqEq => "==",
        NotEq => "!=",
        Le => "<=",
        Ge => ">=",
        Inc => "++",
        Dec => "--",
        Define => ":=",
        Arrow => "<-",
        Assign => "=",
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        Amp => "&",
        Pipe => "|",
        Caret => "^",
        Tilde => "~",
        Bang => "!",
        Lt => "<",
        Gt => ">",
        LParen => "(",
        RParen => ")",
        LBrack => "[",
        RBrack => "]",
        LBrace => "{",
        RBrace => "}",
        Comma => ",",
        Semi => ";",
        Colon => ":",
        Dot => ".",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary = 2,
    Octal = 8,
    Decimal = 10,
    Hex = 16,
}

impl Radix {
    #[inline]
    pub const fn value(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Splits a validated numeric literal into its radix and the digits after the
/// prefix. A lone `0` is decimal; any other leading `0` without a letter
/// prefix is legacy octal.
fn split_radix(raw: &str) -> (Radix, &str) {
    let b = raw.as_bytes();
    if b.len() >= 2 && b[0] == b'0' {
        match b[1] | 0x20 {
            b'x' => return (Radix::Hex, &raw[2..]),
            b'o' => return (Radix::Octal, &raw[2..]),
            b'b' => return (Radix::Binary, &raw[2..]),
            _ => {}
        }
        if b[1].is_ascii_digit() || b[1] == b'_' {
            return (Radix::Octal, &raw[1..]);
        }
    }
    (Radix::Decimal, raw)
}

fn strip_underscores(s: &str) -> String {
    s.chars().filter(|&c| c != '_').collect()
}

/// Integer literal payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntLit {
    pub value: BigUint,
    pub radix: Radix,
}

impl IntLit {
    /// Builds the payload from raw literal text already accepted by the
    /// number DFA.
    pub fn parse(raw: &str) -> Result<Self, LexErrorKind> {
        let (radix, digits) = split_radix(raw);
        let digits = strip_underscores(digits);
        let value = BigUint::from_str_radix(&digits, radix.value())
            .map_err(|_| LexErrorKind::InvalidNumber)?;
        Ok(Self { value, radix })
    }

    /// Imaginary literals such as `0123i` are decimal regardless of the
    /// leading zero.
    pub fn parse_decimal(raw: &str) -> Result<Self, LexErrorKind> {
        let digits = strip_underscores(raw);
        let value =
            BigUint::from_str_radix(&digits, 10).map_err(|_| LexErrorKind::InvalidNumber)?;
        Ok(Self {
            value,
            radix: Radix::Decimal,
        })
    }
}

/// Floating-point literal payload. Digits are kept as text (underscores
/// removed) so no precision is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloatLit {
    pub mantissa: Box<str>,
    pub exponent: Box<str>,
    pub radix: Radix,
    pub negative_exponent: bool,
}

impl FloatLit {
    pub fn parse(raw: &str) -> Result<Self, LexErrorKind> {
        let is_hex = raw.len() >= 2 && raw.as_bytes()[0] == b'0' && (raw.as_bytes()[1] | 0x20) == b'x';
        let (radix, body, marker) = if is_hex {
            (Radix::Hex, &raw[2..], b'p')
        } else {
            (Radix::Decimal, raw, b'e')
        };

        let exp_at = body.bytes().position(|b| (b | 0x20) == marker);
        let (mantissa, exp) = match exp_at {
            Some(i) => (&body[..i], &body[i + 1..]),
            None => (body, ""),
        };
        if mantissa.is_empty() || mantissa == "." {
            return Err(LexErrorKind::InvalidNumber);
        }

        let negative_exponent = exp.starts_with('-');
        let exp = exp.trim_start_matches(['+', '-']);

        Ok(Self {
            mantissa: strip_underscores(mantissa).into_boxed_str(),
            exponent: strip_underscores(exp).into_boxed_str(),
            radix,
            negative_exponent,
        })
    }
}

/// Numeric payload of an imaginary literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    Int(IntLit),
    Float(FloatLit),
}

/// Token payload.
///
/// Text-bearing variants borrow from the scanned source. Literal text is the
/// exact source slice; string and rune literals keep their delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tok<'src> {
    Keyword(Keyword),
    Ident(&'src str),
    Punct(Punct),
    Int(&'src str, IntLit),
    Float(&'src str, FloatLit),
    Imag(&'src str, Number),
    Rune(&'src str),
    Str(&'src str),
    Comment { text: &'src str, multiline: bool },
    Eof,
}

impl Tok<'_> {
    #[inline]
    pub fn is_punct(&self, p: Punct) -> bool {
        matches!(self, Tok::Punct(q) if *q == p)
    }

    #[inline]
    pub fn is_keyword(&self, k: Keyword) -> bool {
        matches!(self, Tok::Keyword(q) if *q == k)
    }

    /// True for tokens after which a newline synthesizes a `;`.
    pub fn ends_statement(&self) -> bool {
        match self {
            Tok::Ident(_)
            | Tok::Int(..)
            | Tok::Float(..)
            | Tok::Imag(..)
            | Tok::Rune(_)
            | Tok::Str(_) => true,
            Tok::Keyword(k) => matches!(
                k,
                Keyword::Break | Keyword::Continue | Keyword::Fallthrough | Keyword::Return
            ),
            Tok::Punct(p) => matches!(
                p,
                Punct::RParen | Punct::RBrack | Punct::RBrace | Punct::Inc | Punct::Dec
            ),
            Tok::Comment { .. } | Tok::Eof => false,
        }
    }

    /// Short human description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            Tok::Keyword(k) => format!("keyword `{k}`"),
            Tok::Ident(name) => format!("identifier `{name}`"),
            Tok::Punct(p) => format!("`{p}`"),
            Tok::Int(raw, _) | Tok::Float(raw, _) | Tok::Imag(raw, _) => format!("literal {raw}"),
            Tok::Rune(raw) | Tok::Str(raw) => format!("literal {raw}"),
            Tok::Comment { .. } => "comment".to_string(),
            Tok::Eof => "end of file".to_string(),
        }
    }
}

impl fmt::Display for Tok<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Keyword(k) => f.write_str(k.as_str()),
            Tok::Punct(p) => f.write_str(p.as_str()),
            Tok::Ident(s) | Tok::Rune(s) | Tok::Str(s) => f.write_str(s),
            Tok::Int(raw, _) | Tok::Float(raw, _) | Tok::Imag(raw, _) => f.write_str(raw),
            Tok::Comment { text, .. } => f.write_str(text),
            Tok::Eof => f.write_str("EOF"),
        }
    }
}

/// A token and the byte span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub tok: Tok<'src>,
    pub span: Span,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(tok: Tok<'src>, span: Span) -> Self {
        Self { tok, span }
    }

    /// A `;` synthesized by semicolon insertion (it covers no source bytes).
    #[inline]
    pub fn is_implicit_semi(&self) -> bool {
        self.tok.is_punct(Punct::Semi) && self.span.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_roundtrip() {
        assert_eq!(Keyword::ALL.len(), 25);
        for &k in Keyword::ALL {
            assert_eq!(Keyword::lookup(k.as_str()), Some(k));
        }
        for &p in Punct::ALL {
            assert_eq!(Punct::lookup(p.as_str()), Some(p));
        }
        assert_eq!(Punct::lookup("&^="), Some(Punct::AndNotAssign));
        assert_eq!(Keyword::lookup("main"), None);
    }

    #[test]
    fn int_radix_detection() {
        let cases = [
            ("10", 10u32, Radix::Decimal),
            ("0", 0, Radix::Decimal),
            ("0x1F", 31, Radix::Hex),
            ("0X_ff", 255, Radix::Hex),
            ("0o17", 15, Radix::Octal),
            ("017", 15, Radix::Octal),
            ("0_7", 7, Radix::Octal),
            ("0b101", 5, Radix::Binary),
            ("1_000", 1000, Radix::Decimal),
        ];
        for (raw, value, radix) in cases {
            let lit = IntLit::parse(raw).unwrap();
            assert_eq!(lit.value, BigUint::from(value), "{raw}");
            assert_eq!(lit.radix, radix, "{raw}");
        }
    }

    #[test]
    fn int_beyond_u64() {
        let lit = IntLit::parse("0xffffffffffffffffffff").unwrap();
        assert_eq!(lit.value.to_str_radix(16), "ffffffffffffffffffff");
    }

    #[test]
    fn float_parts() {
        let f = FloatLit::parse("1.5e-3").unwrap();
        assert_eq!(&*f.mantissa, "1.5");
        assert_eq!(&*f.exponent, "3");
        assert!(f.negative_exponent);
        assert_eq!(f.radix, Radix::Decimal);

        let f = FloatLit::parse("0x1.8p+2").unwrap();
        assert_eq!(&*f.mantissa, "1.8");
        assert_eq!(&*f.exponent, "2");
        assert!(!f.negative_exponent);
        assert_eq!(f.radix, Radix::Hex);

        let f = FloatLit::parse(".25").unwrap();
        assert_eq!(&*f.mantissa, ".25");
        assert_eq!(&*f.exponent, "");
    }

    #[test]
    fn statement_enders() {
        assert!(Tok::Ident("x").ends_statement());
        assert!(Tok::Punct(Punct::Inc).ends_statement());
        assert!(Tok::Keyword(Keyword::Return).ends_statement());
        assert!(!Tok::Punct(Punct::LBrace).ends_statement());
        assert!(!Tok::Punct(Punct::Plus).ends_statement());
        assert!(!Tok::Keyword(Keyword::If).ends_statement());
    }
}
