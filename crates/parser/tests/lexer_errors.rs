// crates/parser/tests/lexer_errors.rs
//
// Rows follow go/scanner's TestScanErrors table.
use goop_parser::{LexErrorKind, Lexer, Punct, Tok};

use LexErrorKind::*;

enum Expect {
    Kinds(&'static [&'static str]),
    Error(LexErrorKind),
}

struct Row {
    src: &'static str,
    expect: Expect,
}

const fn ok(src: &'static str, kinds: &'static [&'static str]) -> Row {
    Row {
        src,
        expect: Expect::Kinds(kinds),
    }
}

const fn err(src: &'static str, kind: LexErrorKind) -> Row {
    Row {
        src,
        expect: Expect::Error(kind),
    }
}

fn kind_name(t: &Tok<'_>) -> &'static str {
    match t {
        Tok::Ident(_) => "Ident",
        Tok::Int(..) => "Int",
        Tok::Float(..) => "Float",
        Tok::Imag(..) => "Imag",
        Tok::Rune(_) => "Rune",
        Tok::Str(_) => "Str",
        Tok::Punct(Punct::Dot) => "Dot",
        _ => "Other",
    }
}

#[rustfmt::skip]
const ROWS: &[Row] = &[
    err("\u{0007}", InvalidToken),
    err("#", InvalidToken),
    err("…", InvalidToken),
    ok("..", &["Dot", "Dot"]),

    ok("' '", &["Rune"]),
    err("''", InvalidRune),
    err("'12'", InvalidRune),
    err("'123'", InvalidRune),
    err(r"'\0'", InvalidEscape),
    err(r"'\07'", InvalidEscape),
    err(r"'\8'", InvalidEscape),
    err(r"'\08'", InvalidEscape),
    err(r"'\x'", InvalidEscape),
    err(r"'\x0'", InvalidEscape),
    err(r"'\x0g'", InvalidEscape),
    err(r"'\u'", InvalidEscape),
    err(r"'\u0'", InvalidEscape),
    err(r"'\u00'", InvalidEscape),
    err(r"'\u000'", InvalidEscape),
    err(r"'\u000", UnterminatedRune),
    ok(r"'\u0000'", &["Rune"]),
    err(r"'\U'", InvalidEscape),
    err(r"'\U0'", InvalidEscape),
    err(r"'\U00'", InvalidEscape),
    err(r"'\U000'", InvalidEscape),
    err(r"'\U0000'", InvalidEscape),
    err(r"'\U00000'", InvalidEscape),
    err(r"'\U000000'", InvalidEscape),
    err(r"'\U0000000'", InvalidEscape),
    err(r"'\U0000000", UnterminatedRune),
    ok(r"'\U00000000'", &["Rune"]),
    err(r"'\Uffffffff'", InvalidEscape),
    err("'", UnterminatedRune),
    err(r"'\", UnterminatedRune),
    err("'\n", UnterminatedRune),
    err("'\n   ", UnterminatedRune),

    ok(r#""""#, &["Str"]),
    err(r#""abc"#, UnterminatedString),
    err("\"abc\n", UnterminatedString),
    err("\"abc\n   ", UnterminatedString),
    ok("``", &["Str"]),
    err("`", UnterminatedString),
    ok("\"\\U0000FFFFF\"", &["Str"]),

    ok("/**/", &[]),
    err("/*", UnterminatedComment),

    ok("077", &["Int"]),
    ok("078.", &["Float"]),
    ok("07801234567.", &["Float"]),
    ok("078e0", &["Float"]),
    err("0E", InvalidNumber),
    err("078", InvalidNumber),
    err("07090000008", InvalidNumber),
    err("0x", InvalidNumber),

    err("\u{FEFF}\u{FEFF}", MisplacedBom),
    err("abc\u{0000}def", InvalidToken),
    err("abc\u{0000}", InvalidToken),
    err("“abc”", InvalidToken),
];

#[test]
fn scan_error_table() {
    for row in ROWS {
        let mut lx = Lexer::new(row.src);
        let items: Vec<_> = lx.by_ref().collect();
        match row.expect {
            Expect::Kinds(want) => {
                let toks = items
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap_or_else(|e| panic!("src={:?}: {e}", row.src));
                let got: Vec<_> = toks
                    .iter()
                    .filter(|t| !t.is_implicit_semi() && t.tok != Tok::Eof)
                    .map(|t| kind_name(&t.tok))
                    .collect();
                assert_eq!(got, want, "src={:?}", row.src);
            }
            Expect::Error(kind) => {
                let errors: Vec<_> = items.iter().filter_map(|r| r.as_ref().err()).collect();
                assert_eq!(errors.len(), 1, "src={:?} items={items:?}", row.src);
                assert_eq!(errors[0].kind, kind, "src={:?}", row.src);
                assert!(items.last().is_some_and(Result::is_err), "src={:?}", row.src);
                assert_eq!(lx.take_diags().len(), 1, "src={:?}", row.src);
            }
        }
    }
}

#[test]
fn error_spans_cover_the_offending_text() {
    let cases: &[(&str, std::ops::Range<usize>)] = &[
        ("x #", 2..3),
        ("'ab'", 0..4),
        ("a := 078", 5..8),
        ("\u{FEFF}\u{FEFF}", 3..6),
        ("x /* open", 2..9),
        ("'", 0..1),
    ];
    for (src, want) in cases {
        let err = Lexer::new(src)
            .find_map(Result::err)
            .unwrap_or_else(|| panic!("no error in {src:?}"));
        assert_eq!(&err.span.range(), want, "src={src:?}");
    }
}

#[test]
fn diagnostics_render_with_line_and_column() {
    let src = "package p\n\nvar s = \"open\n";
    let mut lx = Lexer::new(src);
    let err = lx.find_map(Result::err).expect("error");
    let index = goop_parser::LineIndex::new(src);
    assert_eq!(
        err.diag().render(src, &index),
        "3:9: unterminated string literal"
    );
}
