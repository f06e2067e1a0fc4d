// crates/parser/tests/lexer_semis.rs
use goop_parser::{Lexer, ScanConfig, Tok, Token};

fn lex_all(input: &str, config: ScanConfig) -> Vec<Token<'_>> {
    Lexer::with_config(input, config)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("lex error {e} in {input:?}"))
}

/// Offsets of the semicolons inserted by the scanner.
fn injected_semis(input: &str) -> Vec<u32> {
    lex_all(input, ScanConfig::default())
        .iter()
        .filter(|t| t.is_implicit_semi())
        .map(|t| t.span.start)
        .collect()
}

/// Go scanner test spelling: literals by class, everything else as written.
fn tok_name(t: &Tok<'_>) -> &'static str {
    match t {
        Tok::Ident(_) => "IDENT",
        Tok::Int(..) => "INT",
        Tok::Float(..) => "FLOAT",
        Tok::Imag(..) => "IMAG",
        Tok::Rune(_) => "CHAR",
        Tok::Str(_) => "STRING",
        Tok::Comment { .. } => "COMMENT",
        Tok::Keyword(k) => k.as_str(),
        Tok::Punct(p) => p.as_str(),
        Tok::Eof => "EOF",
    }
}

fn lex_names(input: &str) -> String {
    lex_all(input, ScanConfig::default().with_comments())
        .iter()
        .map(|t| tok_name(&t.tok))
        .filter(|&n| n != "EOF")
        .collect::<Vec<_>>()
        .join(" ")
}

fn check_semi_case(input: &str, want: &str) {
    let got = lex_names(input);
    assert_eq!(got, want, "input=<<{input}>>");
}

struct SemiCase {
    input: &'static str,
    want: &'static str,
}

#[rustfmt::skip]
const SEMICOLON_TESTS: &[SemiCase] = &[
    SemiCase { input: "", want: "" },
    SemiCase { input: "\u{FEFF};", want: ";" },
    SemiCase { input: ";", want: ";" },

    SemiCase { input: "foo\n", want: "IDENT ;" },
    SemiCase { input: "123\n", want: "INT ;" },
    SemiCase { input: "1.2\n", want: "FLOAT ;" },
    SemiCase { input: "1i\n", want: "IMAG ;" },
    SemiCase { input: "'x'\n", want: "CHAR ;" },
    SemiCase { input: "\"x\"\n", want: "STRING ;" },
    SemiCase { input: "`x`\n", want: "STRING ;" },

    SemiCase { input: "+\n", want: "+" },
    SemiCase { input: "-\n", want: "-" },
    SemiCase { input: "*\n", want: "*" },
    SemiCase { input: "/\n", want: "/" },
    SemiCase { input: "%\n", want: "%" },

    SemiCase { input: "&\n", want: "&" },
    SemiCase { input: "|\n", want: "|" },
    SemiCase { input: "^\n", want: "^" },
    SemiCase { input: "<<\n", want: "<<" },
    SemiCase { input: ">>\n", want: ">>" },
    SemiCase { input: "&^\n", want: "&^" },

    SemiCase { input: "+=\n", want: "+=" },
    SemiCase { input: "-=\n", want: "-=" },
    SemiCase { input: "*=\n", want: "*=" },
    SemiCase { input: "/=\n", want: "/=" },
    SemiCase { input: "%=\n", want: "%=" },

    SemiCase { input: "&=\n", want: "&=" },
    SemiCase { input: "|=\n", want: "|=" },
    SemiCase { input: "^=\n", want: "^=" },
    SemiCase { input: "<<=\n", want: "<<=" },
    SemiCase { input: ">>=\n", want: ">>=" },
    SemiCase { input: "&^=\n", want: "&^=" },

    SemiCase { input: "&&\n", want: "&&" },
    SemiCase { input: "||\n", want: "||" },
    SemiCase { input: "<-\n", want: "<-" },
    SemiCase { input: "++\n", want: "++ ;" },
    SemiCase { input: "--\n", want: "-- ;" },

    SemiCase { input: "==\n", want: "==" },
    SemiCase { input: "<\n", want: "<" },
    SemiCase { input: ">\n", want: ">" },
    SemiCase { input: "=\n", want: "=" },
    SemiCase { input: "!\n", want: "!" },
    SemiCase { input: "~\n", want: "~" },

    SemiCase { input: "!=\n", want: "!=" },
    SemiCase { input: "<=\n", want: "<=" },
    SemiCase { input: ">=\n", want: ">=" },
    SemiCase { input: ":=\n", want: ":=" },
    SemiCase { input: "...\n", want: "..." },

    SemiCase { input: "(\n", want: "(" },
    SemiCase { input: "[\n", want: "[" },
    SemiCase { input: "{\n", want: "{" },
    SemiCase { input: ",\n", want: "," },
    SemiCase { input: ".\n", want: "." },

    SemiCase { input: ")\n", want: ") ;" },
    SemiCase { input: "]\n", want: "] ;" },
    SemiCase { input: "}\n", want: "} ;" },
    SemiCase { input: ";\n", want: ";" },
    SemiCase { input: ":\n", want: ":" },

    SemiCase { input: "break\n", want: "break ;" },
    SemiCase { input: "case\n", want: "case" },
    SemiCase { input: "chan\n", want: "chan" },
    SemiCase { input: "const\n", want: "const" },
    SemiCase { input: "continue\n", want: "continue ;" },

    SemiCase { input: "default\n", want: "default" },
    SemiCase { input: "defer\n", want: "defer" },
    SemiCase { input: "else\n", want: "else" },
    SemiCase { input: "fallthrough\n", want: "fallthrough ;" },
    SemiCase { input: "for\n", want: "for" },

    SemiCase { input: "func\n", want: "func" },
    SemiCase { input: "go\n", want: "go" },
    SemiCase { input: "goto\n", want: "goto" },
    SemiCase { input: "if\n", want: "if" },
    SemiCase { input: "import\n", want: "import" },

    SemiCase { input: "interface\n", want: "interface" },
    SemiCase { input: "map\n", want: "map" },
    SemiCase { input: "package\n", want: "package" },
    SemiCase { input: "range\n", want: "range" },
    SemiCase { input: "return\n", want: "return ;" },

    SemiCase { input: "select\n", want: "select" },
    SemiCase { input: "struct\n", want: "struct" },
    SemiCase { input: "switch\n", want: "switch" },
    SemiCase { input: "type\n", want: "type" },
    SemiCase { input: "var\n", want: "var" },

    SemiCase { input: "foo//comment\n", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo//comment", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo/*comment*/\n", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo/*\n*/", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo/*comment*/    \n", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo/*\n*/    ", want: "IDENT COMMENT ;" },

    SemiCase { input: "foo    // comment\n", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo    // comment", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo    /*comment*/\n", want: "IDENT COMMENT ;" },
    SemiCase { input: "foo    /*\n*/", want: "IDENT COMMENT ;" },

    SemiCase {
        input: "package main\n\nfunc main() {\n\tif {\n\t\treturn /* */ }\n}\n",
        want: "package IDENT ; func IDENT ( ) { if { return COMMENT } ; } ;",
    },
    SemiCase { input: "package main", want: "package IDENT ;" },
];

#[test]
fn semicolon_table() {
    for t in SEMICOLON_TESTS {
        check_semi_case(t.input, t.want);

        // Trailing newlines never change the result.
        let mut trimmed = t.input;
        while let Some(rest) = trimmed.strip_suffix('\n') {
            trimmed = rest;
            check_semi_case(trimmed, t.want);
        }
    }
}

#[test]
fn package_clause_gets_semicolon() {
    let toks = lex_all("package main\n", ScanConfig::default());
    let kinds: Vec<_> = toks.iter().map(|t| &t.tok).collect();
    assert_eq!(
        kinds,
        [
            &Tok::Keyword(goop_parser::Keyword::Package),
            &Tok::Ident("main"),
            &Tok::Punct(goop_parser::Punct::Semi),
            &Tok::Eof,
        ]
    );
    assert!(toks[2].is_implicit_semi());
    assert_eq!(toks[2].span.start, 12);
}

#[test]
fn many_semis_mixed() {
    let src = r#"
package p
func f() {
    x := 1
    x++
    if x > 0 {
        return
    } else {
        x--
    }
}
"#;
    // package p, x := 1, x++, return, x--, and the two closing braces
    assert_eq!(injected_semis(src).len(), 7);
}

#[test]
fn comment_newline_equivalence() {
    let a = injected_semis("x/*\n*/y");
    let b = injected_semis("x\ny");
    assert_eq!(a.len(), b.len());
}

#[test]
fn semicolon_insertion_basic_newline() {
    assert_eq!(injected_semis("x\ny"), vec![1, 3]);
}

#[test]
fn semicolon_insertion_after_return() {
    assert_eq!(injected_semis("return\nx"), vec![6, 8]);
}

#[test]
fn semicolon_insertion_not_after_if() {
    assert_eq!(injected_semis("if\nx"), vec![4]);
}

#[test]
fn semicolon_insertion_eof() {
    assert_eq!(injected_semis("x"), vec![1]);
    assert_eq!(injected_semis("x+"), Vec::<u32>::new());
}

#[test]
fn semicolon_after_closing_brackets() {
    assert_eq!(injected_semis("(x)\ny"), vec![3, 5]);
    assert_eq!(injected_semis("a[0]\ny"), vec![4, 6]);
    assert_eq!(injected_semis("{ }\ny"), vec![3, 5]);
}

#[test]
fn semicolon_insertion_windows_newline_crlf() {
    assert_eq!(injected_semis("x\r\ny"), vec![1, 4]);
}

#[test]
fn lone_carriage_return_is_whitespace() {
    assert_eq!(injected_semis("x\ry\n"), vec![3]);
    assert_eq!(injected_semis("x\r\ry"), vec![4]);
}

#[test]
fn block_comment_without_newline_is_space() {
    assert_eq!(injected_semis("x/*c*/\ny"), vec![6, 8]);
}

#[test]
fn block_comment_with_newline_inserts_at_first_newline() {
    assert_eq!(injected_semis("x/*\n*/y"), vec![3, 7]);
    assert_eq!(injected_semis("x/*\r\n*/y"), vec![3, 8]);
    assert_eq!(injected_semis("x/*\r*/y"), vec![7]);
}

#[test]
fn block_comment_newline_does_not_insert_after_if() {
    assert_eq!(injected_semis("if/*\n*/x"), vec![8]);
}

#[test]
fn line_comment_at_eof_ok() {
    let src = "x//c";
    assert_eq!(injected_semis(src), vec![src.len() as u32]);
}

#[test]
fn line_comment_before_crlf() {
    let src = "x//c\r\ny";
    let cr = src.find('\r').expect("cr") as u32;
    assert_eq!(injected_semis(src), vec![cr, src.len() as u32]);
}

#[test]
fn line_comment_runs_through_lone_carriage_return() {
    let src = "x//c\ry";
    assert_eq!(injected_semis(src), vec![src.len() as u32]);
}

#[test]
fn semicolon_insertion_after_branch_keywords() {
    assert_eq!(injected_semis("break\nx"), vec![5, 7]);
    assert_eq!(injected_semis("continue\nx"), vec![8, 10]);
    assert_eq!(injected_semis("fallthrough\nx"), vec![11, 13]);
}

#[test]
fn semicolon_insertion_after_inc_dec() {
    assert_eq!(injected_semis("x++\ny"), vec![3, 5]);
    assert_eq!(injected_semis("x--\ny"), vec![3, 5]);
}

#[test]
fn semicolon_insertion_after_imag_literal() {
    assert_eq!(injected_semis("1i\nx"), vec![2, 4]);
}

#[test]
fn comment_token_precedes_the_semicolon_it_triggers() {
    let toks = lex_all("x /* a\nb */ y", ScanConfig::default().with_comments());
    let names: Vec<_> = toks.iter().map(|t| tok_name(&t.tok)).collect();
    assert_eq!(names, ["IDENT", "COMMENT", ";", "IDENT", ";", "EOF"]);
    assert!(matches!(toks[1].tok, Tok::Comment { multiline: true, .. }));
    assert_eq!(toks[2].span.start, 6);
}
