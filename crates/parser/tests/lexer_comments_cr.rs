// crates/parser/tests/lexer_comments_cr.rs
use goop_parser::{Diag, Keyword, LexErrorKind, Lexer, Punct, ScanConfig, Tok, Token};

fn lex_all(input: &str) -> (Vec<Token<'_>>, Vec<Diag>) {
    let mut lx = Lexer::new(input);
    let toks: Vec<_> = lx.by_ref().filter_map(Result::ok).collect();
    let diags = lx.take_diags();
    (toks, diags)
}

/// Token kinds without the trailing EOF and the `;` synthesized right before it.
fn kinds_before_eof(toks: &[Token<'_>], input: &str) -> Vec<&'static str> {
    toks.iter()
        .filter(|t| t.tok != Tok::Eof)
        .filter(|t| !(t.is_implicit_semi() && t.span.start as usize == input.len()))
        .map(|t| match &t.tok {
            Tok::Ident(_) => "Ident",
            Tok::Keyword(Keyword::If) => "KwIf",
            Tok::Keyword(Keyword::Return) => "KwReturn",
            Tok::Punct(Punct::Semi) => "Semi",
            Tok::Comment { .. } => "Comment",
            _ => "Other",
        })
        .collect()
}

#[test]
fn block_comment_with_cr_does_not_error() {
    let (_toks, diags) = lex_all("/*\r*/");
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn block_comment_with_crlf_does_not_error() {
    let (_toks, diags) = lex_all("/*\r\n*/");
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn block_comment_unterminated_is_error() {
    let mut lx = Lexer::new("/*\r");
    let err = lx.next().expect("item").expect_err("unterminated");
    assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    assert_eq!(err.span.start, 0);
    assert_eq!(lx.take_diags().len(), 1);
}

#[test]
fn semicolon_is_inserted_at_newline_inside_block_comment() {
    for src in ["foo/*\n*/bar", "foo/*\r\n*/bar"] {
        let (toks, diags) = lex_all(src);
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(kinds_before_eof(&toks, src), ["Ident", "Semi", "Ident"], "src={src:?}");
        assert_eq!(toks[1].span.start, 5, "src={src:?}");
    }
}

#[test]
fn lone_carriage_return_in_block_comment_is_not_a_newline() {
    for src in ["foo/*\r*/bar", "foo/*a\rb*/bar"] {
        let (toks, diags) = lex_all(src);
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(kinds_before_eof(&toks, src), ["Ident", "Ident"], "src={src:?}");
    }
}

#[test]
fn no_semicolon_insertion_if_prev_token_cannot_insert() {
    let src = "if/*\n*/x";
    let (toks, diags) = lex_all(src);
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(kinds_before_eof(&toks, src), ["KwIf", "Ident"]);
}

#[test]
fn line_comment_crlf_triggers_semicolon() {
    let src = "foo//c\r\nbar";
    let (toks, diags) = lex_all(src);
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(kinds_before_eof(&toks, src), ["Ident", "Semi", "Ident"]);
}

#[test]
fn kept_comments_keep_their_exact_text() {
    let src = "return /* a\r\nb */\n// tail\r\n";
    let toks: Vec<_> = Lexer::with_config(src, ScanConfig::default().with_comments())
        .collect::<Result<_, _>>()
        .expect("tokens");
    assert_eq!(
        kinds_before_eof(&toks, src),
        ["KwReturn", "Comment", "Semi", "Comment"]
    );
    assert_eq!(
        toks[1].tok,
        Tok::Comment {
            text: "/* a\r\nb */",
            multiline: true
        }
    );
    assert_eq!(
        toks[3].tok,
        Tok::Comment {
            text: "// tail",
            multiline: false
        }
    );
}

#[test]
fn carriage_returns_inside_comments_do_not_end_them_early() {
    for src in [
        "/**\r/*/x",
        "/**\r\r/*/x",
        "/*\r/*/x",
        "/*\r*/x",
        "/*\r\r\r\r*/x",
    ] {
        let (toks, diags) = lex_all(src);
        assert!(diags.is_empty(), "src={src:?} diags={diags:?}");
        let real: Vec<_> = toks
            .iter()
            .filter(|t| !t.is_implicit_semi() && t.tok != Tok::Eof)
            .collect();
        assert_eq!(real.len(), 1, "src={src:?} toks={toks:?}");
        assert_eq!(real[0].tok, Tok::Ident("x"), "src={src:?}");
    }
}
