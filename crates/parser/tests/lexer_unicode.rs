// crates/parser/tests/lexer_unicode.rs
use goop_parser::{LexErrorKind, Lexer, Tok, tokenize};

fn assert_error_at_char(input: &str, ch: char, kind: LexErrorKind) {
    let err = Lexer::new(input)
        .find_map(Result::err)
        .unwrap_or_else(|| panic!("no error in {input:?}"));

    let at = input
        .find(ch)
        .unwrap_or_else(|| panic!("input does not contain U+{:04X}", ch as u32));
    assert_eq!(err.kind, kind, "input={input:?}");
    assert_eq!(
        err.span.range(),
        at..at + ch.len_utf8(),
        "U+{:04X} in {input:?}",
        ch as u32
    );
}

#[test]
fn unicode_letters_start_identifiers() {
    let toks = tokenize("αβγ _x1 日本語").expect("tokens");
    assert_eq!(toks[0].tok, Tok::Ident("αβγ"));
    assert_eq!(toks[1].tok, Tok::Ident("_x1"));
    assert_eq!(toks[2].tok, Tok::Ident("日本語"));
    assert_eq!(toks[2].span.range(), 11..20);
}

#[test]
fn unicode_decimal_digits_allowed_after_start() {
    let toks = tokenize("x\u{0661}\u{0662}").expect("tokens");
    assert_eq!(toks[0].tok, Tok::Ident("x\u{0661}\u{0662}"));
}

#[test]
fn bom_after_start_is_an_error_at_the_bom() {
    assert_error_at_char("π\u{FEFF}σ", '\u{FEFF}', LexErrorKind::MisplacedBom);
}

#[test]
fn illegal_characters_are_reported_where_they_are() {
    for ch in [
        '\u{2003}', // em space
        '\u{200D}', // zero width joiner
        '\u{203F}', // undertie, connector punctuation
        '\u{00B2}', // superscript two
        '\u{0301}', // combining acute accent
        '@',
        '#',
        '?',
    ] {
        let src = format!("x{ch}y");
        assert_error_at_char(&src, ch, LexErrorKind::InvalidToken);
    }
}

#[test]
fn identifier_cannot_start_with_a_unicode_digit() {
    let err = Lexer::new("\u{0661}x")
        .next()
        .expect("item")
        .expect_err("leading digit");
    assert_eq!(err.kind, LexErrorKind::InvalidToken);
    assert_eq!(err.span.range(), 0..2);
}

#[test]
fn non_ascii_inside_comments_and_strings_is_fine() {
    let toks = tokenize("s := \"ñ\" // ☃\n/* 🎉 */ r := '世'").expect("tokens");
    let lits: Vec<_> = toks
        .iter()
        .filter_map(|t| match t.tok {
            Tok::Str(s) | Tok::Rune(s) => Some(s),
            _ => None,
        })
        .collect();
    assert_eq!(lits, ["\"ñ\"", "'世'"]);
}
