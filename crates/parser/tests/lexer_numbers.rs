// crates/parser/tests/lexer_numbers.rs
use goop_parser::token::{FloatLit, IntLit, Number, Radix};
use goop_parser::{LexErrorKind, Lexer, Punct, Tok, tokenize};
use num_bigint::BigUint;

fn lex1(input: &str) -> Result<Tok<'_>, LexErrorKind> {
    match Lexer::new(input).next() {
        Some(Ok(t)) => Ok(t.tok),
        Some(Err(e)) => Err(e.kind),
        None => panic!("no token for {input:?}"),
    }
}

fn lex2(input: &str) -> (Tok<'_>, Tok<'_>) {
    let toks = tokenize(input).unwrap_or_else(|e| panic!("{input:?}: {e}"));
    (toks[0].tok.clone(), toks[1].tok.clone())
}

fn kinds(input: &str) -> Vec<&'static str> {
    tokenize(input)
        .unwrap_or_else(|e| panic!("{input:?}: {e}"))
        .iter()
        .map(|t| match t.tok {
            Tok::Ident(_) => "Ident",
            Tok::Int(..) => "Int",
            Tok::Float(..) => "Float",
            Tok::Imag(..) => "Imag",
            Tok::Punct(Punct::Dot) => "Dot",
            Tok::Punct(Punct::Ellipsis) => "Ellipsis",
            Tok::Punct(Punct::Semi) => "Semi",
            Tok::Eof => "EOF",
            _ => "Other",
        })
        .collect()
}

fn int(input: &str) -> IntLit {
    match lex1(input) {
        Ok(Tok::Int(raw, lit)) => {
            assert_eq!(raw, input);
            lit
        }
        other => panic!("{input:?} -> {other:?}"),
    }
}

fn float(input: &str) -> FloatLit {
    match lex1(input) {
        Ok(Tok::Float(_, lit)) => lit,
        other => panic!("{input:?} -> {other:?}"),
    }
}

fn assert_invalid(input: &str) {
    assert_eq!(lex1(input), Err(LexErrorKind::InvalidNumber), "{input:?}");
}

#[test]
fn ints_valid_decimal() {
    for s in ["0", "1", "9", "10", "123_456", "1_2_3"] {
        assert!(matches!(lex1(s), Ok(Tok::Int(..))), "{s}");
    }
}

#[test]
fn ints_valid_prefixed() {
    for s in ["0x1", "0x_1", "0XDEAD_BEEF", "0o7", "0o_7", "0b1", "0b_1010", "017"] {
        assert!(matches!(lex1(s), Ok(Tok::Int(..))), "{s}");
    }
}

#[test]
fn int_radix_and_value() {
    let cases: &[(&str, u64, Radix)] = &[
        ("10", 10, Radix::Decimal),
        ("0", 0, Radix::Decimal),
        ("1_000_000", 1_000_000, Radix::Decimal),
        ("0x1F", 31, Radix::Hex),
        ("0XDEAD_BEEF", 0xDEAD_BEEF, Radix::Hex),
        ("0o17", 15, Radix::Octal),
        ("017", 15, Radix::Octal),
        ("0_17", 15, Radix::Octal),
        ("0b1010", 10, Radix::Binary),
        ("0B_1", 1, Radix::Binary),
    ];
    for &(src, value, radix) in cases {
        let lit = int(src);
        assert_eq!(lit.value, BigUint::from(value), "{src}");
        assert_eq!(lit.radix, radix, "{src}");
    }
}

#[test]
fn int_values_are_arbitrary_precision() {
    let lit = int("0xFFFF_FFFF_FFFF_FFFF_FFFF_FFFF_FFFF_FFFF");
    assert_eq!(lit.value, BigUint::from(u128::MAX));
    assert_eq!(lit.value.to_string(), u128::MAX.to_string());
}

#[test]
fn ints_invalid_underscore_rules() {
    for s in ["1__2", "1_", "0x_", "0b1_", "0o_"] {
        assert_invalid(s);
    }
}

#[test]
fn floats_valid_decimal() {
    for s in ["0.0", ".5", "1.", "1.0", "1e9", "1E+9", "1e-9", "1.2e3", "1_2.3_4e5_6"] {
        assert!(matches!(lex1(s), Ok(Tok::Float(..))), "{s}");
    }
}

#[test]
fn float_parts() {
    let f = float("1.5e3");
    assert_eq!((&*f.mantissa, &*f.exponent), ("1.5", "3"));
    assert_eq!(f.radix, Radix::Decimal);
    assert!(!f.negative_exponent);

    let f = float("1_2.3_4E-5_6");
    assert_eq!((&*f.mantissa, &*f.exponent), ("12.34", "56"));
    assert!(f.negative_exponent);

    let f = float("2.5");
    assert_eq!((&*f.mantissa, &*f.exponent), ("2.5", ""));

    let f = float("0x1.8p+1");
    assert_eq!((&*f.mantissa, &*f.exponent), ("1.8", "1"));
    assert_eq!(f.radix, Radix::Hex);
    assert!(!f.negative_exponent);
}

#[test]
fn floats_valid_hex() {
    for s in ["0x1p0", "0x1.8p+1", "0x.8p0", "0X1.FP-2", "0x_1.2p3", "0x1.p2"] {
        assert!(matches!(lex1(s), Ok(Tok::Float(..))), "{s}");
    }
}

#[test]
fn floats_invalid_hex_requires_p() {
    for s in ["0x1.2", "0x.1", "0x1.", "0x1.2e3"] {
        assert_invalid(s);
    }
}

#[test]
fn imag_literals() {
    for s in ["1i", "0i", "1.0i", ".5i", "0x1p0i", "0b10i", "0o7i"] {
        assert!(matches!(lex1(s), Ok(Tok::Imag(..))), "{s}");
    }

    let (t1, t2) = lex2("1.0 i");
    assert!(matches!(t1, Tok::Float(..)), "t1={t1:?}");
    assert_eq!(t2, Tok::Ident("i"));
}

#[test]
fn imag_inner_payload() {
    match lex1("0123i") {
        Ok(Tok::Imag(raw, Number::Int(lit))) => {
            assert_eq!(raw, "0123i");
            assert_eq!(lit.value, BigUint::from(123u32));
            assert_eq!(lit.radix, Radix::Decimal);
        }
        other => panic!("{other:?}"),
    }
    match lex1("0x10i") {
        Ok(Tok::Imag(_, Number::Int(lit))) => {
            assert_eq!(lit.value, BigUint::from(16u32));
            assert_eq!(lit.radix, Radix::Hex);
        }
        other => panic!("{other:?}"),
    }
    assert!(matches!(lex1("1.5i"), Ok(Tok::Imag(_, Number::Float(_)))));
}

#[test]
fn maximal_munch_invalid_stays_single_token() {
    let mut lx = Lexer::new("0b2");
    let err = lx.next().expect("item").expect_err("invalid");
    assert_eq!(err.kind, LexErrorKind::InvalidNumber);
    assert_eq!(err.span.range(), 0..3);
}

#[test]
fn imaginary_suffix_binds_only_once() {
    assert_eq!(lex2("1if").1, Tok::Ident("f"));
    assert!(matches!(lex2("1if").0, Tok::Imag("1i", _)));
    assert!(matches!(lex2("1ii").0, Tok::Imag("1i", _)));
    assert_eq!(lex2("1ii").1, Tok::Ident("i"));
    assert!(matches!(lex2("1i2").1, Tok::Int("2", _)));
    assert_eq!(lex2("1i_").1, Tok::Ident("_"));
    assert!(matches!(lex1("1.i"), Ok(Tok::Imag("1.i", _))));
}

#[test]
fn imaginary_is_not_formed_across_trivia() {
    let (t1, t2) = lex2("1i /*space*/ i");
    assert!(matches!(t1, Tok::Imag(..)));
    assert_eq!(t2, Tok::Ident("i"));
}

#[test]
fn floats_invalid_underscore_positions_decimal() {
    for s in ["1_.0", "1._0", "1e_9", "1e+_9", "1e9_", "1._", "1_", "0_", ".5_", "1._e2"] {
        assert_invalid(s);
    }
}

#[test]
fn exponents_require_digits() {
    for s in [
        "1e", "1e+", "1e-", "1.0e", "1.0e+", "1.0e-", "0x1p", "0x1p+", "0x1p-", "0x1.0p",
        "0x1.0p+", "0x1.0p-",
    ] {
        assert_invalid(s);
    }
}

#[test]
fn hex_int_with_e_digit() {
    assert!(matches!(lex1("0x1e3"), Ok(Tok::Int(..))));
    assert!(matches!(lex1("0x1e3i"), Ok(Tok::Imag("0x1e3i", _))));
    assert_invalid("0x.p1");
}

#[test]
fn prefixed_int_invalid_digits() {
    for s in ["0o8", "0o9", "0b102", "09", "08", "0128"] {
        assert_invalid(s);
    }
}

#[test]
fn binary_and_octal_do_not_allow_fractional_part() {
    for s in ["0b1.0", "0o7.1", "0b_101.0", "0o_7.1"] {
        assert_invalid(s);
    }
}

#[test]
fn legacy_octal_digits_are_fine_in_floats_and_imaginaries() {
    assert!(matches!(lex1("09.5"), Ok(Tok::Float(..))));
    assert!(matches!(lex1("089i"), Ok(Tok::Imag(..))));
    assert!(matches!(lex1("09e1"), Ok(Tok::Float(..))));
}

#[test]
fn dots_around_numbers() {
    assert_eq!(kinds("1..2"), ["Int", "Dot", "Float", "Semi", "EOF"]);
    assert_eq!(kinds("1..x"), ["Int", "Dot", "Dot", "Ident", "Semi", "EOF"]);
    assert_eq!(kinds("1...2"), ["Int", "Ellipsis", "Int", "Semi", "EOF"]);
    assert_eq!(kinds("..123"), ["Dot", "Float", "Semi", "EOF"]);
    assert_eq!(kinds("..f"), ["Dot", "Dot", "Ident", "Semi", "EOF"]);

    let toks = tokenize("1..2").expect("tokens");
    assert!(matches!(toks[2].tok, Tok::Float(".2", _)));
}
