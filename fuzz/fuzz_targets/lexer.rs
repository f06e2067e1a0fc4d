// fuzz_targets/lexer.rs
#![no_main]

use goop_parser::{Lexer, ScanConfig, Tok};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let config = ScanConfig::default().best_effort().with_comments();
    let mut lx = Lexer::with_config(s, config);

    let mut last_real_end = 0u32;
    let mut eofs = 0usize;
    let mut steps = 0usize;
    let max_steps = s.len().saturating_mul(4) + 64;

    for item in lx.by_ref() {
        let span = match &item {
            Ok(token) => token.span,
            Err(err) => err.span,
        };
        assert!(span.start <= span.end);
        assert!(span.end as usize <= s.len());

        match item {
            // May sit at a newline inside the comment just emitted.
            Ok(token) if token.is_implicit_semi() => assert!(span.is_empty()),
            Ok(token) if token.tok == Tok::Eof => eofs += 1,
            _ => {
                assert!(span.start >= last_real_end);
                last_real_end = span.end;
            }
        }

        steps += 1;
        assert!(steps <= max_steps);
    }

    assert_eq!(eofs, 1);
    assert!(lx.next().is_none());
});
