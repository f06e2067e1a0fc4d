// fuzz_targets/parser.rs
#![no_main]

use goop_parser::{parse, parse_resilient, render_ast};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    match parse_resilient(s) {
        Ok(parsed) => {
            assert_eq!(parsed.bad_nodes(), 0);
            // A clean resilient parse is also a clean strict parse.
            let strict = parse(s).expect("strict parse of clean input");
            assert_eq!(render_ast(&parsed), render_ast(&strict));
        }
        Err(failure) => {
            assert!(!failure.diags.is_empty());
            assert!(failure.diags.windows(2).all(|w| w[0].span.start <= w[1].span.start));
            if let Some(partial) = failure.partial {
                let _ = render_ast(&partial);
            }
            assert!(parse(s).is_err());
        }
    }
});
