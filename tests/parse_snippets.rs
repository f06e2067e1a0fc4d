use goop::commands::{Input, dump_ast};
use goop_parser::{ParseConfig, parse, parse_resilient, render_ast};

fn assert_parses(src: &str) {
    let parsed = match parse(src) {
        Ok(parsed) => parsed,
        Err(e) => panic!("expected parse ok, got: {e}"),
    };
    assert_eq!(parsed.bad_nodes(), 0);

    let resilient = match parse_resilient(src) {
        Ok(parsed) => parsed,
        Err(f) => panic!("expected resilient parse ok, got diagnostics: {:#?}", f.diags),
    };
    assert_eq!(render_ast(&parsed), render_ast(&resilient));
}

#[test]
fn parses_imports_and_decls() {
    assert_parses(
        r#"
package main

import (
    "fmt"
    . "math"
    _ "net/http"
    str "strings"
)

const (
    A = 1
    B int = 2
    C
)

var (
    x = 1
    y, z int
    w []string = nil
)

type (
    T = int
    U struct { F T; G *U `json:"g"` }
    V map[string][]int
    Fn func(a, b int, rest ...string) (n int, err error)
)

func (u *U) Method(ch <-chan int) (int, error) { return <-ch, nil }

func main() {}

func decl() float64
"#,
    );
}

#[test]
fn parses_statements() {
    assert_parses(
        r#"
package p

func f(x int, ch chan int) int {
    y := x
    y += 2
    y, x = x, y
    ch <- y
    y--
    go func() { ch <- 1 }()
    defer close(ch)
    {
        var inner = y
        inner++
    }
    if z := y * 2; z > 10 {
        return z
    } else if z < 0 {
        return -z
    } else {
        y = z
    }
loop:
    for i := 0; i < 10; i++ {
        if i == 5 { break loop }
        continue
    }
    for y > 0 {
        y >>= 1
    }
    for k, v := range ch {
        _, _ = k, v
    }
    for range ch {
    }
    for {
        goto done
    }
done:
    ;
    return y
}
"#,
    );
}

#[test]
fn parses_expressions() {
    assert_parses(
        r#"
package p

func f(a, b, c int, s []int, m map[string]int, ch chan<- int, v any) {
    _ = a + b*c - (a<<2)
    _ = a == b || a < c && b <= c
    _ = &a
    _ = *&a
    _ = ^a &^ b
    _ = s[0]
    _ = s[1:]
    _ = s[:2]
    _ = s[0:2:3]
    _ = m["a"]
    _ = v.(int)
    _ = v.(*struct{ x int })
    _ = []byte("bytes")
    _ = f(a, b, c, s...)
    _ = func(x int) int { return x * 2 }(3)
    _ = 'x' + 0x1F + 0b101 + 0o17 + 1_000 + 1.5e3 + 0x1p-2 + 2i
    _ = "escaped\t\"" + `raw
string`
}
"#,
    );
}

#[test]
fn command_renders_what_the_library_renders() {
    let src = "package p\n\nvar x = -1 + 2\n";
    let outcome = dump_ast(&Input::new("x.go", src), ParseConfig::default());
    assert!(outcome.is_success(), "{:?}", outcome.errors);
    assert_eq!(outcome.dump, render_ast(&parse(src).expect("parse")));
}
