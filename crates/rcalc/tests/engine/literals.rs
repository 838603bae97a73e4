//! Tests for literal parsing through the engine.

use pretty_assertions::assert_eq;
use rcalc::{Type, Value};

use super::{engine, eval, outputs};

#[test]
fn scalar_literals() {
    assert_eq!(
        eval("42 -7 1.5 .5 1e3"),
        vec![
            Value::int(42),
            Value::int(-7),
            Value::real(1.5),
            Value::real(0.5),
            Value::real(1000.0),
        ]
    );
}

#[test]
fn radix_literals_render_in_their_radix() {
    assert_eq!(outputs("0xff 0b101 0o17"), vec!["0xFF", "0b101", "0o17"]);
}

#[test]
fn bigint_literal() {
    let mut e = engine();
    e.submit_text("123456789012345678901234567890").unwrap();
    assert_eq!(e.stack().types(), vec![Type::BigInt]);
}

#[test]
fn bracket_literals_are_single_tokens() {
    let mut e = engine();
    e.submit_text("[1, 2] [1 2 3] [[1, 0], [0, 1]] _kg").unwrap();
    assert_eq!(
        e.stack().types(),
        vec![Type::Vec2, Type::Vec3, Type::Mat2, Type::Unit]
    );
    assert_eq!(
        e.rendered_stack()
            .into_iter()
            .map(|item| item.output)
            .collect::<Vec<_>>(),
        vec!["[1, 2]", "[1, 2, 3]", "[[1, 0], [0, 1]]", "_kg"]
    );
}

#[test]
fn whole_reals_display_as_integers() {
    assert_eq!(outputs("2.0 1e20 -0.25"), vec!["2", "1e+20", "-0.25"]);
}
