//! Tests for unit literals and conversions.

use pretty_assertions::assert_eq;
use rcalc::{ErrorKind, SuggestionSource, Type};

use super::{engine, eval_err, outputs};

#[test]
fn convert_between_units_of_a_family() {
    assert_eq!(outputs("5 _km _m convert"), vec!["5000"]);
    assert_eq!(outputs("212 _F _C to"), vec!["100"]);
    assert_eq!(outputs("[1, 2] _ft _in convert"), vec!["[12, 24]"]);
    assert_eq!(outputs("2 _KiB _B convert"), vec!["2048"]);
}

#[test]
fn ubase_converts_to_the_first_unit() {
    assert_eq!(outputs("2 _h ubase"), vec!["7200"]);
    assert_eq!(outputs("0 _C ubase"), vec!["273.15"]);
}

#[test]
fn conversion_errors_leave_stack_alone() {
    let mut e = engine();
    e.submit_text("1 _m").unwrap();
    let before = e.snapshot();
    assert_eq!(e.submit_text("_kg convert").unwrap_err().kind(), ErrorKind::Domain);
    assert_eq!(e.snapshot(), before);

    assert_eq!(eval_err("_km _m convert"), ErrorKind::StackUnderflow);
    assert_eq!(eval_err("[1, 2] _C _K convert"), ErrorKind::TypeMismatch);
    assert_eq!(eval_err("_m 2 mul"), ErrorKind::TypeMismatch);
    assert_eq!(eval_err("1 _furlong _m convert"), ErrorKind::Parse);
}

#[test]
fn unit_items_render_as_literals() {
    let mut e = engine();
    e.submit_text("_m").unwrap();
    let item = &e.rendered_stack()[0];
    assert_eq!(item.output, "_m");
    assert_eq!(item.output_type, Type::Unit);
}

#[test]
fn units_complete_after_underscore() {
    let mut e = engine();
    assert_eq!(e.suggestions("5 _k"), vec!["5 _km", "5 _kg"]);
    assert_eq!(e.suggestions("5 _km _m c"), vec!["5 _km _m convert"]);
    e.submit_text("5 _km _m").unwrap();
    assert_eq!(e.suggestions("t"), vec!["to"]);
}
