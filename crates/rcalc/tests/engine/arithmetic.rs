//! Tests for scalar arithmetic and integer promotion.

use pretty_assertions::assert_eq;
use rcalc::{EngineConfig, ErrorKind, IntegerPromotion, Type, Value};

use super::{engine, engine_with, eval, eval_err, outputs};

// ============================================================================
// Stack depth
// ============================================================================

#[test]
fn depth_follows_arity() {
    let mut e = engine();
    e.submit_text("1 2 3").unwrap();
    assert_eq!(e.snapshot().len(), 3);
    e.submit_text("add").unwrap();
    assert_eq!(e.snapshot().len(), 2);
    e.submit_text("mul").unwrap();
    assert_eq!(e.snapshot().values(), vec![Value::int(5)]);
    e.submit_text("neg").unwrap();
    assert_eq!(e.snapshot().values(), vec![Value::int(-5)]);
}

#[test]
fn aliases_resolve_to_same_operator() {
    assert_eq!(eval("10 4 -"), eval("10 4 sub"));
    assert_eq!(eval("6 7 *"), vec![Value::int(42)]);
    assert_eq!(eval("2 10 ^"), vec![Value::int(1024)]);
}

// ============================================================================
// Division
// ============================================================================

#[test]
fn exact_division_stays_integer() {
    let values = eval("4 2 /");
    assert!(matches!(values[..], [Value::Int(2)]));
}

#[test]
fn inexact_division_is_real() {
    assert!(matches!(eval("5 2 /")[..], [Value::Real(x)] if x == 2.5));
}

#[test]
fn division_by_zero_leaves_stack_alone() {
    let mut e = engine();
    e.submit_text("5").unwrap();
    let before = e.snapshot();
    assert_eq!(
        e.submit_text("0 /").unwrap_err().kind(),
        ErrorKind::DivisionByZero
    );
    assert_eq!(e.snapshot(), before);
    assert_eq!(eval_err("5 0.0 /"), ErrorKind::DivisionByZero);
}

#[test]
fn floored_integer_division() {
    assert_eq!(eval("-7 2 idiv"), vec![Value::int(-4)]);
    assert_eq!(eval("-7 3 mod"), vec![Value::int(2)]);
    assert_eq!(eval("7 -3 %"), vec![Value::int(-2)]);
}

// ============================================================================
// Exact integers
// ============================================================================

#[test]
fn bigint_multiplication_is_exact() {
    assert_eq!(
        outputs("123456789012345678901234567890 987654321098765432109876543210 mul"),
        vec!["121932631137021795226185032733622923332237463801111263526900"]
    );
}

#[test]
fn overflow_promotes_by_default() {
    let mut e = engine();
    e.submit_text("9223372036854775807 1 add").unwrap();
    let top = e.stack().top().unwrap().result().clone();
    assert_eq!(top.type_of(), Type::BigInt);
    assert_eq!(top.to_string(), "9223372036854775808");
    assert_eq!(outputs("2 100 pow"), vec!["1267650600228229401496703205376"]);
}

#[test]
fn explicit_promotion_reports_overflow() {
    let config = EngineConfig {
        integer_promotion: IntegerPromotion::Explicit,
        ..EngineConfig::default()
    };
    let mut e = engine_with(config);
    e.submit_text("9223372036854775807").unwrap();
    assert_eq!(
        e.submit_text("1 add").unwrap_err().kind(),
        ErrorKind::IntegerOverflow
    );
    assert_eq!(e.snapshot().values(), vec![Value::int(i64::MAX)]);

    // Explicit conversion still reaches BigInt.
    e.submit_text("bigint 1 add").unwrap();
    assert_eq!(e.stack().top().unwrap().result().type_of(), Type::BigInt);
}

#[test]
fn oversized_exact_results_are_rejected() {
    let mut e = engine();
    e.submit_text("10").unwrap();
    let before = e.snapshot();
    let err = e.submit_text("3000000 pow").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.to_string(), "'pow': result too large");
    assert_eq!(e.snapshot(), before);

    let config = EngineConfig {
        max_integer_bits: 200,
        ..EngineConfig::default()
    };
    let mut e = engine_with(config);
    e.submit_text("2 199 pow").unwrap();
    assert_eq!(e.submit_text("\\dup mul").unwrap_err().kind(), ErrorKind::Domain);
    assert_eq!(e.snapshot().len(), 1);
}

#[test]
fn bigint_results_are_never_demoted() {
    let mut e = engine();
    e.submit_text("9223372036854775807 1 add 1 sub").unwrap();
    assert_eq!(e.stack().top().unwrap().result().type_of(), Type::BigInt);
    e.submit_text("int").unwrap();
    assert_eq!(e.snapshot().values(), vec![Value::int(i64::MAX)]);
}

// ============================================================================
// Unary functions
// ============================================================================

#[test]
fn sqrt_of_perfect_square_is_exact() {
    assert!(matches!(eval("16 sqrt")[..], [Value::Int(4)]));
    assert!(matches!(eval("2 sqrt")[..], [Value::Real(_)]));
    assert_eq!(eval_err("-1 sqrt"), ErrorKind::Domain);
}

#[test]
fn transcendental_domains() {
    assert_eq!(eval_err("0 ln"), ErrorKind::Domain);
    assert_eq!(eval_err("2 acos"), ErrorKind::Domain);
    assert_eq!(outputs("0 cos"), vec!["1"]);
}

#[test]
fn constants_take_no_operands() {
    let mut e = engine();
    e.submit_text("pi e").unwrap();
    assert_eq!(
        e.snapshot().values(),
        vec![Value::real(std::f64::consts::PI), Value::real(std::f64::consts::E)]
    );
}
