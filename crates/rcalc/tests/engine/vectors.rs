//! Tests for vector and matrix operations.

use pretty_assertions::assert_eq;
use rcalc::{ErrorKind, Value};

use super::{eval, eval_err, outputs};

#[test]
fn vector_addition() {
    assert_eq!(eval("[1, 2, 3] [4, 5, 6] +"), vec![Value::vec3(5.0, 7.0, 9.0)]);
    assert_eq!(outputs("[1, 2] [0.5, 0.25] -"), vec!["[0.5, 1.75]"]);
}

#[test]
fn mismatched_dimensions() {
    assert_eq!(eval_err("[1, 2] [1, 2, 3] +"), ErrorKind::ShapeMismatch);
    assert_eq!(eval_err("[1, 2] [[1, 0], [0, 1]] +"), ErrorKind::TypeMismatch);
    assert_eq!(eval_err("[1, 2] 3 +"), ErrorKind::TypeMismatch);
}

#[test]
fn scaling() {
    assert_eq!(eval("2 [1, 2, 3] *"), vec![Value::vec3(2.0, 4.0, 6.0)]);
    assert_eq!(eval("[2, 4] 2 /"), vec![Value::vec2(1.0, 2.0)]);
    assert_eq!(eval_err("[2, 4] 0 /"), ErrorKind::DivisionByZero);
}

#[test]
fn products() {
    assert_eq!(outputs("[1, 2, 3] [4, 5, 6] dot"), vec!["32"]);
    assert_eq!(eval("[1, 0, 0] [0, 1, 0] cross"), vec![Value::vec3(0.0, 0.0, 1.0)]);
    assert_eq!(outputs("[3, 4] norm"), vec!["5"]);
    assert_eq!(outputs("[3, 4] len"), vec!["5"]);
    assert_eq!(eval_err("[0, 0] normalize"), ErrorKind::Domain);
}

#[test]
fn matrix_operations() {
    assert_eq!(outputs("[[1, 2], [3, 4]] transpose"), vec!["[[1, 3], [2, 4]]"]);
    assert_eq!(outputs("[[4, 7], [2, 6]] det"), vec!["10"]);
    assert_eq!(
        outputs("[[1, 2], [3, 4]] [[5, 6], [7, 8]] *"),
        vec!["[[19, 22], [43, 50]]"]
    );
    assert_eq!(outputs("[[2, 0], [0, 2]] [1, 1] *"), vec!["[2, 2]"]);
    assert_eq!(eval_err("[[1, 2], [2, 4]] minv"), ErrorKind::Domain);
}

#[test]
fn composition_from_stack() {
    assert_eq!(eval("1 2 vec2"), vec![Value::vec2(1.0, 2.0)]);
    assert_eq!(
        eval("[1, 2] [3, 4] mat2"),
        vec![Value::matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()]
    );
}
