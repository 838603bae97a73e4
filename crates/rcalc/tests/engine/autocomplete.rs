//! Tests for autocomplete against the live engine.

use pretty_assertions::assert_eq;
use rcalc::{AutocompleteManager, SuggestionSource};

use super::engine;

#[test]
fn candidates_fit_the_stack() {
    let mut e = engine();
    e.submit_text("[1, 0, 0] [0, 1, 0]").unwrap();
    assert_eq!(e.suggestions("c"), vec!["cross"]);
    assert_eq!(e.suggestions("d"), vec!["dot"]);
    e.submit_text("\\clear 2").unwrap();
    assert_eq!(
        e.suggestions("s"),
        vec!["sq", "sin", "sign", "sqrt"]
    );
}

#[test]
fn cycling_through_engine_candidates() {
    let e = engine();
    let mut ac = AutocompleteManager::new();
    let candidates = ac.init_suggestions("1 2 m", &e).to_vec();
    assert_eq!(candidates, vec!["1 2 max", "1 2 min", "1 2 mod", "1 2 mul"]);

    assert_eq!(ac.next(), Some("1 2 max"));
    assert_eq!(ac.next(), Some("1 2 min"));
    assert_eq!(ac.previous(), Some("1 2 max"));
    assert_eq!(ac.previous(), Some("1 2 mul"));
    assert_eq!(ac.accept().as_deref(), Some("1 2 mul"));
    assert!(!ac.is_active());
}

#[test]
fn previous_first_yields_last() {
    let e = engine();
    let mut ac = AutocompleteManager::new();
    ac.init_suggestions("1 2 m", &e);
    assert_eq!(ac.previous(), Some("1 2 mul"));
}

#[test]
fn no_candidates_is_inactive() {
    let e = engine();
    let mut ac = AutocompleteManager::new();
    assert!(ac.init_suggestions("zzz", &e).is_empty());
    assert!(!ac.is_active());
    assert_eq!(ac.next(), None);
}

#[test]
fn commands_complete_by_prefix() {
    let e = engine();
    assert_eq!(e.suggestions("\\c"), vec!["\\clear"]);
    assert_eq!(e.suggestions("4 \\d"), vec!["4 \\dup", "4 \\drop"]);
}

#[test]
fn dry_run_does_not_commit() {
    let mut e = engine();
    e.submit_text("1").unwrap();
    let before = e.snapshot();
    e.renderer_mut().take();
    assert_eq!(e.suggestions("2 \\swap ad"), vec!["2 \\swap add"]);
    assert_eq!(e.snapshot(), before);
    assert!(e.renderer().events.is_empty());
}
