//! Line tokenizer.
//!
//! Whitespace separates tokens, except inside brackets: a `[` starts a
//! literal token that runs until its brackets balance, so `[1, 2] [[1, 0],
//! [0, 1]]` is two tokens.

use crate::error::{Error, Result};

/// Tokenizer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Between tokens.
    ReadingToken,
    /// Inside a bracketed literal, at the given nesting depth.
    InLiteral(usize),
    /// Inside a bare word: a number, an operator name, or a command.
    InOperatorName,
    /// A malformed line. Terminal.
    Error,
}

/// A token and its byte offset in the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Split a line into tokens.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut state = State::ReadingToken;
    let mut start = 0;
    let mut error: Option<(usize, &'static str)> = None;

    for (i, ch) in line.char_indices() {
        state = match (state, ch) {
            (State::ReadingToken, c) if c.is_whitespace() => State::ReadingToken,
            (State::ReadingToken, '[') => {
                start = i;
                State::InLiteral(1)
            }
            (State::ReadingToken, ']') => {
                error = Some((i, "unbalanced ']'"));
                State::Error
            }
            (State::ReadingToken, _) => {
                start = i;
                State::InOperatorName
            }

            (State::InLiteral(depth), '[') => State::InLiteral(depth + 1),
            (State::InLiteral(1), ']') => {
                tokens.push(Token {
                    text: &line[start..i + 1],
                    offset: start,
                });
                State::ReadingToken
            }
            (State::InLiteral(depth), ']') => State::InLiteral(depth - 1),
            (State::InLiteral(depth), _) => State::InLiteral(depth),

            (State::InOperatorName, c) if c.is_whitespace() => {
                tokens.push(Token {
                    text: &line[start..i],
                    offset: start,
                });
                State::ReadingToken
            }
            (State::InOperatorName, '[' | ']') => {
                error = Some((start, "brackets must start a separate token"));
                State::Error
            }
            (State::InOperatorName, _) => State::InOperatorName,

            (State::Error, _) => break,
        };
        if state == State::Error {
            break;
        }
    }

    match state {
        State::ReadingToken => Ok(tokens),
        State::InOperatorName => {
            tokens.push(Token {
                text: &line[start..],
                offset: start,
            });
            Ok(tokens)
        }
        State::InLiteral(_) => Err(Error::parse(&line[start..], "unbalanced '['")),
        State::Error => {
            let (at, reason) = error.unwrap_or((start, "malformed input"));
            let end = line[at..]
                .find(char::is_whitespace)
                .map_or(line.len(), |n| at + n);
            Err(Error::parse(&line[at..end], reason))
        }
    }
}
