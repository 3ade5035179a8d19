//! Primitive parsers: single characters, literal strings and predicate runs,
//! plus the handful of ready-made parsers built from them.

use crate::context::{Context, Node, Parser};
use crate::reply::{Failure, Reply, Success, Value};

impl Context {
    /// Match exactly `c`. Payload: [`Value::Char`].
    pub fn char(&mut self, c: char) -> Parser {
        self.register(Node::Char(c))
    }

    /// Match the literal `s`. Payload: [`Value::Str`] of the matched input.
    pub fn string(&mut self, s: &str) -> Parser {
        self.register(Node::Str(s.into()))
    }

    /// Consume the longest prefix whose characters all satisfy `pred`.
    ///
    /// Never fails; the consumed run (possibly empty) is the [`Value::Str`]
    /// payload. Wrap it in [`Context::not_empty_repeat`] or a validating
    /// [`Context::map`] when an empty run must be rejected.
    pub fn filter<F>(&mut self, pred: F) -> Parser
    where
        F: Fn(char) -> bool + 'static,
    {
        self.register(Node::Filter(Box::new(pred)))
    }

    /// Match one character accepted by `pred`. Payload: [`Value::Char`].
    pub fn satisfy<F>(&mut self, pred: F) -> Parser
    where
        F: Fn(char) -> bool + 'static,
    {
        self.register(Node::Satisfy(Box::new(pred)))
    }

    pub fn new_line(&mut self) -> Parser {
        self.char('\n')
    }

    pub fn tab(&mut self) -> Parser {
        self.char('\t')
    }

    pub fn space(&mut self) -> Parser {
        self.char(' ')
    }

    /// One tab, space or newline.
    pub fn anyspace(&mut self) -> Parser {
        let choices = [self.tab(), self.space(), self.new_line()];
        self.branch(choices)
    }

    /// One or more of [`Context::anyspace`].
    pub fn manyspace(&mut self) -> Parser {
        let one = self.anyspace();
        self.not_empty_repeat(one)
    }

    /// A run of ASCII digits as [`Value::Int`].
    ///
    /// An empty run fails at the cursor; a run too large for `i64` fails
    /// `Unexpected` on its first digit.
    pub fn integer(&mut self) -> Parser {
        let digits = self.filter(|c| c.is_ascii_digit());
        self.map(digits, integer_value)
    }
}

fn integer_value(success: Success<'_>) -> Reply<'_> {
    let digits = success.value.as_str().unwrap_or_default();
    if digits.is_empty() {
        return Err(Failure::at(success.rest));
    }
    match digits.parse::<i64>() {
        Ok(n) => Ok(success.with_value(Value::Int(n))),
        Err(_) => Err(Failure::at(digits)),
    }
}

pub(crate) fn parse_char(expected: char, input: &str) -> Reply<'_> {
    let mut chars = input.chars();
    match chars.next() {
        None => Err(Failure::EndOfInput),
        Some(c) if c == expected => Ok(Success::new(Value::Char(c), chars.as_str())),
        Some(c) => Err(Failure::Unexpected(c)),
    }
}

/// A remainder shorter than `expected` is `EndOfInput`; otherwise a mismatch
/// is reported at the first character that differs.
pub(crate) fn parse_str<'i>(expected: &str, input: &'i str) -> Reply<'i> {
    let wanted = expected.chars().count();
    if input.chars().take(wanted).count() < wanted {
        return Err(Failure::EndOfInput);
    }
    if let Some((actual, _)) = input.chars().zip(expected.chars()).find(|(a, w)| a != w) {
        return Err(Failure::Unexpected(actual));
    }
    let (matched, rest) = input.split_at(expected.len());
    Ok(Success::new(Value::Str(matched), rest))
}

pub(crate) fn parse_filter<'i>(pred: &dyn Fn(char) -> bool, input: &'i str) -> Reply<'i> {
    let end = input
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(input.len(), |(i, _)| i);
    let (run, rest) = input.split_at(end);
    Ok(Success::new(Value::Str(run), rest))
}

pub(crate) fn parse_satisfy<'i>(pred: &dyn Fn(char) -> bool, input: &'i str) -> Reply<'i> {
    let mut chars = input.chars();
    match chars.next() {
        None => Err(Failure::EndOfInput),
        Some(c) if pred(c) => Ok(Success::new(Value::Char(c), chars.as_str())),
        Some(c) => Err(Failure::Unexpected(c)),
    }
}
