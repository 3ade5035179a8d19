//! Combinators: build new parsers out of existing ones.

use tracing::trace;

use crate::context::{Context, Node, Parser, Slot};
use crate::reply::{Failure, Reply, Success, Value};

impl Context {
    /// Apply `children` left to right.
    ///
    /// Succeeds with a [`Value::List`] of every child's payload. The first
    /// child failure is returned unchanged and nothing is consumed.
    pub fn sequence(&mut self, children: impl IntoIterator<Item = Parser>) -> Parser {
        self.register(Node::Sequence(children.into_iter().collect()))
    }

    /// Try `children` in order at the same cursor; the first success wins.
    ///
    /// When every child fails, the failure of the last one tried is returned.
    pub fn branch(&mut self, children: impl IntoIterator<Item = Parser>) -> Parser {
        self.register(Node::Branch(children.into_iter().collect()))
    }

    /// Apply `parser` as many times as it succeeds. Never fails.
    ///
    /// Stops at the first failure, or at the first success that consumed
    /// nothing, and discards that attempt.
    pub fn repeat(&mut self, parser: Parser) -> Parser {
        self.register(Node::Repeat(parser))
    }

    /// Like [`Context::repeat`] but at least one iteration must succeed.
    /// Otherwise fails with whatever sits at the cursor.
    pub fn not_empty_repeat(&mut self, parser: Parser) -> Parser {
        let many = self.repeat(parser);
        self.map(many, require_items)
    }

    /// Run `parser` and hand its success to `transform`.
    ///
    /// `transform` never sees failures. It decides the final reply: it can
    /// replace the payload, keep it, or turn the success into a failure.
    pub fn map<F>(&mut self, parser: Parser, transform: F) -> Parser
    where
        F: for<'i> Fn(Success<'i>) -> Reply<'i> + 'static,
    {
        self.register(Node::Map(parser, Box::new(transform)))
    }

    /// Delegate to whatever parser `slot` holds at parse time.
    ///
    /// The slot may still be empty here; it has to be bound with
    /// [`Context::bind`] before the grammar runs.
    pub fn ptr(&mut self, slot: Slot) -> Parser {
        self.register(Node::Ptr(slot))
    }

    pub(crate) fn parse_sequence<'i>(&self, children: &[Parser], input: &'i str) -> Reply<'i> {
        let mut rest = input;
        let mut items = Vec::with_capacity(children.len());
        for &child in children {
            let success = self.apply(child, rest)?;
            rest = success.rest;
            items.push(success.value);
        }
        Ok(Success::new(Value::List(items), rest))
    }

    pub(crate) fn parse_branch<'i>(&self, children: &[Parser], input: &'i str) -> Reply<'i> {
        let mut last = Failure::at(input);
        for &child in children {
            match self.apply(child, input) {
                Ok(success) => return Ok(success),
                Err(failure) => last = failure,
            }
        }
        Err(last)
    }

    pub(crate) fn parse_repeat<'i>(&self, parser: Parser, input: &'i str) -> Reply<'i> {
        let mut rest = input;
        let mut items = Vec::new();
        while let Ok(success) = self.apply(parser, rest) {
            if success.rest.len() == rest.len() {
                trace!(?parser, iterations = items.len(), "repeat stopped without progress");
                break;
            }
            rest = success.rest;
            items.push(success.value);
        }
        Ok(Success::new(Value::List(items), rest))
    }
}

fn require_items(success: Success<'_>) -> Reply<'_> {
    if matches!(success.value.as_list(), Some([])) {
        return Err(Failure::at(success.rest));
    }
    Ok(success)
}
