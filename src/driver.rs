//! Running a built grammar against input.

use tracing::debug;

use crate::context::{Context, Node, Parser};
use crate::primitives::{parse_char, parse_filter, parse_satisfy, parse_str};
use crate::reply::{Failure, Reply};

impl Context {
    /// Run `parser` over the whole of `input`.
    ///
    /// Trailing input left by an otherwise successful parse turns the result
    /// into [`Failure::Unexpected`] on the first leftover character.
    ///
    /// # Panics
    ///
    /// If the grammar reaches a slot that was never bound. Use
    /// [`Context::check`] to detect that beforehand.
    pub fn run<'i>(&self, parser: Parser, input: &'i str) -> Reply<'i> {
        debug!(?parser, len = input.len(), "run");
        let reply = self.apply(parser, input).and_then(|success| {
            if success.rest.is_empty() {
                Ok(success)
            } else {
                Err(Failure::at(success.rest))
            }
        });
        debug!(ok = reply.is_ok(), failure = ?reply.as_ref().err(), "run finished");
        reply
    }

    /// Apply `parser` to a prefix of `input`; leftover input is returned in
    /// the success's `rest`.
    ///
    /// # Panics
    ///
    /// Same as [`Context::run`].
    pub fn parse<'i>(&self, parser: Parser, input: &'i str) -> Reply<'i> {
        self.apply(parser, input)
    }

    pub(crate) fn apply<'i>(&self, parser: Parser, input: &'i str) -> Reply<'i> {
        match &self.nodes[parser] {
            Node::Char(c) => parse_char(*c, input),
            Node::Str(s) => parse_str(s, input),
            Node::Filter(pred) => parse_filter(&**pred, input),
            Node::Satisfy(pred) => parse_satisfy(&**pred, input),
            Node::Sequence(children) => self.parse_sequence(children, input),
            Node::Branch(children) => self.parse_branch(children, input),
            Node::Repeat(inner) => self.parse_repeat(*inner, input),
            Node::Map(inner, transform) => self.apply(*inner, input).and_then(transform),
            Node::Ptr(slot) => match self.resolve(*slot) {
                Some(target) => self.apply(target, input),
                None => panic!("parser {parser:?} refers to unbound slot {slot:?}"),
            },
        }
    }
}
