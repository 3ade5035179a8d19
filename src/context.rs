//! The grammar arena.
//!
//! A [`Context`] owns every parser built against it. Builders register one
//! node each and hand back a [`Parser`], a small copyable handle that stays
//! valid for as long as the context lives. Everything is released together
//! when the context is torn down (or dropped).
//!
//! Recursive rules go through a [`Slot`]: reserve it first, refer to it with
//! [`Context::ptr`] while building the rule, then [`Context::bind`] the
//! finished rule into it.

use std::fmt;

use index_vec::IndexVec;
use tracing::{debug, trace};

use crate::reply::{Reply, Success};

index_vec::define_index_type! {
    /// Handle to a parser registered in a [`Context`].
    pub struct Parser = u32;
}

index_vec::define_index_type! {
    /// Late-bound reference to a parser, used for recursive rules.
    pub struct Slot = u32;
}

pub(crate) type Predicate = Box<dyn Fn(char) -> bool>;
pub(crate) type Transform = Box<dyn for<'i> Fn(Success<'i>) -> Reply<'i>>;

/// Configuration of one registered parser. The variant selects how
/// [`Context::apply`] interprets it.
pub(crate) enum Node {
    Char(char),
    Str(Box<str>),
    Filter(Predicate),
    Satisfy(Predicate),
    Sequence(Vec<Parser>),
    Branch(Vec<Parser>),
    Repeat(Parser),
    Map(Parser, Transform),
    Ptr(Slot),
}

impl Node {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Node::Char(_) => "char",
            Node::Str(_) => "string",
            Node::Filter(_) => "filter",
            Node::Satisfy(_) => "satisfy",
            Node::Sequence(_) => "sequence",
            Node::Branch(_) => "branch",
            Node::Repeat(_) => "repeat",
            Node::Map(..) => "map",
            Node::Ptr(_) => "ptr",
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Node::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Node::Sequence(ps) => f.debug_tuple("Sequence").field(ps).finish(),
            Node::Branch(ps) => f.debug_tuple("Branch").field(ps).finish(),
            Node::Repeat(p) => f.debug_tuple("Repeat").field(p).finish(),
            Node::Map(p, _) => f.debug_tuple("Map").field(p).finish(),
            Node::Ptr(s) => f.debug_tuple("Ptr").field(s).finish(),
            Node::Filter(_) | Node::Satisfy(_) => f.write_str(self.kind()),
        }
    }
}

/// Misuse of the grammar-building API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// A reachable `ptr` refers to a slot that was never bound.
    #[error("slot {0:?} is referenced but never bound")]
    UnboundSlot(Slot),
    /// `bind` was called on a slot that already holds a parser.
    #[error("slot {0:?} is already bound")]
    SlotAlreadyBound(Slot),
}

/// Owns all parsers of a grammar. Not shareable across threads; one context
/// serves one build-then-parse lifecycle.
// TODO: tag handles with the context that issued them so a handle from
// another context is rejected instead of resolving to an unrelated node.
#[derive(Debug, Default)]
pub struct Context {
    pub(crate) nodes: IndexVec<Parser, Node>,
    pub(crate) slots: IndexVec<Slot, Option<Parser>>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parsers registered so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Release every registered parser at once. Returns how many were
    /// released. Dropping the context has the same effect.
    pub fn teardown(self) -> usize {
        let released = self.nodes.len();
        debug!(parsers = released, slots = self.slots.len(), "context torn down");
        released
    }

    pub(crate) fn register(&mut self, node: Node) -> Parser {
        let kind = node.kind();
        let parser = self.nodes.push(node);
        trace!(?parser, kind, "registered parser");
        parser
    }

    /// Reserve an empty slot for a rule that is not built yet.
    pub fn slot(&mut self) -> Slot {
        self.slots.push(None)
    }

    /// Fill `slot` with `parser`. A slot can be bound only once.
    pub fn bind(&mut self, slot: Slot, parser: Parser) -> Result<(), GrammarError> {
        let entry = &mut self.slots[slot];
        if entry.is_some() {
            return Err(GrammarError::SlotAlreadyBound(slot));
        }
        *entry = Some(parser);
        Ok(())
    }

    /// The parser held by `slot`, if bound.
    pub fn resolve(&self, slot: Slot) -> Option<Parser> {
        self.slots[slot]
    }

    /// Verify that every slot reachable from `parser` is bound.
    pub fn check(&self, parser: Parser) -> Result<(), GrammarError> {
        let mut seen: IndexVec<Parser, bool> = IndexVec::from_vec(vec![false; self.nodes.len()]);
        let mut pending = vec![parser];
        while let Some(p) = pending.pop() {
            if std::mem::replace(&mut seen[p], true) {
                continue;
            }
            match &self.nodes[p] {
                Node::Char(_) | Node::Str(_) | Node::Filter(_) | Node::Satisfy(_) => {}
                Node::Sequence(children) | Node::Branch(children) => {
                    pending.extend(children.iter().copied())
                }
                Node::Repeat(inner) | Node::Map(inner, _) => pending.push(*inner),
                Node::Ptr(slot) => {
                    pending.push(self.resolve(*slot).ok_or(GrammarError::UnboundSlot(*slot))?)
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_empty() {
        let ctx = Context::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.teardown(), 0);
    }

    #[test]
    fn every_builder_registers_one_parser() {
        let mut ctx = Context::new();
        let a = ctx.char('a');
        let b = ctx.string("bc");
        let _ = ctx.sequence([a, b]);
        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.teardown(), 3);
    }

    #[test]
    fn handles_are_distinct() {
        let mut ctx = Context::new();
        let a = ctx.char('a');
        let b = ctx.char('a');
        assert_ne!(a, b);
    }

    #[test]
    fn slot_binds_once() {
        let mut ctx = Context::new();
        let slot = ctx.slot();
        let a = ctx.char('a');
        assert_eq!(ctx.resolve(slot), None);
        assert_eq!(ctx.bind(slot, a), Ok(()));
        assert_eq!(ctx.resolve(slot), Some(a));
        assert_eq!(ctx.bind(slot, a), Err(GrammarError::SlotAlreadyBound(slot)));
    }

    #[test]
    fn check_reports_unbound_slot() {
        let mut ctx = Context::new();
        let slot = ctx.slot();
        let inner = ctx.ptr(slot);
        let open = ctx.char('(');
        let rule = ctx.sequence([open, inner]);
        assert_eq!(ctx.check(rule), Err(GrammarError::UnboundSlot(slot)));
        ctx.bind(slot, rule).unwrap();
        assert_eq!(ctx.check(rule), Ok(()));
    }

    #[test]
    fn check_ignores_unreachable_slots() {
        let mut ctx = Context::new();
        let slot = ctx.slot();
        let _dangling = ctx.ptr(slot);
        let a = ctx.char('a');
        assert_eq!(ctx.check(a), Ok(()));
    }
}
