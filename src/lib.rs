//! Parser combinators over an arena-owned grammar.
//!
//! Parsers are built against a [`Context`], which owns them all and hands
//! back copyable [`Parser`] handles. Primitives match characters, literal
//! strings and predicate runs; combinators sequence, branch, repeat and map
//! them; [`Context::ptr`] and a [`Slot`] tie recursive rules together.
//!
//! # Example
//!
//! ```rust
//! use parcomb::{Context, Failure};
//!
//! let mut ctx = Context::new();
//!
//! // group := '[' group* ']'
//! let slot = ctx.slot();
//! let open = ctx.char('[');
//! let inner = ctx.ptr(slot);
//! let nested = ctx.repeat(inner);
//! let close = ctx.char(']');
//! let group = ctx.sequence([open, nested, close]);
//! ctx.bind(slot, group).unwrap();
//!
//! assert!(ctx.run(group, "[[][[]]]").is_ok());
//! assert_eq!(ctx.run(group, "[[]"), Err(Failure::EndOfInput));
//! assert_eq!(ctx.run(group, "[]x"), Err(Failure::Unexpected('x')));
//! ```
//!
//! Repetition stops as soon as an iteration consumes nothing, so wrapping a
//! parser that can succeed on empty input (such as [`Context::filter`]) in
//! [`Context::repeat`] terminates.
//!
//! Repetition is iterative, but nesting through [`Context::ptr`] recurses on
//! the native stack once per level. Bounding nesting depth of untrusted input
//! (for example thousands of unmatched `[`) is up to the caller; running out
//! of stack aborts the process.

mod combinators;
mod context;
mod driver;
pub mod grammars;
mod primitives;
mod reply;
pub mod tracing_config;

pub use context::{Context, GrammarError, Parser, Slot};
pub use reply::{Failure, Reply, Success, Value};
