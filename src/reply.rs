//! Outcome of a single parse attempt and the payloads it carries.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

/// Outcome of applying a parser at a cursor.
pub type Reply<'i> = Result<Success<'i>, Failure>;

/// A successful parse: the produced payload and the unconsumed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Success<'i> {
    pub value: Value<'i>,
    /// Always a suffix of the input the attempt started on.
    pub rest: &'i str,
}

impl<'i> Success<'i> {
    pub fn new(value: Value<'i>, rest: &'i str) -> Self {
        Self { value, rest }
    }

    /// Replace the payload, keeping the cursor.
    pub fn with_value(self, value: Value<'i>) -> Self {
        Self { value, ..self }
    }
}

/// Why a parse attempt failed. No input is consumed by a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// Input ran out where a character was required.
    #[error("unexpected end of input")]
    EndOfInput,
    /// A character was present but rejected.
    #[error("unexpected character {0:?}")]
    Unexpected(char),
}

impl Failure {
    /// The failure describing whatever sits at `cursor`: `Unexpected` with the
    /// next character, or `EndOfInput` when nothing is left.
    pub fn at(cursor: &str) -> Self {
        match cursor.chars().next() {
            Some(c) => Self::Unexpected(c),
            None => Self::EndOfInput,
        }
    }

    /// The offending character, if any.
    pub fn unexpected(&self) -> Option<char> {
        match self {
            Self::Unexpected(c) => Some(*c),
            Self::EndOfInput => None,
        }
    }
}

/// Payload of a successful parse. Which variant appears depends on the parser
/// that produced it.
///
/// Equality is structural except for `Custom`, which compares by identity:
/// two runs whose `map` transforms build fresh custom values produce replies
/// that are not `==` even when the values inside are the same. Compare those
/// through [`Value::downcast_ref`] instead.
#[derive(Debug, Clone)]
pub enum Value<'i> {
    /// From `char` and `satisfy`.
    Char(char),
    /// From `string` and `filter`; borrowed from the input.
    Str(&'i str),
    /// From `sequence` and `repeat`, one element per child success.
    List(Vec<Value<'i>>),
    /// From `integer`.
    Int(i64),
    /// Anything a `map` transform chooses to produce.
    Custom(Rc<dyn Any>),
}

impl<'i> Value<'i> {
    /// Wrap an arbitrary user value.
    pub fn custom<T: Any>(value: T) -> Self {
        Self::Custom(Rc::new(value))
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'i str> {
        match self {
            Self::Str(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value<'i>]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow a `Custom` payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(any) => any.downcast_ref(),
            _ => None,
        }
    }
}

// Custom payloads compare by identity; they carry no `PartialEq` bound.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => write!(f, "[{}]", items.iter().format(", ")),
            Self::Int(n) => write!(f, "{n}"),
            Self::Custom(_) => f.write_str("<custom>"),
        }
    }
}
