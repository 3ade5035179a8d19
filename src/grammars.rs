//! Small grammars built from the combinators, used by the `parcomb` binary.

use std::fmt;

use crate::context::{Context, GrammarError, Parser};
use crate::reply::{Reply, Success, Value};

/// Balanced `[`/`]` with arbitrary other text between them.
pub fn brackets(ctx: &mut Context) -> Result<Parser, GrammarError> {
    let slot = ctx.slot();
    let run = ctx.filter(|c| c != '[' && c != ']');
    let text = ctx.not_empty_repeat(run);
    let open = ctx.char('[');
    let inner = ctx.ptr(slot);
    let close = ctx.char(']');
    let group = ctx.sequence([open, inner, close]);
    let item = ctx.branch([text, group]);
    let body = ctx.repeat(item);
    ctx.bind(slot, body)?;
    Ok(body)
}

/// Whitespace-separated integers, producing a list of [`Value::Int`].
pub fn integer_list(ctx: &mut Context) -> Result<Parser, GrammarError> {
    let space = ctx.anyspace();
    let gap = ctx.repeat(space);
    let int = ctx.integer();
    let spaced = ctx.sequence([int, gap]);
    let item = ctx.map(spaced, |s| nth(s, 0));
    let items = ctx.repeat(item);
    let list = ctx.sequence([gap, items]);
    Ok(ctx.map(list, |s| nth(s, 1)))
}

fn nth(success: Success<'_>, index: usize) -> Reply<'_> {
    let value = success.value.as_list().and_then(|items| items.get(index)).cloned();
    Ok(Success {
        value: value.unwrap_or(Value::List(vec![])),
        rest: success.rest,
    })
}

/// One brainfuck instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Left,
    Right,
    Put,
    Get,
    Loop(Vec<Op>),
}

const OPCODES: [(char, Op); 6] = [
    ('+', Op::Plus),
    ('-', Op::Minus),
    ('<', Op::Left),
    ('>', Op::Right),
    ('.', Op::Put),
    (',', Op::Get),
];

/// A brainfuck program. Each instruction becomes a [`Value::Custom`] holding
/// an [`Op`]; use [`program`] to collect them.
///
/// Only the eight instruction characters are accepted.
pub fn brainfuck(ctx: &mut Context) -> Result<Parser, GrammarError> {
    let slot = ctx.slot();

    let mut simple = Vec::with_capacity(OPCODES.len());
    for (c, op) in OPCODES {
        let p = ctx.char(c);
        simple.push(ctx.map(p, move |s| Ok(s.with_value(Value::custom(op.clone())))));
    }
    let simple = ctx.branch(simple);

    let open = ctx.char('[');
    let body = ctx.ptr(slot);
    let close = ctx.char(']');
    let looped = ctx.sequence([open, body, close]);
    let looped = ctx.map(looped, |s| {
        let ops = s.value.as_list().and_then(|items| items.get(1)).map(program);
        Ok(s.with_value(Value::custom(Op::Loop(ops.unwrap_or_default()))))
    });

    let instruction = ctx.branch([simple, looped]);
    let instructions = ctx.repeat(instruction);
    ctx.bind(slot, instructions)?;
    Ok(instructions)
}

/// Collect the [`Op`]s of a list produced by [`brainfuck`].
pub fn program(value: &Value<'_>) -> Vec<Op> {
    value
        .as_list()
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.downcast_ref::<Op>())
        .cloned()
        .collect()
}

/// Indented listing of a program, one instruction per line, loop bodies
/// prefixed by one `| ` per nesting level.
pub struct Listing<'a>(pub &'a [Op]);

impl Listing<'_> {
    fn write(ops: &[Op], level: usize, out: &mut Vec<String>) {
        for op in ops {
            let name = match op {
                Op::Plus => "plus",
                Op::Minus => "minus",
                Op::Left => "left",
                Op::Right => "right",
                Op::Put => "put",
                Op::Get => "get",
                Op::Loop(body) => {
                    out.push(format!("{}loop", "| ".repeat(level)));
                    Self::write(body, level + 1, out);
                    continue;
                }
            };
            out.push(format!("{}{name}", "| ".repeat(level)));
        }
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        Self::write(self.0, 0, &mut lines);
        f.write_str(&lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Failure;

    fn run_with(
        build: fn(&mut Context) -> Result<Parser, GrammarError>,
        input: &str,
    ) -> Result<String, Failure> {
        let mut ctx = Context::new();
        let p = build(&mut ctx).unwrap();
        ctx.run(p, input).map(|s| s.value.to_string())
    }

    // --- brackets ---

    #[test]
    fn brackets_accepts_balanced() {
        let mut ctx = Context::new();
        let p = brackets(&mut ctx).unwrap();
        let success = ctx.run(p, "[[]][]").unwrap();
        assert_eq!(success.rest, "");
        assert_eq!(success.value.as_list().map(<[_]>::len), Some(2));
    }

    #[test]
    fn brackets_accepts_text_between() {
        assert!(run_with(brackets, "a[b[c]d]e").is_ok());
        assert!(run_with(brackets, "").is_ok());
        assert!(run_with(brackets, "plain").is_ok());
    }

    #[test]
    fn brackets_rejects_unbalanced() {
        assert_eq!(run_with(brackets, "[[]"), Err(Failure::Unexpected('[')));
        assert_eq!(run_with(brackets, "[]]"), Err(Failure::Unexpected(']')));
    }

    #[test]
    fn brackets_grammar_is_complete() {
        let mut ctx = Context::new();
        let p = brackets(&mut ctx).unwrap();
        assert_eq!(ctx.check(p), Ok(()));
    }

    // --- integer_list ---

    #[test]
    fn integer_list_values() {
        assert_eq!(run_with(integer_list, " 1 22\n333\t").as_deref(), Ok("[1, 22, 333]"));
        assert_eq!(run_with(integer_list, "").as_deref(), Ok("[]"));
    }

    #[test]
    fn integer_list_rejects_words() {
        assert_eq!(run_with(integer_list, "1 two"), Err(Failure::Unexpected('t')));
    }

    // --- brainfuck ---

    #[test]
    fn brainfuck_builds_op_tree() {
        let mut ctx = Context::new();
        let p = brainfuck(&mut ctx).unwrap();
        let success = ctx.run(p, "+[->+<].").unwrap();
        assert_eq!(
            program(&success.value),
            vec![
                Op::Plus,
                Op::Loop(vec![Op::Minus, Op::Right, Op::Plus, Op::Left]),
                Op::Put,
            ]
        );
    }

    #[test]
    fn brainfuck_nested_loops() {
        let mut ctx = Context::new();
        let p = brainfuck(&mut ctx).unwrap();
        let success = ctx.run(p, "[[,]]").unwrap();
        assert_eq!(
            program(&success.value),
            vec![Op::Loop(vec![Op::Loop(vec![Op::Get])])]
        );
    }

    #[test]
    fn brainfuck_rejects_unclosed_loop() {
        assert_eq!(run_with(brainfuck, "+[-"), Err(Failure::Unexpected('[')));
        assert_eq!(run_with(brainfuck, "+x"), Err(Failure::Unexpected('x')));
    }

    #[test]
    fn listing_indents_loop_bodies() {
        let ops = vec![Op::Plus, Op::Loop(vec![Op::Minus, Op::Loop(vec![Op::Put])])];
        assert_eq!(
            Listing(&ops).to_string(),
            "plus\nloop\n| minus\n| loop\n| | put"
        );
    }
}
