use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use itertools::Itertools;
use phf::{Map, phf_map};

use parcomb::grammars::{self, Listing};
use parcomb::tracing_config::init_tracing;
use parcomb::{Context, GrammarError, Value};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grammar to parse with
    #[arg(value_name = "GRAMMAR")]
    grammar: String,

    /// Text to parse; read from stdin when neither this nor --file is given
    #[arg(value_name = "INPUT", conflicts_with = "file")]
    input: Option<String>,

    /// Read the text to parse from a file
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,
}

struct GrammarInfo {
    build: fn(&mut Context) -> Result<parcomb::Parser, GrammarError>,
    render: fn(&Value<'_>) -> String,
    about: &'static str,
}

/// Grammars selectable from the command line, keyed by name.
const GRAMMARS: Map<&'static str, GrammarInfo> = phf_map! {
    "bf" => GrammarInfo {
        build: grammars::brainfuck,
        render: render_program,
        about: "brainfuck program, printed as an indented instruction listing",
    },
    "brackets" => GrammarInfo {
        build: grammars::brackets,
        render: render_value,
        about: "balanced [ ] with any other text in between",
    },
    "integers" => GrammarInfo {
        build: grammars::integer_list,
        render: render_value,
        about: "whitespace-separated integers",
    },
};

fn render_program(value: &Value<'_>) -> String {
    Listing(&grammars::program(value)).to_string()
}

fn render_value(value: &Value<'_>) -> String {
    value.to_string()
}

fn grammar_info(name: &str) -> Result<&'static GrammarInfo> {
    GRAMMARS.get(name).ok_or_else(|| {
        let known = GRAMMARS
            .entries()
            .sorted_by_key(|(name, _)| **name)
            .map(|(name, info)| format!("  {name:<10}{}", info.about))
            .join("\n");
        anyhow!("unknown grammar '{name}', expected one of:\n{known}")
    })
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(text) = &args.input {
        return Ok(text.clone());
    }
    let mut text = String::new();
    match &args.file {
        Some(path) => {
            text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
        }
    }
    Ok(text)
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let info = grammar_info(&args.grammar)?;
    let text = read_input(&args)?;
    let input = text.trim_end_matches(['\n', '\r']);

    let mut ctx = Context::new();
    let parser = (info.build)(&mut ctx)?;
    let status = match ctx.run(parser, input) {
        Ok(success) => {
            println!("{}", (info.render)(&success.value));
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{}: {failure}", args.grammar);
            ExitCode::FAILURE
        }
    };
    ctx.teardown();
    Ok(status)
}
