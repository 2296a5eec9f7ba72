use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use simplegram::{Grammar, MatchOutcome, Matcher, NonTerminal, DEFAULT_MAX_DEPTH};

/// Check that a grammar is simple, then match strings against it.
#[derive(Parser, Debug)]
#[command(name = "simplegram", version)]
struct Args {
    /// Grammar file with one `X -> body | body` rule per line.
    #[arg(short, long, required_unless_present = "rules", conflicts_with = "rules")]
    grammar: Option<PathBuf>,

    /// Grammar given inline, rules separated by `;`.
    #[arg(short, long)]
    rules: Option<String>,

    /// Non-terminal to derive inputs from.
    #[arg(short, long, default_value_t = 'S')]
    start: char,

    /// Reject inputs whose derivation nests deeper than this.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Strings to check. Read one per line from stdin when none are given.
    inputs: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = match (&args.grammar, &args.rules) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("read grammar file {}", path.display()))?,
        (None, Some(rules)) => rules.clone(),
        (None, None) => bail!("no grammar given"),
    };
    let grammar: Grammar = source.parse().context("parse grammar")?;
    let start = NonTerminal::new(args.start)?;

    print!("{}", grammar);
    let matcher = match Matcher::with_start(grammar, start) {
        Ok(matcher) => matcher.with_max_depth(args.max_depth),
        Err(defect) => {
            eprintln!("{}", defect);
            process::exit(1);
        }
    };
    println!("grammar is simple");

    if args.inputs.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            report(&matcher, line?.trim());
        }
    } else {
        for input in &args.inputs {
            report(&matcher, input);
        }
    }
    Ok(())
}

fn report(matcher: &Matcher, input: &str) {
    match matcher.parse(input) {
        MatchOutcome::Accepted { tree } => {
            println!("{:?}: accepted", input);
            print!("{}", tree.render());
        }
        MatchOutcome::Rejected => println!("{:?}: rejected", input),
    }
}
