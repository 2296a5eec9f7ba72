use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, multispace0, satisfy, space0},
    combinator::{map, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, tuple},
    IResult,
};

use crate::{is_non_terminal, Grammar, NonTerminal, Production, Rule};

/// Characters that end a rule body.
fn is_body_end(c: char) -> bool {
    c == '|' || c == ';' || c == '\n'
}

pub fn non_terminal(input: &str) -> IResult<&str, NonTerminal> {
    map(satisfy(is_non_terminal), NonTerminal)(input)
}

/// A single alternative. Surrounding blanks are trimmed, interior ones are
/// kept as terminals. An empty body is allowed here; rejecting it is left to
/// validation.
pub fn body(input: &str) -> IResult<&str, Production> {
    let (rem, matched) = take_till(is_body_end)(input)?;
    let trimmed = matched.trim_matches(|c: char| c == ' ' || c == '\t' || c == '\r');
    Ok((rem, Production::from(trimmed)))
}

pub fn rule(input: &str) -> IResult<&str, Rule> {
    let (rem, (_, lhs, _, _, productions)) = tuple((
        space0,
        non_terminal,
        space0,
        tag("->"),
        separated_list1(char('|'), body),
    ))(input)?;
    Ok((rem, Rule { lhs, productions }))
}

/// Rules separated by newlines and/or semicolons. Rules repeating a
/// non-terminal extend it.
pub fn grammar(input: &str) -> IResult<&str, Grammar> {
    let (rem, rules) = many0(delimited(multispace0, rule, opt(char(';'))))(input)?;
    let (rem, _) = multispace0(rem)?;

    let mut grammar = Grammar::new();
    for rule in rules {
        for production in rule.productions {
            grammar.push(rule.lhs, production);
        }
    }
    Ok((rem, grammar))
}
