//! Validator properties over generated grammars with non-terminals `S`, `B`
//! and `C`.

use grammar::{Grammar, GrammarDefect, NonTerminal};
use proptest::prelude::*;
use proptest::sample::subsequence;

fn build(rules: &[(char, Vec<String>)]) -> Grammar {
    Grammar::from_rules(
        rules
            .iter()
            .map(|(name, bodies)| (*name, bodies.iter().map(String::as_str).collect::<Vec<_>>())),
    )
    .unwrap()
}

fn tail() -> impl Strategy<Value = String> {
    "[abcSBC]{0,3}"
}

/// Non-empty productions for `nt` with distinct leading symbols, none of
/// which is `nt` itself.
fn well_formed(nt: char) -> impl Strategy<Value = Vec<String>> {
    let leads: Vec<char> = "abcdSBC".chars().filter(|&c| c != nt).collect();
    subsequence(leads, 1..=3).prop_flat_map(|leads| {
        leads
            .into_iter()
            .map(|lead| tail().prop_map(move |t| format!("{}{}", lead, t)))
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn well_formed_grammars_pass(s in well_formed('S'), b in well_formed('B'), c in well_formed('C')) {
        let g = build(&[('S', s), ('B', b), ('C', c)]);
        prop_assert_eq!(g.validate(), Ok(()));
    }

    #[test]
    fn left_recursion_is_rejected(rest in well_formed('S'), b in well_formed('B'), t in tail(), at in 0usize..4) {
        let mut s = rest;
        let at = at.min(s.len());
        s.insert(at, format!("S{}", t));
        let g = build(&[('S', s), ('B', b)]);
        prop_assert_eq!(
            g.validate(),
            Err(GrammarDefect::LeftRecursion { non_terminal: NonTerminal('S') })
        );
    }

    #[test]
    fn empty_production_is_rejected(s in well_formed('S'), rest in well_formed('B'), at in 0usize..4) {
        let mut b = rest;
        let at = at.min(b.len());
        b.insert(at, String::new());
        let g = build(&[('S', s), ('B', b)]);
        prop_assert_eq!(
            g.validate(),
            Err(GrammarDefect::EmptyProduction { non_terminal: NonTerminal('B') })
        );
    }

    #[test]
    fn duplicate_leading_symbol_is_rejected(
        s in well_formed('S'),
        rest in well_formed('B'),
        c in well_formed('C'),
        t in tail(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut b = rest;
        let lead = pick.get(&b).chars().next().unwrap();
        b.push(format!("{}{}", lead, t));
        let g = build(&[('S', s), ('B', b), ('C', c)]);
        prop_assert_eq!(
            g.validate(),
            Err(GrammarDefect::DuplicateLeadingSymbol { non_terminal: NonTerminal('B') })
        );
    }
}
