//! # Regular expressions
//! The surface language is a small, classic dialect: literal characters, the
//! `.` wildcard, `\x` escapes (always yielding the literal `x`), `(...)`
//! groups, `|` alternation, `[...]` character sets with `a-b` ranges, and the
//! postfix quantifiers `?`, `*` and `+`. Anchors, back-references, lookaround
//! and bounded quantifiers are not part of the language.
//!
//! A [`Regex`] is produced by [`crate::parser::regex`] and its only operation
//! is [`Regex::to_nfa`], which runs the Thompson construction: every node of
//! the syntax tree becomes a fragment with exactly one start and one accept
//! state, and fragments compose with ε-transitions in O(1) per combinator.
//!
//! ```
//! let regex = refa::parser::regex("a+b?").unwrap();
//! let nfa = regex.to_nfa();
//! assert!(nfa.accepts("aaab"));
//! assert!(nfa.accepts("a"));
//! assert!(!nfa.accepts("b"));
//! ```

use crate::label::Label;
use crate::nfa::{Nfa, NfaState};
use std::fmt;

/// A parsed regular expression, ready to be compiled to an NFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pub tree: Ast,
}

/// A node of the regex syntax tree.
///
/// The root of a parse is always a [`Ast::Group`]; each alternative of a
/// group is an ordered sequence of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// One or more `|`-separated alternatives. Also the root node.
    Group(Vec<Vec<Ast>>),
    /// A single literal character.
    Char(char),
    /// The `.` wildcard.
    Any,
    /// A character set `[...]`, a flat list of literals and ranges.
    Set(Vec<SetItem>),
    /// A quantified atom.
    Quantified(Box<Ast>, Quantifier),
}

/// A single item of a character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetItem {
    Char(char),
    /// Inclusive code point range with start ≤ end.
    Range(char, char),
}

/// A postfix quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `?`, zero or one.
    Optional,
    /// `*`, zero or more.
    Star,
    /// `+`, one or more.
    Plus,
}

/// A sub-NFA under construction, with a unique start and accept state.
///
/// The start has no incoming edges within the fragment and the accept no
/// outgoing ones, so fragments compose with single ε-edges.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: usize,
    accept: usize,
}

/// Arena the Thompson construction allocates states into. State IDs are
/// indices into `states` and stay stable through composition.
#[derive(Debug, Default)]
struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    fn state(&mut self) -> usize {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    /// `start --label--> accept`
    fn literal(&mut self, label: Label) -> Fragment {
        let start = self.state();
        let accept = self.state();
        self.states[start]
            .transitions
            .entry(label)
            .or_default()
            .insert(accept);
        self.states[accept].accepting = true;
        Fragment { start, accept }
    }

    /// `start --ε--> accept`, the fragment of the empty sequence.
    fn epsilon(&mut self) -> Fragment {
        let start = self.state();
        let accept = self.state();
        self.states[start].epsilon.insert(accept);
        self.states[accept].accepting = true;
        Fragment { start, accept }
    }

    /// Chains fragments with `accept(A) --ε--> start(B)`, clearing the
    /// intermediate accept flags.
    fn concat(&mut self, seq: &[Ast]) -> Fragment {
        let fragments: Vec<Fragment> = seq.iter().map(|node| self.build(node)).collect();
        match (fragments.first(), fragments.last()) {
            (Some(first), Some(last)) => {
                let joined = Fragment {
                    start: first.start,
                    accept: last.accept,
                };
                for pair in fragments.windows(2) {
                    self.states[pair[0].accept].accepting = false;
                    self.states[pair[0].accept].epsilon.insert(pair[1].start);
                }
                joined
            }
            _ => self.epsilon(),
        }
    }

    /// Fresh start and accept, ε-edges into every alternative and out of its
    /// accept. `None` stands for an empty alternative, which contributes a
    /// direct `start --ε--> accept`.
    fn alternation(&mut self, alternatives: Vec<Option<Fragment>>) -> Fragment {
        let start = self.state();
        let accept = self.state();
        for alternative in alternatives {
            match alternative {
                Some(fragment) => {
                    self.states[start].epsilon.insert(fragment.start);
                    self.states[fragment.accept].accepting = false;
                    self.states[fragment.accept].epsilon.insert(accept);
                }
                None => {
                    self.states[start].epsilon.insert(accept);
                }
            }
        }
        self.states[accept].accepting = true;
        Fragment { start, accept }
    }

    fn quantify(&mut self, fragment: Fragment, quantifier: Quantifier) -> Fragment {
        let start = self.state();
        let accept = self.state();
        let Fragment {
            start: inner_start,
            accept: inner_accept,
        } = fragment;
        self.states[inner_accept].accepting = false;
        match quantifier {
            Quantifier::Optional => {
                self.states[start].epsilon.extend([inner_start, accept]);
                self.states[inner_accept].epsilon.insert(accept);
            }
            Quantifier::Star => {
                self.states[start].epsilon.extend([inner_start, accept]);
                // Loop back through the new start so the body can repeat.
                self.states[inner_accept].epsilon.extend([start, accept]);
            }
            Quantifier::Plus => {
                self.states[start].epsilon.insert(inner_start);
                self.states[inner_accept].epsilon.extend([inner_start, accept]);
            }
        }
        self.states[accept].accepting = true;
        Fragment { start, accept }
    }

    fn build(&mut self, node: &Ast) -> Fragment {
        match node {
            Ast::Char(c) => self.literal(Label::Char(*c)),
            Ast::Any => self.literal(Label::Any),
            Ast::Set(items) => {
                let fragments = items
                    .iter()
                    .map(|item| {
                        let label = match item {
                            SetItem::Char(c) => Label::Char(*c),
                            SetItem::Range(start, end) => Label::Range(*start, *end),
                        };
                        Some(self.literal(label))
                    })
                    .collect();
                self.alternation(fragments)
            }
            Ast::Group(alternatives) => {
                if alternatives.len() == 1 {
                    self.concat(&alternatives[0])
                } else {
                    let fragments = alternatives
                        .iter()
                        .map(|seq| (!seq.is_empty()).then(|| self.concat(seq)))
                        .collect();
                    self.alternation(fragments)
                }
            }
            Ast::Quantified(inner, quantifier) => {
                let fragment = self.build(inner);
                self.quantify(fragment, *quantifier)
            }
        }
    }
}

impl Regex {
    /// Compiles this regular expression to an NFA using the Thompson
    /// construction. The result has exactly one start and one accept state;
    /// range labels are kept atomic and only expanded by the matcher.
    pub fn to_nfa(&self) -> Nfa {
        let mut builder = Builder::default();
        let fragment = builder.build(&self.tree);
        log::debug!(
            "thompson construction produced {} states",
            builder.states.len()
        );
        Nfa::new(builder.states, fragment.start, fragment.accept)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The root group is printed without enclosing parentheses.
        if let Ast::Group(alternatives) = &self.tree {
            write_alternatives(alternatives, f)
        } else {
            write_node(&self.tree, f)
        }
    }
}

fn write_alternatives(alternatives: &[Vec<Ast>], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (idx, seq) in alternatives.iter().enumerate() {
        if idx > 0 {
            f.write_str("|")?;
        }
        for node in seq {
            write_node(node, f)?;
        }
    }
    Ok(())
}

fn write_node(node: &Ast, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match node {
        Ast::Group(alternatives) => {
            f.write_str("(")?;
            write_alternatives(alternatives, f)?;
            f.write_str(")")
        }
        Ast::Char(c) => {
            if matches!(c, '(' | ')' | '[' | '|' | '?' | '+' | '*' | '.' | '\\') {
                write!(f, "\\{c}")
            } else {
                write!(f, "{c}")
            }
        }
        Ast::Any => f.write_str("."),
        Ast::Set(items) => {
            f.write_str("[")?;
            for item in items {
                match item {
                    SetItem::Char(c) => {
                        if matches!(c, ']' | '\\' | '-') {
                            write!(f, "\\{c}")?;
                        } else {
                            write!(f, "{c}")?;
                        }
                    }
                    SetItem::Range(start, end) => write!(f, "{start}-{end}")?,
                }
            }
            f.write_str("]")
        }
        Ast::Quantified(inner, quantifier) => {
            write_node(inner, f)?;
            f.write_str(match quantifier {
                Quantifier::Optional => "?",
                Quantifier::Star => "*",
                Quantifier::Plus => "+",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_accept_state() {
        for pattern in ["a", "a|b|c", "[bc]*(cd)+", "a+b?", "(a|)(b|c)*", "\\."] {
            let nfa = crate::parser::regex(pattern).unwrap().to_nfa();
            let accepting = nfa
                .states()
                .iter()
                .filter(|state| state.is_accepting())
                .count();
            assert_eq!(accepting, 1, "{pattern} should have one accept state");
        }
    }

    #[test]
    fn thompson_endpoints_have_no_stray_edges() {
        let nfa = crate::parser::regex("(ab|cd)*").unwrap().to_nfa();
        let accept = nfa.accept_index();
        let accept_state = &nfa.states()[accept];
        assert!(accept_state.transitions().is_empty());
        assert!(accept_state.epsilon_transitions().is_empty());
    }

    #[test]
    fn display_round_trips_through_parser() {
        for pattern in ["a|b|c", "[bc]*(cd)+", "a+b?", "\\.", "[a-z\\-]+", "x(|y)"] {
            let regex = crate::parser::regex(pattern).unwrap();
            let reparsed = crate::parser::regex(&regex.to_string()).unwrap();
            assert_eq!(regex, reparsed, "{pattern}");
        }
    }
}
