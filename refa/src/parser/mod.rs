//! # refa parser
//! A hand-written recursive-descent parser for the regex dialect described
//! in [`crate::regex`]. The parser is single-pass with one character of
//! lookahead and no backtracking: it keeps a cursor into the input and only
//! ever peeks at an offset or consumes the next character.
//!
//! All errors are fail-fast and carry the character position (0-based) they
//! were detected at. Grammar violations are [`SyntaxError`]s; expressions
//! that parse but are invalid, like the reversed range in `[z-a]`, are
//! [`SemanticError`]s.
//!
//! ```
//! use refa::parser;
//!
//! let regex = parser::regex("(ab)+c?").unwrap();
//! assert!(regex.to_nfa().accepts("ababc"));
//!
//! // Quantifiers need a preceding atom:
//! assert!(parser::regex("*a").is_err());
//! // ...and ranges must be ordered:
//! assert!(parser::regex("[z-a]").is_err());
//! ```

use crate::regex::{Ast, Quantifier, Regex, SetItem};
use thiserror::Error;

/// An error from [`regex`], either a grammar violation or a semantically
/// invalid construct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// The regex violates the grammar. Positions are 0-based character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected '{found}' at position {position}")]
    Unexpected { found: char, position: usize },
    #[error("unmatched '(' at position {position}")]
    UnclosedGroup { position: usize },
    #[error("unmatched '[' at position {position}")]
    UnclosedSet { position: usize },
    #[error("quantifier '{quantifier}' at position {position} has no preceding atom")]
    DanglingQuantifier { quantifier: char, position: usize },
    #[error("trailing '\\' at position {position} with nothing to escape")]
    TrailingEscape { position: usize },
    #[error("empty character set at position {position}")]
    EmptySet { position: usize },
}

/// The regex is well-formed but semantically invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("invalid range {start}-{end} at position {position}: start exceeds end")]
    ReversedRange {
        start: char,
        end: char,
        position: usize,
    },
}

/// Parses a regular expression. The whole input must be consumed; the root
/// of the result is an alternation, so `a|b` needs no enclosing group.
pub fn regex(input: &str) -> Result<Regex, ParseError> {
    let mut parser = Parser::new(input);
    let alternatives = parser.alternation(true)?;
    debug_assert!(parser.peek(0).is_none(), "root alternation consumes all input");
    Ok(Regex {
        tree: Ast::Group(alternatives),
    })
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Parser {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek(0) == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// `Alternation := Concat ('|' Concat)*`. At root level a `)` is a
    /// syntax error; inside a group it ends the alternation and is left for
    /// the caller to consume.
    fn alternation(&mut self, is_root: bool) -> Result<Vec<Vec<Ast>>, ParseError> {
        let mut alternatives = vec![Vec::new()];
        while let Some(c) = self.peek(0) {
            match c {
                '(' => {
                    let open = self.pos;
                    self.bump();
                    let inner = self.alternation(false)?;
                    if !self.eat(')') {
                        return Err(SyntaxError::UnclosedGroup { position: open }.into());
                    }
                    let node = self.quantified(Ast::Group(inner));
                    alternatives.last_mut().unwrap().push(node);
                }
                ')' => {
                    if is_root {
                        return Err(SyntaxError::Unexpected {
                            found: ')',
                            position: self.pos,
                        }
                        .into());
                    }
                    break;
                }
                '[' => {
                    let open = self.pos;
                    self.bump();
                    let items = self.set(open)?;
                    if !self.eat(']') {
                        return Err(SyntaxError::UnclosedSet { position: open }.into());
                    }
                    let node = self.quantified(Ast::Set(items));
                    alternatives.last_mut().unwrap().push(node);
                }
                '|' => {
                    self.bump();
                    alternatives.push(Vec::new());
                }
                '\\' => {
                    let position = self.pos;
                    self.bump();
                    match self.bump() {
                        Some(escaped) => {
                            let node = self.quantified(Ast::Char(escaped));
                            alternatives.last_mut().unwrap().push(node);
                        }
                        None => {
                            return Err(SyntaxError::TrailingEscape { position }.into());
                        }
                    }
                }
                '.' => {
                    self.bump();
                    let node = self.quantified(Ast::Any);
                    alternatives.last_mut().unwrap().push(node);
                }
                '?' | '*' | '+' => {
                    return Err(SyntaxError::DanglingQuantifier {
                        quantifier: c,
                        position: self.pos,
                    }
                    .into());
                }
                _ => {
                    // `]` and `-` are ordinary literals outside a set.
                    self.bump();
                    let node = self.quantified(Ast::Char(c));
                    alternatives.last_mut().unwrap().push(node);
                }
            }
        }
        Ok(alternatives)
    }

    /// Attaches a quantifier to the atom that just completed, if one
    /// follows. A second quantifier in a row is caught by the caller's loop.
    fn quantified(&mut self, node: Ast) -> Ast {
        let quantifier = match self.peek(0) {
            Some('?') => Quantifier::Optional,
            Some('*') => Quantifier::Star,
            Some('+') => Quantifier::Plus,
            _ => return node,
        };
        self.bump();
        Ast::Quantified(Box::new(node), quantifier)
    }

    /// `Set := '[' SetItem+ ']'`, cursor positioned just after the `[`.
    /// Stops in front of the closing `]` without consuming it.
    ///
    /// An escaped character is always a literal and never a range endpoint,
    /// and `]` cannot end a range, so `[a-]` is an error rather than a read
    /// past the set.
    fn set(&mut self, open: usize) -> Result<Vec<SetItem>, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.peek(0) {
                None => return Err(SyntaxError::UnclosedSet { position: open }.into()),
                Some(']') => break,
                Some('\\') => {
                    let position = self.pos;
                    self.bump();
                    match self.bump() {
                        Some(escaped) => items.push(SetItem::Char(escaped)),
                        None => {
                            return Err(SyntaxError::TrailingEscape { position }.into());
                        }
                    }
                }
                Some('-') => {
                    return Err(SyntaxError::Unexpected {
                        found: '-',
                        position: self.pos,
                    }
                    .into());
                }
                Some(start) => match self.peek(2) {
                    Some(end) if self.peek(1) == Some('-') && end != ']' && end != '\\' => {
                        let position = self.pos;
                        self.pos += 3;
                        if start > end {
                            return Err(SemanticError::ReversedRange {
                                start,
                                end,
                                position,
                            }
                            .into());
                        }
                        items.push(SetItem::Range(start, end));
                    }
                    _ => {
                        self.bump();
                        items.push(SetItem::Char(start));
                    }
                },
            }
        }
        if items.is_empty() {
            return Err(SyntaxError::EmptySet { position: open }.into());
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::{Ast, Quantifier, SetItem};

    fn parse(input: &str) -> Ast {
        regex(input).unwrap().tree
    }

    #[test]
    fn literals_and_concatenation() {
        assert_eq!(
            parse("abc"),
            Ast::Group(vec![vec![Ast::Char('a'), Ast::Char('b'), Ast::Char('c')]])
        );
    }

    #[test]
    fn root_level_alternation() {
        assert_eq!(
            parse("a|b|c"),
            Ast::Group(vec![
                vec![Ast::Char('a')],
                vec![Ast::Char('b')],
                vec![Ast::Char('c')]
            ])
        );
    }

    #[test]
    fn empty_alternative_is_allowed() {
        assert_eq!(
            parse("a||b"),
            Ast::Group(vec![vec![Ast::Char('a')], vec![], vec![Ast::Char('b')]])
        );
    }

    #[test]
    fn quantifier_binds_to_last_atom() {
        assert_eq!(
            parse("ab*"),
            Ast::Group(vec![vec![
                Ast::Char('a'),
                Ast::Quantified(Box::new(Ast::Char('b')), Quantifier::Star)
            ]])
        );
    }

    #[test]
    fn group_with_quantifier() {
        assert_eq!(
            parse("(ab)+"),
            Ast::Group(vec![vec![Ast::Quantified(
                Box::new(Ast::Group(vec![vec![Ast::Char('a'), Ast::Char('b')]])),
                Quantifier::Plus
            )]])
        );
    }

    #[test]
    fn wildcard_vs_escaped_dot() {
        assert_eq!(parse("."), Ast::Group(vec![vec![Ast::Any]]));
        assert_eq!(parse("\\."), Ast::Group(vec![vec![Ast::Char('.')]]));
    }

    #[test]
    fn escape_always_yields_literal() {
        assert_eq!(
            parse("\\*\\\\"),
            Ast::Group(vec![vec![Ast::Char('*'), Ast::Char('\\')]])
        );
    }

    #[test]
    fn sets_with_ranges_and_escapes() {
        assert_eq!(
            parse("[a-zA\\-\\]]"),
            Ast::Group(vec![vec![Ast::Set(vec![
                SetItem::Range('a', 'z'),
                SetItem::Char('A'),
                SetItem::Char('-'),
                SetItem::Char(']'),
            ])]])
        );
    }

    #[test]
    fn closing_bracket_and_dash_are_literals_outside_sets() {
        assert_eq!(
            parse("a-b]"),
            Ast::Group(vec![vec![
                Ast::Char('a'),
                Ast::Char('-'),
                Ast::Char('b'),
                Ast::Char(']'),
            ]])
        );
    }

    #[test]
    fn unmatched_group() {
        assert_eq!(
            regex("(ab"),
            Err(SyntaxError::UnclosedGroup { position: 0 }.into())
        );
        assert_eq!(
            regex("ab)"),
            Err(SyntaxError::Unexpected {
                found: ')',
                position: 2
            }
            .into())
        );
    }

    #[test]
    fn unmatched_set() {
        assert_eq!(
            regex("x[ab"),
            Err(SyntaxError::UnclosedSet { position: 1 }.into())
        );
    }

    #[test]
    fn dangling_quantifiers_are_rejected() {
        assert_eq!(
            regex("*a"),
            Err(SyntaxError::DanglingQuantifier {
                quantifier: '*',
                position: 0
            }
            .into())
        );
        assert_eq!(
            regex("a|+b"),
            Err(SyntaxError::DanglingQuantifier {
                quantifier: '+',
                position: 2
            }
            .into())
        );
        assert_eq!(
            regex("(?a)"),
            Err(SyntaxError::DanglingQuantifier {
                quantifier: '?',
                position: 1
            }
            .into())
        );
        assert_eq!(
            regex("a*?"),
            Err(SyntaxError::DanglingQuantifier {
                quantifier: '?',
                position: 2
            }
            .into())
        );
    }

    #[test]
    fn trailing_escape() {
        assert_eq!(
            regex("ab\\"),
            Err(SyntaxError::TrailingEscape { position: 2 }.into())
        );
        assert_eq!(
            regex("[a\\"),
            Err(SyntaxError::TrailingEscape { position: 2 }.into())
        );
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(regex("a[]b"), Err(SyntaxError::EmptySet { position: 1 }.into()));
    }

    #[test]
    fn reversed_range_is_semantic_error() {
        assert_eq!(
            regex("[z-a]"),
            Err(SemanticError::ReversedRange {
                start: 'z',
                end: 'a',
                position: 1
            }
            .into())
        );
    }

    #[test]
    fn degenerate_range_is_allowed() {
        assert_eq!(
            parse("[a-a]"),
            Ast::Group(vec![vec![Ast::Set(vec![SetItem::Range('a', 'a')])]])
        );
    }

    #[test]
    fn bare_dash_in_set_is_rejected() {
        assert_eq!(
            regex("[-a]"),
            Err(SyntaxError::Unexpected {
                found: '-',
                position: 1
            }
            .into())
        );
        assert_eq!(
            regex("[a-]"),
            Err(SyntaxError::Unexpected {
                found: '-',
                position: 2
            }
            .into())
        );
    }
}
