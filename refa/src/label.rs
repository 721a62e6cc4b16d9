use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A symbol on a non-ε transition.
///
/// Labels are opaque to the determinizer and minimizer: `Char('a')`, `Any`
/// and `Range('a', 'z')` are three distinct alphabet symbols even though
/// they overlap as character classes. Only the matcher interprets them
/// against input characters, via [`Label::matches`].
///
/// `Char('.')` is the escaped-dot label produced by `\.` and is written
/// `\.` on the wire, which keeps it distinct from the [`Label::Any`]
/// wildcard written `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// A single literal character.
    Char(char),
    /// The `.` wildcard, matching any single character.
    Any,
    /// An inclusive code point range `a-b`.
    Range(char, char),
}

impl Label {
    /// Checks whether an input character is matched by this label.
    pub fn matches(self, c: char) -> bool {
        match self {
            Label::Any => true,
            Label::Char(l) => l == c,
            Label::Range(start, end) => start <= c && c <= end,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Any => f.write_str("."),
            Label::Char('.') => f.write_str("\\."),
            Label::Char(c) => write!(f, "{c}"),
            Label::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

/// Error returned when a string is not a valid wire form of a [`Label`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition label '{0}'")]
pub struct InvalidLabel(pub String);

impl FromStr for Label {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            ['.'] => Ok(Label::Any),
            ['\\', '.'] => Ok(Label::Char('.')),
            [c] => Ok(Label::Char(*c)),
            [start, '-', end] => Ok(Label::Range(*start, *end)),
            _ => Err(InvalidLabel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_rule() {
        assert!(Label::Any.matches('x'));
        assert!(Label::Any.matches('.'));
        assert!(Label::Char('a').matches('a'));
        assert!(!Label::Char('a').matches('b'));
        assert!(Label::Char('.').matches('.'));
        assert!(!Label::Char('.').matches('a'));
        assert!(Label::Range('a', 'z').matches('a'));
        assert!(Label::Range('a', 'z').matches('m'));
        assert!(Label::Range('a', 'z').matches('z'));
        assert!(!Label::Range('a', 'z').matches('A'));
    }

    #[test]
    fn wire_round_trip() {
        for label in [
            Label::Char('a'),
            Label::Char('-'),
            Label::Char('.'),
            Label::Any,
            Label::Range('0', '9'),
        ] {
            assert_eq!(label.to_string().parse::<Label>().unwrap(), label);
        }
    }

    #[test]
    fn wildcard_and_escaped_dot_are_distinct() {
        assert_eq!(".".parse::<Label>().unwrap(), Label::Any);
        assert_eq!("\\.".parse::<Label>().unwrap(), Label::Char('.'));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Label>().is_err());
        assert!("ab".parse::<Label>().is_err());
        assert!("a-b-c".parse::<Label>().is_err());
    }
}
