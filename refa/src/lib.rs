//!# refa
//!
//! `refa` compiles regular expressions to finite automata: a hand-written
//! recursive-descent parser builds the syntax tree, a Thompson construction
//! turns it into an NFA with ε-transitions, and a subset-construction plus
//! partition-refinement pipeline produces an equivalent minimized DFA. The
//! automata can be matched against strings directly, persisted as JSON, and
//! rendered with Graphviz.
//!
//! ## Usage
//!
//! ```rust
//! use refa::parser;
//!
//! fn main() {
//!     // Parse and compile to an NFA
//!     let regex = parser::regex("[bc]*(cd)+").unwrap();
//!     let nfa = regex.to_nfa();
//!     assert!(nfa.accepts("bcbccd"));
//!     assert!(!nfa.accepts("bcb"));
//!
//!     // Determinize and minimize; all three accept the same language
//!     let dfa = nfa.to_dfa();
//!     let min = dfa.minimize();
//!     assert!(dfa.accepts("cdcd"));
//!     assert!(min.accepts("cdcd"));
//!     assert!(min.states().len() <= dfa.states().len());
//!
//!     // Persist the NFA and load it back unchanged
//!     let doc = refa::nfa::json::to_value(&nfa);
//!     let reloaded = refa::nfa::json::from_value(&doc).unwrap();
//!     assert_eq!(nfa, reloaded);
//! }
//! ```
//!
//! ## The accepted language
//!
//! Literal characters, `\x` escapes (always yielding the literal `x`), the
//! `.` wildcard, `|` alternation, `(...)` groups, `[...]` character sets
//! with `a-b` ranges, and the postfix quantifiers `?`, `*`, `+`. An
//! unescaped `.` is the wildcard; `\.` matches only a literal dot. Anchors,
//! back-references, lookaround and bounded quantifiers are not supported.
//!
//! ## Label opacity
//!
//! Transition labels (single characters, the wildcard, the escaped dot and
//! `a-b` ranges) are opaque symbols to the determinizer and minimizer, so
//! `a`, `.` and `a-z` are three distinct alphabet entries even though they
//! overlap as character classes. The minimized DFA is minimal *as a symbol
//! recognizer* over that alphabet, not necessarily as a character-class
//! recognizer, and matching a DFA against characters walks a small frontier
//! of states (see [`dfa::DfaEvaluator`]). Ranges are never expanded into
//! individual characters; only the matcher interprets them.
//!
//! ## Operations
//!
//! * [Parsing regular expressions](parser::regex)
//! * [Compiling a regex to an NFA](regex::Regex::to_nfa)
//! * Checking if a string is accepted by an [NFA](nfa::Nfa::accepts) or
//!   [DFA](dfa::Dfa::accepts), with step-by-step
//!   [evaluators](nfa::NfaEvaluator)
//! * [Converting an NFA to a DFA](nfa::Nfa::to_dfa) by subset construction
//! * [Minimizing a DFA](dfa::Dfa::minimize) by partition refinement
//! * [Saving](nfa::json::write) and [loading](nfa::json::read) NFAs as
//!   JSON, and [saving DFAs](dfa::json::write)
//! * [Rendering](dot) either automaton with Graphviz

pub mod dfa;
pub mod dot;
mod label;
pub mod nfa;
pub mod parser;
pub mod regex;

pub use label::{InvalidLabel, Label};
