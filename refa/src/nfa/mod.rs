//! # Nondeterministic finite automaton with ε-moves
//! The [`Nfa`] produced by the Thompson construction
//! ([`crate::regex::Regex::to_nfa`]) is a directed graph of states with
//! dense integer IDs, stored in an index-addressed arena so that the `*`
//! and `+` back-edges never create ownership cycles.
//!
//! Each state carries labeled transitions (a map from [`Label`] to a set of
//! target states) and a separate set of ε-transitions. A compiled NFA has
//! exactly one start state and exactly one accept state, and every state is
//! reachable from the start.
//!
//! ## Matching
//! [`Nfa::accepts`] interprets the automaton directly, keeping a frontier of
//! states that starts as the ε-closure of the start state. Each input
//! character moves the frontier across every transition whose label matches
//! it and closes the result under ε again; an empty frontier rejects
//! immediately. See [`NfaEvaluator`] for the step-by-step form.
//!
//! ```
//! let nfa = refa::parser::regex("[bc]*(cd)+").unwrap().to_nfa();
//! assert!(nfa.accepts("bcbccd"));
//! assert!(nfa.accepts("cdcd"));
//! assert!(!nfa.accepts("bcb"));
//! ```
//!
//! ## Determinization
//! [`Nfa::to_dfa`] runs the subset construction over the label alphabet.
//! Labels stay opaque: `a`, `.` and `a-z` are distinct alphabet symbols even
//! though they overlap as character classes, which keeps the construction
//! finite and mirrors the behavior of the automaton being simulated. A DFA
//! state is the canonical set of NFA state IDs it subsumes, and transitions
//! into the empty set are omitted (the sink stays implicit).

use crate::dfa::{Dfa, DfaState};
use crate::label::Label;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub use eval::NfaEvaluator;

pub mod eval;
pub mod json;

/// A nondeterministic finite automaton with ε-moves, one start state and
/// one accept state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: usize,
    pub(crate) accept: usize,
}

/// A state in an NFA: its accept flag, labeled transitions and
/// ε-transitions. The state's ID is its index in [`Nfa::states`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) accepting: bool,
    pub(crate) transitions: BTreeMap<Label, BTreeSet<usize>>,
    pub(crate) epsilon: BTreeSet<usize>,
}

impl NfaState {
    /// Checks if this state is the accept state.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Gets the labeled transitions, as sets of state indices per label.
    pub fn transitions(&self) -> &BTreeMap<Label, BTreeSet<usize>> {
        &self.transitions
    }

    /// Gets the ε-transitions as a set of state indices.
    pub fn epsilon_transitions(&self) -> &BTreeSet<usize> {
        &self.epsilon
    }
}

impl Nfa {
    pub(crate) fn new(states: Vec<NfaState>, start: usize, accept: usize) -> Self {
        debug_assert!(states[accept].accepting);
        Nfa {
            states,
            start,
            accept,
        }
    }

    /// Gets the states of this NFA, indexed by state ID.
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    /// Gets the ID of the start state.
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Gets the ID of the accept state.
    pub fn accept_index(&self) -> usize {
        self.accept
    }

    /// The label alphabet Σ: every label appearing on a non-ε transition.
    pub fn alphabet(&self) -> BTreeSet<Label> {
        self.states
            .iter()
            .flat_map(|state| state.transitions.keys().copied())
            .collect()
    }

    /// Gives the ε-closure of a state, or `None` if the ID is out of range.
    pub fn closure(&self, start: usize) -> Option<BTreeSet<usize>> {
        (start < self.states.len()).then(|| self.closure_of([start]))
    }

    /// The smallest superset of `seed` closed under ε-transitions.
    pub(crate) fn closure_of(&self, seed: impl IntoIterator<Item = usize>) -> BTreeSet<usize> {
        let mut all: BTreeSet<usize> = seed.into_iter().collect();
        let mut stack: Vec<usize> = all.iter().copied().collect();
        while let Some(state) = stack.pop() {
            for &target in &self.states[state].epsilon {
                if all.insert(target) {
                    stack.push(target);
                }
            }
        }
        all
    }

    /// Checks if this automaton accepts the given string. Equivalent to
    /// stepping an [`NfaEvaluator`] over every character.
    pub fn accepts(&self, input: &str) -> bool {
        let mut eval = self.evaluator();
        for c in input.chars() {
            eval.step(c);
            if eval.is_stuck() {
                return false;
            }
        }
        eval.is_accepting()
    }

    /// Gets an evaluator positioned on the ε-closure of the start state.
    pub fn evaluator(&self) -> NfaEvaluator<'_> {
        self.into()
    }

    /// Converts this NFA to a DFA using the subset construction. Each DFA
    /// state is identified by the canonical (sorted) set of NFA state IDs it
    /// subsumes and is accepting iff that set contains the accept state.
    /// Transitions leading to the empty set are omitted; only reachable
    /// subsets are materialized.
    pub fn to_dfa(&self) -> Dfa {
        let alphabet: Vec<Label> = self.alphabet().into_iter().collect();

        let start_key = self.closure_of([self.start]);
        let mut states = vec![DfaState {
            accepting: start_key.contains(&self.accept),
            nfa_ids: start_key.clone(),
            transitions: BTreeMap::new(),
        }];
        let mut index_of: HashMap<BTreeSet<usize>, usize> = HashMap::new();
        index_of.insert(start_key, 0);

        let mut worklist = vec![0usize];
        while let Some(current) = worklist.pop() {
            let key = states[current].nfa_ids.clone();
            for &label in &alphabet {
                let mut moved = BTreeSet::new();
                for &state in &key {
                    if let Some(targets) = self.states[state].transitions.get(&label) {
                        moved.extend(targets.iter().copied());
                    }
                }
                if moved.is_empty() {
                    continue;
                }
                let closure = self.closure_of(moved);
                let target = match index_of.get(&closure) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = states.len();
                        states.push(DfaState {
                            accepting: closure.contains(&self.accept),
                            nfa_ids: closure.clone(),
                            transitions: BTreeMap::new(),
                        });
                        index_of.insert(closure, fresh);
                        worklist.push(fresh);
                        fresh
                    }
                };
                states[current].transitions.insert(label, target);
            }
        }

        log::debug!(
            "subset construction: {} NFA states -> {} DFA states over {} labels",
            self.states.len(),
            states.len(),
            alphabet.len()
        );
        Dfa {
            states,
            start: 0,
            alphabet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn nfa(pattern: &str) -> Nfa {
        parser::regex(pattern).unwrap().to_nfa()
    }

    #[test]
    fn alphabet_keeps_overlapping_labels_distinct() {
        let nfa = nfa("a|.|[a-z]|\\.");
        let alphabet: Vec<Label> = nfa.alphabet().into_iter().collect();
        assert_eq!(
            alphabet,
            vec![
                Label::Char('.'),
                Label::Char('a'),
                Label::Any,
                Label::Range('a', 'z')
            ]
        );
    }

    #[test]
    fn closure_follows_epsilon_chains() {
        let nfa = nfa("a*");
        let closure = nfa.closure(nfa.start_index()).unwrap();
        assert!(closure.contains(&nfa.start_index()));
        assert!(closure.contains(&nfa.accept_index()));
        assert!(nfa.closure(nfa.states().len()).is_none());
    }

    #[test]
    fn every_state_is_reachable_from_start() {
        for pattern in ["a|b|c", "[bc]*(cd)+", "(a?b+|c)*d"] {
            let nfa = nfa(pattern);
            let mut seen = nfa.closure_of([nfa.start_index()]);
            let mut stack: Vec<usize> = seen.iter().copied().collect();
            while let Some(state) = stack.pop() {
                for targets in nfa.states()[state].transitions().values() {
                    for &target in targets {
                        if seen.insert(target) {
                            stack.push(target);
                        }
                    }
                }
                for &target in nfa.states()[state].epsilon_transitions() {
                    if seen.insert(target) {
                        stack.push(target);
                    }
                }
            }
            assert_eq!(seen.len(), nfa.states().len(), "{pattern}");
        }
    }

    #[test]
    fn subset_construction_deduplicates_by_id_set() {
        let dfa = nfa("(a|b)*abb").to_dfa();
        let mut keys: Vec<_> = dfa.states().iter().map(|s| s.nfa_ids.clone()).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn dfa_accepting_iff_set_contains_accept() {
        let nfa = nfa("ab?");
        let dfa = nfa.to_dfa();
        for state in dfa.states() {
            assert_eq!(
                state.is_accepting(),
                state.nfa_ids.contains(&nfa.accept_index())
            );
        }
    }
}
