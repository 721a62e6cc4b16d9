//! # Deterministic finite automaton
//! A [`Dfa`] is produced from an NFA by the subset construction
//! ([`crate::nfa::Nfa::to_dfa`]). Each state is identified by the canonical
//! set of NFA state IDs it subsumes; two states with equal underlying sets
//! are the same state. The automaton is deterministic over its *label*
//! alphabet: for each `(state, label)` pair there is at most one target, and
//! transitions that would lead nowhere are omitted, with the absorbing sink
//! state left implicit.
//!
//! ## Matching
//! Labels are opaque symbols to the automaton but overlap as character
//! classes (`a`, `.` and `a-z` all match `a`), so [`Dfa::accepts`] walks a
//! frontier of states rather than a single one. This makes the DFA accept
//! exactly the language of the NFA it was built from; see
//! [`eval::DfaEvaluator`].
//!
//! ## Minimization
//! [`Dfa::minimize`] merges indistinguishable states by partition
//! refinement. Starting from the accepting/non-accepting split, every round
//! keys each state by its group and the group of its target for every label
//! of the alphabet, with undefined targets mapped to a distinguished sink
//! group so that two states whose transition is undefined on the same label
//! agree on it. Splitting repeats until a round changes nothing, which
//! guarantees a minimum-state result over the label alphabet. Because
//! labels stay opaque, the result is minimal as a *symbol* recognizer, not
//! necessarily as a character-class recognizer.
//!
//! ```
//! let dfa = refa::parser::regex("(a|b)*abb").unwrap().to_nfa().to_dfa();
//! let min = dfa.minimize();
//! assert!(min.states().len() <= dfa.states().len());
//! assert!(min.accepts("aababb"));
//! assert!(!min.accepts("abab"));
//! ```

use crate::label::Label;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub use eval::DfaEvaluator;

pub mod eval;
pub mod json;

/// A deterministic finite automaton over an opaque label alphabet, with
/// omitted transitions modeling an implicit sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) states: Vec<DfaState>,
    pub(crate) start: usize,
    pub(crate) alphabet: Vec<Label>,
}

/// A DFA state: the set of NFA state IDs it subsumes, its accept flag, and
/// at most one target per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) nfa_ids: BTreeSet<usize>,
    pub(crate) accepting: bool,
    pub(crate) transitions: BTreeMap<Label, usize>,
}

impl DfaState {
    /// The name of this state: the space-joined names of the NFA states it
    /// subsumes.
    pub fn name(&self) -> String {
        let names: Vec<String> = self.nfa_ids.iter().map(|id| format!("S{id}")).collect();
        names.join(" ")
    }

    /// Checks if this state is accepting, i.e. subsumes the NFA accept
    /// state.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// The underlying NFA state IDs.
    pub fn nfa_ids(&self) -> &BTreeSet<usize> {
        &self.nfa_ids
    }

    /// The outgoing transitions, one target per label.
    pub fn transitions(&self) -> &BTreeMap<Label, usize> {
        &self.transitions
    }
}

impl Dfa {
    /// Gets the states of this DFA, indexed by state ID.
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Gets the ID of the start state.
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// The label alphabet inherited from the NFA, in sorted order.
    pub fn alphabet(&self) -> &[Label] {
        &self.alphabet
    }

    /// Checks if this automaton accepts the given string.
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

    /// Gets an evaluator positioned on the start state.
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Builds the equivalent minimum-state DFA by partition refinement,
    /// leaving this automaton untouched. Each group of indistinguishable
    /// states collapses into one fresh state whose underlying set is the
    /// union of its members' sets; the merged state is accepting if any
    /// member was and is the start if any member was.
    pub fn minimize(&self) -> Dfa {
        let group_of = self.refine();
        let group_count = group_of.iter().copied().max().map_or(0, |max| max + 1);

        let mut states: Vec<DfaState> = (0..group_count)
            .map(|_| DfaState {
                nfa_ids: BTreeSet::new(),
                accepting: false,
                transitions: BTreeMap::new(),
            })
            .collect();
        for (id, state) in self.states.iter().enumerate() {
            let merged = &mut states[group_of[id]];
            merged.nfa_ids.extend(state.nfa_ids.iter().copied());
            merged.accepting |= state.accepting;
            for (&label, &target) in &state.transitions {
                merged.transitions.insert(label, group_of[target]);
            }
        }

        log::debug!(
            "minimization: {} -> {} states",
            self.states.len(),
            group_count
        );
        Dfa {
            states,
            start: group_of[self.start],
            alphabet: self.alphabet.clone(),
        }
    }

    /// Assigns every state to its equivalence group, numbered by first
    /// occurrence in state order. Refinement splits on the whole signature
    /// of a state (its group plus the target group under every label, with
    /// `None` standing for the sink group ⊥) and iterates to fixpoint.
    fn refine(&self) -> Vec<usize> {
        let mut group_of: Vec<usize> = Vec::with_capacity(self.states.len());
        let mut group_count = {
            let mut index: HashMap<bool, usize> = HashMap::new();
            for state in &self.states {
                let fresh = index.len();
                group_of.push(*index.entry(state.accepting).or_insert(fresh));
            }
            index.len()
        };

        loop {
            let mut index: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
            let mut next: Vec<usize> = Vec::with_capacity(self.states.len());
            for (id, state) in self.states.iter().enumerate() {
                let signature = (
                    group_of[id],
                    self.alphabet
                        .iter()
                        .map(|label| state.transitions.get(label).map(|&t| group_of[t]))
                        .collect::<Vec<_>>(),
                );
                let fresh = index.len();
                next.push(*index.entry(signature).or_insert(fresh));
            }
            let next_count = index.len();
            group_of = next;
            if next_count == group_count {
                return group_of;
            }
            group_count = next_count;
        }
    }
}
