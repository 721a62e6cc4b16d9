use crate::dfa::Dfa;
use std::collections::BTreeSet;

/// Evaluates an input string against a DFA.
///
/// The automaton is deterministic per *label*, but labels overlap as
/// character classes (`a`, `.` and `a-z` all match the character `a`), so a
/// single input character may enable several transitions. The evaluator
/// therefore keeps a frontier of states, which makes it accept exactly the
/// language of the NFA the DFA was built from.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current: BTreeSet<usize>,
}

impl<'a> DfaEvaluator<'a> {
    /// Checks if any state in the frontier is accepting.
    pub fn is_accepting(&self) -> bool {
        self.current
            .iter()
            .any(|&state| self.dfa.states[state].accepting)
    }

    /// Checks if the frontier is empty: every pending path has fallen into
    /// the implicit sink.
    pub fn is_stuck(&self) -> bool {
        self.current.is_empty()
    }

    /// The IDs of the states currently in the frontier.
    pub fn current_states(&self) -> &BTreeSet<usize> {
        &self.current
    }

    /// Consumes one input character, following every transition whose label
    /// matches it.
    pub fn step(&mut self, c: char) {
        let mut next = BTreeSet::new();
        for &state in &self.current {
            for (label, &target) in &self.dfa.states[state].transitions {
                if label.matches(c) {
                    next.insert(target);
                }
            }
        }
        self.current = next;
    }

    /// Consumes a whole string.
    pub fn step_str(&mut self, input: &str) {
        for c in input.chars() {
            if self.is_stuck() {
                return;
            }
            self.step(c);
        }
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        DfaEvaluator {
            dfa,
            current: BTreeSet::from([dfa.start]),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser;

    #[test]
    fn overlapping_labels_are_followed_together() {
        // 'a' enables both the literal and the range transition; only one of
        // the two paths continues with 'z'.
        let dfa = parser::regex("ab|[a-z]z").unwrap().to_nfa().to_dfa();
        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("az"));
        assert!(dfa.accepts("mz"));
        assert!(!dfa.accepts("mb"));
    }

    #[test]
    fn stepwise_evaluation() {
        let dfa = parser::regex("a+").unwrap().to_nfa().to_dfa();
        let mut eval = dfa.evaluator();
        assert!(!eval.is_accepting());
        eval.step('a');
        assert!(eval.is_accepting());
        eval.step('b');
        assert!(eval.is_stuck());
    }
}
