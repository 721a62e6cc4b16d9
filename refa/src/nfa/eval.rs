use crate::nfa::Nfa;
use std::collections::BTreeSet;

/// Tracks the frontier of NFA states reached while evaluating an input
/// string character by character.
#[derive(Debug, Clone)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    current: BTreeSet<usize>,
}

impl<'a> NfaEvaluator<'a> {
    /// Checks if the frontier contains the accept state.
    pub fn is_accepting(&self) -> bool {
        self.current.contains(&self.nfa.accept)
    }

    /// Checks if the frontier is empty, i.e. no continuation of the input
    /// can be accepted.
    pub fn is_stuck(&self) -> bool {
        self.current.is_empty()
    }

    /// The IDs of the states currently in the frontier.
    pub fn current_states(&self) -> &BTreeSet<usize> {
        &self.current
    }

    /// Consumes one input character: follows every transition whose label
    /// matches it, then closes the frontier under ε-transitions.
    pub fn step(&mut self, c: char) {
        let mut next = BTreeSet::new();
        for &state in &self.current {
            for (label, targets) in &self.nfa.states[state].transitions {
                if label.matches(c) {
                    next.extend(targets.iter().copied());
                }
            }
        }
        self.current = self.nfa.closure_of(next);
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

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(nfa: &'a Nfa) -> Self {
        NfaEvaluator {
            nfa,
            current: nfa.closure_of([nfa.start]),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser;

    #[test]
    fn stepwise_evaluation() {
        let nfa = parser::regex("a+b?").unwrap().to_nfa();
        let mut eval = nfa.evaluator();
        assert!(!eval.is_accepting());
        eval.step('a');
        assert!(eval.is_accepting());
        eval.step('b');
        assert!(eval.is_accepting());
        eval.step('b');
        assert!(eval.is_stuck());
        assert!(!eval.is_accepting());
    }

    #[test]
    fn stuck_evaluator_stays_stuck() {
        let nfa = parser::regex("ab").unwrap().to_nfa();
        let mut eval = nfa.evaluator();
        eval.step_str("axb");
        assert!(eval.is_stuck());
    }
}
