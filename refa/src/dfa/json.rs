//! JSON persistence for DFAs.
//!
//! Same document shape as [`crate::nfa::json`]: an object keyed by state
//! name plus the top-level `startingState` key. A DFA has at most one
//! target per label, so every target uses the scalar form and there is no
//! `ε` key. State names are the space-joined underlying NFA state names
//! ([`crate::dfa::DfaState::name`]).

use crate::dfa::Dfa;
use crate::nfa::json::JsonError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Serializes a DFA to the document format.
pub fn to_value(dfa: &Dfa) -> Value {
    let mut doc = Map::new();
    doc.insert(
        "startingState".to_string(),
        Value::String(dfa.states[dfa.start].name()),
    );
    for state in &dfa.states {
        let mut entry = Map::new();
        entry.insert(
            "isTerminatingState".to_string(),
            Value::Bool(state.accepting),
        );
        for (label, &target) in &state.transitions {
            entry.insert(
                label.to_string(),
                Value::String(dfa.states[target].name()),
            );
        }
        doc.insert(state.name(), Value::Object(entry));
    }
    Value::Object(doc)
}

/// Writes a DFA as pretty-printed JSON.
pub fn write(dfa: &Dfa, path: &Path) -> Result<(), JsonError> {
    let text = serde_json::to_string_pretty(&to_value(dfa))?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn document_shape() {
        let dfa = parser::regex("ab").unwrap().to_nfa().to_dfa();
        let value = to_value(&dfa);
        let doc = value.as_object().unwrap();

        let start = doc.get("startingState").unwrap().as_str().unwrap();
        let start_state = doc.get(start).unwrap().as_object().unwrap();
        assert_eq!(start_state.get("isTerminatingState"), Some(&false.into()));

        // One state per DFA state plus the startingState key, scalar targets
        // only, no ε entries.
        assert_eq!(doc.len(), dfa.states().len() + 1);
        for (key, state) in doc.iter().filter(|(k, _)| *k != "startingState") {
            let entry = state.as_object().unwrap();
            assert!(!entry.contains_key("ε"), "{key} has an ε entry");
            for (label, target) in entry.iter().filter(|(k, _)| *k != "isTerminatingState") {
                assert!(target.is_string(), "{key} -> {label} is not scalar");
            }
        }
    }

    #[test]
    fn state_names_join_underlying_ids() {
        let dfa = parser::regex("a").unwrap().to_nfa().to_dfa();
        for state in dfa.states() {
            let name = state.name();
            let parts: Vec<&str> = name.split(' ').collect();
            assert_eq!(parts.len(), state.nfa_ids().len());
            assert!(parts.iter().all(|part| part.starts_with('S')));
        }
    }
}
