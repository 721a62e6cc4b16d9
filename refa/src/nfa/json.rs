//! JSON persistence for NFAs.
//!
//! The document is an object keyed by state name plus one top-level
//! `startingState` key. Every state object carries an `isTerminatingState`
//! boolean and one entry per transition label; a target is either a single
//! state name or a list of names, and ε-transitions use the key `ε` with a
//! list value. [`from_value`] tolerates both the scalar and the list form
//! for any label.
//!
//! State names follow the `S<id>` convention, and the loader requires it:
//! the numeric suffix is the state ID, so a save/load round trip reproduces
//! the automaton exactly, not just up to renaming.

use crate::label::Label;
use crate::nfa::{Nfa, NfaState};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error reading or writing an automaton document.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("automaton document must be a JSON object")]
    NotAnObject,
    #[error("document has no 'startingState' string")]
    MissingStartingState,
    #[error("invalid state name '{0}', expected 'S<id>'")]
    InvalidStateName(String),
    #[error("state ids are not contiguous from S0")]
    NonContiguousStates,
    #[error("state '{0}' is not an object")]
    InvalidState(String),
    #[error("state '{0}' has no boolean 'isTerminatingState'")]
    MissingTerminatingFlag(String),
    #[error("state '{state}' has a malformed target for label '{label}'")]
    InvalidTarget { state: String, label: String },
    #[error("transition from '{state}' references undefined state '{target}'")]
    UndefinedTarget { state: String, target: String },
    #[error("state '{state}' has invalid transition label '{label}'")]
    InvalidLabel { state: String, label: String },
    #[error("no state is flagged as accepting")]
    MissingAcceptState,
    #[error("states '{0}' and '{1}' are both flagged as accepting")]
    MultipleAcceptStates(String, String),
}

/// Serializes an NFA to the document format. Single-target labels use the
/// scalar form, multi-target labels the list form.
pub fn to_value(nfa: &Nfa) -> Value {
    let mut doc = Map::new();
    doc.insert(
        "startingState".to_string(),
        Value::String(state_name(nfa.start)),
    );
    for (id, state) in nfa.states.iter().enumerate() {
        let mut entry = Map::new();
        entry.insert(
            "isTerminatingState".to_string(),
            Value::Bool(state.accepting),
        );
        for (label, targets) in &state.transitions {
            let value = if targets.len() == 1 {
                Value::String(state_name(*targets.iter().next().unwrap()))
            } else {
                Value::Array(targets.iter().map(|&t| state_name(t).into()).collect())
            };
            entry.insert(label.to_string(), value);
        }
        if !state.epsilon.is_empty() {
            entry.insert(
                "ε".to_string(),
                Value::Array(state.epsilon.iter().map(|&t| state_name(t).into()).collect()),
            );
        }
        doc.insert(state_name(id), Value::Object(entry));
    }
    Value::Object(doc)
}

/// Reconstructs an NFA from a document produced by [`to_value`] (or by any
/// writer following the format).
pub fn from_value(value: &Value) -> Result<Nfa, JsonError> {
    let doc = value.as_object().ok_or(JsonError::NotAnObject)?;
    let start_name = doc
        .get("startingState")
        .and_then(Value::as_str)
        .ok_or(JsonError::MissingStartingState)?;

    let mut ids = Vec::new();
    for name in doc.keys().filter(|k| *k != "startingState") {
        ids.push(parse_state_name(name)?);
    }
    let count = ids.len();
    {
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        if sorted.iter().enumerate().any(|(expected, &id)| expected != id) {
            return Err(JsonError::NonContiguousStates);
        }
    }

    let mut states = vec![NfaState::default(); count];
    let mut accept = None;
    for (name, data) in doc.iter().filter(|(k, _)| *k != "startingState") {
        let id = parse_state_name(name)?;
        let entry = data
            .as_object()
            .ok_or_else(|| JsonError::InvalidState(name.clone()))?;
        let accepting = entry
            .get("isTerminatingState")
            .and_then(Value::as_bool)
            .ok_or_else(|| JsonError::MissingTerminatingFlag(name.clone()))?;
        states[id].accepting = accepting;
        if accepting {
            match accept.replace(id) {
                None => {}
                Some(previous) => {
                    return Err(JsonError::MultipleAcceptStates(
                        state_name(previous),
                        name.clone(),
                    ));
                }
            }
        }

        for (key, raw_targets) in entry.iter().filter(|(k, _)| *k != "isTerminatingState") {
            let targets = parse_targets(name, key, raw_targets, count)?;
            if key == "ε" {
                states[id].epsilon.extend(targets);
            } else {
                let label: Label = key.parse().map_err(|_| JsonError::InvalidLabel {
                    state: name.clone(),
                    label: key.clone(),
                })?;
                states[id]
                    .transitions
                    .entry(label)
                    .or_default()
                    .extend(targets);
            }
        }
    }

    let start = parse_state_name(start_name)?;
    if start >= count {
        return Err(JsonError::UndefinedTarget {
            state: "startingState".to_string(),
            target: start_name.to_string(),
        });
    }
    let accept = accept.ok_or(JsonError::MissingAcceptState)?;
    Ok(Nfa {
        states,
        start,
        accept,
    })
}

/// Reads an NFA from a JSON file. The file handle is released when this
/// returns, on error as well.
pub fn read(path: &Path) -> Result<Nfa, JsonError> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    from_value(&value)
}

/// Writes an NFA as pretty-printed JSON.
pub fn write(nfa: &Nfa, path: &Path) -> Result<(), JsonError> {
    let text = serde_json::to_string_pretty(&to_value(nfa))?;
    fs::write(path, text)?;
    Ok(())
}

fn state_name(id: usize) -> String {
    format!("S{id}")
}

fn parse_state_name(name: &str) -> Result<usize, JsonError> {
    name.strip_prefix('S')
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| JsonError::InvalidStateName(name.to_string()))
}

/// Accepts both the scalar form `"S1"` and the list form `["S1", "S2"]`.
fn parse_targets(
    state: &str,
    label: &str,
    raw: &Value,
    count: usize,
) -> Result<Vec<usize>, JsonError> {
    let names: Vec<&str> = match raw {
        Value::String(name) => vec![name.as_str()],
        Value::Array(entries) => entries
            .iter()
            .map(|entry| {
                entry.as_str().ok_or_else(|| JsonError::InvalidTarget {
                    state: state.to_string(),
                    label: label.to_string(),
                })
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(JsonError::InvalidTarget {
                state: state.to_string(),
                label: label.to_string(),
            });
        }
    };
    names
        .into_iter()
        .map(|name| {
            let id = parse_state_name(name)?;
            if id < count {
                Ok(id)
            } else {
                Err(JsonError::UndefinedTarget {
                    state: state.to_string(),
                    target: name.to_string(),
                })
            }
        })
        .collect()
}
