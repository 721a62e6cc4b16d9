//! Graphviz export for NFAs and DFAs.
//!
//! [`nfa`] and [`dfa`] are pure functions from an automaton to dot source:
//! left-to-right layout, a `point`-shaped start marker, `doublecircle`
//! accepting states, a filled start state, green labeled edges and
//! saddlebrown ε-edges, plus an optional regex caption at the bottom of the
//! graph. [`render`] feeds the source to a Graphviz-compatible `dot` binary;
//! a missing backend is a recoverable [`RenderError::BackendUnavailable`].

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Error from [`render`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("graphviz 'dot' backend not found on PATH")]
    BackendUnavailable(#[source] io::Error),
    #[error("graphviz rejected the graph: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(io::Error),
}

/// Renders an NFA as dot source.
pub fn nfa(nfa: &Nfa, caption: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("digraph NFA {\n  rankdir=LR;\n  node [shape=circle];\n");

    let name = |id: usize| format!("\"S{id}\"");
    let _ = writeln!(out, "  start [shape=point];\n  start -> {};", name(nfa.start_index()));

    for (id, state) in nfa.states().iter().enumerate() {
        if state.is_accepting() {
            let _ = writeln!(
                out,
                "  {} [shape=doublecircle, style=filled, fillcolor=lightgray];",
                name(id)
            );
        } else if id == nfa.start_index() {
            let _ = writeln!(out, "  {} [style=filled, fillcolor=lightblue];", name(id));
        }
    }

    for (id, state) in nfa.states().iter().enumerate() {
        for (label, targets) in state.transitions() {
            for &target in targets {
                let _ = writeln!(
                    out,
                    "  {} -> {} [label=\"{}\", color=green];",
                    name(id),
                    name(target),
                    escape(&label.to_string())
                );
            }
        }
        for &target in state.epsilon_transitions() {
            let _ = writeln!(
                out,
                "  {} -> {} [label=\"ε\", color=saddlebrown, fontcolor=saddlebrown];",
                name(id),
                name(target)
            );
        }
    }

    push_caption(&mut out, caption);
    out.push_str("}\n");
    out
}

/// Renders a DFA as dot source.
pub fn dfa(dfa: &Dfa, caption: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("digraph DFA {\n  rankdir=LR;\n  node [shape=circle];\n");

    let name = |id: usize| format!("\"{}\"", dfa.states()[id].name());
    let _ = writeln!(out, "  start [shape=point];\n  start -> {};", name(dfa.start_index()));

    for (id, state) in dfa.states().iter().enumerate() {
        if state.is_accepting() {
            let _ = writeln!(
                out,
                "  {} [shape=doublecircle, style=filled, fillcolor=lightgray];",
                name(id)
            );
        } else if id == dfa.start_index() {
            let _ = writeln!(out, "  {} [style=filled, fillcolor=lightblue];", name(id));
        }
    }

    for (id, state) in dfa.states().iter().enumerate() {
        for (label, &target) in state.transitions() {
            let _ = writeln!(
                out,
                "  {} -> {} [label=\"{}\", color=green];",
                name(id),
                name(target),
                escape(&label.to_string())
            );
        }
    }

    push_caption(&mut out, caption);
    out.push_str("}\n");
    out
}

/// Pipes dot source through the `dot` binary, writing `output` in the given
/// format (`svg`, `png`, ...). The child's handles are released before this
/// returns, on error as well.
pub fn render(source: &str, output: &Path, format: &str) -> Result<(), RenderError> {
    let mut child = Command::new("dot")
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RenderError::BackendUnavailable(e)
            } else {
                RenderError::Io(e)
            }
        })?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes()).map_err(RenderError::Io)?;
    }
    let result = child.wait_with_output().map_err(RenderError::Io)?;
    if result.status.success() {
        Ok(())
    } else {
        Err(RenderError::Backend(
            String::from_utf8_lossy(&result.stderr).trim().to_string(),
        ))
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn push_caption(out: &mut String, caption: Option<&str>) {
    if let Some(caption) = caption {
        let _ = writeln!(
            out,
            "  label=\"Regular Expression: {}\";\n  labelloc=b;",
            escape(caption)
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::parser;

    #[test]
    fn nfa_graph_marks_roles_and_epsilon_edges() {
        let nfa = parser::regex("a*").unwrap().to_nfa();
        let graph = super::nfa(&nfa, None);
        assert!(graph.starts_with("digraph NFA {"));
        assert!(graph.contains("rankdir=LR"));
        assert!(graph.contains("start [shape=point]"));
        assert!(graph.contains("doublecircle"));
        assert!(graph.contains("color=saddlebrown"));
        assert!(graph.contains("[label=\"a\", color=green]"));
    }

    #[test]
    fn dfa_graph_has_no_epsilon_edges() {
        let dfa = parser::regex("a*b").unwrap().to_nfa().to_dfa();
        let graph = super::dfa(&dfa, None);
        assert!(graph.starts_with("digraph DFA {"));
        assert!(!graph.contains('ε'));
    }

    #[test]
    fn labels_and_captions_are_escaped() {
        let nfa = parser::regex("\\.").unwrap().to_nfa();
        let graph = super::nfa(&nfa, Some("\\."));
        assert!(graph.contains("[label=\"\\\\.\", color=green]"));
        assert!(graph.contains("label=\"Regular Expression: \\\\.\""));
    }
}
