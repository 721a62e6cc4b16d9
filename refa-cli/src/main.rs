use clap::{Args, Parser, Subcommand};
use refa::dot::RenderError;
use refa::nfa::json::JsonError;
use refa::parser::ParseError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

mod compile;
mod convert;
mod matching;

#[derive(Debug, Parser)]
#[command(
    name = "refa",
    version,
    about = "Compile regular expressions to NFAs and minimized DFAs"
)]
pub struct RefaArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a regex to an NFA on disk, optionally minimizing it as well
    Compile(CompileArgs),
    /// Test strings against a regex
    Match(MatchArgs),
    /// Load a saved NFA, determinize it and optionally minimize it
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// The regular expression to compile
    pub regex: String,
    /// Where to write the NFA
    #[arg(short, long, default_value = "nfa.json")]
    pub output: PathBuf,
    /// Also determinize and minimize, writing the result to FILE
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "min_DFA.json")]
    pub min_dfa: Option<PathBuf>,
    /// Render the automata with graphviz next to their JSON files
    #[arg(short, long)]
    pub render: bool,
    /// Graphviz output format
    #[arg(long, default_value = "svg")]
    pub format: String,
}

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// The regular expression to match against
    pub regex: String,
    /// Strings to test, one result per line
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// NFA document to load
    pub input: PathBuf,
    /// Where to write the DFA
    #[arg(short, long, default_value = "min_DFA.json")]
    pub output: PathBuf,
    /// Write the raw subset-construction DFA instead of minimizing
    #[arg(long)]
    pub no_minimize: bool,
    /// Render the DFA with graphviz next to its JSON file
    #[arg(short, long)]
    pub render: bool,
    /// Graphviz output format
    #[arg(long, default_value = "svg")]
    pub format: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid regex: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error("writing graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("rendering graph: {0}")]
    Render(#[from] RenderError),
}

fn main() -> ExitCode {
    env_logger::init();
    let args = RefaArgs::parse();
    let result = match &args.command {
        Command::Compile(cmd) => compile::run(cmd),
        Command::Match(cmd) => matching::run(cmd),
        Command::Convert(cmd) => convert::run(cmd),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Writes the dot source next to `json_path` and runs graphviz over it. A
/// missing backend only prints a diagnostic; the dot source is kept either
/// way.
pub fn render_graph(source: &str, json_path: &Path, format: &str) -> Result<(), Error> {
    let dot_path = json_path.with_extension("dot");
    fs::write(&dot_path, source)?;
    let image_path = json_path.with_extension(format);
    match refa::dot::render(source, &image_path, format) {
        Ok(()) => {
            log::info!("rendered {}", image_path.display());
            Ok(())
        }
        Err(RenderError::BackendUnavailable(_)) => {
            eprintln!(
                "graphviz not available, skipping {} (dot source kept at {})",
                image_path.display(),
                dot_path.display()
            );
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}
