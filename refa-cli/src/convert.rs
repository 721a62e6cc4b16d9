use crate::{render_graph, ConvertArgs, Error};
use refa::dfa::json as dfa_json;
use refa::dot;
use refa::nfa::json as nfa_json;

pub fn run(args: &ConvertArgs) -> Result<(), Error> {
    let nfa = nfa_json::read(&args.input)?;
    log::info!(
        "loaded NFA with {} states from {}",
        nfa.states().len(),
        args.input.display()
    );

    let dfa = nfa.to_dfa();
    let dfa = if args.no_minimize { dfa } else { dfa.minimize() };
    dfa_json::write(&dfa, &args.output)?;
    println!(
        "DFA: {} states -> {}",
        dfa.states().len(),
        args.output.display()
    );
    if args.render {
        render_graph(&dot::dfa(&dfa, None), &args.output, &args.format)?;
    }
    Ok(())
}
