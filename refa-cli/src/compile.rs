use crate::{render_graph, CompileArgs, Error};
use refa::dfa::json as dfa_json;
use refa::nfa::json as nfa_json;
use refa::{dot, parser};

pub fn run(args: &CompileArgs) -> Result<(), Error> {
    let regex = parser::regex(&args.regex)?;
    let nfa = regex.to_nfa();
    nfa_json::write(&nfa, &args.output)?;
    println!(
        "NFA: {} states -> {}",
        nfa.states().len(),
        args.output.display()
    );
    if args.render {
        render_graph(
            &dot::nfa(&nfa, Some(args.regex.as_str())),
            &args.output,
            &args.format,
        )?;
    }

    if let Some(min_path) = &args.min_dfa {
        let min = nfa.to_dfa().minimize();
        dfa_json::write(&min, min_path)?;
        println!(
            "minimized DFA: {} states -> {}",
            min.states().len(),
            min_path.display()
        );
        if args.render {
            render_graph(
                &dot::dfa(&min, Some(args.regex.as_str())),
                min_path,
                &args.format,
            )?;
        }
    }
    Ok(())
}
