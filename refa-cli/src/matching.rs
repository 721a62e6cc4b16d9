use crate::{Error, MatchArgs};
use refa::parser;

pub fn run(args: &MatchArgs) -> Result<(), Error> {
    let nfa = parser::regex(&args.regex)?.to_nfa();
    for input in &args.inputs {
        println!("{input}: {}", nfa.accepts(input));
    }
    Ok(())
}
