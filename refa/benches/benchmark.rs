use criterion::{black_box, criterion_group, criterion_main, Criterion};
use refa::parser;
use regex::Regex as LibRegex;

static PATTERNS: &[&str] = &[
    "[bc]*(cd)+",
    "(a|b)*abb",
    "[a-z]+@[a-z]+\\.[a-z][a-z]+",
    "(0|1)*1(0|1)(0|1)",
];

static INPUTS: &[&str] = &[
    "bcbccdcdcd",
    "abababb",
    "someone@example.com",
    "1101101",
    "not a match at all",
];

pub fn compile(c: &mut Criterion) {
    c.bench_function("refa compile", |b| {
        b.iter(|| {
            let pattern = black_box(PATTERNS[0]);
            let nfa = parser::regex(pattern).unwrap().to_nfa();
            nfa.to_dfa().minimize()
        })
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| LibRegex::new(black_box(PATTERNS[0])).unwrap())
    });
}

pub fn matching(c: &mut Criterion) {
    let nfa = parser::regex(PATTERNS[2]).unwrap().to_nfa();
    let dfa = nfa.to_dfa();
    let min = dfa.minimize();
    let lib = LibRegex::new(&format!("^({})$", PATTERNS[2])).unwrap();

    c.bench_function("nfa match", |b| {
        b.iter(|| INPUTS.iter().filter(|s| nfa.accepts(black_box(s))).count())
    });
    c.bench_function("dfa match", |b| {
        b.iter(|| INPUTS.iter().filter(|s| dfa.accepts(black_box(s))).count())
    });
    c.bench_function("minimized dfa match", |b| {
        b.iter(|| INPUTS.iter().filter(|s| min.accepts(black_box(s))).count())
    });
    c.bench_function("library regex match", |b| {
        b.iter(|| INPUTS.iter().filter(|s| lib.is_match(black_box(s))).count())
    });
}

criterion_group!(benches, compile, matching);
criterion_main!(benches);
