use regex_fsm::{accepts, build_nfa, determinize, minimize, reverse, Regex};

#[test]
fn pipeline_stages_agree() -> anyhow::Result<()> {
    crate::init_logger();

    let nfa = build_nfa("ab|*a.b.b.")?;
    let dfa = determinize(&nfa);
    let min = minimize(&dfa);
    let re = Regex::new("(a|b)*abb")?;

    assert!(dfa.is_deterministic());
    assert!(min.is_deterministic());
    assert!(min.is_isomorphic_to(re.dfa()));
    for input in ["abb", "bbabb", "abab", ""] {
        assert_eq!(accepts(&dfa, input), accepts(&min, input));
        assert_eq!(accepts(&min, input), re.is_match(input));
    }
    Ok(())
}

#[test]
fn reversed_language() -> anyhow::Result<()> {
    crate::init_logger();

    let forward = Regex::new("ab*c")?;
    let backward = Regex::new("cb*a")?;
    let reversed = minimize(&determinize(&reverse(forward.dfa())));

    assert!(reversed.is_isomorphic_to(backward.dfa()));
    Ok(())
}

#[test]
fn repeated_builds_are_identical() -> anyhow::Result<()> {
    let first = minimize(&determinize(&build_nfa("ab.c.*de.f.g.*.")?));
    let second = minimize(&determinize(&build_nfa("ab.c.*de.f.g.*.")?));

    assert_eq!(first, second);
    Ok(())
}
