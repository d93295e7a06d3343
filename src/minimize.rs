use crate::{
    automaton::Automaton,
    determinize::{determinize, Determinizer},
    reverse::reverse,
    BuildResult,
};

/// Compute the minimal DFA for the language of `dfa` with Brzozowski's
/// algorithm: reverse, determinize, reverse, determinize.
///
/// Determinizing a reversed automaton merges the states that accept the same
/// suffixes, and doing it a second time from the other end leaves exactly
/// the states of the minimal DFA. The input may also be an NFA. The result
/// has no dead state, so it can be partial.
pub fn minimize(dfa: &Automaton) -> Automaton {
    let once = determinize(&reverse(dfa));
    let min = determinize(&reverse(&once));
    debug!(
        "minimized {} states into {} (intermediate {})",
        dfa.num_states(),
        min.num_states(),
        once.num_states()
    );
    min
}

/// Like [`minimize`], with both determinization passes run by
/// `determinizer`.
pub(crate) fn minimize_with(
    determinizer: &Determinizer,
    dfa: &Automaton,
) -> BuildResult<Automaton> {
    let once = determinizer.run(&reverse(dfa))?;
    determinizer.run(&reverse(&once))
}
