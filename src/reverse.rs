use crate::automaton::{Automaton, Builder};
use std::collections::{HashSet, VecDeque};

/// Build the automaton that accepts the reversal of `fsm`'s language.
///
/// Every transition `u --c--> v` reachable from the start state becomes
/// `v --c--> u`, and the roles of start and final states are swapped. States
/// keep their IDs. With exactly one final state, that state becomes the new
/// start. Otherwise a synthetic start state with the next free ID is added,
/// with an epsilon transition to each former final state (a DFA without
/// final states therefore reverses to an automaton accepting nothing). The
/// only final state of the result is the former start state.
pub fn reverse(fsm: &Automaton) -> Automaton {
    let mut builder = Builder::with_states(fsm.states().len());

    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(fsm.start());
    queue.push_back(fsm.start());
    // Each state is visited once, so a start state that is also final
    // contributes its edges a single time.
    while let Some(id) = queue.pop_front() {
        for t in fsm.state(id).transitions() {
            builder.add_transition(t.target, t.label, id);
            if seen.insert(t.target) {
                queue.push_back(t.target);
            }
        }
    }

    let start = match fsm.finals().len() {
        1 => fsm.finals().iter().next().copied().unwrap_or(fsm.start()),
        _ => {
            let start = builder.add_state();
            for &f in fsm.finals() {
                builder.add_epsilon(start, f);
            }
            start
        }
    };
    trace!(
        "reversed {} into start s{} with {} states",
        fsm,
        start,
        builder.len()
    );
    builder.build(start, [fsm.start()])
}
