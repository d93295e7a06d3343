//! Subset construction.

use crate::{
    automaton::{Automaton, Builder, StateSet},
    state::{Label, StateId},
    BuildResult, ConstructionError,
};
use std::collections::{HashMap, VecDeque};

/// The epsilon closure of `states` in `fsm`: every state reachable from one
/// of them through epsilon transitions alone, the states themselves
/// included.
pub fn epsilon_closure(fsm: &Automaton, states: &StateSet) -> StateSet {
    let mut closure = states.clone();
    let mut stack: Vec<StateId> = states.iter().copied().collect();

    while let Some(id) = stack.pop() {
        for target in fsm.state(id).epsilon_targets() {
            if closure.insert(target) {
                stack.push(target);
            }
        }
    }
    closure
}

/// States reachable from any member of `states` by consuming `ch`.
fn step(fsm: &Automaton, states: &StateSet, ch: char) -> StateSet {
    states.iter().flat_map(|&id| fsm.state(id).targets(ch)).collect()
}

/// The members of a closed set that decide its behaviour: final states and
/// states with at least one symbol transition. States reached only to pass
/// through epsilon edges are dropped, so two closures that accept the same
/// strings map to the same DFA state.
fn important(fsm: &Automaton, closure: StateSet) -> StateSet {
    closure
        .into_iter()
        .filter(|&id| {
            fsm.is_final(id)
                || fsm.state(id).transitions().iter().any(|t| !t.label.is_epsilon())
        })
        .collect()
}

/// Symbols on the non-epsilon transitions leaving `states`, in order of
/// first appearance.
fn symbols(fsm: &Automaton, states: &StateSet) -> Vec<char> {
    let mut seen = Vec::new();
    for &id in states {
        for t in fsm.state(id).transitions() {
            if let Label::Symbol(ch) = t.label {
                if !seen.contains(&ch) {
                    seen.push(ch);
                }
            }
        }
    }
    seen
}

/// Converts an automaton with epsilon transitions and nondeterministic
/// choices into an equivalent DFA.
///
/// Each DFA state stands for the set of input states it was built from,
/// keyed by the final and symbol-consuming members of its epsilon closure.
/// DFA
/// states receive IDs in the order they are discovered, starting at 0 with
/// the epsilon closure of the input's start state, so the output is fully
/// determined by the input.
#[derive(Clone, Debug, Default)]
pub struct Determinizer {
    state_limit: Option<usize>,
}

impl Determinizer {
    pub fn new() -> Self {
        Determinizer { state_limit: None }
    }

    /// Fail with [`ConstructionError::TooComplex`] instead of building a
    /// DFA with more than `limit` states. There is no limit by default.
    pub fn state_limit(mut self, limit: Option<usize>) -> Self {
        self.state_limit = limit;
        self
    }

    pub fn run(&self, nfa: &Automaton) -> BuildResult<Automaton> {
        let mut builder = Builder::new();
        let mut finals = Vec::new();
        let mut ids: HashMap<StateSet, StateId> = HashMap::new();
        let mut queue: VecDeque<(StateSet, StateId)> = VecDeque::new();

        let initial = important(nfa, epsilon_closure(nfa, &StateSet::from([nfa.start()])));
        let start = self.add(&mut builder, &mut finals, nfa, &initial)?;
        ids.insert(initial.clone(), start);
        queue.push_back((initial, start));

        while let Some((set, from)) = queue.pop_front() {
            for ch in symbols(nfa, &set) {
                let next = important(nfa, epsilon_closure(nfa, &step(nfa, &set, ch)));
                let to = match ids.get(&next) {
                    Some(&id) => id,
                    None => {
                        let id = self.add(&mut builder, &mut finals, nfa, &next)?;
                        trace!("subset {:?} -> s{}", next, id);
                        ids.insert(next.clone(), id);
                        queue.push_back((next, id));
                        id
                    }
                };
                builder.add_transition(from, Label::Symbol(ch), to);
            }
        }

        debug!(
            "determinized {} NFA states into {} DFA states",
            nfa.num_states(),
            builder.len()
        );
        Ok(builder.build(start, finals))
    }

    fn add(
        &self,
        builder: &mut Builder,
        finals: &mut Vec<StateId>,
        nfa: &Automaton,
        set: &StateSet,
    ) -> BuildResult<StateId> {
        if let Some(limit) = self.state_limit {
            if builder.len() >= limit {
                return Err(ConstructionError::TooComplex { limit });
            }
        }
        let id = builder.add_state();
        if set.iter().any(|&s| nfa.is_final(s)) {
            finals.push(id);
        }
        Ok(id)
    }
}

/// Convert `nfa` into an equivalent DFA with the subset construction.
///
/// Running this on an automaton that is already deterministic yields an
/// isomorphic automaton.
pub fn determinize(nfa: &Automaton) -> Automaton {
    match Determinizer::new().run(nfa) {
        Ok(dfa) => dfa,
        Err(_) => unreachable!("subset construction without a state limit cannot fail"),
    }
}
