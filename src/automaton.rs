use crate::state::{Label, State, StateId, Transition};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

/// A set of state IDs, ordered so that iteration is reproducible.
pub type StateSet = BTreeSet<StateId>;

/// A finite automaton: an arena of states, a start state and a set of final
/// states.
///
/// States are addressed by [`StateId`], which is also their index into the
/// arena. An NFA may carry epsilon transitions and several transitions with
/// the same symbol; a DFA has neither. Arena slots that are not reachable
/// from the start state (left behind by concatenation, for example) are
/// ignored by every query that talks about the automaton's graph.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    start: StateId,
    finals: StateSet,
}

impl Automaton {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    pub fn is_final(&self, id: StateId) -> bool {
        self.finals.contains(&id)
    }

    /// Panics if `id` is not a slot of this automaton's arena.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// All arena slots, reachable or not.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// IDs of the states reachable from the start state, in breadth first
    /// order.
    pub fn reachable(&self) -> Vec<StateId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        seen.insert(self.start);
        queue.push_back(self.start);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for t in self.states[id].transitions() {
                if seen.insert(t.target) {
                    queue.push_back(t.target);
                }
            }
        }
        order
    }

    /// The number of states reachable from the start state.
    pub fn num_states(&self) -> usize {
        self.reachable().len()
    }

    /// Every transition of a reachable state as `(source, label, target)`.
    pub fn transitions(&self) -> Vec<(StateId, Label, StateId)> {
        self.reachable()
            .into_iter()
            .flat_map(|id| {
                self.states[id]
                    .transitions()
                    .iter()
                    .map(move |t| (id, t.label, t.target))
            })
            .collect()
    }

    /// The symbols used by reachable transitions.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.transitions()
            .into_iter()
            .filter_map(|(_, label, _)| label.symbol())
            .collect()
    }

    /// Returns true if no reachable state has an epsilon transition or two
    /// transitions on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        self.reachable().into_iter().all(|id| {
            let mut symbols = HashSet::new();
            self.states[id].transitions().iter().all(|t| match t.label {
                Label::Epsilon => false,
                Label::Symbol(ch) => symbols.insert(ch),
            })
        })
    }

    /// Returns true if the reachable parts of both automata are the same
    /// graph up to a renumbering of states.
    ///
    /// This is only meaningful for deterministic automata. When a state has
    /// several transitions with the same label, the pairing of their targets
    /// is decided by stored order and the answer may be a false negative.
    pub fn is_isomorphic_to(&self, other: &Automaton) -> bool {
        let mut forward: HashMap<StateId, StateId> = HashMap::new();
        let mut backward: HashMap<StateId, StateId> = HashMap::new();
        let mut queue = VecDeque::new();
        forward.insert(self.start, other.start);
        backward.insert(other.start, self.start);
        queue.push_back((self.start, other.start));

        while let Some((a, b)) = queue.pop_front() {
            if self.is_final(a) != other.is_final(b) {
                return false;
            }
            let ours = sorted_edges(self.state(a));
            let theirs = sorted_edges(other.state(b));
            if ours.len() != theirs.len() {
                return false;
            }
            for (&(la, ta), &(lb, tb)) in ours.iter().zip(theirs.iter()) {
                if la != lb {
                    return false;
                }
                match (forward.get(&ta), backward.get(&tb)) {
                    (Some(&mapped), _) if mapped != tb => return false,
                    (Some(_), _) => {}
                    (None, Some(_)) => return false,
                    (None, None) => {
                        forward.insert(ta, tb);
                        backward.insert(tb, ta);
                        queue.push_back((ta, tb));
                    }
                }
            }
        }
        true
    }

    fn edge_set(&self) -> BTreeSet<(StateId, Label, StateId)> {
        self.transitions().into_iter().collect()
    }
}

fn sorted_edges(state: &State) -> Vec<(Label, StateId)> {
    let mut edges: Vec<(Label, StateId)> =
        state.transitions().iter().map(|t| (t.label, t.target)).collect();
    edges.sort_by_key(|&(label, _)| label);
    edges
}

/// Two automata are equal when they agree on the start ID, the final IDs and
/// the set of reachable transitions. Transition order and unreachable arena
/// slots do not matter.
impl PartialEq for Automaton {
    fn eq(&self, other: &Automaton) -> bool {
        self.start == other.start
            && self.finals == other.finals
            && self.edge_set() == other.edge_set()
    }
}

impl Eq for Automaton {}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{} -> {{", self.start)?;
        for (i, id) in self.finals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "s{}", id)?;
        }
        write!(f, "}}")
    }
}

/// Allocates the states of one automaton.
///
/// Every construction step (Thompson, subset construction, reversal) owns
/// its own builder, so IDs start at 0 for every call and never leak between
/// automata.
#[derive(Debug, Default)]
pub struct Builder {
    states: Vec<State>,
}

impl Builder {
    pub fn new() -> Self {
        Builder { states: Vec::new() }
    }

    /// A builder whose arena already holds `len` empty states with IDs
    /// `0..len`.
    pub fn with_states(len: usize) -> Self {
        Builder { states: (0..len).map(State::new).collect() }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(State::new(id));
        id
    }

    /// Panics if either end is not a state of this builder.
    pub fn add_transition(&mut self, from: StateId, label: Label, to: StateId) {
        assert!(to < self.states.len(), "target state {} out of range", to);
        self.states[from].push(Transition { label, target: to });
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, Label::Epsilon, to);
    }

    /// Append a copy of every transition of `source` to `target`.
    pub fn copy_transitions(&mut self, source: StateId, target: StateId) {
        let copied = self.states[source].transitions().to_vec();
        self.states[target].extend(&copied);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Finish the automaton.
    ///
    /// Panics if `start` or any final is not a state of this builder.
    pub fn build<I>(self, start: StateId, finals: I) -> Automaton
    where
        I: IntoIterator<Item = StateId>,
    {
        let finals: StateSet = finals.into_iter().collect();
        assert!(start < self.states.len(), "start state {} out of range", start);
        assert!(
            finals.iter().all(|&id| id < self.states.len()),
            "final state out of range"
        );
        Automaton { states: self.states, start, finals }
    }
}
