use std::fmt;

/// A state ID, unique within the automaton that owns the state.
pub type StateId = usize;

/// The label carried by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// Traversable without consuming input.
    Epsilon,
    /// Consumes exactly this symbol.
    Symbol(char),
}

impl Label {
    /// Returns true if this is the epsilon label.
    pub fn is_epsilon(&self) -> bool {
        matches!(*self, Label::Epsilon)
    }

    /// Returns the symbol consumed by this label, if any.
    pub fn symbol(&self) -> Option<char> {
        match *self {
            Label::Epsilon => None,
            Label::Symbol(ch) => Some(ch),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(ch) => write!(f, "{}", ch),
        }
    }
}

/// A labeled edge to another state of the same automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub label: Label,
    pub target: StateId,
}

impl Transition {
    /// Create a transition consuming `ch`.
    pub fn symbol(ch: char, target: StateId) -> Self {
        Transition { label: Label::Symbol(ch), target }
    }

    /// Create an epsilon transition.
    pub fn epsilon(target: StateId) -> Self {
        Transition { label: Label::Epsilon, target }
    }
}

/// A node of an automaton together with its outgoing transitions.
///
/// Transitions keep the order in which they were added. Before
/// determinization a state may carry several transitions with the same
/// label; afterwards every symbol appears at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    id: StateId,
    transitions: Vec<Transition>,
}

impl State {
    pub(crate) fn new(id: StateId) -> Self {
        State { id, transitions: Vec::new() }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Targets reachable from this state by consuming `ch`.
    pub fn targets(&self, ch: char) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .iter()
            .filter(move |t| t.label == Label::Symbol(ch))
            .map(|t| t.target)
    }

    /// Targets reachable from this state by a single epsilon transition.
    pub fn epsilon_targets(&self) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .iter()
            .filter(|t| t.label.is_epsilon())
            .map(|t| t.target)
    }

    pub(crate) fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub(crate) fn extend(&mut self, transitions: &[Transition]) {
        self.transitions.extend_from_slice(transitions);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_filter_by_label() {
        let mut state = State::new(0);
        state.push(Transition::symbol('a', 1));
        state.push(Transition::epsilon(2));
        state.push(Transition::symbol('a', 3));
        state.push(Transition::symbol('b', 4));

        assert_eq!(state.targets('a').collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(state.targets('c').count(), 0);
        assert_eq!(state.epsilon_targets().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn epsilon_sorts_before_symbols() {
        assert!(Label::Epsilon < Label::Symbol('\0'));
        assert_eq!(Label::Symbol('x').symbol(), Some('x'));
        assert_eq!(Label::Epsilon.symbol(), None);
        assert_eq!(Label::Epsilon.to_string(), "ε");
    }
}
