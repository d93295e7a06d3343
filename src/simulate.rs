use crate::automaton::Automaton;
use crate::state::StateId;

/// Runs a DFA over input strings.
#[derive(Clone, Copy, Debug)]
pub struct Simulator<'a> {
    dfa: &'a Automaton,
}

impl<'a> Simulator<'a> {
    pub fn new(dfa: &'a Automaton) -> Self {
        Self { dfa }
    }

    /// Returns true if the whole of `input` is accepted.
    ///
    /// A symbol without a transition from the current state rejects the
    /// input on the spot. Epsilon transitions are never followed, so the
    /// automaton is expected to be deterministic.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.dfa.start();
        for ch in input.chars() {
            match self.step(current, ch) {
                Some(next) => current = next,
                None => {
                    trace!("no transition from s{} on {:?}", current, ch);
                    return false;
                }
            }
        }
        self.dfa.is_final(current)
    }

    fn step(&self, from: StateId, ch: char) -> Option<StateId> {
        self.dfa.state(from).targets(ch).next()
    }
}

/// Returns true if `dfa` accepts the whole of `input`.
pub fn accepts(dfa: &Automaton, input: &str) -> bool {
    Simulator::new(dfa).accepts(input)
}
