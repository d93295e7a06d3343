use crate::{
    automaton::{Automaton, Builder},
    state::{Label, StateId},
    BuildResult, ConstructionError,
};

/// Fragment of an NFA under construction: one start state and the states
/// that are final so far.
#[derive(Debug, Clone)]
struct Fragment {
    start: StateId,
    finals: Vec<StateId>,
}

/// Builds an NFA from a postfix regular expression with Thompson's
/// construction.
///
/// Symbols are printable ASCII characters other than the operators. The
/// operators are `.` (concatenation), `|` (alternation), `*` (zero or more)
/// and `+` (one or more).
#[derive(Debug)]
pub struct Thompson {
    builder: Builder,
    stack: Vec<Fragment>,
}

impl Thompson {
    pub fn new() -> Self {
        Self { builder: Builder::new(), stack: Vec::new() }
    }

    /// Compile `postfix` into an NFA. State IDs start at 0.
    pub fn build(mut self, postfix: &str) -> BuildResult<Automaton> {
        for (position, ch) in postfix.chars().enumerate() {
            let fragment = match ch {
                '.' => self.concat(position)?,
                '|' => self.alternate(position)?,
                '*' => self.repeat(position, ch, true)?,
                '+' => self.repeat(position, ch, false)?,
                _ if is_symbol(ch) => self.symbol(ch),
                _ => {
                    return Err(ConstructionError::UnsupportedSymbol {
                        symbol: ch,
                        position,
                    })
                }
            };
            trace!(
                "step {}: '{}' -> start s{}, finals {:?}",
                position + 1,
                ch,
                fragment.start,
                fragment.finals
            );
            self.stack.push(fragment);
        }

        let fragment = match self.stack.len() {
            0 => return Err(ConstructionError::Empty),
            1 => self.stack.pop().ok_or(ConstructionError::Empty)?,
            count => return Err(ConstructionError::UnconsumedFragments { count }),
        };
        debug!(
            "built NFA for {:?} with {} states",
            postfix,
            self.builder.len()
        );
        Ok(self.builder.build(fragment.start, fragment.finals))
    }

    fn pop(&mut self, operator: char, position: usize) -> BuildResult<Fragment> {
        self.stack
            .pop()
            .ok_or(ConstructionError::MissingOperand { operator, position })
    }

    /// `start --ch--> final`
    fn symbol(&mut self, ch: char) -> Fragment {
        let start = self.builder.add_state();
        let end = self.builder.add_state();
        self.builder.add_transition(start, Label::Symbol(ch), end);
        Fragment { start, finals: vec![end] }
    }

    /// The finals of the first fragment take over the transitions of the
    /// second fragment's start, which is left unreachable.
    fn concat(&mut self, position: usize) -> BuildResult<Fragment> {
        let second = self.pop('.', position)?;
        let first = self.pop('.', position)?;
        for &end in &first.finals {
            self.builder.copy_transitions(second.start, end);
        }
        Ok(Fragment { start: first.start, finals: second.finals })
    }

    fn alternate(&mut self, position: usize) -> BuildResult<Fragment> {
        let second = self.pop('|', position)?;
        let first = self.pop('|', position)?;

        let start = self.builder.add_state();
        self.builder.add_epsilon(start, first.start);
        self.builder.add_epsilon(start, second.start);

        let end = self.builder.add_state();
        for &f in first.finals.iter().chain(second.finals.iter()) {
            self.builder.add_epsilon(f, end);
        }
        Ok(Fragment { start, finals: vec![end] })
    }

    /// `*` when `allow_empty` is set, `+` otherwise. The only difference is
    /// the epsilon edge that lets `*` skip the inner fragment.
    fn repeat(
        &mut self,
        position: usize,
        operator: char,
        allow_empty: bool,
    ) -> BuildResult<Fragment> {
        let inner = self.pop(operator, position)?;

        let start = self.builder.add_state();
        let end = self.builder.add_state();
        self.builder.add_epsilon(start, inner.start);
        if allow_empty {
            self.builder.add_epsilon(start, end);
        }
        for &f in &inner.finals {
            self.builder.add_epsilon(f, inner.start);
            self.builder.add_epsilon(f, end);
        }
        Ok(Fragment { start, finals: vec![end] })
    }
}

impl Default for Thompson {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an NFA from a postfix regular expression.
///
/// This is shorthand for `Thompson::new().build(postfix)`.
pub fn build_nfa(postfix: &str) -> BuildResult<Automaton> {
    Thompson::new().build(postfix)
}

fn is_symbol(ch: char) -> bool {
    (ch == ' ' || ch.is_ascii_graphic()) && !matches!(ch, '.' | '|' | '*' | '+' | '(' | ')')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Transition;

    #[test]
    fn single_symbol() {
        let nfa = build_nfa("a").unwrap();

        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.finals().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(nfa.state(0).transitions(), &[Transition::symbol('a', 1)]);
        assert!(nfa.state(1).transitions().is_empty());
    }

    #[test]
    fn concat_redirects_finals() {
        let nfa = build_nfa("ab.").unwrap();

        // s2, the start of 'b', is no longer reachable.
        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.finals().iter().copied().collect::<Vec<_>>(), vec![3]);
        assert_eq!(nfa.state(1).transitions(), &[Transition::symbol('b', 3)]);
        assert_eq!(nfa.reachable(), vec![0, 1, 3]);
    }

    #[test]
    fn alternation_joins_with_epsilons() {
        let nfa = build_nfa("ab|").unwrap();

        assert_eq!(nfa.start(), 4);
        assert_eq!(
            nfa.state(4).transitions(),
            &[Transition::epsilon(0), Transition::epsilon(2)]
        );
        assert_eq!(nfa.state(1).transitions(), &[Transition::epsilon(5)]);
        assert_eq!(nfa.state(3).transitions(), &[Transition::epsilon(5)]);
        assert!(nfa.is_final(5));
    }

    #[test]
    fn star_has_bypass() {
        let nfa = build_nfa("a*").unwrap();

        assert_eq!(nfa.start(), 2);
        assert_eq!(
            nfa.state(2).transitions(),
            &[Transition::epsilon(0), Transition::epsilon(3)]
        );
        assert_eq!(
            nfa.state(1).transitions(),
            &[Transition::epsilon(0), Transition::epsilon(3)]
        );
        assert!(nfa.is_final(3));
    }

    #[test]
    fn plus_has_no_bypass() {
        let nfa = build_nfa("a+").unwrap();

        assert_eq!(nfa.state(2).transitions(), &[Transition::epsilon(0)]);
        assert_eq!(
            nfa.state(1).transitions(),
            &[Transition::epsilon(0), Transition::epsilon(3)]
        );
    }

    #[test]
    fn ids_restart_for_every_call() {
        let first = build_nfa("ab|*a.b.b.").unwrap();
        let second = build_nfa("ab|*a.b.b.").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.states().len(), second.states().len());
    }

    #[test]
    fn empty_input() {
        assert_eq!(build_nfa(""), Err(ConstructionError::Empty));
    }

    #[test]
    fn missing_operands() {
        assert_eq!(
            build_nfa("a."),
            Err(ConstructionError::MissingOperand { operator: '.', position: 1 })
        );
        assert_eq!(
            build_nfa("|"),
            Err(ConstructionError::MissingOperand { operator: '|', position: 0 })
        );
        assert_eq!(
            build_nfa("*"),
            Err(ConstructionError::MissingOperand { operator: '*', position: 0 })
        );
        assert_eq!(
            build_nfa("ab.+."),
            Err(ConstructionError::MissingOperand { operator: '.', position: 4 })
        );
    }

    #[test]
    fn leftover_fragments() {
        assert_eq!(
            build_nfa("abc."),
            Err(ConstructionError::UnconsumedFragments { count: 2 })
        );
    }

    #[test]
    fn unsupported_symbols() {
        assert_eq!(
            build_nfa("a(."),
            Err(ConstructionError::UnsupportedSymbol { symbol: '(', position: 1 })
        );
        assert_eq!(
            build_nfa("\u{3b5}"),
            Err(ConstructionError::UnsupportedSymbol { symbol: '\u{3b5}', position: 0 })
        );
    }

    #[test]
    fn space_and_digits_are_symbols() {
        assert!(build_nfa("0 1|.").is_ok());
    }
}
