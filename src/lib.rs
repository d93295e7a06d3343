/*!
Finite automata for postfix regular expressions.

This crate turns a regular expression in postfix (reverse Polish) notation
into a minimal deterministic finite automaton and runs it over input strings.
The pipeline is made of small, independent stages:

- [`build_nfa`] applies Thompson's construction to a postfix expression.
- [`determinize`] performs the subset construction, using [`epsilon_closure`]
  to follow epsilon transitions.
- [`reverse`] flips every edge and swaps the roles of start and final states.
- [`minimize`] composes reversal and determinization twice (Brzozowski's
  algorithm).
- [`accepts`] simulates a DFA over an input string.

Every stage builds a fresh [`Automaton`] and leaves its input untouched.
States live in an arena and are addressed by [`StateId`], with IDs allocated
from 0 for each call, so the same input always produces the same automaton.

The [`Regex`] type wraps the whole pipeline, including the conversion from
ordinary infix notation provided by the `regex-fsm-syntax` crate.

# Example

```
use regex_fsm::{accepts, build_nfa, determinize, minimize};

// (a|b)*abb
let nfa = build_nfa("ab|*a.b.b.").unwrap();
let dfa = minimize(&determinize(&nfa));

assert!(accepts(&dfa, "babb"));
assert!(!accepts(&dfa, "ab"));
assert_eq!(dfa.num_states(), 4);
```

# Crate features

* **logging** - Emits construction steps through the `log` crate. Pair it
with a logger such as `env_logger` to see them.
*/

#![deny(missing_debug_implementations)]

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

#[macro_use]
mod macros;

pub mod automaton;
pub mod determinize;
pub mod minimize;
pub mod regex;
pub mod reverse;
pub mod simulate;
pub mod state;
pub mod thompson;

pub use automaton::{Automaton, Builder, StateSet};
pub use determinize::{determinize, epsilon_closure, Determinizer};
pub use minimize::minimize;
pub use regex::{Error, Regex, RegexBuilder};
pub use reverse::reverse;
pub use simulate::{accepts, Simulator};
pub use state::{Label, State, StateId, Transition};
pub use thompson::{build_nfa, Thompson};

/// The result of building an automaton.
pub type BuildResult<T> = Result<T, ConstructionError>;

/// Errors that can occur while building an automaton.
///
/// A construction that fails returns no automaton at all; there is no
/// partial result to recover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The postfix expression contained nothing to build.
    Empty,
    /// An operator found fewer fragments on the stack than it needs.
    MissingOperand {
        operator: char,
        position: usize,
    },
    /// A character that is neither an operator nor a supported symbol.
    UnsupportedSymbol {
        symbol: char,
        position: usize,
    },
    /// More than one fragment was left once the whole input was consumed.
    UnconsumedFragments {
        count: usize,
    },
    /// Subset construction needed more states than the configured limit.
    TooComplex {
        limit: usize,
    },
}

impl std::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ConstructionError::Empty => write!(f, "empty postfix expression"),
            ConstructionError::MissingOperand { operator, position } => write!(
                f,
                "operator '{}' at position {} is missing an operand",
                operator, position
            ),
            ConstructionError::UnsupportedSymbol { symbol, position } => write!(
                f,
                "unsupported symbol {:?} at position {}",
                symbol, position
            ),
            ConstructionError::UnconsumedFragments { count } => write!(
                f,
                "{} fragments left after the last operator, expected 1",
                count
            ),
            ConstructionError::TooComplex { limit } => write!(
                f,
                "automaton exceeds the limit of {} states",
                limit
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}
