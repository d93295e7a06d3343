use crate::{
    automaton::Automaton,
    determinize::Determinizer,
    minimize::minimize_with,
    simulate::Simulator,
    thompson::Thompson,
    ConstructionError,
};
use regex_fsm_syntax::infix_to_postfix;

/// An error that occurred while compiling a [`Regex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The infix pattern could not be converted to postfix.
    Syntax(regex_fsm_syntax::Error),
    /// The postfix expression could not be turned into an automaton.
    Construction(ConstructionError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::Syntax(ref err) => write!(f, "syntax error: {}", err),
            Error::Construction(ref err) => write!(f, "construction error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Syntax(ref err) => Some(err),
            Error::Construction(ref err) => Some(err),
        }
    }
}

impl From<regex_fsm_syntax::Error> for Error {
    fn from(err: regex_fsm_syntax::Error) -> Error {
        Error::Syntax(err)
    }
}

impl From<ConstructionError> for Error {
    fn from(err: ConstructionError) -> Error {
        Error::Construction(err)
    }
}

/// A compiled regular expression, backed by a DFA.
///
/// A `Regex` only answers whether an entire string matches; there is no
/// searching for matches inside a longer string.
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    postfix: String,
    dfa: Automaton,
}

impl Regex {
    /// Compile an infix pattern into a minimal DFA.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        RegexBuilder::new(pattern).build()
    }

    /// Compile a pattern that is already in postfix notation.
    pub fn from_postfix(postfix: &str) -> Result<Regex, Error> {
        RegexBuilder::new(postfix).postfix(true).build()
    }

    /// Returns true if the whole of `input` matches.
    pub fn is_match(&self, input: &str) -> bool {
        Simulator::new(&self.dfa).accepts(input)
    }

    /// The pattern this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    pub fn dfa(&self) -> &Automaton {
        &self.dfa
    }
}

impl std::str::FromStr for Regex {
    type Err = Error;

    fn from_str(pattern: &str) -> Result<Regex, Error> {
        Regex::new(pattern)
    }
}

impl std::fmt::Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Configures how a [`Regex`] is compiled.
#[derive(Clone, Debug)]
pub struct RegexBuilder {
    pattern: String,
    postfix: bool,
    minimize: bool,
    state_limit: Option<usize>,
}

impl RegexBuilder {
    pub fn new(pattern: &str) -> RegexBuilder {
        RegexBuilder {
            pattern: pattern.to_string(),
            postfix: false,
            minimize: true,
            state_limit: None,
        }
    }

    /// Treat the pattern as postfix and skip the infix conversion.
    /// Disabled by default.
    pub fn postfix(&mut self, yes: bool) -> &mut RegexBuilder {
        self.postfix = yes;
        self
    }

    /// Minimize the DFA after the subset construction. Enabled by default.
    ///
    /// Disabling this saves two rounds of reversal and determinization at
    /// the cost of a possibly larger DFA. It never changes which strings
    /// match.
    pub fn minimize(&mut self, yes: bool) -> &mut RegexBuilder {
        self.minimize = yes;
        self
    }

    /// Limit the number of states any single determinization step may
    /// create. Exceeding it fails with
    /// [`ConstructionError::TooComplex`]. There is no limit by default.
    pub fn state_limit(&mut self, limit: Option<usize>) -> &mut RegexBuilder {
        self.state_limit = limit;
        self
    }

    pub fn build(&self) -> Result<Regex, Error> {
        let postfix = if self.postfix {
            self.pattern.clone()
        } else {
            infix_to_postfix(&self.pattern)?
        };
        let nfa = Thompson::new().build(&postfix)?;
        let determinizer = Determinizer::new().state_limit(self.state_limit);
        let mut dfa = determinizer.run(&nfa)?;
        if self.minimize {
            dfa = minimize_with(&determinizer, &dfa)?;
        }
        debug!(
            "compiled {:?} (postfix {:?}) into {} DFA states",
            self.pattern,
            postfix,
            dfa.num_states()
        );
        Ok(Regex { pattern: self.pattern.clone(), postfix, dfa })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infix_pipeline() {
        let re = Regex::new("(a|b)*abb").unwrap();

        assert_eq!(re.postfix(), "ab|*a.b.b.");
        assert_eq!(re.as_str(), "(a|b)*abb");
        assert!(re.is_match("aabb"));
        assert!(!re.is_match("abba"));
        assert_eq!(re.dfa().num_states(), 4);
    }

    #[test]
    fn postfix_pipeline() {
        let re = Regex::from_postfix("a+").unwrap();

        assert_eq!(re.as_str(), "a+");
        assert!(re.is_match("aaa"));
        assert!(!re.is_match(""));
    }

    #[test]
    fn parse_from_str() {
        let re: Regex = "ab*".parse().unwrap();
        assert!(re.is_match("abbb"));
        assert_eq!(re.to_string(), "ab*");
    }

    #[test]
    fn without_minimization() {
        // The states after 'a' and after 'c' only merge when minimizing.
        let full = RegexBuilder::new("ab|cb").minimize(false).build().unwrap();
        let min = Regex::new("ab|cb").unwrap();

        assert_eq!(full.postfix(), "ab.cb.|");
        assert_eq!(full.dfa().num_states(), 4);
        assert_eq!(min.dfa().num_states(), 3);
        for input in ["ab", "cb", "a", "c", "bb", ""] {
            assert_eq!(full.is_match(input), min.is_match(input));
        }
    }

    #[test]
    fn errors() {
        assert_eq!(
            Regex::new("(ab").unwrap_err(),
            Error::Syntax(regex_fsm_syntax::Error::UnmatchedOpen { position: 0 })
        );
        assert!(matches!(
            Regex::new(""),
            Err(Error::Construction(ConstructionError::Empty))
        ));
        assert!(matches!(
            Regex::from_postfix("ab"),
            Err(Error::Construction(ConstructionError::UnconsumedFragments { count: 2 }))
        ));
        assert!(matches!(
            RegexBuilder::new("(a|b)*abb").state_limit(Some(2)).build(),
            Err(Error::Construction(ConstructionError::TooComplex { limit: 2 }))
        ));
    }

    #[test]
    fn error_source() {
        use std::error::Error as _;

        let err = Regex::new("a)").unwrap_err();
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "syntax error: unopened group closed at position 1"
        );
    }
}
