/*!
Conversion of infix regular expressions into the postfix form consumed by
`regex-fsm`.

The syntax is deliberately small: symbols, grouping with `(` and `)`,
alternation with `|`, and the postfix repetition operators `*` (zero or
more) and `+` (one or more). Concatenation is implicit in infix patterns and
becomes the explicit `.` operator in postfix.

```
use regex_fsm_syntax::infix_to_postfix;

assert_eq!(infix_to_postfix("(a|b)*abb").unwrap(), "ab|*a.b.b.");
```
*/

#![deny(missing_docs)]

/// The explicit concatenation operator.
pub const CONCAT: char = '.';

/// Errors that can occur while converting an infix pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `(` that is never closed.
    UnmatchedOpen {
        /// Character offset of the `(` in the pattern.
        position: usize,
    },
    /// A `)` without a matching `(`.
    UnmatchedClose {
        /// Character offset of the `)` in the pattern.
        position: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::UnmatchedOpen { position } => {
                write!(f, "unclosed group opened at position {}", position)
            }
            Error::UnmatchedClose { position } => {
                write!(f, "unopened group closed at position {}", position)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Binding strength of an operator. Symbols have none.
fn precedence(ch: char) -> Option<u8> {
    match ch {
        '(' | ')' => Some(4),
        '*' | '+' => Some(3),
        CONCAT => Some(2),
        '|' => Some(1),
        _ => None,
    }
}

/// The characters of `infix` with explicit concatenation operators, each
/// paired with the offset of the pattern character it came from. An
/// inserted operator borrows the offset of the character that follows it.
fn tokens(infix: &str) -> Vec<(usize, char)> {
    let mut out = Vec::with_capacity(infix.len() * 2);
    let mut prev: Option<char> = None;
    for (position, ch) in infix.chars().enumerate() {
        if let Some(prev) = prev {
            let joins = !matches!(ch, '+' | '*' | '|' | ')') && !matches!(prev, '|' | '(');
            if joins {
                out.push((position, CONCAT));
            }
        }
        out.push((position, ch));
        prev = Some(ch);
    }
    out
}

/// Make concatenation explicit by inserting `.` between adjacent
/// characters, except before `+`, `*`, `|` and `)` and after `|` and `(`.
pub fn add_concat_operators(infix: &str) -> String {
    tokens(infix).into_iter().map(|(_, ch)| ch).collect()
}

/// Convert an infix pattern to postfix with the shunting-yard algorithm.
///
/// All binary operators are left associative; `*` and `+` bind tighter than
/// concatenation, which binds tighter than `|`.
pub fn infix_to_postfix(infix: &str) -> Result<String, Error> {
    let mut postfix = String::with_capacity(infix.len() * 2);
    let mut operators: Vec<(usize, char)> = Vec::new();

    for (position, ch) in tokens(infix) {
        match ch {
            '(' => operators.push((position, ch)),
            ')' => loop {
                match operators.pop() {
                    Some((_, '(')) => break,
                    Some((_, op)) => postfix.push(op),
                    None => return Err(Error::UnmatchedClose { position }),
                }
            },
            _ => match precedence(ch) {
                None => postfix.push(ch),
                Some(prec) => {
                    while let Some(&(_, top)) = operators.last() {
                        if top == '(' || prec > precedence(top).unwrap_or(0) {
                            break;
                        }
                        postfix.push(top);
                        operators.pop();
                    }
                    operators.push((position, ch));
                }
            },
        }
    }

    while let Some((position, op)) = operators.pop() {
        if op == '(' {
            return Err(Error::UnmatchedOpen { position });
        }
        postfix.push(op);
    }
    Ok(postfix)
}
