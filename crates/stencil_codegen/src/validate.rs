//! Syntactic validation of assembled unit source.
//!
//! A compiled unit is persisted only after its text passes this check, so a
//! broken artifact never reaches the cache. The validator is a byte-level
//! scanner: it verifies that `()`, `[]`, and `{}` are balanced and properly
//! nested outside of string literals and comments, and that strings and
//! block comments are terminated. Nothing is executed and no full grammar
//! is imposed on the unit body.
//!
//! String literals are double-quoted with backslash escapes; comments are
//! `//` to end of line and nestable `/* ... */` blocks.

use std::fmt;

/// A well-formedness violation found in generated unit source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    /// 1-based line of the offending byte.
    pub line: u32,

    /// Description of the violation.
    pub message: String,
}

impl SyntaxError {
    fn new(line: u32, message: impl fmt::Display) -> Self {
        Self {
            line,
            message: message.to_string(),
        }
    }
}

/// Checks assembled unit source for syntactic well-formedness.
pub fn validate(source: &str) -> Result<(), SyntaxError> {
    Scanner {
        source: source.as_bytes(),
        pos: 0,
        line: 1,
    }
    .scan()
}

struct Scanner<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
}

impl Scanner<'_> {
    fn scan(mut self) -> Result<(), SyntaxError> {
        // Open delimiters with the line each was seen on.
        let mut stack: Vec<(u8, u32)> = Vec::new();

        while self.pos < self.source.len() {
            match self.advance() {
                b'\n' => self.line += 1,
                b'"' => self.skip_string()?,
                b'/' if self.peek() == b'/' => self.skip_line_comment(),
                b'/' if self.peek() == b'*' => self.skip_block_comment()?,
                open @ (b'(' | b'[' | b'{') => stack.push((open, self.line)),
                close @ (b')' | b']' | b'}') => match stack.pop() {
                    Some((open, _)) if matching(open) == close => {}
                    Some((open, line)) => {
                        return Err(SyntaxError::new(
                            self.line,
                            format!(
                                "mismatched `{}`: expected `{}` to close `{}` from line {line}",
                                close as char,
                                matching(open) as char,
                                open as char,
                            ),
                        ));
                    }
                    None => {
                        return Err(SyntaxError::new(
                            self.line,
                            format!("unexpected closing `{}`", close as char),
                        ));
                    }
                },
                _ => {}
            }
        }

        if let Some((open, line)) = stack.pop() {
            return Err(SyntaxError::new(
                line,
                format!("unclosed `{}`", open as char),
            ));
        }
        Ok(())
    }

    fn peek(&self) -> u8 {
        if self.pos < self.source.len() {
            self.source[self.pos]
        } else {
            0
        }
    }

    fn advance(&mut self) -> u8 {
        let b = self.source[self.pos];
        self.pos += 1;
        b
    }

    fn skip_string(&mut self) -> Result<(), SyntaxError> {
        let start = self.line;
        while self.pos < self.source.len() {
            match self.advance() {
                b'"' => return Ok(()),
                b'\\' if self.pos < self.source.len() => {
                    if self.advance() == b'\n' {
                        self.line += 1;
                    }
                }
                b'\n' => self.line += 1,
                _ => {}
            }
        }
        Err(SyntaxError::new(start, "unterminated string literal"))
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.source.len() && self.peek() != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), SyntaxError> {
        let start = self.line;
        self.pos += 1; // consume the `*`
        let mut depth = 1u32;
        while self.pos < self.source.len() {
            match self.advance() {
                b'\n' => self.line += 1,
                b'*' if self.peek() == b'/' => {
                    self.pos += 1;
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                b'/' if self.peek() == b'*' => {
                    self.pos += 1;
                    depth += 1;
                }
                _ => {}
            }
        }
        Err(SyntaxError::new(start, "unterminated block comment"))
    }
}

fn matching(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_unit_passes() {
        let src = "use site::nav;\n/* pages/home.stencil */\nunit StencilazUnit {\npub fn f() { g(1, [2]); }\n}\n";
        assert!(validate(src).is_ok());
    }

    #[test]
    fn unclosed_brace_fails() {
        let err = validate("unit X {\npub fn f() {\n}\n").unwrap_err();
        assert!(err.message.contains("unclosed `{`"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn unexpected_closer_fails() {
        let err = validate("fn f() {} }").unwrap_err();
        assert!(err.message.contains("unexpected closing"));
    }

    #[test]
    fn mismatched_nesting_fails() {
        let err = validate("fn f( { ) }").unwrap_err();
        assert!(err.message.contains("mismatched"));
    }

    #[test]
    fn delimiters_in_strings_are_ignored() {
        assert!(validate("fn f() { let s = \"{[(\"; }").is_ok());
    }

    #[test]
    fn escaped_quote_inside_string() {
        assert!(validate("fn f() { let s = \"a\\\"b{\"; }").is_ok());
    }

    #[test]
    fn unterminated_string_fails() {
        let err = validate("fn f() { let s = \"oops; }").unwrap_err();
        assert!(err.message.contains("unterminated string"));
    }

    #[test]
    fn delimiters_in_line_comment_are_ignored() {
        assert!(validate("// comment with { [ (\nfn f() {}").is_ok());
    }

    #[test]
    fn block_comment_may_nest() {
        assert!(validate("/* outer /* inner */ still outer */ fn f() {}").is_ok());
    }

    #[test]
    fn unterminated_block_comment_fails() {
        let err = validate("/* never closed\nfn f() {}").unwrap_err();
        assert!(err.message.contains("unterminated block comment"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn error_reports_line_numbers() {
        let err = validate("fn a() {}\nfn b() {}\nfn c( {}\n").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn empty_source_is_valid() {
        assert!(validate("").is_ok());
    }
}
