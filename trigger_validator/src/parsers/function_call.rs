//! Lexer for a single trigger function call: `name(p1,p2,...)`

use super::query::skip_quoted;
use crate::config::compile_time::parsing::*;
use crate::parameters::RawParameter;
use crate::utils::Span;
use serde::Serialize;

/// A lexed call, ready for validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    pub name: String,
    /// Call text from the name to the closing parenthesis
    pub matched: String,
    #[serde(skip)]
    pub span: Span,
    pub parameters: Vec<RawParameter>,
}

/// Result type for call lexing
pub type CallParseResult<T> = Result<T, CallParseError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallParseError {
    #[error("Invalid function name at {span}")]
    InvalidFunctionName { span: Span },

    #[error("Expected '{expected}' at {span}")]
    MissingParenthesis { expected: char, span: Span },

    #[error("Unterminated quoted parameter starting at {span}")]
    UnterminatedQuote { span: Span },

    #[error("Unexpected '{found}' at {span}")]
    UnexpectedInput { found: char, span: Span },

    #[error("{what} exceeds limit: {actual} > {limit}")]
    LimitExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
        span: Span,
    },
}

impl CallParseError {
    fn limit(what: &'static str, actual: usize, limit: usize, span: Span) -> Self {
        Self::LimitExceeded {
            what,
            actual,
            limit,
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::InvalidFunctionName { span }
            | Self::MissingParenthesis { span, .. }
            | Self::UnterminatedQuote { span }
            | Self::UnexpectedInput { span, .. }
            | Self::LimitExceeded { span, .. } => *span,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::InvalidFunctionName { .. } => codes::parsing::INVALID_FUNCTION_NAME,
            Self::MissingParenthesis { .. } => codes::parsing::MISSING_PARENTHESIS,
            Self::UnterminatedQuote { .. } => codes::parsing::UNTERMINATED_QUOTE,
            Self::UnexpectedInput { .. } => codes::parsing::UNEXPECTED_INPUT,
            Self::LimitExceeded { .. } => codes::parsing::LIMIT_EXCEEDED,
        }
    }
}

/// Lex a function call.
///
/// Surrounding whitespace is ignored. Quoted parameters keep their quotes in
/// `raw_text`; unquoted parameters run to the next top-level comma, treating
/// `[...]` and `{...}` groups as atomic.
pub fn parse_call(text: &str) -> CallParseResult<FunctionCall> {
    let result = Lexer::new(text).call();
    if let Err(e) = &result {
        crate::log_error!(e.error_code(), &e.to_string(), span = Some(e.span()));
    }
    result
}

struct Lexer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn char_at(&self, pos: usize) -> char {
        self.text[pos..].chars().next().unwrap_or(' ')
    }

    fn call(mut self) -> CallParseResult<FunctionCall> {
        if self.text.len() > MAX_EXPRESSION_LENGTH {
            return Err(CallParseError::limit(
                "Expression length",
                self.text.len(),
                MAX_EXPRESSION_LENGTH,
                Span::new(0, self.text.len()),
            ));
        }

        self.skip_spaces();
        let start = self.pos;

        if !self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            return Err(CallParseError::InvalidFunctionName {
                span: Span::at(start),
            });
        }
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        let name = &self.text[start..self.pos];

        if self.peek() != Some(b'(') {
            return Err(CallParseError::MissingParenthesis {
                expected: '(',
                span: Span::at(self.pos),
            });
        }
        self.pos += 1;

        let parameters = self.parameter_list()?;
        let end = self.pos;

        self.skip_spaces();
        if self.pos < self.bytes.len() {
            return Err(CallParseError::UnexpectedInput {
                found: self.char_at(self.pos),
                span: Span::at(self.pos),
            });
        }

        Ok(FunctionCall {
            name: name.to_string(),
            matched: self.text[start..end].to_string(),
            span: Span::new(start, end),
            parameters,
        })
    }

    fn parameter_list(&mut self) -> CallParseResult<Vec<RawParameter>> {
        let mut parameters = Vec::new();

        self.skip_spaces();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(parameters);
        }

        loop {
            let parameter = self.parameter()?;
            let parameter = if parameters.is_empty() {
                parameter.without_subparts()
            } else {
                parameter
            };
            parameters.push(parameter);

            if parameters.len() > MAX_PARAMETER_COUNT {
                return Err(CallParseError::limit(
                    "Parameter count",
                    parameters.len(),
                    MAX_PARAMETER_COUNT,
                    Span::at(self.pos),
                ));
            }

            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(parameters);
                }
                Some(_) => {
                    return Err(CallParseError::UnexpectedInput {
                        found: self.char_at(self.pos),
                        span: Span::at(self.pos),
                    })
                }
                None => {
                    return Err(CallParseError::MissingParenthesis {
                        expected: ')',
                        span: Span::at(self.pos),
                    })
                }
            }
        }
    }

    fn parameter(&mut self) -> CallParseResult<RawParameter> {
        self.skip_spaces();
        let start = self.pos;

        let end = if self.peek() == Some(b'"') {
            let end = self.quoted(start)?;
            self.pos = end;
            self.skip_spaces();
            end
        } else {
            self.unquoted()?;
            start + self.text[start..self.pos].trim_end().len()
        };

        if end - start > MAX_PARAMETER_LENGTH {
            return Err(CallParseError::limit(
                "Parameter length",
                end - start,
                MAX_PARAMETER_LENGTH,
                Span::new(start, end),
            ));
        }

        Ok(RawParameter::new(&self.text[start..end]).with_span(Span::new(start, end)))
    }

    fn quoted(&self, open: usize) -> CallParseResult<usize> {
        skip_quoted(self.bytes, open).ok_or(CallParseError::UnterminatedQuote {
            span: Span::new(open, self.bytes.len()),
        })
    }

    /// Advance to the next top-level `,` or `)`
    fn unquoted(&mut self) -> CallParseResult<()> {
        let mut depth = 0usize;

        while let Some(b) = self.peek() {
            match b {
                b'[' | b'{' => depth += 1,
                b']' | b'}' => depth = depth.saturating_sub(1),
                b'"' if depth > 0 => {
                    self.pos = self.quoted(self.pos)?;
                    continue;
                }
                b',' | b')' if depth == 0 => return Ok(()),
                _ => {}
            }
            self.pos += 1;
        }

        Err(CallParseError::MissingParenthesis {
            expected: ')',
            span: Span::at(self.pos),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn raw(call: &FunctionCall) -> Vec<&str> {
        call.parameters.iter().map(|p| p.raw_text.as_str()).collect()
    }

    #[test]
    fn test_simple_calls() {
        let call = parse_call("avg(/host/key,5m)").unwrap();
        assert_eq!(call.name, "avg");
        assert_eq!(call.matched, "avg(/host/key,5m)");
        assert_eq!(raw(&call), vec!["/host/key", "5m"]);
        assert!(call.parameters[0].structured_subparts.is_none());
        assert!(call.parameters[1].structured_subparts.is_some());

        let call = parse_call("  now() ").unwrap();
        assert!(call.parameters.is_empty());
        assert_eq!(call.span, Span::new(2, 7));
    }

    #[test]
    fn test_empty_and_spaced_parameters() {
        let call = parse_call("forecast(/host/key, 1h , 3600,,)").unwrap();
        assert_eq!(raw(&call), vec!["/host/key", "1h", "3600", "", ""]);
        assert_eq!(call.parameters[1].span, Span::new(20, 22));
    }

    #[test]
    fn test_quoted_parameters() {
        let call = parse_call(r#"find(/host/key,,"like","a,\"b)")"#).unwrap();
        assert_eq!(call.parameters.len(), 4);
        assert_eq!(call.parameters[2].value, "like");
        assert!(call.parameters[3].is_quoted);
        assert_eq!(call.parameters[3].value, "a,\"b)");
    }

    #[test]
    fn test_atomic_groups() {
        let call = parse_call(r#"last(/host/vfs.fs.size["/var,log",pfree],{$SHIFT:"a,b"})"#).unwrap();
        assert_eq!(
            raw(&call),
            vec![r#"/host/vfs.fs.size["/var,log",pfree]"#, r#"{$SHIFT:"a,b"}"#]
        );

        let call = parse_call("last(/host/key,{{#A}.regsub(\"x\", 1)})").unwrap();
        assert_eq!(call.parameters[1].raw_text, "{{#A}.regsub(\"x\", 1)}");
    }

    #[test]
    fn test_lexer_errors() {
        assert_matches!(parse_call(""), Err(CallParseError::InvalidFunctionName { .. }));
        assert_matches!(parse_call("1abc()"), Err(CallParseError::InvalidFunctionName { .. }));
        assert_matches!(
            parse_call("avg"),
            Err(CallParseError::MissingParenthesis { expected: '(', .. })
        );
        assert_matches!(
            parse_call("avg(/host/key,5m"),
            Err(CallParseError::MissingParenthesis { expected: ')', .. })
        );
        assert_matches!(
            parse_call("count(/h/k,1,\"eq"),
            Err(CallParseError::UnterminatedQuote { span }) if span.start == 13
        );
        assert_matches!(
            parse_call("count(/h/k,1,\"eq\"x)"),
            Err(CallParseError::UnexpectedInput { found: 'x', .. })
        );
        assert_matches!(
            parse_call("now() + 1"),
            Err(CallParseError::UnexpectedInput { found: '+', .. })
        );
    }

    #[test]
    fn test_limits() {
        let long = format!("last(/h/{})", "k".repeat(MAX_PARAMETER_LENGTH));
        assert_matches!(
            parse_call(&long),
            Err(CallParseError::LimitExceeded { what: "Parameter length", .. })
        );

        let many = format!("f({})", vec!["1"; MAX_PARAMETER_COUNT + 1].join(","));
        assert_matches!(
            parse_call(&many),
            Err(CallParseError::LimitExceeded { what: "Parameter count", .. })
        );
    }

    #[test]
    fn test_error_codes() {
        let err = parse_call("avg").unwrap_err();
        assert_eq!(err.error_code(), crate::logging::codes::parsing::MISSING_PARENTHESIS);
        assert_eq!(err.span(), Span::at(3));
    }
}
