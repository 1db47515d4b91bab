//! Arithmetic expression parser
//!
//! A small recursive descent parser over `+ - * / ( )` and numeric
//! literals. This is the entire expression surface: formulas arrive from
//! model output, so evaluation must not reach anything resembling code
//! execution, and a malformed expression is a typed error rather than a
//! panic.

use crate::error::{FormulaError, FormulaResult};

/// Evaluate an arithmetic expression to a finite number
///
/// # Example
/// ```rust
/// use cellbot_formula::evaluate_expression;
///
/// assert_eq!(evaluate_expression("1+2*3").unwrap(), 7.0);
/// assert_eq!(evaluate_expression("(1+2)*3").unwrap(), 9.0);
/// ```
pub fn evaluate_expression(input: &str) -> FormulaResult<f64> {
    let mut parser = ExprParser::new(input);
    let value = parser.expression()?;

    parser.skip_whitespace();
    if !parser.is_at_end() {
        return Err(FormulaError::Parse(format!(
            "Unexpected characters after expression: '{}'",
            &parser.input[parser.pos..]
        )));
    }

    if !value.is_finite() {
        return Err(FormulaError::NonFinite);
    }

    Ok(value)
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> FormulaResult<f64> {
        let mut value = self.term()?;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.advance();
                    value += self.term()?;
                }
                Some('-') => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> FormulaResult<f64> {
        let mut value = self.factor()?;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.advance();
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.advance();
                    value /= self.factor()?;
                }
                _ => return Ok(value),
            }
        }
    }

    // factor := '-' factor | '(' expression ')' | number
    fn factor(&mut self) -> FormulaResult<f64> {
        self.skip_whitespace();

        match self.peek() {
            Some('-') => {
                self.advance();
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.advance();
                let value = self.expression()?;
                self.skip_whitespace();
                if self.peek() != Some(')') {
                    return Err(FormulaError::Parse("Expected ')'".into()));
                }
                self.advance();
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(FormulaError::Parse(format!("Unexpected character '{}'", c))),
            None => Err(FormulaError::Parse("Unexpected end of expression".into())),
        }
    }

    fn number(&mut self) -> FormulaResult<f64> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map_err(|_| FormulaError::Parse(format!("Invalid number '{}'", text)))
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}
