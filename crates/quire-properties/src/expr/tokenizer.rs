//! Property value tokenizer.
//!
//! [XSL 1.1 § 5.9.8 Lexical Structure](https://www.w3.org/TR/xsl11/)
//! "When processing an expression, whitespace... may be used between
//! tokens."
//!
//! Whitespace is significant here: it separates the values of a shorthand
//! (`margin="1pt 2pt"`), so it is kept as a token rather than skipped.

/// One token of a property value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprToken {
    /// A plain number: `1.5`, `-2`
    Number(f64),
    /// A number followed by a unit: `12pt`, `1.2em`
    Dimension {
        /// The numeric part.
        value: f64,
        /// The unit, as written.
        unit: String,
    },
    /// A number followed by `%`.
    Percentage(f64),
    /// A bare name: `solid`, `lr-tb`, `always`
    Name(String),
    /// A name immediately followed by `(`.
    Function(String),
    /// A quoted string, quotes removed.
    Literal(String),
    /// `#` followed by hex digits, `#` removed.
    Color(String),
    /// `,`
    Comma,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `+` standing alone between operands.
    Plus,
    /// `-` standing alone between operands.
    Minus,
    /// One or more whitespace characters.
    Whitespace,
    /// Anything else.
    Delim(char),
}

/// Tokenizer for property value expressions.
pub struct ExprTokenizer {
    /// The input being tokenized
    input: Vec<char>,
    /// Current position in the input
    position: usize,
}

impl ExprTokenizer {
    /// Create a new tokenizer over `input`.
    pub fn new(input: impl AsRef<str>) -> Self {
        Self {
            input: input.as_ref().chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the whole input. Leading and trailing whitespace is dropped.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<ExprToken> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        while tokens.last() == Some(&ExprToken::Whitespace) {
            let _ = tokens.pop();
        }
        if tokens.first() == Some(&ExprToken::Whitespace) {
            let _ = tokens.remove(0);
        }
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn next_token(&mut self) -> Option<ExprToken> {
        let c = self.peek()?;
        let token = match c {
            c if c.is_whitespace() => {
                while self.peek().is_some_and(char::is_whitespace) {
                    self.position += 1;
                }
                ExprToken::Whitespace
            }
            '"' | '\'' => self.consume_literal(c),
            '#' => {
                self.position += 1;
                ExprToken::Color(self.consume_while(|c| c.is_ascii_alphanumeric()))
            }
            ',' => self.single(ExprToken::Comma),
            '(' => self.single(ExprToken::LeftParen),
            ')' => self.single(ExprToken::RightParen),
            '+' | '-' if self.starts_number(1) => self.consume_numeric(),
            '+' => self.single(ExprToken::Plus),
            '-' => self.single(ExprToken::Minus),
            c if c.is_ascii_digit() || (c == '.' && self.starts_number(1)) => {
                self.consume_numeric()
            }
            c if is_name_start(c) => {
                let name = self.consume_while(is_name_char);
                if self.peek() == Some('(') {
                    self.position += 1;
                    ExprToken::Function(name)
                } else {
                    ExprToken::Name(name)
                }
            }
            other => self.single(ExprToken::Delim(other)),
        };
        Some(token)
    }

    fn single(&mut self, token: ExprToken) -> ExprToken {
        self.position += 1;
        token
    }

    /// True if a number starts `offset` characters ahead.
    fn starts_number(&self, offset: usize) -> bool {
        match self.peek_at(offset) {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_at(offset + 1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while self.peek().is_some_and(&predicate) {
            self.position += 1;
        }
        self.input[start..self.position].iter().collect()
    }

    fn consume_literal(&mut self, quote: char) -> ExprToken {
        self.position += 1;
        let value = self.consume_while(|c| c != quote);
        // Closing quote, if present.
        if self.peek() == Some(quote) {
            self.position += 1;
        }
        ExprToken::Literal(value)
    }

    fn consume_numeric(&mut self) -> ExprToken {
        let mut repr = String::new();
        if let Some(sign @ ('+' | '-')) = self.peek() {
            repr.push(sign);
            self.position += 1;
        }
        repr.push_str(&self.consume_while(|c| c.is_ascii_digit() || c == '.'));
        let value = repr.parse::<f64>().unwrap_or(0.0);

        if self.peek() == Some('%') {
            self.position += 1;
            return ExprToken::Percentage(value);
        }
        if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            let unit = self.consume_while(|c| c.is_ascii_alphabetic());
            return ExprToken::Dimension { value, unit };
        }
        ExprToken::Number(value)
    }
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

const fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<ExprToken> {
        ExprTokenizer::new(input).tokenize()
    }

    #[test]
    fn test_dimensions_and_whitespace() {
        assert_eq!(
            tokenize(" 1pt  2.5mm "),
            vec![
                ExprToken::Dimension {
                    value: 1.0,
                    unit: "pt".to_string()
                },
                ExprToken::Whitespace,
                ExprToken::Dimension {
                    value: 2.5,
                    unit: "mm".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_signed_numbers_and_operators() {
        assert_eq!(
            tokenize("-2pt + 50%"),
            vec![
                ExprToken::Dimension {
                    value: -2.0,
                    unit: "pt".to_string()
                },
                ExprToken::Whitespace,
                ExprToken::Plus,
                ExprToken::Whitespace,
                ExprToken::Percentage(50.0),
            ]
        );
    }

    #[test]
    fn test_names_functions_and_colors() {
        assert_eq!(
            tokenize("solid #f00 from-parent(font-size)"),
            vec![
                ExprToken::Name("solid".to_string()),
                ExprToken::Whitespace,
                ExprToken::Color("f00".to_string()),
                ExprToken::Whitespace,
                ExprToken::Function("from-parent".to_string()),
                ExprToken::Name("font-size".to_string()),
                ExprToken::RightParen,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            tokenize("'Times New Roman'"),
            vec![ExprToken::Literal("Times New Roman".to_string())]
        );
    }
}
