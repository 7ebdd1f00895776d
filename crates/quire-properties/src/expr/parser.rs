//! Property value expression parser.
//!
//! [XSL 1.1 § 5.9 Expressions](https://www.w3.org/TR/xsl11/)
//!
//! ```text
//! ValueList      ::= Additive (S Additive)*
//! Additive       ::= Multiplicative (('+' | '-') Multiplicative)*
//! Multiplicative ::= Unary (('*' | 'div' | 'mod') Unary)*
//! Unary          ::= '-' Unary | Primary
//! Primary        ::= Number | Length | Percentage | Color | Literal | NCName
//!                  | FunctionCall | '(' Additive ')'
//! ```
//!
//! Lengths are resolved as far as the context allows: `em` and font-size
//! percentages become absolute here, other percentages stay pending on the
//! [`Length`].

use core::str::FromStr;

use super::tokenizer::{ExprToken, ExprTokenizer};
use crate::error::PropertyError;
use crate::id::{PropertyId, PropertyRef};
use crate::list::PropertyList;
use crate::maker::PropertyMaker;
use crate::values::{Color, Length, LengthUnit, PercentBase, Property};

/// Parser for one attribute value, in the context of the property it is for
/// and the node it is on.
pub struct PropertyParser<'a> {
    input: &'a str,
    tokens: Vec<ExprToken>,
    position: usize,
    maker: &'a PropertyMaker,
    list: &'a PropertyList,
    /// Inside `rgb()`, percentages are color channel fractions.
    in_rgb: bool,
}

impl<'a> PropertyParser<'a> {
    /// Parse `input` for the property `maker` makes, on the node `list`
    /// belongs to. Several whitespace-separated values produce a
    /// [`Property::List`].
    ///
    /// # Errors
    /// Returns [`PropertyError::InvalidValue`] for malformed input,
    /// [`PropertyError::UnknownFunction`] for unknown functions, or a
    /// resolution failure of a referenced property.
    pub fn parse(
        input: &'a str,
        maker: &'a PropertyMaker,
        list: &'a PropertyList,
    ) -> Result<Property, PropertyError> {
        let mut parser = Self {
            input,
            tokens: ExprTokenizer::new(input).tokenize(),
            position: 0,
            maker,
            list,
            in_rgb: false,
        };
        parser.parse_value_list()
    }

    fn peek(&self) -> Option<&ExprToken> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<ExprToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(&ExprToken::Whitespace) {
            self.position += 1;
        }
    }

    /// The next non-whitespace token, without consuming anything.
    fn peek_past_whitespace(&self) -> Option<&ExprToken> {
        self.tokens[self.position..]
            .iter()
            .find(|token| **token != ExprToken::Whitespace)
    }

    fn error(&self, reason: impl Into<String>) -> PropertyError {
        PropertyError::InvalidValue {
            property: self.maker.id().to_string(),
            value: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn parse_value_list(&mut self) -> Result<Property, PropertyError> {
        if self.tokens.is_empty() {
            return Err(self.error("empty value"));
        }
        let mut values = vec![self.parse_additive()?];
        loop {
            match self.peek() {
                None => break,
                Some(ExprToken::Whitespace) => {
                    self.skip_whitespace();
                    values.push(self.parse_additive()?);
                }
                Some(other) => {
                    let reason = format!("unexpected {other:?}");
                    return Err(self.error(reason));
                }
            }
        }
        if values.len() == 1 {
            Ok(values.remove(0))
        } else {
            Ok(Property::List(values))
        }
    }

    fn parse_additive(&mut self) -> Result<Property, PropertyError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_past_whitespace() {
                Some(ExprToken::Plus) => Op::Add,
                Some(ExprToken::Minus) => Op::Subtract,
                _ => break,
            };
            self.skip_whitespace();
            let _ = self.advance();
            self.skip_whitespace();
            let right = self.parse_multiplicative()?;
            left = self.apply(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Property, PropertyError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_past_whitespace() {
                Some(ExprToken::Delim('*')) => Op::Multiply,
                Some(ExprToken::Name(name)) if name == "div" => Op::Divide,
                Some(ExprToken::Name(name)) if name == "mod" => Op::Modulo,
                _ => break,
            };
            self.skip_whitespace();
            let _ = self.advance();
            self.skip_whitespace();
            let right = self.parse_unary()?;
            left = self.apply(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Property, PropertyError> {
        if self.peek() == Some(&ExprToken::Minus) {
            let _ = self.advance();
            let operand = self.parse_unary()?;
            return self.apply(Op::Multiply, operand, Property::Number(-1.0));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Property, PropertyError> {
        let Some(token) = self.advance() else {
            return Err(self.error("unexpected end of value"));
        };
        match token {
            ExprToken::Number(n) => Ok(Property::Number(n)),
            ExprToken::Dimension { value, unit } => self.length(value, &unit),
            ExprToken::Percentage(value) if self.in_rgb => {
                Ok(Property::Number(value * 255.0 / 100.0))
            }
            ExprToken::Percentage(value) => self.percentage(value),
            ExprToken::Name(name) => Ok(Property::NcName(name)),
            ExprToken::Literal(text) => Ok(Property::String(text)),
            ExprToken::Color(hex) => Color::from_hex(&hex)
                .map(Property::Color)
                .ok_or_else(|| self.error(format!("invalid color #{hex}"))),
            ExprToken::LeftParen => {
                self.skip_whitespace();
                let value = self.parse_additive()?;
                self.skip_whitespace();
                self.expect_close()?;
                Ok(value)
            }
            ExprToken::Function(name) => self.function(&name),
            other => Err(self.error(format!("unexpected {other:?}"))),
        }
    }

    fn expect_close(&mut self) -> Result<(), PropertyError> {
        match self.advance() {
            Some(ExprToken::RightParen) => Ok(()),
            _ => Err(self.error("expected \")\"")),
        }
    }

    /// A length with a unit. `em` is relative to this node's font size, or
    /// the parent's when the value is itself a font size.
    fn length(&self, value: f64, unit: &str) -> Result<Property, PropertyError> {
        let unit = LengthUnit::from_str(unit)
            .map_err(|_| self.error(format!("unknown unit \"{unit}\"")))?;
        if let Some(length) = Length::from_unit(value, unit) {
            return Ok(Property::Length(length));
        }
        let base = if self.maker.id().base == PropertyId::FontSize {
            PercentBase::ParentFontSize
        } else {
            PercentBase::FontSize
        };
        Ok(Property::Length(self.font_size(base)?.scale(value)))
    }

    fn percentage(&self, value: f64) -> Result<Property, PropertyError> {
        let Some(base) = self.maker.percent_base_of() else {
            return Err(self.error("percentages are not allowed here"));
        };
        let length = match base {
            PercentBase::FontSize | PercentBase::ParentFontSize => {
                self.font_size(base)?.scale(value / 100.0)
            }
            PercentBase::ContainingBlockWidth | PercentBase::ContainingBlockHeight => {
                Length::percentage(value, base)
            }
        };
        Ok(Property::Length(length))
    }

    fn font_size(&self, base: PercentBase) -> Result<Length, PropertyError> {
        let value = if base == PercentBase::ParentFontSize {
            self.list.get_from_parent(PropertyId::FontSize)?
        } else {
            self.list.get(PropertyId::FontSize)?
        };
        value
            .as_length()
            .ok_or_else(|| PropertyError::Computation {
                property: PropertyId::FontSize.to_string(),
                reason: format!("\"{value}\" is not a length"),
            })
    }

    fn arguments(&mut self) -> Result<Vec<Property>, PropertyError> {
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(&ExprToken::RightParen) {
            let _ = self.advance();
            return Ok(args);
        }
        loop {
            self.skip_whitespace();
            args.push(self.parse_additive()?);
            self.skip_whitespace();
            match self.advance() {
                Some(ExprToken::Comma) => {}
                Some(ExprToken::RightParen) => return Ok(args),
                _ => return Err(self.error("expected \",\" or \")\"")),
            }
        }
    }

    /// [XSL 1.1 § 5.10 Core Function Library](https://www.w3.org/TR/xsl11/)
    fn function(&mut self, name: &str) -> Result<Property, PropertyError> {
        if name == "rgb" {
            self.in_rgb = true;
            let args = self.arguments();
            self.in_rgb = false;
            return self.rgb(&args?);
        }

        let args = self.arguments()?;
        match name {
            "inherited-property-value" => {
                let target = self.property_argument(&args)?;
                let value = self.list.get_inherited(target.base)?;
                self.component_of(value, target)
            }
            "from-parent" => {
                let target = self.property_argument(&args)?;
                let value = self.list.get_from_parent(target.base)?;
                self.component_of(value, target)
            }
            "from-nearest-specified-value" => {
                let target = self.property_argument(&args)?;
                let value = self.list.get_nearest_specified(target.base)?;
                self.component_of(value, target)
            }
            "abs" => self.unary_numeric(&args, f64::abs),
            "floor" => self.unary_numeric(&args, f64::floor),
            "ceiling" => self.unary_numeric(&args, f64::ceil),
            "round" => self.unary_numeric(&args, f64::round),
            "min" | "max" => self.extremum(name, &args),
            _ => Err(PropertyError::UnknownFunction {
                name: name.to_string(),
            }),
        }
    }

    /// The property a value-function refers to: its argument, or the
    /// property being parsed.
    fn property_argument(&self, args: &[Property]) -> Result<PropertyRef, PropertyError> {
        match args {
            [] => Ok(PropertyRef::new(self.maker.id().base)),
            [Property::NcName(name)] => {
                PropertyRef::parse(name).ok_or_else(|| PropertyError::UnknownProperty {
                    name: name.clone(),
                })
            }
            _ => Err(self.error("expected a property name")),
        }
    }

    fn component_of(&self, value: Property, target: PropertyRef) -> Result<Property, PropertyError> {
        match target.sub {
            None => Ok(value),
            Some(sub) => value.component(sub).cloned().ok_or_else(|| {
                PropertyError::InconsistentCompound {
                    kind: target.base.to_string(),
                    component: sub.to_string(),
                }
            }),
        }
    }

    fn rgb(&self, args: &[Property]) -> Result<Property, PropertyError> {
        let [r, g, b] = args else {
            return Err(self.error("rgb() takes three arguments"));
        };
        let channel = |value: &Property| {
            value
                .as_number()
                .map(to_channel)
                .ok_or_else(|| self.error("rgb() arguments must be numbers or percentages"))
        };
        Ok(Property::Color(Color::rgb(channel(r)?, channel(g)?, channel(b)?)))
    }

    fn unary_numeric(
        &self,
        args: &[Property],
        f: impl Fn(f64) -> f64,
    ) -> Result<Property, PropertyError> {
        match args {
            [Property::Number(n)] => Ok(Property::Number(f(*n))),
            [Property::Length(length)] if length.is_absolute() => {
                Ok(Property::Length(Length::from_points(f(length.points().unwrap_or_default()))))
            }
            _ => Err(self.error("expected one numeric argument")),
        }
    }

    fn extremum(&self, name: &str, args: &[Property]) -> Result<Property, PropertyError> {
        let [a, b] = args else {
            return Err(self.error(format!("{name}() takes two arguments")));
        };
        let pick_first = match (a, b) {
            (Property::Number(x), Property::Number(y)) => (x <= y) == (name == "min"),
            (Property::Length(x), Property::Length(y)) => match (x.millipoints(), y.millipoints()) {
                (Some(x), Some(y)) => (x <= y) == (name == "min"),
                _ => return Err(self.error(format!("{name}() needs absolute lengths"))),
            },
            _ => return Err(self.error(format!("{name}() arguments must have the same type"))),
        };
        Ok(if pick_first { a.clone() } else { b.clone() })
    }

    fn apply(&self, op: Op, left: Property, right: Property) -> Result<Property, PropertyError> {
        let result = match (op, &left, &right) {
            (Op::Add, Property::Number(a), Property::Number(b)) => Some(Property::Number(a + b)),
            (Op::Subtract, Property::Number(a), Property::Number(b)) => {
                Some(Property::Number(a - b))
            }
            (Op::Multiply, Property::Number(a), Property::Number(b)) => {
                Some(Property::Number(a * b))
            }
            (Op::Divide, Property::Number(a), Property::Number(b)) if b.abs() > f64::EPSILON => {
                Some(Property::Number(a / b))
            }
            (Op::Modulo, Property::Number(a), Property::Number(b)) if b.abs() > f64::EPSILON => {
                Some(Property::Number(a % b))
            }
            (Op::Add, Property::Length(a), Property::Length(b)) => {
                a.checked_add(*b).map(Property::Length)
            }
            (Op::Subtract, Property::Length(a), Property::Length(b)) => {
                a.checked_add(b.scale(-1.0)).map(Property::Length)
            }
            (Op::Multiply, Property::Length(l), Property::Number(n))
            | (Op::Multiply, Property::Number(n), Property::Length(l)) => {
                Some(Property::Length(l.scale(*n)))
            }
            (Op::Divide, Property::Length(l), Property::Number(n)) if n.abs() > f64::EPSILON => {
                Some(Property::Length(l.scale(1.0 / n)))
            }
            _ => None,
        };
        result.ok_or_else(|| self.error(format!("cannot apply {op:?} to {left} and {right}")))
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
