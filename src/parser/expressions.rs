//! Expression parsing.
//!
//! Operator-precedence (Pratt) parsing driven by the binding powers
//! registered in the token table. [`Parser::parse_expression`] takes the
//! minimum binding power the caller will accept: it parses a prefix form
//! (the null denotation), then folds in infix and postfix forms (left
//! denotations) while the next token binds more tightly.
//!
//! Binary operators are left-associative, so a folded operator recurses
//! at its own binding power; assignment and the conditional operator are
//! right-associative and recurse one below theirs.
//!
//! The comma binds weaker than everything else and only ever separates:
//! argument lists, array and tuple elements. Positions that need one
//! expression of a list call [`Parser::parse_single_expression`], which
//! stops short of any comma.

use crate::ast::{
    AssignmentOperator, BinaryOperator, Expression, TypeSpecifier,
    UnaryOperator,
};
use crate::parser::{ParseError, Parser};
use crate::source::CharacterSource;
use crate::token::TokenKind;

/// Binding power of the prefix operators, one tier above binary `*`.
const UNARY_BINDING_POWER: u8 = 13;

impl<S: CharacterSource> Parser<S> {
    /// Parses one element of a comma-separated position: everything up
    /// to, but not including, a comma.
    pub(crate) fn parse_single_expression(
        &mut self,
    ) -> Result<Expression, ParseError> {
        self.parse_expression(TokenKind::Comma.precedence())
    }

    /// The Pratt loop. Parses a prefix form, then extends it while the
    /// upcoming token binds more tightly than `minimum_power`.
    pub(crate) fn parse_expression(
        &mut self,
        minimum_power: u8,
    ) -> Result<Expression, ParseError> {
        let mut left = self.parse_null_denotation()?;
        while minimum_power < self.peek.precedence() {
            left = self.parse_left_denotation(left)?;
        }
        Ok(left)
    }

    /// Prefix forms: literals, identifiers, `this`, unary operators,
    /// parenthesized expressions, and array literals.
    fn parse_null_denotation(&mut self) -> Result<Expression, ParseError> {
        let location = self.location;
        match self.peek {
            TokenKind::Integer => {
                let text = std::mem::take(&mut self.literal);
                self.advance_token()?;
                Ok(Expression::IntegerLiteral(text, location))
            }
            TokenKind::RealNumber => {
                let text = std::mem::take(&mut self.literal);
                self.advance_token()?;
                Ok(Expression::RealLiteral(text, location))
            }
            TokenKind::Character => {
                let value = self.literal.chars().next().unwrap_or('\0');
                self.advance_token()?;
                Ok(Expression::CharacterLiteral(value, location))
            }
            TokenKind::String => {
                let text = std::mem::take(&mut self.literal);
                self.advance_token()?;
                Ok(Expression::StringLiteral(text, location))
            }
            TokenKind::True => {
                self.advance_token()?;
                Ok(Expression::BooleanLiteral(true, location))
            }
            TokenKind::False => {
                self.advance_token()?;
                Ok(Expression::BooleanLiteral(false, location))
            }
            TokenKind::Null => {
                self.advance_token()?;
                Ok(Expression::NullLiteral(location))
            }
            TokenKind::This => {
                self.advance_token()?;
                Ok(Expression::This(location))
            }
            TokenKind::Identifier => {
                let name = self.expect_identifier()?;
                Ok(Expression::Identifier(name, location))
            }
            TokenKind::LeftParenthesis => self.parse_group_tuple_or_conversion(),
            TokenKind::LeftBracket => self.parse_array_literal(),
            // Unary plus has no effect and folds away.
            TokenKind::Addition => {
                self.advance_token()?;
                self.parse_expression(UNARY_BINDING_POWER)
            }
            kind => {
                if let Some(operator) = UnaryOperator::from_token(kind) {
                    self.advance_token()?;
                    let operand = self.parse_expression(UNARY_BINDING_POWER)?;
                    Ok(Expression::Unary {
                        operator,
                        operand: Box::new(operand),
                        location,
                    })
                } else {
                    Err(self.syntax_error(format!(
                        "expected an expression, found {}",
                        kind
                    )))
                }
            }
        }
    }

    /// Infix and postfix forms, dispatched on the token that extends the
    /// expression parsed so far.
    fn parse_left_denotation(
        &mut self,
        left: Expression,
    ) -> Result<Expression, ParseError> {
        let location = self.location;
        match self.peek {
            TokenKind::LeftParenthesis => {
                let arguments = self.parse_argument_list()?;
                Ok(Expression::Invoke {
                    callee: Box::new(left),
                    arguments,
                    location,
                })
            }
            TokenKind::LeftBracket => {
                self.advance_token()?;
                let index = self.parse_single_expression()?;
                self.expect(TokenKind::RightBracket)?;
                Ok(Expression::Index {
                    target: Box::new(left),
                    index: Box::new(index),
                    location,
                })
            }
            TokenKind::Conditional => {
                self.advance_token()?;
                let then_value = self.parse_single_expression()?;
                self.expect(TokenKind::Colon)?;
                // Right-associative: a ? b : c ? d : e nests rightward.
                let else_value = self
                    .parse_expression(TokenKind::Conditional.precedence() - 1)?;
                Ok(Expression::Conditional {
                    condition: Box::new(left),
                    then_value: Box::new(then_value),
                    else_value: Box::new(else_value),
                    location,
                })
            }
            kind => {
                if let Some(operator) = AssignmentOperator::from_token(kind) {
                    let power = kind.precedence();
                    self.advance_token()?;
                    // Right-associative.
                    let value = self.parse_expression(power - 1)?;
                    Ok(Expression::Assignment {
                        operator,
                        target: Box::new(left),
                        value: Box::new(value),
                        location,
                    })
                } else if let Some(operator) = BinaryOperator::from_token(kind) {
                    let power = kind.precedence();
                    self.advance_token()?;
                    let right = self.parse_expression(power)?;
                    Ok(Expression::Binary {
                        operator,
                        left: Box::new(left),
                        right: Box::new(right),
                        location,
                    })
                } else {
                    Err(self.syntax_error(format!(
                        "{} cannot continue an expression",
                        kind
                    )))
                }
            }
        }
    }

    /// Parses `(a, b, c)` after a callee expression.
    fn parse_argument_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(TokenKind::LeftParenthesis)?;
        let mut arguments = Vec::new();
        if self.peek != TokenKind::RightParenthesis {
            arguments.push(self.parse_single_expression()?);
            while self.match_token(TokenKind::Comma)? {
                arguments.push(self.parse_single_expression()?);
            }
        }
        self.expect(TokenKind::RightParenthesis)?;
        Ok(arguments)
    }

    /// Parses `[a, b, c]`.
    fn parse_array_literal(&mut self) -> Result<Expression, ParseError> {
        let location = self.location;
        self.expect(TokenKind::LeftBracket)?;
        let mut elements = Vec::new();
        if self.peek != TokenKind::RightBracket {
            elements.push(self.parse_single_expression()?);
            while self.match_token(TokenKind::Comma)? {
                elements.push(self.parse_single_expression()?);
            }
        }
        self.expect(TokenKind::RightBracket)?;
        Ok(Expression::ArrayLiteral { elements, location })
    }

    /// Parses the forms introduced by `(`: a type conversion
    /// `(type) operand`, a parenthesized expression `(e)`, or a tuple
    /// `(a, b)`. A lone identifier in the parentheses could be either a
    /// type name or a variable; it resolves to a conversion, so the type
    /// attempt runs first, speculatively.
    fn parse_group_tuple_or_conversion(
        &mut self,
    ) -> Result<Expression, ParseError> {
        let location = self.location;
        self.expect(TokenKind::LeftParenthesis)?;

        self.begin_speculation();
        match self.parse_conversion_target() {
            Ok(target_type) => {
                self.commit_speculation();
                let operand = self.parse_expression(UNARY_BINDING_POWER)?;
                return Ok(Expression::Conversion {
                    target_type,
                    operand: Box::new(operand),
                    location,
                });
            }
            Err(_) => self.rollback_speculation(),
        }

        let first = self.parse_single_expression()?;
        if self.peek == TokenKind::Comma {
            let mut elements = vec![first];
            while self.match_token(TokenKind::Comma)? {
                elements.push(self.parse_single_expression()?);
            }
            self.expect(TokenKind::RightParenthesis)?;
            Ok(Expression::Tuple { elements, location })
        } else {
            self.expect(TokenKind::RightParenthesis)?;
            Ok(first)
        }
    }

    /// Speculative half of a conversion: the type and its closing `)`.
    /// Failing to see the `)` rejects the conversion reading, so `(x)`
    /// with `x` followed by an operator still parses as a group.
    fn parse_conversion_target(&mut self) -> Result<TypeSpecifier, ParseError> {
        let target_type = self.parse_type_specifier()?;
        self.expect(TokenKind::RightParenthesis)?;
        Ok(target_type)
    }
}
