/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Recursive descent parser for value expressions
//!
//! Precedence, lowest first: ternary, `||`, `&&`, `!`, comparison / `in`,
//! additive, multiplicative, power, unary minus, primary.

use super::lexer::{tokenize, Token, TokenType};
use super::EvalError;
use serde_json::Value;

/// Parsed expression tree
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Value),
    /// Dotted path resolved against the bindings
    Identifier(String),
    List(Vec<Expr>),
    Map(Vec<(String, Expr)>),
    Unary {
        op: &'static str,
        operand: Box<Expr>,
    },
    Binary {
        op: &'static str,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

/// Deepest nesting accepted, counting brackets, prefix operators and chained
/// binary operators. Deeper input is a syntax error, never a stack overflow.
const MAX_DEPTH: usize = 128;

pub(crate) struct ExpressionParser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl ExpressionParser {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current: 0,
            depth: 0,
        }
    }

    /// Parse an expression string into an expression tree.
    pub fn parse(&mut self, expr: &str) -> Result<Expr, EvalError> {
        self.tokens = tokenize(expr)?;
        self.current = 0;
        self.depth = 0;
        let result = self.parse_ternary()?;
        if !self.is_at_end() {
            let token = self.peek();
            return Err(EvalError::Syntax(format!(
                "unexpected token at position {}: {:?}",
                token.position, token.token_type
            )));
        }
        Ok(result)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::Eof)
    }

    fn peek(&self) -> &Token {
        let index = self.current.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.current < self.tokens.len() {
            self.current += 1;
        }
        token
    }

    fn check(&self, token_type: &TokenType) -> bool {
        &self.peek().token_type == token_type
    }

    fn check_operator(&self, ops: &[&'static str]) -> Option<&'static str> {
        match self.peek().token_type {
            TokenType::Operator(op) if ops.contains(&op) => Some(op),
            _ => None,
        }
    }

    fn expect(&mut self, token_type: TokenType, what: &str) -> Result<(), EvalError> {
        if self.check(&token_type) {
            self.advance();
            Ok(())
        } else {
            Err(EvalError::Syntax(format!(
                "expected {what} at position {}",
                self.peek().position
            )))
        }
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::Syntax("expression nested too deeply".to_string()));
        }
        Ok(())
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        self.descend()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_ternary(&mut self) -> Result<Expr, EvalError> {
        let condition = self.parse_logical_or()?;
        if !self.check(&TokenType::Question) {
            return Ok(condition);
        }
        self.advance();
        let then = self.nested(Self::parse_ternary)?;
        self.expect(TokenType::Colon, "':'")?;
        let otherwise = self.nested(Self::parse_ternary)?;
        Ok(Expr::Ternary {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_logical_or(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_logical_and()?;
        let mut levels = 0;
        while let Some(op) = self.check_operator(&["||"]) {
            self.advance();
            self.descend()?;
            levels += 1;
            let right = self.parse_logical_and()?;
            left = binary(op, left, right);
        }
        self.depth -= levels;
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_logical_not()?;
        let mut levels = 0;
        while let Some(op) = self.check_operator(&["&&"]) {
            self.advance();
            self.descend()?;
            levels += 1;
            let right = self.parse_logical_not()?;
            left = binary(op, left, right);
        }
        self.depth -= levels;
        Ok(left)
    }

    fn parse_logical_not(&mut self) -> Result<Expr, EvalError> {
        if let Some(op) = self.check_operator(&["!"]) {
            self.advance();
            let operand = self.nested(Self::parse_logical_not)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, EvalError> {
        let left = self.parse_additive()?;
        if let Some(op) = self.check_operator(&["==", "!=", ">", "<", ">=", "<=", "in"]) {
            self.advance();
            let right = self.parse_additive()?;
            return Ok(binary(op, left, right));
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_multiplicative()?;
        let mut levels = 0;
        while let Some(op) = self.check_operator(&["+", "-"]) {
            self.advance();
            self.descend()?;
            levels += 1;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        self.depth -= levels;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_power()?;
        let mut levels = 0;
        while let Some(op) = self.check_operator(&["*", "/", "%"]) {
            self.advance();
            self.descend()?;
            levels += 1;
            let right = self.parse_power()?;
            left = binary(op, left, right);
        }
        self.depth -= levels;
        Ok(left)
    }

    /// Right associative: `2 ** 3 ** 2` is `2 ** 9`
    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_unary()?;
        if self.check_operator(&["**", "^"]).is_some() {
            self.advance();
            let exponent = self.nested(Self::parse_power)?;
            return Ok(binary("**", base, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        if let Some(op) = self.check_operator(&["-", "+"]) {
            self.advance();
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let token = self.advance();
        match token.token_type {
            TokenType::Boolean(b) => Ok(Expr::Literal(Value::Bool(b))),
            TokenType::String(s) => Ok(Expr::Literal(Value::String(s))),
            TokenType::Integer(n) => Ok(Expr::Literal(Value::from(n))),
            TokenType::Float(n) => serde_json::Number::from_f64(n)
                .map(|num| Expr::Literal(Value::Number(num)))
                .ok_or_else(|| {
                    EvalError::Syntax(format!("invalid number at position {}", token.position))
                }),
            TokenType::Nil => Ok(Expr::Literal(Value::Null)),
            TokenType::Identifier(name) => {
                if self.check(&TokenType::LeftParen) {
                    self.parse_call(name)
                } else {
                    Ok(Expr::Identifier(name))
                }
            }
            TokenType::LeftParen => {
                let expr = self.nested(Self::parse_ternary)?;
                self.expect(TokenType::RightParen, "')'")?;
                Ok(expr)
            }
            TokenType::LeftBracket => {
                let elements = self.nested(|p| {
                    p.parse_list(TokenType::RightBracket, Self::parse_ternary)
                })?;
                Ok(Expr::List(elements))
            }
            TokenType::LeftBrace => {
                let entries = self.nested(|p| {
                    p.parse_list(TokenType::RightBrace, Self::parse_map_entry)
                })?;
                Ok(Expr::Map(entries))
            }
            TokenType::Eof => Err(EvalError::Syntax(
                "unexpected end of expression".to_string(),
            )),
            other => Err(EvalError::Syntax(format!(
                "unexpected token at position {}: {:?}",
                token.position, other
            ))),
        }
    }

    fn parse_call(&mut self, name: String) -> Result<Expr, EvalError> {
        self.advance(); // consume '('
        let args = self.nested(|p| p.parse_list(TokenType::RightParen, Self::parse_ternary))?;
        Ok(Expr::Call { name, args })
    }

    fn parse_map_entry(&mut self) -> Result<(String, Expr), EvalError> {
        let token = self.advance();
        let key = match token.token_type {
            TokenType::Identifier(name) => name,
            TokenType::String(s) => s,
            TokenType::Integer(n) => n.to_string(),
            other => {
                return Err(EvalError::Syntax(format!(
                    "invalid map key at position {}: {:?}",
                    token.position, other
                )))
            }
        };
        self.expect(TokenType::Colon, "':'")?;
        let value = self.parse_ternary()?;
        Ok((key, value))
    }

    /// Parse comma separated items up to `close`, allowing a trailing comma.
    fn parse_list<T>(
        &mut self,
        close: TokenType,
        mut item: impl FnMut(&mut Self) -> Result<T, EvalError>,
    ) -> Result<Vec<T>, EvalError> {
        let mut items = Vec::new();
        while !self.check(&close) {
            items.push(item(self)?);
            if self.check(&TokenType::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(close, "closing delimiter")?;
        Ok(items)
    }
}

fn binary(op: &'static str, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
