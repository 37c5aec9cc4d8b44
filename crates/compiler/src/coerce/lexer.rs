/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Tokenizer for value expressions

use super::EvalError;

/// Token types for the lexer
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenType {
    Identifier(String),
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Nil,
    Operator(&'static str),
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Question,
    Eof,
}

/// Token with position information
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub token_type: TokenType,
    pub position: usize,
}

const TWO_CHAR_OPERATORS: [&str; 7] = ["==", "!=", ">=", "<=", "&&", "||", "**"];
const ONE_CHAR_OPERATORS: [&str; 9] = [">", "<", "+", "-", "*", "/", "%", "!", "^"];

/// Tokenize the input string into tokens
pub(crate) fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut i = 0;
    let chars: Vec<char> = expr.chars().collect();

    while i < chars.len() {
        let char = chars[i];

        if char.is_whitespace() {
            i += 1;
            continue;
        }

        // String literals (single or double quotes)
        if char == '\'' || char == '"' {
            let quote = char;
            let start_pos = i;
            i += 1;
            let mut value = String::new();
            while i < chars.len() && chars[i] != quote {
                if chars[i] == '\\' && i + 1 < chars.len() {
                    i += 1;
                    value.push(match chars[i] {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                } else {
                    value.push(chars[i]);
                }
                i += 1;
            }
            if i >= chars.len() {
                return Err(EvalError::Syntax(format!(
                    "unterminated string literal at position {start_pos}"
                )));
            }
            tokens.push(Token {
                token_type: TokenType::String(value),
                position: start_pos,
            });
            i += 1;
            continue;
        }

        if char.is_ascii_digit() {
            let start_pos = i;
            let (token_type, next) = lex_number(&chars, i)?;
            tokens.push(Token {
                token_type,
                position: start_pos,
            });
            i = next;
            continue;
        }

        if i + 1 < chars.len() {
            let two_char: String = chars[i..i + 2].iter().collect();
            if let Some(op) = TWO_CHAR_OPERATORS.iter().find(|op| **op == two_char) {
                tokens.push(Token {
                    token_type: TokenType::Operator(*op),
                    position: i,
                });
                i += 2;
                continue;
            }
        }

        let punctuation = match char {
            '(' => Some(TokenType::LeftParen),
            ')' => Some(TokenType::RightParen),
            '[' => Some(TokenType::LeftBracket),
            ']' => Some(TokenType::RightBracket),
            '{' => Some(TokenType::LeftBrace),
            '}' => Some(TokenType::RightBrace),
            ',' => Some(TokenType::Comma),
            ':' => Some(TokenType::Colon),
            '?' => Some(TokenType::Question),
            _ => ONE_CHAR_OPERATORS
                .iter()
                .find(|op| op.starts_with(char))
                .map(|op| TokenType::Operator(*op)),
        };
        if let Some(token_type) = punctuation {
            tokens.push(Token {
                token_type,
                position: i,
            });
            i += 1;
            continue;
        }

        // Identifiers, keywords and dotted member paths
        if char.is_alphabetic() || char == '_' || char == '$' {
            let start_pos = i;
            let mut value = String::new();
            while i < chars.len()
                && (chars[i].is_alphanumeric()
                    || chars[i] == '_'
                    || chars[i] == '$'
                    || chars[i] == '.')
            {
                value.push(chars[i]);
                i += 1;
            }

            let token_type = match value.as_str() {
                "true" => TokenType::Boolean(true),
                "false" => TokenType::Boolean(false),
                "nil" | "null" => TokenType::Nil,
                "and" => TokenType::Operator("&&"),
                "or" => TokenType::Operator("||"),
                "not" => TokenType::Operator("!"),
                "in" => TokenType::Operator("in"),
                _ => TokenType::Identifier(value),
            };
            tokens.push(Token {
                token_type,
                position: start_pos,
            });
            continue;
        }

        return Err(EvalError::Syntax(format!(
            "unexpected character at position {i}: {char}"
        )));
    }

    tokens.push(Token {
        token_type: TokenType::Eof,
        position: i,
    });
    Ok(tokens)
}

/// Lex an integer or float literal starting at `start`.
///
/// Integers stay integers; a fraction or exponent makes the literal a float.
fn lex_number(chars: &[char], start: usize) -> Result<(TokenType, usize), EvalError> {
    let mut i = start;
    let mut text = String::new();
    let mut is_float = false;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
        if chars[i] != '_' {
            text.push(chars[i]);
        }
        i += 1;
    }

    if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
        is_float = true;
        text.push('.');
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            text.push(chars[i]);
            i += 1;
        }
    }

    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        let mut exponent = String::from("e");
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            exponent.push(chars[j]);
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                exponent.push(chars[j]);
                j += 1;
            }
            is_float = true;
            text.push_str(&exponent);
            i = j;
        }
    }

    // "1.2.3" and "12abc" are not numbers
    if i < chars.len() && (chars[i] == '.' || chars[i].is_alphabetic()) {
        return Err(EvalError::Syntax(format!(
            "invalid number at position {start}"
        )));
    }

    let token_type = if is_float {
        let value = text
            .parse::<f64>()
            .map_err(|e| EvalError::Syntax(format!("invalid number at position {start}: {e}")))?;
        TokenType::Float(value)
    } else {
        let value = text.parse::<i64>().map_err(|e| {
            EvalError::Syntax(format!("invalid integer at position {start}: {e}"))
        })?;
        TokenType::Integer(value)
    };
    Ok((token_type, i))
}
