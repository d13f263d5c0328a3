//! Formula parser: converts expression text (without the leading `=`) into an AST.
//!
//! Supports numbers, upper-case A1 references, `+ - * /`, unary `+`/`-` and
//! parentheses.

use super::formula::{BinaryOp, Expr, FormulaError, UnaryOp};
use super::position::Position;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    /// Cell reference as written, e.g. "B12"
    CellRef(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

pub(crate) fn parse(input: &str) -> Result<Expr, FormulaError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(FormulaError::syntax("empty formula"));
    }
    let (expr, pos) = parse_add_sub(&tokens, 0)?;
    if pos < tokens.len() {
        return Err(FormulaError::syntax(format!(
            "unexpected token {:?}",
            tokens[pos]
        )));
    }
    Ok(expr)
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => { chars.next(); }
            '+' => { tokens.push(Token::Plus); chars.next(); }
            '-' => { tokens.push(Token::Minus); chars.next(); }
            '*' => { tokens.push(Token::Star); chars.next(); }
            '/' => { tokens.push(Token::Slash); chars.next(); }
            '(' => { tokens.push(Token::LParen); chars.next(); }
            ')' => { tokens.push(Token::RParen); chars.next(); }
            'A'..='Z' => {
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_uppercase() {
                        name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let letters = name.len();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() {
                        name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.len() == letters {
                    return Err(FormulaError::syntax(format!("invalid cell reference: {}", name)));
                }
                tokens.push(Token::CellRef(name));
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        num_str.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // Optional exponent: e.g. 1e5, 2.5E-3
                if let Some(&e) = chars.peek() {
                    if e == 'e' || e == 'E' {
                        num_str.push(e);
                        chars.next();
                        if let Some(&sign) = chars.peek() {
                            if sign == '+' || sign == '-' {
                                num_str.push(sign);
                                chars.next();
                            }
                        }
                        while let Some(&d) = chars.peek() {
                            if d.is_ascii_digit() {
                                num_str.push(d);
                                chars.next();
                            } else {
                                break;
                            }
                        }
                    }
                }
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| FormulaError::syntax(format!("invalid number: {}", num_str)))?;
                if !num.is_finite() {
                    return Err(FormulaError::syntax(format!("number out of range: {}", num_str)));
                }
                tokens.push(Token::Number(num));
            }
            _ => return Err(FormulaError::syntax(format!("unexpected character: {}", c))),
        }
    }

    Ok(tokens)
}

// Lowest precedence: + and -
fn parse_add_sub(tokens: &[Token], pos: usize) -> Result<(Expr, usize), FormulaError> {
    let (mut left, mut pos) = parse_mul_div(tokens, pos)?;

    while pos < tokens.len() {
        let op = match &tokens[pos] {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            _ => break,
        };
        let (right, new_pos) = parse_mul_div(tokens, pos + 1)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        pos = new_pos;
    }

    Ok((left, pos))
}

fn parse_mul_div(tokens: &[Token], pos: usize) -> Result<(Expr, usize), FormulaError> {
    let (mut left, mut pos) = parse_unary(tokens, pos)?;

    while pos < tokens.len() {
        let op = match &tokens[pos] {
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            _ => break,
        };
        let (right, new_pos) = parse_unary(tokens, pos + 1)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        pos = new_pos;
    }

    Ok((left, pos))
}

fn parse_unary(tokens: &[Token], pos: usize) -> Result<(Expr, usize), FormulaError> {
    let op = match tokens.get(pos) {
        Some(Token::Plus) => UnaryOp::Plus,
        Some(Token::Minus) => UnaryOp::Minus,
        _ => return parse_primary(tokens, pos),
    };
    let (operand, pos) = parse_unary(tokens, pos + 1)?;
    Ok((
        Expr::Unary {
            op,
            operand: Box::new(operand),
        },
        pos,
    ))
}

fn parse_primary(tokens: &[Token], pos: usize) -> Result<(Expr, usize), FormulaError> {
    match tokens.get(pos) {
        Some(Token::Number(n)) => Ok((Expr::Number(*n), pos + 1)),
        Some(Token::CellRef(name)) => {
            let position = Position::from_a1(name);
            let expr = if position.is_valid() {
                Expr::Cell(position)
            } else {
                Expr::InvalidRef(name.clone())
            };
            Ok((expr, pos + 1))
        }
        Some(Token::LParen) => {
            let (expr, pos) = parse_add_sub(tokens, pos + 1)?;
            match tokens.get(pos) {
                Some(Token::RParen) => Ok((expr, pos + 1)),
                _ => Err(FormulaError::syntax("expected )")),
            }
        }
        Some(token) => Err(FormulaError::syntax(format!("unexpected token {:?}", token))),
        None => Err(FormulaError::syntax("unexpected end of formula")),
    }
}
