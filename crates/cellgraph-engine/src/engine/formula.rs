//! Parsed formulas.
//!
//! A [`Formula`] can evaluate itself given a way to read other cells, report
//! the positions it reads, and print itself back in canonical form.

use std::collections::BTreeSet;
use std::fmt::{self, Write};

use thiserror::Error;

use super::position::Position;
use super::value::ErrorKind;

/// Failure to turn expression text into a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Formula syntax error: {message}")]
    Syntax { message: String },
}

impl FormulaError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        FormulaError::Syntax {
            message: message.into(),
        }
    }
}

/// Result of evaluating a formula: a number or a value-level error.
pub type FormulaResult = Result<f64, ErrorKind>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone)]
pub(crate) enum Expr {
    Number(f64),
    Cell(Position),
    /// Well-formed reference outside the addressable grid.
    InvalidRef(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl BinaryOp {
    fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }
}

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { .. } => 3,
            _ => 4,
        }
    }

    fn evaluate<F>(&self, read: &F) -> FormulaResult
    where
        F: Fn(Position) -> FormulaResult,
    {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Cell(pos) => read(*pos),
            Expr::InvalidRef(_) => Err(ErrorKind::Ref),
            Expr::Unary { op, operand } => {
                let v = operand.evaluate(read)?;
                Ok(match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Minus => -v,
                })
            }
            Expr::Binary { op, left, right } => {
                let l = left.evaluate(read)?;
                let r = right.evaluate(read)?;
                let result = match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => {
                        if r == 0.0 {
                            return Err(ErrorKind::Div0);
                        }
                        l / r
                    }
                };
                if result.is_finite() {
                    Ok(result)
                } else {
                    Err(ErrorKind::Div0)
                }
            }
        }
    }

    fn print(&self, out: &mut String) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(out, "{}", n),
            Expr::Cell(pos) => write!(out, "{}", pos),
            Expr::InvalidRef(name) => out.write_str(name),
            Expr::Unary { op, operand } => {
                out.push(match op {
                    UnaryOp::Plus => '+',
                    UnaryOp::Minus => '-',
                });
                let parens = matches!(**operand, Expr::Binary { .. });
                print_child(operand, parens, out)
            }
            Expr::Binary { op, left, right } => {
                let prec = op.precedence();
                print_child(left, left.precedence() < prec, out)?;
                out.push(op.symbol());
                let right_parens = right.precedence() < prec
                    || (right.precedence() == prec && matches!(op, BinaryOp::Sub | BinaryOp::Div));
                print_child(right, right_parens, out)
            }
        }
    }

    fn collect_cells(&self, cells: &mut BTreeSet<Position>) {
        match self {
            Expr::Cell(pos) => {
                cells.insert(*pos);
            }
            Expr::Unary { operand, .. } => operand.collect_cells(cells),
            Expr::Binary { left, right, .. } => {
                left.collect_cells(cells);
                right.collect_cells(cells);
            }
            Expr::Number(_) | Expr::InvalidRef(_) => {}
        }
    }
}

fn print_child(expr: &Expr, parens: bool, out: &mut String) -> fmt::Result {
    if parens {
        out.push('(');
        expr.print(out)?;
        out.push(')');
        Ok(())
    } else {
        expr.print(out)
    }
}

/// A parsed arithmetic formula.
#[derive(Debug, Clone)]
pub struct Formula {
    ast: Expr,
    references: Vec<Position>,
}

/// Parse expression text (without the leading `=`).
pub fn parse_formula(expression: &str) -> Result<Formula, FormulaError> {
    let ast = super::parser::parse(expression)?;
    let mut cells = BTreeSet::new();
    ast.collect_cells(&mut cells);
    Ok(Formula {
        ast,
        references: cells.into_iter().collect(),
    })
}

impl Formula {
    /// Evaluate using `read` to fetch the numeric value of referenced cells.
    /// The first error produced by `read` becomes the result.
    pub fn evaluate<F>(&self, read: F) -> FormulaResult
    where
        F: Fn(Position) -> FormulaResult,
    {
        self.ast.evaluate(&read)
    }

    /// Canonical text of the expression: no whitespace, minimal parentheses.
    pub fn expression(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.ast.print(&mut out);
        out
    }

    /// Distinct, valid positions read by this formula, in ascending order.
    pub fn referenced_cells(&self) -> &[Position] {
        &self.references
    }
}
