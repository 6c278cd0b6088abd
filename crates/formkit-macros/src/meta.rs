//! `FromMeta` helpers for attribute options darling does not parse directly.
//!
//! - [`LiteralList`] accepts `inclusion("a", "b")`, `inclusion(1, 2)`, and
//!   `inclusion = ["a", "b"]`, keeping each member as text.
//! - [`Number`] accepts integer, float, and negated literals for
//!   numericality bounds (`greater_than = 0`, `less_than = -2.5`).

use darling::FromMeta;
use syn::{Expr, ExprLit, ExprUnary, Lit, UnOp};

/// A list of literals, each kept as its text.
#[derive(Debug, Clone, Default)]
pub struct LiteralList(pub Vec<String>);

fn literal_text(lit: &Lit) -> darling::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(darling::Error::unexpected_lit_type(other)),
    }
}

fn expr_text(expr: &Expr) -> darling::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => literal_text(lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => expr_text(expr).map(|s| format!("-{s}")),
        other => Err(darling::Error::unexpected_expr_type(other)),
    }
}

impl FromMeta for LiteralList {
    /// Handles parenthesized list syntax: `field("a", "b", "c")`
    fn from_list(items: &[darling::ast::NestedMeta]) -> darling::Result<Self> {
        items
            .iter()
            .map(|item| match item {
                darling::ast::NestedMeta::Lit(lit) => literal_text(lit),
                darling::ast::NestedMeta::Meta(_) => {
                    Err(darling::Error::unexpected_type("non-literal list member"))
                }
            })
            .collect::<darling::Result<Vec<_>>>()
            .map(LiteralList)
    }

    /// Handles array expression syntax: `field = ["a", "b", "c"]`
    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        match expr {
            Expr::Array(arr) => arr
                .elems
                .iter()
                .map(expr_text)
                .collect::<darling::Result<Vec<_>>>()
                .map(LiteralList),
            _ => Err(darling::Error::unexpected_expr_type(expr)),
        }
    }
}

/// A numeric option value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(pub f64);

impl FromMeta for Number {
    fn from_value(lit: &Lit) -> darling::Result<Self> {
        let text = match lit {
            Lit::Int(i) => i.base10_digits().to_string(),
            Lit::Float(f) => f.base10_digits().to_string(),
            Lit::Str(s) => s.value(),
            other => return Err(darling::Error::unexpected_lit_type(other)),
        };
        text.trim()
            .parse::<f64>()
            .map(Number)
            .map_err(|_| darling::Error::custom(format!("`{text}` is not a number")))
    }

    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        match expr {
            Expr::Lit(ExprLit { lit, .. }) => Self::from_value(lit),
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr,
                ..
            }) => Self::from_expr(expr).map(|Number(n)| Number(-n)),
            Expr::Group(group) => Self::from_expr(&group.expr),
            _ => Err(darling::Error::unexpected_expr_type(expr)),
        }
    }
}
