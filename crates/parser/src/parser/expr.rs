//! Expression parsing by precedence climbing.

use super::{PResult, Parser};
use crate::ast::*;
use crate::error::{ParseError, Span};
use crate::token::{Keyword, Punct, Tok};

/// Binding strength, weakest first. All binary levels are left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Precedence {
    Lowest = 0,
    Or,      // ||
    And,     // &&
    Compare, // == != < <= > >=
    Sum,     // + - | ^
    Product, // * / % << >> & &^
}

impl Precedence {
    pub(crate) fn of(op: BinaryOp) -> Self {
        match op {
            BinaryOp::LOr => Precedence::Or,
            BinaryOp::LAnd => Precedence::And,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => Precedence::Compare,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Or | BinaryOp::Xor => Precedence::Sum,
            BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Rem
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::And
            | BinaryOp::AndNot => Precedence::Product,
        }
    }
}

impl<'src> Parser<'src> {
    pub(crate) fn parse_expr(&mut self) -> PResult<ExprId> {
        self.parse_expr_prec(Precedence::Lowest)
    }

    pub(crate) fn parse_expr_list(&mut self) -> PResult<Vec<ExprId>> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(Punct::Comma)? {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        match self.tok.tok {
            Tok::Punct(p) => BinaryOp::from_punct(p),
            _ => None,
        }
    }

    fn parse_expr_prec(&mut self, min_prec: Precedence) -> PResult<ExprId> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.binary_op() {
            let prec = Precedence::of(op);
            if prec <= min_prec {
                break;
            }
            let op_pos = self.pos();
            self.advance()?;
            let right = self.parse_expr_prec(prec)?;
            let span = self.arena.exprs.span(left).to(self.arena.exprs.span(right));
            left = self.arena.exprs.alloc(
                Expr::Binary {
                    left,
                    op,
                    op_pos,
                    right,
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> PResult<ExprId> {
        self.nested(Self::unary_expr)
    }

    fn unary_expr(&mut self) -> PResult<ExprId> {
        let op = match self.tok.tok {
            Tok::Punct(p) => UnaryOp::from_punct(p),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_primary_expr();
        };

        let op_pos = self.pos();
        if op == UnaryOp::Recv && self.peek()?.is_keyword(Keyword::Chan) {
            let typ = self.parse_type()?;
            return Ok(self.alloc_expr(Expr::Type(typ), op_pos));
        }
        self.advance()?;
        let expr = self.parse_unary_expr()?;
        Ok(self.alloc_expr(Expr::Unary { op, op_pos, expr }, op_pos))
    }

    #[inline]
    fn alloc_expr(&mut self, expr: Expr, start: Span) -> ExprId {
        let span = self.span_from(start);
        self.arena.exprs.alloc(expr, span)
    }

    /// Operand followed by any chain of selectors, index/slice expressions,
    /// type assertions and calls.
    fn parse_primary_expr(&mut self) -> PResult<ExprId> {
        let mut x = self.parse_operand()?;
        loop {
            let start = self.arena.exprs.span(x);
            x = match self.tok.tok {
                Tok::Punct(Punct::Dot) => {
                    let dot_pos = self.pos();
                    self.advance()?;
                    if self.eat(Punct::LParen)? {
                        let typ = self.parse_type()?;
                        self.expect(Punct::RParen)?;
                        self.alloc_expr(Expr::TypeAssert { expr: x, dot_pos, typ }, start)
                    } else {
                        let sel = self.ident()?;
                        self.alloc_expr(Expr::Selector { expr: x, dot_pos, sel }, start)
                    }
                }
                Tok::Punct(Punct::LBrack) => self.parse_index_or_slice(x)?,
                Tok::Punct(Punct::LParen) => self.parse_call(x)?,
                _ => return Ok(x),
            };
        }
    }

    fn parse_index_or_slice(&mut self, expr: ExprId) -> PResult<ExprId> {
        let start = self.arena.exprs.span(expr);
        let l_brack = self.expect(Punct::LBrack)?;

        let lo = if self.at(Punct::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        if !self.eat(Punct::Colon)? {
            let r_brack = self.expect(Punct::RBrack)?;
            let Some(index) = lo else {
                return Err(ParseError::new(r_brack, "operand", "`]`").into());
            };
            return Ok(self.alloc_expr(
                Expr::Index {
                    expr,
                    l_brack,
                    index,
                    r_brack,
                },
                start,
            ));
        }

        let hi = if self.at(Punct::Colon) || self.at(Punct::RBrack) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let max = if self.at(Punct::Colon) {
            if hi.is_none() {
                return Err(self.unexpected("middle index"));
            }
            self.advance()?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        let r_brack = self.expect(Punct::RBrack)?;
        Ok(self.alloc_expr(
            Expr::Slice {
                expr,
                l_brack,
                lo,
                hi,
                max,
                r_brack,
            },
            start,
        ))
    }

    /// `Arguments = "(" [ ExpressionList [ "..." ] [ "," ] ] ")"`; arguments may
    /// be types (`make([]int, n)`).
    fn parse_call(&mut self, callee: ExprId) -> PResult<ExprId> {
        let start = self.arena.exprs.span(callee);
        let l_paren = self.expect(Punct::LParen)?;

        let mut args = Vec::new();
        let mut ellipsis = None;
        while !self.at(Punct::RParen) && !self.at_eof() {
            args.push(self.parse_expr()?);
            if self.at(Punct::Ellipsis) {
                ellipsis = Some(self.pos());
                self.advance()?;
                self.eat(Punct::Comma)?;
                break;
            }
            if !self.eat(Punct::Comma)? {
                break;
            }
        }
        let r_paren = self.expect(Punct::RParen)?;

        let args = self.arena.list_exprs(args);
        Ok(self.alloc_expr(
            Expr::Call {
                callee,
                l_paren,
                args,
                ellipsis,
                r_paren,
            },
            start,
        ))
    }

    fn parse_operand(&mut self) -> PResult<ExprId> {
        let start = self.pos();
        if let Some(lit) = self.basic_lit() {
            self.advance()?;
            return Ok(self.alloc_expr(Expr::BasicLit(lit), start));
        }

        match self.tok.tok {
            Tok::Ident(_) => {
                let name = self.ident()?;
                Ok(self.alloc_expr(Expr::Ident(name), start))
            }
            Tok::Punct(Punct::LParen) => {
                self.advance()?;
                let expr = self.parse_expr()?;
                let r_paren = self.expect(Punct::RParen)?;
                Ok(self.alloc_expr(
                    Expr::Paren {
                        l_paren: start,
                        expr,
                        r_paren,
                    },
                    start,
                ))
            }
            Tok::Keyword(Keyword::Func) => self.parse_func_lit_or_type(),
            Tok::Punct(Punct::LBrack)
            | Tok::Keyword(Keyword::Map | Keyword::Chan | Keyword::Struct) => {
                let typ = self.parse_type()?;
                Ok(self.alloc_expr(Expr::Type(typ), start))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Literal at the current token, without consuming it.
    fn basic_lit(&mut self) -> Option<BasicLit> {
        let (raw, value) = match &self.tok.tok {
            Tok::Int(raw, lit) => (*raw, LitValue::Int(lit.clone())),
            Tok::Float(raw, lit) => (*raw, LitValue::Float(lit.clone())),
            Tok::Imag(raw, num) => (*raw, LitValue::Imag(num.clone())),
            Tok::Rune(raw) => (*raw, LitValue::Rune),
            Tok::Str(raw) => (*raw, LitValue::String),
            _ => return None,
        };
        Some(BasicLit {
            raw: self.interner.intern(raw),
            value,
        })
    }

    /// `func` in operand position: a function literal when a body follows,
    /// otherwise a function type (`func(int) bool(f)`).
    fn parse_func_lit_or_type(&mut self) -> PResult<ExprId> {
        let func_pos = self.expect_kw(Keyword::Func)?;
        let sig = self.parse_signature_after_func(func_pos)?;
        if self.at(Punct::LBrace) {
            let body = self.parse_block()?;
            return Ok(self.alloc_expr(Expr::FuncLit { func_pos, sig, body }, func_pos));
        }
        let span = self.span_from(func_pos);
        let typ = self.arena.types.alloc(Type::Func { func_pos, sig }, span);
        Ok(self.alloc_expr(Expr::Type(typ), func_pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(Precedence::of(BinaryOp::LOr) < Precedence::of(BinaryOp::LAnd));
        assert!(Precedence::of(BinaryOp::LAnd) < Precedence::of(BinaryOp::Lt));
        assert!(Precedence::of(BinaryOp::Eq) < Precedence::of(BinaryOp::Xor));
        assert!(Precedence::of(BinaryOp::Or) < Precedence::of(BinaryOp::Shl));
        assert_eq!(Precedence::of(BinaryOp::AndNot), Precedence::of(BinaryOp::Mul));
    }
}
